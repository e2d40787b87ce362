//! Road way-type classification.
//!
//! The closed set mirrors the road classes that appear in segment map files.
//! `_link` ramp spellings fold into their parent class on parse; tags outside
//! the set are rejected by the map loader rather than silently defaulted, so
//! an unexpected map file fails loudly at startup.

/// Road classification tag carried by every map edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WayType {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    LivingStreet,
    Service,
    Unclassified,
}

impl WayType {
    /// Every known way type, in descending road-class order.
    pub const ALL: [WayType; 9] = [
        WayType::Motorway,
        WayType::Trunk,
        WayType::Primary,
        WayType::Secondary,
        WayType::Tertiary,
        WayType::Residential,
        WayType::LivingStreet,
        WayType::Service,
        WayType::Unclassified,
    ];

    /// Parse a map-file tag.  `_link` ramp variants fold into their parent
    /// class; unknown tags are `None`.
    pub fn parse(tag: &str) -> Option<WayType> {
        Some(match tag {
            "motorway" | "motorway_link"     => WayType::Motorway,
            "trunk" | "trunk_link"           => WayType::Trunk,
            "primary" | "primary_link"       => WayType::Primary,
            "secondary" | "secondary_link"   => WayType::Secondary,
            "tertiary" | "tertiary_link"     => WayType::Tertiary,
            "residential"                    => WayType::Residential,
            "living_street"                  => WayType::LivingStreet,
            "service"                        => WayType::Service,
            "unclassified"                   => WayType::Unclassified,
            _                                => return None,
        })
    }

    /// Fallback full carriageway width in metres, used when the map file
    /// omits the width column.
    ///
    /// Widths are conservative kerb-to-kerb defaults for each class —
    /// applications with surveyed widths should carry them in the map file.
    pub fn default_width_m(self) -> f64 {
        match self {
            WayType::Motorway     => 23.0,
            WayType::Trunk        => 18.0,
            WayType::Primary      => 15.0,
            WayType::Secondary    => 12.0,
            WayType::Tertiary     => 10.0,
            WayType::Residential  => 8.0,
            WayType::LivingStreet => 6.0,
            WayType::Service      => 5.0,
            WayType::Unclassified => 8.0,
        }
    }

    /// Map-file spelling, useful for log lines and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            WayType::Motorway     => "motorway",
            WayType::Trunk        => "trunk",
            WayType::Primary      => "primary",
            WayType::Secondary    => "secondary",
            WayType::Tertiary     => "tertiary",
            WayType::Residential  => "residential",
            WayType::LivingStreet => "living_street",
            WayType::Service      => "service",
            WayType::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for WayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
