//! Unit tests for ppm-core primitives.

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(35.0005, -84.00001);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(35.0, -84.0);
        let b = GeoPoint::new(36.0, -84.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn validity_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn perpendicular_segment_distance() {
        // Segment along the equator, query 0.0001° of latitude to the north:
        // 0.0001° ≈ 11.12 m.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);
        let p = GeoPoint::new(0.0001, 0.0005);
        let d = p.distance_to_segment_m(a, b);
        assert!((d - 11.12).abs() < 0.05, "got {d}");
    }

    #[test]
    fn projection_clamps_to_endpoint() {
        // Query past the `b` end: nearest point is `b` itself, 0.001° of
        // longitude away (~111 m at the equator).
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);
        let p = GeoPoint::new(0.0, 0.002);
        let d = p.distance_to_segment_m(a, b);
        assert!((d - 111.2).abs() < 0.5, "got {d}");
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let a = GeoPoint::new(35.0, -84.0);
        let p = GeoPoint::new(35.0001, -84.0);
        let seg = p.distance_to_segment_m(a, a);
        let pt = p.distance_m(a);
        assert!((seg - pt).abs() < 0.05, "segment {seg} vs point {pt}");
    }
}

#[cfg(test)]
mod bbox {
    use crate::{BBox, GeoPoint};

    fn unit_box() -> BBox {
        BBox::from_corners(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0))
    }

    #[test]
    fn from_corners_normalizes() {
        let b = BBox::from_corners(GeoPoint::new(1.0, 1.0), GeoPoint::new(0.0, 0.0));
        assert_eq!(b.sw, GeoPoint::new(0.0, 0.0));
        assert_eq!(b.ne, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn contains_is_boundary_inclusive() {
        let b = unit_box();
        assert!(b.contains(GeoPoint::new(0.5, 0.5)));
        assert!(b.contains(GeoPoint::new(0.0, 0.0)));
        assert!(b.contains(GeoPoint::new(1.0, 1.0)));
        assert!(!b.contains(GeoPoint::new(1.0001, 0.5)));
    }

    #[test]
    fn intersects_counts_shared_boundary() {
        let b = unit_box();
        let touching = BBox::from_corners(GeoPoint::new(1.0, 0.0), GeoPoint::new(2.0, 1.0));
        let apart = BBox::from_corners(GeoPoint::new(1.5, 0.0), GeoPoint::new(2.0, 1.0));
        assert!(b.intersects(&touching));
        assert!(touching.intersects(&b));
        assert!(!b.intersects(&apart));
    }

    #[test]
    fn quadrant_order_and_cover() {
        let b = unit_box();
        let [nw, ne, sw, se] = b.quadrants();

        // NW: top-left; NE: top-right; SW: bottom-left; SE: bottom-right.
        assert_eq!(nw.ne.lat, 1.0);
        assert_eq!(nw.sw.lon, 0.0);
        assert_eq!(ne.ne, b.ne);
        assert_eq!(sw.sw, b.sw);
        assert_eq!(se.sw.lat, 0.0);
        assert_eq!(se.ne.lon, 1.0);

        // Every quadrant shares the parent's center corner.
        let c = b.center();
        assert!(nw.contains(c) && ne.contains(c) && sw.contains(c) && se.contains(c));

        // Interior points land in exactly the expected quadrant.
        assert!(sw.contains(GeoPoint::new(0.25, 0.25)));
        assert!(!sw.contains(GeoPoint::new(0.75, 0.75)));
        assert!(ne.contains(GeoPoint::new(0.75, 0.75)));
    }

    #[test]
    fn union_and_padding() {
        let a = unit_box();
        let b = BBox::from_corners(GeoPoint::new(0.5, 0.5), GeoPoint::new(2.0, 2.0));
        let u = a.union(&b);
        assert_eq!(u.sw, GeoPoint::new(0.0, 0.0));
        assert_eq!(u.ne, GeoPoint::new(2.0, 2.0));

        let p = a.padded(0.1, 0.2);
        assert_eq!(p.sw, GeoPoint::new(-0.1, -0.2));
        assert_eq!(p.ne, GeoPoint::new(1.1, 1.2));
    }
}

#[cfg(test)]
mod waytype {
    use crate::WayType;

    #[test]
    fn parse_known_tags() {
        assert_eq!(WayType::parse("residential"), Some(WayType::Residential));
        assert_eq!(WayType::parse("service"), Some(WayType::Service));
        assert_eq!(WayType::parse("motorway"), Some(WayType::Motorway));
    }

    #[test]
    fn links_fold_into_parent_class() {
        assert_eq!(WayType::parse("motorway_link"), Some(WayType::Motorway));
        assert_eq!(WayType::parse("primary_link"), Some(WayType::Primary));
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(WayType::parse("footway"), None);
        assert_eq!(WayType::parse(""), None);
    }

    #[test]
    fn default_widths_positive() {
        for wt in WayType::ALL {
            assert!(wt.default_width_m() > 0.0, "{wt} has no default width");
        }
    }

    #[test]
    fn display_matches_map_spelling() {
        assert_eq!(WayType::LivingStreet.to_string(), "living_street");
    }
}

#[cfg(test)]
mod config {
    use std::collections::HashMap;

    use crate::{IdRedactionMode, PpmError, PrivacyConfig, WayType};

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_inactive() {
        let cfg = PrivacyConfig::from_map(&HashMap::new()).unwrap();
        assert!(!cfg.velocity_filter_on);
        assert!(!cfg.geofence_filter_on);
        assert_eq!(cfg.id_redaction, IdRedactionMode::Off);
        assert!(!cfg.partii_redaction_on);
        assert_eq!(cfg.velocity_min_mps, PrivacyConfig::DEFAULT_VELOCITY_MIN_MPS);
        assert_eq!(cfg.velocity_max_mps, PrivacyConfig::DEFAULT_VELOCITY_MAX_MPS);
        assert_eq!(cfg.admissible_way_types.len(), WayType::ALL.len());
    }

    #[test]
    fn full_map_parses() {
        let cfg = PrivacyConfig::from_map(&map(&[
            ("privacy.filter.velocity", "ON"),
            ("privacy.filter.velocity.min", "2.5"),
            ("privacy.filter.velocity.max", "30"),
            ("privacy.filter.geofence", "ON"),
            ("privacy.filter.geofence.extension", "5"),
            ("privacy.filter.geofence.waytypes", "residential, service"),
            ("privacy.redaction.id", "ON"),
            ("privacy.redaction.id.value", "0000"),
            ("privacy.redaction.partII", "ON"),
            ("privacy.redaction.partII.fields", "vehicleEventFlags,pathHistory"),
        ]))
        .unwrap();

        assert!(cfg.velocity_filter_on && cfg.geofence_filter_on && cfg.partii_redaction_on);
        assert_eq!(cfg.velocity_min_mps, 2.5);
        assert_eq!(cfg.velocity_max_mps, 30.0);
        assert_eq!(cfg.box_extension_m, 5.0);
        assert_eq!(cfg.admissible_way_types.len(), 2);
        assert!(cfg.admissible_way_types.contains(&WayType::Service));
        assert_eq!(cfg.id_redaction, IdRedactionMode::All);
        assert_eq!(cfg.id_replacement.as_deref(), Some("0000"));
        assert_eq!(cfg.partii_fields, vec!["vehicleEventFlags", "pathHistory"]);
    }

    #[test]
    fn id_list_becomes_inclusion_set() {
        let cfg = PrivacyConfig::from_map(&map(&[("privacy.redaction.id", "ABC, DEF")])).unwrap();
        match cfg.id_redaction {
            IdRedactionMode::Inclusion(set) => {
                assert_eq!(set.len(), 2);
                assert!(set.contains("ABC") && set.contains("DEF"));
            }
            other => panic!("expected inclusion set, got {other:?}"),
        }
    }

    #[test]
    fn switches_are_case_insensitive() {
        let cfg = PrivacyConfig::from_map(&map(&[("privacy.filter.velocity", "on")])).unwrap();
        assert!(cfg.velocity_filter_on);
        let cfg = PrivacyConfig::from_map(&map(&[("privacy.redaction.id", "off")])).unwrap();
        assert_eq!(cfg.id_redaction, IdRedactionMode::Off);
    }

    #[test]
    fn rejects_bad_values() {
        let err = PrivacyConfig::from_map(&map(&[("privacy.filter.velocity.min", "fast")]));
        assert!(matches!(err, Err(PpmError::Config(_))));

        let err = PrivacyConfig::from_map(&map(&[
            ("privacy.filter.velocity.min", "10"),
            ("privacy.filter.velocity.max", "2"),
        ]));
        assert!(matches!(err, Err(PpmError::Config(_))));

        let err = PrivacyConfig::from_map(&map(&[("privacy.filter.geofence.extension", "-1")]));
        assert!(matches!(err, Err(PpmError::Config(_))));

        let err = PrivacyConfig::from_map(&map(&[("privacy.filter.geofence.waytypes", "hoverlane")]));
        assert!(matches!(err, Err(PpmError::Config(_))));

        let err = PrivacyConfig::from_map(&map(&[("privacy.filter.geofence", "maybe")]));
        assert!(matches!(err, Err(PpmError::Config(_))));
    }
}
