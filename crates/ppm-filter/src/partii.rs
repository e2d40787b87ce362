//! Part II subtree redaction.
//!
//! Deletions are structural: objects lose the named key at any depth, while
//! arrays are traversed but never themselves shrunk — the named members live
//! only in objects.  Parsed documents are bounded by `serde_json`'s
//! recursion limit, so the recursive walks below cannot overflow the stack
//! on hostile input.

use serde_json::Value;

/// Remove every object member called `name`, anywhere under `value`.
///
/// Returns the number of members removed.  The walk is total — all
/// occurrences go, not just the first — and removal is order-preserving
/// (`shift_remove`), so surviving siblings keep their positions.
pub fn remove_all_members(value: &mut Value, name: &str) -> usize {
    match value {
        Value::Object(map) => {
            let mut removed = usize::from(map.shift_remove(name).is_some());
            for child in map.values_mut() {
                removed += remove_all_members(child, name);
            }
            removed
        }
        Value::Array(items) => items
            .iter_mut()
            .map(|item| remove_all_members(item, name))
            .sum(),
        _ => 0,
    }
}

/// `true` when any object under `value` has a member called `name`.
///
/// Short-circuits on the first occurrence — use this when only the fact of
/// presence matters, not the count.
pub fn is_member_present(value: &Value, name: &str) -> bool {
    match value {
        Value::Object(map) => {
            map.contains_key(name) || map.values().any(|child| is_member_present(child, name))
        }
        Value::Array(items) => items.iter().any(|item| is_member_present(item, name)),
        _ => false,
    }
}
