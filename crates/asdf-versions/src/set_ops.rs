//! Set operations over declared versions.
//!
//! Both functions are pure and order preserving: the same input order
//! always yields the same output.

use crate::tool_versions::ToolVersions;

/// Versions of `first` that also appear in `second`, in `first`'s order.
///
/// Multiplicity follows `first` only: a version repeated in `first` is
/// repeated in the result, while repeats in `second` add nothing.
#[must_use]
pub fn intersect(first: &[String], second: &[String]) -> Vec<String> {
    first
        .iter()
        .filter(|version| second.contains(version))
        .cloned()
        .collect()
}

/// Merge entries that share a tool name.
///
/// Tools keep the position of their first entry. Versions are concatenated
/// in first-seen order and any version already present for the tool is
/// dropped. Names compare exactly, so `Lua` and `lua` stay separate.
#[must_use]
pub fn unique(entries: Vec<ToolVersions>) -> Vec<ToolVersions> {
    let mut merged: Vec<ToolVersions> = Vec::new();

    for entry in entries {
        let index = match merged.iter().position(|m| m.name == entry.name) {
            Some(index) => index,
            None => {
                merged.push(ToolVersions::new(entry.name, Vec::new()));
                merged.len().saturating_sub(1)
            },
        };
        let target = &mut merged[index].versions;
        for version in entry.versions {
            if !target.contains(&version) {
                target.push(version);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn intersect_keeps_first_order_and_multiplicity() {
        let result = intersect(&strings(&["a", "b", "a"]), &strings(&["a", "c"]));
        assert_eq!(result, strings(&["a", "a"]));
    }

    #[test]
    fn intersect_ignores_repeats_in_second() {
        let result = intersect(&strings(&["a", "b"]), &strings(&["b", "b", "a", "a"]));
        assert_eq!(result, strings(&["a", "b"]));
    }

    #[test]
    fn intersect_with_empty_side() {
        assert!(intersect(&[], &strings(&["a"])).is_empty());
        assert!(intersect(&strings(&["a"]), &[]).is_empty());
    }

    #[test]
    fn unique_merges_same_tool() {
        let merged = unique(vec![
            ToolVersions::new("x", strings(&["1", "2"])),
            ToolVersions::new("x", strings(&["2", "3"])),
        ]);
        assert_eq!(merged, vec![ToolVersions::new("x", strings(&["1", "2", "3"]))]);
    }

    #[test]
    fn unique_keeps_first_seen_tool_order() {
        let merged = unique(vec![
            ToolVersions::new("lua", strings(&["5.4"])),
            ToolVersions::new("ruby", strings(&["3.3"])),
            ToolVersions::new("lua", strings(&["5.3", "5.4"])),
        ]);
        assert_eq!(
            merged,
            vec![
                ToolVersions::new("lua", strings(&["5.4", "5.3"])),
                ToolVersions::new("ruby", strings(&["3.3"])),
            ]
        );
    }

    #[test]
    fn unique_drops_repeats_within_one_entry() {
        let merged = unique(vec![ToolVersions::new("x", strings(&["1", "1", "2"]))]);
        assert_eq!(merged, vec![ToolVersions::new("x", strings(&["1", "2"]))]);
    }

    #[test]
    fn unique_is_case_sensitive() {
        let merged = unique(vec![
            ToolVersions::new("Lua", strings(&["1"])),
            ToolVersions::new("lua", strings(&["1"])),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn unique_keeps_tool_without_versions() {
        let merged = unique(vec![
            ToolVersions::new("x", Vec::new()),
            ToolVersions::new("x", strings(&["1"])),
        ]);
        assert_eq!(merged, vec![ToolVersions::new("x", strings(&["1"]))]);
    }
}
