//! Sibling-list narrowing for the report form comboboxes.
//!
//! Each filter takes the parent combobox value (which may be a numeric ID
//! string or an exact display name) and a candidate list, and returns the
//! matching subset. Matching prefers numeric foreign-key equality when both
//! sides carry one and falls back to exact string equality on the
//! denormalized parent name otherwise.
//!
//! Name matching is deliberately case-sensitive: `"akwa ibom"` does not
//! match `"AKWA IBOM"`. This is the documented contract, not an oversight.
//! Empty or unresolvable selectors yield an empty result (never "all"),
//! with one exception: the state combobox with no state selected returns
//! the unfiltered list.

use tracing::debug;

use crate::models::{District, Group, OldGroup, Region, State};

/// Sentinel returned by the ID resolvers when a combobox value matches
/// neither an ID nor a display name.
pub const UNRESOLVED: i64 = 0;

/// The shared parent-resolution rule: numeric key preferred, exact
/// case-sensitive name fallback. `parent_id` of [`UNRESOLVED`] means the
/// selector never resolved to an ID, so only the name can match.
pub fn parent_matches(
    candidate_fk: Option<i64>,
    candidate_parent_name: Option<&str>,
    parent_id: i64,
    parent_name: &str,
) -> bool {
    if parent_id != UNRESOLVED {
        if let Some(fk) = candidate_fk {
            return fk == parent_id;
        }
    }
    candidate_parent_name == Some(parent_name)
}

fn resolve_id(value: &str, pairs: impl Iterator<Item = (i64, String)>) -> i64 {
    if value.is_empty() {
        return UNRESOLVED;
    }
    if let Ok(id) = value.parse::<i64>() {
        return id;
    }
    for (id, name) in pairs {
        if name == value {
            return id;
        }
    }
    UNRESOLVED
}

/// Resolve a state combobox value (numeric ID string or exact display name)
/// to a state ID. Returns [`UNRESOLVED`] when neither matches.
pub fn resolve_state_id_from_value(value: &str, states: &[State]) -> i64 {
    resolve_id(value, states.iter().map(|s| (s.id, s.name.clone())))
}

pub fn resolve_region_id_from_value(value: &str, regions: &[Region]) -> i64 {
    resolve_id(value, regions.iter().map(|r| (r.id, r.name.clone())))
}

pub fn resolve_old_group_id_from_value(value: &str, old_groups: &[OldGroup]) -> i64 {
    resolve_id(value, old_groups.iter().map(|g| (g.id, g.name.clone())))
}

pub fn resolve_group_id_from_value(value: &str, groups: &[Group]) -> i64 {
    resolve_id(value, groups.iter().map(|g| (g.id, g.name.clone())))
}

/// State combobox contents. An empty value means "no state chosen yet" and
/// returns the unfiltered list; otherwise exact ID or name match.
pub fn filter_states(value: &str, states: &[State]) -> Vec<State> {
    if value.is_empty() {
        return states.to_vec();
    }
    let id = resolve_state_id_from_value(value, states);
    states
        .iter()
        .filter(|s| s.id == id || s.name == value)
        .cloned()
        .collect()
}

/// Regions belonging to the selected state. Input order is preserved.
pub fn filter_regions_by_state(value: &str, states: &[State], regions: &[Region]) -> Vec<Region> {
    if value.is_empty() {
        return Vec::new();
    }
    let state_id = resolve_state_id_from_value(value, states);
    let out: Vec<Region> = regions
        .iter()
        .filter(|r| parent_matches(r.state_id, r.state.as_deref(), state_id, value))
        .cloned()
        .collect();
    debug!(value, state_id, matched = out.len(), "filtered regions by state");
    out
}

/// Old groups belonging to the selected region.
pub fn filter_old_groups_by_region(
    value: &str,
    regions: &[Region],
    old_groups: &[OldGroup],
) -> Vec<OldGroup> {
    if value.is_empty() {
        return Vec::new();
    }
    let region_id = resolve_region_id_from_value(value, regions);
    old_groups
        .iter()
        .filter(|g| parent_matches(g.region_id, g.region.as_deref(), region_id, value))
        .cloned()
        .collect()
}

/// Groups belonging to the selected old group.
pub fn filter_groups_by_old_group(
    value: &str,
    old_groups: &[OldGroup],
    groups: &[Group],
) -> Vec<Group> {
    if value.is_empty() {
        return Vec::new();
    }
    let old_group_id = resolve_old_group_id_from_value(value, old_groups);
    groups
        .iter()
        .filter(|g| parent_matches(g.old_group_id, g.old_group.as_deref(), old_group_id, value))
        .cloned()
        .collect()
}

/// Districts belonging to the selected group.
pub fn filter_districts_by_group(
    value: &str,
    groups: &[Group],
    districts: &[District],
) -> Vec<District> {
    if value.is_empty() {
        return Vec::new();
    }
    let group_id = resolve_group_id_from_value(value, groups);
    districts
        .iter()
        .filter(|d| parent_matches(d.group_id, d.group.as_deref(), group_id, value))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<State> {
        vec![
            State { id: 1, name: "AKWA IBOM".into() },
            State { id: 3, name: "Rivers Central".into() },
        ]
    }

    fn region(id: i64, name: &str, state_id: Option<i64>, state: Option<&str>) -> Region {
        Region {
            id,
            name: name.into(),
            state_id,
            state: state.map(|s| s.to_string()),
        }
    }

    #[test]
    fn resolve_state_id_handles_ids_names_and_misses() {
        let states = states();
        assert_eq!(resolve_state_id_from_value("3", &states), 3);
        assert_eq!(resolve_state_id_from_value("Rivers Central", &states), 3);
        assert_eq!(resolve_state_id_from_value("", &states), UNRESOLVED);
        assert_eq!(resolve_state_id_from_value("Unknown", &states), UNRESOLVED);
    }

    #[test]
    fn region_filter_is_case_sensitive() {
        let states = states();
        let regions = vec![
            region(10, "Uyo", None, Some("AKWA IBOM")),
            region(11, "Eket", None, Some("AKWA IBOM")),
        ];
        assert!(filter_regions_by_state("akwa ibom", &states, &regions).is_empty());
        let hit = filter_regions_by_state("AKWA IBOM", &states, &regions);
        assert_eq!(hit.len(), 2);
        // order preserved
        assert_eq!(hit[0].id, 10);
        assert_eq!(hit[1].id, 11);
    }

    #[test]
    fn numeric_key_wins_over_name() {
        let states = states();
        // FK says state 1 even though the denormalized name is stale
        let regions = vec![region(10, "Uyo", Some(1), Some("OLD NAME"))];
        assert_eq!(filter_regions_by_state("AKWA IBOM", &states, &regions).len(), 1);
        assert!(filter_regions_by_state("Rivers Central", &states, &regions).is_empty());
    }

    #[test]
    fn name_fallback_when_fk_missing() {
        let states = states();
        let regions = vec![region(10, "Uyo", None, Some("AKWA IBOM"))];
        assert_eq!(filter_regions_by_state("AKWA IBOM", &states, &regions).len(), 1);
    }

    #[test]
    fn empty_selector_yields_empty_result() {
        let states = states();
        let regions = vec![region(10, "Uyo", Some(1), None)];
        assert!(filter_regions_by_state("", &states, &regions).is_empty());
    }

    #[test]
    fn empty_state_value_returns_unfiltered_state_list() {
        let states = states();
        assert_eq!(filter_states("", &states).len(), 2);
        assert_eq!(filter_states("AKWA IBOM", &states).len(), 1);
        assert!(filter_states("akwa ibom", &states).is_empty());
    }

    #[test]
    fn large_dataset_filters_within_budget() {
        let states = states();
        let regions: Vec<Region> = (0..50_000)
            .map(|i| region(i, "R", Some(1 + (i % 2)), Some("AKWA IBOM")))
            .collect();

        let start = std::time::Instant::now();
        let matched = filter_regions_by_state("AKWA IBOM", &states, &regions);
        let elapsed = start.elapsed();

        assert_eq!(matched.len(), 25_000);
        assert!(elapsed.as_secs_f64() < 2.0, "took {:?}", elapsed);
    }

    #[test]
    fn large_old_group_dataset_filters_within_budget() {
        let regions = vec![region(4, "Uyo", Some(1), None)];
        let old_groups: Vec<OldGroup> = (0..50_000)
            .map(|i| OldGroup {
                id: i,
                name: "OG".into(),
                state_id: None,
                region_id: Some(4 + (i % 2)),
                state: None,
                region: Some("Uyo".into()),
            })
            .collect();

        let start = std::time::Instant::now();
        let matched = filter_old_groups_by_region("Uyo", &regions, &old_groups);
        let elapsed = start.elapsed();

        assert_eq!(matched.len(), 25_000);
        assert!(elapsed.as_secs_f64() < 2.0, "took {:?}", elapsed);
    }
}
