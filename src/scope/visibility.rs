//! Role-based visibility resolution.
//!
//! Given the caller's role names, decides which organizational levels are
//! user-selectable and which are fixed to the caller's own assignment. A
//! level that is not pickable is auto-filled from the caller's stored
//! value and must not be overridable by the form layer.

use serde::{Deserialize, Serialize};

use crate::models::{Month, UserContext};
use crate::reports::MonthSpec;

/// Which organizational levels the caller may pick in the report form.
/// `false` means the level is fixed to the caller's own assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Visibility {
    pub show_state: bool,
    pub show_region: bool,
    pub show_old_group: bool,
    pub show_group: bool,
    pub show_district: bool,
}

impl Visibility {
    fn union(self, other: Visibility) -> Visibility {
        Visibility {
            show_state: self.show_state || other.show_state,
            show_region: self.show_region || other.show_region,
            show_old_group: self.show_old_group || other.show_old_group,
            show_group: self.show_group || other.show_group,
            show_district: self.show_district || other.show_district,
        }
    }
}

/// The resolved report scope: the organizational IDs the report covers plus
/// the time window. Consistency between parent and child IDs is the form
/// layer's responsibility; filtering uses numeric equality only.
#[derive(Debug, Clone, Default)]
pub struct ScopeSelection {
    pub state_id: Option<i64>,
    pub region_id: Option<i64>,
    pub old_group_id: Option<i64>,
    pub group_id: Option<i64>,
    pub district_id: Option<i64>,
    pub year: Option<i32>,
    pub month_spec: Option<MonthSpec>,
}

impl ScopeSelection {
    pub fn for_month(month: Month) -> Self {
        ScopeSelection {
            month_spec: Some(MonthSpec::Single(month)),
            ..Default::default()
        }
    }
}

/// Visibility granted by a single role name. Unrecognized roles grant
/// nothing pickable.
fn role_visibility(role: &str) -> Visibility {
    match role {
        "Super Admin" => Visibility {
            show_state: true,
            show_region: true,
            show_old_group: true,
            show_group: true,
            show_district: true,
        },
        "State Admin" => Visibility {
            show_state: false,
            show_region: true,
            show_old_group: true,
            show_group: true,
            show_district: true,
        },
        "Region Admin" => Visibility {
            show_old_group: true,
            show_group: true,
            show_district: true,
            ..Visibility::default()
        },
        "Old Group Admin" => Visibility {
            show_group: true,
            show_district: true,
            ..Visibility::default()
        },
        "Group Admin" => Visibility {
            show_district: true,
            ..Visibility::default()
        },
        "District Admin" => Visibility::default(),
        _ => Visibility::default(),
    }
}

/// Resolve the visibility record for a caller. A caller holding several
/// roles gets the most permissive union; a caller with no recognized role
/// gets nothing pickable. Pure function of the role names.
pub fn resolve_visibility(ctx: &UserContext) -> Visibility {
    ctx.roles
        .iter()
        .map(|r| role_visibility(r))
        .fold(Visibility::default(), Visibility::union)
}

/// Write the caller's stored assignment into every level that is not
/// pickable. Pickable levels are left untouched so the form value wins.
pub fn apply_fixed_scope(ctx: &UserContext, vis: Visibility, selection: &mut ScopeSelection) {
    if !vis.show_state {
        selection.state_id = ctx.state_id;
    }
    if !vis.show_region {
        selection.region_id = ctx.region_id;
    }
    if !vis.show_old_group {
        selection.old_group_id = ctx.old_group_id;
    }
    if !vis.show_group {
        selection.group_id = ctx.group_id;
    }
    if !vis.show_district {
        selection.district_id = ctx.district_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(roles: &[&str]) -> UserContext {
        UserContext {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            state_id: Some(1),
            region_id: Some(5),
            old_group_id: Some(9),
            group_id: Some(23),
            district_id: Some(71),
        }
    }

    #[test]
    fn super_admin_picks_everything() {
        let vis = resolve_visibility(&ctx(&["Super Admin"]));
        assert!(vis.show_state && vis.show_region && vis.show_old_group);
        assert!(vis.show_group && vis.show_district);
    }

    #[test]
    fn state_admin_has_state_fixed() {
        let vis = resolve_visibility(&ctx(&["State Admin"]));
        assert!(!vis.show_state);
        assert!(vis.show_region && vis.show_old_group && vis.show_group && vis.show_district);
    }

    #[test]
    fn group_admin_fixes_own_level_and_above() {
        let vis = resolve_visibility(&ctx(&["Group Admin"]));
        assert!(!vis.show_state && !vis.show_region && !vis.show_old_group && !vis.show_group);
        assert!(vis.show_district);
    }

    #[test]
    fn district_admin_picks_nothing() {
        assert_eq!(resolve_visibility(&ctx(&["District Admin"])), Visibility::default());
    }

    #[test]
    fn unknown_role_grants_nothing() {
        assert_eq!(resolve_visibility(&ctx(&["Janitor"])), Visibility::default());
    }

    #[test]
    fn multiple_roles_take_most_permissive_union() {
        let vis = resolve_visibility(&ctx(&["District Admin", "Region Admin"]));
        assert!(!vis.show_state && !vis.show_region);
        assert!(vis.show_old_group && vis.show_group && vis.show_district);
    }

    #[test]
    fn fixed_levels_are_auto_filled_from_the_caller() {
        let caller = ctx(&["Region Admin"]);
        let vis = resolve_visibility(&caller);
        let mut selection = ScopeSelection::default();
        selection.district_id = Some(999); // pickable, must survive
        apply_fixed_scope(&caller, vis, &mut selection);

        assert_eq!(selection.state_id, Some(1));
        assert_eq!(selection.region_id, Some(5));
        assert_eq!(selection.old_group_id, None); // pickable, not auto-filled
        assert_eq!(selection.district_id, Some(999));
    }
}
