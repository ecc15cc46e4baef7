//! Scope resolution: who may see which organizational levels, and how
//! sibling lists are narrowed for the report form.
//!
//! - `visibility`: role names → pickable levels, plus auto-fill of fixed
//!   levels from the caller's own assignment
//! - `filters`: combobox narrowing with the numeric-key-preferred,
//!   case-sensitive-name-fallback parent rule

pub mod filters;
pub mod visibility;

pub use filters::{
    filter_districts_by_group, filter_groups_by_old_group, filter_old_groups_by_region,
    filter_regions_by_state, filter_states, parent_matches, resolve_group_id_from_value,
    resolve_old_group_id_from_value, resolve_region_id_from_value, resolve_state_id_from_value,
    UNRESOLVED,
};
pub use visibility::{apply_fixed_scope, resolve_visibility, ScopeSelection, Visibility};
