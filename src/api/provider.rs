//! The async data-access boundary the report engine depends on.
//!
//! Resolving a dynamic child list ("districts under group X") is the only
//! asynchronous step in report generation: one request-response per
//! resolution, awaited before filtering and aggregation.

use std::collections::HashSet;

use futures::future::try_join_all;

use crate::models::{District, Group, OldGroup, Region};

use super::ApiError;

/// Cap on concurrent child-list fetches when resolving several parents.
const MAX_CONCURRENT_FETCHES: usize = 10;

/// On-demand child-list resolution, keyed by numeric parent ID. Implemented
/// by the HTTP client in production and by [`StaticProvider`] in tests and
/// the snapshot-driven CLI.
pub trait DataProvider {
    fn regions_by_state(
        &self,
        state_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Region>, ApiError>> + Send;

    fn old_groups_by_region(
        &self,
        region_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<OldGroup>, ApiError>> + Send;

    fn groups_by_old_group(
        &self,
        old_group_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Group>, ApiError>> + Send;

    fn districts_by_group(
        &self,
        group_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<District>, ApiError>> + Send;
}

/// District IDs under several groups, resolved with bounded concurrency.
/// Duplicate districts across groups collapse into the set.
pub async fn district_ids_for_groups<P: DataProvider>(
    provider: &P,
    group_ids: &[i64],
) -> Result<HashSet<i64>, ApiError> {
    let mut out = HashSet::new();
    for chunk in group_ids.chunks(MAX_CONCURRENT_FETCHES) {
        let lists = try_join_all(chunk.iter().map(|&id| provider.districts_by_group(id))).await?;
        out.extend(lists.into_iter().flatten().map(|d| d.id));
    }
    Ok(out)
}

/// In-memory provider over already-fetched lists. Child resolution uses the
/// numeric foreign key only; name-fallback matching is a form concern and
/// stays in `scope::filters`.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    pub regions: Vec<Region>,
    pub old_groups: Vec<OldGroup>,
    pub groups: Vec<Group>,
    pub districts: Vec<District>,
}

impl DataProvider for StaticProvider {
    async fn regions_by_state(&self, state_id: i64) -> Result<Vec<Region>, ApiError> {
        Ok(self
            .regions
            .iter()
            .filter(|r| r.state_id == Some(state_id))
            .cloned()
            .collect())
    }

    async fn old_groups_by_region(&self, region_id: i64) -> Result<Vec<OldGroup>, ApiError> {
        Ok(self
            .old_groups
            .iter()
            .filter(|g| g.region_id == Some(region_id))
            .cloned()
            .collect())
    }

    async fn groups_by_old_group(&self, old_group_id: i64) -> Result<Vec<Group>, ApiError> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.old_group_id == Some(old_group_id))
            .cloned()
            .collect())
    }

    async fn districts_by_group(&self, group_id: i64) -> Result<Vec<District>, ApiError> {
        Ok(self
            .districts
            .iter()
            .filter(|d| d.group_id == Some(group_id))
            .cloned()
            .collect())
    }
}
