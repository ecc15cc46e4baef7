//! Organizational unit models.
//!
//! The hierarchy is state → region → old group → group → district. Upstream
//! feeds are inconsistent about parent linkage: some carry the numeric
//! foreign key, some only a denormalized parent name string, some both.
//! Consumers resolve parents through [`crate::scope::parent_matches`] so
//! the "numeric key preferred, exact name fallback" rule lives in one place.

// Allow dead code: feed structs carry fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
    #[serde(rename = "stateId")]
    pub state_id: Option<i64>,
    /// Denormalized state name, present in some feeds.
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OldGroup {
    pub id: i64,
    pub name: String,
    #[serde(rename = "stateId")]
    pub state_id: Option<i64>,
    #[serde(rename = "regionId")]
    pub region_id: Option<i64>,
    pub state: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(rename = "regionId")]
    pub region_id: Option<i64>,
    #[serde(rename = "oldGroupId")]
    pub old_group_id: Option<i64>,
    #[serde(rename = "districtId")]
    pub district_id: Option<i64>,
    pub region: Option<String>,
    #[serde(rename = "oldGroup")]
    pub old_group: Option<String>,
    /// YHSF roster counts, used by the youth monthly report.
    #[serde(rename = "yhsfMales", default)]
    pub yhsf_males: i64,
    #[serde(rename = "yhsfFemales", default)]
    pub yhsf_females: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    #[serde(rename = "groupId")]
    pub group_id: Option<i64>,
    pub group: Option<String>,
}
