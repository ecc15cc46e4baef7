//! Caller context for role-gated report generation.
//!
//! The surrounding application owns authentication and sessions; the core
//! receives the caller's roles and scope assignment as an explicit value so
//! visibility resolution and auto-fill are testable without a UI harness.

use serde::{Deserialize, Serialize};

/// The caller's identity as the report engine sees it: role names plus the
/// organizational assignment recorded against their account. A caller may
/// hold more than one role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    pub roles: Vec<String>,
    #[serde(rename = "stateId")]
    pub state_id: Option<i64>,
    #[serde(rename = "regionId")]
    pub region_id: Option<i64>,
    #[serde(rename = "oldGroupId")]
    pub old_group_id: Option<i64>,
    #[serde(rename = "groupId")]
    pub group_id: Option<i64>,
    #[serde(rename = "districtId")]
    pub district_id: Option<i64>,
}

impl UserContext {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
