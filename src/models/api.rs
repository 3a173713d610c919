use crate::analytics::stats::{ChannelStats, TeamPage};
use crate::filters::lead_filter::{FilterGroup, FilterOption};
use crate::models::lead::Lead;
use crate::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct RoleRequest {
    pub role: UserRole,
}

/// `GET /leads?location=india,uk&score=ge70`
#[derive(Deserialize, Default)]
pub struct LeadListQuery {
    pub location: Option<String>,
    pub score: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UserListQuery {
    #[serde(default)]
    pub active: bool,
}

#[derive(Deserialize, Default)]
pub struct AnalyticsQuery {
    pub page: Option<usize>,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Header data: who is logged in and the organization balance
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub current_user: User,
    pub org_name: String,
    pub credits: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadListResponse {
    pub leads: Vec<Lead>,
    pub applied_filters: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    pub lead: Lead,
    pub credits: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub recepto_net: ChannelStats,
    pub org_network: ChannelStats,
    pub team: TeamPage,
}

/// One filter option and the group it belongs to
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionResponse {
    #[serde(flatten)]
    pub option: FilterOption,
    pub group: FilterGroup,
}
