use serde::{Deserialize, Serialize};

use crate::funds::repo_types::SavedFund;

/// Request body for saving a fund.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFundRequest {
    pub scheme_code: String,
    pub scheme_name: String,
    #[serde(default)]
    pub current_nav: Option<String>,
}

/// Request body for refreshing a cached NAV.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNavRequest {
    #[serde(default)]
    pub current_nav: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FundListResponse {
    pub success: bool,
    pub data: Vec<SavedFund>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct FundResponse {
    pub success: bool,
    pub message: String,
    pub data: SavedFund,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundCheckResponse {
    pub success: bool,
    pub is_saved: bool,
    pub data: Option<SavedFund>,
}
