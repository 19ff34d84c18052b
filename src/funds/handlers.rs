use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::services::AuthUser,
    error::ApiError,
    funds::{
        dto::{FundCheckResponse, FundListResponse, FundResponse, SaveFundRequest, UpdateNavRequest},
        repo_types::SavedFund,
        services::{is_unique_violation, validate_nav_update, validate_save},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/saved-funds", get(list_funds))
        .route("/saved-funds", post(save_fund))
        .route("/saved-funds/check/:scheme_code", get(check_fund))
        .route("/saved-funds/:scheme_code", delete(remove_fund))
        .route("/saved-funds/:scheme_code/nav", patch(update_fund_nav))
}

#[instrument(skip(state))]
pub async fn list_funds(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FundListResponse>, ApiError> {
    let funds = SavedFund::list_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list saved funds failed");
            ApiError::Internal("Failed to fetch saved funds".into())
        })?;

    let count = funds.len();
    Ok(Json(FundListResponse {
        success: true,
        data: funds,
        count,
    }))
}

#[instrument(skip(state, payload))]
pub async fn save_fund(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SaveFundRequest>,
) -> Result<(StatusCode, Json<FundResponse>), ApiError> {
    let req = validate_save(payload)?;

    // Advisory pre-check for the common case; the unique index settles races.
    match SavedFund::find(&state.db, user_id, &req.scheme_code).await {
        Ok(Some(_)) => {
            warn!(%user_id, scheme_code = %req.scheme_code, "fund already saved");
            return Err(ApiError::Conflict("Fund is already saved".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, %user_id, "saved fund lookup failed");
            return Err(ApiError::Internal("Failed to save fund".into()));
        }
    }

    let fund = SavedFund::insert(
        &state.db,
        user_id,
        &req.scheme_code,
        &req.scheme_name,
        req.current_nav.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            // Lost the race past the pre-check; same outcome as a duplicate.
            warn!(%user_id, scheme_code = %req.scheme_code, "duplicate save lost insert race");
            ApiError::Conflict("Fund is already saved".into())
        } else {
            error!(error = %e, %user_id, "insert saved fund failed");
            ApiError::Internal("Failed to save fund".into())
        }
    })?;

    info!(%user_id, scheme_code = %fund.scheme_code, "fund saved");
    Ok((
        StatusCode::CREATED,
        Json(FundResponse {
            success: true,
            message: "Fund saved successfully".into(),
            data: fund,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn check_fund(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(scheme_code): Path<String>,
) -> Result<Json<FundCheckResponse>, ApiError> {
    if scheme_code.trim().is_empty() {
        return Err(ApiError::BadRequest("Scheme code is required".into()));
    }

    let fund = SavedFund::find(&state.db, user_id, scheme_code.trim())
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %scheme_code, "check saved fund failed");
            ApiError::Internal("Failed to check fund status".into())
        })?;

    Ok(Json(FundCheckResponse {
        success: true,
        is_saved: fund.is_some(),
        data: fund,
    }))
}

#[instrument(skip(state))]
pub async fn remove_fund(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(scheme_code): Path<String>,
) -> Result<Json<FundResponse>, ApiError> {
    if scheme_code.trim().is_empty() {
        return Err(ApiError::BadRequest("Scheme code is required".into()));
    }

    let deleted = SavedFund::delete(&state.db, user_id, scheme_code.trim())
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %scheme_code, "delete saved fund failed");
            ApiError::Internal("Failed to remove fund".into())
        })?
        .ok_or_else(|| {
            warn!(%user_id, %scheme_code, "remove on missing saved fund");
            ApiError::NotFound("Saved fund not found".into())
        })?;

    info!(%user_id, scheme_code = %deleted.scheme_code, "fund removed");
    Ok(Json(FundResponse {
        success: true,
        message: "Fund removed successfully".into(),
        data: deleted,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_fund_nav(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(scheme_code): Path<String>,
    Json(payload): Json<UpdateNavRequest>,
) -> Result<Json<FundResponse>, ApiError> {
    let nav = validate_nav_update(&scheme_code, payload)?;

    let updated = SavedFund::update_nav(&state.db, user_id, scheme_code.trim(), &nav)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %scheme_code, "update fund nav failed");
            ApiError::Internal("Failed to update fund NAV".into())
        })?
        .ok_or_else(|| {
            warn!(%user_id, %scheme_code, "nav update on missing saved fund");
            ApiError::NotFound("Saved fund not found".into())
        })?;

    info!(%user_id, scheme_code = %updated.scheme_code, nav = %nav, "fund nav updated");
    Ok(Json(FundResponse {
        success: true,
        message: "Fund NAV updated successfully".into(),
        data: updated,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn fund(code: &str) -> SavedFund {
        SavedFund {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            scheme_code: code.into(),
            scheme_name: "Test Fund".into(),
            current_nav: Some("45.12".into()),
            saved_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn list_response_counts_rows() {
        let response = FundListResponse {
            success: true,
            count: 2,
            data: vec![fund("100016"), fund("100017")],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["schemeCode"], "100016");
    }

    #[test]
    fn fund_response_envelope() {
        let response = FundResponse {
            success: true,
            message: "Fund saved successfully".into(),
            data: fund("100016"),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Fund saved successfully");
        assert_eq!(json["data"]["schemeCode"], "100016");
    }
}
