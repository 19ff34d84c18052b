use crate::error::ApiError;
use crate::funds::dto::{SaveFundRequest, UpdateNavRequest};

/// Normalized fields of a valid save request.
#[derive(Debug)]
pub struct ValidatedSave {
    pub scheme_code: String,
    pub scheme_name: String,
    pub current_nav: Option<String>,
}

pub fn validate_save(req: SaveFundRequest) -> Result<ValidatedSave, ApiError> {
    let scheme_code = req.scheme_code.trim().to_string();
    let scheme_name = req.scheme_name.trim().to_string();
    if scheme_code.is_empty() || scheme_name.is_empty() {
        return Err(ApiError::BadRequest(
            "Scheme code and scheme name are required".into(),
        ));
    }
    let current_nav = req
        .current_nav
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    Ok(ValidatedSave {
        scheme_code,
        scheme_name,
        current_nav,
    })
}

pub fn validate_nav_update(scheme_code: &str, req: UpdateNavRequest) -> Result<String, ApiError> {
    let nav = req
        .current_nav
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    if scheme_code.trim().is_empty() || nav.is_none() {
        return Err(ApiError::BadRequest(
            "Scheme code and current NAV are required".into(),
        ));
    }
    Ok(nav.unwrap_or_default())
}

/// True when the error is the database rejecting a duplicate
/// (user_id, scheme_code) pair.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn save_req(code: &str, name: &str, nav: Option<&str>) -> SaveFundRequest {
        SaveFundRequest {
            scheme_code: code.into(),
            scheme_name: name.into(),
            current_nav: nav.map(Into::into),
        }
    }

    #[test]
    fn valid_save_passes_and_trims() {
        let v = validate_save(save_req(" 100016 ", " Test Fund ", Some("45.12"))).unwrap();
        assert_eq!(v.scheme_code, "100016");
        assert_eq!(v.scheme_name, "Test Fund");
        assert_eq!(v.current_nav.as_deref(), Some("45.12"));
    }

    #[test]
    fn save_without_nav_is_valid() {
        let v = validate_save(save_req("100016", "Test Fund", None)).unwrap();
        assert!(v.current_nav.is_none());
    }

    #[test]
    fn empty_scheme_code_is_rejected() {
        let err = validate_save(save_req("  ", "Test Fund", None)).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Scheme code and scheme name are required");
    }

    #[test]
    fn empty_scheme_name_is_rejected() {
        assert!(validate_save(save_req("100016", "", None)).is_err());
    }

    #[test]
    fn blank_nav_is_treated_as_absent() {
        let v = validate_save(save_req("100016", "Test Fund", Some("   "))).unwrap();
        assert!(v.current_nav.is_none());
    }

    #[test]
    fn nav_update_requires_nav() {
        let err = validate_nav_update(
            "100016",
            UpdateNavRequest { current_nav: None },
        )
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Scheme code and current NAV are required");
    }

    #[test]
    fn nav_update_accepts_value() {
        let nav = validate_nav_update(
            "100016",
            UpdateNavRequest {
                current_nav: Some(" 46.01 ".into()),
            },
        )
        .unwrap();
        assert_eq!(nav, "46.01");
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
