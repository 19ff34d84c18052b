use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One user's tracking subscription to one fund. The database enforces a
/// unique (user_id, scheme_code) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedFund {
    pub id: Uuid,
    pub user_id: Uuid,
    pub scheme_code: String,        // external fund identifier, opaque
    pub scheme_name: String,        // display string
    pub current_nav: Option<String>, // last known NAV, as the fund API supplies it
    pub saved_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
