use crate::funds::repo_types::SavedFund;
use sqlx::PgPool;
use uuid::Uuid;

impl SavedFund {
    /// All saved funds for a user, most recently saved first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<SavedFund>> {
        sqlx::query_as::<_, SavedFund>(
            r#"
            SELECT id, user_id, scheme_code, scheme_name, current_nav, saved_at, updated_at
            FROM saved_funds
            WHERE user_id = $1
            ORDER BY saved_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        scheme_code: &str,
    ) -> sqlx::Result<Option<SavedFund>> {
        sqlx::query_as::<_, SavedFund>(
            r#"
            SELECT id, user_id, scheme_code, scheme_name, current_nav, saved_at, updated_at
            FROM saved_funds
            WHERE user_id = $1 AND scheme_code = $2
            "#,
        )
        .bind(user_id)
        .bind(scheme_code)
        .fetch_optional(db)
        .await
    }

    /// Insert a new saved fund. The unique (user_id, scheme_code) index is
    /// the final arbiter against concurrent duplicate saves; callers must
    /// map a unique-violation error to the duplicate outcome.
    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        scheme_code: &str,
        scheme_name: &str,
        current_nav: Option<&str>,
    ) -> sqlx::Result<SavedFund> {
        sqlx::query_as::<_, SavedFund>(
            r#"
            INSERT INTO saved_funds (user_id, scheme_code, scheme_name, current_nav)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, scheme_code, scheme_name, current_nav, saved_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(scheme_code)
        .bind(scheme_name)
        .bind(current_nav)
        .fetch_one(db)
        .await
    }

    /// Delete the matching row, returning it if it existed.
    pub async fn delete(
        db: &PgPool,
        user_id: Uuid,
        scheme_code: &str,
    ) -> sqlx::Result<Option<SavedFund>> {
        sqlx::query_as::<_, SavedFund>(
            r#"
            DELETE FROM saved_funds
            WHERE user_id = $1 AND scheme_code = $2
            RETURNING id, user_id, scheme_code, scheme_name, current_nav, saved_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(scheme_code)
        .fetch_optional(db)
        .await
    }

    /// Update only current_nav and updated_at on the matching row.
    pub async fn update_nav(
        db: &PgPool,
        user_id: Uuid,
        scheme_code: &str,
        current_nav: &str,
    ) -> sqlx::Result<Option<SavedFund>> {
        sqlx::query_as::<_, SavedFund>(
            r#"
            UPDATE saved_funds
            SET current_nav = $3, updated_at = now()
            WHERE user_id = $1 AND scheme_code = $2
            RETURNING id, user_id, scheme_code, scheme_name, current_nav, saved_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(scheme_code)
        .bind(current_nav)
        .fetch_optional(db)
        .await
    }
}
