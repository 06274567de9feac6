use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user_activity::{UserActivity, UserActivityDO};
use crate::service::{ActivityService, NewRegistration};

const RECORD_COLUMNS: &str =
    "id, user_name, user_email, activity_name, activity_type, registration_date, certificate_name";

pub struct PgActivityService {
    pool: PgPool,
}

impl PgActivityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityService for PgActivityService {
    async fn get_user_activity_by_id(&self, id: i32) -> Result<UserActivity, AppError> {
        let query = format!("SELECT {} FROM user_activity WHERE id = $1", RECORD_COLUMNS);
        sqlx::query_as::<_, UserActivity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))
    }

    async fn get_all_user_activities(&self) -> Result<Vec<UserActivity>, AppError> {
        let query = format!("SELECT {} FROM user_activity ORDER BY id", RECORD_COLUMNS);
        sqlx::query_as::<_, UserActivity>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))
    }

    async fn user_register_to_learning_activity(
        &self,
        payload: &UserActivityDO,
    ) -> Result<UserActivity, AppError> {
        let registration = NewRegistration::from_payload(payload)?;

        // The unique index on (user_email, activity_name) turns a duplicate
        // registration into zero returned rows.
        let query = format!(
            "INSERT INTO user_activity \
                 (user_name, user_email, activity_name, activity_type, registration_date) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_email, activity_name) DO NOTHING \
             RETURNING {}",
            RECORD_COLUMNS
        );
        sqlx::query_as::<_, UserActivity>(&query)
            .bind(&registration.user_name)
            .bind(&registration.user_email)
            .bind(&registration.activity_name)
            .bind(&registration.activity_type)
            .bind(registration.registration_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "User {} is already registered to activity {}",
                    registration.user_email, registration.activity_name
                ))
            })
    }

    async fn delete_user_activity_by_id(&self, id: i32) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM user_activity WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?;
        Ok(result.rows_affected())
    }

    async fn upload_certificate(
        &self,
        file_name: &str,
        data: Vec<u8>,
        id: i32,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE user_activity SET certificate_name = $1, certificate = $2 WHERE id = $3")
                .bind(file_name)
                .bind(data)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_certificate_name_by_id(&self, id: i32) -> Result<String, AppError> {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT certificate_name FROM user_activity WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))?
        .ok_or_else(|| {
            AppError::NotFound(format!("No certificate uploaded for UserActivity: {}", id))
        })
    }

    async fn get_certificate_by_id(&self, id: i32) -> Result<Vec<u8>, AppError> {
        sqlx::query_scalar::<_, Option<Vec<u8>>>(
            "SELECT certificate FROM user_activity WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Database error: {}", e)))?
        .ok_or_else(|| AppError::NotFound(format!("UserActivity: {} not found", id)))?
        .ok_or_else(|| {
            AppError::NotFound(format!("No certificate uploaded for UserActivity: {}", id))
        })
    }
}
