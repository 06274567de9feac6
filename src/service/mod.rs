#[cfg(test)]
pub mod memory;
pub mod pg;

#[cfg(test)]
pub use memory::InMemoryActivityService;
pub use pg::PgActivityService;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::user_activity::{UserActivity, UserActivityDO};

// Boundary between HTTP handling and persistence. Handlers only ever see
// this trait; wiring picks the Postgres implementation at startup.
#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn get_user_activity_by_id(&self, id: i32) -> Result<UserActivity, AppError>;

    async fn get_all_user_activities(&self) -> Result<Vec<UserActivity>, AppError>;

    async fn user_register_to_learning_activity(
        &self,
        payload: &UserActivityDO,
    ) -> Result<UserActivity, AppError>;

    // Rows affected; 0 means there was nothing to delete.
    async fn delete_user_activity_by_id(&self, id: i32) -> Result<u64, AppError>;

    // False means no record with that id exists.
    async fn upload_certificate(
        &self,
        file_name: &str,
        data: Vec<u8>,
        id: i32,
    ) -> Result<bool, AppError>;

    async fn get_certificate_name_by_id(&self, id: i32) -> Result<String, AppError>;

    async fn get_certificate_by_id(&self, id: i32) -> Result<Vec<u8>, AppError>;
}

// Resolved creation payload shared by the service implementations.
pub(crate) struct NewRegistration {
    pub user_name: String,
    pub user_email: String,
    pub activity_name: String,
    pub activity_type: String,
    pub registration_date: DateTime<Utc>,
}

impl NewRegistration {
    pub fn from_payload(payload: &UserActivityDO) -> Result<Self, AppError> {
        let registration_date = match &payload.registration_date {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map_err(|_| AppError::BadRequest("Invalid registration date format".to_string()))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        Ok(NewRegistration {
            user_name: payload
                .user_name
                .clone()
                .ok_or_else(|| AppError::BadRequest("User name is required".to_string()))?,
            user_email: payload
                .user_email
                .clone()
                .ok_or_else(|| AppError::BadRequest("User email is required".to_string()))?,
            activity_name: payload
                .activity_name
                .clone()
                .ok_or_else(|| AppError::BadRequest("Activity name is required".to_string()))?,
            activity_type: payload
                .activity_type
                .clone()
                .ok_or_else(|| AppError::BadRequest("Activity type is required".to_string()))?,
            registration_date,
        })
    }
}
