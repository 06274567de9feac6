use serde::{Deserialize, Serialize};
use chrono::Utc;
use validator::Validate;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub activity_name: String,
    pub activity_type: String,
    pub registration_date: chrono::DateTime<Utc>,
    pub certificate_name: Option<String>,
}

// Creation payload: same shape as UserActivity minus the server-assigned
// id and the stored certificate.
#[derive(Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityDO {
    #[validate(required(message = "User name is required"))]
    #[validate(length(min = 1, max = 120, message = "User name must be between 1 and 120 characters"))]
    pub user_name: Option<String>,

    #[validate(required(message = "User email is required"))]
    #[validate(email(message = "Invalid email format"))]
    pub user_email: Option<String>,

    #[validate(required(message = "Activity name is required"))]
    #[validate(length(min = 1, max = 200, message = "Activity name must be between 1 and 200 characters"))]
    pub activity_name: Option<String>,

    #[validate(required(message = "Activity type is required"))]
    #[validate(length(min = 1, message = "Activity type cannot be empty"))]
    pub activity_type: Option<String>,

    // RFC 3339; defaults to the time of registration when omitted
    pub registration_date: Option<String>,
}
