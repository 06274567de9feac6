use actix_web::{web, HttpResponse};
use log::info;

use crate::errors::AppError;
use crate::models::user_activity::UserActivityDO;
use crate::service::ActivityService;
use crate::utils::validation::validate_payload;

// GET /api/userActivity/{id}
pub async fn get_user_activity_by_id(
    service: web::Data<dyn ActivityService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_activity = service.get_user_activity_by_id(*id).await?;
    Ok(HttpResponse::Ok().json(user_activity))
}

// GET /api/userActivity
pub async fn get_all_user_activities(
    service: web::Data<dyn ActivityService>,
) -> Result<HttpResponse, AppError> {
    let user_activities = service.get_all_user_activities().await?;
    Ok(HttpResponse::Ok().json(user_activities))
}

// POST /api/userActivity
pub async fn add_user_activity(
    service: web::Data<dyn ActivityService>,
    payload: web::Json<UserActivityDO>,
) -> Result<HttpResponse, AppError> {
    // Validate payload
    validate_payload(&*payload)?;

    let created = service.user_register_to_learning_activity(&payload).await?;
    info!("Registered UserActivity {}", created.id);

    // Return the created record directly
    Ok(HttpResponse::Ok().json(created))
}

// DELETE /api/userActivity/{id}
pub async fn delete_user_activity(
    service: web::Data<dyn ActivityService>,
    id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let affected = service.delete_user_activity_by_id(*id).await?;

    // Zero rows affected means the record was never there.
    if affected == 0 {
        return Err(AppError::NotFound(format!(
            "Unable to delete UserActivity: {} from database",
            id
        )));
    }

    info!("Deleted UserActivity {}", id);
    Ok(HttpResponse::Ok().body(format!("UserActivity: {} deleted from database", id)))
}
