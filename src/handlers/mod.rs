pub mod activity;
pub mod certificate;

use actix_web::web;

// Explicit route table, shared by main and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/userActivity")
            .route(web::get().to(activity::get_all_user_activities))
            .route(web::post().to(activity::add_user_activity)),
    )
    .service(
        web::resource("/api/userActivity/upload/{id}")
            .route(web::put().to(certificate::upload_certificate)),
    )
    .service(
        web::resource("/api/userActivity/download/{id}")
            .route(web::get().to(certificate::download_certificate)),
    )
    .service(
        web::resource("/api/userActivity/{id}")
            .route(web::get().to(activity::get_user_activity_by_id))
            .route(web::delete().to(activity::delete_user_activity)),
    );
}
