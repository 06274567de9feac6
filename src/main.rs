mod errors;
mod handlers;
mod models;
mod service;
mod utils;

use actix_web::{App, HttpServer};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use sqlx::PgPool;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::service::{ActivityService, PgActivityService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Initialize the database pool; the service is a hard requirement, so
    // startup fails outright when the database is unreachable.
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to the database");

    let activity_service: Arc<dyn ActivityService> = Arc::new(PgActivityService::new(pool));
    let activity_service = actix_web::web::Data::from(activity_service);

    // Fetch the server bind address from an environment variable, default to "127.0.0.1:8080"
    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "learntrack".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .expect("Failed to create Prometheus metrics");

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .wrap(NormalizePath::trim()) // Accept both /api/userActivity and /api/userActivity/
            .app_data(activity_service.clone())
            .configure(handlers::configure)
    })
    .workers(num_cpus::get())
    .bind(&bind_address)?
    .run()
    .await
}
