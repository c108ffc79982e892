mod db;
mod errors;
mod handlers;
mod models;
mod utils;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use std::collections::HashMap;
use std::env;

use crate::utils::token::TokenStore;
use crate::utils::uploads::uploads_dir;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Initialize the database pool and bring the schema up to date
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::create_pool(&database_url)
        .await
        .expect("Failed to connect to the database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Uploads area, also served back at /uploads/<name>
    let uploads = uploads_dir();
    std::fs::create_dir_all(&uploads)?;

    // Session token store; volatile, rebuilt empty on restart
    let token_store = web::Data::new(TokenStore::new());

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_address);

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "smartcoach_backend".to_string());
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
            .app_data(web::Data::new(pool.clone())) // Database pool
            .app_data(token_store.clone()) // Session tokens
            .service(
                web::resource("/api/auth/register")
                    .route(web::post().to(handlers::auth::register)),
            )
            .service(
                web::resource("/api/auth/login").route(web::post().to(handlers::auth::login)),
            )
            .service(
                web::resource("/api/users/{userId}")
                    .route(web::get().to(handlers::profile::get_profile))
                    .route(web::post().to(handlers::profile::update_profile)),
            )
            .service(
                web::resource("/api/users/{userId}/uploadProfilePicture")
                    .route(web::post().to(handlers::profile::upload_profile_picture)),
            )
            .service(
                web::resource("/api/meals/{userId}")
                    .route(web::post().to(handlers::meal::log_meal))
                    .route(web::get().to(handlers::meal::get_meals)),
            )
            .service(
                web::resource("/api/meals/{userId}/{mealId}")
                    .route(web::delete().to(handlers::meal::delete_meal)),
            )
            .service(
                web::resource("/api/workouts/{userId}/upload")
                    .route(web::post().to(handlers::workout::upload_workout)),
            )
            .service(
                web::resource("/api/workouts/{userId}")
                    .route(web::get().to(handlers::workout::get_workouts)),
            )
            .service(
                web::resource("/api/workouts/{userId}/{workoutId}")
                    .route(web::get().to(handlers::workout::get_workout_by_id))
                    .route(web::delete().to(handlers::workout::delete_workout)),
            )
            .service(
                web::resource("/api/goals/{userId}")
                    .route(web::post().to(handlers::goal::create_goal))
                    .route(web::get().to(handlers::goal::get_goals)),
            )
            .service(
                web::resource("/api/goals/{userId}/{goalId}")
                    .route(web::put().to(handlers::goal::update_goal))
                    .route(web::delete().to(handlers::goal::delete_goal)),
            )
            .service(
                web::resource("/api/dashboard/{userId}/stats")
                    .route(web::get().to(handlers::dashboard::get_stats)),
            )
            .service(
                web::resource("/api/dashboard/{userId}/weekly")
                    .route(web::get().to(handlers::dashboard::get_weekly)),
            )
            .service(actix_files::Files::new("/uploads", uploads.clone()))
    })
    .workers(num_cpus::get())
    .bind(&bind_address)?
    .run()
    .await
}
