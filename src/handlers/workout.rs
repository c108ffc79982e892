use actix_web::{web, HttpRequest, HttpResponse};
use rand::Rng;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::workout::Workout;
use crate::utils::uploads::{read_form, save_upload, uploads_dir};
use crate::utils::validation::parse_date;

struct Telemetry {
    distance: f64,
    avg_heart_rate: i32,
    calories: i32,
    weather_temp: i32,
    weather_humidity: i32,
}

// Placeholder telemetry: values are drawn from fixed ranges instead of being
// parsed out of the uploaded file. Distance is rounded to 2 decimals.
fn synthesize_telemetry() -> Telemetry {
    let mut rng = rand::thread_rng();
    Telemetry {
        distance: (rng.gen_range(2.0_f64..=12.0) * 100.0).round() / 100.0,
        avg_heart_rate: rng.gen_range(120..=170),
        calories: rng.gen_range(200..=400),
        weather_temp: rng.gen_range(10..=25),
        weather_humidity: rng.gen_range(50..=80),
    }
}

// POST /api/workouts/{userId}/upload
pub async fn upload_workout(
    req: HttpRequest,
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    let form = read_form(&req, payload).await?;
    let file = form.file()?;

    let (date, location) = match (form.field("date"), form.field("location")) {
        (Some(date), Some(location)) => (parse_date(date)?, location.to_string()),
        _ => return Err(AppError::BadRequest("Missing date or location".to_string())),
    };

    let telemetry = synthesize_telemetry();

    // The file is kept purely for storage; its content is never parsed.
    let file_name = format!("workout_{}_{}.upload", *user_id, Uuid::new_v4());
    save_upload(&uploads_dir(), &file_name, file).await?;

    let workout = sqlx::query_as::<_, Workout>(
        "INSERT INTO workouts (user_id, date, distance, avg_heart_rate, calories, location, weather_temp, weather_humidity)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(*user_id)
    .bind(date)
    .bind(telemetry.distance)
    .bind(telemetry.avg_heart_rate)
    .bind(telemetry.calories)
    .bind(&location)
    .bind(telemetry.weather_temp)
    .bind(telemetry.weather_humidity)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({ "data": workout, "status": 201 })))
}

// GET /api/workouts/{userId}
pub async fn get_workouts(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let workouts =
        sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE user_id = $1 ORDER BY workout_id")
            .bind(*user_id)
            .fetch_all(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": workouts, "status": 200 })))
}

// GET /api/workouts/{userId}/{workoutId}
pub async fn get_workout_by_id(
    path: web::Path<(i64, i64)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let (user_id, workout_id) = path.into_inner();
    let workout = db::fetch_owned::<Workout>(&pool, workout_id, user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": workout, "status": 200 })))
}

// DELETE /api/workouts/{userId}/{workoutId}
pub async fn delete_workout(
    path: web::Path<(i64, i64)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let (user_id, workout_id) = path.into_inner();
    db::delete_owned::<Workout>(&pool, workout_id, user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "status": 200 })))
}
