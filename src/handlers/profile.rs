use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::utils::uploads::{read_form, save_upload, uploads_dir};
use crate::utils::validation::coerce_int;

#[derive(Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    full_name: Option<String>,
    height: Option<Value>,
    weight: Option<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    user_id: i64,
    full_name: Option<String>,
    email: String,
    date_of_birth: Option<NaiveDate>,
    height: i32,
    weight: i32,
    profile_picture_url: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        ProfileResponse {
            user_id: user.user_id,
            full_name: user.full_name,
            email: user.email,
            date_of_birth: user.date_of_birth,
            height: user.height,
            weight: user.weight,
            profile_picture_url: user.profile_picture_url,
        }
    }
}

async fn fetch_user(pool: &PgPool, user_id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

// GET /api/users/{userId}
pub async fn get_profile(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let user = fetch_user(&pool, *user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": ProfileResponse::from(user) })))
}

// POST /api/users/{userId}
pub async fn update_profile(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    updates: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let mut user = fetch_user(&pool, *user_id).await?;

    if let Some(full_name) = &updates.full_name {
        user.full_name = Some(full_name.clone());
    }
    if let Some(height) = &updates.height {
        user.height = coerce_int("height", height)?;
    }
    if let Some(weight) = &updates.weight {
        user.weight = coerce_int("weight", weight)?;
    }

    sqlx::query("UPDATE users SET full_name = $1, height = $2, weight = $3 WHERE user_id = $4")
        .bind(&user.full_name)
        .bind(user.height)
        .bind(user.weight)
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": ProfileResponse::from(user) })))
}

// POST /api/users/{userId}/uploadProfilePicture
pub async fn upload_profile_picture(
    req: HttpRequest,
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    let form = read_form(&req, payload).await?;
    let file = form.file()?;

    let user = fetch_user(&pool, *user_id).await?;

    let file_name = format!("avatar_{}_{}.png", user.user_id, Uuid::new_v4());
    let url = save_upload(&uploads_dir(), &file_name, file).await?;

    sqlx::query("UPDATE users SET profile_picture_url = $1 WHERE user_id = $2")
        .bind(&url)
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": { "profilePictureUrl": url } })))
}
