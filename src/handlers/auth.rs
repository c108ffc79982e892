use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::models::user::{UserCredentials, UserSummary, DEFAULT_PICTURE_URL};
use crate::utils::token::TokenStore;
use crate::utils::validation::{coerce_int, parse_date, validate_payload};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(required(message = "Missing email"))]
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    date_of_birth: Option<String>,
    height: Option<Value>,
    weight: Option<Value>,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Missing credentials"))]
    email: Option<String>,
    #[validate(required(message = "Missing credentials"))]
    password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    token: String,
    user_id: i64,
    user: UserSummary,
}

// POST /api/auth/register
pub async fn register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenStore>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let email = req.email.as_ref().unwrap();

    let existing = sqlx::query_scalar::<_, i64>("SELECT user_id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&**pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let date_of_birth = req
        .date_of_birth
        .as_deref()
        .map(parse_date)
        .transpose()?;
    let height = req
        .height
        .as_ref()
        .map(|v| coerce_int("height", v))
        .transpose()?
        .unwrap_or(0);
    let weight = req
        .weight
        .as_ref()
        .map(|v| coerce_int("weight", v))
        .transpose()?
        .unwrap_or(0);

    let user_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (full_name, email, password, date_of_birth, height, weight, profile_picture_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING user_id",
    )
    .bind(&req.full_name)
    .bind(email)
    .bind(&req.password)
    .bind(date_of_birth)
    .bind(height)
    .bind(weight)
    .bind(DEFAULT_PICTURE_URL)
    .fetch_one(&**pool)
    .await?;

    let token = tokens.create_token(user_id);

    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/users/{}", user_id)))
        .json(AuthResponse {
            token,
            user_id,
            user: UserSummary {
                user_id,
                full_name: req.full_name.clone(),
                email: email.clone(),
            },
        }))
}

// POST /api/auth/login
pub async fn login(
    req: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenStore>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;
    let email = req.email.as_ref().unwrap();
    let password = req.password.as_ref().unwrap();

    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT user_id, full_name, email, password FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Plaintext comparison, matching the stored form.
    if user.password.as_deref() != Some(password.as_str()) {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = tokens.create_token(user.user_id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.user_id,
        user: UserSummary {
            user_id: user.user_id,
            full_name: user.full_name,
            email: user.email,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_email() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Jane", "password": "pw"
        }))
        .unwrap();
        assert!(matches!(
            validate_payload(&req),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn login_requires_both_credentials() {
        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({"email": "a@b.c"})).unwrap();
        assert!(validate_payload(&req).is_err());

        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({"password": "pw"})).unwrap();
        assert!(validate_payload(&req).is_err());

        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({"email": "a@b.c", "password": "pw"}))
                .unwrap();
        assert!(validate_payload(&req).is_ok());
    }

    #[test]
    fn auth_response_uses_camel_case_wire_names() {
        let body = serde_json::to_value(AuthResponse {
            token: "t".into(),
            user_id: 3,
            user: UserSummary {
                user_id: 3,
                full_name: Some("Jane Doe".into()),
                email: "jane@example.com".into(),
            },
        })
        .unwrap();
        assert_eq!(body["userId"], 3);
        assert_eq!(body["user"]["fullName"], "Jane Doe");
        assert_eq!(body["user"]["email"], "jane@example.com");
    }
}
