use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::errors::AppError;
use crate::models::goal::{Goal, GoalStatus, GoalType};
use crate::utils::validation::{coerce_float, parse_date, validate_payload};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    #[serde(rename = "type")]
    #[validate(required(message = "Missing goal type"))]
    goal_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[validate(required(message = "Missing targetValue"))]
    target_value: Option<Value>,
    #[validate(required(message = "Missing targetDate"))]
    target_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    current_value: Option<Value>,
    status: Option<String>,
}

// POST /api/goals/{userId}
pub async fn create_goal(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    req: web::Json<GoalRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*req)?;

    let raw_type = req.goal_type.as_ref().unwrap();
    let goal_type = raw_type
        .parse::<GoalType>()
        .map_err(|_| AppError::BadRequest(format!("Invalid goal type: {}", raw_type)))?;
    let target_value = coerce_float("targetValue", req.target_value.as_ref().unwrap())?;
    let target_date = parse_date(req.target_date.as_ref().unwrap())?;

    let goal = sqlx::query_as::<_, Goal>(
        "INSERT INTO goals (user_id, goal_type, title, description, target_value, current_value, target_date, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(*user_id)
    .bind(goal_type)
    .bind(&req.title)
    .bind(&req.description)
    .bind(target_value)
    .bind(0.0_f64)
    .bind(target_date)
    .bind(GoalStatus::Active)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({ "data": goal, "status": 201 })))
}

// GET /api/goals/{userId}
pub async fn get_goals(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let goals = sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE user_id = $1 ORDER BY goal_id")
        .bind(*user_id)
        .fetch_all(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": goals, "status": 200 })))
}

// PUT /api/goals/{userId}/{goalId}
pub async fn update_goal(
    path: web::Path<(i64, i64)>,
    pool: web::Data<PgPool>,
    req: web::Json<GoalUpdate>,
) -> Result<HttpResponse, AppError> {
    let (user_id, goal_id) = path.into_inner();
    let mut goal = db::fetch_owned::<Goal>(&pool, goal_id, user_id).await?;

    if let Some(current_value) = &req.current_value {
        goal.current_value = coerce_float("currentValue", current_value)?;
    }
    if let Some(raw_status) = &req.status {
        goal.status = raw_status
            .parse::<GoalStatus>()
            .map_err(|_| AppError::BadRequest(format!("Invalid goal status: {}", raw_status)))?;
    }

    sqlx::query("UPDATE goals SET current_value = $1, status = $2 WHERE goal_id = $3")
        .bind(goal.current_value)
        .bind(goal.status)
        .bind(goal.goal_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": goal, "status": 200 })))
}

// DELETE /api/goals/{userId}/{goalId}
pub async fn delete_goal(
    path: web::Path<(i64, i64)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let (user_id, goal_id) = path.into_inner();
    db::delete_owned::<Goal>(&pool, goal_id, user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "status": 200 })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_type_target_value_and_target_date() {
        let req: GoalRequest =
            serde_json::from_value(json!({ "title": "Get lighter" })).unwrap();
        assert!(validate_payload(&req).is_err());

        let req: GoalRequest = serde_json::from_value(json!({
            "type": "WEIGHT",
            "targetValue": 72.5,
            "targetDate": "2026-12-31"
        }))
        .unwrap();
        assert!(validate_payload(&req).is_ok());
        assert!(req.goal_type.unwrap().parse::<GoalType>().is_ok());
    }

    #[test]
    fn update_rejects_status_outside_the_enumeration() {
        let req: GoalUpdate =
            serde_json::from_value(json!({ "status": "ABANDONED" })).unwrap();
        assert!(req.status.unwrap().parse::<GoalStatus>().is_err());
    }

    #[test]
    fn update_accepts_numeric_string_current_value() {
        let req: GoalUpdate =
            serde_json::from_value(json!({ "currentValue": "68.2" })).unwrap();
        assert_eq!(
            coerce_float("currentValue", &req.current_value.unwrap()).unwrap(),
            68.2
        );
    }
}
