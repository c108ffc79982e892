use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::meal::Meal;
use crate::utils::validation::{coerce_int, parse_date};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    #[serde(rename = "type")]
    meal_type: Option<String>,
    date: Option<String>,
    food: Option<String>,
    calories: Option<Value>,
    protein: Option<Value>,
    carbs: Option<Value>,
    fat: Option<Value>,
}

#[derive(Deserialize)]
pub struct MealsQuery {
    date: Option<String>,
}

fn macro_or_zero(field: &str, value: Option<&Value>) -> Result<i32, AppError> {
    value.map(|v| coerce_int(field, v)).transpose().map(|v| v.unwrap_or(0))
}

// POST /api/meals/{userId}
pub async fn log_meal(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    req: web::Json<MealRequest>,
) -> Result<HttpResponse, AppError> {
    let date = match req.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let calories = macro_or_zero("calories", req.calories.as_ref())?;
    let protein = macro_or_zero("protein", req.protein.as_ref())?;
    let carbs = macro_or_zero("carbs", req.carbs.as_ref())?;
    let fat = macro_or_zero("fat", req.fat.as_ref())?;

    let meal = sqlx::query_as::<_, Meal>(
        "INSERT INTO meals (user_id, meal_type, date, food, calories, protein, carbs, fat)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(*user_id)
    .bind(&req.meal_type)
    .bind(date)
    .bind(&req.food)
    .bind(calories)
    .bind(protein)
    .bind(carbs)
    .bind(fat)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(json!({ "data": meal, "status": 201 })))
}

// GET /api/meals/{userId}?date=YYYY-MM-DD
pub async fn get_meals(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
    query: web::Query<MealsQuery>,
) -> Result<HttpResponse, AppError> {
    let meals = match query.date.as_deref() {
        Some(raw) => {
            let date = parse_date(raw)?;
            sqlx::query_as::<_, Meal>(
                "SELECT * FROM meals WHERE user_id = $1 AND date = $2 ORDER BY meal_id",
            )
            .bind(*user_id)
            .bind(date)
            .fetch_all(&**pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Meal>("SELECT * FROM meals WHERE user_id = $1 ORDER BY meal_id")
                .bind(*user_id)
                .fetch_all(&**pool)
                .await?
        }
    };

    Ok(HttpResponse::Ok().json(json!({ "data": meals, "status": 200 })))
}

// DELETE /api/meals/{userId}/{mealId}
pub async fn delete_meal(
    path: web::Path<(i64, i64)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let (user_id, meal_id) = path.into_inner();
    db::delete_owned::<Meal>(&pool, meal_id, user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "status": 200 })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_macros_default_to_zero() {
        let req: MealRequest = serde_json::from_value(json!({ "food": "toast" })).unwrap();
        assert_eq!(macro_or_zero("calories", req.calories.as_ref()).unwrap(), 0);
        assert_eq!(macro_or_zero("fat", req.fat.as_ref()).unwrap(), 0);
    }

    #[test]
    fn non_numeric_macros_fail_fast() {
        let req: MealRequest =
            serde_json::from_value(json!({ "calories": "lots" })).unwrap();
        assert!(macro_or_zero("calories", req.calories.as_ref()).is_err());
    }

    #[test]
    fn meal_type_uses_the_type_wire_name() {
        let req: MealRequest =
            serde_json::from_value(json!({ "type": "breakfast", "calories": "300" })).unwrap();
        assert_eq!(req.meal_type.as_deref(), Some("breakfast"));
        assert_eq!(macro_or_zero("calories", req.calories.as_ref()).unwrap(), 300);
    }
}
