use actix_web::{web, HttpResponse};
use chrono::{Duration, Local, NaiveDate};
use serde_json::json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::meal::Meal;
use crate::models::workout::Workout;

struct DayTotals {
    calories_in: i32,
    calories_out: i32,
    steps: i32,
}

const STEPS_PER_KM: f64 = 1300.0;

fn day_totals(meals: &[Meal], workouts: &[Workout]) -> DayTotals {
    let calories_in = meals.iter().map(|m| m.calories.unwrap_or(0)).sum();
    let calories_out = workouts.iter().map(|w| w.calories.unwrap_or(0)).sum();
    let steps = workouts
        .iter()
        .map(|w| (w.distance.unwrap_or(0.0) * STEPS_PER_KM).floor() as i32)
        .sum();
    DayTotals {
        calories_in,
        calories_out,
        steps,
    }
}

/// The 7 days ending at `today`, oldest first.
fn week_window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..7).rev().map(|i| today - Duration::days(i)).collect()
}

async fn meals_on(pool: &PgPool, user_id: i64, date: NaiveDate) -> Result<Vec<Meal>, AppError> {
    Ok(
        sqlx::query_as::<_, Meal>("SELECT * FROM meals WHERE user_id = $1 AND date = $2")
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await?,
    )
}

async fn workouts_on(
    pool: &PgPool,
    user_id: i64,
    date: NaiveDate,
) -> Result<Vec<Workout>, AppError> {
    Ok(
        sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE user_id = $1 AND date = $2")
            .bind(user_id)
            .bind(date)
            .fetch_all(pool)
            .await?,
    )
}

// GET /api/dashboard/{userId}/stats
pub async fn get_stats(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let meals = meals_on(&pool, *user_id, today).await?;
    let workouts = workouts_on(&pool, *user_id, today).await?;
    let totals = day_totals(&meals, &workouts);

    Ok(HttpResponse::Ok().json(json!({
        "data": {
            "date": today.to_string(),
            "steps": totals.steps,
            "caloriesIn": totals.calories_in,
            "caloriesOut": totals.calories_out,
            "netCalories": totals.calories_in - totals.calories_out,
            "workoutCount": workouts.len(),
            "mealCount": meals.len(),
        },
        "status": 200
    })))
}

// GET /api/dashboard/{userId}/weekly
pub async fn get_weekly(
    user_id: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let mut trends = Vec::with_capacity(7);
    for day in week_window(today) {
        let meals = meals_on(&pool, *user_id, day).await?;
        let workouts = workouts_on(&pool, *user_id, day).await?;
        let totals = day_totals(&meals, &workouts);
        trends.push(json!({
            "date": day.to_string(),
            "caloriesIn": totals.calories_in,
            "caloriesOut": totals.calories_out,
            "steps": totals.steps,
        }));
    }

    Ok(HttpResponse::Ok().json(json!({ "data": trends, "status": 200 })))
}
