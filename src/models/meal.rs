use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub meal_id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub meal_type: Option<String>,
    pub date: NaiveDate,
    pub food: Option<String>,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
}
