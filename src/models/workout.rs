use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Telemetry fields are nullable: rows are synthesized on upload today but
// the rollups must treat missing values as zero.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub workout_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub distance: Option<f64>,
    pub avg_heart_rate: Option<i32>,
    pub calories: Option<i32>,
    pub location: Option<String>,
    pub weather_temp: Option<i32>,
    pub weather_humidity: Option<i32>,
}
