use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Weight,
    CaloriesBurn,
    CaloriesIntake,
    WorkoutFrequency,
    Distance,
}

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

pub struct UnknownValue;

impl FromStr for GoalType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEIGHT" => Ok(GoalType::Weight),
            "CALORIES_BURN" => Ok(GoalType::CaloriesBurn),
            "CALORIES_INTAKE" => Ok(GoalType::CaloriesIntake),
            "WORKOUT_FREQUENCY" => Ok(GoalType::WorkoutFrequency),
            "DISTANCE" => Ok(GoalType::Distance),
            _ => Err(UnknownValue),
        }
    }
}

impl FromStr for GoalStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(GoalStatus::Active),
            "COMPLETED" => Ok(GoalStatus::Completed),
            "PAUSED" => Ok(GoalStatus::Paused),
            _ => Err(UnknownValue),
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub goal_id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub target_date: NaiveDate,
    pub status: GoalStatus,
}
