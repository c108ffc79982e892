use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PICTURE_URL: &str = "/uploads/default.png";

#[derive(sqlx::FromRow, Debug)]
pub struct User {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub email: String,
    pub password: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height: i32,
    pub weight: i32,
    pub profile_picture_url: String,
}

/// Narrow row for the login lookup.
#[derive(sqlx::FromRow, Debug)]
pub struct UserCredentials {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub email: String,
    pub password: Option<String>,
}

/// The `user` object embedded in auth responses.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub email: String,
}
