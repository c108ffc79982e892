use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::{goal::Goal, meal::Meal, workout::Workout};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// A record addressed by its own id plus the owning user's id. Every
/// id-addressed read and delete goes through [`fetch_owned`] or
/// [`delete_owned`], so a record owned by a different user is
/// indistinguishable from a missing one.
pub trait Owned: for<'r> FromRow<'r, PgRow> + Unpin + Send {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    /// Display name used in "{noun} not found" errors.
    const NOUN: &'static str;
}

impl Owned for Meal {
    const TABLE: &'static str = "meals";
    const ID_COLUMN: &'static str = "meal_id";
    const NOUN: &'static str = "Meal";
}

impl Owned for Workout {
    const TABLE: &'static str = "workouts";
    const ID_COLUMN: &'static str = "workout_id";
    const NOUN: &'static str = "Workout";
}

impl Owned for Goal {
    const TABLE: &'static str = "goals";
    const ID_COLUMN: &'static str = "goal_id";
    const NOUN: &'static str = "Goal";
}

pub async fn fetch_owned<T: Owned>(pool: &PgPool, id: i64, user_id: i64) -> Result<T, AppError> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = $1 AND user_id = $2",
        T::TABLE,
        T::ID_COLUMN
    );
    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", T::NOUN)))
}

pub async fn delete_owned<T: Owned>(pool: &PgPool, id: i64, user_id: i64) -> Result<(), AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = $1 AND user_id = $2",
        T::TABLE,
        T::ID_COLUMN
    );
    let result = sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} not found", T::NOUN)));
    }
    Ok(())
}
