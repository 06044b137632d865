//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT id, user_id, name, address, city, description, balance, is_open, rating, display_order, created_at FROM restaurant";

/// List restaurants in admin-controlled presentation order, optionally
/// filtered by city.
pub async fn find_all(pool: &SqlitePool, city: Option<&str>) -> RepoResult<Vec<Restaurant>> {
    let rows = match city {
        Some(city) => {
            let sql = format!("{RESTAURANT_SELECT} WHERE city = ? ORDER BY display_order, name");
            sqlx::query_as::<_, Restaurant>(&sql)
                .bind(city)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{RESTAURANT_SELECT} ORDER BY display_order, name");
            sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await?
        }
    };
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Restaurant owned by a user (1:1).
pub async fn find_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE user_id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    data: RestaurantCreate,
) -> RepoResult<Restaurant> {
    if find_by_user_id(pool, user_id).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "User {user_id} already owns a restaurant"
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO restaurant (id, user_id, name, address, city, description, balance, is_open, rating, display_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 0, 0, 0, ?7)",
    )
    .bind(id)
    .bind(user_id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: RestaurantUpdate,
) -> RepoResult<Restaurant> {
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), address = COALESCE(?2, address), city = COALESCE(?3, city), description = COALESCE(?4, description), is_open = COALESCE(?5, is_open) WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.description)
    .bind(data.is_open)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Toggle order acceptance.
pub async fn set_open(pool: &SqlitePool, id: i64, is_open: bool) -> RepoResult<Restaurant> {
    let rows = sqlx::query("UPDATE restaurant SET is_open = ? WHERE id = ?")
        .bind(is_open)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Admin-controlled presentation order.
pub async fn set_display_order(
    pool: &SqlitePool,
    id: i64,
    display_order: i64,
) -> RepoResult<Restaurant> {
    let rows = sqlx::query("UPDATE restaurant SET display_order = ? WHERE id = ?")
        .bind(display_order)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}
