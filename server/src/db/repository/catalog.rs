//! Catalog Repository — categories and menu items

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, Item, ItemCreate, ItemUpdate, MenuSection};
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, restaurant_id, category_id, name, description, price, created_at FROM item";

// ========== Categories ==========

pub async fn find_categories(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, restaurant_id, name, sort_order FROM category WHERE restaurant_id = ? ORDER BY sort_order, name",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_category_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, restaurant_id, name, sort_order FROM category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create_category(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: CategoryCreate,
) -> RepoResult<Category> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO category (id, restaurant_id, name, sort_order) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(restaurant_id)
        .bind(&data.name)
        .bind(data.sort_order.unwrap_or(0))
        .execute(pool)
        .await?;
    find_category_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

// ========== Items ==========

pub async fn find_item_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Item>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create_item(
    pool: &SqlitePool,
    restaurant_id: i64,
    data: ItemCreate,
) -> RepoResult<Item> {
    // The category must belong to the same restaurant.
    let category = find_category_by_id(pool, data.category_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", data.category_id)))?;
    if category.restaurant_id != restaurant_id {
        return Err(RepoError::Validation(
            "Category belongs to a different restaurant".into(),
        ));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO item (id, restaurant_id, category_id, name, description, price, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(restaurant_id)
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(now)
    .execute(pool)
    .await?;

    find_item_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create item".into()))
}

pub async fn update_item(pool: &SqlitePool, id: i64, data: ItemUpdate) -> RepoResult<Item> {
    let rows = sqlx::query(
        "UPDATE item SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), description = COALESCE(?3, description), price = COALESCE(?4, price) WHERE id = ?5",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }
    find_item_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
}

pub async fn delete_item(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Full menu of a restaurant: every category with its items.
pub async fn find_menu(pool: &SqlitePool, restaurant_id: i64) -> RepoResult<Vec<MenuSection>> {
    let categories = find_categories(pool, restaurant_id).await?;
    let sql = format!("{ITEM_SELECT} WHERE restaurant_id = ? ORDER BY name");
    let items = sqlx::query_as::<_, Item>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await?;

    let sections = categories
        .into_iter()
        .map(|category| {
            let items = items
                .iter()
                .filter(|i| i.category_id == category.id)
                .cloned()
                .collect();
            MenuSection { category, items }
        })
        .collect();
    Ok(sections)
}
