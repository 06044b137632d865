//! Shared test harness: a migrated tempfile database with seeded accounts.

use server::core::{Config, ServerState};
use server::db::DbService;
use server::db::repository;
use shared::models::{
    CategoryCreate, Item, ItemCreate, Restaurant, RestaurantCreate, User, UserCreate, UserRole,
};
use tempfile::TempDir;

pub struct TestApp {
    pub state: ServerState,
    // Keeps the database directory alive for the test's duration.
    _dir: TempDir,
}

pub async fn spawn() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("open test database");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    TestApp {
        state: ServerState::with_db(config, db),
        _dir: dir,
    }
}

/// Customer with `funds` already topped up.
pub async fn seed_customer(app: &TestApp, email: &str, funds: f64) -> User {
    let user = repository::user::create(
        &app.state.db.pool,
        UserCreate {
            email: email.to_string(),
            password_hash: "test-hash".to_string(),
            role: UserRole::Customer,
            first_name: "Test".to_string(),
            last_name: "Customer".to_string(),
            location: "Duisburg".to_string(),
            postal_code: "47051".to_string(),
        },
    )
    .await
    .expect("create customer");

    if funds > 0.0 {
        app.state
            .settlement
            .topup(&user, funds)
            .await
            .expect("top up customer");
    }

    repository::user::find_by_id(&app.state.db.pool, user.id)
        .await
        .unwrap()
        .unwrap()
}

/// Open restaurant with one category and two items (10.00 and 5.00).
pub async fn seed_restaurant(app: &TestApp, email: &str) -> (User, Restaurant, Item, Item) {
    let owner = repository::user::create(
        &app.state.db.pool,
        UserCreate {
            email: email.to_string(),
            password_hash: "test-hash".to_string(),
            role: UserRole::Restaurant,
            first_name: "Test".to_string(),
            last_name: "Owner".to_string(),
            location: "Duisburg".to_string(),
            postal_code: "47051".to_string(),
        },
    )
    .await
    .expect("create owner");

    let restaurant = repository::restaurant::create(
        &app.state.db.pool,
        owner.id,
        RestaurantCreate {
            name: format!("Restaurant of {email}"),
            address: "Sonnenwall 1".to_string(),
            city: "Duisburg".to_string(),
            description: None,
        },
    )
    .await
    .expect("create restaurant");
    let restaurant = repository::restaurant::set_open(&app.state.db.pool, restaurant.id, true)
        .await
        .expect("open restaurant");

    let category = repository::catalog::create_category(
        &app.state.db.pool,
        restaurant.id,
        CategoryCreate {
            name: "Mains".to_string(),
            sort_order: None,
        },
    )
    .await
    .expect("create category");

    let item_a = repository::catalog::create_item(
        &app.state.db.pool,
        restaurant.id,
        ItemCreate {
            category_id: category.id,
            name: "Pizza Margherita".to_string(),
            description: None,
            price: 10.0,
        },
    )
    .await
    .expect("create item a");
    let item_b = repository::catalog::create_item(
        &app.state.db.pool,
        restaurant.id,
        ItemCreate {
            category_id: category.id,
            name: "Cola".to_string(),
            description: None,
            price: 5.0,
        },
    )
    .await
    .expect("create item b");

    (owner, restaurant, item_a, item_b)
}

/// Reload a user's balance.
pub async fn user_balance(app: &TestApp, user_id: i64) -> f64 {
    repository::user::find_by_id(&app.state.db.pool, user_id)
        .await
        .unwrap()
        .unwrap()
        .balance
}

/// Reload a restaurant's balance.
pub async fn restaurant_balance(app: &TestApp, restaurant_id: i64) -> f64 {
    repository::restaurant::find_by_id(&app.state.db.pool, restaurant_id)
        .await
        .unwrap()
        .unwrap()
        .balance
}

pub async fn treasury_earnings(app: &TestApp) -> f64 {
    repository::ledger::get_treasury(&app.state.db.pool)
        .await
        .unwrap()
        .total_earnings
}

pub fn approx_eq(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
}
