//! End-to-end settlement tests: fee split, balance movements, ledger
//! consistency, and the concurrent-checkout regression.

mod common;

use common::*;
use server::db::repository;
use server::settlement::SettlementError;
use shared::models::{AccountType, OrderStatus, TREASURY_ID};

const SERVICE_FEE_25: f64 = 25.0 * 15.0 / 85.0; // ≈ 4.4118
const TOTAL_FEE_25: f64 = 25.0 + SERVICE_FEE_25; // ≈ 29.4118

/// A {10.00 × 2, 5.00 × 1} cart with balance 30.00 succeeds and
/// moves exactly (−total, +subtotal, +service) across the three accounts.
#[tokio::test]
async fn checkout_moves_money_between_all_three_accounts() {
    let app = spawn().await;
    let customer = seed_customer(&app, "anna@example.com", 30.0).await;
    let (_, restaurant, item_a, item_b) = seed_restaurant(&app, "pizza@example.com").await;

    app.state.carts.add_item(customer.id, &item_a, 2).unwrap();
    app.state.carts.add_item(customer.id, &item_b, 1).unwrap();

    let detail = app
        .state
        .settlement
        .checkout(customer.id, &customer)
        .await
        .expect("checkout succeeds");

    approx_eq(detail.order.original_fee, 25.0);
    approx_eq(detail.order.service_fee, SERVICE_FEE_25);
    approx_eq(detail.order.total_price, TOTAL_FEE_25);
    approx_eq(
        detail.order.total_price,
        detail.order.original_fee + detail.order.service_fee,
    );
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert!(!detail.order.cashback_applied);
    assert_eq!(detail.items.len(), 2);

    approx_eq(user_balance(&app, customer.id).await, 30.0 - TOTAL_FEE_25);
    approx_eq(restaurant_balance(&app, restaurant.id).await, 25.0);
    approx_eq(treasury_earnings(&app).await, SERVICE_FEE_25);

    // The cart is consumed only by the committed settlement.
    assert!(app.state.carts.get(customer.id).is_empty());

    // The order snapshot is decoupled from the cart.
    let persisted = repository::order::find_detail(&app.state.db.pool, detail.order.id)
        .await
        .unwrap();
    assert_eq!(persisted.items.len(), 2);
}

/// Balances are caches of the append-only ledger.
#[tokio::test]
async fn ledger_entries_sum_to_balances() {
    let app = spawn().await;
    let customer = seed_customer(&app, "anna@example.com", 50.0).await;
    let (_, restaurant, item_a, _) = seed_restaurant(&app, "pizza@example.com").await;

    app.state.carts.add_item(customer.id, &item_a, 2).unwrap();
    app.state
        .settlement
        .checkout(customer.id, &customer)
        .await
        .unwrap();

    let pool = &app.state.db.pool;
    let customer_sum = repository::ledger::account_sum(pool, AccountType::Customer, customer.id)
        .await
        .unwrap();
    approx_eq(customer_sum, user_balance(&app, customer.id).await);

    let restaurant_sum =
        repository::ledger::account_sum(pool, AccountType::Restaurant, restaurant.id)
            .await
            .unwrap();
    approx_eq(restaurant_sum, restaurant_balance(&app, restaurant.id).await);

    let treasury_sum = repository::ledger::account_sum(pool, AccountType::Treasury, TREASURY_ID)
        .await
        .unwrap();
    approx_eq(treasury_sum, treasury_earnings(&app).await);
}

/// Balance 29.00 < required 29.4118: checkout fails and nothing moves.
#[tokio::test]
async fn checkout_insufficient_balance_mutates_nothing() {
    let app = spawn().await;
    let customer = seed_customer(&app, "broke@example.com", 29.0).await;
    let (_, restaurant, item_a, item_b) = seed_restaurant(&app, "pizza@example.com").await;

    app.state.carts.add_item(customer.id, &item_a, 2).unwrap();
    app.state.carts.add_item(customer.id, &item_b, 1).unwrap();

    let err = app
        .state
        .settlement
        .checkout(customer.id, &customer)
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::InsufficientBalance { .. }));

    approx_eq(user_balance(&app, customer.id).await, 29.0);
    approx_eq(restaurant_balance(&app, restaurant.id).await, 0.0);
    approx_eq(treasury_earnings(&app).await, 0.0);
    // Cart stays intact for retry.
    assert_eq!(app.state.carts.get(customer.id).lines().count(), 2);
}

#[tokio::test]
async fn checkout_closed_restaurant_mutates_nothing() {
    let app = spawn().await;
    let customer = seed_customer(&app, "anna@example.com", 100.0).await;
    let (_, restaurant, item_a, _) = seed_restaurant(&app, "pizza@example.com").await;
    repository::restaurant::set_open(&app.state.db.pool, restaurant.id, false)
        .await
        .unwrap();

    app.state.carts.add_item(customer.id, &item_a, 1).unwrap();

    let err = app
        .state
        .settlement
        .checkout(customer.id, &customer)
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::RestaurantClosed(id) if id == restaurant.id));

    approx_eq(user_balance(&app, customer.id).await, 100.0);
    approx_eq(restaurant_balance(&app, restaurant.id).await, 0.0);
    assert!(!app.state.carts.get(customer.id).is_empty());
}

#[tokio::test]
async fn checkout_empty_cart_fails() {
    let app = spawn().await;
    let customer = seed_customer(&app, "anna@example.com", 100.0).await;
    seed_restaurant(&app, "pizza@example.com").await;

    let err = app
        .state
        .settlement
        .checkout(customer.id, &customer)
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::EmptyCart));
}

#[tokio::test]
async fn checkout_requires_customer_role() {
    let app = spawn().await;
    let (owner, _, _, _) = seed_restaurant(&app, "pizza@example.com").await;

    // An owner cannot shop; the role gate fires before the cart is consulted.
    let err = app
        .state
        .settlement
        .checkout(owner.id, &owner)
        .await
        .unwrap_err();
    assert!(matches!(err, SettlementError::Unauthorized(_)));
}

/// Regression for the lost-update race: two concurrent checkouts against the
/// same restaurant must both land; the final balance is the sum of both
/// subtotals, never just one of them.
#[tokio::test]
async fn concurrent_checkouts_do_not_lose_updates() {
    let app = spawn().await;
    let anna = seed_customer(&app, "anna@example.com", 50.0).await;
    let ben = seed_customer(&app, "ben@example.com", 50.0).await;
    let (_, restaurant, item_a, item_b) = seed_restaurant(&app, "pizza@example.com").await;

    app.state.carts.add_item(anna.id, &item_a, 2).unwrap();
    app.state.carts.add_item(anna.id, &item_b, 1).unwrap();
    app.state.carts.add_item(ben.id, &item_a, 2).unwrap();
    app.state.carts.add_item(ben.id, &item_b, 1).unwrap();

    let engine_a = app.state.settlement.clone();
    let engine_b = app.state.settlement.clone();
    let anna_clone = anna.clone();
    let ben_clone = ben.clone();

    let (ra, rb) = tokio::join!(
        tokio::spawn(async move { engine_a.checkout(anna_clone.id, &anna_clone).await }),
        tokio::spawn(async move { engine_b.checkout(ben_clone.id, &ben_clone).await }),
    );
    ra.unwrap().expect("first checkout succeeds");
    rb.unwrap().expect("second checkout succeeds");

    approx_eq(restaurant_balance(&app, restaurant.id).await, 50.0);
    approx_eq(treasury_earnings(&app).await, 2.0 * SERVICE_FEE_25);
    approx_eq(user_balance(&app, anna.id).await, 50.0 - TOTAL_FEE_25);
    approx_eq(user_balance(&app, ben.id).await, 50.0 - TOTAL_FEE_25);
}

/// A customer cannot spend the same balance twice in racing checkouts.
#[tokio::test]
async fn concurrent_checkouts_cannot_double_spend() {
    let app = spawn().await;
    // Enough for one order (≈29.41) but not two.
    let anna = seed_customer(&app, "anna@example.com", 40.0).await;
    let (_, restaurant, item_a, item_b) = seed_restaurant(&app, "pizza@example.com").await;

    app.state.carts.add_item(anna.id, &item_a, 2).unwrap();
    app.state.carts.add_item(anna.id, &item_b, 1).unwrap();

    // First checkout consumes the cart; rebuild it to race a second order.
    let first = app.state.settlement.checkout(anna.id, &anna).await;
    assert!(first.is_ok());
    app.state.carts.add_item(anna.id, &item_a, 2).unwrap();
    app.state.carts.add_item(anna.id, &item_b, 1).unwrap();

    let second = app.state.settlement.checkout(anna.id, &anna).await;
    match second {
        Err(SettlementError::InsufficientBalance { required, available }) => {
            assert!(available < required);
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }

    // Exactly one settlement landed.
    approx_eq(restaurant_balance(&app, restaurant.id).await, 25.0);
    approx_eq(user_balance(&app, anna.id).await, 40.0 - TOTAL_FEE_25);
}

#[tokio::test]
async fn topup_credits_balance_and_ledger() {
    let app = spawn().await;
    let customer = seed_customer(&app, "anna@example.com", 0.0).await;

    let balance = app.state.settlement.topup(&customer, 42.5).await.unwrap();
    approx_eq(balance, 42.5);

    let entries = repository::ledger::find_by_account(
        &app.state.db.pool,
        AccountType::Customer,
        customer.id,
    )
    .await
    .unwrap();
    assert_eq!(entries.len(), 1);
    approx_eq(entries[0].amount, 42.5);

    assert!(
        app.state
            .settlement
            .topup(&customer, -5.0)
            .await
            .is_err()
    );
    assert!(app.state.settlement.topup(&customer, 0.0).await.is_err());
}
