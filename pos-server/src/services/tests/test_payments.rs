use super::*;
use shared::error::ErrorCode;
use shared::models::{OrderCreate, OrderStatus, PaymentMethod, SettleRequest};

async fn open_order_with_items(env: &TestEnv, number: u32) -> (Table, shared::models::Order) {
    let table = occupied_table(env, number, "user:w1").await;
    let paella = seed_menu_item(env, "Paella", 1450).await;
    let order = env
        .orders
        .create(
            &caller(Role::Waiter),
            OrderCreate {
                table_id: table.id.clone(),
                waiter_id: None,
                items: vec![item_input(&paella, 2)],
            },
        )
        .await
        .unwrap();
    (table, order)
}

#[tokio::test]
async fn test_settlement_cascade_releases_table() {
    let env = env();
    let (table, order) = open_order_with_items(&env, 5).await;

    let payment = env
        .payments
        .settle(
            &caller(Role::Manager),
            SettleRequest {
                order_id: order.id.clone(),
                amount: Decimal::new(4000, 2),
                tip: Some(Decimal::new(300, 2)),
                method: PaymentMethod::Card,
            },
        )
        .await
        .unwrap();

    assert_eq!(payment.order_id, order.id);
    assert_eq!(payment.amount, Decimal::new(4000, 2));
    assert_eq!(payment.tip, Decimal::new(300, 2));

    // Order is settled
    let order = env.orders.get(&order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Paid);

    // Table is released and cleared — it was the only order
    let table = env.tables.get(&table.id).await.unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.waiter_id.is_none());
    assert!(table.guest_count.is_none());
}

#[tokio::test]
async fn test_repeat_settlement_fails() {
    let env = env();
    let (_, order) = open_order_with_items(&env, 5).await;
    let manager = caller(Role::Manager);
    let req = SettleRequest {
        order_id: order.id.clone(),
        amount: order.total(),
        tip: None,
        method: PaymentMethod::Cash,
    };

    env.payments.settle(&manager, req.clone()).await.unwrap();
    let err = env.payments.settle(&manager, req).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderAlreadyPaid);

    // Exactly one payment row exists
    let payments = env.db.payments.find_by_order(&order.id).await.unwrap();
    assert_eq!(payments.len(), 1);
}

#[tokio::test]
async fn test_settle_missing_order() {
    let env = env();
    let err = env
        .payments
        .settle(
            &caller(Role::Manager),
            SettleRequest {
                order_id: "order:ghost".to_string(),
                amount: Decimal::from(10),
                tip: None,
                method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn test_waiter_cash_only() {
    let env = env();
    let (_, order) = open_order_with_items(&env, 5).await;
    let waiter = caller(Role::Waiter);

    // Card from a waiter is refused before any state is touched
    let err = env
        .payments
        .settle(
            &waiter,
            SettleRequest {
                order_id: order.id.clone(),
                amount: order.total(),
                tip: None,
                method: PaymentMethod::Card,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
    assert_eq!(
        env.orders.get(&order.id).await.unwrap().status,
        OrderStatus::New
    );

    // Cash is fine
    env.payments
        .settle(
            &waiter,
            SettleRequest {
                order_id: order.id.clone(),
                amount: order.total(),
                tip: None,
                method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_roles_without_payments_permission() {
    let env = env();
    let (_, order) = open_order_with_items(&env, 5).await;

    for role in [Role::Chef, Role::Host] {
        let err = env
            .payments
            .settle(
                &caller(role),
                SettleRequest {
                    order_id: order.id.clone(),
                    amount: order.total(),
                    tip: None,
                    method: PaymentMethod::Cash,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }
}

#[tokio::test]
async fn test_amount_validation() {
    let env = env();
    let (_, order) = open_order_with_items(&env, 5).await;
    let manager = caller(Role::Manager);

    for amount in [Decimal::ZERO, Decimal::from(-5)] {
        let err = env
            .payments
            .settle(
                &manager,
                SettleRequest {
                    order_id: order.id.clone(),
                    amount,
                    tip: None,
                    method: PaymentMethod::Cash,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentInvalidAmount);
    }

    let err = env
        .payments
        .settle(
            &manager,
            SettleRequest {
                order_id: order.id.clone(),
                amount: order.total(),
                tip: Some(Decimal::from(-1)),
                method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentInvalidAmount);
}

#[tokio::test]
async fn test_cancelled_orders_do_not_hold_the_table() {
    let env = env();
    let (table, first) = open_order_with_items(&env, 5).await;
    let manager = caller(Role::Manager);

    // Cancel the first round; the table stays occupied for the guests
    env.orders
        .advance_status(&manager, &first.id, "cancelled")
        .await
        .unwrap();
    assert_eq!(
        env.tables.get(&table.id).await.unwrap().status,
        TableStatus::Occupied
    );

    // A new order opens for the same table
    let paella = seed_menu_item(&env, "Tortilla", 900).await;
    let second = env
        .orders
        .create(
            &caller(Role::Waiter),
            OrderCreate {
                table_id: table.id.clone(),
                waiter_id: None,
                items: vec![item_input(&paella, 1)],
            },
        )
        .await
        .unwrap();
    assert_ne!(second.id, first.id);

    // Settling it releases the table; the cancelled order does not block
    env.payments
        .settle(
            &manager,
            SettleRequest {
                order_id: second.id.clone(),
                amount: second.total(),
                tip: None,
                method: PaymentMethod::Mobile,
            },
        )
        .await
        .unwrap();
    let table = env.tables.get(&table.id).await.unwrap();
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.waiter_id.is_none());
}

#[tokio::test]
async fn test_settle_cancelled_order_rejected() {
    let env = env();
    let (_, order) = open_order_with_items(&env, 5).await;
    let manager = caller(Role::Manager);
    env.orders
        .advance_status(&manager, &order.id, "cancelled")
        .await
        .unwrap();

    let err = env
        .payments
        .settle(
            &manager,
            SettleRequest {
                order_id: order.id.clone(),
                amount: order.total(),
                tip: None,
                method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderAlreadyCancelled);
}
