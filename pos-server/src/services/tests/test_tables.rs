use super::*;
use shared::error::ErrorCode;

#[tokio::test]
async fn test_create_table_starts_available() {
    let env = env();
    let table = env
        .tables
        .create(
            &caller(Role::Manager),
            TableCreate {
                number: 5,
                capacity: 4,
                floor: 1,
            },
        )
        .await
        .unwrap();

    assert_eq!(table.number, 5);
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.waiter_id.is_none());
}

#[tokio::test]
async fn test_create_requires_manager_tier() {
    let env = env();
    for role in [Role::Host, Role::Waiter, Role::Chef] {
        let err = env
            .tables
            .create(
                &caller(role),
                TableCreate {
                    number: 1,
                    capacity: 2,
                    floor: 1,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleRequired);
    }

    // Owner and admin pass the manager gate
    for (number, role) in [(2, Role::Owner), (3, Role::Admin)] {
        assert!(
            env.tables
                .create(
                    &caller(role),
                    TableCreate {
                        number,
                        capacity: 2,
                        floor: 1,
                    },
                )
                .await
                .is_ok()
        );
    }
}

#[tokio::test]
async fn test_duplicate_number_rejected() {
    let env = env();
    let manager = caller(Role::Manager);
    let payload = TableCreate {
        number: 7,
        capacity: 4,
        floor: 1,
    };
    env.tables.create(&manager, payload.clone()).await.unwrap();

    let err = env.tables.create(&manager, payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TableNumberTaken);
}

#[tokio::test]
async fn test_occupy_requires_waiter() {
    let env = env();
    let manager = caller(Role::Manager);
    let table = env
        .tables
        .create(
            &manager,
            TableCreate {
                number: 5,
                capacity: 4,
                floor: 1,
            },
        )
        .await
        .unwrap();

    let err = env
        .tables
        .update_status(
            &manager,
            &table.id,
            TableUpdate {
                status: Some(TableStatus::Occupied),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TableWaiterRequired);

    // With a waiter in the patch the transition goes through
    let occupied = env
        .tables
        .update_status(
            &manager,
            &table.id,
            TableUpdate {
                status: Some(TableStatus::Occupied),
                waiter_id: Some("user:w1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(occupied.status, TableStatus::Occupied);
    assert_eq!(occupied.waiter_id.as_deref(), Some("user:w1"));
}

#[tokio::test]
async fn test_occupied_implies_waiter_set() {
    let env = env();
    let table = occupied_table(&env, 9, "user:w1").await;
    assert_eq!(table.status, TableStatus::Occupied);
    assert!(table.waiter_id.is_some());
}

#[tokio::test]
async fn test_release_clears_occupancy_fields() {
    let env = env();
    let manager = caller(Role::Manager);
    let table = occupied_table(&env, 5, "user:w1").await;

    // Park a reservation on the occupied table too
    env.tables
        .update_status(
            &manager,
            &table.id,
            TableUpdate {
                reservation_name: Some("Garcia".to_string()),
                reservation_phone: Some("600123123".to_string()),
                reservation_time: Some(1_755_000_000_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The release patch only flips the status; the server clears the rest
    let released = env
        .tables
        .update_status(
            &manager,
            &table.id,
            TableUpdate {
                status: Some(TableStatus::Available),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(released.status, TableStatus::Available);
    assert!(released.waiter_id.is_none());
    assert!(released.guest_count.is_none());
    assert!(released.reservation_name.is_none());
    assert!(released.reservation_phone.is_none());
    assert!(released.reservation_time.is_none());
}

#[tokio::test]
async fn test_assign_waiter_gates_and_validation() {
    let env = env();
    let admin = caller(Role::Admin);
    let manager = caller(Role::Manager);

    let table = env
        .tables
        .create(
            &manager,
            TableCreate {
                number: 4,
                capacity: 4,
                floor: 2,
            },
        )
        .await
        .unwrap();

    let waiter = env
        .staff
        .create(
            &admin,
            shared::models::StaffCreate {
                name: "Nadia".to_string(),
                email: "nadia@pos.local".to_string(),
                password: "correct-horse".to_string(),
                role: Role::Waiter,
            },
        )
        .await
        .unwrap();
    let chef = env
        .staff
        .create(
            &admin,
            shared::models::StaffCreate {
                name: "Bruno".to_string(),
                email: "bruno@pos.local".to_string(),
                password: "correct-horse".to_string(),
                role: Role::Chef,
            },
        )
        .await
        .unwrap();

    // Host and waiter may not assign tables
    for role in [Role::Host, Role::Waiter] {
        let err = env
            .tables
            .assign_waiter(&caller(role), &table.id, &waiter.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    // Unknown staff id
    let err = env
        .tables
        .assign_waiter(&manager, &table.id, "user:ghost")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StaffNotFound);

    // A chef is not a server
    let err = env
        .tables
        .assign_waiter(&manager, &table.id, &chef.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    // Manager assigns without touching status
    let updated = env
        .tables
        .assign_waiter(&manager, &table.id, &waiter.id)
        .await
        .unwrap();
    assert_eq!(updated.waiter_id.as_deref(), Some(waiter.id.as_str()));
    assert_eq!(updated.status, TableStatus::Available);
}

#[tokio::test]
async fn test_list_filters() {
    let env = env();
    occupied_table(&env, 1, "user:w1").await;
    let manager = caller(Role::Manager);
    env.tables
        .create(
            &manager,
            TableCreate {
                number: 2,
                capacity: 6,
                floor: 2,
            },
        )
        .await
        .unwrap();

    let occupied = env
        .tables
        .list(crate::services::TableFilter {
            status: Some(TableStatus::Occupied),
            floor: None,
        })
        .await
        .unwrap();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].number, 1);

    let second_floor = env
        .tables
        .list(crate::services::TableFilter {
            status: None,
            floor: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(second_floor.len(), 1);
    assert_eq!(second_floor[0].number, 2);
}
