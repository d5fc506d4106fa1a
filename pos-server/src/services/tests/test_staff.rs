use super::*;
use shared::client::RoleHint;
use shared::error::ErrorCode;
use shared::models::{StaffCreate, StaffUpdate};

fn staff_create(name: &str, email: &str, role: Role) -> StaffCreate {
    StaffCreate {
        name: name.to_string(),
        email: email.to_string(),
        password: "correct-horse-battery".to_string(),
        role,
    }
}

#[tokio::test]
async fn test_provisioning_hierarchy_on_create() {
    let env = env();

    // Manager may not create another manager; owner may
    let err = env
        .staff
        .create(
            &caller(Role::Manager),
            staff_create("Marta", "marta@pos.local", Role::Manager),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    let created = env
        .staff
        .create(
            &caller(Role::Owner),
            staff_create("Marta", "marta@pos.local", Role::Manager),
        )
        .await
        .unwrap();
    assert_eq!(created.role, Role::Manager);

    // Owner may not create owners or admins
    for role in [Role::Owner, Role::Admin] {
        let err = env
            .staff
            .create(
                &caller(Role::Owner),
                staff_create("X", "x@pos.local", role),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    // Floor staff never provision accounts
    for acting in [Role::Host, Role::Waiter, Role::Chef] {
        let err = env
            .staff
            .create(
                &caller(acting),
                staff_create("Y", "y@pos.local", Role::Host),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }
}

#[tokio::test]
async fn test_email_collision_rejected() {
    let env = env();
    let admin = caller(Role::Admin);
    env.staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();

    let err = env
        .staff
        .create(&admin, staff_create("Ana B", "ana@pos.local", Role::Host))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmailTaken);
}

#[tokio::test]
async fn test_list_excludes_admins_by_default() {
    let env = env();
    let admin = caller(Role::Admin);
    env.staff
        .create(&admin, staff_create("Root", "root@pos.local", Role::Admin))
        .await
        .unwrap();
    env.staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();

    let listed = env.staff.list(&caller(Role::Manager), None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].role, Role::Waiter);
}

#[tokio::test]
async fn test_waiter_filter_is_open_to_all_roles() {
    let env = env();
    let admin = caller(Role::Admin);
    env.staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();

    // Chef has no view_staff permission, yet the waiter lookup works
    let listed = env
        .staff
        .list(&caller(Role::Chef), Some(Role::Waiter))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    // Any other filter stays gated for the chef
    let err = env
        .staff
        .list(&caller(Role::Chef), Some(Role::Host))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // And the admin filter needs admin
    let err = env
        .staff
        .list(&caller(Role::Manager), Some(Role::Admin))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);
}

#[tokio::test]
async fn test_admin_records_hidden_from_non_admins() {
    let env = env();
    let admin = caller(Role::Admin);
    let root = env
        .staff
        .create(&admin, staff_create("Root", "root@pos.local", Role::Admin))
        .await
        .unwrap();

    let err = env
        .staff
        .get(&caller(Role::Owner), &root.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CannotModifyAdmin);

    assert!(env.staff.get(&admin, &root.id).await.is_ok());
}

#[tokio::test]
async fn test_deactivate_is_soft_and_gated() {
    let env = env();
    let admin = caller(Role::Admin);
    let manager = caller(Role::Manager);
    let waiter = env
        .staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();
    let owner = env
        .staff
        .create(&admin, staff_create("Olga", "olga@pos.local", Role::Owner))
        .await
        .unwrap();

    // Manager deactivates floor staff
    let deactivated = env.staff.deactivate(&manager, &waiter.id).await.unwrap();
    assert!(!deactivated.active);

    // The row still exists
    let row = env.db.users.find_by_id(&waiter.id).await.unwrap();
    assert!(row.is_some());

    // Manager may not touch an owner
    let err = env.staff.deactivate(&manager, &owner.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // Owner may not touch another owner either
    let err = env
        .staff
        .deactivate(&caller(Role::Owner), &owner.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_update_role_checks_both_roles() {
    let env = env();
    let admin = caller(Role::Admin);
    let manager = caller(Role::Manager);
    let waiter = env
        .staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();

    // Manager may rename a waiter...
    let updated = env
        .staff
        .update(
            &manager,
            &waiter.id,
            StaffUpdate {
                name: Some("Ana Maria".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ana Maria");

    // ...but not promote them beyond the manager's authority
    let err = env
        .staff
        .update(
            &manager,
            &waiter.id,
            StaffUpdate {
                role: Some(Role::Manager),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_login_and_role_hints() {
    let env = env();
    let admin = caller(Role::Admin);
    env.staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();
    env.staff
        .create(&admin, staff_create("Root", "root@pos.local", Role::Admin))
        .await
        .unwrap();

    // Plain login works for any active account
    let account = env
        .staff
        .login("ana@pos.local", "correct-horse-battery", None)
        .await
        .unwrap();
    assert_eq!(account.role, Role::Waiter);

    // Wrong password and unknown email produce the same error
    let err = env
        .staff
        .login("ana@pos.local", "wrong", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    let err = env
        .staff
        .login("ghost@pos.local", "whatever", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);

    // Admin channel refuses non-admin accounts
    let err = env
        .staff
        .login("ana@pos.local", "correct-horse-battery", Some(RoleHint::Admin))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AdminRequired);

    // Staff channel refuses admin accounts
    let err = env
        .staff
        .login(
            "root@pos.local",
            "correct-horse-battery",
            Some(RoleHint::Staff),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_disabled_account_cannot_login() {
    let env = env();
    let admin = caller(Role::Admin);
    let ana = env
        .staff
        .create(&admin, staff_create("Ana", "ana@pos.local", Role::Waiter))
        .await
        .unwrap();
    env.staff.deactivate(&admin, &ana.id).await.unwrap();

    let err = env
        .staff
        .login("ana@pos.local", "correct-horse-battery", None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AccountDisabled);
}

#[tokio::test]
async fn test_register_requires_admin_tier() {
    let env = env();
    let err = env
        .staff
        .register(
            &caller(Role::Owner),
            staff_create("Ana", "ana@pos.local", Role::Waiter),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RoleRequired);

    let created = env
        .staff
        .register(
            &caller(Role::Admin),
            staff_create("Ana", "ana@pos.local", Role::Waiter),
        )
        .await
        .unwrap();
    assert_eq!(created.role, Role::Waiter);
}
