//! Version-guarded updates and deletes.

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use common::MemoryStore;
use unboxing_api::config::SCOPE_AUTHENTICATION;
use unboxing_api::domain::{CustomerPatch, NewPayroll, PayrollPatch, Role};
use unboxing_api::errors::AppError;
use unboxing_api::infra::{RecordRepository, VersionedRepository};
use unboxing_api::services::concurrency::commit;
use unboxing_api::services::{RecordService, TokenService, UpdateUser, UserService};

#[tokio::test]
async fn test_second_writer_from_same_version_conflicts() {
    let store = MemoryStore::new();
    let seeded = store.seed_customer("Acme").await;
    assert_eq!(seeded.version, 1);

    let mut first = store.customers.find_by_id(seeded.id).await.unwrap().unwrap();
    let mut second = store.customers.find_by_id(seeded.id).await.unwrap().unwrap();

    first.name = "Acme Holdings".to_string();
    second.name = "Acme Group".to_string();
    second.phone = "555-0100".to_string();

    commit(&*store.customers, &mut first).await.unwrap();
    assert_eq!(first.version, 2);

    let result = commit(&*store.customers, &mut second).await;
    assert!(matches!(result, Err(AppError::EditConflict)));
    assert_eq!(second.version, 1);

    let stored = store.customers.get(seeded.id).unwrap();
    assert_eq!(stored.name, "Acme Holdings");
    assert_eq!(stored.phone, "");
    assert_eq!(stored.version, 2);
}

#[tokio::test]
async fn test_parallel_writers_exactly_one_wins() {
    let store = MemoryStore::new();
    let seeded = store.seed_customer("Parallel").await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let mut record = seeded.clone();
        handles.push(tokio::spawn(async move {
            record.name = format!("writer-{i}");
            commit(&*store.customers, &mut record).await
        }));
    }

    let mut wins = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => wins += 1,
            Err(AppError::EditConflict) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(wins, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(store.customers.get(seeded.id).unwrap().version, 2);
}

#[tokio::test]
async fn test_versions_advance_without_gaps() {
    let store = MemoryStore::new();
    let seeded = store.seed_customer("Chain").await;
    let services = common::services(&store);

    for expected in 2..=4 {
        let updated = services
            .customers
            .update(
                seeded.id,
                CustomerPatch {
                    address: Some(format!("{expected} High Street")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.version, expected);
    }
}

#[tokio::test]
async fn test_update_of_missing_record_is_not_found() {
    let store = MemoryStore::new();
    let services = common::services(&store);

    let result = services
        .payroll
        .update(
            42,
            PayrollPatch {
                amount: Some(10.0),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::RecordNotFound)));
}

#[tokio::test]
async fn test_delete_absent_and_repeated_delete() {
    let store = MemoryStore::new();
    let services = common::services(&store);
    let employee = store.seed_user("payee@example.com", Role::Hr).await;

    let entry = RecordRepository::<_, NewPayroll>::insert(
        &*store.payroll,
        NewPayroll {
            employee_id: employee.id,
            amount: 1200.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        },
    )
    .await
    .unwrap();

    assert!(matches!(
        services.payroll.delete(9999).await,
        Err(AppError::RecordNotFound)
    ));

    services.payroll.delete(entry.id).await.unwrap();
    assert!(matches!(
        services.payroll.delete(entry.id).await,
        Err(AppError::RecordNotFound)
    ));
    assert_eq!(store.payroll.len(), 0);
}

#[tokio::test]
async fn test_password_change_revokes_tokens() {
    let store = MemoryStore::new();
    let user = store.seed_user("rotate@example.com", Role::Sales).await;
    let services = common::services(&store);
    let token = services
        .tokens
        .issue(user.id, Duration::hours(1), SCOPE_AUTHENTICATION)
        .await
        .unwrap();

    let updated = services
        .users
        .update_user(
            user.id,
            UpdateUser {
                password: Some("a-brand-new-password".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.version, 2);
    assert_eq!(store.tokens.count_for(user.id), 0);
    assert!(services
        .tokens
        .resolve(SCOPE_AUTHENTICATION, &token.plaintext)
        .await
        .is_err());
}

#[tokio::test]
async fn test_name_change_keeps_tokens() {
    let store = MemoryStore::new();
    let user = store.seed_user("keep@example.com", Role::Sales).await;
    let services = common::services(&store);
    services
        .tokens
        .issue(user.id, Duration::hours(1), SCOPE_AUTHENTICATION)
        .await
        .unwrap();

    services
        .users
        .update_user(
            user.id,
            UpdateUser {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(store.tokens.count_for(user.id), 1);
}

#[tokio::test]
async fn test_failed_revocation_keeps_old_password_and_version() {
    let store = MemoryStore::new();
    let user = store.seed_user("stuck@example.com", Role::Sales).await;
    let services = common::services(&store);
    let token = services
        .tokens
        .issue(user.id, Duration::hours(1), SCOPE_AUTHENTICATION)
        .await
        .unwrap();
    store.users.fail_revocation();

    let result = services
        .users
        .update_user(
            user.id,
            UpdateUser {
                password: Some("a-brand-new-password".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(result.unwrap_err().is_internal());

    let stored = store.users.get(user.id).unwrap();
    assert_eq!(stored.version, user.version);
    assert_eq!(stored.credential.as_str(), user.credential.as_str());
    assert!(stored.credential.matches(common::TEST_PASSWORD).unwrap());
    assert_eq!(store.tokens.count_for(user.id), 1);
    assert!(services
        .tokens
        .resolve(SCOPE_AUTHENTICATION, &token.plaintext)
        .await
        .is_ok());
}
