//! Unit of Work integration tests.
//!
//! Run against SQLite in memory with all migrations applied.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::ConnectionTrait;

use profile_api::config::Config;
use profile_api::domain::{IdentityId, NewRefreshToken, NewUser, UserStatus};
use profile_api::errors::AppError;
use profile_api::infra::{Database, Persistence, UnitOfWorkFactory};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

async fn setup() -> (Persistence, Database) {
    let mut config = Config::new("sqlite::memory:", TEST_SECRET).unwrap();
    // Every connection to an in-memory database opens a new database
    config.db_max_connections = 1;

    let db = Database::connect(&config)
        .await
        .expect("Failed to connect to test database");

    (Persistence::new(db.get_connection()), db)
}

fn new_user(identity_id: IdentityId, first_name: &str) -> NewUser {
    NewUser {
        identity_id,
        first_name: first_name.to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@x.com".to_string(),
        phone: "123".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
        country: "UK".to_string(),
    }
}

#[tokio::test]
async fn test_accessors_return_same_repository() {
    let (persistence, _db) = setup().await;
    let uow = persistence.begin();

    assert!(Arc::ptr_eq(&uow.users(), &uow.users()));
    assert!(Arc::ptr_eq(&uow.refresh_tokens(), &uow.refresh_tokens()));
}

#[tokio::test]
async fn test_staged_user_is_private_until_complete() {
    let (persistence, _db) = setup().await;
    let writer = persistence.begin();
    let reader = persistence.begin();

    let ada = writer
        .users()
        .add(new_user(IdentityId::generate(), "Ada"))
        .await
        .unwrap();

    // Read-your-writes inside the unit of work only
    assert!(writer.users().get_by_id(ada.id).await.unwrap().is_some());
    assert_eq!(writer.users().all().await.unwrap().len(), 1);
    assert!(reader.users().get_by_id(ada.id).await.unwrap().is_none());

    assert_eq!(writer.complete().await.unwrap(), 1);

    let stored = reader.users().get_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(stored.status, UserStatus::ACTIVE);
    assert_eq!(stored.first_name, "Ada");
    assert_eq!(stored.identity_id, ada.identity_id);
    assert_eq!(stored.date_of_birth, ada.date_of_birth);
}

#[tokio::test]
async fn test_complete_without_changes_writes_nothing() {
    let (persistence, _db) = setup().await;
    let uow = persistence.begin();

    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_commit_persists_nothing() {
    let (persistence, _db) = setup().await;
    let taken = IdentityId::generate();

    let first = persistence.begin();
    first.users().add(new_user(taken, "Ada")).await.unwrap();
    first.complete().await.unwrap();

    let uow = persistence.begin();
    let fresh = uow
        .users()
        .add(new_user(IdentityId::generate(), "Grace"))
        .await
        .unwrap();
    uow.users().add(new_user(taken, "Duplicate")).await.unwrap();

    let result = uow.complete().await;
    assert!(matches!(result, Err(AppError::Persistence(_))));

    // Nothing left staged after a failed completion
    assert_eq!(uow.complete().await.unwrap(), 0);

    let check = persistence.begin();
    assert!(check.users().get_by_id(fresh.id).await.unwrap().is_none());
    let all = check.users().all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name, "Ada");
}

#[tokio::test]
async fn test_dropped_unit_of_work_discards_changes() {
    let (persistence, _db) = setup().await;

    {
        let uow = persistence.begin();
        uow.users()
            .add(new_user(IdentityId::generate(), "Ada"))
            .await
            .unwrap();
    }

    let check = persistence.begin();
    assert!(check.users().all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_update_writes_only_profile_fields() {
    let (persistence, _db) = setup().await;
    let create = persistence.begin();
    let ada = create
        .users()
        .add(new_user(IdentityId::generate(), "Ada"))
        .await
        .unwrap();
    create.complete().await.unwrap();

    let uow = persistence.begin();
    let mut changed = uow.users().get_by_id(ada.id).await.unwrap().unwrap();
    changed.address = Some("12 Main St".to_string());
    changed.country = "US".to_string();
    changed.email = "someone@else.com".to_string();
    changed.first_name = "Grace".to_string();

    assert!(uow.users().update_user_profile(&changed).await.unwrap());
    assert_eq!(uow.complete().await.unwrap(), 1);

    let stored = persistence
        .begin()
        .users()
        .get_by_id(ada.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.address.as_deref(), Some("12 Main St"));
    assert_eq!(stored.country, "US");
    assert_eq!(stored.email, "ada@x.com");
    assert_eq!(stored.first_name, "Ada");
}

#[tokio::test]
async fn test_profile_update_of_unknown_user_is_rejected() {
    let (persistence, _db) = setup().await;
    let uow = persistence.begin();
    let ghost = profile_api::domain::User::new(
        uuid::Uuid::new_v4(),
        new_user(IdentityId::generate(), "Ghost"),
    );

    assert!(!uow.users().update_user_profile(&ghost).await.unwrap());
    assert_eq!(uow.complete().await.unwrap(), 0);
}

#[tokio::test]
async fn test_inactive_user_rejects_profile_update() {
    let (persistence, db) = setup().await;
    let create = persistence.begin();
    let ada = create
        .users()
        .add(new_user(IdentityId::generate(), "Ada"))
        .await
        .unwrap();
    create.complete().await.unwrap();

    db.connection()
        .execute_unprepared("UPDATE users SET status = 0")
        .await
        .unwrap();

    let uow = persistence.begin();
    let mut changed = uow.users().get_by_id(ada.id).await.unwrap().unwrap();
    changed.address = Some("12 Main St".to_string());

    assert!(!uow.users().update_user_profile(&changed).await.unwrap());
}

#[tokio::test]
async fn test_rejected_commit_keeps_previous_state() {
    let (persistence, db) = setup().await;
    let create = persistence.begin();
    let ada = create
        .users()
        .add(new_user(IdentityId::generate(), "Ada"))
        .await
        .unwrap();
    create.complete().await.unwrap();

    let uow = persistence.begin();
    let mut changed = uow.users().get_by_id(ada.id).await.unwrap().unwrap();
    changed.country = "US".to_string();
    assert!(uow.users().update_user_profile(&changed).await.unwrap());

    // The row stops accepting profile updates between staging and commit
    db.connection()
        .execute_unprepared("UPDATE users SET status = 0")
        .await
        .unwrap();

    let result = uow.complete().await;
    assert!(matches!(result, Err(AppError::Persistence(_))));

    let stored = persistence
        .begin()
        .users()
        .get_by_id(ada.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.country, "UK");
}

#[tokio::test]
async fn test_refresh_token_commits_with_user() {
    let (persistence, _db) = setup().await;
    let identity_id = IdentityId::generate();

    let uow = persistence.begin();
    uow.users().add(new_user(identity_id, "Ada")).await.unwrap();
    let token = uow
        .refresh_tokens()
        .add(NewRefreshToken {
            identity_id,
            token: "opaque-refresh-token".to_string(),
            jwt_id: "jti-1".to_string(),
            expiry_date: Utc::now() + Duration::days(30),
        })
        .await
        .unwrap();
    assert_eq!(uow.complete().await.unwrap(), 2);

    let uow = persistence.begin();
    let stored = uow
        .refresh_tokens()
        .get_by_token("opaque-refresh-token")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, token.id);
    assert!(!stored.is_used);

    assert!(uow.refresh_tokens().mark_as_used(&stored).await.unwrap());
    assert_eq!(uow.complete().await.unwrap(), 1);

    let used = persistence
        .begin()
        .refresh_tokens()
        .get_by_token("opaque-refresh-token")
        .await
        .unwrap()
        .unwrap();
    assert!(used.is_used);
    assert!(!used.is_usable(Utc::now()));
}

#[tokio::test]
async fn test_unknown_status_code_reads_back_unchanged() {
    let (persistence, db) = setup().await;
    let create = persistence.begin();
    let ada = create
        .users()
        .add(new_user(IdentityId::generate(), "Ada"))
        .await
        .unwrap();
    create.complete().await.unwrap();

    db.connection()
        .execute_unprepared("UPDATE users SET status = 2")
        .await
        .unwrap();

    let uow = persistence.begin();
    let stored = uow.users().get_by_id(ada.id).await.unwrap().unwrap();
    assert_eq!(stored.status.code(), 2);
    assert_eq!(serde_json::to_value(&stored).unwrap()["status"], 2);

    // Only status 1 accepts profile updates
    assert!(!uow.users().update_user_profile(&stored).await.unwrap());
}

#[tokio::test]
async fn test_listing_follows_commit_order() {
    let (persistence, _db) = setup().await;
    let first = persistence.begin();
    let second = persistence.begin();

    first
        .users()
        .add(new_user(IdentityId::generate(), "StagedFirst"))
        .await
        .unwrap();
    second
        .users()
        .add(new_user(IdentityId::generate(), "StagedSecond"))
        .await
        .unwrap();

    second.complete().await.unwrap();
    first.complete().await.unwrap();

    let names: Vec<String> = persistence
        .begin()
        .users()
        .all()
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.first_name)
        .collect();
    assert_eq!(names, ["StagedSecond", "StagedFirst"]);
}
