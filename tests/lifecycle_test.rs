//! Service-level tests for the account lifecycle over an in-memory store.

mod support;

use std::time::Duration;

use chrono::NaiveDate;
use user_registry::domain::{Gender, NewUser, ProfileUpdate};
use user_registry::errors::AppError;
use user_registry::services::{UserManager, UserService};

use support::InMemoryUserRepo;

fn new_user(login: &str, birthday: Option<NaiveDate>) -> NewUser {
    NewUser {
        login: login.to_string(),
        password: "correct-horse-battery".to_string(),
        name: format!("{} Example", login),
        gender: Gender::Unspecified,
        birthday,
        is_admin: false,
    }
}

#[tokio::test]
async fn active_list_excludes_revoked_and_orders_by_creation() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    for login in ["alice", "bob", "carol"] {
        service
            .create_user(new_user(login, None), "admin".to_string())
            .await
            .unwrap();
        // Distinct created_at timestamps so ordering is observable
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    service
        .soft_delete("bob".to_string(), "admin".to_string())
        .await
        .unwrap();

    let active = service.list_active().await.unwrap();
    let logins: Vec<&str> = active.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "carol"]);
}

#[tokio::test]
async fn soft_delete_then_restore_leaves_modification_audit_untouched() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    service
        .update_profile(
            "alice".to_string(),
            "admin".to_string(),
            ProfileUpdate {
                name: Some("Alice Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let before = repo.snapshot("alice").unwrap();

    service
        .soft_delete("alice".to_string(), "admin".to_string())
        .await
        .unwrap();
    let revoked = repo.snapshot("alice").unwrap();
    assert_eq!(revoked.revoked_by.as_deref(), Some("admin"));
    assert!(revoked.revoked_at.is_some());

    service.restore("alice".to_string()).await.unwrap();
    let after = repo.snapshot("alice").unwrap();

    assert!(after.is_active());
    assert!(after.revoked_by.is_none());
    assert_eq!(after.modified_by, before.modified_by);
    assert_eq!(after.modified_at, before.modified_at);
    assert_eq!(after.name, "Alice Renamed");
}

#[tokio::test]
async fn restore_of_active_account_is_a_no_op() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    let before = repo.snapshot("alice").unwrap();

    service.restore("alice".to_string()).await.unwrap();
    let after = repo.snapshot("alice").unwrap();
    assert!(after.is_active());
    assert_eq!(after.modified_at, before.modified_at);
}

#[tokio::test]
async fn repeated_soft_delete_overwrites_the_revocation_stamp() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    service
        .soft_delete("alice".to_string(), "first".to_string())
        .await
        .unwrap();
    service
        .soft_delete("alice".to_string(), "second".to_string())
        .await
        .unwrap();

    let user = repo.snapshot("alice").unwrap();
    assert_eq!(user.revoked_by.as_deref(), Some("second"));
}

#[tokio::test]
async fn mutations_against_revoked_account_leave_the_record_unchanged() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    service
        .soft_delete("alice".to_string(), "admin".to_string())
        .await
        .unwrap();
    let before = repo.snapshot("alice").unwrap();

    let profile = service
        .update_profile(
            "alice".to_string(),
            "mallory".to_string(),
            ProfileUpdate {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(profile, Err(AppError::Revoked(_))));

    let password = service
        .update_password(
            "alice".to_string(),
            "mallory".to_string(),
            "new-password-123".to_string(),
        )
        .await;
    assert!(matches!(password, Err(AppError::Revoked(_))));

    let rename = service
        .update_login(
            "alice".to_string(),
            "mallory".to_string(),
            "eve".to_string(),
        )
        .await;
    assert!(matches!(rename, Err(AppError::Revoked(_))));

    let after = repo.snapshot("alice").unwrap();
    assert_eq!(after.name, before.name);
    assert_eq!(after.login, before.login);
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.modified_at, before.modified_at);
}

#[tokio::test]
async fn hard_delete_works_in_any_state() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    service
        .create_user(new_user("bob", None), "admin".to_string())
        .await
        .unwrap();
    service
        .soft_delete("bob".to_string(), "admin".to_string())
        .await
        .unwrap();

    service.hard_delete("alice".to_string()).await.unwrap();
    service.hard_delete("bob".to_string()).await.unwrap();

    let missing = service.get_by_login("alice".to_string()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    assert!(repo.snapshot("bob").is_none());
}

#[tokio::test]
async fn update_login_moves_the_lookup_key() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    let created = service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();

    service
        .update_login(
            "alice".to_string(),
            "admin".to_string(),
            "alicia".to_string(),
        )
        .await
        .unwrap();

    let renamed = service.get_by_login("alicia".to_string()).await.unwrap();
    assert_eq!(renamed.id, created.id);

    let stale = service.get_by_login("alice".to_string()).await;
    assert!(matches!(stale, Err(AppError::NotFound)));
}

#[tokio::test]
async fn update_login_to_a_taken_handle_is_a_conflict() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    service
        .create_user(new_user("alice", None), "admin".to_string())
        .await
        .unwrap();
    service
        .create_user(new_user("bob", None), "admin".to_string())
        .await
        .unwrap();

    let result = service
        .update_login("bob".to_string(), "admin".to_string(), "alice".to_string())
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn older_than_includes_revoked_and_filters_by_birthday() {
    let repo = InMemoryUserRepo::new();
    let service = UserManager::new(repo.clone());

    let elder_birthday = NaiveDate::from_ymd_opt(1960, 3, 14);
    let junior_birthday = NaiveDate::from_ymd_opt(2015, 7, 1);

    service
        .create_user(new_user("elder", elder_birthday), "admin".to_string())
        .await
        .unwrap();
    service
        .create_user(new_user("junior", junior_birthday), "admin".to_string())
        .await
        .unwrap();
    service
        .create_user(new_user("ageless", None), "admin".to_string())
        .await
        .unwrap();
    service
        .soft_delete("elder".to_string(), "admin".to_string())
        .await
        .unwrap();

    let older = service.list_older_than(30).await.unwrap();
    let logins: Vec<&str> = older.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["elder"]);
}
