//! Username validation and claim tests

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use openlink::errors::{OpenLinkError, Result};
use openlink::services::{ClaimIdentity, UsernamePolicy, UsernameService};
use openlink::storage::{MemoryStorage, NewProfile, Profile, ProfileStore, ProfileUpdate};

/// Inserts a bare profile row right before the first create, like a signup trigger
struct SignupTriggerRace {
    inner: Arc<MemoryStorage>,
    fired: AtomicBool,
}

#[async_trait]
impl ProfileStore for SignupTriggerRace {
    async fn get(&self, id: &str) -> Result<Option<Profile>> {
        ProfileStore::get(self.inner.as_ref(), id).await
    }

    async fn update(&self, id: &str, update: ProfileUpdate) -> Result<()> {
        ProfileStore::update(self.inner.as_ref(), id, update).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>> {
        self.inner.find_by_username(username).await
    }

    async fn create(&self, profile: NewProfile) -> Result<Profile> {
        if !self.fired.swap(true, Ordering::SeqCst) {
            ProfileStore::create(
                self.inner.as_ref(),
                NewProfile {
                    id: profile.id.clone(),
                    username: None,
                    display_name: None,
                },
            )
            .await?;
        }
        ProfileStore::create(self.inner.as_ref(), profile).await
    }
}

fn identity(owner_id: &str) -> ClaimIdentity<'_> {
    ClaimIdentity {
        owner_id,
        email: Some("new.user@example.com"),
        full_name: None,
    }
}

fn service(memory: &Arc<MemoryStorage>) -> UsernameService {
    UsernameService::with_policy(memory.clone(), UsernamePolicy::default())
}

#[test]
fn test_validation_rejects_and_accepts() {
    let policy = UsernamePolicy::default();
    let too_long = "a".repeat(31);

    for rejected in ["AB", "has space", "admin", too_long.as_str()] {
        assert!(
            matches!(policy.validate(rejected), Err(OpenLinkError::Validation(_))),
            "{:?} should be rejected",
            rejected
        );
    }
    assert_eq!(policy.validate("jane_doe-99").unwrap(), "jane_doe-99");
    assert_eq!(policy.validate("  JaneDoe ").unwrap(), "janedoe");
    assert_eq!(policy.validate(&"a".repeat(30)).unwrap().len(), 30);
}

#[test]
fn test_extra_reserved_words() {
    let policy = UsernamePolicy::new(&["Health".to_string()]);
    assert!(policy.validate("health").is_err());
    assert!(policy.validate("healthy").is_ok());
}

#[tokio::test]
async fn test_claim_without_profile_creates_one_row() {
    let memory = Arc::new(MemoryStorage::new());
    let usernames = service(&memory);

    let profile = usernames.claim(identity("owner-1"), "newuser").await.unwrap();

    assert_eq!(profile.username.as_deref(), Some("newuser"));
    assert_eq!(profile.display_name.as_deref(), Some("new.user"));
    assert_eq!(memory.profile_count(), 1);

    let stored = ProfileStore::get(memory.as_ref(), "owner-1").await.unwrap().unwrap();
    assert_eq!(stored.username.as_deref(), Some("newuser"));
}

#[tokio::test]
async fn test_claim_fills_existing_unclaimed_row() {
    let memory = Arc::new(MemoryStorage::new());
    ProfileStore::create(
        memory.as_ref(),
        NewProfile {
            id: "owner-1".to_string(),
            username: None,
            display_name: None,
        },
    )
    .await
    .unwrap();

    let usernames = service(&memory);
    let profile = usernames
        .claim(
            ClaimIdentity {
                owner_id: "owner-1",
                email: None,
                full_name: Some("Jane Doe"),
            },
            "jane",
        )
        .await
        .unwrap();

    assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
    assert_eq!(memory.profile_count(), 1);
}

#[tokio::test]
async fn test_claim_survives_row_created_by_signup_trigger() {
    let memory = Arc::new(MemoryStorage::new());
    let racing = Arc::new(SignupTriggerRace {
        inner: memory.clone(),
        fired: AtomicBool::new(false),
    });
    let usernames = UsernameService::with_policy(racing, UsernamePolicy::default());

    let profile = usernames.claim(identity("owner-9"), "newuser").await.unwrap();

    assert_eq!(profile.username.as_deref(), Some("newuser"));
    assert_eq!(profile.display_name.as_deref(), Some("new.user"));
    assert_eq!(memory.profile_count(), 1);
    let stored = ProfileStore::get(memory.as_ref(), "owner-9").await.unwrap().unwrap();
    assert_eq!(stored.username.as_deref(), Some("newuser"));
}

#[tokio::test]
async fn test_claim_twice_is_conflict() {
    let memory = Arc::new(MemoryStorage::new());
    let usernames = service(&memory);

    usernames.claim(identity("owner-1"), "first").await.unwrap();
    let again = usernames.claim(identity("owner-1"), "second").await;

    assert!(matches!(again, Err(OpenLinkError::Conflict(_))));
    let stored = ProfileStore::get(memory.as_ref(), "owner-1").await.unwrap().unwrap();
    assert_eq!(stored.username.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_taken_username_is_conflict() {
    let memory = Arc::new(MemoryStorage::new());
    let usernames = service(&memory);

    usernames.claim(identity("owner-1"), "jane").await.unwrap();
    let result = usernames.claim(identity("owner-2"), "JANE").await;

    match result {
        Err(OpenLinkError::Conflict(msg)) => assert_eq!(msg, "This username is already taken."),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(memory.profile_count(), 1);
}

#[tokio::test]
async fn test_availability() {
    let memory = Arc::new(MemoryStorage::new());
    let usernames = service(&memory);
    usernames.claim(identity("owner-1"), "jane").await.unwrap();

    let taken = usernames.availability("jane").await.unwrap();
    assert!(!taken.available);
    assert_eq!(taken.error.as_deref(), Some("This username is already taken."));

    let free = usernames.availability("Janet").await.unwrap();
    assert!(free.available);
    assert_eq!(free.username, "janet");

    let invalid = usernames.availability("no").await.unwrap();
    assert!(!invalid.available);
    assert!(invalid.error.is_some());
}
