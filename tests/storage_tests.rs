//! Storage backend tests
//!
//! Tests for SeaOrmStorage using temporary SQLite databases.

use openlink::errors::OpenLinkError;
use openlink::storage::backend::infer_backend_from_url;
use openlink::storage::{
    ButtonStyle, ClickStore, DeviceClass, LinkFilter, LinkStore, LinkUpdate, NewClick, NewLink,
    NewProfile, ProfileStore, ProfileUpdate, SeaOrmStorage, StorageFactory, StorageHealth,
};
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

async fn create_owner(storage: &SeaOrmStorage, id: &str, username: Option<&str>) {
    ProfileStore::create(
        storage,
        NewProfile {
            id: id.to_string(),
            username: username.map(str::to_string),
            display_name: None,
        },
    )
    .await
    .expect("Failed to create profile");
}

fn new_link(title: &str, order: i32, is_active: bool) -> NewLink {
    NewLink {
        title: Some(title.to_string()),
        target_url: Some(format!("https://{}.example.com/", title)),
        order,
        is_active,
    }
}

#[tokio::test]
async fn test_ping_and_backend_name() {
    let (storage, _dir) = create_temp_storage().await;
    assert_eq!(storage.backend_name(), "sqlite");
    storage.ping().await.unwrap();
}

#[tokio::test]
async fn test_profile_roundtrip_and_update() {
    let (storage, _dir) = create_temp_storage().await;
    create_owner(&storage, "owner-1", None).await;

    let profile = ProfileStore::get(&storage, "owner-1").await.unwrap().unwrap();
    assert!(!profile.is_claimed());

    ProfileStore::update(
        &storage,
        "owner-1",
        ProfileUpdate {
            username: Some("jane".to_string()),
            button_style: Some(ButtonStyle::Outline),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let found = storage.find_by_username("jane").await.unwrap().unwrap();
    assert_eq!(found.id, "owner-1");
    assert_eq!(found.button_style, Some(ButtonStyle::Outline));
    assert!(found.updated_at >= profile.updated_at);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let (storage, _dir) = create_temp_storage().await;
    create_owner(&storage, "owner-1", Some("jane")).await;

    let result = ProfileStore::create(
        &storage,
        NewProfile {
            id: "owner-2".to_string(),
            username: Some("jane".to_string()),
            display_name: None,
        },
    )
    .await;
    assert!(matches!(result, Err(OpenLinkError::Conflict(_))));

    create_owner(&storage, "owner-3", None).await;
    let update = ProfileStore::update(
        &storage,
        "owner-3",
        ProfileUpdate {
            username: Some("jane".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(update, Err(OpenLinkError::Conflict(_))));
}

#[tokio::test]
async fn test_update_missing_profile_is_not_found() {
    let (storage, _dir) = create_temp_storage().await;

    let result = ProfileStore::update(
        &storage,
        "ghost",
        ProfileUpdate {
            bio: Some("hi".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(OpenLinkError::NotFound(_))));
}

#[tokio::test]
async fn test_links_listed_by_order_with_filter() {
    let (storage, _dir) = create_temp_storage().await;
    create_owner(&storage, "owner-1", Some("jane")).await;

    let c = LinkStore::create(&storage, "owner-1", new_link("c", 5, true)).await.unwrap();
    let a = LinkStore::create(&storage, "owner-1", new_link("a", -2, true)).await.unwrap();
    let b = LinkStore::create(&storage, "owner-1", new_link("b", 1, false)).await.unwrap();

    let all: Vec<String> = storage
        .list("owner-1", LinkFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(all, vec![a.id.clone(), b.id.clone(), c.id.clone()]);

    let active: Vec<String> = storage
        .list("owner-1", LinkFilter::active())
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(active, vec![a.id, c.id]);
}

#[tokio::test]
async fn test_link_update_and_delete() {
    let (storage, _dir) = create_temp_storage().await;
    create_owner(&storage, "owner-1", Some("jane")).await;
    let link = LinkStore::create(&storage, "owner-1", new_link("a", 0, false)).await.unwrap();

    LinkStore::update(&storage, &link.id, LinkUpdate::active(true)).await.unwrap();
    LinkStore::update(&storage, &link.id, LinkUpdate::order(7)).await.unwrap();

    let stored = LinkStore::get(&storage, &link.id).await.unwrap().unwrap();
    assert!(stored.is_active);
    assert_eq!(stored.order, 7);
    assert_eq!(stored.title.as_deref(), Some("a"));

    LinkStore::delete(&storage, &link.id).await.unwrap();
    assert!(LinkStore::get(&storage, &link.id).await.unwrap().is_none());

    assert!(matches!(
        LinkStore::delete(&storage, &link.id).await,
        Err(OpenLinkError::NotFound(_))
    ));
    assert!(matches!(
        LinkStore::update(&storage, &link.id, LinkUpdate::order(1)).await,
        Err(OpenLinkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_link_for_unknown_owner_fails() {
    let (storage, _dir) = create_temp_storage().await;

    let result = LinkStore::create(&storage, "ghost", new_link("a", 0, true)).await;
    assert!(matches!(result, Err(OpenLinkError::Persistence(_))));
}

#[tokio::test]
async fn test_click_counts_by_device() {
    let (storage, _dir) = create_temp_storage().await;
    create_owner(&storage, "owner-1", Some("jane")).await;
    let a = LinkStore::create(&storage, "owner-1", new_link("a", 0, true)).await.unwrap();
    let b = LinkStore::create(&storage, "owner-1", new_link("b", 1, true)).await.unwrap();

    for device in [DeviceClass::Mobile, DeviceClass::Mobile, DeviceClass::Desktop] {
        storage
            .append(NewClick {
                link_id: a.id.clone(),
                device_class: device,
            })
            .await
            .unwrap();
    }

    let counts = storage
        .count_by_link(&[a.id.clone(), b.id.clone()])
        .await
        .unwrap();
    let a_counts = counts.get(&a.id).copied().unwrap();
    assert_eq!(a_counts.total, 3);
    assert_eq!(a_counts.mobile, 2);
    assert_eq!(a_counts.desktop, 1);
    assert!(!counts.contains_key(&b.id));

    // 删除链接级联删除点击
    LinkStore::delete(&storage, &a.id).await.unwrap();
    let counts = storage.count_by_link(&[a.id.clone()]).await.unwrap();
    assert!(counts.is_empty());
}

#[tokio::test]
async fn test_factory_memory_url() {
    let stores = StorageFactory::create_from_url("memory://").await.unwrap();
    assert_eq!(stores.health.backend_name(), "memory");
    stores.health.ping().await.unwrap();
}

#[test]
fn test_infer_backend() {
    assert_eq!(infer_backend_from_url("sqlite://x.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("postgres://h/db").unwrap(), "postgres");
    assert!(infer_backend_from_url("redis://h").is_err());
}
