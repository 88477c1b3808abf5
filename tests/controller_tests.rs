//! Link list controller tests
//!
//! A counting, failure-injecting wrapper around the memory backend checks
//! which store calls each operation issues.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use openlink::errors::{OpenLinkError, Result};
use openlink::links::{LinkField, LinkListController, ReorderIntent, SyncState};
use openlink::storage::{
    Link, LinkFilter, LinkStore, LinkUpdate, MemoryStorage, NewLink, NewProfile, ProfileStore,
};

const OWNER: &str = "owner-1";

struct FlakyLinks {
    inner: Arc<MemoryStorage>,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    creates: AtomicUsize,
    fail_updates_for: Mutex<HashSet<String>>,
    fail_deletes: AtomicBool,
}

impl FlakyLinks {
    fn new(inner: Arc<MemoryStorage>) -> Self {
        Self {
            inner,
            updates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            fail_updates_for: Mutex::new(HashSet::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }

    fn fail_updates_of(&self, id: &str) {
        self.fail_updates_for.lock().unwrap().insert(id.to_string());
    }

    fn clear_failures(&self) {
        self.fail_updates_for.lock().unwrap().clear();
    }

    fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkStore for FlakyLinks {
    async fn create(&self, owner_id: &str, link: NewLink) -> Result<Link> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        LinkStore::create(self.inner.as_ref(), owner_id, link).await
    }

    async fn get(&self, id: &str) -> Result<Option<Link>> {
        LinkStore::get(self.inner.as_ref(), id).await
    }

    async fn update(&self, id: &str, update: LinkUpdate) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates_for.lock().unwrap().contains(id) {
            return Err(OpenLinkError::persistence("injected update failure"));
        }
        LinkStore::update(self.inner.as_ref(), id, update).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(OpenLinkError::persistence("injected delete failure"));
        }
        LinkStore::delete(self.inner.as_ref(), id).await
    }

    async fn list(&self, owner_id: &str, filter: LinkFilter) -> Result<Vec<Link>> {
        self.inner.list(owner_id, filter).await
    }
}

type Fixture = (Arc<MemoryStorage>, Arc<FlakyLinks>, LinkListController, Vec<String>);

/// Owner with three links at orders 0, 1, 2 (titles a, b, c)
async fn setup() -> Fixture {
    setup_with_orders(&[0, 1, 2]).await
}

async fn setup_with_orders(orders: &[i32]) -> Fixture {
    let memory = Arc::new(MemoryStorage::new());
    ProfileStore::create(
        memory.as_ref(),
        NewProfile {
            id: OWNER.to_string(),
            username: Some("jane".to_string()),
            display_name: None,
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::new();
    for (order, title) in orders.iter().zip(["a", "b", "c"]) {
        let link = LinkStore::create(
            memory.as_ref(),
            OWNER,
            NewLink {
                title: Some(title.to_string()),
                target_url: Some(format!("https://{}.example.com/", title)),
                order: *order,
                is_active: true,
            },
        )
        .await
        .unwrap();
        ids.push(link.id);
    }

    let links = Arc::new(FlakyLinks::new(memory.clone()));
    let controller = LinkListController::load(OWNER, links.clone(), memory.clone())
        .await
        .unwrap();
    (memory, links, controller, ids)
}

async fn stored_ids(memory: &MemoryStorage) -> Vec<String> {
    memory
        .list(OWNER, LinkFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect()
}

#[tokio::test]
async fn test_load_sorts_by_order() {
    let (_, _, controller, ids) = setup().await;
    assert_eq!(controller.ids(), ids);
    assert!(controller.entries().iter().all(|e| e.sync == SyncState::Synced));
}

#[tokio::test]
async fn test_reorder_same_position_issues_no_writes() {
    let (_, links, mut controller, ids) = setup().await;

    for (index, id) in ids.iter().enumerate() {
        let outcome = controller
            .reorder(&ReorderIntent {
                moved_id: id.clone(),
                from_index: index,
                to_index: index,
            })
            .await
            .unwrap();
        assert!(outcome.written.is_empty());
        assert!(outcome.is_complete());
    }
    assert_eq!(links.update_calls(), 0);
}

#[tokio::test]
async fn test_reorder_moves_and_persists() {
    let (memory, links, mut controller, ids) = setup().await;

    let outcome = controller
        .reorder(&ReorderIntent {
            moved_id: ids[0].clone(),
            from_index: 0,
            to_index: 2,
        })
        .await
        .unwrap();

    let expected = vec![ids[1].clone(), ids[2].clone(), ids[0].clone()];
    assert_eq!(controller.ids(), expected);
    assert!(outcome.is_complete());
    assert_eq!(outcome.written.len(), 3);
    assert_eq!(links.update_calls(), 3);
    assert_eq!(stored_ids(&memory).await, expected);
}

#[tokio::test]
async fn test_reorder_partial_failure_is_reported() {
    let (_, links, mut controller, ids) = setup().await;
    links.fail_updates_of(&ids[1]);

    let outcome = controller
        .reorder(&ReorderIntent {
            moved_id: ids[2].clone(),
            from_index: 2,
            to_index: 0,
        })
        .await
        .unwrap();

    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, ids[1]);
    assert_eq!(outcome.written.len(), 2);

    // 内存中的新顺序保留，不回滚
    assert_eq!(controller.ids(), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
    assert_eq!(controller.get(&ids[1]).unwrap().sync, SyncState::Failed);
    assert_eq!(controller.get(&ids[0]).unwrap().sync, SyncState::Synced);
}

#[tokio::test]
async fn test_reorder_rewrites_values_left_stale_by_failure() {
    let (memory, links, mut controller, ids) = setup().await;
    links.fail_updates_of(&ids[0]);

    let first = controller
        .reorder(&ReorderIntent {
            moved_id: ids[0].clone(),
            from_index: 0,
            to_index: 2,
        })
        .await
        .unwrap();
    assert_eq!(first.failed.len(), 1);

    links.clear_failures();
    let second = controller
        .reorder(&ReorderIntent {
            moved_id: ids[1].clone(),
            from_index: 0,
            to_index: 1,
        })
        .await
        .unwrap();

    // a 仍在末位，但存储中的值过期，必须重写
    let expected = vec![ids[2].clone(), ids[1].clone(), ids[0].clone()];
    assert!(second.is_complete());
    assert!(second.written.contains(&ids[0]));
    assert_eq!(controller.ids(), expected);
    assert_eq!(stored_ids(&memory).await, expected);
    assert!(controller.entries().iter().all(|e| e.sync == SyncState::Synced));
}

#[tokio::test]
async fn test_reorder_rejects_bad_intents() {
    let (_, links, mut controller, ids) = setup().await;

    let out_of_bounds = controller
        .reorder(&ReorderIntent {
            moved_id: ids[0].clone(),
            from_index: 0,
            to_index: 3,
        })
        .await;
    assert!(matches!(out_of_bounds, Err(OpenLinkError::Validation(_))));

    let stale = controller
        .reorder(&ReorderIntent {
            moved_id: ids[0].clone(),
            from_index: 1,
            to_index: 2,
        })
        .await;
    assert!(matches!(stale, Err(OpenLinkError::Validation(_))));

    assert_eq!(links.update_calls(), 0);
    assert_eq!(controller.ids(), ids);
}

#[tokio::test]
async fn test_add_prepends_inactive_empty_link() {
    let (memory, _, mut controller, ids) = setup().await;

    let link = controller.add().await.unwrap();

    assert_eq!(controller.ids()[0], link.id);
    assert_eq!(controller.len(), 4);
    assert!(!link.is_active);
    assert_eq!(link.title.as_deref(), Some(""));
    assert_eq!(link.target_url.as_deref(), Some(""));
    assert!(link.order < 0);

    let stored = stored_ids(&memory).await;
    assert_eq!(stored[0], link.id);
    assert_eq!(&stored[1..], ids.as_slice());
}

#[tokio::test]
async fn test_add_renumbers_when_order_values_are_exhausted() {
    let (memory, links, mut controller, ids) =
        setup_with_orders(&[i32::MIN, i32::MIN + 1, i32::MIN + 2]).await;

    let link = controller.add().await.unwrap();

    assert_eq!(link.order, 0);
    assert_eq!(links.update_calls(), 3);
    let orders: Vec<i32> = controller.entries().iter().map(|e| e.link.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let stored = memory.list(OWNER, LinkFilter::default()).await.unwrap();
    let stored_orders: Vec<(String, i32)> = stored.into_iter().map(|l| (l.id, l.order)).collect();
    assert_eq!(
        stored_orders,
        vec![
            (link.id.clone(), 0),
            (ids[0].clone(), 1),
            (ids[1].clone(), 2),
            (ids[2].clone(), 3),
        ]
    );
    assert!(controller.entries().iter().all(|e| e.sync == SyncState::Synced));
}

#[tokio::test]
async fn test_add_renumber_failure_still_inserts() {
    let (memory, links, mut controller, ids) =
        setup_with_orders(&[i32::MIN, i32::MIN + 1, i32::MIN + 2]).await;
    links.fail_updates_of(&ids[1]);

    let link = controller.add().await.unwrap();

    assert_eq!(link.order, 0);
    assert_eq!(controller.ids()[0], link.id);
    assert_eq!(controller.get(&ids[1]).unwrap().sync, SyncState::Failed);
    assert_eq!(controller.get(&ids[0]).unwrap().sync, SyncState::Synced);
    assert_eq!(controller.get(&ids[2]).unwrap().sync, SyncState::Synced);

    let stale = LinkStore::get(memory.as_ref(), &ids[1]).await.unwrap().unwrap();
    assert_eq!(stale.order, i32::MIN + 1);

    // 下一次写入顺序时补写过期的值
    links.clear_failures();
    let outcome = controller
        .reorder(&ReorderIntent {
            moved_id: ids[2].clone(),
            from_index: 3,
            to_index: 2,
        })
        .await
        .unwrap();
    assert!(outcome.is_complete());
    let expected = vec![link.id.clone(), ids[0].clone(), ids[2].clone(), ids[1].clone()];
    assert_eq!(controller.ids(), expected);
    assert_eq!(stored_ids(&memory).await, expected);
}

#[tokio::test]
async fn test_add_without_profile_is_creation_error() {
    let memory = Arc::new(MemoryStorage::new());
    let links = Arc::new(FlakyLinks::new(memory.clone()));
    let mut controller = LinkListController::from_snapshot("ghost", links.clone(), memory, Vec::new());

    let result = controller.add().await;
    assert!(matches!(result, Err(OpenLinkError::Creation(_))));
    assert_eq!(links.creates.load(Ordering::SeqCst), 0);
    assert!(controller.is_empty());
}

#[tokio::test]
async fn test_edit_then_commit_writes_once() {
    let (memory, links, mut controller, ids) = setup().await;

    controller.edit(&ids[0], LinkField::Title, "Portfolio").unwrap();
    assert_eq!(controller.get(&ids[0]).unwrap().sync, SyncState::Dirty);
    assert_eq!(links.update_calls(), 0);

    assert!(controller.commit(&ids[0]).await.unwrap());
    assert_eq!(links.update_calls(), 1);
    assert_eq!(controller.get(&ids[0]).unwrap().sync, SyncState::Synced);

    let stored = LinkStore::get(memory.as_ref(), &ids[0]).await.unwrap().unwrap();
    assert_eq!(stored.title.as_deref(), Some("Portfolio"));

    // 没有变化不再写入
    assert!(!controller.commit(&ids[0]).await.unwrap());
    assert_eq!(links.update_calls(), 1);
}

#[tokio::test]
async fn test_commit_failure_keeps_local_edit() {
    let (memory, links, mut controller, ids) = setup().await;
    links.fail_updates_of(&ids[1]);

    controller
        .edit(&ids[1], LinkField::TargetUrl, "https://new.example.com/")
        .unwrap();
    let result = controller.commit(&ids[1]).await;

    assert!(matches!(result, Err(OpenLinkError::Persistence(_))));
    let entry = controller.get(&ids[1]).unwrap();
    assert_eq!(entry.sync, SyncState::Failed);
    assert_eq!(entry.link.target_url.as_deref(), Some("https://new.example.com/"));
    assert_eq!(entry.persisted_target_url(), Some("https://b.example.com/"));

    let stored = LinkStore::get(memory.as_ref(), &ids[1]).await.unwrap().unwrap();
    assert_eq!(stored.target_url.as_deref(), Some("https://b.example.com/"));
}

#[tokio::test]
async fn test_toggle_active_keeps_order() {
    let (memory, links, mut controller, ids) = setup().await;

    assert!(!controller.toggle_active(&ids[1]).await.unwrap());
    assert_eq!(links.update_calls(), 1);

    let stored = LinkStore::get(memory.as_ref(), &ids[1]).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.order, 1);
    assert_eq!(controller.ids(), ids);

    let active = memory.list(OWNER, LinkFilter::active()).await.unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn test_set_active_always_writes() {
    let (_, links, mut controller, ids) = setup().await;

    controller.set_active(&ids[0], true).await.unwrap();
    controller.set_active(&ids[0], true).await.unwrap();
    assert_eq!(links.update_calls(), 2);
}

#[tokio::test]
async fn test_delete_removes_from_view_and_store() {
    let (memory, _, mut controller, ids) = setup().await;

    controller.delete(&ids[1]).await.unwrap();

    assert_eq!(controller.ids(), vec![ids[0].clone(), ids[2].clone()]);
    assert_eq!(stored_ids(&memory).await, vec![ids[0].clone(), ids[2].clone()]);
    assert!(controller.unreconciled_deletes().is_empty());
}

#[tokio::test]
async fn test_delete_failure_is_unreconciled() {
    let (memory, links, mut controller, ids) = setup().await;
    links.fail_deletes.store(true, Ordering::SeqCst);

    let result = controller.delete(&ids[0]).await;

    assert!(matches!(result, Err(OpenLinkError::Persistence(_))));
    assert_eq!(controller.len(), 2);
    assert_eq!(controller.unreconciled_deletes(), &[ids[0].clone()]);
    assert_eq!(stored_ids(&memory).await.len(), 3);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (_, links, mut controller, _) = setup().await;

    assert!(matches!(
        controller.edit("missing", LinkField::Title, "x"),
        Err(OpenLinkError::NotFound(_))
    ));
    assert!(matches!(
        controller.set_active("missing", true).await,
        Err(OpenLinkError::NotFound(_))
    ));
    assert_eq!(links.update_calls(), 0);
}
