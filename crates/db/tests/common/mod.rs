//! Store behaviour shared by the in-memory and PostgreSQL test suites.
//!
//! Each check takes a `&dyn TodoStore` so both implementations are held to
//! the same contract.

#![allow(dead_code)]

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, SubsecRound, TimeZone, Utc};
use todo_core::todo::SortField;
use todo_core::types::TodoId;
use todo_db::models::todo::{TodoItem, UpdateTodo};
use todo_db::store::{PageRequest, StoreError, TodoStore};
use uuid::Uuid;

pub const ALICE: &str = "auth0|alice";
pub const BOB: &str = "auth0|bob";

/// Build an item created `minutes_ago` minutes before a fixed instant.
pub fn new_item(user_id: &str, name: &str, minutes_ago: i64, due_date: Option<NaiveDate>) -> TodoItem {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap().trunc_subsecs(6);
    TodoItem {
        user_id: user_id.to_string(),
        todo_id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: base - Duration::minutes(minutes_ago),
        due_date,
        done: false,
        attachment_url: None,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Seed `n` items for `user_id`, newest first, and return them in that order.
pub async fn seed(store: &dyn TodoStore, user_id: &str, n: usize) -> Vec<TodoItem> {
    let mut created = Vec::with_capacity(n);
    for i in 0..n {
        let item = new_item(user_id, &format!("todo {i}"), i as i64, None);
        created.push(store.create(item).await.expect("create should succeed"));
    }
    created
}

/// Walk every page and return the page sizes and the ids seen.
pub async fn walk_pages(
    store: &dyn TodoStore,
    user_id: &str,
    limit: u32,
    sort: SortField,
) -> (Vec<usize>, Vec<TodoId>) {
    let mut sizes = Vec::new();
    let mut ids = Vec::new();
    let mut cursor = None;
    loop {
        let page = store
            .list_page(user_id, &PageRequest { cursor: cursor.clone(), limit, sort })
            .await
            .expect("list_page should succeed");
        sizes.push(page.items.len());
        ids.extend(page.items.iter().map(|item| item.todo_id));
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
        assert!(sizes.len() <= 100, "paging did not terminate");
    }
    (sizes, ids)
}

pub async fn check_pages_split_two_two_one(store: &dyn TodoStore) {
    let created = seed(store, ALICE, 5).await;

    let (sizes, ids) = walk_pages(store, ALICE, 2, SortField::CreatedAt).await;
    assert_eq!(sizes, vec![2, 2, 1]);

    let expected: Vec<TodoId> = created.iter().map(|item| item.todo_id).collect();
    assert_eq!(ids, expected, "pages must be newest first");
}

pub async fn check_paging_enumerates_exactly_the_users_items(store: &dyn TodoStore) {
    seed(store, ALICE, 7).await;
    seed(store, BOB, 4).await;

    let expected: HashSet<TodoId> = store
        .list_all(ALICE)
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.todo_id)
        .collect();
    assert_eq!(expected.len(), 7);

    for sort in [SortField::CreatedAt, SortField::DueDate] {
        let (_, ids) = walk_pages(store, ALICE, 3, sort).await;
        let seen: HashSet<TodoId> = ids.iter().copied().collect();
        assert_eq!(seen.len(), ids.len(), "no duplicates across pages");
        assert_eq!(seen, expected, "no omissions and no foreign items");
    }
}

pub async fn check_exact_multiple_has_no_trailing_page(store: &dyn TodoStore) {
    seed(store, ALICE, 4).await;
    let (sizes, _) = walk_pages(store, ALICE, 2, SortField::CreatedAt).await;
    assert_eq!(sizes, vec![2, 2]);
}

pub async fn check_due_date_order_puts_undated_last(store: &dyn TodoStore) {
    let early = store.create(new_item(ALICE, "early", 0, date(2024, 1, 5))).await.unwrap();
    let undated = store.create(new_item(ALICE, "undated", 1, None)).await.unwrap();
    let late = store.create(new_item(ALICE, "late", 2, date(2024, 3, 1))).await.unwrap();
    let undated_2 = store.create(new_item(ALICE, "undated 2", 3, None)).await.unwrap();
    let mid = store.create(new_item(ALICE, "mid", 4, date(2024, 2, 1))).await.unwrap();

    let (sizes, ids) = walk_pages(store, ALICE, 2, SortField::DueDate).await;
    assert_eq!(sizes, vec![2, 2, 1]);

    assert_eq!(&ids[..3], &[late.todo_id, mid.todo_id, early.todo_id]);
    let tail: HashSet<TodoId> = ids[3..].iter().copied().collect();
    assert_eq!(tail, HashSet::from([undated.todo_id, undated_2.todo_id]));
}

pub async fn check_update_is_full_replace(store: &dyn TodoStore) {
    let item = new_item(ALICE, "Buy milk", 0, date(2024, 1, 10));
    let created = store.create(item).await.unwrap();

    let updated = store
        .update(
            ALICE,
            created.todo_id,
            &UpdateTodo {
                name: "Buy oat milk".into(),
                due_date: None,
                done: true,
            },
        )
        .await
        .unwrap()
        .expect("item exists");
    assert_eq!(updated.name, "Buy oat milk");
    assert_eq!(updated.due_date, None, "omitted due date is cleared, not kept");
    assert!(updated.done);
    assert_eq!(updated.created_at, created.created_at);

    let fetched = store.get(ALICE, created.todo_id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

pub async fn check_update_missing_item_is_noop(store: &dyn TodoStore) {
    let fields = UpdateTodo {
        name: "ghost".into(),
        due_date: None,
        done: true,
    };
    let missing = Uuid::new_v4();
    let result = store.update(ALICE, missing, &fields).await.unwrap();
    assert!(result.is_none());
    assert!(!store.exists(ALICE, missing).await.unwrap());
}

pub async fn check_delete_is_idempotent(store: &dyn TodoStore) {
    let created = store.create(new_item(ALICE, "gone", 0, None)).await.unwrap();

    store.delete(ALICE, created.todo_id).await.unwrap();
    store.delete(ALICE, created.todo_id).await.unwrap();
    assert!(store.get(ALICE, created.todo_id).await.unwrap().is_none());
}

pub async fn check_items_are_scoped_by_owner(store: &dyn TodoStore) {
    let created = store.create(new_item(ALICE, "mine", 0, None)).await.unwrap();

    assert!(store.exists(ALICE, created.todo_id).await.unwrap());
    assert!(!store.exists(BOB, created.todo_id).await.unwrap());
    assert!(store.get(BOB, created.todo_id).await.unwrap().is_none());
    assert!(store.list_all(BOB).await.unwrap().is_empty());

    // Bob cannot touch Alice's item.
    let fields = UpdateTodo {
        name: "hijacked".into(),
        due_date: None,
        done: true,
    };
    assert!(store.update(BOB, created.todo_id, &fields).await.unwrap().is_none());
    store.delete(BOB, created.todo_id).await.unwrap();
    store
        .attach_upload(BOB, created.todo_id, "https://evil.example/x")
        .await
        .unwrap();

    let still_mine = store.get(ALICE, created.todo_id).await.unwrap().unwrap();
    assert_eq!(still_mine, created);
}

pub async fn check_attach_upload_sets_url(store: &dyn TodoStore) {
    let created = store.create(new_item(ALICE, "with file", 0, None)).await.unwrap();
    let url = format!("https://todo-attachments.s3.amazonaws.com/{}", created.todo_id);

    store.attach_upload(ALICE, created.todo_id, &url).await.unwrap();

    let fetched = store.get(ALICE, created.todo_id).await.unwrap().unwrap();
    assert_eq!(fetched.attachment_url.as_deref(), Some(url.as_str()));
    assert_eq!(fetched.name, created.name);
}

pub async fn check_foreign_cursor_is_rejected(store: &dyn TodoStore) {
    seed(store, ALICE, 3).await;
    let page = store
        .list_page(
            ALICE,
            &PageRequest {
                cursor: None,
                limit: 1,
                sort: SortField::CreatedAt,
            },
        )
        .await
        .unwrap();
    let token = page.next_cursor.expect("more pages remain");

    let as_bob = store
        .list_page(
            BOB,
            &PageRequest {
                cursor: Some(token.clone()),
                limit: 1,
                sort: SortField::CreatedAt,
            },
        )
        .await;
    assert!(matches!(as_bob, Err(StoreError::InvalidCursor(_))));

    let other_order = store
        .list_page(
            ALICE,
            &PageRequest {
                cursor: Some(token),
                limit: 1,
                sort: SortField::DueDate,
            },
        )
        .await;
    assert!(matches!(other_order, Err(StoreError::InvalidCursor(_))));

    let garbage = store
        .list_page(
            ALICE,
            &PageRequest {
                cursor: Some("not-a-cursor".into()),
                limit: 1,
                sort: SortField::CreatedAt,
            },
        )
        .await;
    assert!(matches!(garbage, Err(StoreError::InvalidCursor(_))));
}
