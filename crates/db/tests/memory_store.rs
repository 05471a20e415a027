//! Store contract tests against the in-memory implementation.

mod common;

use todo_db::memory::MemoryTodoStore;
use todo_db::store::TodoStore;

#[tokio::test]
async fn pages_of_two_over_five_items_split_two_two_one() {
    common::check_pages_split_two_two_one(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn paging_enumerates_exactly_the_users_items() {
    common::check_paging_enumerates_exactly_the_users_items(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn exact_multiple_has_no_trailing_empty_page() {
    common::check_exact_multiple_has_no_trailing_page(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn due_date_order_puts_undated_items_last() {
    common::check_due_date_order_puts_undated_last(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn update_replaces_all_mutable_fields() {
    common::check_update_is_full_replace(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn update_of_missing_item_is_a_noop() {
    let store = MemoryTodoStore::new();
    common::check_update_missing_item_is_noop(&store).await;
    assert!(store.is_empty().await, "update must not create items");
}

#[tokio::test]
async fn delete_twice_succeeds() {
    common::check_delete_is_idempotent(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn items_are_scoped_by_owner() {
    common::check_items_are_scoped_by_owner(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn attach_upload_records_url() {
    common::check_attach_upload_sets_url(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn cursor_from_other_user_or_order_is_rejected() {
    common::check_foreign_cursor_is_rejected(&MemoryTodoStore::new()).await;
}

#[tokio::test]
async fn list_all_is_newest_first() {
    let store = MemoryTodoStore::new();
    let created = common::seed(&store, common::ALICE, 4).await;

    let all = store.list_all(common::ALICE).await.unwrap();
    assert_eq!(all, created);
    assert_eq!(store.len().await, 4);
}
