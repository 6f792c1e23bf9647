//! Behaviour every storage backend must share, run against both implementations.

use minikanban::backend::{
    Backend, BackendError, CardFilter, CreateBoardArgs, CreateCardArgs, CreateListArgs, EntityKind, SnapshotBackend,
    SqliteBackend, UpdateCardArgs,
};
use minikanban::storage::LocalStorage;
use tempfile::TempDir;

async fn sqlite() -> SqliteBackend {
    SqliteBackend::new(LocalStorage::in_memory().await.unwrap())
}

fn snapshot(dir: &TempDir) -> SnapshotBackend {
    SnapshotBackend::open(dir.path().join("data.json"), false).unwrap()
}

fn board(name: &str) -> CreateBoardArgs {
    CreateBoardArgs { name: name.to_string() }
}

fn list(board_id: i64, name: &str) -> CreateListArgs {
    CreateListArgs {
        board_id,
        name: name.to_string(),
    }
}

fn filter(status: Option<&str>, assignee: Option<&str>) -> CardFilter {
    CardFilter {
        status: status.map(str::to_string),
        assignee: assignee.map(str::to_string),
    }
}

/// Board 1 with lists 1 ("Todo") and 2 ("Done").
async fn seed(backend: &dyn Backend) {
    backend.create_board(board("Sprint1")).await.unwrap();
    backend.create_list(list(1, "Todo")).await.unwrap();
    backend.create_list(list(1, "Done")).await.unwrap();
}

async fn ids_are_assigned_in_creation_order(backend: &dyn Backend) {
    for n in 1..=3 {
        let board = backend.create_board(board(&format!("Board {n}"))).await.unwrap();
        assert_eq!(board.id, n);
    }
    for n in 1..=2 {
        let list = backend.create_list(list(2, &format!("List {n}"))).await.unwrap();
        assert_eq!(list.id, n);
        assert_eq!(list.board_id, 2);
    }
    for n in 1..=3 {
        let card = backend.create_card(CreateCardArgs::new(1, format!("Card {n}"))).await.unwrap();
        assert_eq!(card.id, n);
    }

    let names: Vec<String> = backend.list_boards().await.unwrap().into_iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["Board 1", "Board 2", "Board 3"]);
}

async fn create_list_requires_existing_board(backend: &dyn Backend) {
    let err = backend.create_list(list(42, "Orphan")).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::ParentNotFound {
            kind: EntityKind::Board,
            id: 42
        }
    ));

    // Nothing was inserted: the first real list still gets id 1
    backend.create_board(board("Real")).await.unwrap();
    assert!(backend.list_lists_by_board(1).await.unwrap().is_empty());
    let created = backend.create_list(list(1, "Todo")).await.unwrap();
    assert_eq!(created.id, 1);
}

async fn lists_by_board_filters_and_checks_board(backend: &dyn Backend) {
    backend.create_board(board("A")).await.unwrap();
    backend.create_board(board("B")).await.unwrap();
    backend.create_list(list(1, "A1")).await.unwrap();
    backend.create_list(list(2, "B1")).await.unwrap();
    backend.create_list(list(1, "A2")).await.unwrap();

    let names: Vec<String> = backend
        .list_lists_by_board(1)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["A1", "A2"]);

    let err = backend.list_lists_by_board(7).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::ParentNotFound {
            kind: EntityKind::Board,
            id: 7
        }
    ));
}

async fn create_card_requires_existing_list(backend: &dyn Backend) {
    backend.create_board(board("Sprint1")).await.unwrap();

    let err = backend.create_card(CreateCardArgs::new(5, "Lost")).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::ParentNotFound {
            kind: EntityKind::List,
            id: 5
        }
    ));
    assert!(backend.list_cards(CardFilter::default()).await.unwrap().is_empty());
}

async fn create_card_defaults_status(backend: &dyn Backend) {
    seed(backend).await;

    let plain = backend.create_card(CreateCardArgs::new(1, "Fix bug")).await.unwrap();
    assert_eq!(plain.status, "todo");
    assert_eq!(plain.description, None);
    assert_eq!(plain.assignee, None);

    let mut args = CreateCardArgs::new(2, "Ship it");
    args.status = Some("done".to_string());
    args.assignee = Some("alice".to_string());
    args.description = Some("Release 1.0".to_string());
    let full = backend.create_card(args).await.unwrap();
    assert_eq!(full.status, "done");
    assert_eq!(full.assignee.as_deref(), Some("alice"));
    assert_eq!(full.description.as_deref(), Some("Release 1.0"));
    assert_eq!(backend.get_card(full.id).await.unwrap(), full);
}

async fn get_missing_card_is_not_found(backend: &dyn Backend) {
    let err = backend.get_card(3).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::NotFound {
            kind: EntityKind::Card,
            id: 3
        }
    ));
}

async fn list_cards_combines_filters(backend: &dyn Backend) {
    seed(backend).await;
    for (title, status, assignee) in [
        ("one", "todo", Some("alice")),
        ("two", "done", Some("alice")),
        ("three", "todo", Some("bob")),
        ("four", "todo", None),
    ] {
        let mut args = CreateCardArgs::new(1, title);
        args.status = Some(status.to_string());
        args.assignee = assignee.map(str::to_string);
        backend.create_card(args).await.unwrap();
    }

    let titles = |cards: Vec<minikanban::card::Model>| cards.into_iter().map(|c| c.title).collect::<Vec<_>>();

    assert_eq!(
        titles(backend.list_cards(filter(None, None)).await.unwrap()),
        vec!["one", "two", "three", "four"]
    );
    assert_eq!(
        titles(backend.list_cards(filter(Some("todo"), None)).await.unwrap()),
        vec!["one", "three", "four"]
    );
    assert_eq!(
        titles(backend.list_cards(filter(None, Some("alice"))).await.unwrap()),
        vec!["one", "two"]
    );
    assert_eq!(
        titles(backend.list_cards(filter(Some("todo"), Some("alice"))).await.unwrap()),
        vec!["one"]
    );
    assert!(backend
        .list_cards(filter(Some("done"), Some("bob")))
        .await
        .unwrap()
        .is_empty());

    // Empty filter values are ignored
    assert_eq!(backend.list_cards(filter(Some(""), Some(""))).await.unwrap().len(), 4);
}

async fn update_card_merges_supplied_fields(backend: &dyn Backend) {
    seed(backend).await;
    let mut args = CreateCardArgs::new(1, "Fix bug");
    args.description = Some("Crash on start".to_string());
    args.assignee = Some("alice".to_string());
    let card = backend.create_card(args).await.unwrap();

    let updated = backend
        .update_card(
            card.id,
            UpdateCardArgs {
                status: Some("done".to_string()),
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, card.id);
    assert_eq!(updated.list_id, card.list_id);
    assert_eq!(updated.title, "Fix bug");
    assert_eq!(updated.status, "done");
    assert_eq!(updated.description, None);
    assert_eq!(updated.assignee.as_deref(), Some("alice"));
    assert_eq!(backend.get_card(card.id).await.unwrap(), updated);

    let unchanged = backend.update_card(card.id, UpdateCardArgs::default()).await.unwrap();
    assert_eq!(unchanged, updated);

    let err = backend.update_card(99, UpdateCardArgs::default()).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::NotFound {
            kind: EntityKind::Card,
            id: 99
        }
    ));
}

async fn move_card_validates_both_ends(backend: &dyn Backend) {
    seed(backend).await;
    let card = backend.create_card(CreateCardArgs::new(1, "Fix bug")).await.unwrap();

    let err = backend.move_card(99, 2).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::NotFound {
            kind: EntityKind::Card,
            id: 99
        }
    ));

    let err = backend.move_card(card.id, 99).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::ParentNotFound {
            kind: EntityKind::List,
            id: 99
        }
    ));
    assert_eq!(backend.get_card(card.id).await.unwrap(), card);

    let moved = backend.move_card(card.id, 2).await.unwrap();
    assert_eq!(moved.list_id, 2);
    assert_eq!(moved.title, card.title);
    assert_eq!(backend.get_card(card.id).await.unwrap().list_id, 2);
}

async fn delete_card_is_idempotent(backend: &dyn Backend) {
    seed(backend).await;
    let keep = backend.create_card(CreateCardArgs::new(1, "Keep")).await.unwrap();
    let dropped = backend.create_card(CreateCardArgs::new(1, "Drop")).await.unwrap();

    backend.delete_card(dropped.id).await.unwrap();
    let after_first = backend.list_cards(CardFilter::default()).await.unwrap();
    backend.delete_card(dropped.id).await.unwrap();
    let after_second = backend.list_cards(CardFilter::default()).await.unwrap();

    assert_eq!(after_first, vec![keep.clone()]);
    assert_eq!(after_first, after_second);
    assert!(backend.get_card(dropped.id).await.is_err());

    backend.delete_card(12345).await.unwrap();
}

async fn deleted_ids_are_not_reused(backend: &dyn Backend) {
    seed(backend).await;
    backend.create_card(CreateCardArgs::new(1, "First")).await.unwrap();
    let second = backend.create_card(CreateCardArgs::new(1, "Second")).await.unwrap();
    assert_eq!(second.id, 2);

    backend.delete_card(second.id).await.unwrap();
    let third = backend.create_card(CreateCardArgs::new(1, "Third")).await.unwrap();
    assert_eq!(third.id, 3);
}

async fn sprint_scenario(backend: &dyn Backend) {
    let board = backend.create_board(board("Sprint1")).await.unwrap();
    assert_eq!(board.id, 1);

    let list = backend.create_list(list(1, "Todo")).await.unwrap();
    assert_eq!(list.id, 1);

    let card = backend.create_card(CreateCardArgs::new(1, "Fix bug")).await.unwrap();
    assert_eq!(card.id, 1);
    assert_eq!(card.status, "todo");

    let err = backend.move_card(1, 99).await.unwrap_err();
    assert!(matches!(err, BackendError::ParentNotFound { .. }));
    assert_eq!(backend.get_card(1).await.unwrap().list_id, 1);

    let updated = backend
        .update_card(
            1,
            UpdateCardArgs {
                status: Some("done".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "done");
    assert_eq!(updated.title, "Fix bug");
}

async fn health_reports_ok(backend: &dyn Backend) {
    backend.health().await.unwrap();
}

macro_rules! contract_tests {
    ($($check:ident),* $(,)?) => {
        mod sqlite_backend {
            use super::*;
            $(
                #[tokio::test]
                async fn $check() {
                    let backend = sqlite().await;
                    assert_eq!(backend.backend_type(), "sqlite");
                    super::$check(&backend).await;
                }
            )*
        }

        mod snapshot_backend {
            use super::*;
            $(
                #[tokio::test]
                async fn $check() {
                    let dir = tempfile::tempdir().unwrap();
                    let backend = snapshot(&dir);
                    assert_eq!(backend.backend_type(), "snapshot");
                    super::$check(&backend).await;
                }
            )*
        }
    };
}

contract_tests!(
    ids_are_assigned_in_creation_order,
    create_list_requires_existing_board,
    lists_by_board_filters_and_checks_board,
    create_card_requires_existing_list,
    create_card_defaults_status,
    get_missing_card_is_not_found,
    list_cards_combines_filters,
    update_card_merges_supplied_fields,
    move_card_validates_both_ends,
    delete_card_is_idempotent,
    deleted_ids_are_not_reused,
    sprint_scenario,
    health_reports_ok,
);
