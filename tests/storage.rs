use minikanban::backend::{Backend, CreateBoardArgs, CreateCardArgs, CreateListArgs, SqliteBackend};
use minikanban::repositories::{BoardRepository, CardRepository, ListRepository};
use minikanban::storage::LocalStorage;

fn file_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("kanban.db").display())
}

#[tokio::test]
async fn test_in_memory_storage_starts_empty() {
    let storage = LocalStorage::in_memory().await.unwrap();

    assert!(BoardRepository::get_all(storage.conn()).await.unwrap().is_empty());
    storage.ping().await.unwrap();
}

#[tokio::test]
async fn test_repositories_read_back_what_they_write() {
    let storage = LocalStorage::in_memory().await.unwrap();
    let conn = storage.conn();

    let board = BoardRepository::create(conn, "Sprint1".to_string()).await.unwrap();
    let list = ListRepository::create(conn, board.id, "Todo".to_string()).await.unwrap();

    assert_eq!(BoardRepository::get_all(conn).await.unwrap(), vec![board.clone()]);
    assert!(BoardRepository::exists(conn, board.id).await.unwrap());
    assert!(!BoardRepository::exists(conn, board.id + 1).await.unwrap());
    assert_eq!(ListRepository::get_by_id(conn, list.id).await.unwrap(), Some(list.clone()));
    assert_eq!(ListRepository::get_for_board(conn, board.id).await.unwrap(), vec![list]);
    assert!(CardRepository::get_filtered(conn, None, None).await.unwrap().is_empty());
    assert_eq!(CardRepository::delete(conn, 1).await.unwrap(), 0);
}

#[tokio::test]
async fn test_file_database_survives_reopen_without_reusing_ids() {
    let dir = tempfile::tempdir().unwrap();
    let url = file_url(&dir);

    let first = SqliteBackend::connect(&url, 2).await.unwrap();
    first
        .create_board(CreateBoardArgs {
            name: "Sprint1".to_string(),
        })
        .await
        .unwrap();
    first
        .create_list(CreateListArgs {
            board_id: 1,
            name: "Todo".to_string(),
        })
        .await
        .unwrap();
    first.create_card(CreateCardArgs::new(1, "Keep")).await.unwrap();
    first.create_card(CreateCardArgs::new(1, "Drop")).await.unwrap();
    first.delete_card(2).await.unwrap();
    first.shutdown().await.unwrap();

    let second = SqliteBackend::connect(&url, 2).await.unwrap();
    assert_eq!(second.list_boards().await.unwrap().len(), 1);
    assert_eq!(second.get_card(1).await.unwrap().title, "Keep");

    let card = second.create_card(CreateCardArgs::new(1, "New")).await.unwrap();
    assert_eq!(card.id, 3);
    second.shutdown().await.unwrap();
}
