//! E2E tests for the account directory and session gating

use stocktrack_core::accounts::{AccountMap, Directory};
use stocktrack_core::storage::{JsonFileStore, SnapshotStore};
use stocktrack_core::{AuthError, MenuAction, Role, StockError};

#[test]
fn e2e_sign_up_login_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("users.json");

    {
        let mut directory = Directory::open_file(&path);
        directory.sign_up("bob", "x", "x", Role::Admin).unwrap();
        directory.sign_up("vera", "pw", "pw", Role::Viewer).unwrap();
    }

    let directory = Directory::open_file(&path);
    assert!(directory.load_warning().is_none());

    let bob = directory.login("bob", "x").unwrap();
    assert_eq!((bob.username(), bob.role()), ("bob", Role::Admin));

    assert!(matches!(
        directory.login("bob", "y"),
        Err(StockError::Auth(AuthError::IncorrectPassword))
    ));
}

#[test]
fn e2e_users_snapshot_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");

    let mut directory = Directory::open_file(&path);
    directory.sign_up("bob", "x", "x", Role::Admin).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let bob = &value["bob"];
    assert_eq!(bob["role"], "admin");
    assert_eq!(bob["password_hash"].as_str().unwrap().len(), 64);
    assert_ne!(bob["password_hash"], "x");
}

#[test]
fn e2e_users_round_trip_preserves_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    {
        let mut directory = Directory::open_file(&path);
        for name in ["zoe", "adam", "mia"] {
            directory.sign_up(name, name, name, Role::Viewer).unwrap();
        }
    }

    let store: JsonFileStore<AccountMap> = JsonFileStore::new(&path);
    let first = store.load().collection;
    store.save(&first).unwrap();
    let second = store.load().collection;

    assert_eq!(first, second);
    let keys: Vec<_> = second.keys().map(String::as_str).collect();
    assert_eq!(keys, ["adam", "mia", "zoe"]);
}

#[test]
fn e2e_corrupt_users_file_recovers_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    std::fs::write(&path, "not json at all").unwrap();

    let directory = Directory::open_file(&path);
    assert!(directory.is_empty());
    assert!(directory.load_warning().is_some());
    assert!(matches!(
        directory.login("bob", "x"),
        Err(StockError::Auth(AuthError::UnknownUser(_)))
    ));
}

#[test]
fn e2e_session_gates_menu_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let mut directory = Directory::open_file(dir.path().join("users.json"));
    directory.sign_up("admin", "a", "a", Role::Admin).unwrap();
    directory.sign_up("viewer", "v", "v", Role::Viewer).unwrap();

    let admin = directory.login("admin", "a").unwrap();
    let viewer = directory.login("viewer", "v").unwrap();

    for action in [MenuAction::AddItem, MenuAction::EditItem, MenuAction::DeleteItem] {
        assert!(admin.authorize(action).is_ok());
        assert!(viewer.authorize(action).is_err());
    }
    assert!(viewer.authorize(MenuAction::ViewInventory).is_ok());
    assert!(viewer.authorize(MenuAction::Exit).is_ok());
}
