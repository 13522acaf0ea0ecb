//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use snipbin_server::{create_app, AppState, Config, MemoryStore, RedbStore};
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) fn test_config() -> Config {
    Config {
        port: 0,
        db_path: None,
        max_content_chars: 500_000,
    }
}

pub(crate) fn memory_server() -> TestServer {
    memory_server_with_max(test_config().max_content_chars)
}

pub(crate) fn memory_server_with_max(max_content_chars: usize) -> TestServer {
    let config = Config {
        max_content_chars,
        ..test_config()
    };
    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn redb_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let store = RedbStore::open(dir.path()).expect("open store");
    let state = AppState::new(test_config(), Arc::new(store));
    let server = TestServer::new(create_app(state)).expect("server");
    (server, dir)
}
