//! Configuration round-trip

use tastebook_core::CoreConfig;
use tempfile::TempDir;

#[test]
fn load_or_create_round_trips() {
    let dir = TempDir::new().unwrap();

    let created = CoreConfig::load_or_create(dir.path()).unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.log_level, "info");
    assert!(dir.path().join("tastebook.json").exists());

    let reloaded = CoreConfig::load_or_create(dir.path()).unwrap();
    assert_eq!(reloaded.version, created.version);
    assert_eq!(reloaded.data_dir, created.data_dir);
    assert_eq!(reloaded.db_max_connections, created.db_max_connections);
    assert_eq!(
        reloaded.database_path(),
        dir.path().join("tastebook.db")
    );
}
