use std::fs;

use camino::Utf8PathBuf;

use champ_picker::domain::{ChampionId, Version};
use champ_picker::store::Store;

fn temp_store() -> (tempfile::TempDir, Store) {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("cache")).unwrap();
    (temp, Store::new_with_root(root))
}

#[test]
fn atomic_write_creates_parents_and_leaves_no_temp_files() {
    let (_temp, store) = temp_store();
    let version: Version = "14.20.1".parse().unwrap();
    let id: ChampionId = "Ahri".parse().unwrap();
    let path = store.icon_path(&id, &version);

    Store::write_bytes_atomic(&path, b"first").unwrap();
    Store::write_bytes_atomic(&path, b"second").unwrap();

    assert!(store.exists(&path));
    assert_eq!(fs::read(path.as_std_path()).unwrap(), b"second");
    let entries = fs::read_dir(store.icon_dir(&version).as_std_path())
        .unwrap()
        .count();
    assert_eq!(entries, 1);
}

#[test]
fn cached_versions_lists_directories_sorted() {
    let (_temp, store) = temp_store();
    assert!(store.cached_versions().unwrap().is_empty());

    for version in ["14.20.1", "14.19.1"] {
        store.ensure_icon_dir(&version.parse().unwrap()).unwrap();
    }
    fs::write(store.icons_root().join("stray.txt").as_std_path(), b"x").unwrap();

    assert_eq!(store.cached_versions().unwrap(), vec!["14.19.1", "14.20.1"]);
}

#[test]
fn clear_icons_reports_whether_anything_was_removed() {
    let (_temp, store) = temp_store();
    assert!(!store.clear_icons().unwrap());

    let version: Version = "14.20.1".parse().unwrap();
    let path = store.icon_path(&"Lux".parse().unwrap(), &version);
    Store::write_bytes_atomic(&path, b"icon").unwrap();

    assert!(store.clear_icons().unwrap());
    assert!(!store.exists(&path));
    assert!(store.cache_root().as_std_path().exists());
}
