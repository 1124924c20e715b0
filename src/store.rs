use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use tempfile::Builder;

use crate::domain::{ChampionId, Version};
use crate::error::PickerError;

/// On-disk layout of the icon cache: `<root>/icons/<version>/<id>.png`.
#[derive(Debug, Clone)]
pub struct Store {
    cache_root: Utf8PathBuf,
}

impl Store {
    pub fn new() -> Result<Self, PickerError> {
        let cache_root = BaseDirs::new()
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.cache_dir().join("champ-picker")).ok())
            .ok_or_else(|| PickerError::LocalIo("unable to resolve cache directory".to_string()))?;
        Ok(Self { cache_root })
    }

    pub fn new_with_root(cache_root: Utf8PathBuf) -> Self {
        Self { cache_root }
    }

    pub fn cache_root(&self) -> &Utf8Path {
        &self.cache_root
    }

    pub fn icons_root(&self) -> Utf8PathBuf {
        self.cache_root.join("icons")
    }

    pub fn icon_dir(&self, version: &Version) -> Utf8PathBuf {
        self.icons_root().join(version.as_str())
    }

    pub fn icon_path(&self, id: &ChampionId, version: &Version) -> Utf8PathBuf {
        self.icon_dir(version).join(format!("{id}.png"))
    }

    pub fn ensure_icon_dir(&self, version: &Version) -> Result<(), PickerError> {
        fs::create_dir_all(self.icon_dir(version).as_std_path())
            .map_err(|err| PickerError::LocalIo(err.to_string()))
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().is_file()
    }

    pub fn clear_icons(&self) -> Result<bool, PickerError> {
        let root = self.icons_root();
        if !root.as_std_path().exists() {
            return Ok(false);
        }
        fs::remove_dir_all(root.as_std_path())
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        Ok(true)
    }

    pub fn cached_versions(&self) -> Result<Vec<String>, PickerError> {
        let root = self.icons_root();
        if !root.as_std_path().exists() {
            return Ok(Vec::new());
        }
        let mut versions = Vec::new();
        let entries =
            fs::read_dir(root.as_std_path()).map_err(|err| PickerError::LocalIo(err.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|err| PickerError::LocalIo(err.to_string()))?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    versions.push(name.to_string());
                }
            }
        }
        versions.sort();
        Ok(versions)
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), PickerError> {
        let parent = path
            .parent()
            .ok_or_else(|| PickerError::LocalIo("invalid destination path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        let mut temp = Builder::new()
            .prefix("champ-picker-icon")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        temp.write_all(content)
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        temp.flush()
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| PickerError::LocalIo(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_layout_is_keyed_by_version() {
        let store = Store::new_with_root(Utf8PathBuf::from("/tmp/champ-picker"));
        let id: ChampionId = "Ahri".parse().unwrap();
        let version: Version = "14.20.1".parse().unwrap();

        let path = store.icon_path(&id, &version);
        assert!(path.ends_with("icons/14.20.1/Ahri.png"));
        assert!(path.starts_with(store.cache_root()));
    }
}
