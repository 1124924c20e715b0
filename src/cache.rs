use std::time::Instant;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::app::{Progress, ProgressEvent, ProgressSink};
use crate::ddragon::DataDragonClient;
use crate::domain::{ChampionId, Version};
use crate::error::PickerError;
use crate::roster::Roster;
use crate::store::Store;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOutcome {
    Hit,
    Downloaded,
    Failed,
}

impl CacheOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "cache",
            CacheOutcome::Downloaded => "download",
            CacheOutcome::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheReport {
    pub total: usize,
    pub hits: usize,
    pub downloaded: usize,
    pub failed: Vec<String>,
}

impl CacheReport {
    fn record(&mut self, id: &ChampionId, outcome: CacheOutcome) {
        match outcome {
            CacheOutcome::Hit => self.hits += 1,
            CacheOutcome::Downloaded => self.downloaded += 1,
            CacheOutcome::Failed => self.failed.push(id.to_string()),
        }
    }
}

pub struct IconCache<'a, C: DataDragonClient + ?Sized> {
    store: &'a Store,
    client: &'a C,
}

impl<'a, C: DataDragonClient + ?Sized> IconCache<'a, C> {
    pub fn new(store: &'a Store, client: &'a C) -> Self {
        Self { store, client }
    }

    pub fn cached_path(&self, id: &ChampionId, version: &Version) -> Option<Utf8PathBuf> {
        let path = self.store.icon_path(id, version);
        self.store.exists(&path).then_some(path)
    }

    pub fn ensure_cached(&self, id: &ChampionId, version: &Version) -> Option<Utf8PathBuf> {
        let (path, _) = self.ensure_cached_with_outcome(id, version);
        path
    }

    fn ensure_cached_with_outcome(
        &self,
        id: &ChampionId,
        version: &Version,
    ) -> (Option<Utf8PathBuf>, CacheOutcome) {
        if let Some(path) = self.cached_path(id, version) {
            tracing::debug!(champion = %id, "icon cache hit");
            return (Some(path), CacheOutcome::Hit);
        }
        match self.download(id, version) {
            Ok(path) => (Some(path), CacheOutcome::Downloaded),
            Err(err) => {
                tracing::warn!(champion = %id, version = %version, error = %err, "failed to cache icon");
                (None, CacheOutcome::Failed)
            }
        }
    }

    fn download(&self, id: &ChampionId, version: &Version) -> Result<Utf8PathBuf, PickerError> {
        let bytes = self.client.fetch_icon_bytes(id, version)?;
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(PickerError::DataFormat(format!(
                "icon for {id} is not a PNG image"
            )));
        }
        let path = self.store.icon_path(id, version);
        Store::write_bytes_atomic(&path, &bytes)?;
        Ok(path)
    }

    pub fn populate_all(
        &self,
        roster: &Roster,
        version: &Version,
        sink: &dyn ProgressSink,
    ) -> CacheReport {
        let total = roster.len();
        let mut report = CacheReport {
            total,
            ..CacheReport::default()
        };
        if let Err(err) = self.store.ensure_icon_dir(version) {
            tracing::warn!(error = %err, "failed to create icon directory");
        }

        let start = Instant::now();
        for (index, champion) in roster.iter().enumerate() {
            let (_, outcome) = self.ensure_cached_with_outcome(&champion.id, version);
            report.record(&champion.id, outcome);
            sink.event(ProgressEvent {
                message: format!("icon {} ({})", champion.id, outcome.as_str()),
                progress: Some(Progress {
                    current: index + 1,
                    total,
                }),
                elapsed: Some(start.elapsed()),
            });
        }

        tracing::info!(
            total,
            hits = report.hits,
            downloaded = report.downloaded,
            failed = report.failed.len(),
            "icon cache pass complete"
        );
        report
    }
}
