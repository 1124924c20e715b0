use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheReport, IconCache};
use crate::config::ResolvedConfig;
use crate::ddragon::DataDragonClient;
use crate::display::{self, DetailView, Grid};
use crate::domain::{ChampionId, Locale, Version};
use crate::error::PickerError;
use crate::roster::{Roster, RosterStore};
use crate::selector::{self, Selection};
use crate::store::Store;

pub const STATUS_VERSION_FAILED: &str = "Failed to fetch latest version.";
pub const STATUS_ROSTER_FAILED: &str = "Failed to fetch champion data.";
pub const STATUS_CACHE_DONE: &str = "Icon cache complete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub progress: Option<Progress>,
    pub elapsed: Option<Duration>,
}

impl ProgressEvent {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            progress: None,
            elapsed: None,
        }
    }
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    SelectRandom { input: String },
    ShowAll,
    Detail(ChampionId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ControlsOpened,
    Render(Grid),
    Detail(DetailView),
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub version: String,
    pub locale: String,
    pub champions: usize,
    pub icon_dir: String,
    pub cache: CacheReport,
    pub synced_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridResult {
    pub version: String,
    pub requested: usize,
    pub grid: Grid,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoResult {
    pub id: String,
    pub version: String,
    pub icon: Option<String>,
    pub detail: DetailView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResult {
    pub cleared: bool,
    pub icons_root: String,
}

pub struct App<C: DataDragonClient> {
    store: Store,
    client: C,
    locale: Locale,
    tiles_per_row: usize,
    roster: RosterStore,
    icons_ready: bool,
    controls_open: bool,
    status: String,
}

impl<C: DataDragonClient> App<C> {
    pub fn new(store: Store, client: C, config: &ResolvedConfig) -> Self {
        Self {
            store,
            client,
            locale: config.locale.clone(),
            tiles_per_row: config.tiles_per_row,
            roster: RosterStore::new(),
            icons_ready: false,
            controls_open: false,
            status: "Initializing...".to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn roster_store(&self) -> &RosterStore {
        &self.roster
    }

    pub fn version(&self) -> Option<&Version> {
        self.roster.version()
    }

    pub fn icons_ready(&self) -> bool {
        self.icons_ready
    }

    pub fn controls_open(&self) -> bool {
        self.controls_open
    }

    pub fn initialize(&mut self, sink: &dyn ProgressSink) -> Result<(), PickerError> {
        if self.roster.is_loaded() {
            return Err(PickerError::AlreadyInitialized);
        }
        self.set_status("Fetching latest version...", sink);
        let version = match self.client.fetch_latest_version() {
            Ok(version) => version,
            Err(err) => {
                tracing::warn!(error = %err, "version fetch failed");
                self.fail(STATUS_VERSION_FAILED, sink);
                return Err(err);
            }
        };
        tracing::info!(version = %version, "latest data version");

        self.set_status(format!("Fetching champion data for {version}..."), sink);
        let roster = match self.client.fetch_roster(&version, &self.locale) {
            Ok(roster) => roster,
            Err(err) => {
                tracing::warn!(error = %err, version = %version, "roster fetch failed");
                self.fail(STATUS_ROSTER_FAILED, sink);
                return Err(err);
            }
        };

        let total = roster.len();
        if let Err(err) = self.roster.populate(version.clone(), roster) {
            self.fail(STATUS_ROSTER_FAILED, sink);
            return Err(err);
        }
        tracing::info!(version = %version, champions = total, "roster loaded");
        sink.event(ProgressEvent::message(format!("Total champions: {total}")));
        Ok(())
    }

    pub fn cache_icons(&mut self, sink: &dyn ProgressSink) -> Result<CacheReport, PickerError> {
        self.loaded()?;
        self.set_status("Caching champion icons...", sink);

        let report = {
            let (version, roster) = self.loaded()?;
            IconCache::new(&self.store, &self.client).populate_all(roster, version, sink)
        };

        self.icons_ready = true;
        self.set_status(STATUS_CACHE_DONE, sink);
        Ok(report)
    }

    pub fn startup(&mut self, sink: &dyn ProgressSink) -> Result<CacheReport, PickerError> {
        self.initialize(sink)?;
        self.cache_icons(sink)
    }

    pub fn sync(&mut self, sink: &dyn ProgressSink) -> Result<SyncResult, PickerError> {
        let cache = self.startup(sink)?;
        let (version, roster) = self.loaded()?;
        Ok(SyncResult {
            version: version.to_string(),
            locale: self.locale.to_string(),
            champions: roster.len(),
            icon_dir: self.store.icon_dir(version).to_string(),
            cache,
            synced_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, PickerError> {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::Start => {
                if !self.icons_ready {
                    return Err(PickerError::NotReady(
                        "icon cache pass has not completed".to_string(),
                    ));
                }
                self.controls_open = true;
                Ok(Outcome::ControlsOpened)
            }
            Command::SelectRandom { input } => {
                self.require_controls()?;
                let (_, roster) = self.loaded()?;
                let count = selector::parse_count(&input, roster.len())?;
                let selection = selector::select_random(roster, count, &mut rand::thread_rng())?;
                Ok(Outcome::Render(self.render(&selection)?))
            }
            Command::ShowAll => {
                self.require_controls()?;
                let (_, roster) = self.loaded()?;
                let selection = Selection::all(roster);
                Ok(Outcome::Render(self.render(&selection)?))
            }
            Command::Detail(id) => {
                let (_, roster) = self.loaded()?;
                let champion = roster
                    .get(&id)
                    .ok_or_else(|| PickerError::ChampionNotFound(id.to_string()))?;
                Ok(Outcome::Detail(DetailView::from(champion)))
            }
        }
    }

    pub fn pick(&mut self, count: usize) -> Result<GridResult, PickerError> {
        self.dispatch(Command::Start)?;
        let outcome = self.dispatch(Command::SelectRandom {
            input: count.to_string(),
        })?;
        self.grid_result(outcome, count)
    }

    pub fn list(&mut self) -> Result<GridResult, PickerError> {
        self.dispatch(Command::Start)?;
        let outcome = self.dispatch(Command::ShowAll)?;
        let requested = self.loaded()?.1.len();
        self.grid_result(outcome, requested)
    }

    pub fn info(&mut self, id: ChampionId) -> Result<InfoResult, PickerError> {
        let Outcome::Detail(detail) = self.dispatch(Command::Detail(id.clone()))? else {
            return Err(PickerError::ChampionNotFound(id.to_string()));
        };
        let (version, _) = self.loaded()?;
        let icon = IconCache::new(&self.store, &self.client)
            .cached_path(&id, version)
            .map(|path| path.to_string());
        Ok(InfoResult {
            id: id.to_string(),
            version: version.to_string(),
            icon,
            detail,
        })
    }

    pub fn clear(&self) -> Result<ClearResult, PickerError> {
        let cleared = self.store.clear_icons()?;
        tracing::info!(cleared, root = %self.store.icons_root(), "icon cache cleared");
        Ok(ClearResult {
            cleared,
            icons_root: self.store.icons_root().to_string(),
        })
    }

    fn render(&self, selection: &Selection) -> Result<Grid, PickerError> {
        let (version, _) = self.loaded()?;
        let cache = IconCache::new(&self.store, &self.client);
        Ok(display::render(selection, self.tiles_per_row, |id| {
            cache.cached_path(id, version)
        }))
    }

    fn grid_result(&self, outcome: Outcome, requested: usize) -> Result<GridResult, PickerError> {
        let Outcome::Render(grid) = outcome else {
            return Err(PickerError::NotReady("nothing to render".to_string()));
        };
        let (version, _) = self.loaded()?;
        Ok(GridResult {
            version: version.to_string(),
            requested,
            grid,
        })
    }

    fn loaded(&self) -> Result<(&Version, &Roster), PickerError> {
        match (self.roster.version(), self.roster.roster()) {
            (Some(version), Some(roster)) => Ok((version, roster)),
            _ => Err(PickerError::NotReady(
                self.roster
                    .failure()
                    .unwrap_or("champion data is not loaded")
                    .to_string(),
            )),
        }
    }

    fn require_controls(&self) -> Result<(), PickerError> {
        if self.controls_open {
            Ok(())
        } else {
            Err(PickerError::NotReady("start the picker first".to_string()))
        }
    }

    fn set_status(&mut self, status: impl Into<String>, sink: &dyn ProgressSink) {
        self.status = status.into();
        sink.event(ProgressEvent::message(self.status.clone()));
    }

    fn fail(&mut self, status: &str, sink: &dyn ProgressSink) {
        self.roster.fail(status);
        self.set_status(status, sink);
    }
}
