#![allow(dead_code)]

use std::sync::Mutex;

use champ_picker::app::{ProgressEvent, ProgressSink};
use champ_picker::ddragon::DataDragonClient;
use champ_picker::domain::{Champion, ChampionId, Locale, Version};
use champ_picker::error::PickerError;
use champ_picker::roster::Roster;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-icon-body";

pub fn champion(id: &str) -> Champion {
    Champion {
        id: id.parse().unwrap(),
        name: format!("{id} name"),
        title: format!("the {id}"),
        description: format!("{id} description"),
        tags: vec!["Fighter".to_string()],
    }
}

pub fn roster(ids: &[&str]) -> Roster {
    Roster::from_champions(ids.iter().map(|id| champion(id)))
}

pub struct MockDataDragon {
    pub version: Option<String>,
    pub roster_ids: Option<Vec<String>>,
    pub failing_icons: Vec<String>,
    pub icon_body: Vec<u8>,
    pub icon_calls: Mutex<Vec<String>>,
    pub roster_calls: Mutex<usize>,
}

impl MockDataDragon {
    pub fn new(version: &str, ids: &[&str]) -> Self {
        Self {
            version: Some(version.to_string()),
            roster_ids: Some(ids.iter().map(|id| id.to_string()).collect()),
            failing_icons: Vec::new(),
            icon_body: PNG_BYTES.to_vec(),
            icon_calls: Mutex::new(Vec::new()),
            roster_calls: Mutex::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            version: None,
            roster_ids: None,
            ..Self::new("0.0.0", &[])
        }
    }

    pub fn failing(mut self, ids: &[&str]) -> Self {
        self.failing_icons = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn icon_calls(&self) -> Vec<String> {
        self.icon_calls.lock().unwrap().clone()
    }
}

impl DataDragonClient for MockDataDragon {
    fn fetch_latest_version(&self) -> Result<Version, PickerError> {
        match &self.version {
            Some(version) => version.parse(),
            None => Err(PickerError::Network("connection refused".to_string())),
        }
    }

    fn fetch_roster(&self, _version: &Version, _locale: &Locale) -> Result<Roster, PickerError> {
        *self.roster_calls.lock().unwrap() += 1;
        match &self.roster_ids {
            Some(ids) => Ok(Roster::from_champions(ids.iter().map(|id| champion(id)))),
            None => Err(PickerError::DataFormat("missing data".to_string())),
        }
    }

    fn fetch_icon_bytes(
        &self,
        id: &ChampionId,
        _version: &Version,
    ) -> Result<Vec<u8>, PickerError> {
        self.icon_calls.lock().unwrap().push(id.to_string());
        if self.failing_icons.iter().any(|failing| failing == id.as_str()) {
            return Err(PickerError::Status {
                status: 404,
                message: "not found".to_string(),
            });
        }
        Ok(self.icon_body.clone())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn progress(&self) -> Vec<(usize, usize)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| event.progress)
            .map(|progress| (progress.current, progress.total))
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.message.clone())
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn event(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
