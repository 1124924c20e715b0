use std::collections::BTreeMap;

use crate::domain::{Champion, ChampionId, Version};
use crate::error::PickerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    champions: BTreeMap<ChampionId, Champion>,
}

impl Roster {
    pub fn from_champions(champions: impl IntoIterator<Item = Champion>) -> Self {
        Self {
            champions: champions
                .into_iter()
                .map(|champion| (champion.id.clone(), champion))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn get(&self, id: &ChampionId) -> Option<&Champion> {
        self.champions.get(id)
    }

    pub fn contains(&self, id: &ChampionId) -> bool {
        self.champions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Champion> {
        self.champions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ChampionId> {
        self.champions.keys()
    }
}

#[derive(Debug, Clone, Default)]
pub enum RosterState {
    #[default]
    Empty,
    Failed(String),
    Loaded {
        version: Version,
        roster: Roster,
    },
}

#[derive(Debug, Default)]
pub struct RosterStore {
    state: RosterState,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(&mut self, version: Version, roster: Roster) -> Result<(), PickerError> {
        if self.is_loaded() {
            return Err(PickerError::AlreadyInitialized);
        }
        if roster.is_empty() {
            return Err(PickerError::DataFormat("champion data is empty".to_string()));
        }
        self.state = RosterState::Loaded { version, roster };
        Ok(())
    }

    pub fn fail(&mut self, status: impl Into<String>) {
        if !self.is_loaded() {
            self.state = RosterState::Failed(status.into());
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, RosterState::Loaded { .. })
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn version(&self) -> Option<&Version> {
        match &self.state {
            RosterState::Loaded { version, .. } => Some(version),
            _ => None,
        }
    }

    pub fn roster(&self) -> Option<&Roster> {
        match &self.state {
            RosterState::Loaded { roster, .. } => Some(roster),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            RosterState::Failed(status) => Some(status),
            _ => None,
        }
    }
}
