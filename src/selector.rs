use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::Serialize;

use crate::domain::{Champion, ChampionId};
use crate::error::PickerError;
use crate::roster::Roster;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    champions: Vec<Champion>,
}

impl Selection {
    pub fn all(roster: &Roster) -> Self {
        Self {
            champions: roster.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Champion> {
        self.champions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ChampionId> {
        self.champions.iter().map(|champion| &champion.id)
    }
}

pub fn select_random<R: Rng + ?Sized>(
    roster: &Roster,
    count: usize,
    rng: &mut R,
) -> Result<Selection, PickerError> {
    if count > roster.len() {
        return Err(PickerError::InvalidArgument(format!(
            "cannot select {count} champions from a roster of {}",
            roster.len()
        )));
    }
    let mut champions = roster.iter().cloned().choose_multiple(rng, count);
    champions.shuffle(rng);
    Ok(Selection { champions })
}

pub fn parse_count(input: &str, roster_len: usize) -> Result<usize, PickerError> {
    let count = input
        .trim()
        .parse::<usize>()
        .map_err(|_| PickerError::InvalidArgument("Please enter a valid number.".to_string()))?;
    if count > roster_len {
        return Err(PickerError::InvalidArgument(
            "Number exceeds total champions!".to_string(),
        ));
    }
    Ok(count)
}
