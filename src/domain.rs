use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PickerError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = PickerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = !normalized.is_empty()
            && normalized != "."
            && normalized != ".."
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
        if !is_valid {
            return Err(PickerError::InvalidVersion(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

impl TryFrom<String> for Version {
    type Error = PickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.0
    }
}

/// Stable champion key (`Ahri`, `MonkeyKing`). Doubles as the icon file stem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChampionId(String);

impl ChampionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChampionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChampionId {
    type Err = PickerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid =
            !normalized.is_empty() && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(PickerError::InvalidChampionId(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

impl TryFrom<String> for ChampionId {
    type Error = PickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChampionId> for String {
    fn from(value: ChampionId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en_US".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Locale {
    type Err = PickerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = match normalized.split_once('_') {
            Some((lang, region)) => {
                lang.len() == 2
                    && region.len() == 2
                    && lang.chars().all(|ch| ch.is_ascii_lowercase())
                    && region.chars().all(|ch| ch.is_ascii_uppercase())
            }
            None => false,
        };
        if !is_valid {
            return Err(PickerError::InvalidLocale(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = PickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_version_valid() {
        let version: Version = " 14.20.1 ".parse().unwrap();
        assert_eq!(version.as_str(), "14.20.1");
        let legacy: Version = "lolpatch_7.20".parse().unwrap();
        assert_eq!(legacy.as_str(), "lolpatch_7.20");
    }

    #[test]
    fn parse_version_rejects_path_segments() {
        assert_matches!(
            "..".parse::<Version>(),
            Err(PickerError::InvalidVersion(_))
        );
        assert_matches!(
            "14.1/../x".parse::<Version>(),
            Err(PickerError::InvalidVersion(_))
        );
        assert_matches!("".parse::<Version>(), Err(PickerError::InvalidVersion(_)));
    }

    #[test]
    fn parse_champion_id() {
        let id: ChampionId = "MonkeyKing".parse().unwrap();
        assert_eq!(id.as_str(), "MonkeyKing");
        assert_matches!(
            "Kai'Sa".parse::<ChampionId>(),
            Err(PickerError::InvalidChampionId(_))
        );
        assert_matches!(
            "../etc".parse::<ChampionId>(),
            Err(PickerError::InvalidChampionId(_))
        );
    }

    #[test]
    fn parse_locale() {
        let locale: Locale = "ko_KR".parse().unwrap();
        assert_eq!(locale.as_str(), "ko_KR");
        assert_eq!(Locale::default().as_str(), "en_US");
        assert_matches!(
            "english".parse::<Locale>(),
            Err(PickerError::InvalidLocale(_))
        );
        assert_matches!(
            "EN_us".parse::<Locale>(),
            Err(PickerError::InvalidLocale(_))
        );
    }
}
