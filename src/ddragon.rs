use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;

use crate::config::ResolvedConfig;
use crate::domain::{Champion, ChampionId, Locale, Version};
use crate::error::PickerError;
use crate::roster::Roster;

pub trait DataDragonClient: Send + Sync {
    fn fetch_latest_version(&self) -> Result<Version, PickerError>;
    fn fetch_roster(&self, version: &Version, locale: &Locale) -> Result<Roster, PickerError>;
    fn fetch_icon_bytes(
        &self,
        id: &ChampionId,
        version: &Version,
    ) -> Result<Vec<u8>, PickerError>;
}

#[derive(Clone)]
pub struct DataDragonHttpClient {
    client: Client,
    base_url: String,
}

impl DataDragonHttpClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, PickerError> {
        Self::with_base_url(&config.base_url, config.timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, PickerError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("champ-picker/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PickerError::Network(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| PickerError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn versions_url(&self) -> String {
        format!("{}/api/versions.json", self.base_url)
    }

    pub fn roster_url(&self, version: &Version, locale: &Locale) -> String {
        format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.base_url,
            version.as_str(),
            locale.as_str()
        )
    }

    pub fn icon_url(&self, id: &ChampionId, version: &Version) -> String {
        format!(
            "{}/cdn/{}/img/champion/{}.png",
            self.base_url,
            version.as_str(),
            id.as_str()
        )
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, PickerError> {
        tracing::debug!(url, "ddragon.request");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| PickerError::Network(err.to_string()))?;
        Self::handle_status(response)
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, PickerError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "Data Dragon request failed".to_string());
        Err(PickerError::Status { status, message })
    }
}

impl DataDragonClient for DataDragonHttpClient {
    fn fetch_latest_version(&self) -> Result<Version, PickerError> {
        let response = self.get(&self.versions_url())?;
        let raw: Value = response
            .json()
            .map_err(|err| PickerError::DataFormat(err.to_string()))?;
        parse_latest_version(&raw)
    }

    fn fetch_roster(&self, version: &Version, locale: &Locale) -> Result<Roster, PickerError> {
        let response = self.get(&self.roster_url(version, locale))?;
        let raw: Value = response
            .json()
            .map_err(|err| PickerError::DataFormat(err.to_string()))?;
        parse_roster(raw)
    }

    fn fetch_icon_bytes(
        &self,
        id: &ChampionId,
        version: &Version,
    ) -> Result<Vec<u8>, PickerError> {
        let response = self.get(&self.icon_url(id, version))?;
        let bytes = response
            .bytes()
            .map_err(|err| PickerError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

pub fn parse_latest_version(raw: &Value) -> Result<Version, PickerError> {
    let first = raw
        .as_array()
        .ok_or_else(|| PickerError::DataFormat("version list is not an array".to_string()))?
        .first()
        .ok_or_else(|| PickerError::DataFormat("version list is empty".to_string()))?;
    let value = first
        .as_str()
        .ok_or_else(|| PickerError::DataFormat("version entry is not a string".to_string()))?;
    value
        .parse()
        .map_err(|_| PickerError::DataFormat(format!("invalid version entry: {value}")))
}

#[derive(Debug, Deserialize)]
struct ChampionFile {
    data: BTreeMap<String, ChampionRecord>,
}

#[derive(Debug, Deserialize)]
struct ChampionRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    blurb: String,
    #[serde(default)]
    tags: Vec<String>,
}

pub fn parse_roster(raw: Value) -> Result<Roster, PickerError> {
    let file: ChampionFile =
        serde_json::from_value(raw).map_err(|err| PickerError::DataFormat(err.to_string()))?;

    let champions = file
        .data
        .into_iter()
        .map(|(key, record)| {
            let raw_id = record.id.unwrap_or(key);
            let id = raw_id
                .parse::<ChampionId>()
                .map_err(|_| PickerError::DataFormat(format!("invalid champion id: {raw_id}")))?;
            Ok(Champion {
                id,
                name: record.name,
                title: record.title,
                description: record.blurb,
                tags: record.tags,
            })
        })
        .collect::<Result<Vec<_>, PickerError>>()?;

    if champions.is_empty() {
        return Err(PickerError::DataFormat("champion data is empty".to_string()));
    }
    Ok(Roster::from_champions(champions))
}
