// LogToYaml - GPL-3.0-or-later
// This file is part of LogToYaml.
//
// Copyright (C) 2025 Daniel Freiermuth
//
// LogToYaml is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// LogToYaml is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with LogToYaml.  If not, see <https://www.gnu.org/licenses/>.

//! Persisted record store kept beside the log file.

use crate::error::{ConvertError, Result};
use crate::parser::{LevelToken, LocationInfo, SegmentedRecord};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One parsed log event. Its index is the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    pub id: Uuid,
    pub name: String,
    pub level: LevelToken,
    pub time_stamp: String,
    pub location: LocationInfo,
    pub message: Vec<String>,
}

impl ParsedRecord {
    /// Materialize a segmented record; its span is dropped here.
    pub fn new(segment: SegmentedRecord, message: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: segment.name,
            level: segment.level,
            time_stamp: segment.time_stamp,
            location: segment.location,
            message,
        }
    }
}

/// Structured state of one log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(with = "date_created")]
    pub date_created: DateTime<Local>,
    /// Highest source line already folded into `records`, 0 for none
    pub last: usize,
    #[serde(default)]
    pub records: BTreeMap<u64, ParsedRecord>,
}

impl PersistedState {
    pub fn fresh() -> Self {
        Self {
            date_created: Local::now(),
            last: 0,
            records: BTreeMap::new(),
        }
    }

    pub fn next_index(&self) -> u64 {
        self.records.keys().next_back().map_or(1, |&key| key + 1)
    }

    /// Record keys must be exactly `1..=n`.
    fn check_indices(&self) -> std::result::Result<(), String> {
        match self
            .records
            .keys()
            .zip(1u64..)
            .find(|(key, expected)| **key != *expected)
        {
            Some((key, expected)) => Err(format!(
                "record indices are not contiguous: found {key} where {expected} was expected"
            )),
            None => Ok(()),
        }
    }
}

/// Result of [`StateStore::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedState {
    Existing(PersistedState),
    /// No state file existed; a fresh state was created
    Bootstrapped(PersistedState),
}

impl LoadedState {
    pub fn into_state(self) -> PersistedState {
        match self {
            Self::Existing(state) | Self::Bootstrapped(state) => state,
        }
    }

    pub const fn is_bootstrapped(&self) -> bool {
        matches!(self, Self::Bootstrapped(_))
    }
}

/// The state path for a log: its extension swapped for `yaml`
pub fn derive_state_path(log_file: &Path) -> PathBuf {
    log_file.with_extension("yaml")
}

/// Reads and writes the YAML state file of one log
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_log(log_file: &Path) -> Self {
        Self::new(derive_state_path(log_file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, creating and persisting a fresh one if none exists.
    pub fn load(&self) -> Result<LoadedState> {
        match self.read()? {
            Some(state) => Ok(LoadedState::Existing(state)),
            None => {
                let state = PersistedState::fresh();
                self.save(&state)?;
                Ok(LoadedState::Bootstrapped(state))
            }
        }
    }

    /// Like [`Self::load`] but never writes; a missing file yields an unsaved fresh state.
    pub fn peek(&self) -> Result<LoadedState> {
        Ok(self.read()?.map_or_else(
            || LoadedState::Bootstrapped(PersistedState::fresh()),
            LoadedState::Existing,
        ))
    }

    /// Read the state file. `Ok(None)` means it does not exist.
    pub fn read(&self) -> Result<Option<PersistedState>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConvertError::state_unreadable(&self.path, e.to_string())),
        };

        let state: PersistedState = serde_yaml::from_str(&contents)
            .map_err(|e| ConvertError::state_unreadable(&self.path, e.to_string()))?;
        state
            .check_indices()
            .map_err(|reason| ConvertError::state_unreadable(&self.path, reason))?;

        Ok(Some(state))
    }

    /// Overwrite the state file atomically.
    ///
    /// The YAML is written to a temp file in the target directory and renamed
    /// over the target, so an interrupted save never truncates existing state.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        self.write_atomically(state)
            .map_err(|source| ConvertError::PersistFailure {
                path: self.path.clone(),
                source,
            })
    }

    fn write_atomically(&self, state: &PersistedState) -> io::Result<()> {
        let yaml = serde_yaml::to_string(state).map_err(io::Error::other)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(yaml.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// `dateCreated` is written as RFC 3339. Reading also accepts the
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` form emitted by Python's YAML dumper.
mod date_created {
    use chrono::{DateTime, Local};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Local>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_created(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid dateCreated timestamp: {raw:?}")))
    }
}

fn parse_date_created(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
}
