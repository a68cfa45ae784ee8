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

//! Folds newly parsed records into the persisted state.

use super::state::{ParsedRecord, PersistedState};
use crate::error::Result;
use std::ops::RangeInclusive;

/// A state with new records merged in, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub state: PersistedState,
    /// Indices assigned to the new records
    pub indices: RangeInclusive<u64>,
}

impl MergeOutcome {
    pub fn added(&self) -> usize {
        self.indices.clone().count()
    }
}

/// Assign indices to `records` in file order, continuing after the highest
/// existing index, and advance `last` to `last_scanned`.
///
/// Returns `None` when there is nothing to merge; the previous state is then
/// left exactly as it was.
pub fn merge_records(
    previous: &PersistedState,
    records: Vec<ParsedRecord>,
    last_scanned: usize,
) -> Option<MergeOutcome> {
    if records.is_empty() {
        return None;
    }

    let first = previous.next_index();
    let mut state = previous.clone();
    let mut index = first;
    for record in records {
        state.records.insert(index, record);
        index += 1;
    }
    state.last = last_scanned;

    Some(MergeOutcome {
        state,
        indices: first..=index - 1,
    })
}

/// Merge and hand the result to `persist`.
///
/// The merged state is only returned once `persist` succeeded, so a failed
/// write leaves the caller holding the previous state and its `last`.
pub fn commit<F>(
    previous: &PersistedState,
    records: Vec<ParsedRecord>,
    last_scanned: usize,
    persist: F,
) -> Result<Option<MergeOutcome>>
where
    F: FnOnce(&PersistedState) -> Result<()>,
{
    match merge_records(previous, records, last_scanned) {
        Some(outcome) => {
            persist(&outcome.state)?;
            Ok(Some(outcome))
        }
        None => Ok(None),
    }
}
