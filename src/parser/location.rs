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

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Call site of a log statement, parsed from `(<file>, <function>): <lineNumber>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub file: String,
    pub function: String,
    pub line_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("no location field after the level column")]
    Missing,
    #[error("missing ':' before the line number")]
    MissingColon,
    #[error("missing ',' between file and function")]
    MissingComma,
    #[error("line number {0:?} is not an integer")]
    InvalidLineNumber(String),
}

impl LocationInfo {
    /// Parse a location token such as `(mod_a.py, init): 10`.
    pub fn parse(token: &str) -> Result<Self, LocationError> {
        let (site, number) = token.split_once(':').ok_or(LocationError::MissingColon)?;
        let (file, function) = site.split_once(',').ok_or(LocationError::MissingComma)?;

        let number = number.trim().trim_end_matches(')').trim_end();
        let line_number = number
            .parse::<u64>()
            .map_err(|_| LocationError::InvalidLineNumber(number.to_string()))?;

        Ok(Self {
            file: strip_parens(file),
            function: strip_parens(function),
            line_number,
        })
    }
}

fn strip_parens(part: &str) -> String {
    part.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .to_string()
}
