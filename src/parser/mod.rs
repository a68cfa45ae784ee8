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

//! Line-level parsing for delimiter-structured logs.
//!
//! The stages here are pure: they borrow the raw lines and a [`Layout`] and
//! return owned values, leaving all file access to the caller.

pub mod level;
pub mod location;
pub mod segment;

pub use level::{locate_level_column, LevelColumn, LevelToken};
pub use location::{LocationError, LocationInfo};
pub use segment::{assemble_message, segment_records, RecordSpan, SegmentedRecord};

/// Field layout of a log, fixed for the whole file once the level column is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub separator: char,
    pub level_column: usize,
}

impl Layout {
    pub const fn new(separator: char, level_column: usize) -> Self {
        Self {
            separator,
            level_column,
        }
    }

    /// Level token at this layout's level column, if the line has one
    pub fn level_of(&self, line: &str) -> Option<LevelToken> {
        level::level_at(line, self.separator, self.level_column)
    }
}

#[cfg(test)]
pub(crate) fn test_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_owned).collect()
}
