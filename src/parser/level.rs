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
use std::fmt;

/// Severity tokens recognized in the level column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LevelToken {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LevelToken {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Match a raw separator field. Surrounding whitespace is ignored, case is not.
    pub fn from_field(field: &str) -> Option<Self> {
        let trimmed = field.trim();
        Self::ALL.into_iter().find(|level| level.as_str() == trimmed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LevelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level token found in field `column` of `line`
pub fn level_at(line: &str, separator: char, column: usize) -> Option<LevelToken> {
    line.split(separator)
        .nth(column)
        .and_then(LevelToken::from_field)
}

/// Where the level column was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelColumn {
    /// 0-based field index after splitting on the separator
    pub index: usize,
    /// 1-based line number of the line that fixed the column
    pub found_on_line: usize,
}

/// Find the level column from the first line that carries a level token.
///
/// The first match fixes the column for the whole file. Later lines are not
/// checked against it here; see [`count_inconsistent_lines`].
pub fn locate_level_column(lines: &[String], separator: char) -> Option<LevelColumn> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        line.split(separator)
            .position(|field| LevelToken::from_field(field).is_some())
            .map(|index| LevelColumn {
                index,
                found_on_line: idx + 1,
            })
    })
}

/// Count lines that carry a level token somewhere, but not in `column`.
///
/// Such lines are silently treated as message continuation by the segmenter,
/// which usually means the log layout changed mid-file.
pub fn count_inconsistent_lines(lines: &[String], separator: char, column: usize) -> usize {
    lines
        .iter()
        .filter(|line| {
            let mut at_column = false;
            let mut elsewhere = false;
            for (index, field) in line.split(separator).enumerate() {
                if LevelToken::from_field(field).is_some() {
                    if index == column {
                        at_column = true;
                    } else {
                        elsewhere = true;
                    }
                }
            }
            elsewhere && !at_column
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test_lines;

    #[test]
    fn test_from_field_trims_and_is_case_sensitive() {
        assert_eq!(LevelToken::from_field(" ERROR "), Some(LevelToken::Error));
        assert_eq!(LevelToken::from_field("CRITICAL\n"), Some(LevelToken::Critical));
        assert_eq!(LevelToken::from_field("error"), None);
        assert_eq!(LevelToken::from_field("WARN"), None);
        assert_eq!(LevelToken::from_field(""), None);
    }

    #[test]
    fn test_locate_on_first_matching_line() {
        let lines = test_lines(
            "preamble without levels\n\
             [2024]-[01]-[01] - ModA - DEBUG - (mod_a.py, init): 10\n\
             INFO - shifted layout\n",
        );
        let column = locate_level_column(&lines, '-').expect("level column");
        assert_eq!(column.index, 4);
        assert_eq!(column.found_on_line, 2);
    }

    #[test]
    fn test_first_field_in_line_wins() {
        let lines = test_lines("x | INFO | ERROR | y");
        let column = locate_level_column(&lines, '|').expect("level column");
        assert_eq!(column.index, 1);
    }

    #[test]
    fn test_no_level_column() {
        let lines = test_lines("just text\nmore - text - here\n");
        assert_eq!(locate_level_column(&lines, '-'), None);
        assert_eq!(locate_level_column(&[], '-'), None);
    }

    #[test]
    fn test_level_at_requires_enough_fields() {
        assert_eq!(level_at("a - b - INFO", '-', 2), Some(LevelToken::Info));
        assert_eq!(level_at("a - b", '-', 2), None);
    }

    #[test]
    fn test_count_inconsistent_lines() {
        let lines = test_lines(
            "[2024]-[01]-[01] - ModA - DEBUG - (a.py, f): 1\n\
             continuation\n\
             ModB - ERROR - moved column\n\
             [2024]-[01]-[02] - ModC - INFO - (c.py, g): 3\n",
        );
        assert_eq!(count_inconsistent_lines(&lines, '-', 4), 1);
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let yaml = serde_yaml::to_string(&LevelToken::Warning).expect("serialize");
        assert_eq!(yaml.trim(), "WARNING");
        let level: LevelToken = serde_yaml::from_str("CRITICAL").expect("deserialize");
        assert_eq!(level, LevelToken::Critical);
    }
}
