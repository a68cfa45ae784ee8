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

use crate::error::{ConvertError, Result};
use std::path::Path;

/// Read the log as lines, decoding invalid UTF-8 lossily.
///
/// Line `n` of the file is `lines[n - 1]`. Line terminators are removed.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let buffer = std::fs::read(path).map_err(|source| ConvertError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&buffer)
        .lines()
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines_keeps_blank_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, "first\r\n\nthird").expect("write");

        let lines = read_lines(&path).expect("read");
        assert_eq!(lines, vec!["first", "", "third"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, b"ok\n\xff\xfebad\n").expect("write");

        let lines = read_lines(&path).expect("read");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("bad"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_lines(&dir.path().join("absent.log")).expect_err("missing");
        assert!(matches!(err, ConvertError::SourceUnavailable { .. }));
    }
}
