// LogToYaml - GPL-3.0-or-later
// End-to-end runs of the converter against real files.

use log_to_yaml::{
    ConversionReport, ConvertError, ConverterConfig, LevelToken, LogToYaml, PersistedState,
    StateStore,
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SAMPLE: &str = "\
[2024]-[01]-[01] - ModA - DEBUG - (mod_a.py, init): 10
starting up
all systems nominal
[2024]-[01]-[02] - ModB - ERROR - (mod_b.py, run): 20
failure detected
";

struct Fixture {
    _dir: tempfile::TempDir,
    log: PathBuf,
    state: PathBuf,
}

impl Fixture {
    fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("app.log");
        fs::write(&log, content).expect("write log");
        let state = dir.path().join("app.yaml");
        Self {
            _dir: dir,
            log,
            state,
        }
    }

    fn append(&self, content: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log)
            .expect("open log");
        file.write_all(content.as_bytes()).expect("append");
    }

    fn convert(&self) -> Result<ConversionReport, ConvertError> {
        LogToYaml::new(ConverterConfig::new(&self.log)).convert()
    }

    fn state(&self) -> PersistedState {
        StateStore::new(&self.state)
            .read()
            .expect("read state")
            .expect("state exists")
    }

    fn state_bytes(&self) -> Vec<u8> {
        fs::read(&self.state).expect("state bytes")
    }
}

fn assert_contiguous(state: &PersistedState) {
    let keys: Vec<u64> = state.records.keys().copied().collect();
    let expected: Vec<u64> = (1..=keys.len() as u64).collect();
    assert_eq!(keys, expected);
}

#[test]
fn sample_log_produces_two_records() {
    let fixture = Fixture::new(SAMPLE);
    let report = fixture.convert().expect("convert");

    assert_eq!(report.new_records, 2);
    assert_eq!(report.first_index, Some(1));
    assert_eq!(report.last_index, Some(2));
    assert_eq!(report.last_line, 5);
    assert!(report.persisted);
    assert_eq!(report.state_path, fixture.state);

    let state = fixture.state();
    assert_eq!(state.last, 5);

    let first = &state.records[&1];
    assert_eq!(first.level, LevelToken::Debug);
    assert_eq!(first.name, "ModA");
    assert_eq!(first.time_stamp, "2024-01-01");
    assert_eq!(first.location.file, "mod_a.py");
    assert_eq!(first.location.function, "init");
    assert_eq!(first.location.line_number, 10);
    assert_eq!(
        first.message,
        vec![
            "[2024]-[01]-[01] - ModA - DEBUG - (mod_a.py, init): 10",
            "starting up",
            "all systems nominal",
        ]
    );

    let second = &state.records[&2];
    assert_eq!(second.level, LevelToken::Error);
    assert_eq!(second.name, "ModB");
    assert_eq!(second.location.file, "mod_b.py");
    assert_eq!(second.location.function, "run");
    assert_eq!(second.location.line_number, 20);
    assert_eq!(second.message.last().map(String::as_str), Some("failure detected"));
    assert_ne!(first.id, second.id);
}

#[test]
fn second_run_without_new_lines_is_byte_identical() {
    let fixture = Fixture::new(SAMPLE);
    fixture.convert().expect("first run");
    let before = fixture.state_bytes();

    let report = fixture.convert().expect("second run");
    assert_eq!(report.new_records, 0);
    assert_eq!(report.last_line, 5);
    assert!(!report.persisted);
    assert_eq!(fixture.state_bytes(), before);
}

#[test]
fn appended_records_continue_the_index() {
    let fixture = Fixture::new(SAMPLE);
    fixture.convert().expect("first run");
    let first_run = fixture.state();

    fixture.append(
        "[2024]-[01]-[03] - ModC - WARNING - (mod_c.py, poll): 30\n\
         slow response\n\
         [2024]-[01]-[04] - ModA - CRITICAL - (mod_a.py, stop): 40\n",
    );
    let report = fixture.convert().expect("second run");
    assert_eq!(report.new_records, 2);
    assert_eq!(report.first_index, Some(3));
    assert_eq!(report.last_index, Some(4));

    let state = fixture.state();
    assert_contiguous(&state);
    assert_eq!(state.last, 8);
    assert_eq!(state.date_created, first_run.date_created);
    assert_eq!(state.records[&1], first_run.records[&1]);
    assert_eq!(state.records[&2], first_run.records[&2]);
    assert_eq!(state.records[&3].level, LevelToken::Warning);
    assert_eq!(
        state.records[&3].message,
        vec!["[2024]-[01]-[03] - ModC - WARNING - (mod_c.py, poll): 30", "slow response"]
    );
    assert_eq!(state.records[&4].message.len(), 1);
}

#[test]
fn every_new_level_line_yields_exactly_one_record() {
    let mut log = String::new();
    for i in 1..=25 {
        log.push_str(&format!(
            "[2024]-[02]-[{i:02}] - Worker{i} - INFO - (worker.py, tick): {i}\n"
        ));
        for j in 0..(i % 3) {
            log.push_str(&format!("  detail {j} of tick {i}  \n"));
        }
    }
    let fixture = Fixture::new(&log);
    let report = fixture.convert().expect("convert");
    assert_eq!(report.new_records, 25);

    let lines: Vec<&str> = log.lines().collect();
    let state = fixture.state();
    assert_contiguous(&state);
    let total: usize = state.records.values().map(|r| r.message.len()).sum();
    assert_eq!(total, lines.len());

    let mut line_no = 0;
    for record in state.records.values() {
        for message_line in &record.message {
            assert_eq!(message_line, lines[line_no].trim());
            line_no += 1;
        }
    }
}

#[test]
fn interrupted_persist_is_safely_retried() {
    let fixture = Fixture::new(SAMPLE);
    fixture.convert().expect("first run");
    let committed = fixture.state_bytes();

    fixture.append("[2024]-[01]-[05] - ModD - INFO - (mod_d.py, go): 50\nmore\n");
    fixture.convert().expect("second run");
    let advanced = fixture.state();

    // Roll the state back as if the second persist never happened.
    fs::write(&fixture.state, &committed).expect("restore");
    assert_eq!(fixture.state().last, 5);

    let report = fixture.convert().expect("retry");
    assert_eq!(report.first_index, Some(3));
    assert_eq!(report.last_index, Some(3));

    let retried = fixture.state();
    assert_contiguous(&retried);
    assert_eq!(retried.last, advanced.last);
    assert_eq!(retried.records[&3].message, advanced.records[&3].message);
    assert_eq!(retried.records[&3].location, advanced.records[&3].location);
}

#[test]
fn missing_log_writes_nothing() {
    let fixture = Fixture::new("");
    fs::remove_file(&fixture.log).expect("remove log");

    let err = fixture.convert().expect_err("missing log");
    assert!(matches!(err, ConvertError::SourceUnavailable { .. }));
    assert!(!fixture.state.exists());
}

#[test]
fn log_without_levels_is_a_structural_error() {
    let fixture = Fixture::new("plain text\nwith - dashes - only\n");
    let err = fixture.convert().expect_err("structural");
    assert!(matches!(err, ConvertError::StructuralError { ref path } if path == &fixture.log));
    assert!(!fixture.state.exists());
}

#[test]
fn malformed_location_leaves_state_untouched() {
    let fixture = Fixture::new(SAMPLE);
    fixture.convert().expect("first run");
    let before = fixture.state_bytes();

    fixture.append(
        "[2024]-[01]-[06] - ModE - INFO - (mod_e.py, ok): 60\n\
         [2024]-[01]-[07] - ModF - ERROR - mod_f.py without location\n",
    );
    let err = fixture.convert().expect_err("malformed");
    assert!(matches!(err, ConvertError::MalformedLocation { line: 7, .. }));
    assert_eq!(fixture.state_bytes(), before);
}

#[test]
fn corrupt_state_is_never_reset() {
    let fixture = Fixture::new(SAMPLE);
    fs::write(&fixture.state, "records: [oops").expect("corrupt state");

    let err = fixture.convert().expect_err("unreadable");
    assert!(matches!(err, ConvertError::StateUnreadable { .. }));
    assert_eq!(fs::read_to_string(&fixture.state).expect("state"), "records: [oops");
}

#[test]
fn explicit_state_file_is_used() {
    let fixture = Fixture::new(SAMPLE);
    let custom = fixture.log.with_file_name("custom-state.yaml");

    let report = LogToYaml::new(ConverterConfig::new(&fixture.log).with_state_file(&custom))
        .convert()
        .expect("convert");
    assert_eq!(report.state_path, custom);
    assert!(custom.exists());
    assert!(!Path::new(&fixture.state).exists());
}
