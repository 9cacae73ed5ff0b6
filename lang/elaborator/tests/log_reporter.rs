use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tessera_lang_elaborator::{LogReporter, MetaVarError, Reporter};

/// Keeps every record, so that the output of the reporter can be inspected.
struct Recorder {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Recorder {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder { records: Mutex::new(Vec::new()) };

#[test]
fn log_reporter_emits_warnings() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let err = MetaVarError::CannotSolveEquations { eqns: vec!["?a = Nat".to_owned()], span: None };
    LogReporter.report(err.clone());

    let records = RECORDER.records.lock().unwrap();
    assert_eq!(records.as_slice(), [(Level::Warn, err.to_string())]);
}
