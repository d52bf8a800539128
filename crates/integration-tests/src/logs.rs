use std::sync::{Mutex, Once};

use log::{LevelFilter, Record};
use logforth::{append::Append, diagnostic::Diagnostic};

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Keeps every record in memory so tests can inspect what the server logged.
#[derive(Debug)]
struct Capture;

impl Append for Capture {
    fn append(&self, record: &Record<'_>, _diagnostics: &[Box<dyn Diagnostic>]) -> anyhow::Result<()> {
        if let Ok(mut lines) = LINES.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }

        Ok(())
    }
}

/// Installs the capturing logger for this test binary. Safe to call from every test.
pub fn capture_logs() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = logforth::builder()
            .dispatch(|d| d.filter(LevelFilter::Debug).append(Capture))
            .try_apply();
    });
}

/// All captured lines so far, across every test in the binary.
pub fn captured_logs() -> Vec<String> {
    LINES.lock().map(|lines| lines.clone()).unwrap_or_default()
}
