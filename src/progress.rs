//! Index loading progress.
//!
//! The section and page indexes fetch many items in batches; progress is
//! reported on **stderr** so stdout stays parseable for scripts.

use std::io::Write;

/// A single progress event for a batched index load.
#[derive(Clone, Debug)]
pub enum IndexProgressEvent {
    /// A batch finished: `loaded` of `total` items fetched so far.
    Batch {
        index: String,
        loaded: u64,
        total: u64,
    },
    /// The whole index is loaded; `dropped` items were malformed.
    Done {
        index: String,
        kept: u64,
        dropped: u64,
    },
}

/// Reports index progress. Implementations write to stderr (human or JSON).
pub trait IndexProgressReporter: Send + Sync {
    fn report(&self, event: IndexProgressEvent);
}

/// Human-friendly progress on stderr: "pages  loading  150 / 604".
pub struct StderrProgress;

impl IndexProgressReporter for StderrProgress {
    fn report(&self, event: IndexProgressEvent) {
        let line = match &event {
            IndexProgressEvent::Batch {
                index,
                loaded,
                total,
            } => format!(
                "{}  loading  {} / {}\n",
                index,
                format_number(*loaded),
                format_number(*total)
            ),
            IndexProgressEvent::Done {
                index,
                kept,
                dropped,
            } if *dropped > 0 => format!(
                "{}  done  {} loaded, {} skipped (malformed)\n",
                index,
                format_number(*kept),
                format_number(*dropped)
            ),
            IndexProgressEvent::Done { index, kept, .. } => {
                format!("{}  done  {} loaded\n", index, format_number(*kept))
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl IndexProgressReporter for JsonProgress {
    fn report(&self, event: IndexProgressEvent) {
        let obj = match &event {
            IndexProgressEvent::Batch {
                index,
                loaded,
                total,
            } => serde_json::json!({
                "event": "progress",
                "index": index,
                "phase": "loading",
                "n": loaded,
                "total": total
            }),
            IndexProgressEvent::Done {
                index,
                kept,
                dropped,
            } => serde_json::json!({
                "event": "progress",
                "index": index,
                "phase": "done",
                "kept": kept,
                "dropped": dropped
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

pub struct NoProgress;

impl IndexProgressReporter for NoProgress {
    fn report(&self, _event: IndexProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn IndexProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

impl std::str::FromStr for ProgressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ProgressMode::Off),
            "human" => Ok(ProgressMode::Human),
            "json" => Ok(ProgressMode::Json),
            other => Err(format!(
                "unknown progress mode '{}': expected off, human or json",
                other
            )),
        }
    }
}
