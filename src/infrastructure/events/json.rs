//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for CI/automation consumption.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    dry_run: bool,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            dry_run: false,
        }
    }

    /// Tag every event with `"dry_run": true`
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if self.dry_run {
            event["dry_run"] = serde_json::Value::Bool(true);
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        let json = match event {
            SyncEvent::Started { package, work_root } => {
                serde_json::json!({
                    "event": "start",
                    "command": "push",
                    "package": package,
                    "work_root": work_root.display().to_string(),
                })
            }

            SyncEvent::DirectoryEnsured { path } => {
                serde_json::json!({
                    "event": "directory",
                    "command": "push",
                    "path": path.display().to_string(),
                })
            }

            SyncEvent::FilePushed {
                path,
                source,
                changed,
            } => {
                serde_json::json!({
                    "event": if changed { "item_written" } else { "item_unchanged" },
                    "command": "push",
                    "path": path.display().to_string(),
                    "source": source.as_str(),
                })
            }

            SyncEvent::FileDeleted { path, existed } => {
                serde_json::json!({
                    "event": "item_deleted",
                    "command": "push",
                    "path": path.display().to_string(),
                    "existed": existed,
                })
            }

            SyncEvent::Completed {
                directories,
                written,
                unchanged,
                deleted,
            } => {
                serde_json::json!({
                    "event": "complete",
                    "command": "push",
                    "status": "success",
                    "directories": directories,
                    "written": written,
                    "unchanged": unchanged,
                    "deleted": deleted,
                })
            }
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ContentSource;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::Started {
            package: "nginx".to_string(),
            work_root: PathBuf::from("packages/nginx"),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["package"], "nginx");
        assert!(events[0].get("dry_run").is_none());
    }

    #[test]
    fn json_sink_distinguishes_written_and_unchanged() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(SyncEvent::FilePushed {
            path: PathBuf::from("/etc/hosts"),
            source: ContentSource::Rendered,
            changed: true,
        });
        sink.on_event(SyncEvent::FilePushed {
            path: PathBuf::from("/etc/motd"),
            source: ContentSource::Copied,
            changed: false,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "item_written");
        assert_eq!(events[0]["source"], "rendered");
        assert_eq!(events[1]["event"], "item_unchanged");
        assert_eq!(events[1]["path"], "/etc/motd");
    }

    #[test]
    fn json_sink_tags_dry_run() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer).dry_run(true);

        sink.on_event(SyncEvent::Completed {
            directories: 3,
            written: 2,
            unchanged: 1,
            deleted: 0,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["written"], 2);
        assert_eq!(events[0]["dry_run"], true);
    }
}
