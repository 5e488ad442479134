//! Buffered audit log writer.
//!
//! The dispatcher persists each entry through the store inside the job's
//! transaction; this type owns the human-readable side: entries buffer
//! in memory and flush as one rendered line each at the job boundary, so
//! N successful jobs produce exactly N lines in the sink.

use chrono::DateTime;
use parking_lot::Mutex;
use plumeria_commons::{ApiError, ApiResult, AuditLogEntry};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Destination for rendered audit lines.
pub trait AuditSink: Send + Sync {
    fn write_line(&self, line: &str) -> ApiResult<()>;
}

/// Appends lines to a file on disk.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSink for FileSink {
    fn write_line(&self, line: &str) -> ApiResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ApiError::internal(format!("audit log open error: {}", e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| ApiError::internal(format!("audit log write error: {}", e)))
    }
}

/// Collects lines in memory. Test double.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of all lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl AuditSink for MemorySink {
    fn write_line(&self, line: &str) -> ApiResult<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

/// Buffered, append-only audit log.
pub struct AuditLog {
    sink: Arc<dyn AuditSink>,
    buffer: Mutex<Vec<AuditLogEntry>>,
}

impl AuditLog {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            sink,
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Buffers one entry.
    pub fn append(&self, entry: AuditLogEntry) {
        self.buffer.lock().push(entry);
    }

    /// Renders and writes every buffered entry, one line each.
    pub fn flush(&self) -> ApiResult<()> {
        let entries: Vec<AuditLogEntry> = {
            let mut buffer = self.buffer.lock();
            buffer.drain(..).collect()
        };
        for entry in &entries {
            self.sink.write_line(&render_line(entry))?;
        }
        Ok(())
    }

    /// Number of buffered, not yet flushed entries.
    pub fn pending(&self) -> usize {
        self.buffer.lock().len()
    }
}

fn render_line(entry: &AuditLogEntry) -> String {
    let timestamp = DateTime::from_timestamp_millis(entry.timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| entry.timestamp.to_string());
    format!("[{}] {}", timestamp, entry.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plumeria_commons::AuditLogId;
    use std::collections::BTreeMap;

    fn entry(n: u64) -> AuditLogEntry {
        AuditLogEntry {
            audit_id: AuditLogId::new(format!("audit_{:010}", n)),
            timestamp: 1730000000000 + n as i64,
            actor: "dummy".to_string(),
            template: "{user} merged {source} with {target}".to_string(),
            substitutions: BTreeMap::from([
                ("user".to_string(), "dummy".to_string()),
                ("source".to_string(), format!("tag{}", n)),
                ("target".to_string(), "landscape".to_string()),
            ]),
        }
    }

    #[test]
    fn test_flush_writes_one_line_per_entry() {
        let sink = Arc::new(MemorySink::new());
        let audit = AuditLog::new(sink.clone());

        for n in 1..=3 {
            audit.append(entry(n));
        }
        assert_eq!(audit.pending(), 3);
        audit.flush().unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("dummy merged tag1 with landscape"));
        assert_eq!(audit.pending(), 0);

        // A second flush writes nothing new.
        audit.flush().unwrap();
        assert_eq!(sink.lines().len(), 3);
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let sink = FileSink::new(&path);

        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_rendered_line_carries_timestamp_prefix() {
        let line = render_line(&entry(1));
        assert!(line.starts_with("[2024-10-27"));
    }
}
