// Thu Oct 15 2026 - Alex

use crate::logging::{FieldValue, LogField};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_log_level(self) -> log::Level {
        match self {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
    pub fields: Vec<LogField>,
}

impl LogRecord {
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|field| field.key == key).map(|field| &field.value)
    }

    pub fn render_fields(&self) -> String {
        self.fields
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Destination of structured trace records.
pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord);
}

/// Forwards records to the `log` facade, using the logger name as target.
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn write(&self, record: &LogRecord) {
        log::log!(
            target: record.logger.as_str(),
            record.level.to_log_level(),
            "{} {}",
            record.message,
            record.render_fields()
        );
    }
}

/// Keeps every record in memory.
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn records_with_message(&self, message: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.message == message)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fields() {
        let record = LogRecord {
            level: LogLevel::Info,
            logger: "apitracing".to_string(),
            message: "Parameter".to_string(),
            fields: vec![LogField::new("Name", "FileHandle"), LogField::new("Value", 0xCAFEBABEu64)],
        };

        assert_eq!(record.render_fields(), "Name=\"FileHandle\" Value=3405691582");
        assert_eq!(record.field("Value"), Some(&FieldValue::U64(0xCAFEBABE)));
        assert_eq!(record.field("Missing"), None);
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        let record = LogRecord {
            level: LogLevel::Warning,
            logger: "apitracing".to_string(),
            message: "Function hit".to_string(),
            fields: Vec::new(),
        };
        sink.write(&record);
        sink.write(&record);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records_with_message("Function hit").len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }
}
