// Thu Oct 15 2026 - Alex

use crate::logging::{LogField, LogLevel, LogRecord, LogSink};
use std::sync::Arc;

/// Named structured logger. Bound fields are prepended to every record,
/// which is how output routing such as the target log file is configured.
#[derive(Clone)]
pub struct TraceLogger {
    name: String,
    bound: Vec<LogField>,
    sink: Arc<dyn LogSink>,
}

impl TraceLogger {
    pub fn new(name: &str, sink: Arc<dyn LogSink>) -> Self {
        Self {
            name: name.to_string(),
            bound: Vec::new(),
            sink,
        }
    }

    pub fn bind(&mut self, fields: Vec<LogField>) {
        for field in fields {
            match self.bound.iter_mut().find(|bound| bound.key == field.key) {
                Some(existing) => existing.value = field.value,
                None => self.bound.push(field),
            }
        }
    }

    pub fn with_bound(mut self, fields: Vec<LogField>) -> Self {
        self.bind(fields);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bound_fields(&self) -> &[LogField] {
        &self.bound
    }

    pub fn debug(&self, message: &str, fields: Vec<LogField>) {
        self.log(LogLevel::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: Vec<LogField>) {
        self.log(LogLevel::Info, message, fields);
    }

    pub fn warning(&self, message: &str, fields: Vec<LogField>) {
        self.log(LogLevel::Warning, message, fields);
    }

    pub fn error(&self, message: &str, fields: Vec<LogField>) {
        self.log(LogLevel::Error, message, fields);
    }

    fn log(&self, level: LogLevel, message: &str, fields: Vec<LogField>) {
        let mut all_fields = Vec::with_capacity(self.bound.len() + fields.len());
        all_fields.extend(self.bound.iter().cloned());
        all_fields.extend(fields);

        self.sink.write(&LogRecord {
            level,
            logger: self.name.clone(),
            message: message.to_string(),
            fields: all_fields,
        });
    }
}
