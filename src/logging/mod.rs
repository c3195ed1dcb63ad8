// Thu Oct 15 2026 - Alex

pub mod console;
pub mod field;
pub mod logger;
pub mod sink;

pub use console::LoggingUtils;
pub use field::{FieldValue, LogField};
pub use logger::TraceLogger;
pub use sink::{LogCrateSink, LogLevel, LogRecord, LogSink, MemorySink};

/// Bound field naming the file a record stream is routed to.
pub const WRITE_TO_FILE_TAG: &str = "writeToFileTag";
