// Thu Oct 15 2026 - Alex

pub mod config;
pub mod extract;
pub mod hook;
pub mod logging;
pub mod memory;
pub mod schema;
pub mod symbol;

pub use config::TracingConfig;
pub use extract::{AddressWidth, ExtractedValue, ExtractionNode, Extractor, InterruptEvent, RegisterSnapshot};
pub use hook::{ApiTracer, BpResponse, BreakpointManager, FunctionHook};
pub use logging::{LogSink, TraceLogger};
pub use memory::{Address, AddressSpaceId, GuestMemory};
pub use schema::{LeafKind, ParameterSchema};
pub use symbol::SymbolResolver;
