// Thu Oct 15 2026 - Alex

pub mod breakpoint;
pub mod error;
pub mod function_hook;
pub mod registry;
pub mod tracer;

pub use breakpoint::{BpResponse, BreakpointCallback, BreakpointHandle, BreakpointManager};
pub use error::{BreakpointError, HookError};
pub use function_hook::{FunctionHook, HookContext};
pub use registry::BreakpointRegistry;
pub use tracer::{ApiTracer, TraceReport};
