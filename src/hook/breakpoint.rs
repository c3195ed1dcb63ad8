// Thu Oct 15 2026 - Alex

use crate::extract::InterruptEvent;
use crate::hook::BreakpointError;
use crate::memory::{Address, AddressSpaceId};
use std::sync::Arc;

/// How the platform proceeds after a callback. Traced calls are never
/// suppressed, so the guest always resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpResponse {
    Continue,
}

pub type BreakpointCallback = Arc<dyn Fn(&InterruptEvent) -> BpResponse + Send + Sync>;

pub trait BreakpointHandle: Send {
    fn address(&self) -> Address;

    /// Removes the breakpoint. Calling it again is a no-op.
    fn remove(&mut self);
}

/// Injects breakpoints into the guest. A breakpoint traps on every
/// execution of its instruction, whatever address space triggers it.
pub trait BreakpointManager: Send + Sync {
    fn install(
        &self,
        address: Address,
        address_space: AddressSpaceId,
        callback: BreakpointCallback,
    ) -> Result<Box<dyn BreakpointHandle>, BreakpointError>;
}
