// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId};
use crate::symbol::SymbolError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    #[error("Failed to install breakpoint at {address} in address space {address_space}: {reason}")]
    InstallFailed {
        address: Address,
        address_space: AddressSpaceId,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("Cannot resolve {module}!{function}: {source}")]
    Symbol {
        module: String,
        function: String,
        #[source]
        source: SymbolError,
    },
    #[error("Cannot hook {module}!{function}: {source}")]
    Breakpoint {
        module: String,
        function: String,
        #[source]
        source: BreakpointError,
    },
}
