// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol not found: {name} in module at {module_base} (address space {address_space})")]
    NotFound {
        name: String,
        module_base: Address,
        address_space: AddressSpaceId,
    },
    #[error("No module loaded at {0}")]
    UnknownModule(Address),
}
