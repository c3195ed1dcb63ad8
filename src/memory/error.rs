// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Address {address} is not mapped in address space {address_space}")]
    Unmapped {
        address: Address,
        address_space: AddressSpaceId,
    },
    #[error("String at {0} exceeds the maximum length")]
    StringTooLong(Address),
}

impl MemoryError {
    pub fn address(&self) -> Address {
        match self {
            MemoryError::Unmapped { address, .. } | MemoryError::StringTooLong(address) => *address,
        }
    }
}
