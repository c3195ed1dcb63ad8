// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId, MemoryError};

/// Guest memory as seen from the hypervisor. Every read is scoped to one
/// address space and fails on unmapped or untranslatable addresses.
pub trait GuestMemory: Send + Sync {
    /// Reads 8 bytes little-endian at `addr`.
    fn read_word(&self, addr: Address, address_space: AddressSpaceId) -> Result<u64, MemoryError>;

    /// Reads 4 bytes little-endian at `addr`.
    fn read_dword(&self, addr: Address, address_space: AddressSpaceId) -> Result<u32, MemoryError>;

    /// Reads a NUL-terminated single-byte string.
    fn read_ascii_string(&self, addr: Address, address_space: AddressSpaceId) -> Result<String, MemoryError>;

    /// Reads a NUL-terminated UTF-16LE string.
    fn read_wide_string(&self, addr: Address, address_space: AddressSpaceId) -> Result<String, MemoryError>;
}
