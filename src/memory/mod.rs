// Thu Oct 15 2026 - Alex

pub mod address;
pub mod error;
pub mod snapshot;
pub mod traits;

pub use address::{Address, AddressSpaceId};
pub use error::MemoryError;
pub use snapshot::SnapshotMemory;
pub use traits::GuestMemory;
