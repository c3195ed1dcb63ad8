// Thu Oct 15 2026 - Alex

use crate::extract::InterruptEvent;
use crate::hook::{BpResponse, BreakpointCallback, BreakpointError, BreakpointHandle, BreakpointManager};
use crate::memory::{Address, AddressSpaceId};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

struct InstalledBreakpoint {
    address: Address,
    address_space: AddressSpaceId,
    callback: BreakpointCallback,
}

type Entries = Mutex<IndexMap<u64, InstalledBreakpoint>>;

/// In-process breakpoint table. `trigger` plays the role of the platform
/// delivering a hit, so hooks can be driven without a hypervisor.
pub struct BreakpointRegistry {
    entries: Arc<Entries>,
    next_id: AtomicU64,
}

impl BreakpointRegistry {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(IndexMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn installed_count(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_installed_at(&self, address: Address) -> bool {
        self.entries.lock().values().any(|bp| bp.address == address)
    }

    pub fn installed_address_spaces(&self, address: Address) -> Vec<AddressSpaceId> {
        self.entries
            .lock()
            .values()
            .filter(|bp| bp.address == address)
            .map(|bp| bp.address_space)
            .collect()
    }

    /// Runs every callback installed at the event's linear address. The
    /// table lock is released before callbacks run.
    pub fn trigger(&self, event: &InterruptEvent) -> Vec<BpResponse> {
        let callbacks: Vec<BreakpointCallback> = self
            .entries
            .lock()
            .values()
            .filter(|bp| bp.address == event.gla)
            .map(|bp| bp.callback.clone())
            .collect();

        callbacks.iter().map(|callback| callback(event)).collect()
    }
}

impl Default for BreakpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakpointManager for BreakpointRegistry {
    fn install(
        &self,
        address: Address,
        address_space: AddressSpaceId,
        callback: BreakpointCallback,
    ) -> Result<Box<dyn BreakpointHandle>, BreakpointError> {
        if address.is_null() {
            return Err(BreakpointError::InstallFailed {
                address,
                address_space,
                reason: "null address".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().insert(
            id,
            InstalledBreakpoint {
                address,
                address_space,
                callback,
            },
        );
        log::debug!("Installed breakpoint {} at {} for {}", id, address, address_space);

        Ok(Box::new(RegistryHandle {
            id,
            address,
            entries: Arc::downgrade(&self.entries),
        }))
    }
}

struct RegistryHandle {
    id: u64,
    address: Address,
    entries: Weak<Entries>,
}

impl BreakpointHandle for RegistryHandle {
    fn address(&self) -> Address {
        self.address
    }

    fn remove(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            if entries.lock().shift_remove(&self.id).is_some() {
                log::debug!("Removed breakpoint {} at {}", self.id, self.address);
            }
        }
    }
}
