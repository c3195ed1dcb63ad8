// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId};

/// Registers captured at function entry. Only the parameter-carrying
/// registers of the x64 convention and the stack pointer are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterSnapshot {
    pub rcx: u64,
    pub rdx: u64,
    pub r8: u64,
    pub r9: u64,
    pub rsp: u64,
}

impl RegisterSnapshot {
    pub fn new(rcx: u64, rdx: u64, r8: u64, r9: u64, rsp: u64) -> Self {
        Self { rcx, rdx, r8, r9, rsp }
    }

    pub fn parameter_register(&self, index: usize) -> Option<u64> {
        match index {
            0 => Some(self.rcx),
            1 => Some(self.rdx),
            2 => Some(self.r8),
            3 => Some(self.r9),
            _ => None,
        }
    }
}

/// What the platform hands to a breakpoint callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptEvent {
    pub address_space: AddressSpaceId,
    pub gla: Address,
    pub registers: RegisterSnapshot,
}

impl InterruptEvent {
    pub fn new(address_space: AddressSpaceId, gla: Address, registers: RegisterSnapshot) -> Self {
        Self {
            address_space,
            gla,
            registers,
        }
    }
}
