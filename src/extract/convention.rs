// Thu Oct 15 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_REGISTER_PARAMETER_COUNT: usize = 4;
/// Return address plus the 32 byte home space.
pub const STACK_PARAMETER_OFFSET_X64: u64 = 0x28;
pub const STACK_SLOT_SIZE_X64: u64 = 8;
pub const STACK_SLOT_SIZE_X86: u64 = 4;

/// Native pointer width of the traced guest, which also selects the calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressWidth {
    X86,
    X64,
}

impl AddressWidth {
    pub fn from_bytes(bytes: u64) -> Option<Self> {
        match bytes {
            4 => Some(AddressWidth::X86),
            8 => Some(AddressWidth::X64),
            _ => None,
        }
    }

    pub fn bytes(&self) -> u64 {
        match self {
            AddressWidth::X86 => 4,
            AddressWidth::X64 => 8,
        }
    }

    /// Stack slot of a parameter that is not passed in a register.
    pub fn stack_parameter_address(&self, stack_pointer: u64, index: usize) -> Address {
        let base = Address::new(stack_pointer);
        match self {
            AddressWidth::X64 => {
                let slot = index.saturating_sub(MAX_REGISTER_PARAMETER_COUNT) as u64;
                base + STACK_PARAMETER_OFFSET_X64 + slot * STACK_SLOT_SIZE_X64
            }
            AddressWidth::X86 => base + (index as u64 + 1) * STACK_SLOT_SIZE_X86,
        }
    }
}

impl fmt::Display for AddressWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressWidth::X86 => write!(f, "x86"),
            AddressWidth::X64 => write!(f, "x64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x64_stack_slots() {
        let width = AddressWidth::X64;
        assert_eq!(width.stack_parameter_address(0x420, 4), Address::new(0x448));
        assert_eq!(width.stack_parameter_address(0x420, 5), Address::new(0x450));
    }

    #[test]
    fn test_x86_stack_slots() {
        let width = AddressWidth::X86;
        assert_eq!(width.stack_parameter_address(0x420, 0), Address::new(0x424));
        assert_eq!(width.stack_parameter_address(0x420, 4), Address::new(0x434));
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(AddressWidth::from_bytes(4), Some(AddressWidth::X86));
        assert_eq!(AddressWidth::from_bytes(8).map(|w| w.bytes()), Some(8));
        assert_eq!(AddressWidth::from_bytes(2), None);
    }
}
