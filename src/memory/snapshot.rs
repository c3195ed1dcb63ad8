// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId, GuestMemory, MemoryError};
use ahash::AHashMap;
use widestring::U16String;

pub const PAGE_SIZE: u64 = 0x1000;
pub const DEFAULT_MAX_STRING_LEN: usize = 0x1000;

/// Page-granular image of guest memory for any number of address spaces.
/// Only pages that were written are mapped; everything else reads as unmapped.
pub struct SnapshotMemory {
    pages: AHashMap<(AddressSpaceId, u64), Box<[u8]>>,
    max_string_len: usize,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self {
            pages: AHashMap::new(),
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_mapped(&self, addr: Address, address_space: AddressSpaceId) -> bool {
        self.pages.contains_key(&(address_space, addr.align_down(PAGE_SIZE).as_u64()))
    }

    pub fn write_bytes(&mut self, address_space: AddressSpaceId, addr: Address, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            let current = addr + i as u64;
            let page_base = current.align_down(PAGE_SIZE).as_u64();
            let page = self
                .pages
                .entry((address_space, page_base))
                .or_insert_with(|| vec![0u8; PAGE_SIZE as usize].into_boxed_slice());
            page[(current.as_u64() - page_base) as usize] = *byte;
        }
    }

    pub fn write_u64(&mut self, address_space: AddressSpaceId, addr: Address, value: u64) {
        self.write_bytes(address_space, addr, &value.to_le_bytes());
    }

    pub fn write_u32(&mut self, address_space: AddressSpaceId, addr: Address, value: u32) {
        self.write_bytes(address_space, addr, &value.to_le_bytes());
    }

    pub fn write_ascii(&mut self, address_space: AddressSpaceId, addr: Address, text: &str) {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        self.write_bytes(address_space, addr, &data);
    }

    pub fn write_wide(&mut self, address_space: AddressSpaceId, addr: Address, text: &str) {
        let mut data = Vec::with_capacity((text.len() + 1) * 2);
        for unit in text.encode_utf16().chain(std::iter::once(0)) {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        self.write_bytes(address_space, addr, &data);
    }

    fn read_u8(&self, addr: Address, address_space: AddressSpaceId) -> Result<u8, MemoryError> {
        let page_base = addr.align_down(PAGE_SIZE).as_u64();
        self.pages
            .get(&(address_space, page_base))
            .map(|page| page[(addr.as_u64() - page_base) as usize])
            .ok_or(MemoryError::Unmapped { address: addr, address_space })
    }

    pub fn read_bytes(&self, addr: Address, len: usize, address_space: AddressSpaceId) -> Result<Vec<u8>, MemoryError> {
        (0..len as u64)
            .map(|i| self.read_u8(addr + i, address_space))
            .collect()
    }
}

impl Default for SnapshotMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestMemory for SnapshotMemory {
    fn read_word(&self, addr: Address, address_space: AddressSpaceId) -> Result<u64, MemoryError> {
        let bytes = self.read_bytes(addr, 8, address_space)?;
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes);
        Ok(u64::from_le_bytes(word))
    }

    fn read_dword(&self, addr: Address, address_space: AddressSpaceId) -> Result<u32, MemoryError> {
        let bytes = self.read_bytes(addr, 4, address_space)?;
        let mut dword = [0u8; 4];
        dword.copy_from_slice(&bytes);
        Ok(u32::from_le_bytes(dword))
    }

    fn read_ascii_string(&self, addr: Address, address_space: AddressSpaceId) -> Result<String, MemoryError> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8(addr + bytes.len() as u64, address_space)?;
            if byte == 0 {
                break;
            }
            if bytes.len() == self.max_string_len {
                return Err(MemoryError::StringTooLong(addr));
            }
            bytes.push(byte);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_wide_string(&self, addr: Address, address_space: AddressSpaceId) -> Result<String, MemoryError> {
        let mut units = Vec::new();
        loop {
            let offset = (units.len() * 2) as u64;
            let low = self.read_u8(addr + offset, address_space)?;
            let high = self.read_u8(addr + offset + 1, address_space)?;
            let unit = u16::from_le_bytes([low, high]);
            if unit == 0 {
                break;
            }
            if units.len() == self.max_string_len {
                return Err(MemoryError::StringTooLong(addr));
            }
            units.push(unit);
        }
        Ok(U16String::from_vec(units).to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DTB: AddressSpaceId = AddressSpaceId(0x1337);

    #[test]
    fn test_word_across_page_boundary() {
        let mut memory = SnapshotMemory::new();
        memory.write_u64(DTB, Address::new(0x1ffc), 0x1122334455667788);

        assert_eq!(memory.page_count(), 2);
        assert_eq!(memory.read_word(Address::new(0x1ffc), DTB), Ok(0x1122334455667788));
    }

    #[test]
    fn test_unmapped_read_fails() {
        let memory = SnapshotMemory::new();
        let result = memory.read_word(Address::new(0x5000), DTB);

        assert_eq!(
            result,
            Err(MemoryError::Unmapped { address: Address::new(0x5000), address_space: DTB })
        );
    }

    #[test]
    fn test_address_spaces_are_isolated() {
        let mut memory = SnapshotMemory::new();
        memory.write_u64(DTB, Address::new(0x1000), 1);

        assert!(memory.is_mapped(Address::new(0x1000), DTB));
        assert!(!memory.is_mapped(Address::new(0x1000), AddressSpaceId(0x2000)));
    }

    #[test]
    fn test_strings() {
        let mut memory = SnapshotMemory::new();
        memory.write_ascii(DTB, Address::new(0x3000), "extract me");
        memory.write_wide(DTB, Address::new(0x4000), "\\??\\C:\\Windows");

        assert_eq!(memory.read_ascii_string(Address::new(0x3000), DTB).unwrap(), "extract me");
        assert_eq!(memory.read_wide_string(Address::new(0x4000), DTB).unwrap(), "\\??\\C:\\Windows");
    }

    #[test]
    fn test_unterminated_string_is_bounded() {
        let mut memory = SnapshotMemory::new().with_max_string_len(4);
        memory.write_bytes(DTB, Address::new(0x3000), b"AAAAAAAA");

        assert_eq!(
            memory.read_ascii_string(Address::new(0x3000), DTB),
            Err(MemoryError::StringTooLong(Address::new(0x3000)))
        );
    }
}
