// Thu Oct 15 2026 - Alex

use crate::memory::{Address, AddressSpaceId};
use crate::symbol::SymbolError;
use ahash::AHashMap;

/// Maps an exported function name to its virtual address inside one loaded module.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, module_base: Address, address_space: AddressSpaceId, name: &str) -> Result<Address, SymbolError>;
}

/// Export tables keyed by module base. Entries are relative virtual
/// addresses, so the same table serves every process that maps the module
/// at that base.
pub struct StaticSymbolResolver {
    modules: AHashMap<u64, AHashMap<String, u64>>,
}

impl StaticSymbolResolver {
    pub fn new() -> Self {
        Self { modules: AHashMap::new() }
    }

    pub fn add_export(&mut self, module_base: Address, name: &str, rva: u64) {
        self.modules
            .entry(module_base.as_u64())
            .or_default()
            .insert(name.to_string(), rva);
    }

    pub fn with_export(mut self, module_base: Address, name: &str, rva: u64) -> Self {
        self.add_export(module_base, name, rva);
        self
    }

    pub fn export_count(&self, module_base: Address) -> usize {
        self.modules.get(&module_base.as_u64()).map_or(0, |exports| exports.len())
    }
}

impl Default for StaticSymbolResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolResolver for StaticSymbolResolver {
    fn resolve(&self, module_base: Address, address_space: AddressSpaceId, name: &str) -> Result<Address, SymbolError> {
        let exports = self
            .modules
            .get(&module_base.as_u64())
            .ok_or(SymbolError::UnknownModule(module_base))?;

        exports
            .get(name)
            .map(|rva| module_base + *rva)
            .ok_or_else(|| SymbolError::NotFound {
                name: name.to_string(),
                module_base,
                address_space,
            })
    }
}
