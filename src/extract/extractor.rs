// Thu Oct 15 2026 - Alex

use crate::extract::convention::MAX_REGISTER_PARAMETER_COUNT;
use crate::extract::{AddressWidth, ExtractedValue, ExtractionNode, InterruptEvent};
use crate::memory::{Address, AddressSpaceId, GuestMemory, MemoryError};
use crate::schema::{LeafKind, ParameterKind, ParameterSchema};
use std::sync::Arc;

/// Decodes function parameters from the register and stack state at a
/// function's entry point, then follows pointer parameters into guest memory.
pub struct Extractor {
    memory: Arc<dyn GuestMemory>,
    address_width: AddressWidth,
}

impl Extractor {
    pub fn new(memory: Arc<dyn GuestMemory>, address_width: AddressWidth) -> Self {
        Self { memory, address_width }
    }

    pub fn address_width(&self) -> AddressWidth {
        self.address_width
    }

    /// One node per schema holding the masked raw value. Pointers are not followed.
    pub fn get_shallow_extracted_params(
        &self,
        event: &InterruptEvent,
        schemas: &[ParameterSchema],
    ) -> Result<Vec<ExtractionNode>, MemoryError> {
        schemas
            .iter()
            .enumerate()
            .map(|(index, schema)| self.extract_shallow_parameter(event, index, schema))
            .collect()
    }

    /// Masked raw value of the parameter at `index` alone.
    pub fn extract_shallow_parameter(
        &self,
        event: &InterruptEvent,
        index: usize,
        schema: &ParameterSchema,
    ) -> Result<ExtractionNode, MemoryError> {
        let raw = self.read_raw_parameter(event, index)?;
        Ok(ExtractionNode::new(schema.name(), ExtractedValue::Unsigned(schema.mask(raw))))
    }

    fn read_raw_parameter(&self, event: &InterruptEvent, index: usize) -> Result<u64, MemoryError> {
        let registers = &event.registers;
        if self.address_width == AddressWidth::X64 && index < MAX_REGISTER_PARAMETER_COUNT {
            if let Some(value) = registers.parameter_register(index) {
                return Ok(value);
            }
        }
        let slot = self.address_width.stack_parameter_address(registers.rsp, index);
        match self.address_width {
            // x86 slots are 4 bytes; the last one may end a mapped page.
            AddressWidth::X86 => self.memory.read_dword(slot, event.address_space).map(u64::from),
            AddressWidth::X64 => self.memory.read_word(slot, event.address_space),
        }
    }

    /// Expands every composite parameter. Fails as a whole on the first
    /// unreadable address instead of returning a partial tree.
    pub fn get_deep_extract_parameters(
        &self,
        shallow: Vec<ExtractionNode>,
        schemas: &[ParameterSchema],
        address_space: AddressSpaceId,
    ) -> Result<Vec<ExtractionNode>, MemoryError> {
        shallow
            .into_iter()
            .enumerate()
            .map(|(index, node)| match schemas.get(index) {
                Some(schema) => self.deep_extract_parameter(node, schema, address_space),
                None => Ok(node),
            })
            .collect()
    }

    /// Expands a single top-level parameter. Primitive parameters are
    /// returned untouched without reading memory.
    pub fn deep_extract_parameter(
        &self,
        node: ExtractionNode,
        schema: &ParameterSchema,
        address_space: AddressSpaceId,
    ) -> Result<ExtractionNode, MemoryError> {
        let pointer = match node.value {
            ExtractedValue::Unsigned(pointer) if schema.is_composite() => pointer,
            _ => return Ok(node),
        };

        log::trace!("Expanding {} at 0x{:x} in {}", node.name, pointer, address_space);
        let children = self.extract_fields(Address::new(pointer), schema.backing_parameters(), address_space)?;
        Ok(ExtractionNode::composite(&node.name, children))
    }

    // Sibling fields are packed: each one starts where the previous one's declared width ends.
    fn extract_fields(
        &self,
        base: Address,
        fields: &[ParameterSchema],
        address_space: AddressSpaceId,
    ) -> Result<Vec<ExtractionNode>, MemoryError> {
        let mut offset = 0u64;
        let mut nodes = Vec::with_capacity(fields.len());
        for field in fields {
            nodes.push(self.extract_field(base + offset, field, address_space)?);
            offset += field.width();
        }
        Ok(nodes)
    }

    fn extract_field(
        &self,
        addr: Address,
        field: &ParameterSchema,
        address_space: AddressSpaceId,
    ) -> Result<ExtractionNode, MemoryError> {
        let raw = field.mask(self.memory.read_word(addr, address_space)?);

        let value = match field.kind() {
            ParameterKind::Composite(nested) => {
                let children = self.extract_fields(Address::new(raw), nested, address_space)?;
                return Ok(ExtractionNode::composite(field.name(), children));
            }
            ParameterKind::Leaf(LeafKind::UnsignedInt) => ExtractedValue::Unsigned(raw),
            ParameterKind::Leaf(LeafKind::AsciiString) => {
                ExtractedValue::Text(self.memory.read_ascii_string(Address::new(raw), address_space)?)
            }
            ParameterKind::Leaf(LeafKind::WideString) => {
                ExtractedValue::Text(self.memory.read_wide_string(Address::new(raw), address_space)?)
            }
        };
        Ok(ExtractionNode::new(field.name(), value))
    }
}
