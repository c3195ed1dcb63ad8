// Thu Oct 15 2026 - Alex

use crate::extract::{ExtractedValue, ExtractionNode, Extractor, InterruptEvent};
use crate::hook::{BpResponse, BreakpointCallback, BreakpointHandle, BreakpointManager, HookError};
use crate::logging::{FieldValue, LogField, TraceLogger};
use crate::memory::{Address, AddressSpaceId};
use crate::schema::ParameterSchema;
use crate::symbol::SymbolResolver;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Collaborators shared by every hook of one tracer.
#[derive(Clone)]
pub struct HookContext {
    pub extractor: Arc<Extractor>,
    pub resolver: Arc<dyn SymbolResolver>,
    pub breakpoints: Arc<dyn BreakpointManager>,
    pub logger: TraceLogger,
}

/// Breakpoint lifecycle and hit dispatch for one (module, function) pair.
///
/// The hook owns one breakpoint handle per traced address space. Installed
/// callbacks only hold a [`Weak`] reference back to the hook, so dropping
/// the last [`Arc`] turns any outstanding callback into a plain pass-through.
pub struct FunctionHook {
    module_name: String,
    function_name: String,
    parameters: Arc<Vec<ParameterSchema>>,
    context: HookContext,
    hooked: Mutex<IndexMap<AddressSpaceId, Box<dyn BreakpointHandle>>>,
    this: Weak<FunctionHook>,
}

impl FunctionHook {
    pub fn new(
        module_name: &str,
        function_name: &str,
        parameters: Arc<Vec<ParameterSchema>>,
        context: HookContext,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            module_name: module_name.to_string(),
            function_name: function_name.to_string(),
            parameters,
            context,
            hooked: Mutex::new(IndexMap::new()),
            this: this.clone(),
        })
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn parameters(&self) -> &[ParameterSchema] {
        &self.parameters
    }

    pub fn traced_address_spaces(&self) -> Vec<AddressSpaceId> {
        self.hooked.lock().keys().copied().collect()
    }

    pub fn is_traced(&self, address_space: AddressSpaceId) -> bool {
        self.hooked.lock().contains_key(&address_space)
    }

    /// Resolves the function inside the module mapped at `module_base` and
    /// places a breakpoint on its entry for `address_space`. Nothing is
    /// recorded unless both steps succeed.
    pub fn hook_function(&self, module_base: Address, address_space: AddressSpaceId) -> Result<(), HookError> {
        let entry = self
            .context
            .resolver
            .resolve(module_base, address_space, &self.function_name)
            .map_err(|source| HookError::Symbol {
                module: self.module_name.clone(),
                function: self.function_name.clone(),
                source,
            })?;

        // Breakpoints trap globally by address, so every callback only answers for its own process.
        let hook = self.this.clone();
        let callback: BreakpointCallback = Arc::new(move |event: &InterruptEvent| {
            if event.address_space != address_space {
                return BpResponse::Continue;
            }
            match hook.upgrade() {
                Some(hook) => hook.dispatch(event),
                None => BpResponse::Continue,
            }
        });

        let handle = self
            .context
            .breakpoints
            .install(entry, address_space, callback)
            .map_err(|source| HookError::Breakpoint {
                module: self.module_name.clone(),
                function: self.function_name.clone(),
                source,
            })?;

        let previous = self.hooked.lock().insert(address_space, handle);
        if let Some(mut previous) = previous {
            previous.remove();
        }

        log::debug!(
            "Hooked {}!{} at {} for address space {}",
            self.module_name,
            self.function_name,
            entry,
            address_space
        );
        Ok(())
    }

    /// Breakpoint callback. Hits from address spaces this hook does not
    /// trace are ignored; the guest always continues.
    pub fn dispatch(&self, event: &InterruptEvent) -> BpResponse {
        if !self.is_traced(event.address_space) {
            return BpResponse::Continue;
        }

        let logger = &self.context.logger;
        logger.info(
            "Function hit",
            vec![
                LogField::new("Module", self.module_name.as_str()),
                LogField::new("Function", self.function_name.as_str()),
                LogField::new("Gla", format!("{:x}", event.gla)),
            ],
        );
        if self.parameters.is_empty() {
            return BpResponse::Continue;
        }

        let extractor = &self.context.extractor;
        for (index, schema) in self.parameters.iter().enumerate() {
            let extracted = extractor
                .extract_shallow_parameter(event, index, schema)
                .and_then(|node| extractor.deep_extract_parameter(node, schema, event.address_space));
            match extracted {
                Ok(node) => self.log_parameter(&node),
                Err(e) => logger.warning(
                    "Parameter extraction failed",
                    vec![
                        LogField::new("Function", self.function_name.as_str()),
                        LogField::new("Name", schema.name()),
                        LogField::new("Address", format!("{:x}", e.address())),
                        LogField::new("Error", e.to_string()),
                    ],
                ),
            }
        }
        BpResponse::Continue
    }

    fn log_parameter(&self, node: &ExtractionNode) {
        for (name, value) in node.leaves() {
            let value = match value {
                ExtractedValue::Unsigned(value) => FieldValue::U64(*value),
                ExtractedValue::Text(text) => FieldValue::Str(text.clone()),
                ExtractedValue::Empty => continue,
            };
            self.context.logger.info(
                "Parameter",
                vec![LogField::new("Name", name), LogField { key: "Value".to_string(), value }],
            );
        }
    }

    /// Removes every breakpoint this hook holds.
    pub fn teardown(&self) {
        let handles = std::mem::take(&mut *self.hooked.lock());
        for (address_space, mut handle) in handles {
            handle.remove();
            log::debug!(
                "Removed hook {}!{} for address space {}",
                self.module_name,
                self.function_name,
                address_space
            );
        }
    }
}
