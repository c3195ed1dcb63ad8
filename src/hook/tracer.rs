// Thu Oct 15 2026 - Alex

use crate::config::{ConfigError, TracingConfig};
use crate::extract::Extractor;
use crate::hook::{BreakpointManager, FunctionHook, HookContext, HookError};
use crate::logging::{LogField, LogSink, TraceLogger, WRITE_TO_FILE_TAG};
use crate::memory::{Address, AddressSpaceId, GuestMemory};
use crate::schema::SchemaBuilder;
use crate::symbol::SymbolResolver;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct TraceReport {
    pub hooked: Vec<String>,
    pub failed: Vec<HookError>,
}

impl TraceReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Every function hook described by one configuration.
pub struct ApiTracer {
    hooks: Vec<Arc<FunctionHook>>,
    logger: TraceLogger,
}

impl ApiTracer {
    pub fn from_config(
        config: &TracingConfig,
        memory: Arc<dyn GuestMemory>,
        resolver: Arc<dyn SymbolResolver>,
        breakpoints: Arc<dyn BreakpointManager>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let address_width = config.address_width()?;
        let signatures = SchemaBuilder::build_all(config)?;

        let mut logger = TraceLogger::new(&config.logger_name, sink);
        if let Some(log_file) = &config.log_file {
            logger.bind(vec![LogField::new(WRITE_TO_FILE_TAG, log_file.display().to_string())]);
        }

        let context = HookContext {
            extractor: Arc::new(Extractor::new(memory, address_width)),
            resolver,
            breakpoints,
            logger: logger.clone(),
        };

        let hooks = signatures
            .into_iter()
            .map(|signature| {
                FunctionHook::new(
                    &signature.module_name,
                    &signature.function_name,
                    signature.parameters,
                    context.clone(),
                )
            })
            .collect();

        Ok(Self { hooks, logger })
    }

    pub fn hooks(&self) -> &[Arc<FunctionHook>] {
        &self.hooks
    }

    pub fn hook(&self, module_name: &str, function_name: &str) -> Option<&Arc<FunctionHook>> {
        self.hooks.iter().find(|hook| {
            hook.module_name().eq_ignore_ascii_case(module_name) && hook.function_name() == function_name
        })
    }

    /// Hooks every configured function of the given loaded modules in one
    /// process. A failing hook is logged and reported without affecting the rest.
    pub fn trace_process(&self, address_space: AddressSpaceId, modules: &[(&str, Address)]) -> TraceReport {
        let mut report = TraceReport::default();

        for hook in &self.hooks {
            let base = modules
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(hook.module_name()))
                .map(|(_, base)| *base);
            let Some(base) = base else {
                continue;
            };

            match hook.hook_function(base, address_space) {
                Ok(()) => report
                    .hooked
                    .push(format!("{}!{}", hook.module_name(), hook.function_name())),
                Err(e) => {
                    self.logger.error(
                        "Failed to hook function",
                        vec![
                            LogField::new("Module", hook.module_name()),
                            LogField::new("Function", hook.function_name()),
                            LogField::new("Error", e.to_string()),
                        ],
                    );
                    report.failed.push(e);
                }
            }
        }

        log::info!(
            "Traced address space {}: {} hooks installed, {} failed",
            address_space,
            report.hooked.len(),
            report.failed.len()
        );
        report
    }

    pub fn teardown(&self) {
        for hook in &self.hooks {
            hook.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldDefinition, FunctionDefinition, ModuleDefinition};
    use crate::extract::{InterruptEvent, RegisterSnapshot};
    use crate::hook::BreakpointRegistry;
    use crate::logging::{FieldValue, MemorySink};
    use crate::memory::SnapshotMemory;
    use crate::symbol::StaticSymbolResolver;
    use std::path::PathBuf;

    const NTDLL: Address = Address::new(0x7ffe_0000_0000);
    const KERNEL32: Address = Address::new(0x7ffd_0000_0000);
    const DTB: AddressSpaceId = AddressSpaceId(0x1337);

    fn config() -> TracingConfig {
        TracingConfig::new()
            .with_log_file(PathBuf::from("apitracing.log"))
            .with_module(
                ModuleDefinition::new("ntdll.dll")
                    .with_function(FunctionDefinition::new(
                        "NtClose",
                        vec![FieldDefinition::typed("Handle", "HANDLE", 8)],
                    ))
                    .with_function(FunctionDefinition::new("NtMissing", Vec::new())),
            )
            .with_module(
                ModuleDefinition::new("kernel32.dll")
                    .with_function(FunctionDefinition::new("Sleep", vec![FieldDefinition::typed("Ms", "DWORD", 4)])),
            )
    }

    struct Fixture {
        tracer: ApiTracer,
        registry: Arc<BreakpointRegistry>,
        sink: Arc<MemorySink>,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(BreakpointRegistry::new());
        let sink = Arc::new(MemorySink::new());
        let resolver = StaticSymbolResolver::new()
            .with_export(NTDLL, "NtClose", 0x9c2d0)
            .with_export(KERNEL32, "Sleep", 0x1b0a0);
        let tracer = ApiTracer::from_config(
            &config(),
            Arc::new(SnapshotMemory::new()),
            Arc::new(resolver),
            registry.clone(),
            sink.clone(),
        )
        .unwrap();
        Fixture { tracer, registry, sink }
    }

    #[test]
    fn test_one_hook_per_function() {
        let fixture = fixture();

        assert_eq!(fixture.tracer.hooks().len(), 3);
        assert!(fixture.tracer.hook("NTDLL.DLL", "NtClose").is_some());
        assert!(fixture.tracer.hook("ntdll.dll", "ntclose").is_none());
    }

    #[test]
    fn test_trace_process_reports_failures() {
        let fixture = fixture();

        let report = fixture.tracer.trace_process(DTB, &[("NTDLL.dll", NTDLL)]);

        assert_eq!(report.hooked, vec!["ntdll.dll!NtClose".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_complete());
        assert_eq!(fixture.registry.installed_count(), 1);
        let errors = fixture.sink.records_with_message("Failed to hook function");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field("Function"), Some(&FieldValue::Str("NtMissing".to_string())));
    }

    #[test]
    fn test_hits_are_logged_with_bound_file_tag() {
        let fixture = fixture();
        fixture.tracer.trace_process(DTB, &[("ntdll.dll", NTDLL), ("kernel32.dll", KERNEL32)]);

        let event = InterruptEvent::new(DTB, KERNEL32 + 0x1b0a0, RegisterSnapshot::new(1000, 0, 0, 0, 0x420));
        fixture.registry.trigger(&event);

        let parameters = fixture.sink.records_with_message("Parameter");
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].field("Value"), Some(&FieldValue::U64(1000)));
        assert_eq!(
            parameters[0].field(WRITE_TO_FILE_TAG),
            Some(&FieldValue::Str("apitracing.log".to_string()))
        );
    }

    #[test]
    fn test_teardown_removes_all_breakpoints() {
        let fixture = fixture();
        fixture.tracer.trace_process(DTB, &[("ntdll.dll", NTDLL), ("kernel32.dll", KERNEL32)]);
        assert_eq!(fixture.registry.installed_count(), 2);

        fixture.tracer.teardown();

        assert_eq!(fixture.registry.installed_count(), 0);
        assert!(fixture.tracer.hooks().iter().all(|hook| hook.traced_address_spaces().is_empty()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = config().with_address_width(16);
        let result = ApiTracer::from_config(
            &config,
            Arc::new(SnapshotMemory::new()),
            Arc::new(StaticSymbolResolver::new()),
            Arc::new(BreakpointRegistry::new()),
            Arc::new(MemorySink::new()),
        );

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
