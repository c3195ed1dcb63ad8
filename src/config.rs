// Thu Oct 15 2026 - Alex

use crate::extract::AddressWidth;
use crate::schema::SchemaError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LOGGER_NAME: &str = "apitracing";
pub const DEFAULT_LOG_FILE: &str = "apitracing.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Function definitions plus the settings of the tracing logger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    #[serde(default = "default_address_width")]
    pub address_width: u64,
    #[serde(default = "default_logger_name")]
    pub logger_name: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub structures: IndexMap<String, Vec<FieldDefinition>>,
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<FunctionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<FieldDefinition>,
}

/// One parameter or structure field. `type` selects a primitive decoder,
/// `structure` makes the field a pointer to a named structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,
}

fn default_address_width() -> u64 {
    8
}

fn default_logger_name() -> String {
    DEFAULT_LOGGER_NAME.to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            address_width: default_address_width(),
            logger_name: default_logger_name(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            structures: IndexMap::new(),
            modules: Vec::new(),
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_address_width(mut self, address_width: u64) -> Self {
        self.address_width = address_width;
        self
    }

    pub fn with_log_file(mut self, log_file: PathBuf) -> Self {
        self.log_file = Some(log_file);
        self
    }

    pub fn with_module(mut self, module: ModuleDefinition) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_structure(mut self, name: &str, fields: Vec<FieldDefinition>) -> Self {
        self.structures.insert(name.to_string(), fields);
        self
    }

    pub fn address_width(&self) -> Result<AddressWidth, ConfigError> {
        AddressWidth::from_bytes(self.address_width)
            .ok_or_else(|| ConfigError::Invalid(format!("address_width must be 4 or 8, got {}", self.address_width)))
    }

    pub fn function_count(&self) -> usize {
        self.modules.iter().map(|module| module.functions.len()).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.address_width()?;
        if self.logger_name.is_empty() {
            return Err(ConfigError::Invalid("logger_name must not be empty".to_string()));
        }

        let mut modules = HashSet::new();
        for module in &self.modules {
            if module.name.is_empty() {
                return Err(ConfigError::Invalid("module name must not be empty".to_string()));
            }
            if !modules.insert(module.name.to_lowercase()) {
                return Err(ConfigError::Invalid(format!("module {} is defined twice", module.name)));
            }

            let mut functions = HashSet::new();
            for function in &module.functions {
                if function.name.is_empty() {
                    return Err(ConfigError::Invalid(format!("unnamed function in module {}", module.name)));
                }
                if !functions.insert(function.name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "function {}!{} is defined twice",
                        module.name, function.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ModuleDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            functions: Vec::new(),
        }
    }

    pub fn with_function(mut self, function: FunctionDefinition) -> Self {
        self.functions.push(function);
        self
    }
}

impl FunctionDefinition {
    pub fn new(name: &str, parameters: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.to_string(),
            parameters,
        }
    }
}

impl FieldDefinition {
    pub fn typed(name: &str, type_name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            type_name: Some(type_name.to_string()),
            structure: None,
        }
    }

    pub fn structure(name: &str, structure: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            type_name: None,
            structure: Some(structure.to_string()),
        }
    }
}
