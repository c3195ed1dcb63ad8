// Thu Oct 15 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown type '{alias}' for parameter {name}")]
    UnknownType { name: String, alias: String },
    #[error("Invalid width {width} for parameter {name}, expected 1, 2, 4 or 8")]
    InvalidWidth { name: String, width: u64 },
    #[error("Parameter {0} is a structure pointer without fields")]
    EmptyComposite(String),
    #[error("Parameter {name} references unknown structure '{structure}'")]
    UnknownStructure { name: String, structure: String },
    #[error("Structure '{0}' references itself")]
    RecursiveStructure(String),
    #[error("Parameter {0} declares both a type and a structure")]
    ConflictingField(String),
}
