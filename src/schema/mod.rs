// Thu Oct 15 2026 - Alex

pub mod alias;
pub mod builder;
pub mod error;
pub mod parameter;

pub use alias::{lookup_alias, LeafKind};
pub use builder::SchemaBuilder;
pub use error::SchemaError;
pub use parameter::{ParameterKind, ParameterSchema};
