// Thu Oct 15 2026 - Alex

pub mod error;
pub mod resolver;

pub use error::SymbolError;
pub use resolver::{StaticSymbolResolver, SymbolResolver};
