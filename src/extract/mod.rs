// Thu Oct 15 2026 - Alex

pub mod convention;
pub mod extractor;
pub mod registers;
pub mod value;

pub use convention::AddressWidth;
pub use extractor::Extractor;
pub use registers::{InterruptEvent, RegisterSnapshot};
pub use value::{ExtractedValue, ExtractionNode};
