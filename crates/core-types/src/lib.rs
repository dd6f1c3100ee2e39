pub mod enums;
pub mod error;
pub mod structs;
pub mod validate;

// Re-export the core types to provide a clean public API.
pub use enums::TimeInterval;
pub use error::CoreError;
pub use structs::{
    PriceBar, RawField, RawPriceBar, TimeSeries, TimeSeriesMetadata, ValidationResult,
};
pub use validate::{messages, parse_price_bar, validate_price_bar};
