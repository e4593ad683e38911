//! Builds compact unicode tables from `UnicodeData.txt`.
//!
//! A run parses every row into a [`CodepointRecord`], deduplicates the numeric values into a [`ValueTable`] and collects
//! the lowercase character names. The result can then be emitted as rust source (records and values) and as a null
//! separated name blob, both in source row order.
use ucdgen_logging::LogCategory;

mod error;
pub use error::*;

mod row;
pub use row::*;

mod value;
pub use value::*;

mod record;
pub use record::*;

mod emit;
pub use emit::*;

pub const LOG_CAT : LogCategory = LogCategory::new("UnicodeData");
