//! Main library crate for pdb-align

// Internal module organization
mod core;

// Public API exports
pub use crate::core::aligner::{AlignStats, align_lines, align_stream, align_str};
pub use crate::core::commands::align::align_file;
pub use crate::core::error::AlignError;
pub use crate::core::record::{
    AlignedLine, COORDINATE_RECORDS, CoordinateRecord, FormatError, MIN_COORDINATE_TOKENS,
    NumericField, align_line, is_coordinate_record,
};
