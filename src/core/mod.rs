pub mod aligner;
pub mod commands;
pub mod error;
pub mod record;
