//! Types shared by every record kind

pub mod errors;
pub mod fields;
