pub mod band;
pub mod crossings;
pub mod error;
