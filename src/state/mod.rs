pub mod band_table;
pub mod settings;
