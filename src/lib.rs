//! Descriptive parameters of a one-dimensional band: peak position and
//! value, intensity-weighted barycenter, and full width at half maximum.
//!
//! ```
//! use bandparams::processing::band::analyze;
//! use bandparams::state::band_table::{BandTable, Sample};
//!
//! let table = BandTable::new(vec![
//!     Sample::new(0.0, 0.0),
//!     Sample::new(1.0, 2.0),
//!     Sample::new(2.0, 4.0),
//!     Sample::new(3.0, 2.0),
//!     Sample::new(4.0, 0.0),
//! ])?;
//! let params = analyze(&table)?;
//! assert_eq!(params.fwhm, 2.0);
//! # Ok::<(), bandparams::processing::error::BandError>(())
//! ```

pub mod state;
pub mod data;
pub mod processing;
pub mod render;
pub mod app;
