//! Reference models: fingerprints of known objects, built once and matched
//! against many query frames.

pub mod fingerprint;
pub mod reference;


pub use fingerprint::{Fingerprint, MAX_GRID, bit_count};
pub use reference::ReferenceModel;
