//! Task identity and status types shared by all modalities.

mod types;

pub use types::*;
