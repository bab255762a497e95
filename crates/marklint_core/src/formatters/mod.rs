//! Machine-readable output formats.

mod sarif;

pub use sarif::generate_sarif;
