//! Catalog search used to find entries for a custom list

mod params;

pub use params::*;
