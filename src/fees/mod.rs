//! Exchange fee table and fee helpers

pub mod table;
pub mod transfer;

pub use table::*;
pub use transfer::*;
