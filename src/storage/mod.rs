//! Data persistence and file operations

pub mod opportunities;
pub mod calculations;

pub use opportunities::*;
pub use calculations::*;
