//! Output Generation
//!
//! Run statistics and on-disk export.

pub mod files;
pub mod stats;

pub use files::*;
pub use stats::*;
