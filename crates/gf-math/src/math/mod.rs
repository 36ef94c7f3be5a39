//! Core math modules.

pub mod cov;
pub mod interval;
pub mod stable;
