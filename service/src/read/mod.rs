//! Read entities definitions.

pub mod offer;
pub mod package;
