//! Shared response types.

pub mod rooms;

pub use rooms::*;
