//! High-level Chatwork API services.
//!
//! The primary SDK surface is exposed via service accessors on the client:
//! - `Client::rooms()`

pub mod rooms;

pub use rooms::*;
