//! Typed views of common SCUTTLE records.
//!
//! The client itself passes records around as [`serde_json::Value`]. These
//! structs name the fields callers usually need and keep everything else in
//! an `extra` map, so decoding never drops data.

mod forum;
mod page;
mod revision;
mod wiki;

pub use forum::*;
pub use page::*;
pub use revision::*;
pub use wiki::*;
