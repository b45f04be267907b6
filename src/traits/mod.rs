//! Trait definitions at the seams of the client.
//!
//! [`Transport`] sends requests; [`WikiApi`] is the set of resources one API
//! version exposes on top of a transport.

mod api;
mod transport;

pub use api::WikiApi;
pub use transport::Transport;
