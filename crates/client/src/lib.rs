//! Client side of the city record store: an HTTP client for the three
//! record routes, the raw and formatted renderers, and the polling loop
//! used by the `city-client` binary.

pub mod api;
pub mod cli;
pub mod demo;
pub mod errors;
pub mod poller;
pub mod render;

pub use api::RecordClient;
pub use errors::ClientError;
