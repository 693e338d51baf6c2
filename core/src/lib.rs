//! Rate-limited clients for the OMIM and UniProt web APIs.
//!
//! # Overview
//! Builds parameterized requests for both services, spaces them at most four
//! per second, executes them and returns the raw response body as a stream.
//! Nothing in the body is parsed.
//!
//! # Design
//! - Each endpoint has a pure `build_*` method producing an `HttpRequest`
//!   and an executing method returning a `ResponseStream`, so URL building and
//!   validation are testable without a network.
//! - Rate-limit state lives in a `Throttle` owned by each client's
//!   `Transport`, not in a global; clients can share one via `Arc`.
//! - Missing required parameters are hard errors raised before dispatch.
//! - The crate logs through `tracing` only and never installs a subscriber.

pub mod config;
pub mod error;
pub mod http;
pub mod omim;
pub mod params;
pub mod throttle;
pub mod transport;
pub mod uniprot;

pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, ResponseStream};
pub use omim::{OmimClient, OmimHost, SearchTarget};
pub use params::{ParamValue, Params};
pub use throttle::{Throttle, MIN_INTERVAL};
pub use transport::Transport;
pub use uniprot::{EntryFormat, UniprotClient};
