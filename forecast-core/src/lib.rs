//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - A blocking client that turns a US zip code into a one-day forecast headline
//! - The transport seam the client issues its requests through
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.
//!
//! ```no_run
//! use forecast_core::ForecastClient;
//!
//! let client = ForecastClient::new("0123456789abcdef0123456789abcdef")?;
//! println!("{}", client.get_forecast("02134")?);
//! # Ok::<(), forecast_core::ForecastError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{Endpoints, ForecastClient, REQUEST_TIMEOUT};
pub use config::Config;
pub use error::{ForecastError, Result};
pub use model::{ApiKey, LocationKey, PostalCode};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportError};
