//! # API Module
//!
//! HTTP handlers behind `plcredits serve`, the browser surface of the credit
//! analyzer.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`: the playlist URL form
//! - [`analyze`] - `POST /analyze`: validates the URL, starts the background
//!   job and redirects to the status page
//! - [`status`] - `GET /status`: progress while running (auto-refreshing),
//!   results, warnings and downloads when done
//! - [`status_json`] - `GET /status.json`: the job state as JSON
//! - [`download_detailed`], [`download_formatted`] - the two CSV reports of
//!   the last finished job
//! - [`health`] - `GET /health`: status and version
//!
//! Errors never leave the page as a bare status code. They are rendered as
//! inline warnings so the form stays usable.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - router and shared [`crate::server::ApiContext`]
//! - [`crate::management`] - job state

mod analyze;
mod download;
mod health;
mod index;
mod page;
mod status;

pub use analyze::analyze;
pub use download::{download_detailed, download_formatted};
pub use health::health;
pub use index::index;
pub use status::{status, status_json};
