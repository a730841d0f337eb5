//! # CLI Module
//!
//! Command implementations behind the `plcredits` binary. Each command
//! resolves its collaborators from [`crate::config::Settings`], delegates to
//! the credit pipeline or the web server, and reports to the user through the
//! crate's log macros.
//!
//! ## Commands
//!
//! - [`analyze`] - run the pipeline for one playlist, print the summary table
//!   and write both CSV reports
//! - [`serve`] - start the local web form
//!
//! ## Usage Patterns
//!
//! ```bash
//! plcredits analyze https://open.spotify.com/playlist/3K0LuUqyUCRGKDBIhmJNm3
//! plcredits analyze <url> --out-dir reports/
//! plcredits serve --open
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems terminate the process before any request is made.
//! Tracks that cannot be resolved are warnings, never errors.

mod analyze;
mod serve;

pub use analyze::analyze;
pub use serve::serve;
