//! Curl-style HTTP requests on top of a pluggable backend client.
//!
//! # Overview
//! Translates curl flags (`-X`, `-d`, `-H`, `-F`, `-u`, `-A`, `-L`, `-v` and
//! their long forms) into a single HTTP request and returns a normalized
//! response.
//!
//! ```no_run
//! use httpalchemy::{curl, CurlOptions, Method};
//!
//! let resp = curl(
//!     "http://127.0.0.1:7575/echo_body",
//!     CurlOptions::new().X(Method::Post).d("key=value"),
//! )?;
//! assert!(resp.ok());
//! # Ok::<(), httpalchemy::CurlError>(())
//! ```
//!
//! # Design
//! - `options` rejects calls that give both the short and the long form of
//!   an option, before anything else runs.
//! - `normalize` turns loosely typed header, form and credential input into
//!   canonical maps.
//! - `builder` produces the immutable `CurlRequest` and, from it, the
//!   `PreparedRequest` with defaults applied and upload files opened.
//! - `engine` is the transport boundary; `ureq_engine` is the one backend.
//! - `Config` is passed explicitly; there is no global state.

pub mod builder;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod multipart;
pub mod normalize;
pub mod options;
pub mod ureq_engine;

pub use builder::create_curl_request;
pub use client::{curl, Client};
pub use config::{Config, DEFAULT_USER_AGENT};
pub use engine::{lookup, Engine, DEFAULT_ENGINE};
pub use error::CurlError;
pub use http::{CurlRequest, CurlResponse, FormPart, Method, PreparedRequest, RawResponse};
pub use normalize::{normalize_auth, normalize_forms, normalize_header_and_form, normalize_headers, Fields};
pub use options::{CurlOptions, ResolvedOptions, OPTION_ALIASES};
pub use ureq_engine::UreqEngine;
