//! Transport backends.
//!
//! # Design
//! An `Engine` receives a fully resolved `PreparedRequest`, performs exactly
//! one HTTP exchange and returns the buffered `RawResponse`. Transport
//! failures are returned as-is; engines never retry. Backends are looked up
//! by name; `ureq` is the only one shipped.

use crate::error::CurlError;
use crate::http::{PreparedRequest, RawResponse};
use crate::ureq_engine::UreqEngine;

/// Name of the engine used when none is requested.
pub const DEFAULT_ENGINE: &str = "ureq";

/// Contract every transport backend satisfies.
pub trait Engine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send `request` and buffer the response. The request, and with it every
    /// open upload file, is consumed.
    fn send(&self, request: PreparedRequest) -> Result<RawResponse, CurlError>;
}

/// Find a backend by name. `requests` is accepted as an alias of `ureq`.
pub fn lookup(name: &str) -> Result<Box<dyn Engine>, CurlError> {
    match name {
        "ureq" | "requests" => Ok(Box::new(UreqEngine)),
        other => Err(CurlError::UnknownEngine(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_is_registered() {
        let engine = lookup(DEFAULT_ENGINE).unwrap();
        assert_eq!(engine.name(), "ureq");
    }

    #[test]
    fn requests_is_an_alias_of_ureq() {
        let engine = lookup("requests").unwrap();
        assert_eq!(engine.name(), "ureq");
    }

    #[test]
    fn unknown_engine_is_a_lookup_error() {
        let err = lookup("httpx").err().unwrap();
        assert!(matches!(err, CurlError::UnknownEngine(ref name) if name == "httpx"));
    }
}
