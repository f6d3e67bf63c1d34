//! Public entry points.
//!
//! # Design
//! `Client` holds an immutable `Config` and a default engine and carries no
//! other state between calls. Each `curl` call runs the whole pipeline once:
//! resolve aliases, normalize, build, prepare, send. Every error is returned
//! to the caller unchanged; nothing is retried.

use std::fmt;

use tracing::{debug, info};

use crate::builder::create_curl_request;
use crate::config::Config;
use crate::engine::{lookup, Engine};
use crate::error::CurlError;
use crate::http::CurlResponse;
use crate::options::CurlOptions;
use crate::ureq_engine::UreqEngine;

/// Synchronous curl-style client.
pub struct Client {
    config: Config,
    engine: Box<dyn Engine>,
}

impl Client {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            engine: Box::new(UreqEngine),
        }
    }

    /// Use `engine` for calls that do not name one explicitly.
    pub fn with_engine(mut self, engine: impl Engine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Perform one request described by curl-style `options`.
    pub fn curl(&self, url: &str, options: CurlOptions) -> Result<CurlResponse, CurlError> {
        let mut resolved = options.resolve()?;
        let engine_name = resolved.engine.take();
        let request = create_curl_request(url, resolved)?;

        let named;
        let engine = match engine_name {
            Some(name) => {
                named = lookup(&name)?;
                named.as_ref()
            }
            None => self.engine.as_ref(),
        };

        let prepared = request.prepare(&self.config)?;
        let verbose = prepared.verbose;
        if verbose {
            info!(method = %prepared.method, url = %prepared.url, engine = engine.name(), "sending request");
            for (name, value) in &prepared.headers {
                info!("> {name}: {value}");
            }
        } else {
            debug!(method = %prepared.method, url = %prepared.url, engine = engine.name(), "sending request");
        }

        let raw = engine.send(prepared)?;
        if verbose {
            info!(status = raw.status, reason = %raw.reason, bytes = raw.body.len(), "received response");
        } else {
            debug!(status = raw.status, bytes = raw.body.len(), "received response");
        }

        Ok(CurlResponse::new(raw, request))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Perform one request with the default configuration and engine.
pub fn curl(url: &str, options: CurlOptions) -> Result<CurlResponse, CurlError> {
    Client::new().curl(url, options)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::http::{Method, PreparedRequest, RawResponse};

    /// Records what it was asked to send and answers with a fixed response.
    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<(Method, String, Vec<(String, String)>, Option<String>)>>>,
    }

    impl Engine for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn send(&self, request: PreparedRequest) -> Result<RawResponse, CurlError> {
            let headers = request.headers.clone().into_iter().collect();
            self.seen
                .lock()
                .unwrap()
                .push((request.method, request.url.clone(), headers, request.body.clone()));
            Ok(RawResponse {
                status: 201,
                reason: "Created".to_string(),
                headers: Vec::new(),
                body: br#"{"ok":true}"#.to_vec(),
            })
        }
    }

    #[test]
    fn pipeline_hands_prepared_request_to_engine() {
        let recorder = Recorder::default();
        let client = Client::new().with_engine(recorder.clone());

        let resp = client
            .curl(
                "http://example.com/items",
                CurlOptions::new().X(Method::Post).d("key=value").A("tester"),
            )
            .unwrap();

        assert_eq!(resp.status_code(), 201);
        assert_eq!(resp.reason(), "Created");
        assert!(resp.ok());
        assert_eq!(resp.json::<serde_json::Value>().unwrap(), json!({"ok": true}));
        assert_eq!(resp.request().data(), Some("key=value"));

        let seen = recorder.seen.lock().unwrap();
        let (method, url, headers, body) = &seen[0];
        assert_eq!(*method, Method::Post);
        assert_eq!(url, "http://example.com/items");
        assert_eq!(body.as_deref(), Some("key=value"));
        assert!(headers.contains(&("User-Agent".to_string(), "tester".to_string())));
        assert!(headers.contains(&(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string()
        )));
    }

    #[test]
    fn alias_conflict_stops_before_engine() {
        let recorder = Recorder::default();
        let client = Client::new().with_engine(recorder.clone());

        let err = client
            .curl("example.com", CurlOptions::new().d("test_data").data("test_data1"))
            .unwrap_err();
        assert!(matches!(err, CurlError::ConflictingAlias { short: "-d", long: "--data" }));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn type_error_stops_before_engine() {
        let recorder = Recorder::default();
        let client = Client::new().with_engine(recorder.clone());

        let err = client.curl("example.com", CurlOptions::new().H(json!({"bad": 2}))).unwrap_err();
        assert!(matches!(err, CurlError::IncompatibleType(_)));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unknown_engine_name_fails() {
        let err = curl("http://example.com", CurlOptions::new().engine("httpx")).unwrap_err();
        assert!(matches!(err, CurlError::UnknownEngine(_)));
    }

    #[test]
    fn debug_names_the_engine() {
        let client = Client::new();
        assert!(format!("{client:?}").contains("ureq"));
    }
}
