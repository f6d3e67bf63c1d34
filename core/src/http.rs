//! Request and response descriptors.
//!
//! # Design
//! `CurlRequest` is the canonical description of one curl invocation after
//! alias resolution and normalization. It is immutable once built and is
//! kept alive inside the returned `CurlResponse` so callers can inspect what
//! was asked for.
//!
//! `PreparedRequest` is what an `Engine` consumes: every default has been
//! applied and every `@path` form value has been opened. It owns the upload
//! file handles, so dropping it (after the transport read them, or on any
//! error) closes them.

use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::CurlError;
use crate::normalize::Fields;

/// HTTP method accepted by `-X` / `--request`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Connect,
    Link,
    Unlink,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Connect => "CONNECT",
            Method::Link => "LINK",
            Method::Unlink => "UNLINK",
        }
    }
}

impl FromStr for Method {
    type Err = CurlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "CONNECT" => Ok(Method::Connect),
            "LINK" => Ok(Method::Link),
            "UNLINK" => Ok(Method::Unlink),
            _ => Err(CurlError::IncompatibleType(format!("unsupported method `{s}`"))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One curl invocation after alias resolution and normalization.
///
/// Built by `create_curl_request`. Headers and form fields hold exactly what
/// the caller supplied; defaults are only applied by `CurlRequest::prepare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlRequest {
    pub(crate) url: String,
    pub(crate) method: Method,
    pub(crate) data: Option<String>,
    pub(crate) form: Option<Fields>,
    pub(crate) auth: Option<(String, String)>,
    pub(crate) user_agent: Option<String>,
    pub(crate) headers: Option<Fields>,
    pub(crate) verbose: bool,
    pub(crate) follow_redirects: bool,
}

impl CurlRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn form(&self) -> Option<&Fields> {
        self.form.as_ref()
    }

    pub fn auth(&self) -> Option<(&str, &str)> {
        self.auth.as_ref().map(|(login, password)| (login.as_str(), password.as_str()))
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn headers(&self) -> Option<&Fields> {
        self.headers.as_ref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }
}

/// A single multipart form field.
#[derive(Debug)]
pub enum FormPart {
    Text(String),
    /// An `@path` value, opened for binary reading.
    File {
        path: PathBuf,
        file: File,
    },
}

/// A fully resolved request ready for an `Engine`.
#[derive(Debug)]
pub struct PreparedRequest {
    pub url: String,
    pub method: Method,
    /// Final header list, built-in defaults first and caller values applied
    /// over them.
    pub headers: Fields,
    pub body: Option<String>,
    pub form: Vec<(String, FormPart)>,
    pub proxy: Option<String>,
    pub follow_redirects: bool,
    pub verbose: bool,
}

impl PreparedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name).map(|(_, value)| value.as_str())
    }
}

pub(crate) fn find_header<'a>(headers: &'a Fields, name: &str) -> Option<(&'a String, &'a String)> {
    headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name))
}

/// What a transport hands back: status line, headers and the buffered body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Normalized response returned to the caller.
#[derive(Debug)]
pub struct CurlResponse {
    status_code: u16,
    reason: String,
    raw: RawResponse,
    request: CurlRequest,
}

impl CurlResponse {
    pub fn new(raw: RawResponse, request: CurlRequest) -> Self {
        Self {
            status_code: raw.status,
            reason: raw.reason.clone(),
            raw,
            request,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// `true` for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CurlError> {
        Ok(serde_json::from_slice(&self.raw.body)?)
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// The descriptor this response answers.
    pub fn request(&self) -> &CurlRequest {
        &self.request
    }
}

impl fmt::Display for CurlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CurlResponse [{} {}]>", self.status_code, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CurlRequest {
        CurlRequest {
            url: "http://localhost".to_string(),
            method: Method::Get,
            data: None,
            form: None,
            auth: None,
            user_agent: None,
            headers: None,
            verbose: false,
            follow_redirects: false,
        }
    }

    fn response(status: u16, body: &str) -> CurlResponse {
        let raw = RawResponse {
            status,
            reason: "Reason".to_string(),
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        };
        CurlResponse::new(raw, request())
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("UNLINK".parse::<Method>().unwrap(), Method::Unlink);
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn ok_covers_exactly_2xx() {
        assert!(!response(199, "").ok());
        assert!(response(200, "").ok());
        assert!(response(299, "").ok());
        assert!(!response(300, "").ok());
        assert!(!response(404, "").ok());
    }

    #[test]
    fn text_and_json_decode_body() {
        let resp = response(200, r#"{"test":"test"}"#);
        assert_eq!(resp.text(), r#"{"test":"test"}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["test"], "test");
    }

    #[test]
    fn json_on_plain_text_fails() {
        let err = response(200, "not json").json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, CurlError::Decode(_)));
    }

    #[test]
    fn display_shows_status_line() {
        assert_eq!(response(404, "").to_string(), "<CurlResponse [404 Reason]>");
    }
}
