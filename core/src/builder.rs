//! Request construction.
//!
//! # Design
//! Building happens in two steps. `create_curl_request` normalizes the
//! resolved options into an immutable `CurlRequest` and never touches the
//! filesystem. `CurlRequest::prepare` applies defaults, opens upload files
//! and picks the proxy, producing the `PreparedRequest` an engine consumes.
//! Neither step performs network I/O.

use std::fs::File;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::Config;
use crate::error::CurlError;
use crate::http::{find_header, CurlRequest, FormPart, PreparedRequest};
use crate::normalize::{normalize_auth, normalize_forms, normalize_headers, Fields};
use crate::options::ResolvedOptions;

/// Headers present on every request unless the caller overrides them.
pub const DEFAULT_HEADERS: [(&str, &str); 1] = [("Accept", "*/*")];

/// Content type injected when a body is sent without one.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Normalize resolved options into a request descriptor.
pub fn create_curl_request(url: &str, options: ResolvedOptions) -> Result<CurlRequest, CurlError> {
    let headers = options
        .header
        .as_ref()
        .map(normalize_headers)
        .transpose()?
        .filter(|fields| !fields.is_empty());
    let form = options
        .form
        .as_ref()
        .map(normalize_forms)
        .transpose()?
        .filter(|fields| !fields.is_empty());
    let auth = options.user.as_ref().map(normalize_auth).transpose()?;

    Ok(CurlRequest {
        url: url.to_string(),
        method: options.request,
        data: options.data,
        form,
        auth,
        user_agent: options.user_agent,
        headers,
        verbose: options.verbose,
        follow_redirects: options.location,
    })
}

impl CurlRequest {
    /// Resolve defaults, open upload files and choose a proxy.
    ///
    /// Header names are matched case-insensitively when deciding whether the
    /// caller already supplied `Content-Type`, `User-Agent`, `Authorization`
    /// or a default header. Any file opened before a later failure is closed
    /// when the partially built form is dropped.
    pub fn prepare(&self, config: &Config) -> Result<PreparedRequest, CurlError> {
        if self.data.is_some() && self.form.is_some() {
            return Err(CurlError::incompatible(
                "a request body (-d) and form fields (-F) cannot be combined",
            ));
        }

        let caller = self.headers.clone().unwrap_or_default();
        let mut headers = Fields::new();
        for (name, value) in DEFAULT_HEADERS {
            if find_header(&caller, name).is_none() {
                headers.insert(name.to_string(), value.to_string());
            }
        }
        headers.extend(caller);

        if self.data.is_some() && find_header(&headers, "Content-Type").is_none() {
            headers.insert("Content-Type".to_string(), FORM_URLENCODED.to_string());
        }

        match &self.user_agent {
            Some(agent) => set_header(&mut headers, "User-Agent", agent),
            None if find_header(&headers, "User-Agent").is_none() => {
                headers.insert("User-Agent".to_string(), config.default_user_agent.clone());
            }
            None => {}
        }

        if let Some((login, password)) = &self.auth {
            if find_header(&headers, "Authorization").is_none() {
                let token = STANDARD.encode(format!("{login}:{password}"));
                headers.insert("Authorization".to_string(), format!("Basic {token}"));
            }
        }

        let form = match &self.form {
            Some(fields) => open_form(fields)?,
            None => Vec::new(),
        };

        Ok(PreparedRequest {
            url: self.url.clone(),
            method: self.method,
            headers,
            body: self.data.clone(),
            form,
            proxy: config.proxy_for(&self.url).map(str::to_string),
            follow_redirects: self.follow_redirects,
            verbose: self.verbose,
        })
    }
}

/// Replace `name` regardless of the caller's casing.
fn set_header(headers: &mut Fields, name: &str, value: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

fn open_form(fields: &Fields) -> Result<Vec<(String, FormPart)>, CurlError> {
    let mut parts = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let part = match value.strip_prefix('@') {
            Some(path) => {
                let path = PathBuf::from(path);
                let file = File::open(&path)?;
                FormPart::File { path, file }
            }
            None => FormPart::Text(value.clone()),
        };
        parts.push((name.clone(), part));
    }
    Ok(parts)
}
