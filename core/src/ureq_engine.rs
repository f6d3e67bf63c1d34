//! `ureq`-backed engine.
//!
//! A new agent is built for every call, so no connection outlives the call
//! that opened it. Status codes are returned as data; only transport
//! failures become errors.

use ureq::http;

use crate::engine::Engine;
use crate::error::CurlError;
use crate::http::{find_header, PreparedRequest, RawResponse};
use crate::multipart;

/// Blocking engine on top of `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqEngine;

impl UreqEngine {
    fn agent(&self, proxy: Option<&str>, follow_redirects: bool) -> Result<ureq::Agent, CurlError> {
        // LINK and UNLINK are not standard HTTP/1.1 methods.
        let mut config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true);
        if !follow_redirects {
            config = config.max_redirects(0);
        }
        let proxy = match proxy {
            Some(uri) => Some(
                ureq::Proxy::new(uri)
                    .map_err(|e| CurlError::InvalidRequest(format!("proxy `{uri}`: {e}")))?,
            ),
            None => None,
        };
        Ok(config.proxy(proxy).build().new_agent())
    }
}

impl Engine for UreqEngine {
    fn name(&self) -> &'static str {
        "ureq"
    }

    fn send(&self, request: PreparedRequest) -> Result<RawResponse, CurlError> {
        let PreparedRequest {
            url,
            method,
            mut headers,
            body,
            form,
            proxy,
            follow_redirects,
            ..
        } = request;

        let payload = if form.is_empty() {
            body.map(String::into_bytes)
        } else {
            let encoded = multipart::encode(form)?;
            if find_header(&headers, "Content-Type").is_none() {
                headers.insert("Content-Type".to_string(), encoded.content_type);
            }
            Some(encoded.body)
        };

        let mut builder = http::Request::builder().method(method.as_str()).uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let agent = self.agent(proxy.as_deref(), follow_redirects)?;
        let mut response = match payload {
            Some(bytes) => agent.run(builder.body(bytes).map_err(invalid)?)?,
            None => agent.run(builder.body(()).map_err(invalid)?)?,
        };

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}

fn invalid(err: http::Error) -> CurlError {
    CurlError::InvalidRequest(err.to_string())
}
