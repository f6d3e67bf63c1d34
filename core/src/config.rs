//! Process configuration passed explicitly into `Client`.

use serde::Deserialize;

/// User agent sent when neither `-A` nor a caller header provides one.
pub const DEFAULT_USER_AGENT: &str = concat!("httpalchemy/", env!("CARGO_PKG_VERSION"));

/// Defaults shared by every call made through one `Client`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_user_agent: String,
    pub http_proxy: Option<String>,
    pub https_proxy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_user_agent: DEFAULT_USER_AGENT.to_string(),
            http_proxy: None,
            https_proxy: None,
        }
    }
}

impl Config {
    /// Read `HTTPALCHEMY_USER_AGENT`, `HTTP_PROXY` and `HTTPS_PROXY` (or
    /// their lowercase forms). Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_user_agent: first_set(&lookup, &["HTTPALCHEMY_USER_AGENT"])
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            http_proxy: first_set(&lookup, &["HTTP_PROXY", "http_proxy"]),
            https_proxy: first_set(&lookup, &["HTTPS_PROXY", "https_proxy"]),
        }
    }

    /// Proxy for `url`: the HTTPS proxy for `https://` URLs, the HTTP proxy
    /// otherwise.
    pub fn proxy_for(&self, url: &str) -> Option<&str> {
        let is_https = url
            .get(..8)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"));
        if is_https {
            self.https_proxy.as_deref()
        } else {
            self.http_proxy.as_deref()
        }
    }
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_has_no_proxy() {
        let config = Config::default();
        assert_eq!(config.default_user_agent, DEFAULT_USER_AGENT);
        assert!(config.proxy_for("http://example.com").is_none());
        assert!(config.proxy_for("https://example.com").is_none());
    }

    #[test]
    fn lookup_reads_upper_then_lower_case() {
        let config = Config::from_lookup(env(&[
            ("http_proxy", "http://lower:3128"),
            ("HTTPS_PROXY", "http://upper:3129"),
            ("HTTPALCHEMY_USER_AGENT", "agent/1"),
        ]));
        assert_eq!(config.http_proxy.as_deref(), Some("http://lower:3128"));
        assert_eq!(config.https_proxy.as_deref(), Some("http://upper:3129"));
        assert_eq!(config.default_user_agent, "agent/1");
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = Config::from_lookup(env(&[("HTTP_PROXY", ""), ("HTTPALCHEMY_USER_AGENT", "")]));
        assert!(config.http_proxy.is_none());
        assert_eq!(config.default_user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn proxy_is_chosen_by_scheme() {
        let config = Config {
            http_proxy: Some("http://plain:8080".to_string()),
            https_proxy: Some("http://secure:8443".to_string()),
            ..Config::default()
        };
        assert_eq!(config.proxy_for("http://example.com"), Some("http://plain:8080"));
        assert_eq!(config.proxy_for("HTTPS://example.com"), Some("http://secure:8443"));
        assert_eq!(config.proxy_for("example.com"), Some("http://plain:8080"));
    }

    #[test]
    fn deserializes_partial_json() {
        let config: Config = serde_json::from_str(r#"{"https_proxy":"http://p:1"}"#).unwrap();
        assert_eq!(config.https_proxy.as_deref(), Some("http://p:1"));
        assert_eq!(config.default_user_agent, DEFAULT_USER_AGENT);
    }
}
