//! Curl-style options and alias resolution.
//!
//! # Design
//! Every option can be given under its short flag (`-d`) or its long flag
//! (`--data`). `CurlOptions` records both slots separately so `resolve` can
//! reject a call that fills both, checking every pair before any value is
//! used.
//!
//! Header, form and credential values are taken as `serde_json::Value` and
//! normalized later by `create_curl_request`; a JSON `null` counts as "not
//! supplied".

use serde_json::Value;

use crate::error::CurlError;
use crate::http::Method;

/// Short and long spelling of every recognized option, in resolution order.
pub const OPTION_ALIASES: [(&str, &str); 8] = [
    ("-d", "--data"),
    ("-F", "--form"),
    ("-u", "--user"),
    ("-A", "--user-agent"),
    ("-v", "--verbose"),
    ("-H", "--header"),
    ("-L", "--location"),
    ("-X", "--request"),
];

#[derive(Debug, Clone)]
struct Aliased<T> {
    short: Option<T>,
    long: Option<T>,
}

impl<T> Default for Aliased<T> {
    fn default() -> Self {
        Self {
            short: None,
            long: None,
        }
    }
}

impl<T> Aliased<T> {
    fn is_conflicting(&self) -> bool {
        self.short.is_some() && self.long.is_some()
    }

    fn resolve(self) -> Option<T> {
        self.short.or(self.long)
    }
}

fn loose(value: impl Into<Value>) -> Option<Value> {
    Some(value.into()).filter(|v| !v.is_null())
}

/// Options for one curl call, built flag by flag.
///
/// ```
/// use httpalchemy::{CurlOptions, Method};
/// use serde_json::json;
///
/// let options = CurlOptions::new()
///     .X(Method::Post)
///     .H(json!(["Accept: application/json"]))
///     .data("key=value");
/// assert!(options.resolve().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    data: Aliased<String>,
    form: Aliased<Value>,
    user: Aliased<Value>,
    user_agent: Aliased<String>,
    verbose: Aliased<bool>,
    header: Aliased<Value>,
    location: Aliased<bool>,
    request: Aliased<Method>,
    engine: Option<String>,
}

#[allow(non_snake_case)]
impl CurlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `-d`: request body.
    pub fn d(mut self, data: impl Into<String>) -> Self {
        self.data.short = Some(data.into());
        self
    }

    /// `--data`: request body.
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data.long = Some(data.into());
        self
    }

    /// `-F`: form fields; values starting with `@` upload a file.
    pub fn F(mut self, form: impl Into<Value>) -> Self {
        self.form.short = loose(form);
        self
    }

    /// `--form`
    pub fn form(mut self, form: impl Into<Value>) -> Self {
        self.form.long = loose(form);
        self
    }

    /// `-u`: `"login:password"` or `["login", "password"]`.
    pub fn u(mut self, user: impl Into<Value>) -> Self {
        self.user.short = loose(user);
        self
    }

    /// `--user`
    pub fn user(mut self, user: impl Into<Value>) -> Self {
        self.user.long = loose(user);
        self
    }

    /// `-A`: explicit User-Agent.
    pub fn A(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent.short = Some(user_agent.into());
        self
    }

    /// `--user-agent`
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent.long = Some(user_agent.into());
        self
    }

    /// `-v`
    pub fn v(mut self, verbose: bool) -> Self {
        self.verbose.short = Some(verbose);
        self
    }

    /// `--verbose`
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose.long = Some(verbose);
        self
    }

    /// `-H`: headers as a mapping, `[name, value]` pairs or `"Name: value"`
    /// strings.
    pub fn H(mut self, headers: impl Into<Value>) -> Self {
        self.header.short = loose(headers);
        self
    }

    /// `--header`
    pub fn header(mut self, headers: impl Into<Value>) -> Self {
        self.header.long = loose(headers);
        self
    }

    /// `-L`: follow redirects.
    pub fn L(mut self, location: bool) -> Self {
        self.location.short = Some(location);
        self
    }

    /// `--location`
    pub fn location(mut self, location: bool) -> Self {
        self.location.long = Some(location);
        self
    }

    /// `-X`: HTTP method.
    pub fn X(mut self, method: Method) -> Self {
        self.request.short = Some(method);
        self
    }

    /// `--request`
    pub fn request(mut self, method: Method) -> Self {
        self.request.long = Some(method);
        self
    }

    /// Backend name, see `engine::lookup`.
    pub fn engine(mut self, name: impl Into<String>) -> Self {
        self.engine = Some(name.into());
        self
    }

    /// Reject conflicting aliases, then collapse every pair to one value.
    pub fn resolve(self) -> Result<ResolvedOptions, CurlError> {
        let conflicts = [
            self.data.is_conflicting(),
            self.form.is_conflicting(),
            self.user.is_conflicting(),
            self.user_agent.is_conflicting(),
            self.verbose.is_conflicting(),
            self.header.is_conflicting(),
            self.location.is_conflicting(),
            self.request.is_conflicting(),
        ];
        if let Some(&(short, long)) = OPTION_ALIASES
            .iter()
            .zip(conflicts)
            .find_map(|(pair, conflict)| conflict.then_some(pair))
        {
            return Err(CurlError::ConflictingAlias { short, long });
        }

        Ok(ResolvedOptions {
            data: self.data.resolve(),
            form: self.form.resolve(),
            user: self.user.resolve(),
            user_agent: self.user_agent.resolve(),
            verbose: self.verbose.resolve().unwrap_or(false),
            header: self.header.resolve(),
            location: self.location.resolve().unwrap_or(false),
            request: self.request.resolve().unwrap_or_default(),
            engine: self.engine,
        })
    }
}

/// Options with every alias pair collapsed to a single value.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    pub data: Option<String>,
    pub form: Option<Value>,
    pub user: Option<Value>,
    pub user_agent: Option<String>,
    pub verbose: bool,
    pub header: Option<Value>,
    pub location: bool,
    pub request: Method,
    pub engine: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn conflict_of(options: CurlOptions) -> (&'static str, &'static str) {
        match options.resolve().unwrap_err() {
            CurlError::ConflictingAlias { short, long } => (short, long),
            other => panic!("expected alias conflict, got {other:?}"),
        }
    }

    #[test]
    fn every_pair_conflicts_when_both_forms_are_set() {
        let cases = [
            CurlOptions::new().d("a").data("b"),
            CurlOptions::new().F(json!(["a=b"])).form(json!(["a=b"])),
            CurlOptions::new().u("a:b").user("c:d"),
            CurlOptions::new().A("x").user_agent("x"),
            CurlOptions::new().v(true).verbose(false),
            CurlOptions::new().H(json!({})).header(json!({})),
            CurlOptions::new().L(true).location(true),
            CurlOptions::new().X(Method::Get).request(Method::Post),
        ];
        for (options, expected) in cases.into_iter().zip(OPTION_ALIASES) {
            assert_eq!(conflict_of(options), expected);
        }
    }

    #[test]
    fn equal_values_still_conflict() {
        assert_eq!(
            conflict_of(CurlOptions::new().d("same").data("same")),
            ("-d", "--data")
        );
    }

    #[test]
    fn conflict_anywhere_aborts_resolution() {
        let options = CurlOptions::new().d("body").X(Method::Put).L(true).location(false);
        assert_eq!(conflict_of(options), ("-L", "--location"));
    }

    #[test]
    fn short_or_long_form_resolves() {
        let short = CurlOptions::new().d("short").resolve().unwrap();
        assert_eq!(short.data.as_deref(), Some("short"));

        let long = CurlOptions::new().data("long").resolve().unwrap();
        assert_eq!(long.data.as_deref(), Some("long"));

        let method = CurlOptions::new().request(Method::Patch).resolve().unwrap();
        assert_eq!(method.request, Method::Patch);
    }

    #[test]
    fn nothing_set_resolves_to_defaults() {
        let resolved = CurlOptions::new().resolve().unwrap();
        assert!(resolved.data.is_none());
        assert!(resolved.form.is_none());
        assert!(resolved.user.is_none());
        assert!(resolved.user_agent.is_none());
        assert!(resolved.header.is_none());
        assert!(!resolved.verbose);
        assert!(!resolved.location);
        assert_eq!(resolved.request, Method::Get);
        assert!(resolved.engine.is_none());
    }

    #[test]
    fn null_counts_as_not_supplied() {
        let resolved = CurlOptions::new()
            .H(Value::Null)
            .header(json!(["Accept: */*"]))
            .resolve()
            .unwrap();
        assert_eq!(resolved.header, Some(json!(["Accept: */*"])));
    }
}
