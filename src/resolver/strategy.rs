//! Resolution strategies.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::UnsupportedStrategy;
use crate::locale::Locale;
use crate::resolver::context::RequestContext;

/// An opaque caller-supplied resolver over the request context.
///
/// Invoked directly by the [`Strategy::Custom`] variant; its result is not
/// re-validated against the supported set (that is the caller's contract).
pub type CustomResolver = Arc<dyn Fn(&dyn RequestContext) -> Option<Locale> + Send + Sync>;

/// Where to look for the request locale.
///
/// Dispatch is an explicit match in the resolver; anything a configuration
/// source names that is not one of these kinds fails [`Strategy::from_str`]
/// with [`UnsupportedStrategy`] and degrades to "absent" rather than erroring
/// a request.
#[derive(Clone)]
pub enum Strategy {
    /// Explicit `locale` request/query parameter.
    Param,
    /// First path segment.
    Path,
    /// First dot-separated label of the request host.
    Subdomain,
    /// Authenticated principal's preference field (primary, then alias).
    User,
    /// Stored session value.
    Session,
    /// Stored cookie value.
    Cookie,
    /// Negotiated `Accept-Language` header.
    Header,
    /// Every built-in source in fixed precedence order, short-circuiting.
    Auto,
    /// A caller-supplied function over the context.
    Custom(CustomResolver),
}

impl Strategy {
    /// Precedence order tried by [`Strategy::Auto`].
    pub const AUTO_ORDER: [Self; 7] = [
        Self::Param,
        Self::Path,
        Self::Subdomain,
        Self::User,
        Self::Session,
        Self::Cookie,
        Self::Header,
    ];

    /// Stable identifier for logs and configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::Path => "path",
            Self::Subdomain => "subdomain",
            Self::User => "user",
            Self::Session => "session",
            Self::Cookie => "cookie",
            Self::Header => "header",
            Self::Auto => "auto",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnsupportedStrategy;

    /// Parses a configuration identifier. `custom` is not parseable: the
    /// callable has to be supplied programmatically.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "param" => Ok(Self::Param),
            "path" => Ok(Self::Path),
            "subdomain" => Ok(Self::Subdomain),
            "user" => Ok(Self::User),
            "session" => Ok(Self::Session),
            "cookie" => Ok(Self::Cookie),
            "header" => Ok(Self::Header),
            "auto" => Ok(Self::Auto),
            other => Err(UnsupportedStrategy { name: other.to_string() }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("param")]
    #[case("path")]
    #[case("subdomain")]
    #[case("user")]
    #[case("session")]
    #[case("cookie")]
    #[case("header")]
    #[case("auto")]
    fn from_str_round_trips_names(#[case] name: &str) {
        let strategy: Strategy = name.parse().unwrap();
        assert_that!(strategy.name(), eq(name));
    }

    #[rstest]
    #[case("custom")]
    #[case("geoip")]
    #[case("")]
    fn from_str_rejects_unknown_identifiers(#[case] name: &str) {
        let result: std::result::Result<Strategy, _> = name.parse();
        assert_that!(result, err(eq(UnsupportedStrategy { name: name.to_string() })));
    }
}
