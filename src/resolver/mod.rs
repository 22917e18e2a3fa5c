//! Request-locale resolution.
//!
//! Determines the "current" locale for an inbound request by trying an
//! ordered list of extraction strategies, funneling every candidate through
//! the locale validator. Resolution is total over arbitrary request input:
//! bad candidates yield "absent" for their strategy, never an error.

pub mod context;
pub mod header;
pub mod strategy;

use std::time::Duration;

pub use context::{
    CookieStore,
    Principal,
    RequestContext,
    SessionStore,
};
pub use strategy::{
    CustomResolver,
    Strategy,
};

use crate::config::ResolverConfig;
use crate::locale::Locale;
use crate::validator::LocaleValidator;

/// Cookie lifetime used by [`LocaleResolver::persist`]: one year.
pub const COOKIE_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Where [`LocaleResolver::persist`] writes a resolved locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistTarget {
    /// Session storage under [`context::LOCALE_SESSION_KEY`].
    Session,
    /// A cookie named [`context::LOCALE_COOKIE`] with a one-year max-age.
    Cookie,
    /// The authenticated principal's preference field.
    UserProfile,
}

/// Resolves the request locale against one configuration.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    /// Strategy order, supported set, and fallback.
    config: ResolverConfig,
    /// Validator built over the configured supported set.
    validator: LocaleValidator,
}

impl LocaleResolver {
    /// Creates a resolver for the given configuration.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        let validator = LocaleValidator::new(config.supported.clone());
        Self { config, validator }
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Tries a single strategy. Returns `None` when the source has no
    /// candidate or the candidate fails validation.
    #[must_use]
    pub fn resolve(&self, ctx: &dyn RequestContext, strategy: &Strategy) -> Option<Locale> {
        match strategy {
            Strategy::Param => {
                self.validated(ctx, ctx.param(context::LOCALE_PARAM), "param", true)
            }
            Strategy::Path => {
                let segment =
                    ctx.path().split('/').find(|s| !s.is_empty()).map(str::to_string);
                self.validated(ctx, segment, "path", true)
            }
            Strategy::Subdomain => {
                let label = ctx
                    .host()
                    .and_then(|host| host.split('.').next().map(str::to_string));
                self.validated(ctx, label, "subdomain", true)
            }
            Strategy::User => {
                let principal = ctx.principal()?;
                let candidate = principal.preferred_locale().or_else(|| principal.locale_alias());
                self.validated(ctx, candidate, "user", false)
            }
            Strategy::Session => {
                let stored = ctx.session().and_then(|s| s.read(context::LOCALE_SESSION_KEY));
                self.validated(ctx, stored, "session", true)
            }
            Strategy::Cookie => {
                let stored = ctx.cookies().and_then(|c| c.read(context::LOCALE_COOKIE));
                self.validated(ctx, stored, "cookie", true)
            }
            Strategy::Header => self.negotiate_header(ctx),
            Strategy::Auto => {
                Strategy::AUTO_ORDER.iter().find_map(|s| self.resolve(ctx, s))
            }
            // custom results are the caller's contract, no re-validation
            Strategy::Custom(custom) => custom(ctx),
        }
    }

    /// Tries every configured strategy in order and always produces a locale:
    /// the first non-absent result when it passes the supported check, the
    /// configured fallback otherwise.
    #[must_use]
    pub fn resolve_with_config(&self, ctx: &dyn RequestContext) -> Locale {
        for strategy in &self.config.strategies {
            let Some(locale) = self.resolve(ctx, strategy) else { continue };
            if self.config.supported.allows(&locale) {
                tracing::debug!(
                    strategy = strategy.name(),
                    locale = %locale,
                    "Resolved request locale"
                );
                return locale;
            }
            return self.config.fallback.clone();
        }
        self.config.fallback.clone()
    }

    /// Writes the resolved locale into the given targets.
    ///
    /// Session and cookie writes go through the context's store capabilities;
    /// the cookie is set with a one-year max-age. User-profile persistence is
    /// a collaborator call and is a no-op when the principal type does not
    /// support updates.
    pub fn persist(&self, ctx: &dyn RequestContext, locale: &Locale, targets: &[PersistTarget]) {
        for target in targets {
            match target {
                PersistTarget::Session => {
                    if let Some(session) = ctx.session() {
                        session.write(context::LOCALE_SESSION_KEY, locale.as_str());
                    }
                }
                PersistTarget::Cookie => {
                    if let Some(cookies) = ctx.cookies() {
                        cookies.write(context::LOCALE_COOKIE, locale.as_str(), COOKIE_MAX_AGE);
                    }
                }
                PersistTarget::UserProfile => {
                    if let Some(principal) = ctx.principal()
                        && !principal.set_preferred_locale(locale)
                    {
                        tracing::debug!(
                            locale = %locale,
                            "Principal does not support locale updates, skipping"
                        );
                    }
                }
            }
        }
    }

    /// Validates one raw candidate; logs a sanitized warning when asked.
    fn validated(
        &self,
        ctx: &dyn RequestContext,
        candidate: Option<String>,
        source: &'static str,
        warn_on_invalid: bool,
    ) -> Option<Locale> {
        let raw = candidate?;
        match self.validator.validate(&raw) {
            Ok(locale) => Some(locale),
            Err(error) => {
                if warn_on_invalid {
                    tracing::warn!(
                        strategy = source,
                        locale = error.sanitized_tag(),
                        client = ?ctx.remote_addr(),
                        "Rejected locale candidate"
                    );
                }
                None
            }
        }
    }

    /// Negotiates the `Accept-Language` header: highest-quality supported
    /// primary subtag wins, invalid tags are discarded silently.
    fn negotiate_header(&self, ctx: &dyn RequestContext) -> Option<Locale> {
        let raw = ctx.header(context::ACCEPT_LANGUAGE)?;
        header::parse_accept_language(&raw)
            .into_iter()
            .find_map(|(tag, _)| self.validator.validate(&tag).ok())
    }
}
