//! Capability traits over the inbound request.
//!
//! The resolver never touches a transport object directly. The
//! request-handling collaborator implements [`RequestContext`] over whatever
//! framework it uses, exposing read-only accessors plus the two documented
//! write paths (session and cookie stores) used by
//! [`persist`](crate::resolver::LocaleResolver::persist).

use std::time::Duration;

use crate::locale::Locale;

/// Request/query parameter name carrying an explicit locale.
pub const LOCALE_PARAM: &str = "locale";

/// Session key under which a resolved locale is stored.
pub const LOCALE_SESSION_KEY: &str = "locale";

/// Cookie name under which a resolved locale is stored.
pub const LOCALE_COOKIE: &str = "locale";

/// Header carrying the client's weighted language preferences.
pub const ACCEPT_LANGUAGE: &str = "accept-language";

/// A string-keyed store with read and write access (session storage).
///
/// Writes go through `&self`; implementations are expected to use interior
/// mutability over the framework's session handle.
pub trait SessionStore {
    /// Reads a stored value.
    fn read(&self, key: &str) -> Option<String>;
    /// Writes a value, replacing any existing one.
    fn write(&self, key: &str, value: &str);
}

/// Cookie access for the request/response pair.
pub trait CookieStore {
    /// Reads a request cookie.
    fn read(&self, name: &str) -> Option<String>;
    /// Sets a response cookie with the given max-age.
    fn write(&self, name: &str, value: &str, max_age: Duration);
}

/// An authenticated principal with an optional locale preference.
pub trait Principal {
    /// The primary preference field.
    fn preferred_locale(&self) -> Option<String>;

    /// A secondary alias field checked when the primary is unset (some user
    /// models name the column differently).
    fn locale_alias(&self) -> Option<String> {
        None
    }

    /// Persists a locale preference on the principal.
    ///
    /// Returns `false` when the principal type does not support updates, in
    /// which case persistence is a no-op for this target.
    fn set_preferred_locale(&self, locale: &Locale) -> bool {
        let _ = locale;
        false
    }
}

/// Read-only view of an inbound request, plus the session/cookie write
/// capabilities. Accessors return `None` where the transport has nothing,
/// so every strategy degrades to "absent" on missing input.
pub trait RequestContext {
    /// A request or query parameter by name.
    fn param(&self, name: &str) -> Option<String>;

    /// The request path (leading slash allowed; the path strategy takes the
    /// first non-empty segment).
    fn path(&self) -> &str;

    /// The request host name, when known.
    fn host(&self) -> Option<String>;

    /// A request header by lowercase name.
    fn header(&self, name: &str) -> Option<String>;

    /// The session store, when the transport has one.
    fn session(&self) -> Option<&dyn SessionStore> {
        None
    }

    /// The cookie store, when the transport has one.
    fn cookies(&self) -> Option<&dyn CookieStore> {
        None
    }

    /// The authenticated principal, when one is attached.
    fn principal(&self) -> Option<&dyn Principal> {
        None
    }

    /// Client-address-like context for warning logs. Never used for
    /// resolution itself.
    fn remote_addr(&self) -> Option<String> {
        None
    }
}
