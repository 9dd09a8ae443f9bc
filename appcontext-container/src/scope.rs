//! Object lifecycle scopes.
//!
//! Scopes determine how long a resolved object lives:
//! - [`Scope::Singleton`] — one instance for the lifetime of the context
//! - [`Scope::Session`] — one instance per session store
//! - [`Scope::Request`] — one instance per request wrapper
//! - [`Scope::Prototype`] — new instance on every resolution
//!
//! # Ordering
//! Scopes have a natural lifetime ordering:
//! `Singleton > Session > Request > Prototype`.

use std::fmt;

/// Defines the caching lifetime of an object within the container.
///
/// # Examples
/// ```
/// use appcontext_container::scope::Scope;
///
/// assert!(Scope::Singleton > Scope::Session);
/// assert!(Scope::Session > Scope::Request);
/// assert!(Scope::Request > Scope::Prototype);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// One instance shared for the whole context lifetime.
    ///
    /// Created on first resolve, cached until [`reset`] is called.
    ///
    /// [`reset`]: crate::context::ApplicationContext::reset
    #[default]
    Singleton,

    /// One instance per session store.
    ///
    /// Cached by the request wrapper inside the session's object cache,
    /// so it survives across requests sharing the same session.
    Session,

    /// One instance per request wrapper.
    ///
    /// Cached by one [`RequestContext`] for its own lifetime and never
    /// visible to any other request.
    ///
    /// [`RequestContext`]: crate::request::RequestContext
    Request,

    /// New instance created on every resolution.
    ///
    /// Never cached, at any layer.
    Prototype,
}

impl Scope {
    /// Returns `true` if this scope caches instances at some layer.
    ///
    /// Everything except [`Scope::Prototype`] caches.
    #[inline]
    pub fn is_cached(&self) -> bool {
        !matches!(self, Scope::Prototype)
    }

    /// Returns `true` if instances are cached by the base context itself.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        matches!(self, Scope::Singleton)
    }

    /// Returns the ordering value (higher = longer lifetime).
    #[inline]
    fn ordering(&self) -> u8 {
        match self {
            Scope::Singleton => 3,
            Scope::Session => 2,
            Scope::Request => 1,
            Scope::Prototype => 0,
        }
    }
}

impl PartialOrd for Scope {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scope {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordering().cmp(&other.ordering())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Singleton => write!(f, "Singleton"),
            Scope::Session => write!(f, "Session"),
            Scope::Request => write!(f, "Request"),
            Scope::Prototype => write!(f, "Prototype"),
        }
    }
}
