//! Object identification keys.
//!
//! [`ObjectId`] uniquely identifies an object definition within a context.
//! It is an opaque, cheaply cloneable string id.

use std::fmt;
use std::sync::Arc;

/// Uniquely identifies an object definition in a context.
///
/// Ids are opaque strings; the context registry keys its definitions and
/// its singleton cache by them. Cloning is cheap (shared backing storage).
///
/// # Examples
/// ```
/// use appcontext_container::key::ObjectId;
///
/// let id = ObjectId::new("logger");
/// assert_eq!(id.as_str(), "logger");
///
/// // From-conversions work anywhere an id is expected
/// let other: ObjectId = "logger".into();
/// assert_eq!(id, other);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(Arc<str>);

impl ObjectId {
    /// Creates an id from anything string-like.
    #[inline]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty id (which is never valid to register).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&ObjectId> for ObjectId {
    fn from(id: &ObjectId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({:?})", &*self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
