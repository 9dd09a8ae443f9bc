//! Request-scoped resolution.
//!
//! [`RequestContext`] wraps one shared [`ApplicationContext`] for the
//! duration of one logical request, layering two caches on top of the
//! base scopes:
//! - a request-local cache, owned by the wrapper and dropped with it
//! - a session-backed cache behind the [`SessionStore`] capability,
//!   shared by every request of the same session
//!
//! The wrapper never caches `Singleton` objects (the base context already
//! does) nor `Prototype` objects (deliberately reconstructed every call).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::trace;

use crate::context::ApplicationContext;
use crate::definition::Object;
use crate::error::{ContextError, Result};
use crate::key::ObjectId;
use crate::scope::Scope;

/// The session-backed object cache, as an injected capability.
///
/// The hosting web framework maps this onto its own session storage
/// (conventionally under one fixed, well-known session key); the core
/// container only ever sees this trait. [`MemorySessionStore`] is the
/// in-process implementation used by tests and examples.
pub trait SessionStore: Send + Sync {
    /// Returns the cached instance for `id`, if any.
    fn get(&self, id: &ObjectId) -> Option<Object>;

    /// Caches `instance` under `id`, replacing any prior entry.
    fn insert(&self, id: ObjectId, instance: Object);
}

/// An in-memory, concurrency-safe [`SessionStore`].
///
/// One value of this type models one session; share it (via `Arc`)
/// between the requests that belong to that session.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: DashMap<ObjectId, Object>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &ObjectId) -> Option<Object> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    fn insert(&self, id: ObjectId, instance: Object) {
        self.entries.insert(id, instance);
    }
}

impl fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySessionStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Per-request view over a shared [`ApplicationContext`].
///
/// Create one wrapper per incoming request (see
/// [`ContextMiddleware::begin_request`]); repeated lookups of the same
/// `Request`- or `Session`-scoped id through one wrapper return the
/// identical instance, and request-scoped instances never leak into any
/// other wrapper.
///
/// [`ContextMiddleware::begin_request`]: crate::middleware::ContextMiddleware::begin_request
pub struct RequestContext {
    context: Arc<ApplicationContext>,
    session: Arc<dyn SessionStore>,
    request_cache: Mutex<HashMap<ObjectId, Object>>,
}

impl RequestContext {
    /// Creates a wrapper around a shared context and the session store
    /// of the current request.
    pub fn new(context: Arc<ApplicationContext>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            context,
            session,
            request_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `id`, consulting the request and session caches first.
    ///
    /// Lookup order: request-local cache, session cache, then the wrapped
    /// context. Freshly constructed `Request`/`Session`-scoped instances
    /// are written back to the matching cache; `Singleton` and `Prototype`
    /// instances are never cached at this layer.
    pub fn get(&self, id: impl Into<ObjectId>) -> Result<Object> {
        let id = id.into();

        if let Some(instance) = self.request_cache.lock().get(&id) {
            trace!(id = %id, "Request cache hit");
            return Ok(instance.clone());
        }

        if let Some(instance) = self.session.get(&id) {
            trace!(id = %id, "Session cache hit");
            return Ok(instance);
        }

        let instance = self.context.get(id.clone())?;

        match self.context.get_scope(id.clone())? {
            Scope::Request => {
                self.request_cache.lock().insert(id, instance.clone());
            }
            Scope::Session => {
                self.session.insert(id, instance.clone());
            }
            Scope::Singleton | Scope::Prototype => {}
        }

        Ok(instance)
    }

    /// Resolves `id` and downcasts the instance to `T`.
    pub fn get_as<T: Send + Sync + 'static>(
        &self,
        id: impl Into<ObjectId>,
    ) -> Result<Arc<T>> {
        let id = id.into();
        let instance = self.get(id.clone())?;
        instance
            .downcast::<T>()
            .map_err(|_| ContextError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// The wrapped application context.
    pub fn context(&self) -> &Arc<ApplicationContext> {
        &self.context
    }

    /// The session store backing this request.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_cached", &self.request_cache.lock().len())
            .finish()
    }
}
