//! Pipeline integration for the application context.
//!
//! [`ContextMiddleware`] owns the process-wide [`ApplicationContext`] and
//! opens one fresh [`RequestContext`] per incoming request, so request and
//! session scoping is always wired in. The hosting framework attaches the
//! bound resolver to its request object before handlers run; handlers then
//! resolve dependencies without touching the container directly.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::context::ApplicationContext;
use crate::definition::{Object, ObjectDefinition};
use crate::error::Result;
use crate::key::ObjectId;
use crate::request::{RequestContext, SessionStore};

/// A single-argument lookup closure bound to one request's scope.
///
/// This is what gets attached to the external request object.
pub type BoundResolver = Arc<dyn Fn(&str) -> Result<Object> + Send + Sync>;

/// Binds a shared [`ApplicationContext`] to a request-processing pipeline.
pub struct ContextMiddleware {
    context: Arc<ApplicationContext>,
}

impl ContextMiddleware {
    /// Wraps an already-configured context.
    pub fn new(context: Arc<ApplicationContext>) -> Self {
        Self { context }
    }

    /// Builds a fresh context from configuration entries and wraps it.
    ///
    /// # Errors
    /// Returns the first registration error, if any entry is invalid.
    pub fn from_config<I>(
        entries: impl IntoIterator<Item = (I, ObjectDefinition)>,
    ) -> Result<Self>
    where
        I: Into<ObjectId>,
    {
        let context = ApplicationContext::new();
        context.load_config(entries)?;
        Ok(Self::new(Arc::new(context)))
    }

    /// The shared application context.
    pub fn context(&self) -> &Arc<ApplicationContext> {
        &self.context
    }

    /// Opens a fresh request scope backed by the shared context and the
    /// incoming request's session store.
    ///
    /// Call this once per request; reusing a [`RequestContext`] across
    /// requests would leak request-scoped instances between them.
    pub fn begin_request(&self, session: Arc<dyn SessionStore>) -> RequestContext {
        debug!("Opening request scope");
        RequestContext::new(self.context.clone(), session)
    }

    /// Opens a fresh request scope and returns its `get` as a closure,
    /// ready to be attached to the external request object.
    pub fn bind_resolver(&self, session: Arc<dyn SessionStore>) -> BoundResolver {
        let scope = Arc::new(self.begin_request(session));
        Arc::new(move |id| scope.get(id))
    }
}

impl fmt::Debug for ContextMiddleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMiddleware")
            .field("registered", &self.context.len())
            .finish()
    }
}
