//! Core container implementation for appcontext.

pub mod context;
pub mod definition;
pub mod error;
pub mod key;
pub mod middleware;
pub mod request;
pub mod scope;

pub use context::{prelude, ApplicationContext};
pub use definition::{object, Arg, CallArgs, Object, ObjectDefinition};
pub use error::{ContextError, Result};
pub use key::ObjectId;
pub use middleware::{BoundResolver, ContextMiddleware};
pub use request::{MemorySessionStore, RequestContext, SessionStore};
pub use scope::Scope;
