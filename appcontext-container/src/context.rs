//! # The ApplicationContext — heart of the container
//!
//! The registry + resolver + singleton cache. Callers register
//! [`ObjectDefinition`]s under opaque ids; resolution lazily evaluates a
//! definition's argument tree (substituting [`Arg::Ref`] markers by
//! recursive resolution), invokes its factory, and caches the result
//! according to its [`Scope`].
//!
//! # Architecture
//! ```text
//! register()/load_config()  ──>  ApplicationContext
//!                                      │
//!                               begin_request()   (via ContextMiddleware)
//!                                      │
//!                                      ▼
//!                                RequestContext
//! ```
//!
//! # Examples
//! ```rust
//! use appcontext_container::prelude::*;
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let ctx = ApplicationContext::new();
//! ctx.register("greeting", ObjectDefinition::of_value(String::from("hello")))
//!     .unwrap();
//! ctx.register(
//!     "greeter",
//!     ObjectDefinition::new(|call| {
//!         let greeting: std::sync::Arc<String> = call.require_kwarg("greeting")?;
//!         Ok(object(Greeter { greeting: (*greeting).clone() }))
//!     })
//!     .with_kwarg("greeting", Arg::inject("greeting")),
//! )
//! .unwrap();
//!
//! let greeter = ctx.get_as::<Greeter>("greeter").unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use appcontext_support::rendering::suggest_similar;

use crate::definition::{Arg, CallArgs, Object, ObjectDefinition, Resolved};
use crate::error::{
    ContextError, CyclicDependencyError, DefinitionNotFoundError, Result,
};
use crate::key::ObjectId;
use crate::scope::Scope;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Default)]
struct Inner {
    registry: HashMap<ObjectId, ObjectDefinition>,
    // One cell per singleton id gives at-most-once construction even when
    // two threads race on the first resolve.
    singletons: HashMap<ObjectId, Arc<OnceCell<Object>>>,
}

/// The application-wide object registry, resolver and singleton cache.
///
/// Thread-safe; intended to be shared process-wide behind an `Arc` and
/// passed explicitly to every collaborator (there is no ambient global
/// context). Registration is allowed at any time and re-registering an id
/// silently overwrites the prior definition.
///
/// Construction is strictly lazy: nothing runs at registration time, so
/// registration order and circular *declarations* are harmless. Circular
/// *construction* paths fail with
/// [`ContextError::CyclicDependency`] instead of overflowing the stack.
#[derive(Default)]
pub struct ApplicationContext {
    inner: RwLock<Inner>,
}

impl ApplicationContext {
    /// Creates a new, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──

    /// Registers a definition under `id`, overwriting any prior one.
    ///
    /// # Errors
    /// Returns [`ContextError::InvalidDefinition`] when the definition is
    /// rejected by fail-fast validation (empty id, empty kwarg name).
    pub fn register(
        &self,
        id: impl Into<ObjectId>,
        definition: ObjectDefinition,
    ) -> Result<()> {
        let id = id.into();
        validate(&id, &definition)?;

        debug!(id = %id, scope = %definition.scope(), "Registered object definition");
        self.inner.write().registry.insert(id, definition);
        Ok(())
    }

    /// Batch registration, applied in sequence order.
    ///
    /// Later entries for the same id win.
    pub fn load_config<I>(
        &self,
        entries: impl IntoIterator<Item = (I, ObjectDefinition)>,
    ) -> Result<()>
    where
        I: Into<ObjectId>,
    {
        for (id, definition) in entries {
            self.register(id, definition)?;
        }
        Ok(())
    }

    /// Clears the registry and the singleton cache.
    ///
    /// Atomic from the caller's point of view: no partial state is
    /// observable through any other method.
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.registry.clear();
        inner.singletons.clear();
        debug!("Context reset");
    }

    // ── Resolution ──

    /// Resolves `id` to an instance.
    ///
    /// Singleton cache hits return the cached instance without touching
    /// the factory. Otherwise the definition's argument tree is evaluated
    /// (recursively resolving [`Arg::Ref`] markers against this context),
    /// the factory runs, and singleton results are cached.
    ///
    /// # Errors
    /// - [`ContextError::DefinitionNotFound`] — unknown id
    /// - [`ContextError::CyclicDependency`] — `id` transitively injects itself
    /// - [`ContextError::ConstructionFailed`] — the factory failed
    pub fn get(&self, id: impl Into<ObjectId>) -> Result<Object> {
        let mut path = Vec::new();
        self.resolve(&id.into(), &mut path)
    }

    /// Resolves `id` and downcasts the instance to `T`.
    ///
    /// ```rust,ignore
    /// let logger: Arc<Logger> = ctx.get_as("logger")?;
    /// ```
    pub fn get_as<T: Send + Sync + 'static>(
        &self,
        id: impl Into<ObjectId>,
    ) -> Result<Arc<T>> {
        let id = id.into();
        let instance = self.resolve(&id, &mut Vec::new())?;
        instance
            .downcast::<T>()
            .map_err(|_| ContextError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Returns the registered scope of `id`.
    ///
    /// # Errors
    /// Returns [`ContextError::DefinitionNotFound`] when absent.
    pub fn get_scope(&self, id: impl Into<ObjectId>) -> Result<Scope> {
        let id = id.into();
        let inner = self.inner.read();
        match inner.registry.get(&id) {
            Some(definition) => Ok(definition.scope()),
            None => Err(not_found(&inner, id, None)),
        }
    }

    // ── Introspection ──

    /// Returns `true` if `id` has a registered definition.
    pub fn contains(&self, id: impl Into<ObjectId>) -> bool {
        self.inner.read().registry.contains_key(&id.into())
    }

    /// Returns the number of registered definitions.
    pub fn len(&self) -> usize {
        self.inner.read().registry.len()
    }

    /// Returns `true` if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().registry.is_empty()
    }

    /// Returns all registered ids (unordered).
    pub fn registered_ids(&self) -> Vec<ObjectId> {
        self.inner.read().registry.keys().cloned().collect()
    }

    /// Renders the registry as one line per definition, sorted by id.
    ///
    /// ```text
    /// [Singleton] database
    /// [Request]   basket
    /// ```
    pub fn describe(&self) -> String {
        let inner = self.inner.read();
        let mut entries: Vec<(&ObjectId, Scope)> = inner
            .registry
            .iter()
            .map(|(id, definition)| (id, definition.scope()))
            .collect();
        entries.sort_by_key(|(id, _)| id.as_str().to_owned());

        entries
            .iter()
            .map(|(id, scope)| format!("[{scope}] {id}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Internal ──

    /// Recursive resolution; `path` is the in-progress chain used for
    /// cycle detection and for the `required_by` hint in errors.
    fn resolve(&self, id: &ObjectId, path: &mut Vec<ObjectId>) -> Result<Object> {
        // Singleton cache hit — fast path, checked before anything else.
        {
            let inner = self.inner.read();
            if let Some(instance) = inner.singletons.get(id).and_then(|cell| cell.get()) {
                trace!(id = %id, "Singleton cache hit");
                return Ok(instance.clone());
            }
        }

        if path.contains(id) {
            let mut chain = path.clone();
            chain.push(id.clone());
            warn!(chain = ?chain, "Cyclic dependency detected");
            return Err(ContextError::CyclicDependency(CyclicDependencyError {
                chain,
            }));
        }

        // Snapshot the definition, then release the lock: construction may
        // recursively resolve dependencies through this same context.
        let definition = {
            let inner = self.inner.read();
            match inner.registry.get(id) {
                Some(definition) => definition.clone(),
                None => {
                    return Err(not_found(&inner, id.clone(), path.last().cloned()));
                }
            }
        };

        let cell = if definition.scope().is_singleton() {
            let existing = self.inner.read().singletons.get(id).cloned();
            Some(match existing {
                Some(cell) => cell,
                None => self
                    .inner
                    .write()
                    .singletons
                    .entry(id.clone())
                    .or_default()
                    .clone(),
            })
        } else {
            None
        };

        path.push(id.clone());
        let result = match cell {
            // The cell serializes racing first resolves; losers block and
            // then reuse the winner's instance.
            Some(cell) => cell
                .get_or_try_init(|| self.construct(id, &definition, path))
                .cloned(),
            None => self.construct(id, &definition, path),
        };
        path.pop();
        result
    }

    /// Evaluates the definition's argument tree and runs the factory.
    fn construct(
        &self,
        id: &ObjectId,
        definition: &ObjectDefinition,
        path: &mut Vec<ObjectId>,
    ) -> Result<Object> {
        trace!(id = %id, scope = %definition.scope(), "Constructing instance");

        let mut args = Vec::with_capacity(definition.args.len());
        for arg in &definition.args {
            args.push(self.evaluate(arg, path)?);
        }

        let mut kwargs = BTreeMap::new();
        for (name, arg) in &definition.kwargs {
            kwargs.insert(name.clone(), self.evaluate(arg, path)?);
        }

        (definition.factory)(CallArgs { args, kwargs }).map_err(|source| {
            ContextError::ConstructionFailed {
                id: id.clone(),
                source,
            }
        })
    }

    /// Evaluates one argument node, producing a fresh [`Resolved`] tree.
    ///
    /// The stored definition is never mutated; sequences and mappings are
    /// rebuilt, markers are substituted by nested resolution.
    fn evaluate(&self, arg: &Arg, path: &mut Vec<ObjectId>) -> Result<Resolved> {
        match arg {
            Arg::Value(instance) => Ok(Resolved::Object(instance.clone())),
            Arg::Ref(target) => Ok(Resolved::Object(self.resolve(target, path)?)),
            Arg::Seq(items) => {
                let mut evaluated = Vec::with_capacity(items.len());
                for item in items {
                    evaluated.push(self.evaluate(item, path)?);
                }
                Ok(Resolved::Seq(evaluated))
            }
            Arg::Map(entries) => {
                let mut evaluated = BTreeMap::new();
                for (name, value) in entries {
                    evaluated.insert(name.clone(), self.evaluate(value, path)?);
                }
                Ok(Resolved::Map(evaluated))
            }
        }
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("registered", &self.len())
            .finish()
    }
}

fn validate(id: &ObjectId, definition: &ObjectDefinition) -> Result<()> {
    if id.is_empty() {
        return Err(ContextError::InvalidDefinition {
            id: id.clone(),
            reason: String::from("object id must not be empty"),
        });
    }
    if definition.kwargs.keys().any(|name| name.is_empty()) {
        return Err(ContextError::InvalidDefinition {
            id: id.clone(),
            reason: String::from("keyword argument names must not be empty"),
        });
    }
    Ok(())
}

fn not_found(inner: &Inner, requested: ObjectId, required_by: Option<ObjectId>) -> ContextError {
    let available: Vec<&str> = inner.registry.keys().map(|id| id.as_str()).collect();
    let suggestions = suggest_similar(requested.as_str(), &available, MAX_SUGGESTIONS)
        .into_iter()
        .map(ObjectId::from)
        .collect();

    ContextError::DefinitionNotFound(DefinitionNotFoundError {
        requested,
        required_by,
        suggestions,
    })
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::ApplicationContext;
    pub use crate::definition::{object, Arg, CallArgs, Object, ObjectDefinition};
    pub use crate::error::{ContextError, Result};
    pub use crate::key::ObjectId;
    pub use crate::middleware::ContextMiddleware;
    pub use crate::request::{MemorySessionStore, RequestContext, SessionStore};
    pub use crate::scope::Scope;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::object;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Token;

    fn counting(counter: Arc<AtomicU32>) -> ObjectDefinition {
        ObjectDefinition::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(object(Token))
        })
    }

    #[test]
    fn register_then_get() {
        let ctx = ApplicationContext::new();
        ctx.register("answer", ObjectDefinition::of_value(42i32)).unwrap();

        let answer = ctx.get_as::<i32>("answer").unwrap();
        assert_eq!(*answer, 42);
    }

    #[test]
    fn get_unregistered_fails() {
        let ctx = ApplicationContext::new();

        match ctx.get("missing").unwrap_err() {
            ContextError::DefinitionNotFound(err) => {
                assert_eq!(err.requested.as_str(), "missing");
                assert!(err.required_by.is_none());
            }
            other => panic!("Expected DefinitionNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn get_scope_unregistered_fails() {
        let ctx = ApplicationContext::new();
        assert!(matches!(
            ctx.get_scope("missing"),
            Err(ContextError::DefinitionNotFound(_))
        ));
    }

    #[test]
    fn get_scope_returns_registered_scope() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "basket",
            ObjectDefinition::of_value(0i32).with_scope(Scope::Request),
        )
        .unwrap();

        assert_eq!(ctx.get_scope("basket").unwrap(), Scope::Request);
    }

    #[test]
    fn singleton_identity_and_single_invocation() {
        let counter = Arc::new(AtomicU32::new(0));
        let ctx = ApplicationContext::new();
        ctx.register("token", counting(counter.clone())).unwrap();

        let first = ctx.get("token").unwrap();
        let second = ctx.get("token").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn prototype_reinvokes_factory() {
        let counter = Arc::new(AtomicU32::new(0));
        let ctx = ApplicationContext::new();
        ctx.register(
            "token",
            counting(counter.clone()).with_scope(Scope::Prototype),
        )
        .unwrap();

        let first = ctx.get("token").unwrap();
        let second = ctx.get("token").unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reset_clears_singleton_cache() {
        let counter = Arc::new(AtomicU32::new(0));
        let ctx = ApplicationContext::new();
        ctx.register("token", counting(counter.clone())).unwrap();

        let before = ctx.get("token").unwrap();
        ctx.reset();

        // Registration was cleared too
        assert!(ctx.get("token").is_err());

        // Re-register: a fresh instance is constructed
        ctx.register("token", counting(counter.clone())).unwrap();
        let after = ctx.get("token").unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn end_to_end_logger_example() {
        let ctx = ApplicationContext::new();
        ctx.register("logger", ObjectDefinition::new(|_| Ok(object(Token))))
            .unwrap();

        let first = ctx.get("logger").unwrap();
        let second = ctx.get("logger").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        ctx.reset();
        ctx.register("logger", ObjectDefinition::new(|_| Ok(object(Token))))
            .unwrap();
        let third = ctx.get("logger").unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn injection_binds_exact_instance() {
        struct Service {
            dep: Object,
        }

        let ctx = ApplicationContext::new();
        ctx.register("dep", ObjectDefinition::new(|_| Ok(object(Token))))
            .unwrap();
        ctx.register(
            "service",
            ObjectDefinition::new(|call| {
                let dep = call.kwarg("dep").unwrap().as_object().unwrap().clone();
                Ok(object(Service { dep }))
            })
            .with_kwarg("dep", Arg::inject("dep")),
        )
        .unwrap();

        let service = ctx.get_as::<Service>("service").unwrap();
        let dep = ctx.get("dep").unwrap();
        assert!(Arc::ptr_eq(&service.dep, &dep));
    }

    #[test]
    fn injection_failure_names_requiring_id() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "service",
            ObjectDefinition::new(|_| Ok(object(Token)))
                .with_kwarg("dep", Arg::inject("missing")),
        )
        .unwrap();

        match ctx.get("service").unwrap_err() {
            ContextError::DefinitionNotFound(err) => {
                assert_eq!(err.requested.as_str(), "missing");
                assert_eq!(err.required_by.as_ref().unwrap().as_str(), "service");
            }
            other => panic!("Expected DefinitionNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn nested_sequence_evaluation_preserves_order() {
        let ctx = ApplicationContext::new();
        ctx.register("dep", ObjectDefinition::of_value(String::from("injected")))
            .unwrap();
        ctx.register(
            "consumer",
            ObjectDefinition::new(|call| {
                let handlers = call.arg(0).unwrap().as_seq().unwrap().to_vec();
                Ok(object(handlers))
            })
            .with_arg(Arg::seq([
                Arg::value(String::from("first")),
                Arg::inject("dep"),
                Arg::value(String::from("last")),
            ])),
        )
        .unwrap();

        let handlers = ctx.get_as::<Vec<Resolved>>("consumer").unwrap();
        assert_eq!(handlers.len(), 3);
        assert_eq!(*handlers[0].downcast::<String>().unwrap(), "first");
        assert_eq!(*handlers[1].downcast::<String>().unwrap(), "injected");
        assert_eq!(*handlers[2].downcast::<String>().unwrap(), "last");
    }

    #[test]
    fn nested_map_evaluation_keeps_keys() {
        let ctx = ApplicationContext::new();
        ctx.register("dep", ObjectDefinition::of_value(7i32)).unwrap();
        ctx.register(
            "consumer",
            ObjectDefinition::new(|call| {
                let settings = call.kwarg("settings").unwrap().as_map().unwrap().clone();
                Ok(object(settings))
            })
            .with_kwarg(
                "settings",
                Arg::map([
                    ("level", Arg::value(String::from("debug"))),
                    ("dep", Arg::inject("dep")),
                ]),
            ),
        )
        .unwrap();

        let settings = ctx.get_as::<BTreeMap<String, Resolved>>("consumer").unwrap();
        assert_eq!(*settings["level"].downcast::<String>().unwrap(), "debug");
        assert_eq!(*settings["dep"].downcast::<i32>().unwrap(), 7);
    }

    #[test]
    fn cyclic_injection_fails_with_chain() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "a",
            ObjectDefinition::new(|_| Ok(object(Token))).with_kwarg("dep", Arg::inject("b")),
        )
        .unwrap();
        ctx.register(
            "b",
            ObjectDefinition::new(|_| Ok(object(Token))).with_kwarg("dep", Arg::inject("a")),
        )
        .unwrap();

        match ctx.get("a").unwrap_err() {
            ContextError::CyclicDependency(err) => {
                let chain: Vec<&str> = err.chain.iter().map(|id| id.as_str()).collect();
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("Expected CyclicDependency, got: {other:?}"),
        }
    }

    #[test]
    fn self_injection_fails() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "a",
            ObjectDefinition::new(|_| Ok(object(Token))).with_kwarg("dep", Arg::inject("a")),
        )
        .unwrap();

        assert!(matches!(
            ctx.get("a"),
            Err(ContextError::CyclicDependency(_))
        ));
    }

    #[test]
    fn cached_singleton_breaks_declaration_cycle() {
        // a injects b, b injects a — but once a is cached from an earlier
        // registration state, resolving b succeeds off the cache.
        let ctx = ApplicationContext::new();
        ctx.register("a", ObjectDefinition::new(|_| Ok(object(Token))))
            .unwrap();
        let cached = ctx.get("a").unwrap();

        ctx.register(
            "a",
            ObjectDefinition::new(|_| Ok(object(Token))).with_kwarg("dep", Arg::inject("b")),
        )
        .unwrap();
        ctx.register(
            "b",
            ObjectDefinition::new(|call| {
                Ok(call.kwarg("dep").unwrap().as_object().unwrap().clone())
            })
            .with_kwarg("dep", Arg::inject("a")),
        )
        .unwrap();

        // The cached instance of a is still served, so b resolves.
        let via_b = ctx.get("b").unwrap();
        assert!(Arc::ptr_eq(&cached, &via_b));
    }

    #[test]
    fn reregistering_overwrites_silently() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "value",
            ObjectDefinition::of_value(1i32).with_scope(Scope::Prototype),
        )
        .unwrap();
        ctx.register(
            "value",
            ObjectDefinition::of_value(2i32).with_scope(Scope::Prototype),
        )
        .unwrap();

        assert_eq!(*ctx.get_as::<i32>("value").unwrap(), 2);
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn load_config_later_entries_win() {
        let ctx = ApplicationContext::new();
        ctx.load_config([
            ("a", ObjectDefinition::of_value(1i32).with_scope(Scope::Prototype)),
            ("b", ObjectDefinition::of_value(2i32)),
            ("a", ObjectDefinition::of_value(3i32).with_scope(Scope::Prototype)),
        ])
        .unwrap();

        assert_eq!(*ctx.get_as::<i32>("a").unwrap(), 3);
        assert_eq!(*ctx.get_as::<i32>("b").unwrap(), 2);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn empty_id_rejected() {
        let ctx = ApplicationContext::new();
        assert!(matches!(
            ctx.register("", ObjectDefinition::of_value(1i32)),
            Err(ContextError::InvalidDefinition { .. })
        ));
        assert!(ctx.is_empty());
    }

    #[test]
    fn empty_kwarg_name_rejected() {
        let ctx = ApplicationContext::new();
        let definition = ObjectDefinition::of_value(1i32).with_kwarg("", Arg::value(2i32));
        assert!(matches!(
            ctx.register("x", definition),
            Err(ContextError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn factory_error_surfaces_as_construction_failed() {
        let ctx = ApplicationContext::new();
        ctx.register(
            "broken",
            ObjectDefinition::new(|_| Err("boom".into())),
        )
        .unwrap();

        match ctx.get("broken").unwrap_err() {
            ContextError::ConstructionFailed { id, source } => {
                assert_eq!(id.as_str(), "broken");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("Expected ConstructionFailed, got: {other:?}"),
        }
    }

    #[test]
    fn typed_get_mismatch() {
        let ctx = ApplicationContext::new();
        ctx.register("answer", ObjectDefinition::of_value(42i32)).unwrap();

        assert!(matches!(
            ctx.get_as::<String>("answer"),
            Err(ContextError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn not_found_suggests_similar_ids() {
        let ctx = ApplicationContext::new();
        ctx.register("user_service", ObjectDefinition::of_value(1i32))
            .unwrap();

        match ctx.get("user_servise").unwrap_err() {
            ContextError::DefinitionNotFound(err) => {
                assert_eq!(err.suggestions.len(), 1);
                assert_eq!(err.suggestions[0].as_str(), "user_service");
            }
            other => panic!("Expected DefinitionNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn describe_lists_registrations() {
        let ctx = ApplicationContext::new();
        ctx.register("logger", ObjectDefinition::of_value(1i32)).unwrap();
        ctx.register(
            "basket",
            ObjectDefinition::of_value(2i32).with_scope(Scope::Request),
        )
        .unwrap();

        let rendered = ctx.describe();
        assert_eq!(rendered, "[Request] basket\n[Singleton] logger");
    }

    #[test]
    fn concurrent_singleton_constructed_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let ctx = Arc::new(ApplicationContext::new());
        ctx.register("token", counting(counter.clone())).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ctx = ctx.clone();
                std::thread::spawn(move || ctx.get("token").unwrap())
            })
            .collect();

        let instances: Vec<Object> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        for instance in &instances[1..] {
            assert!(Arc::ptr_eq(&instances[0], instance));
        }
    }

    #[test]
    fn debug_display() {
        let ctx = ApplicationContext::new();
        ctx.register("a", ObjectDefinition::of_value(1i32)).unwrap();
        ctx.register("b", ObjectDefinition::of_value(2i32)).unwrap();

        let debug = format!("{ctx:?}");
        assert!(debug.contains("ApplicationContext"));
        assert!(debug.contains("2"));
    }
}
