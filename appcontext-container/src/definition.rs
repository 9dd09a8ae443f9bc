//! Object definitions — registered recipes for producing instances.
//!
//! An [`ObjectDefinition`] bundles a factory with its construction
//! arguments and a [`Scope`]. Arguments form a typed tree ([`Arg`]) that
//! may embed [`Arg::Ref`] markers; at resolution time the context
//! evaluates the tree into a [`Resolved`] mirror and hands it to the
//! factory as [`CallArgs`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::key::ObjectId;
use crate::scope::Scope;

/// The universal instance type produced by factories.
///
/// Instances are shared; cached scopes hand out clones of the same `Arc`.
pub type Object = Arc<dyn Any + Send + Sync>;

/// Error type factories are allowed to fail with.
///
/// Factory errors are surfaced by the context as
/// [`ContextError::ConstructionFailed`](crate::error::ContextError::ConstructionFailed)
/// with the source preserved.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for factory functions.
///
/// A factory receives the evaluated construction arguments and returns a
/// boxed instance or an error. Factories are shared between threads
/// (`ApplicationContext` is `Send + Sync`), hence the `Arc`.
pub type FactoryFn = Arc<dyn Fn(CallArgs) -> Result<Object, BoxError> + Send + Sync>;

/// Wraps a value into an [`Object`].
///
/// # Examples
/// ```
/// use appcontext_container::definition::object;
///
/// let obj = object(String::from("hello"));
/// assert!(obj.downcast_ref::<String>().is_some());
/// ```
#[inline]
pub fn object<T: Send + Sync + 'static>(value: T) -> Object {
    Arc::new(value)
}

/// A construction argument in a definition.
///
/// Arguments form a tree: plain values, injection markers, ordered
/// sequences, and string-keyed mappings, nested to arbitrary depth.
/// Evaluation never mutates the stored tree; it produces a fresh
/// [`Resolved`] mirror.
#[derive(Clone)]
pub enum Arg {
    /// A literal value, passed through unchanged.
    Value(Object),
    /// An injection marker: resolve the target id and substitute the
    /// resulting instance here.
    Ref(ObjectId),
    /// An ordered sequence; each element is evaluated in place.
    Seq(Vec<Arg>),
    /// A mapping; values are evaluated, keys are kept as-is.
    Map(BTreeMap<String, Arg>),
}

impl Arg {
    /// Wraps a plain value.
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Arg::Value(object(value))
    }

    /// Creates an injection marker for the given object id.
    ///
    /// # Examples
    /// ```
    /// use appcontext_container::definition::Arg;
    ///
    /// let dep = Arg::inject("logger");
    /// ```
    pub fn inject(id: impl Into<ObjectId>) -> Self {
        Arg::Ref(id.into())
    }

    /// Creates an ordered sequence argument.
    pub fn seq(items: impl IntoIterator<Item = Arg>) -> Self {
        Arg::Seq(items.into_iter().collect())
    }

    /// Creates a mapping argument.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Arg)>) -> Self {
        Arg::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(_) => write!(f, "Value(..)"),
            Arg::Ref(id) => write!(f, "Ref({id})"),
            Arg::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Arg::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
        }
    }
}

/// An evaluated construction argument.
///
/// Mirrors the [`Arg`] tree with all [`Arg::Ref`] markers replaced by
/// resolved instances.
#[derive(Clone)]
pub enum Resolved {
    /// A plain instance (a literal, or the result of an injection).
    Object(Object),
    /// An evaluated sequence, order preserved.
    Seq(Vec<Resolved>),
    /// An evaluated mapping, keys preserved.
    Map(BTreeMap<String, Resolved>),
}

impl Resolved {
    /// Returns the instance if this is a plain object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Resolved::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    pub fn as_seq(&self) -> Option<&[Resolved]> {
        match self {
            Resolved::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Resolved>> {
        match self {
            Resolved::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Downcasts a plain object to a concrete type.
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.as_object()
            .and_then(|obj| obj.clone().downcast::<T>().ok())
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Object(_) => write!(f, "Object(..)"),
            Resolved::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Resolved::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
        }
    }
}

/// Error raised by the typed [`CallArgs`] accessors.
#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    /// No positional argument at the given index.
    #[error("missing positional argument at index {0}")]
    MissingArg(usize),

    /// No keyword argument with the given name.
    #[error("missing keyword argument {0:?}")]
    MissingKwarg(String),

    /// The argument exists but is not of the requested type or shape.
    #[error("argument {name:?} is not of the expected type {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },
}

/// The evaluated positional and keyword arguments handed to a factory.
#[derive(Clone, Default)]
pub struct CallArgs {
    pub(crate) args: Vec<Resolved>,
    pub(crate) kwargs: BTreeMap<String, Resolved>,
}

impl CallArgs {
    /// Returns all positional arguments in order.
    pub fn args(&self) -> &[Resolved] {
        &self.args
    }

    /// Returns all keyword arguments.
    pub fn kwargs(&self) -> &BTreeMap<String, Resolved> {
        &self.kwargs
    }

    /// Returns the positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Resolved> {
        self.args.get(index)
    }

    /// Returns the keyword argument named `name`, if present.
    pub fn kwarg(&self, name: &str) -> Option<&Resolved> {
        self.kwargs.get(name)
    }

    /// Returns the positional argument at `index` downcast to `T`.
    ///
    /// Convenient inside factories:
    /// ```ignore
    /// let url: Arc<String> = call.require_arg(0)?;
    /// ```
    pub fn require_arg<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>, ArgError> {
        let resolved = self.arg(index).ok_or(ArgError::MissingArg(index))?;
        resolved.downcast::<T>().ok_or(ArgError::WrongType {
            name: index.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Returns the keyword argument named `name` downcast to `T`.
    pub fn require_kwarg<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, ArgError> {
        let resolved = self
            .kwarg(name)
            .ok_or_else(|| ArgError::MissingKwarg(name.to_string()))?;
        resolved.downcast::<T>().ok_or_else(|| ArgError::WrongType {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}

impl fmt::Debug for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallArgs")
            .field("args", &self.args.len())
            .field("kwargs", &self.kwargs.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A registered recipe for producing an instance.
///
/// Defaults: no args, no kwargs, [`Scope::Singleton`].
///
/// # Examples
/// ```
/// use appcontext_container::definition::{object, Arg, ObjectDefinition};
/// use appcontext_container::scope::Scope;
///
/// let definition = ObjectDefinition::new(|call| {
///     let greeting: std::sync::Arc<String> = call.require_kwarg("greeting")?;
///     Ok(object(format!("{greeting}, world")))
/// })
/// .with_kwarg("greeting", Arg::value(String::from("hello")))
/// .with_scope(Scope::Prototype);
///
/// assert_eq!(definition.scope(), Scope::Prototype);
/// ```
#[derive(Clone)]
pub struct ObjectDefinition {
    pub(crate) factory: FactoryFn,
    pub(crate) args: Vec<Arg>,
    pub(crate) kwargs: BTreeMap<String, Arg>,
    pub(crate) scope: Scope,
}

impl ObjectDefinition {
    /// Creates a definition from a factory, with default (empty) arguments
    /// and [`Scope::Singleton`].
    pub fn new(
        factory: impl Fn(CallArgs) -> Result<Object, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            factory: Arc::new(factory),
            args: Vec::new(),
            kwargs: BTreeMap::new(),
            scope: Scope::default(),
        }
    }

    /// Creates a definition that hands out clones of a pre-built value.
    ///
    /// Use `Arc<T>` for cheap sharing of non-trivial values.
    pub fn of_value<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self::new(move |_| Ok(object(value.clone())))
    }

    /// Appends one positional argument.
    pub fn with_arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    /// Appends several positional arguments in order.
    pub fn with_args(mut self, args: impl IntoIterator<Item = Arg>) -> Self {
        self.args.extend(args);
        self
    }

    /// Sets one keyword argument; a repeated name overwrites the prior value.
    pub fn with_kwarg(mut self, name: impl Into<String>, arg: Arg) -> Self {
        self.kwargs.insert(name.into(), arg);
        self
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the registered scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl fmt::Debug for ObjectDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDefinition")
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_defaults() {
        let definition = ObjectDefinition::new(|_| Ok(object(1i32)));
        assert!(definition.args.is_empty());
        assert!(definition.kwargs.is_empty());
        assert_eq!(definition.scope(), Scope::Singleton);
    }

    #[test]
    fn definition_of_value_clones() {
        let definition = ObjectDefinition::of_value(String::from("hello"));
        let first = (definition.factory)(CallArgs::default()).unwrap();
        let second = (definition.factory)(CallArgs::default()).unwrap();
        assert_eq!(first.downcast_ref::<String>().unwrap(), "hello");
        // Clones, not the same allocation
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn arg_constructors() {
        let arg = Arg::seq([
            Arg::value(1i32),
            Arg::inject("logger"),
            Arg::map([("inner", Arg::value(2i32))]),
        ]);

        match arg {
            Arg::Seq(items) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(&items[1], Arg::Ref(id) if id.as_str() == "logger"));
            }
            other => panic!("Expected Seq, got: {other:?}"),
        }
    }

    #[test]
    fn resolved_downcast() {
        let resolved = Resolved::Object(object(42i32));
        assert_eq!(*resolved.downcast::<i32>().unwrap(), 42);
        assert!(resolved.downcast::<String>().is_none());
        assert!(resolved.as_seq().is_none());
    }

    #[test]
    fn call_args_typed_access() {
        let call = CallArgs {
            args: vec![Resolved::Object(object(String::from("positional")))],
            kwargs: [(String::from("n"), Resolved::Object(object(7i32)))].into(),
        };

        assert_eq!(*call.require_arg::<String>(0).unwrap(), "positional");
        assert_eq!(*call.require_kwarg::<i32>("n").unwrap(), 7);

        assert!(matches!(
            call.require_arg::<String>(1),
            Err(ArgError::MissingArg(1))
        ));
        assert!(matches!(
            call.require_kwarg::<i32>("missing"),
            Err(ArgError::MissingKwarg(_))
        ));
        assert!(matches!(
            call.require_kwarg::<String>("n"),
            Err(ArgError::WrongType { .. })
        ));
    }
}
