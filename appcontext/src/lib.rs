//! # appcontext — a scoped application context for Rust
//!
//! An identifier-keyed IoC container with lazy construction, recursive
//! argument injection, and singleton / prototype / request / session
//! scopes, plus a middleware adapter for request pipelines.
//!
//! ```
//! use appcontext::prelude::*;
//!
//! let ctx = ApplicationContext::new();
//! ctx.register("greeting", ObjectDefinition::of_value(String::from("hello")))
//!     .unwrap();
//!
//! let greeting = ctx.get_as::<String>("greeting").unwrap();
//! assert_eq!(*greeting, "hello");
//! ```

pub use appcontext_container::*;
pub use appcontext_support as support;
