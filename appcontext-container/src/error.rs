//! Error types for context operations.
//!
//! Errors carry enough payload to be actionable: the offending id, the
//! resolution chain for cycles, and "did you mean?" suggestions for
//! unknown ids.

use std::fmt;

use appcontext_support::rendering::render_chain;

use crate::key::ObjectId;

/// Main error type for all context operations.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// Requested object id has no registered definition.
    #[error("{}", .0)]
    DefinitionNotFound(DefinitionNotFoundError),

    /// Resolution re-entered an id already being constructed.
    #[error("{}", .0)]
    CyclicDependency(CyclicDependencyError),

    /// The factory returned an error during construction.
    ///
    /// The factory's error is preserved as the source; no retry is
    /// attempted (construction is assumed safe to attempt once).
    #[error("Failed to construct {id}: {source}")]
    ConstructionFailed {
        id: ObjectId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The definition was rejected at registration time.
    #[error("Invalid definition for {id}: {reason}")]
    InvalidDefinition { id: ObjectId, reason: String },

    /// A typed lookup resolved an instance of a different type.
    #[error("Type mismatch for {id}: expected {expected}")]
    TypeMismatch { id: ObjectId, expected: &'static str },
}

/// Error when an object id has no registered definition.
///
/// Includes helpful hints about what went wrong.
#[derive(Debug)]
pub struct DefinitionNotFoundError {
    /// The id that was requested
    pub requested: ObjectId,
    /// What required this object (if it was an injected dependency)
    pub required_by: Option<ObjectId>,
    /// Similar ids that ARE registered (for "did you mean?" suggestions)
    pub suggestions: Vec<ObjectId>,
}

impl fmt::Display for DefinitionNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No object definition registered for {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Did you forget to register {:?}?",
            self.requested.as_str()
        )
    }
}

/// Error when resolution re-enters an id that is already in progress.
///
/// Shows the full resolution chain so you can see WHERE the cycle is.
#[derive(Debug)]
pub struct CyclicDependencyError {
    /// The chain of ids that forms the cycle.
    /// Example: ["a", "b", "c", "a"]
    pub chain: Vec<ObjectId>,
}

impl fmt::Display for CyclicDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cyclic dependency detected:\n  ")?;
        write!(f, "{}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: One of these definitions injects (directly or transitively) its own id"
        )
    }
}

/// Convenient Result type for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;
