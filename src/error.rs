//! Error types for the cyclecache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a zero capacity passed to a fallible constructor).
//! - [`InvariantError`]: Returned by `check_invariants` methods when an
//!   internal data-structure invariant does not hold.
//! - [`GraphError`]: Returned when a graph edge names a vertex that is not in
//!   the graph.
//!
//! Lookup misses, duplicate inserts and failed resource creation are ordinary
//! outcomes and are reported through `bool`/`Option` returns, not errors.
//!
//! ## Example Usage
//!
//! ```
//! use cyclecache::builder::{CacheBuilder, CachePolicy};
//! use cyclecache::error::ConfigError;
//!
//! let err: ConfigError = CacheBuilder::new(0)
//!     .try_build_scheme::<u64, u64>(CachePolicy::Lru)
//!     .unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

use crate::graph::VertexId;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal invariant is violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruScheme::try_new`](crate::policy::lru::LruScheme::try_new) and the
/// builder's `try_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Error returned when building a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint does not name a vertex of the graph.
    UnknownVertex(VertexId),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::UnknownVertex(id) => {
                write!(f, "vertex {} is not part of the graph", id.index())
            },
        }
    }
}

impl std::error::Error for GraphError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
