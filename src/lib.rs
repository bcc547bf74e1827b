//! cyclecache: strongly-connected-component detection and eviction-aware
//! cache primitives.
//!
//! - [`graph`]: Tarjan SCC detection over a caller-owned vertex arena, with
//!   components classified as independent or cyclic.
//! - [`cache`]: a cache wrapper that announces inserts and evictions, over any
//!   [`traits::EvictionScheme`] ([`policy::lru`], [`policy::fifo`]).
//! - [`handle`]: a resource-handle cache with create/destroy handlers.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod graph;
pub mod handle;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;
