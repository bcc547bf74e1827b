pub use crate::builder::{CacheBuilder, CachePolicy, PolicyScheme};
pub use crate::cache::EvictingCache;
pub use crate::error::{ConfigError, GraphError, InvariantError};
pub use crate::graph::{Component, Components, CycleDetector, Graph, VertexId};
pub use crate::handle::ResourceCache;
pub use crate::policy::fifo::FifoScheme;
pub use crate::policy::lru::LruScheme;
pub use crate::traits::EvictionScheme;
