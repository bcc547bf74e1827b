//! Directed dependency graphs and strongly-connected-component detection.
//!
//! ## Architecture
//!
//! ```text
//!   Graph<T> (caller-owned arena)
//!   ┌──────────┬──────────────────────────────────────────────────┐
//!   │ VertexId │ Vertex { value, index, lowlink, on_stack, edges } │
//!   ├──────────┼──────────────────────────────────────────────────┤
//!   │ 0        │ { "core", None, 0, false, [1] }                  │
//!   │ 1        │ { "io",   None, 0, false, [0, 2] }               │
//!   │ 2        │ { "log",  None, 0, false, [] }                   │
//!   └──────────┴──────────────────────────────────────────────────┘
//!
//!   CycleDetector::get_components(self, &mut graph) ─► Components<T>
//!        [ ["log"], ["io", "core"] ]
//!             │            │
//!        independent     cycle
//! ```
//!
//! Edges are [`VertexId`]s into the same arena, so the detector never holds a
//! reference whose lifetime it cannot see. Traversal state (`index`,
//! `lowlink`) is written onto the vertices during a run and stays readable
//! afterwards through [`Graph::vertex_index`] and [`Graph::vertex_lowlink`].
//!
//! ## Example
//!
//! ```
//! use cyclecache::graph::{CycleDetector, Graph};
//!
//! let mut graph = Graph::new();
//! let core = graph.add_vertex("core");
//! let io = graph.add_vertex("io");
//! let log = graph.add_vertex("log");
//! graph.add_edge(core, io).unwrap();
//! graph.add_edge(io, core).unwrap();
//! graph.add_edge(io, log).unwrap();
//!
//! let components = CycleDetector::new().get_components(&mut graph);
//! assert_eq!(components.len(), 2);
//! assert_eq!(components.cycles().len(), 1);
//! assert_eq!(components.independent_components()[0].members(), &["log"]);
//! ```

pub mod components;
pub mod tarjan;

pub use components::{Component, Components};
pub use tarjan::CycleDetector;

use crate::error::{GraphError, InvariantError};

/// Handle to a vertex inside a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    /// Builds an id from an arena position.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the vertex in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Vertex<T> {
    value: T,
    index: Option<usize>,
    lowlink: usize,
    on_stack: bool,
    edges: Vec<VertexId>,
}

impl<T> Vertex<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            index: None,
            lowlink: 0,
            on_stack: false,
            edges: Vec::new(),
        }
    }
}

/// Index-addressed arena of vertices with ordered outgoing edges.
///
/// Vertex order is insertion order; edge order is the order of
/// [`add_edge`](Self::add_edge) calls. Both determine the order of the
/// components a [`CycleDetector`] reports.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    vertices: Vec<Vertex<T>>,
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
        }
    }

    /// Builds a graph from vertex values and `(from, to)` position pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use cyclecache::graph::Graph;
    ///
    /// let graph = Graph::from_edges(["a", "b"], [(0, 1), (1, 0)]).unwrap();
    /// assert_eq!(graph.len(), 2);
    /// assert!(Graph::from_edges(["a"], [(0, 3)]).is_err());
    /// ```
    pub fn from_edges<V, E>(values: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = T>,
        E: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new();
        for value in values {
            graph.add_vertex(value);
        }
        for (from, to) in edges {
            graph.add_edge(VertexId(from), VertexId(to))?;
        }
        Ok(graph)
    }

    pub fn add_vertex(&mut self, value: T) -> VertexId {
        self.vertices.push(Vertex::new(value));
        VertexId(self.vertices.len() - 1)
    }

    /// Appends the edge `from -> to` after any existing edges of `from`.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> Result<(), GraphError> {
        if to.0 >= self.vertices.len() {
            return Err(GraphError::UnknownVertex(to));
        }
        let vertex = self
            .vertices
            .get_mut(from.0)
            .ok_or(GraphError::UnknownVertex(from))?;
        vertex.edges.push(to);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn value(&self, id: VertexId) -> Option<&T> {
        self.vertices.get(id.0).map(|vertex| &vertex.value)
    }

    pub fn edges(&self, id: VertexId) -> Option<&[VertexId]> {
        self.vertices.get(id.0).map(|vertex| vertex.edges.as_slice())
    }

    pub fn has_self_loop(&self, id: VertexId) -> bool {
        self.edges(id).is_some_and(|edges| edges.contains(&id))
    }

    /// Discovery index assigned by the last detection run; `None` if unvisited.
    pub fn vertex_index(&self, id: VertexId) -> Option<usize> {
        self.vertices.get(id.0)?.index
    }

    /// Lowlink computed by the last detection run; `None` if unvisited.
    pub fn vertex_lowlink(&self, id: VertexId) -> Option<usize> {
        let vertex = self.vertices.get(id.0)?;
        vertex.index.map(|_| vertex.lowlink)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Verifies edge targets and, for visited vertices, the traversal state
    /// left behind by a completed run.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for (pos, vertex) in self.vertices.iter().enumerate() {
            if let Some(edge) = vertex.edges.iter().find(|e| e.0 >= self.vertices.len()) {
                return Err(InvariantError::new(format!(
                    "vertex {pos} has an edge to missing vertex {}",
                    edge.0
                )));
            }
            if vertex.on_stack {
                return Err(InvariantError::new(format!(
                    "vertex {pos} is still marked as on the traversal stack"
                )));
            }
            if let Some(index) = vertex.index
                && vertex.lowlink > index
            {
                return Err(InvariantError::new(format!(
                    "vertex {pos} has lowlink {} above its index {index}",
                    vertex.lowlink
                )));
            }
        }
        Ok(())
    }

    fn reset_traversal(&mut self) {
        for vertex in &mut self.vertices {
            vertex.index = None;
            vertex.lowlink = 0;
            vertex.on_stack = false;
        }
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a fresh [`CycleDetector`] over `graph`.
pub fn strongly_connected_components<T: Clone>(graph: &mut Graph<T>) -> Components<T> {
    CycleDetector::new().get_components(graph)
}
