//! Tarjan's strongly-connected-component algorithm, iterative form.
//!
//! The traversal keeps an explicit frame per active vertex (`vertex`, next
//! edge position) instead of recursing, so chains of any depth are safe. The
//! visiting order is exactly that of the recursive algorithm:
//!
//! ```text
//!   discover(v):   index = lowlink = counter++, push v, on_stack = true
//!   edge v -> w:   w unvisited  → discover(w); on return lowlink(v) = min(lowlink(v), lowlink(w))
//!                  w on stack   → lowlink(v) = min(lowlink(v), index(w))
//!   finish(v):     lowlink(v) == index(v) → pop down to v as one component
//! ```
//!
//! Components therefore appear in the order their roots finish, which depends
//! only on vertex order and per-vertex edge order.

use tracing::{debug, trace};

use super::components::{Component, Components};
use super::{Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    next_edge: usize,
}

/// Single-use SCC detector.
///
/// [`get_components`](Self::get_components) consumes the detector, so one
/// instance can never be run twice.
#[derive(Debug)]
pub struct CycleDetector<T> {
    counter: usize,
    stack: Vec<VertexId>,
    frames: Vec<Frame>,
    components: Vec<Component<T>>,
}

impl<T: Clone> CycleDetector<T> {
    pub fn new() -> Self {
        Self {
            counter: 0,
            stack: Vec::new(),
            frames: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Partitions `graph` into strongly connected components.
    ///
    /// Every vertex is visited in insertion order. Traversal state left on the
    /// vertices by an earlier run is cleared first; the new `index`/`lowlink`
    /// values remain on the graph afterwards.
    ///
    /// # Example
    ///
    /// ```
    /// use cyclecache::graph::{CycleDetector, Graph};
    ///
    /// let mut graph = Graph::from_edges(['a', 'b', 'c'], [(0, 1), (1, 2), (2, 0)]).unwrap();
    /// let components = CycleDetector::new().get_components(&mut graph);
    ///
    /// assert_eq!(components.len(), 1);
    /// assert_eq!(components.components()[0].members(), &['c', 'b', 'a']);
    /// ```
    pub fn get_components(mut self, graph: &mut Graph<T>) -> Components<T> {
        graph.reset_traversal();
        self.stack.reserve(graph.len());

        for root in 0..graph.len() {
            let root = VertexId(root);
            if graph.vertices[root.0].index.is_none() {
                self.strong_connect(graph, root);
            }
        }
        debug_assert!(self.stack.is_empty());

        let components = Components::new(self.components);
        debug!(
            vertices = graph.len(),
            components = components.len(),
            cycles = components.cycles().len(),
            "strongly connected components resolved"
        );
        components
    }

    fn strong_connect(&mut self, graph: &mut Graph<T>, root: VertexId) {
        self.discover(graph, root);

        while let Some(frame) = self.frames.last_mut() {
            let v = frame.vertex;
            let next = graph.vertices[v.0].edges.get(frame.next_edge).copied();

            let Some(w) = next else {
                self.frames.pop();
                self.finish(graph, v);
                continue;
            };
            frame.next_edge += 1;

            let (w_index, w_on_stack) = {
                let target = &graph.vertices[w.0];
                (target.index, target.on_stack)
            };
            match w_index {
                None => self.discover(graph, w),
                Some(w_index) if w_on_stack => {
                    let vertex = &mut graph.vertices[v.0];
                    vertex.lowlink = vertex.lowlink.min(w_index);
                },
                Some(_) => {},
            }
        }
    }

    fn discover(&mut self, graph: &mut Graph<T>, v: VertexId) {
        let vertex = &mut graph.vertices[v.0];
        vertex.index = Some(self.counter);
        vertex.lowlink = self.counter;
        vertex.on_stack = true;
        self.counter += 1;

        self.stack.push(v);
        self.frames.push(Frame {
            vertex: v,
            next_edge: 0,
        });
    }

    fn finish(&mut self, graph: &mut Graph<T>, v: VertexId) {
        let (index, lowlink) = {
            let vertex = &graph.vertices[v.0];
            (vertex.index, vertex.lowlink)
        };

        if index == Some(lowlink) {
            let mut members = Vec::new();
            while let Some(w) = self.stack.pop() {
                let vertex = &mut graph.vertices[w.0];
                vertex.on_stack = false;
                members.push(vertex.value.clone());
                if w == v {
                    break;
                }
            }
            let self_loop = members.len() == 1 && graph.has_self_loop(v);
            trace!(root = v.index(), size = members.len(), self_loop, "component closed");
            self.components.push(Component::new(members, self_loop));
        }

        if let Some(parent) = self.frames.last() {
            let parent = &mut graph.vertices[parent.vertex.0];
            parent.lowlink = parent.lowlink.min(lowlink);
        }
    }
}

impl<T: Clone> Default for CycleDetector<T> {
    fn default() -> Self {
        Self::new()
    }
}
