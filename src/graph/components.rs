//! Strongly connected components as reported by the detector.
//!
//! A component with more than one member is a *cycle*; a single-member
//! component is *independent*, even when its vertex has an edge to itself.
//! Single-vertex self-loops remain identifiable through
//! [`Component::has_self_loop`] and [`Components::self_loops`].

use std::slice;

/// One strongly connected component.
///
/// Members are in the order they were popped from the traversal stack, so
/// the component's root vertex is always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component<T> {
    members: Vec<T>,
    self_loop: bool,
}

impl<T> Component<T> {
    pub(crate) fn new(members: Vec<T>, self_loop: bool) -> Self {
        debug_assert!(!members.is_empty());
        Self { members, self_loop }
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for components produced by the detector.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The vertex whose lowlink equalled its index.
    pub fn root(&self) -> Option<&T> {
        self.members.last()
    }

    /// `true` when two or more vertices are mutually reachable.
    pub fn is_cycle(&self) -> bool {
        self.members.len() > 1
    }

    pub fn is_independent(&self) -> bool {
        !self.is_cycle()
    }

    /// `true` for a single vertex carrying an edge to itself.
    pub fn has_self_loop(&self) -> bool {
        self.self_loop
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.members.contains(value)
    }
}

/// Ordered list of components, in the order their roots finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components<T> {
    components: Vec<Component<T>>,
}

impl<T> Components<T> {
    pub(crate) fn new(components: Vec<Component<T>>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Component<T>] {
        &self.components
    }

    /// Single-member components, in report order.
    pub fn independent_components(&self) -> Vec<&Component<T>> {
        self.components.iter().filter(|c| c.is_independent()).collect()
    }

    /// Components of two or more members, in report order.
    pub fn cycles(&self) -> Vec<&Component<T>> {
        self.components.iter().filter(|c| c.is_cycle()).collect()
    }

    /// Independent components whose vertex has a self-loop.
    pub fn self_loops(&self) -> Vec<&Component<T>> {
        self.components.iter().filter(|c| c.has_self_loop()).collect()
    }

    pub fn has_cycles(&self) -> bool {
        self.components.iter().any(Component::is_cycle)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Component<T>> {
        self.components.iter()
    }

    pub fn into_inner(self) -> Vec<Component<T>> {
        self.components
    }
}

impl<T> IntoIterator for Components<T> {
    type Item = Component<T>;
    type IntoIter = std::vec::IntoIter<Component<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Components<T> {
    type Item = &'a Component<T>;
    type IntoIter = slice::Iter<'a, Component<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_by_size() {
        let single = Component::new(vec!['a'], false);
        let looped = Component::new(vec!['b'], true);
        let pair = Component::new(vec!['c', 'd'], false);

        assert!(single.is_independent());
        assert!(looped.is_independent());
        assert!(looped.has_self_loop());
        assert!(pair.is_cycle());
        assert_eq!(pair.root(), Some(&'d'));
        assert!(pair.contains(&'c'));
    }

    #[test]
    fn views_partition_the_list() {
        let components = Components::new(vec![
            Component::new(vec![1], false),
            Component::new(vec![2, 3], false),
            Component::new(vec![4], true),
        ]);

        assert_eq!(components.len(), 3);
        assert_eq!(components.independent_components().len(), 2);
        assert_eq!(components.cycles().len(), 1);
        assert_eq!(components.self_loops().len(), 1);
        assert!(components.has_cycles());

        let roots: Vec<_> = components.iter().filter_map(Component::root).copied().collect();
        assert_eq!(roots, vec![1, 3, 4]);

        let members: Vec<Vec<i32>> = components.into_iter().map(Component::into_members).collect();
        assert_eq!(members, vec![vec![1], vec![2, 3], vec![4]]);
    }
}
