//! Excluding children from a choreography

use cadence_core::{Container, Element, ElementId};
use rustc_hash::FxHashSet;

/// Which children to leave out
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExclusionSpec {
    /// Keep every child
    #[default]
    None,
    /// Drop children whose id is in the set
    ById(FxHashSet<ElementId>),
    /// Drop children whose index in the container is in the set
    ByIndex(FxHashSet<usize>),
}

impl ExclusionSpec {
    pub fn by_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ElementId>,
    {
        ExclusionSpec::ById(ids.into_iter().map(Into::into).collect())
    }

    pub fn by_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        ExclusionSpec::ByIndex(indices.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExclusionSpec::None => true,
            ExclusionSpec::ById(ids) => ids.is_empty(),
            ExclusionSpec::ByIndex(indices) => indices.is_empty(),
        }
    }

    pub fn excludes(&self, index: usize, element: &Element) -> bool {
        match self {
            ExclusionSpec::None => false,
            ExclusionSpec::ById(ids) => ids.contains(&element.id),
            ExclusionSpec::ByIndex(indices) => indices.contains(&index),
        }
    }

    /// The container's children minus the excluded ones, in container order
    pub fn filter(&self, container: &Container) -> Vec<Element> {
        container
            .children()
            .iter()
            .enumerate()
            .filter(|(index, element)| !self.excludes(*index, element))
            .map(|(_, element)| *element)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(ids: &[u64]) -> Container {
        Container::new(100.0, 100.0)
            .with_children(ids.iter().map(|id| Element::new(*id, *id as f64, 0.0)))
    }

    fn ids(elements: &[Element]) -> Vec<u64> {
        elements.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_exclude_by_id() {
        let c = container(&[1, 2, 5, 7, 9]);
        let kept = ExclusionSpec::by_ids([2u64, 7]).filter(&c);
        assert_eq!(ids(&kept), vec![1, 5, 9]);
    }

    #[test]
    fn test_exclude_by_index() {
        let c = container(&[1, 2, 5, 7, 9]);
        let kept = ExclusionSpec::by_indices([0, 4, 12]).filter(&c);
        assert_eq!(ids(&kept), vec![2, 5, 7]);
    }

    #[test]
    fn test_no_exclusions() {
        let c = container(&[3, 1, 2]);
        assert!(ExclusionSpec::None.is_empty());
        assert!(ExclusionSpec::by_ids(Vec::<u64>::new()).is_empty());
        assert_eq!(ExclusionSpec::None.filter(&c), c.children().to_vec());
    }
}
