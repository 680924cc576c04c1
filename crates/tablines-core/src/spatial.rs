//! R-tree index over a page's text elements.

use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::Rectangle;
use crate::text::TextElement;

/// Envelope entry pointing back into the element list.
#[derive(Debug, Clone, Copy)]
struct ElementEnvelope {
    aabb: AABB<[f64; 2]>,
    index: usize,
}

impl RTreeObject for ElementEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

fn envelope_of(rect: &Rectangle) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.left(), rect.top()], [rect.right(), rect.bottom()])
}

/// Immutable spatial index of text elements.
///
/// Built once per page and shared (behind an `Arc`) by every area crop of
/// that page. Rulings are not indexed.
#[derive(Debug)]
pub struct SpatialIndex {
    elements: Vec<TextElement>,
    tree: RTree<ElementEnvelope>,
}

impl SpatialIndex {
    pub fn new(elements: Vec<TextElement>) -> Self {
        let entries = elements
            .iter()
            .enumerate()
            .map(|(index, element)| ElementEnvelope {
                aabb: envelope_of(&element.bounds),
                index,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            elements,
        }
    }

    /// Every element whose bounds intersect `area`, edges inclusive.
    ///
    /// Results come back in insertion order.
    pub fn intersecting(&self, area: &Rectangle) -> Vec<&TextElement> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope_of(area))
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.elements[i]).collect()
    }

    /// Every element whose bounds lie entirely inside `area`, in insertion order.
    pub fn contained_in(&self, area: &Rectangle) -> Vec<&TextElement> {
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope_of(area))
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|i| &self.elements[i]).collect()
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
