// Copyright 2024 The relateng Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;

use geo_types::Coord;

use crate::relate::coordinate::compare_coords;
use crate::relate::location::Dimension;
use crate::relate::polygon_node_topology::compare_angle;

/// NodeSection is the part of an edge chain of one input geometry that
/// passes through a node.
///
/// A section holds the vertices before and after the node on its chain. At
/// the start or end of an open line one of them is absent. Ring sections
/// have both, and the ring is oriented so that the area interior lies on the
/// right of v0 -> node -> v1.
#[derive(Debug, Clone, Copy)]
pub struct NodeSection {
    is_a: bool,
    dim: Dimension,
    id: usize,
    ring_id: Option<usize>,
    polygonal: Option<usize>,
    is_node_at_vertex: bool,
    v0: Option<Coord<f64>>,
    node_pt: Coord<f64>,
    v1: Option<Coord<f64>>,
}

impl NodeSection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        is_a: bool,
        dim: Dimension,
        id: usize,
        ring_id: Option<usize>,
        polygonal: Option<usize>,
        is_node_at_vertex: bool,
        v0: Option<Coord<f64>>,
        node_pt: Coord<f64>,
        v1: Option<Coord<f64>>,
    ) -> NodeSection {
        NodeSection {
            is_a,
            dim,
            id,
            ring_id,
            polygonal,
            is_node_at_vertex,
            v0,
            node_pt,
            v1,
        }
    }

    /// Returns a copy of this section with new arms, as part of the shell
    /// of its polygon.
    pub fn with_vertices(&self, v0: Option<Coord<f64>>, v1: Option<Coord<f64>>) -> NodeSection {
        NodeSection {
            dim: Dimension::Area,
            ring_id: Some(0),
            v0,
            v1,
            ..*self
        }
    }

    pub fn is_a(&self) -> bool {
        self.is_a
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn ring_id(&self) -> Option<usize> {
        self.ring_id
    }

    /// The index of the polygonal element owning this ring, if any.
    pub fn polygonal(&self) -> Option<usize> {
        self.polygonal
    }

    pub fn node_pt(&self) -> Coord<f64> {
        self.node_pt
    }

    pub fn v0(&self) -> Option<Coord<f64>> {
        self.v0
    }

    pub fn v1(&self) -> Option<Coord<f64>> {
        self.v1
    }

    pub fn is_node_at_vertex(&self) -> bool {
        self.is_node_at_vertex
    }

    /// A section is proper when the node lies in the interior of one of its
    /// segments.
    pub fn is_proper(&self) -> bool {
        !self.is_node_at_vertex
    }

    pub fn is_area(&self) -> bool {
        self.dim == Dimension::Area
    }

    pub fn is_shell(&self) -> bool {
        self.ring_id == Some(0)
    }

    pub fn is_same_geometry(&self, other: &NodeSection) -> bool {
        self.is_a == other.is_a
    }

    pub fn is_same_polygon(&self, other: &NodeSection) -> bool {
        self.is_a == other.is_a && self.id == other.id
    }

    pub fn is_area_area(a: &NodeSection, b: &NodeSection) -> bool {
        a.is_area() && b.is_area()
    }

    pub fn is_proper_pair(a: &NodeSection, b: &NodeSection) -> bool {
        a.is_proper() && b.is_proper()
    }

    /// Orders sections by the angle of their incoming arm around the node.
    pub fn compare_edge_angle(&self, other: &NodeSection) -> Ordering {
        match (self.v0, other.v0) {
            (Some(p), Some(q)) => compare_angle(self.node_pt, p, q),
            (p, q) => p.is_some().cmp(&q.is_some()),
        }
    }
}

fn compare_optional(a: Option<Coord<f64>>, b: Option<Coord<f64>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => compare_coords(a, b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

impl PartialEq for NodeSection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeSection {}

impl PartialOrd for NodeSection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Sections of A come before those of B; then lower dimensions, then element
// and ring ids, then the arm vertices.
impl Ord for NodeSection {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_a
            .cmp(&self.is_a)
            .then_with(|| self.dim.cmp(&other.dim))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.ring_id.cmp(&other.ring_id))
            .then_with(|| compare_optional(self.v0, other.v0))
            .then_with(|| compare_optional(self.v1, other.v1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn line(is_a: bool, id: usize, v0: Option<Coord<f64>>, v1: Option<Coord<f64>>) -> NodeSection {
        NodeSection::new(is_a, Dimension::Line, id, None, None, true, v0, coord! { x: 0., y: 0. }, v1)
    }

    #[test]
    fn test_order() {
        let a = line(true, 3, Some(coord! { x: 1., y: 0. }), None);
        let b = line(false, 0, Some(coord! { x: 1., y: 0. }), None);
        assert!(a < b);

        let start = line(true, 1, None, Some(coord! { x: 1., y: 0. }));
        let mid = line(true, 1, Some(coord! { x: -1., y: 0. }), Some(coord! { x: 1., y: 0. }));
        assert!(start < mid);

        let ring = NodeSection::new(
            true,
            Dimension::Area,
            0,
            Some(1),
            Some(0),
            true,
            Some(coord! { x: 1., y: 0. }),
            coord! { x: 0., y: 0. },
            Some(coord! { x: 0., y: 1. }),
        );
        assert!(mid < ring);
        assert!(!ring.is_shell());
        assert!(ring.with_vertices(ring.v1(), ring.v0()).is_shell());
    }

    #[test]
    fn test_same_polygon() {
        let a = line(true, 1, None, None);
        let b = line(true, 1, Some(coord! { x: 5., y: 5. }), None);
        let c = line(false, 1, None, None);
        assert!(a.is_same_polygon(&b));
        assert!(!a.is_same_polygon(&c));
        assert!(a.is_same_geometry(&b));
        assert!(!b.is_same_geometry(&c));
    }
}
