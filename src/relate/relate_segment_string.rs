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

use geo_types::Coord;

use crate::relate::location::Dimension;
use crate::relate::node_section::NodeSection;

/// RelateSegmentString is a line or a polygon ring of an input geometry,
/// with the information needed to build node sections on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RelateSegmentString {
    pts: Vec<Coord<f64>>,
    is_a: bool,
    dim: Dimension,
    id: usize,
    ring_id: Option<usize>,
    polygonal: Option<usize>,
}

impl RelateSegmentString {
    pub fn line(pts: Vec<Coord<f64>>, is_a: bool, id: usize) -> RelateSegmentString {
        RelateSegmentString {
            pts,
            is_a,
            dim: Dimension::Line,
            id,
            ring_id: None,
            polygonal: None,
        }
    }

    /// A ring of polygon element `id`. Ring 0 is the shell. `polygonal` is
    /// the polygonal element the polygon belongs to.
    pub fn ring(pts: Vec<Coord<f64>>, is_a: bool, id: usize, ring_id: usize, polygonal: usize) -> RelateSegmentString {
        RelateSegmentString {
            pts,
            is_a,
            dim: Dimension::Area,
            id,
            ring_id: Some(ring_id),
            polygonal: Some(polygonal),
        }
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn num_segments(&self) -> usize {
        self.pts.len().saturating_sub(1)
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

    pub fn is_closed(&self) -> bool {
        self.pts.len() > 1 && self.pts.first() == self.pts.last()
    }

    pub fn segment(&self, i: usize) -> (Coord<f64>, Coord<f64>) {
        (self.pts[i], self.pts[i + 1])
    }

    /// Reports whether an intersection point found on segment `seg_index`
    /// should be recorded for that segment. A vertex shared by two segments
    /// belongs to the segment starting at it, so every node is recorded
    /// once per string. The final point of an open line belongs to the
    /// final segment.
    pub fn is_containing_segment(&self, seg_index: usize, pt: Coord<f64>) -> bool {
        if pt == self.pts[seg_index] {
            return true;
        }
        if pt == self.pts[seg_index + 1] {
            let is_final_segment = seg_index + 2 == self.pts.len();
            return is_final_segment && !self.is_closed();
        }
        true
    }

    /// Creates the section of this string through an intersection point on
    /// segment `seg_index`.
    pub fn create_node_section(&self, seg_index: usize, int_pt: Coord<f64>) -> NodeSection {
        let is_node_at_vertex = int_pt == self.pts[seg_index] || int_pt == self.pts[seg_index + 1];
        NodeSection::new(
            self.is_a,
            self.dim,
            self.id,
            self.ring_id,
            self.polygonal,
            is_node_at_vertex,
            self.prev_vertex(seg_index, int_pt),
            int_pt,
            self.next_vertex(seg_index, int_pt),
        )
    }

    fn prev_vertex(&self, seg_index: usize, pt: Coord<f64>) -> Option<Coord<f64>> {
        let seg_start = self.pts[seg_index];
        if seg_start != pt {
            return Some(seg_start);
        }
        if seg_index > 0 {
            return Some(self.pts[seg_index - 1]);
        }
        if self.is_closed() {
            return Some(self.pts[self.pts.len() - 2]);
        }
        None
    }

    fn next_vertex(&self, seg_index: usize, pt: Coord<f64>) -> Option<Coord<f64>> {
        let seg_end = self.pts[seg_index + 1];
        if seg_end != pt {
            return Some(seg_end);
        }
        if seg_index + 2 < self.pts.len() {
            return Some(self.pts[seg_index + 2]);
        }
        if self.is_closed() {
            return Some(self.pts[1]);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn c(x: f64, y: f64) -> Coord<f64> {
        coord! { x: x, y: y }
    }

    #[test]
    fn test_line_sections() {
        let ss = RelateSegmentString::line(vec![c(0., 0.), c(10., 0.), c(10., 10.)], true, 3);
        assert!(!ss.is_closed());
        assert_eq!(ss.num_segments(), 2);

        let start = ss.create_node_section(0, c(0., 0.));
        assert_eq!(start.v0(), None);
        assert_eq!(start.v1(), Some(c(10., 0.)));
        assert!(start.is_node_at_vertex());

        let proper = ss.create_node_section(0, c(5., 0.));
        assert_eq!(proper.v0(), Some(c(0., 0.)));
        assert_eq!(proper.v1(), Some(c(10., 0.)));
        assert!(proper.is_proper());

        let corner = ss.create_node_section(0, c(10., 0.));
        assert_eq!(corner.v0(), Some(c(0., 0.)));
        assert_eq!(corner.v1(), Some(c(10., 10.)));

        let end = ss.create_node_section(1, c(10., 10.));
        assert_eq!(end.v1(), None);
    }

    #[test]
    fn test_containing_segment() {
        let line = RelateSegmentString::line(vec![c(0., 0.), c(10., 0.), c(10., 10.)], false, 0);
        assert!(line.is_containing_segment(1, c(10., 0.)));
        assert!(!line.is_containing_segment(0, c(10., 0.)));
        assert!(line.is_containing_segment(1, c(10., 10.)));
        assert!(line.is_containing_segment(0, c(3., 0.)));

        let ring = RelateSegmentString::ring(vec![c(0., 0.), c(0., 10.), c(10., 0.), c(0., 0.)], true, 1, 0, 0);
        assert!(ring.is_closed());
        assert!(!ring.is_containing_segment(2, c(0., 0.)));
        assert!(ring.is_containing_segment(0, c(0., 0.)));
        let ns = ring.create_node_section(0, c(0., 0.));
        assert_eq!(ns.v0(), Some(c(10., 0.)));
        assert_eq!(ns.v1(), Some(c(0., 10.)));
        assert!(ns.is_shell());
        assert_eq!(ns.polygonal(), Some(0));
    }
}
