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

use std::borrow::Cow;

use geo_types::{Coord, Polygon};

use crate::relate::coordinate::{is_on_segment, orient_ring};
use crate::relate::location::{Dimension, Location};
use crate::relate::node_section::NodeSection;
use crate::relate::node_sections::NodeSections;

/// AdjacentEdgeLocator locates a point lying on the boundaries of more than
/// one polygon of a collection.
///
/// Polygons of a collection may be adjacent, in which case a point on a
/// shared edge lies in the interior of their union. The locator rebuilds the
/// node topology of all ring edges at the point and reports Boundary when
/// some edge still has the exterior on one side, and Interior otherwise.
#[derive(Debug, Clone, Default)]
pub struct AdjacentEdgeLocator {
    rings: Vec<Vec<Coord<f64>>>,
}

impl AdjacentEdgeLocator {
    pub fn new<'a, 'b: 'a, I>(polygons: I) -> AdjacentEdgeLocator
    where
        I: IntoIterator<Item = &'a Cow<'b, Polygon<f64>>>,
    {
        let mut rings = vec![];
        for poly in polygons {
            if poly.exterior().0.is_empty() {
                continue;
            }
            rings.push(orient_ring(&poly.exterior().0, true));
            for hole in poly.interiors() {
                rings.push(orient_ring(&hole.0, false));
            }
        }
        AdjacentEdgeLocator { rings }
    }

    pub fn locate(&self, p: Coord<f64>) -> Location {
        let mut sections = NodeSections::new(p);
        for ring in &self.rings {
            add_sections(p, ring, &mut sections);
        }
        let node = sections.create_node();
        if node.has_exterior_edge(true) {
            Location::Boundary
        } else {
            Location::Interior
        }
    }
}

fn add_sections(p: Coord<f64>, ring: &[Coord<f64>], sections: &mut NodeSections) {
    if ring.len() < 2 {
        return;
    }
    for i in 0..ring.len() - 1 {
        let p0 = ring[i];
        let p_next = ring[i + 1];
        if p == p_next {
            // the end of a segment belongs to the next segment
            continue;
        } else if p == p0 {
            let p_prev = if i > 0 { ring[i - 1] } else { ring[ring.len() - 2] };
            sections.add(create_section(p, p_prev, p_next));
        } else if is_on_segment(p, p0, p_next) {
            sections.add(create_section(p, p0, p_next));
        }
    }
}

// All rings are treated as parts of one polygon, so touching rings are
// merged by the polygon node conversion.
fn create_section(p: Coord<f64>, prev: Coord<f64>, next: Coord<f64>) -> NodeSection {
    NodeSection::new(true, Dimension::Area, 1, Some(0), None, false, Some(prev), p, Some(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, polygon};

    #[test]
    fn test_adjacent_squares() {
        let left = polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.)];
        let right = polygon![(x: 10., y: 0.), (x: 20., y: 0.), (x: 20., y: 10.), (x: 10., y: 10.), (x: 10., y: 0.)];
        let polys = vec![Cow::Borrowed(&left), Cow::Borrowed(&right)];
        let locator = AdjacentEdgeLocator::new(&polys);

        // on the shared edge
        assert_eq!(locator.locate(coord! { x: 10., y: 5. }), Location::Interior);
        // a shared vertex on the outer boundary
        assert_eq!(locator.locate(coord! { x: 10., y: 0. }), Location::Boundary);
    }

    #[test]
    fn test_corner_touch() {
        let a = polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.)];
        let b = polygon![(x: 10., y: 10.), (x: 20., y: 10.), (x: 20., y: 20.), (x: 10., y: 20.), (x: 10., y: 10.)];
        let polys = vec![Cow::Borrowed(&a), Cow::Borrowed(&b)];
        let locator = AdjacentEdgeLocator::new(&polys);
        assert_eq!(locator.locate(coord! { x: 10., y: 10. }), Location::Boundary);
    }
}
