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

use crate::relate::node_section::NodeSection;
use crate::relate::polygon_node_converter;
use crate::relate::relate_node::RelateNode;

/// NodeSections collects the sections of both geometries incident on one
/// node. Sections are not deduplicated; a ring may pass through the node
/// more than once.
#[derive(Debug, Clone)]
pub struct NodeSections {
    node_pt: Coord<f64>,
    sections: Vec<NodeSection>,
}

impl NodeSections {
    pub fn new(node_pt: Coord<f64>) -> NodeSections {
        NodeSections {
            node_pt,
            sections: vec![],
        }
    }

    pub fn coord(&self) -> Coord<f64> {
        self.node_pt
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn add(&mut self, section: NodeSection) {
        self.sections.push(section);
    }

    /// Reports whether sections of both geometries meet at the node.
    pub fn has_interaction_ab(&self) -> bool {
        let mut is_a = false;
        let mut is_b = false;
        for ns in &self.sections {
            if ns.is_a() {
                is_a = true;
            } else {
                is_b = true;
            }
            if is_a && is_b {
                return true;
            }
        }
        false
    }

    /// The polygonal element of the given geometry with a ring through the
    /// node, if there is one.
    pub fn polygonal(&self, is_a: bool) -> Option<usize> {
        self.sections
            .iter()
            .filter(|ns| ns.is_a() == is_a)
            .find_map(|ns| ns.polygonal())
    }

    /// Builds the node topology from the sections. Sections of the same
    /// polygon are first converted so that each bounds a single wedge of
    /// the polygon interior.
    pub fn create_node(&mut self) -> RelateNode {
        self.sections.sort();
        let mut node = RelateNode::new(self.node_pt);
        let mut i = 0;
        while i < self.sections.len() {
            let ns = self.sections[i];
            if ns.is_area() && self.has_multiple_polygon_sections(i) {
                let poly_sections: Vec<NodeSection> = self.sections[i..]
                    .iter()
                    .take_while(|s| ns.is_same_polygon(s))
                    .copied()
                    .collect();
                i += poly_sections.len();
                node.add_sections(&polygon_node_converter::convert(poly_sections));
            } else {
                node.add_section(&ns);
                i += 1;
            }
        }
        node
    }

    fn has_multiple_polygon_sections(&self, i: usize) -> bool {
        match self.sections.get(i + 1) {
            Some(next) => self.sections[i].is_same_polygon(next),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relate::location::{Dimension, Location};
    use crate::relate::relate_edge::Position;
    use geo_types::coord;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn c(x: f64, y: f64) -> Coord<f64> {
        coord! { x: x, y: y }
    }

    fn line(is_a: bool, id: usize, v0: Coord<f64>, v1: Coord<f64>) -> NodeSection {
        NodeSection::new(is_a, Dimension::Line, id, None, None, true, Some(v0), c(0., 0.), Some(v1))
    }

    fn shell(is_a: bool, id: usize, v0: Coord<f64>, v1: Coord<f64>) -> NodeSection {
        NodeSection::new(is_a, Dimension::Area, id, Some(0), Some(id), true, Some(v0), c(0., 0.), Some(v1))
    }

    #[test]
    fn test_interaction_and_polygonal() {
        let mut sections = NodeSections::new(c(0., 0.));
        sections.add(line(true, 0, c(-1., 0.), c(1., 0.)));
        assert!(!sections.has_interaction_ab());
        assert_eq!(sections.polygonal(true), None);
        sections.add(shell(false, 3, c(1., 1.), c(-1., 1.)));
        assert!(sections.has_interaction_ab());
        assert_eq!(sections.polygonal(false), Some(3));
        assert_eq!(sections.polygonal(true), None);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_self_touching_shell_node() {
        // bow-tie shell of A and a B line passing through the empty
        // quadrants
        let mut sections = NodeSections::new(c(0., 0.));
        sections.add(shell(true, 1, c(1., 0.), c(0., 1.)));
        sections.add(shell(true, 1, c(-1., 0.), c(0., -1.)));
        sections.add(line(false, 0, c(1., -1.), c(-1., 1.)));
        let mut node = sections.create_node();
        node.finish(false, false);
        for e in node.edges() {
            if e.dir_pt() == c(1., -1.) || e.dir_pt() == c(-1., 1.) {
                assert_eq!(e.location(true, Position::On), Some(Location::Exterior));
            }
        }
    }

    #[test]
    fn test_order_independent() {
        let base = vec![
            shell(true, 1, c(1., 0.), c(0., 1.)),
            shell(true, 1, c(-1., 0.), c(0., -1.)),
            line(false, 0, c(1., -1.), c(-1., 1.)),
            line(false, 1, c(2., -2.), c(1., 3.)),
            shell(false, 2, c(0., -1.), c(-1., -1.)),
            line(true, 5, c(3., 1.), c(-2., -3.)),
        ];
        let expected = {
            let mut sections = NodeSections::new(c(0., 0.));
            base.iter().for_each(|s| sections.add(*s));
            let mut node = sections.create_node();
            node.finish(false, false);
            node.edges().to_vec()
        };

        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let mut shuffled = base.clone();
            shuffled.shuffle(&mut rng);
            let mut sections = NodeSections::new(c(0., 0.));
            shuffled.into_iter().for_each(|s| sections.add(s));
            let mut node = sections.create_node();
            node.finish(false, false);
            assert_eq!(node.edges(), expected.as_slice());
        }
    }
}
