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

use crate::relate::location::{Dimension, Location};
use crate::relate::polygon_node_topology::compare_angle;

/// Position names a side of a directed edge, or the edge itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Left,
    Right,
    On,
}

// The topology one input geometry contributes to an edge. Everything is
// unknown until an edge of that geometry is merged in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Label {
    dim: Option<Dimension>,
    left: Option<Location>,
    right: Option<Location>,
    on: Option<Location>,
}

impl Label {
    fn line() -> Label {
        Label {
            dim: Some(Dimension::Line),
            left: Some(Location::Exterior),
            right: Some(Location::Exterior),
            on: Some(Location::Interior),
        }
    }

    // Ring edges at a node are oriented with the area interior on the right
    // of the ring direction. An edge leaving the node along the ring
    // (forward) has the interior on its right; an edge arriving at the node
    // has it on its left.
    fn area(is_forward: bool) -> Label {
        let (left, right) = if is_forward {
            (Location::Exterior, Location::Interior)
        } else {
            (Location::Interior, Location::Exterior)
        };
        Label {
            dim: Some(Dimension::Area),
            left: Some(left),
            right: Some(right),
            on: Some(Location::Boundary),
        }
    }

    fn get(&self, pos: Position) -> Option<Location> {
        match pos {
            Position::Left => self.left,
            Position::Right => self.right,
            Position::On => self.on,
        }
    }

    fn set(&mut self, pos: Position, loc: Location) {
        match pos {
            Position::Left => self.left = Some(loc),
            Position::Right => self.right = Some(loc),
            Position::On => self.on = Some(loc),
        }
    }
}

/// RelateEdge is an edge leaving a node, labelled with the topology of
/// both input geometries around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelateEdge {
    node: Coord<f64>,
    dir_pt: Coord<f64>,
    a: Label,
    b: Label,
}

impl RelateEdge {
    pub fn new(node: Coord<f64>, dir_pt: Coord<f64>, is_a: bool, dim: Dimension, is_forward: bool) -> Self {
        let label = if dim == Dimension::Area {
            Label::area(is_forward)
        } else {
            Label::line()
        };
        let mut edge = RelateEdge {
            node,
            dir_pt,
            a: Label::default(),
            b: Label::default(),
        };
        *edge.label_mut(is_a) = label;
        edge
    }

    fn label(&self, is_a: bool) -> &Label {
        if is_a {
            &self.a
        } else {
            &self.b
        }
    }

    fn label_mut(&mut self, is_a: bool) -> &mut Label {
        if is_a {
            &mut self.a
        } else {
            &mut self.b
        }
    }

    pub fn dir_pt(&self) -> Coord<f64> {
        self.dir_pt
    }

    /// Compares the direction of this edge with the direction from the node
    /// to dir_pt.
    pub fn compare_to_edge(&self, dir_pt: Coord<f64>) -> Ordering {
        compare_angle(self.node, self.dir_pt, dir_pt)
    }

    /// Merges another edge of one geometry with the same direction into this
    /// one. Area edges override line edges, and an interior side location is
    /// never overwritten.
    pub fn merge(&mut self, is_a: bool, dim: Dimension, is_forward: bool) {
        let incoming = if dim == Dimension::Area {
            Label::area(is_forward)
        } else {
            Label::line()
        };
        let label = self.label_mut(is_a);
        if label.dim.is_none() {
            *label = incoming;
            return;
        }

        if dim == Dimension::Area && label.dim == Some(Dimension::Line) {
            label.dim = Some(Dimension::Area);
            label.on = Some(Location::Boundary);
        }
        for pos in [Position::Left, Position::Right] {
            if label.get(pos) != Some(Location::Interior) {
                if let Some(loc) = incoming.get(pos) {
                    label.set(pos, loc);
                }
            }
        }
    }

    pub fn is_known(&self, is_a: bool) -> bool {
        self.label(is_a).dim.is_some()
    }

    pub fn is_known_at(&self, is_a: bool, pos: Position) -> bool {
        self.label(is_a).get(pos).is_some()
    }

    pub fn is_interior(&self, is_a: bool, pos: Position) -> bool {
        self.location(is_a, pos) == Some(Location::Interior)
    }

    pub fn dimension(&self, is_a: bool) -> Option<Dimension> {
        self.label(is_a).dim
    }

    pub fn location(&self, is_a: bool, pos: Position) -> Option<Location> {
        self.label(is_a).get(pos)
    }

    pub fn set_location(&mut self, is_a: bool, pos: Position, loc: Location) {
        self.label_mut(is_a).set(pos, loc);
    }

    pub fn set_unknown_locations(&mut self, is_a: bool, loc: Location) {
        let label = self.label_mut(is_a);
        for pos in [Position::Left, Position::Right, Position::On] {
            if label.get(pos).is_none() {
                label.set(pos, loc);
            }
        }
    }

    /// Marks the edge as lying in the interior of an area of the geometry.
    pub fn set_area_interior(&mut self, is_a: bool) {
        let label = self.label_mut(is_a);
        label.left = Some(Location::Interior);
        label.right = Some(Location::Interior);
        label.on = Some(Location::Interior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn node() -> Coord<f64> {
        coord! { x: 0., y: 0. }
    }

    #[test]
    fn test_new_labels() {
        let e = RelateEdge::new(node(), coord! { x: 1., y: 0. }, true, Dimension::Line, false);
        assert_eq!(e.location(true, Position::On), Some(Location::Interior));
        assert_eq!(e.location(true, Position::Left), Some(Location::Exterior));
        assert!(!e.is_known(false));
        assert_eq!(e.location(false, Position::On), None);

        let fwd = RelateEdge::new(node(), coord! { x: 1., y: 0. }, false, Dimension::Area, true);
        assert_eq!(fwd.location(false, Position::Right), Some(Location::Interior));
        assert_eq!(fwd.location(false, Position::Left), Some(Location::Exterior));
        assert_eq!(fwd.location(false, Position::On), Some(Location::Boundary));
    }

    #[test]
    fn test_merge_area_over_line() {
        let mut e = RelateEdge::new(node(), coord! { x: 1., y: 0. }, true, Dimension::Line, false);
        e.merge(true, Dimension::Area, true);
        assert_eq!(e.dimension(true), Some(Dimension::Area));
        assert_eq!(e.location(true, Position::On), Some(Location::Boundary));
        assert_eq!(e.location(true, Position::Right), Some(Location::Interior));
        assert_eq!(e.location(true, Position::Left), Some(Location::Exterior));

        // the interior side survives merging the reverse edge
        e.merge(true, Dimension::Area, false);
        assert_eq!(e.location(true, Position::Right), Some(Location::Interior));
        assert_eq!(e.location(true, Position::Left), Some(Location::Interior));
    }

    #[test]
    fn test_unknown_locations() {
        let mut e = RelateEdge::new(node(), coord! { x: 1., y: 1. }, true, Dimension::Area, true);
        e.set_unknown_locations(false, Location::Exterior);
        assert_eq!(e.location(false, Position::Left), Some(Location::Exterior));
        e.set_unknown_locations(true, Location::Exterior);
        assert_eq!(e.location(true, Position::Right), Some(Location::Interior));
        e.set_area_interior(false);
        assert!(e.is_interior(false, Position::On));
    }
}
