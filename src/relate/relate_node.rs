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
use crate::relate::node_section::NodeSection;
use crate::relate::relate_edge::{Position, RelateEdge};

/// RelateNode is the local topology at a node: the edges of both input
/// geometries leaving it, in counter-clockwise order, with their labels.
#[derive(Debug, Clone)]
pub struct RelateNode {
    node_pt: Coord<f64>,
    edges: Vec<RelateEdge>,
}

impl RelateNode {
    pub fn new(node_pt: Coord<f64>) -> RelateNode {
        RelateNode {
            node_pt,
            edges: vec![],
        }
    }

    pub fn coord(&self) -> Coord<f64> {
        self.node_pt
    }

    pub fn edges(&self) -> &[RelateEdge] {
        &self.edges
    }

    pub fn add_sections(&mut self, sections: &[NodeSection]) {
        for ns in sections {
            self.add_section(ns);
        }
    }

    pub fn add_section(&mut self, ns: &NodeSection) {
        match ns.dimension() {
            Dimension::Line => {
                self.add_edge(ns.is_a(), ns.v0(), Dimension::Line, false);
                self.add_edge(ns.is_a(), ns.v1(), Dimension::Line, false);
            }
            Dimension::Area => {
                // the incoming arm has the interior on its left, the
                // outgoing arm on its right
                let e0 = self.add_edge(ns.is_a(), ns.v0(), Dimension::Area, false);
                let e1 = self.add_edge(ns.is_a(), ns.v1(), Dimension::Area, true);
                let (i0, i1) = match (e0.and_then(|d| self.index_of(d)), e1.and_then(|d| self.index_of(d))) {
                    (Some(i0), Some(i1)) => (i0, i1),
                    _ => return,
                };
                self.update_edges_in_area(ns.is_a(), i0, i1);
                self.update_if_area_prev(ns.is_a(), i0);
                self.update_if_area_next(ns.is_a(), i1);
            }
            _ => {}
        }
    }

    fn next_index(&self, i: usize) -> usize {
        if i + 1 >= self.edges.len() {
            0
        } else {
            i + 1
        }
    }

    fn prev_index(&self, i: usize) -> usize {
        if i == 0 {
            self.edges.len() - 1
        } else {
            i - 1
        }
    }

    fn index_of(&self, dir_pt: Coord<f64>) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.compare_to_edge(dir_pt) == Ordering::Equal)
    }

    // Every edge strictly between the incoming and outgoing arms (CCW from
    // the incoming one) lies inside the area.
    fn update_edges_in_area(&mut self, is_a: bool, from: usize, to: usize) {
        let mut i = self.next_index(from);
        while i != to {
            self.edges[i].set_area_interior(is_a);
            i = self.next_index(i);
        }
    }

    fn update_if_area_prev(&mut self, is_a: bool, i: usize) {
        let prev = self.prev_index(i);
        if self.edges[prev].is_interior(is_a, Position::Left) {
            self.edges[i].set_area_interior(is_a);
        }
    }

    fn update_if_area_next(&mut self, is_a: bool, i: usize) {
        let next = self.next_index(i);
        if self.edges[next].is_interior(is_a, Position::Right) {
            self.edges[i].set_area_interior(is_a);
        }
    }

    // add_edge inserts an edge in angular order, or merges it into an
    // existing edge with the same direction. Missing or zero-length arms
    // are ignored. Returns the direction of the edge that holds the arm.
    fn add_edge(
        &mut self,
        is_a: bool,
        dir_pt: Option<Coord<f64>>,
        dim: Dimension,
        is_forward: bool,
    ) -> Option<Coord<f64>> {
        let dir_pt = dir_pt?;
        if dir_pt == self.node_pt {
            return None;
        }
        let mut insert_at = self.edges.len();
        for (i, e) in self.edges.iter_mut().enumerate() {
            match e.compare_to_edge(dir_pt) {
                Ordering::Equal => {
                    e.merge(is_a, dim, is_forward);
                    return Some(e.dir_pt());
                }
                Ordering::Greater => {
                    insert_at = i;
                    break;
                }
                Ordering::Less => {}
            }
        }
        self.edges
            .insert(insert_at, RelateEdge::new(self.node_pt, dir_pt, is_a, dim, is_forward));
        Some(dir_pt)
    }

    /// Completes the labels of the edges once all sections are added. If
    /// the node lies in the interior of an area of a geometry, every edge
    /// is inside it; otherwise the side locations known for the geometry
    /// are carried around the node.
    pub fn finish(&mut self, is_area_interior_a: bool, is_area_interior_b: bool) {
        self.finish_node(true, is_area_interior_a);
        self.finish_node(false, is_area_interior_b);
    }

    fn finish_node(&mut self, is_a: bool, is_area_interior: bool) {
        if is_area_interior {
            for e in self.edges.iter_mut() {
                e.set_area_interior(is_a);
            }
            return;
        }
        if let Some(start) = self.edges.iter().position(|e| e.is_known(is_a)) {
            self.propagate_side_locations(is_a, start);
        }
    }

    fn propagate_side_locations(&mut self, is_a: bool, start: usize) {
        let mut curr_loc = self.edges[start].location(is_a, Position::Left);
        let mut i = self.next_index(start);
        while i != start {
            let e = &mut self.edges[i];
            if let Some(loc) = curr_loc {
                e.set_unknown_locations(is_a, loc);
            }
            curr_loc = e.location(is_a, Position::Left);
            i = self.next_index(i);
        }
    }

    pub fn has_exterior_edge(&self, is_a: bool) -> bool {
        self.edges.iter().any(|e| {
            e.location(is_a, Position::Left) == Some(Location::Exterior)
                || e.location(is_a, Position::Right) == Some(Location::Exterior)
        })
    }
}
