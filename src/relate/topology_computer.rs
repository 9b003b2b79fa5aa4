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

use std::collections::BTreeMap;

use tracing::trace;

use crate::relate::coordinate::CoordKey;
use crate::relate::error::{RelateError, RelateResult};
use crate::relate::location::{Dimension, Location};
use crate::relate::node_section::NodeSection;
use crate::relate::node_sections::NodeSections;
use crate::relate::polygon_node_topology::is_crossing;
use crate::relate::relate_edge::Position;
use crate::relate::relate_geometry::RelateGeometry;
use crate::relate::relate_node::RelateNode;
use crate::relate::topology_predicate::TopologyPredicate;

use Location::*;

/// TopologyComputer turns the topological events found between two
/// geometries into dimension updates of a predicate.
///
/// Events at isolated points are applied directly. Intersections of edges
/// are collected per node and evaluated together once all edges are noded.
pub struct TopologyComputer<'g, P> {
    predicate: &'g mut P,
    geom_a: &'g RelateGeometry<'g>,
    geom_b: &'g RelateGeometry<'g>,
    node_map: BTreeMap<CoordKey, NodeSections>,
}

impl<'g, P: TopologyPredicate> TopologyComputer<'g, P> {
    pub fn new(predicate: &'g mut P, geom_a: &'g RelateGeometry<'g>, geom_b: &'g RelateGeometry<'g>) -> Self {
        let mut computer = TopologyComputer {
            predicate,
            geom_a,
            geom_b,
            node_map: BTreeMap::new(),
        };
        computer.init_exterior_dims();
        computer
    }

    // Some entries follow from the dimensions alone: a geometry of lower
    // dimension can never cover the whole of the higher one.
    fn init_exterior_dims(&mut self) {
        let dim_a = self.geom_a.dimension_real();
        let dim_b = self.geom_b.dimension_real();
        use Dimension::*;
        match (dim_a, dim_b) {
            (Point, Line) => self.update_dim(Exterior, Interior, Line),
            (Line, Point) => self.update_dim(Interior, Exterior, Line),
            (Point, Area) => {
                self.update_dim(Exterior, Interior, Area);
                self.update_dim(Exterior, Boundary, Line);
            }
            (Area, Point) => {
                self.update_dim(Interior, Exterior, Area);
                self.update_dim(Boundary, Exterior, Line);
            }
            (Line, Area) => self.update_dim(Exterior, Interior, Area),
            (Area, Line) => self.update_dim(Interior, Exterior, Area),
            _ => {
                if self.geom_a.is_empty() || self.geom_b.is_empty() {
                    if !self.geom_a.is_empty() {
                        self.init_exterior_empty(true);
                    }
                    if !self.geom_b.is_empty() {
                        self.init_exterior_empty(false);
                    }
                }
            }
        }
    }

    fn init_exterior_empty(&mut self, is_non_empty_a: bool) {
        match self.dimension(is_non_empty_a) {
            Dimension::Point => self.update_dim_ab(is_non_empty_a, Interior, Exterior, Dimension::Point),
            Dimension::Line => {
                if self.geometry(is_non_empty_a).has_boundary() {
                    self.update_dim_ab(is_non_empty_a, Boundary, Exterior, Dimension::Point);
                }
                self.update_dim_ab(is_non_empty_a, Interior, Exterior, Dimension::Line);
            }
            Dimension::Area => {
                self.update_dim_ab(is_non_empty_a, Boundary, Exterior, Dimension::Line);
                self.update_dim_ab(is_non_empty_a, Interior, Exterior, Dimension::Area);
            }
            Dimension::Empty => {}
        }
    }

    fn geometry(&self, is_a: bool) -> &RelateGeometry<'g> {
        if is_a {
            self.geom_a
        } else {
            self.geom_b
        }
    }

    pub fn dimension(&self, is_a: bool) -> Dimension {
        self.geometry(is_a).dimension()
    }

    /// Reports whether the edges must be noded against edges of the same
    /// geometry.
    pub fn is_self_noding_required(&self) -> bool {
        self.predicate.require_self_noding()
            && (self.geom_a.is_self_noding_required() || self.geom_b.is_self_noding_required())
    }

    /// Reports whether one input needs self-noding on its own account.
    pub fn is_self_noding_required_for(&self, is_a: bool) -> bool {
        self.predicate.require_self_noding() && self.geometry(is_a).is_self_noding_required()
    }

    pub fn is_exterior_check_required(&self, is_a: bool) -> bool {
        self.predicate.require_exterior_check(is_a)
    }

    pub fn is_result_known(&self) -> bool {
        self.predicate.is_known()
    }

    pub fn result(&self) -> bool {
        self.predicate.value()
    }

    pub fn finish(&mut self) {
        self.predicate.finish();
    }

    fn update_dim(&mut self, loc_a: Location, loc_b: Location, dim: Dimension) {
        self.predicate.update_dimension(loc_a, loc_b, dim);
    }

    // Updates with the locations given in the order of (source, target).
    fn update_dim_ab(&mut self, is_ab: bool, loc1: Location, loc2: Location, dim: Dimension) {
        if is_ab {
            self.update_dim(loc1, loc2, dim);
        } else {
            self.update_dim(loc2, loc1, dim);
        }
    }

    /// Records that two sections of the inputs meet at a node.
    pub fn add_intersection(&mut self, a: NodeSection, b: NodeSection) -> RelateResult<()> {
        if !a.is_same_geometry(&b) {
            self.update_intersection_ab(&a, &b)?;
        }
        self.add_node_sections(a, b);
        Ok(())
    }

    fn update_intersection_ab(&mut self, a: &NodeSection, b: &NodeSection) -> RelateResult<()> {
        if NodeSection::is_area_area(a, b) {
            self.update_area_area_cross(a, b)?;
        }
        self.update_node_location(a, b);
        Ok(())
    }

    // Crossing rings make the interiors overlap in an area.
    fn update_area_area_cross(&mut self, a: &NodeSection, b: &NodeSection) -> RelateResult<()> {
        if NodeSection::is_proper_pair(a, b) {
            self.update_dim(Interior, Interior, Dimension::Area);
            return Ok(());
        }
        let (a0, a1, b0, b1) = match (a.v0(), a.v1(), b.v0(), b.v1()) {
            (Some(a0), Some(a1), Some(b0), Some(b1)) => (a0, a1, b0, b1),
            _ => {
                return Err(RelateError::InvalidNodeSection(format!(
                    "ring section without two arms at {:?}",
                    a.node_pt()
                )))
            }
        };
        if is_crossing(a.node_pt(), a0, a1, b0, b1) {
            self.update_dim(Interior, Interior, Dimension::Area);
        }
        Ok(())
    }

    fn update_node_location(&mut self, a: &NodeSection, b: &NodeSection) {
        let pt = a.node_pt();
        let loc_a = self.geom_a.locate_node(pt, a.polygonal());
        let loc_b = self.geom_b.locate_node(pt, b.polygonal());
        self.update_dim(loc_a, loc_b, Dimension::Point);
    }

    fn add_node_sections(&mut self, a: NodeSection, b: NodeSection) {
        let sections = self
            .node_map
            .entry(CoordKey::new(a.node_pt()))
            .or_insert_with(|| NodeSections::new(a.node_pt()));
        sections.add(a);
        sections.add(b);
    }

    pub fn add_point_on_point_interior(&mut self) {
        self.update_dim(Interior, Interior, Dimension::Point);
    }

    pub fn add_point_on_point_exterior(&mut self, is_a: bool) {
        self.update_dim_ab(is_a, Interior, Exterior, Dimension::Point);
    }

    /// Records a point of one input located on the other.
    pub fn add_point_on_geometry(&mut self, is_point_a: bool, loc_target: Location, dim_target: Dimension) -> RelateResult<()> {
        self.update_dim_ab(is_point_a, Interior, loc_target, Dimension::Point);
        if self.geometry(!is_point_a).is_empty() {
            return Ok(());
        }
        match dim_target {
            Dimension::Point | Dimension::Line => Ok(()),
            Dimension::Area => {
                // a point cannot cover an area
                self.update_dim_ab(is_point_a, Exterior, Interior, Dimension::Area);
                self.update_dim_ab(is_point_a, Exterior, Boundary, Dimension::Line);
                Ok(())
            }
            Dimension::Empty => Err(RelateError::UnexpectedDimension(format!(
                "point target of dimension {}",
                dim_target
            ))),
        }
    }

    /// Records a line endpoint of one input located on the other.
    pub fn add_line_end_on_geometry(
        &mut self,
        is_line_a: bool,
        loc_line_end: Location,
        loc_target: Location,
        dim_target: Dimension,
    ) -> RelateResult<()> {
        self.update_dim_ab(is_line_a, loc_line_end, loc_target, Dimension::Point);
        if self.geometry(!is_line_a).is_empty() {
            return Ok(());
        }
        match dim_target {
            Dimension::Point => {}
            Dimension::Line => {
                // the line leaves the target line at this end
                if loc_target == Exterior {
                    self.update_dim_ab(is_line_a, Interior, Exterior, Dimension::Line);
                }
            }
            Dimension::Area => {
                if loc_target != Boundary {
                    self.update_dim_ab(is_line_a, Interior, loc_target, Dimension::Line);
                    self.update_dim_ab(is_line_a, Exterior, loc_target, Dimension::Area);
                }
            }
            Dimension::Empty => {
                return Err(RelateError::UnexpectedDimension(format!(
                    "line end target of dimension {}",
                    dim_target
                )))
            }
        }
        Ok(())
    }

    /// Records a polygon ring vertex of one input located on the other.
    pub fn add_area_vertex(
        &mut self,
        is_area_a: bool,
        loc_area: Location,
        loc_target: Location,
        dim_target: Dimension,
    ) -> RelateResult<()> {
        if loc_target == Exterior {
            self.update_dim_ab(is_area_a, Interior, Exterior, Dimension::Area);
            // the ring passes through the target exterior
            if loc_area == Boundary {
                self.update_dim_ab(is_area_a, Boundary, Exterior, Dimension::Line);
                self.update_dim_ab(is_area_a, Exterior, Exterior, Dimension::Area);
            }
            return Ok(());
        }
        match dim_target {
            Dimension::Point => self.add_area_vertex_on_point(is_area_a, loc_area),
            Dimension::Line => self.add_area_vertex_on_line(is_area_a, loc_area, loc_target),
            Dimension::Area => self.add_area_vertex_on_area(is_area_a, loc_area, loc_target),
            Dimension::Empty => {
                return Err(RelateError::UnexpectedDimension(format!(
                    "area vertex target of dimension {}",
                    dim_target
                )))
            }
        }
        Ok(())
    }

    fn add_area_vertex_on_point(&mut self, is_area_a: bool, loc_area: Location) {
        self.update_dim_ab(is_area_a, loc_area, Interior, Dimension::Point);
        self.update_dim_ab(is_area_a, Interior, Exterior, Dimension::Area);
        if loc_area == Boundary {
            self.update_dim_ab(is_area_a, Boundary, Exterior, Dimension::Line);
            self.update_dim_ab(is_area_a, Exterior, Exterior, Dimension::Area);
        }
    }

    fn add_area_vertex_on_line(&mut self, is_area_a: bool, loc_area: Location, loc_target: Location) {
        self.update_dim_ab(is_area_a, loc_area, loc_target, Dimension::Point);
        if loc_area == Interior {
            self.update_dim_ab(is_area_a, Interior, Exterior, Dimension::Area);
        }
    }

    fn add_area_vertex_on_area(&mut self, is_area_a: bool, loc_area: Location, loc_target: Location) {
        if loc_target == Boundary {
            if loc_area == Boundary {
                self.update_dim_ab(is_area_a, Boundary, Boundary, Dimension::Point);
            } else {
                // an interior vertex on the target boundary
                self.update_dim_ab(is_area_a, Interior, Interior, Dimension::Area);
                self.update_dim_ab(is_area_a, Interior, Boundary, Dimension::Line);
                self.update_dim_ab(is_area_a, Interior, Exterior, Dimension::Area);
            }
        } else {
            self.update_dim_ab(is_area_a, Interior, loc_target, Dimension::Area);
            if loc_area == Boundary {
                self.update_dim_ab(is_area_a, Boundary, loc_target, Dimension::Line);
                self.update_dim_ab(is_area_a, Exterior, loc_target, Dimension::Area);
            }
        }
    }

    /// Evaluates the topology at every node where both inputs meet, in
    /// coordinate order.
    pub fn evaluate_nodes(&mut self) {
        trace!(nodes = self.node_map.len(), "evaluating nodes");
        let mut node_map = std::mem::take(&mut self.node_map);
        for sections in node_map.values_mut() {
            if !sections.has_interaction_ab() {
                continue;
            }
            self.evaluate_node(sections);
            if self.is_result_known() {
                break;
            }
        }
        self.node_map = node_map;
    }

    fn evaluate_node(&mut self, sections: &mut NodeSections) {
        let p = sections.coord();
        let mut node = sections.create_node();
        let is_area_interior_a = self.geom_a.is_node_in_area(p, sections.polygonal(true));
        let is_area_interior_b = self.geom_b.is_node_in_area(p, sections.polygonal(false));
        node.finish(is_area_interior_a, is_area_interior_b);
        self.evaluate_node_edges(&node);
    }

    fn evaluate_node_edges(&mut self, node: &RelateNode) {
        // side locations matter only when both inputs have area
        let is_area_area = self.is_area_area();
        for e in node.edges() {
            if is_area_area {
                self.update_edge_dim(e.location(true, Position::Left), e.location(false, Position::Left), Dimension::Area);
                self.update_edge_dim(e.location(true, Position::Right), e.location(false, Position::Right), Dimension::Area);
            }
            self.update_edge_dim(e.location(true, Position::On), e.location(false, Position::On), Dimension::Line);
        }
    }

    fn is_area_area(&self) -> bool {
        self.dimension(true) == Dimension::Area && self.dimension(false) == Dimension::Area
    }

    fn update_edge_dim(&mut self, loc_a: Option<Location>, loc_b: Option<Location>, dim: Dimension) {
        if let (Some(loc_a), Some(loc_b)) = (loc_a, loc_b) {
            self.update_dim(loc_a, loc_b, dim);
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_map.len()
    }
}
