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

use geo_types::{Coord, Geometry};
use tracing::debug;

use crate::relate::boundary_node_rule::BoundaryNodeRule;
use crate::relate::edge_set_intersector::{EdgeSegmentIntersector, EdgeSetIntersector};
use crate::relate::envelope::Envelope;
use crate::relate::error::RelateResult;
use crate::relate::intersection_matrix::IntersectionMatrix;
use crate::relate::location::{Dimension, Location};
use crate::relate::predicates::{IMPredicate, MatrixRule};
use crate::relate::relate_geometry::RelateGeometry;
use crate::relate::topology_computer::TopologyComputer;
use crate::relate::topology_predicate::{RelatePredicate, TopologyPredicate};

/// RelateNG evaluates topological relationships between a geometry A and
/// any number of geometries B.
///
/// Evaluation classifies the points, line ends and polygon vertices of
/// each input against the other, then nodes the edges of both inputs and
/// evaluates the topology at every node. Each step stops as soon as the
/// predicate value is known.
///
/// A prepared evaluator indexes A once. It is immutable, so it can be
/// shared between threads and evaluated against many geometries.
///
/// # Examples
///
/// ```
/// use geo_types::{point, polygon, Geometry};
/// use relateng::relate::{RelateNG, RelatePredicate};
///
/// let a = Geometry::Polygon(polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.)]);
/// let b = Geometry::Point(point!(x: 5., y: 5.));
///
/// let rng = RelateNG::prepare(&a);
/// assert!(rng.evaluate(&b, &mut RelatePredicate::contains()).unwrap());
/// assert_eq!(rng.evaluate_matrix(&b).unwrap().to_string(), "0F2FF1FF2");
/// ```
#[derive(Debug, Clone)]
pub struct RelateNG<'a> {
    geom_a: RelateGeometry<'a>,
    rule: BoundaryNodeRule,
}

impl<'a> RelateNG<'a> {
    pub fn new(a: &'a Geometry<f64>) -> Self {
        Self::with_boundary_node_rule(a, BoundaryNodeRule::default())
    }

    pub fn with_boundary_node_rule(a: &'a Geometry<f64>, rule: BoundaryNodeRule) -> Self {
        RelateNG {
            geom_a: RelateGeometry::new(a, rule),
            rule,
        }
    }

    /// Creates an evaluator optimized for repeated evaluation of A.
    pub fn prepare(a: &'a Geometry<f64>) -> Self {
        Self::prepare_with_boundary_node_rule(a, BoundaryNodeRule::default())
    }

    pub fn prepare_with_boundary_node_rule(a: &'a Geometry<f64>, rule: BoundaryNodeRule) -> Self {
        RelateNG {
            geom_a: RelateGeometry::prepared(a, rule),
            rule,
        }
    }

    pub fn boundary_node_rule(&self) -> BoundaryNodeRule {
        self.rule
    }

    /// Computes the DE-9IM matrix of A and B.
    pub fn evaluate_matrix(&self, b: &Geometry<f64>) -> RelateResult<IntersectionMatrix> {
        let mut predicate = IMPredicate::new(MatrixRule);
        self.evaluate(b, &mut predicate)?;
        Ok(predicate.matrix())
    }

    /// Tests whether the DE-9IM matrix of A and B matches a pattern.
    pub fn evaluate_pattern(&self, b: &Geometry<f64>, pattern: &str) -> RelateResult<bool> {
        let mut predicate = RelatePredicate::matches(pattern)?;
        self.evaluate(b, &mut predicate)
    }

    /// Evaluates a predicate for A and B.
    pub fn evaluate<P: TopologyPredicate>(&self, b: &Geometry<f64>, predicate: &mut P) -> RelateResult<bool> {
        let geom_a = &self.geom_a;
        let geom_b = RelateGeometry::new(b, self.rule);
        debug!(
            predicate = predicate.name(),
            dim_a = %geom_a.dimension_real(),
            dim_b = %geom_b.dimension_real(),
            prepared = geom_a.is_prepared(),
            "evaluating predicate"
        );

        if !self.has_required_envelope_interaction(&geom_b, predicate) {
            debug!(predicate = predicate.name(), "envelopes do not interact");
            return Ok(false);
        }

        let dim_a = geom_a.dimension_real();
        let dim_b = geom_b.dimension_real();
        predicate.init_dims(dim_a, dim_b);
        if predicate.is_known() {
            debug!(predicate = predicate.name(), "decided by dimensions");
            return Ok(finish_value(predicate));
        }
        predicate.init_envelopes(&geom_a.envelope(), &geom_b.envelope());
        if predicate.is_known() {
            debug!(predicate = predicate.name(), "decided by envelopes");
            return Ok(finish_value(predicate));
        }
        if geom_a.is_empty() && geom_b.is_empty() {
            return Ok(finish_value(predicate));
        }

        let mut computer = TopologyComputer::new(predicate, geom_a, &geom_b);

        if dim_a == Dimension::Point && dim_b == Dimension::Point {
            compute_pp(geom_a, &geom_b, &mut computer);
            debug!("decided by point sets");
            return Ok(finish_computer(&mut computer));
        }

        // points, line ends and area vertices of each input
        if compute_at_points(&geom_b, false, geom_a, &mut computer)? {
            debug!("decided by points of B");
            return Ok(finish_computer(&mut computer));
        }
        if compute_at_points(geom_a, true, &geom_b, &mut computer)? {
            debug!("decided by points of A");
            return Ok(finish_computer(&mut computer));
        }

        if geom_a.has_edges() && geom_b.has_edges() {
            compute_at_edges(geom_a, &geom_b, &mut computer)?;
        }
        Ok(finish_computer(&mut computer))
    }

    fn has_required_envelope_interaction<P: TopologyPredicate>(&self, geom_b: &RelateGeometry, predicate: &P) -> bool {
        let env_a = self.geom_a.envelope();
        let env_b = geom_b.envelope();
        let mut is_interacts = false;
        if predicate.require_covers(true) {
            if !env_a.covers(&env_b) {
                return false;
            }
            is_interacts = true;
        } else if predicate.require_covers(false) {
            if !env_b.covers(&env_a) {
                return false;
            }
            is_interacts = true;
        }
        if !is_interacts && predicate.require_interaction() && !env_a.intersects(&env_b) {
            return false;
        }
        true
    }
}

fn finish_value<P: TopologyPredicate>(predicate: &mut P) -> bool {
    predicate.finish();
    predicate.value()
}

fn finish_computer<P: TopologyPredicate>(computer: &mut TopologyComputer<'_, P>) -> bool {
    computer.finish();
    computer.result()
}

// Both inputs are point sets, possibly with zero-length lines.
fn compute_pp<P: TopologyPredicate>(geom_a: &RelateGeometry, geom_b: &RelateGeometry, computer: &mut TopologyComputer<'_, P>) {
    let pts_a = geom_a.unique_points();
    let mut num_b_in_a = 0;
    for pt in geom_b.unique_points() {
        if pts_a.contains(pt) {
            num_b_in_a += 1;
            computer.add_point_on_point_interior();
        } else {
            computer.add_point_on_point_exterior(false);
        }
        if computer.is_result_known() {
            return;
        }
    }
    if num_b_in_a < pts_a.len() {
        computer.add_point_on_point_exterior(true);
    }
}

fn compute_at_points<P: TopologyPredicate>(
    geom: &RelateGeometry,
    is_a: bool,
    target: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<bool> {
    if compute_points(geom, is_a, target, computer)? {
        return Ok(true);
    }
    // Line ends and area vertices can only add exterior intersections,
    // except against an area target where they may be inside it.
    let check_disjoint_points = target.has_dimension(Dimension::Area) || computer.is_exterior_check_required(is_a);
    if !check_disjoint_points {
        return Ok(false);
    }
    if compute_line_ends(geom, is_a, target, computer)? {
        return Ok(true);
    }
    compute_area_vertices(geom, is_a, target, computer)
}

fn compute_points<P: TopologyPredicate>(
    geom: &RelateGeometry,
    is_a: bool,
    target: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<bool> {
    if !geom.has_dimension(Dimension::Point) {
        return Ok(false);
    }
    for &pt in geom.effective_points() {
        let loc_dim = target.locate_with_dim(pt);
        let dim_target = loc_dim.dimension_or(computer.dimension(!is_a));
        computer.add_point_on_geometry(is_a, loc_dim.location(), dim_target)?;
        if computer.is_result_known() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn compute_line_ends<P: TopologyPredicate>(
    geom: &RelateGeometry,
    is_a: bool,
    target: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<bool> {
    if !geom.has_dimension(Dimension::Line) {
        return Ok(false);
    }
    let target_env = target.envelope();
    let mut has_exterior_intersection = false;
    for line in geom.lines() {
        // once an exterior intersection is known, lines away from the
        // target add nothing
        if has_exterior_intersection && Envelope::from_coords(line.iter()).disjoint(&target_env) {
            continue;
        }
        let (e0, e1) = match (line.first(), line.last()) {
            (Some(&e0), Some(&e1)) => (e0, e1),
            _ => continue,
        };
        has_exterior_intersection |= compute_line_end(geom, is_a, e0, target, computer)?;
        if computer.is_result_known() {
            return Ok(true);
        }
        if e0 != e1 {
            has_exterior_intersection |= compute_line_end(geom, is_a, e1, target, computer)?;
            if computer.is_result_known() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn compute_line_end<P: TopologyPredicate>(
    geom: &RelateGeometry,
    is_a: bool,
    pt: Coord<f64>,
    target: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<bool> {
    let loc_dim_line_end = geom.locate_line_end_with_dim(pt);
    // line ends inside an area of the same collection are covered by it
    if loc_dim_line_end.dimension_or(computer.dimension(is_a)) != Dimension::Line {
        return Ok(false);
    }
    let loc_dim_target = target.locate_with_dim(pt);
    let loc_target = loc_dim_target.location();
    let dim_target = loc_dim_target.dimension_or(computer.dimension(!is_a));
    computer.add_line_end_on_geometry(is_a, loc_dim_line_end.location(), loc_target, dim_target)?;
    Ok(loc_target == Location::Exterior)
}

fn compute_area_vertices<P: TopologyPredicate>(
    geom: &RelateGeometry,
    is_a: bool,
    target: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<bool> {
    if !geom.has_dimension(Dimension::Area) {
        return Ok(false);
    }
    // point targets are handled from the other side
    if target.dimension() < Dimension::Line {
        return Ok(false);
    }
    let target_env = target.envelope();
    let mut has_exterior_intersection = false;
    for poly in geom.polygons() {
        if has_exterior_intersection && Envelope::from_coords(poly.exterior().0.iter()).disjoint(&target_env) {
            continue;
        }
        for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
            let pt = match ring.0.first() {
                Some(&pt) => pt,
                None => continue,
            };
            let loc_area = geom.locate_area_vertex(pt);
            let loc_dim_target = target.locate_with_dim(pt);
            let loc_target = loc_dim_target.location();
            let dim_target = loc_dim_target.dimension_or(computer.dimension(!is_a));
            computer.add_area_vertex(is_a, loc_area, loc_target, dim_target)?;
            has_exterior_intersection |= loc_target == Location::Exterior;
            if computer.is_result_known() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn compute_at_edges<P: TopologyPredicate>(
    geom_a: &RelateGeometry,
    geom_b: &RelateGeometry,
    computer: &mut TopologyComputer<'_, P>,
) -> RelateResult<()> {
    let env_int = geom_a.envelope().intersection(&geom_b.envelope());
    if env_int.is_null() {
        debug!("edge envelopes do not intersect");
        return Ok(());
    }
    let edges_b = geom_b.extract_segment_strings(false, Some(&env_int));

    if computer.is_self_noding_required() {
        debug!(
            self_noding_a = computer.is_self_noding_required_for(true),
            self_noding_b = computer.is_self_noding_required_for(false),
            "noding all edges"
        );
        let edges_a = geom_a.extract_segment_strings(true, Some(&env_int));
        let index = EdgeSetIntersector::new(edges_a.iter().chain(edges_b.iter()), Some(&env_int));
        let mut intersector = EdgeSegmentIntersector::new(computer);
        index.process_all(&mut intersector)?;
    } else {
        let edges_a = geom_a.edges(true, Some(&env_int));
        let index = EdgeSetIntersector::new(edges_a.iter().chain(edges_b.iter()), Some(&env_int));
        let mut intersector = EdgeSegmentIntersector::new(computer);
        index.process_mutual(&mut intersector)?;
    }

    if computer.is_result_known() {
        debug!("decided by edge intersections");
        return Ok(());
    }
    computer.evaluate_nodes();
    Ok(())
}

/// Computes the DE-9IM matrix of two geometries.
pub fn relate(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<IntersectionMatrix> {
    RelateNG::new(a).evaluate_matrix(b)
}

/// Computes the DE-9IM matrix of two geometries using the given boundary
/// node rule.
pub fn relate_with_boundary_node_rule(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    rule: BoundaryNodeRule,
) -> RelateResult<IntersectionMatrix> {
    RelateNG::with_boundary_node_rule(a, rule).evaluate_matrix(b)
}

/// Evaluates a predicate for two geometries.
pub fn relate_with(a: &Geometry<f64>, b: &Geometry<f64>, mut predicate: RelatePredicate) -> RelateResult<bool> {
    RelateNG::new(a).evaluate(b, &mut predicate)
}

/// Tests whether the DE-9IM matrix of two geometries matches a pattern.
pub fn relate_pattern(a: &Geometry<f64>, b: &Geometry<f64>, pattern: &str) -> RelateResult<bool> {
    RelateNG::new(a).evaluate_pattern(b, pattern)
}

pub fn intersects(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::intersects())
}

pub fn disjoint(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::disjoint())
}

pub fn contains(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::contains())
}

pub fn within(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::within())
}

pub fn covers(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::covers())
}

pub fn covered_by(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::covered_by())
}

pub fn crosses(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::crosses())
}

pub fn overlaps(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::overlaps())
}

pub fn touches(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::touches())
}

pub fn equals_topo(a: &Geometry<f64>, b: &Geometry<f64>) -> RelateResult<bool> {
    relate_with(a, b, RelatePredicate::equals_topo())
}
