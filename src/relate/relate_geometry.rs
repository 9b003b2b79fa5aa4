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
use std::collections::BTreeSet;

use geo_types::{Coord, Geometry, Polygon};

use crate::relate::boundary_node_rule::BoundaryNodeRule;
use crate::relate::components::Components;
use crate::relate::coordinate::{orient_ring, remove_repeated_points, CoordKey};
use crate::relate::dimension_location::DimensionLocation;
use crate::relate::envelope::Envelope;
use crate::relate::location::{Dimension, Location};
use crate::relate::relate_point_locator::RelatePointLocator;
use crate::relate::relate_segment_string::RelateSegmentString;

/// RelateGeometry wraps an input geometry with the derived information a
/// relate query needs: dimensions, envelope, point locator and segment
/// strings.
///
/// Everything is computed at construction, so the value is immutable
/// afterwards and a prepared geometry can be shared between threads.
#[derive(Debug, Clone)]
pub struct RelateGeometry<'a> {
    geom: &'a Geometry<f64>,
    is_prepared: bool,
    rule: BoundaryNodeRule,
    components: Components<'a>,
    locator: RelatePointLocator<'a>,
    env: Envelope,
    dim: Dimension,
    is_zero_length: bool,
    unique_points: BTreeSet<CoordKey>,
    effective_points: Vec<Coord<f64>>,
    // segment strings of a prepared geometry, extracted once
    edges: Vec<RelateSegmentString>,
}

fn is_polygonal(geom: &Geometry<f64>) -> bool {
    matches!(
        geom,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_)
    )
}

impl<'a> RelateGeometry<'a> {
    pub fn new(geom: &'a Geometry<f64>, rule: BoundaryNodeRule) -> Self {
        Self::build(geom, rule, false)
    }

    /// Builds a geometry for repeated evaluation. Point location is indexed
    /// and segment strings are extracted up front.
    pub fn prepared(geom: &'a Geometry<f64>, rule: BoundaryNodeRule) -> Self {
        let mut g = Self::build(geom, rule, true);
        g.edges = g.extract_segment_strings(true, None);
        g
    }

    fn build(geom: &'a Geometry<f64>, rule: BoundaryNodeRule, is_prepared: bool) -> Self {
        let components = Components::extract(geom);
        let locator = RelatePointLocator::new(&components, is_polygonal(geom), rule, is_prepared);
        let dim = components.dimension();
        let is_zero_length = components.has_lines() && components.is_zero_length();

        let mut unique_points: BTreeSet<CoordKey> =
            components.points.iter().map(|&p| CoordKey::new(p)).collect();
        unique_points.extend(components.lines.iter().filter_map(|l| l.0.first().copied().map(CoordKey::new)));

        let mut g = RelateGeometry {
            geom,
            is_prepared,
            rule,
            env: components.envelope(),
            components,
            locator,
            dim,
            is_zero_length,
            unique_points,
            effective_points: vec![],
            edges: vec![],
        };
        g.effective_points = g.compute_effective_points();
        g
    }

    // Points covered by a line or area of the same collection add nothing
    // to the topology.
    fn compute_effective_points(&self) -> Vec<Coord<f64>> {
        if self.dimension_real() <= Dimension::Point {
            return self.components.points.clone();
        }
        self.components
            .points
            .iter()
            .copied()
            .filter(|&p| self.locate_with_dim(p).dimension() == Dimension::Point)
            .collect()
    }

    pub fn geometry(&self) -> &'a Geometry<f64> {
        self.geom
    }

    pub fn is_prepared(&self) -> bool {
        self.is_prepared
    }

    pub fn boundary_node_rule(&self) -> BoundaryNodeRule {
        self.rule
    }

    pub fn envelope(&self) -> Envelope {
        self.env
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Reports whether some element of the geometry has the dimension.
    pub fn has_dimension(&self, dim: Dimension) -> bool {
        match dim {
            Dimension::Point => self.components.has_points(),
            Dimension::Line => self.components.has_lines(),
            Dimension::Area => self.components.has_areas(),
            Dimension::Empty => false,
        }
    }

    /// The dimension of the geometry, where linear geometries made only of
    /// zero-length lines have point dimension.
    pub fn dimension_real(&self) -> Dimension {
        if self.is_empty() {
            return Dimension::Empty;
        }
        if self.dim == Dimension::Line && self.is_zero_length {
            return Dimension::Point;
        }
        self.dim
    }

    pub fn has_edges(&self) -> bool {
        self.components.has_lines() || self.components.has_areas()
    }

    pub fn has_boundary(&self) -> bool {
        self.locator.has_boundary()
    }

    /// Reports whether a collection mixes area and line elements.
    pub fn has_area_and_line(&self) -> bool {
        self.components.has_areas() && self.components.has_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_polygonal(&self) -> bool {
        is_polygonal(self.geom)
    }

    pub fn is_points_or_polygons(&self) -> bool {
        !self.components.has_lines()
    }

    pub fn is_zero_length(&self) -> bool {
        self.is_zero_length
    }

    /// Reports whether the geometry may intersect itself in ways that
    /// change its topology, so that its edges must be noded against each
    /// other.
    pub fn is_self_noding_required(&self) -> bool {
        match self.geom {
            Geometry::Point(_)
            | Geometry::MultiPoint(_)
            | Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => false,
            Geometry::GeometryCollection(gc) => !(gc.0.len() == 1 && is_polygonal(&gc.0[0])),
            _ => true,
        }
    }

    pub fn locate(&self, p: Coord<f64>) -> Location {
        self.locator.locate(p)
    }

    pub fn locate_with_dim(&self, p: Coord<f64>) -> DimensionLocation {
        self.locator.locate_with_dim(p)
    }

    pub fn locate_line_end(&self, p: Coord<f64>) -> Location {
        self.locator.locate_line_end(p)
    }

    pub fn locate_line_end_with_dim(&self, p: Coord<f64>) -> DimensionLocation {
        self.locator.locate_line_end_with_dim(p)
    }

    /// Locates a vertex of one of the polygon rings. A vertex is on the
    /// boundary of its own polygon, so no parent is needed.
    pub fn locate_area_vertex(&self, p: Coord<f64>) -> Location {
        self.locate_node(p, None)
    }

    pub fn locate_node(&self, p: Coord<f64>, parent_polygonal: Option<usize>) -> Location {
        self.locator.locate_node(p, parent_polygonal)
    }

    pub fn locate_node_with_dim(&self, p: Coord<f64>, parent_polygonal: Option<usize>) -> DimensionLocation {
        self.locator.locate_node_with_dim(p, parent_polygonal)
    }

    /// Reports whether a node lies in the interior of an area of the
    /// geometry.
    pub fn is_node_in_area(&self, p: Coord<f64>, parent_polygonal: Option<usize>) -> bool {
        self.locate_node_with_dim(p, parent_polygonal) == DimensionLocation::AREA_INTERIOR
    }

    /// The distinct coordinates of the point elements, plus the first
    /// coordinate of each line.
    pub fn unique_points(&self) -> &BTreeSet<CoordKey> {
        &self.unique_points
    }

    /// The point elements not covered by a line or area element.
    pub fn effective_points(&self) -> &[Coord<f64>] {
        &self.effective_points
    }

    pub fn lines(&self) -> impl Iterator<Item = &[Coord<f64>]> {
        self.components.lines.iter().map(|l| l.0.as_slice())
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Cow<'a, Polygon<f64>>> {
        self.components.polygons()
    }

    /// The segment strings of a prepared geometry, or freshly extracted
    /// ones limited to `env`.
    pub fn edges(&self, is_a: bool, env: Option<&Envelope>) -> Cow<'_, [RelateSegmentString]> {
        if self.is_prepared && is_a {
            Cow::Borrowed(&self.edges)
        } else {
            Cow::Owned(self.extract_segment_strings(is_a, env))
        }
    }

    /// Extracts the lines and polygon rings whose envelope intersects
    /// `env`, or all of them when there is no envelope. Shells are oriented
    /// clockwise and holes counter-clockwise, so the polygon interior is
    /// always on the right.
    pub fn extract_segment_strings(&self, is_a: bool, env: Option<&Envelope>) -> Vec<RelateSegmentString> {
        let mut strings = vec![];
        let mut next_id = 0;
        let interacts = |pts: &[Coord<f64>]| env.map_or(true, |e| e.intersects(&Envelope::from_coords(pts.iter())));

        for line in &self.components.lines {
            let id = next_id;
            next_id += 1;
            if !interacts(&line.0) {
                continue;
            }
            let pts = remove_repeated_points(&line.0);
            strings.push(RelateSegmentString::line(pts, is_a, id));
        }

        for (polygonal, polys) in self.components.polygonals.iter().enumerate() {
            for poly in polys {
                let id = next_id;
                next_id += 1;
                if !interacts(&poly.exterior().0) {
                    continue;
                }
                let rings = std::iter::once(poly.exterior()).chain(poly.interiors());
                for (ring_id, ring) in rings.enumerate() {
                    if ring.0.is_empty() || !interacts(&ring.0) {
                        continue;
                    }
                    let pts = orient_ring(&remove_repeated_points(&ring.0), ring_id == 0);
                    strings.push(RelateSegmentString::ring(pts, is_a, id, ring_id, polygonal));
                }
            }
        }
        strings
    }
}
