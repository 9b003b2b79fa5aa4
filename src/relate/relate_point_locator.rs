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

use geo_types::{Coord, LineString};

use crate::relate::adjacent_edge_locator::AdjacentEdgeLocator;
use crate::relate::boundary_node_rule::BoundaryNodeRule;
use crate::relate::components::Components;
use crate::relate::coordinate::{is_on_line, CoordKey};
use crate::relate::dimension_location::DimensionLocation;
use crate::relate::envelope::Envelope;
use crate::relate::linear_boundary::LinearBoundary;
use crate::relate::location::Location;
use crate::relate::point_locator::{AreaLocator, PointInAreaLocator};

/// RelatePointLocator locates points on a geometry of any kind, including
/// heterogeneous collections.
///
/// Elements are tested in order of decreasing dimension, and the location on
/// the highest-dimension element containing the point wins. Line boundaries
/// follow the boundary node rule. A point on the boundaries of several
/// polygonal elements of a collection may lie in the interior of their
/// union, which is decided by an AdjacentEdgeLocator.
#[derive(Debug, Clone)]
pub struct RelatePointLocator<'a> {
    is_empty: bool,
    is_polygonal: bool,
    points: BTreeSet<CoordKey>,
    lines: Vec<(Envelope, Cow<'a, LineString<f64>>)>,
    line_boundary: Option<LinearBoundary>,
    polygons: Vec<AreaLocator<'a>>,
    adjacent: Option<AdjacentEdgeLocator>,
}

impl<'a> RelatePointLocator<'a> {
    /// Builds the locator. `is_polygonal` tells whether the geometry is a
    /// polygon or multipolygon, so that every node lies on its boundary.
    /// Prepared locators index the polygon rings.
    pub fn new(components: &Components<'a>, is_polygonal: bool, rule: BoundaryNodeRule, prepared: bool) -> Self {
        let line_boundary = if components.has_lines() {
            Some(LinearBoundary::new(components.lines.iter().map(|l| &**l), rule))
        } else {
            None
        };
        let adjacent = if components.polygonals.len() > 1 {
            Some(AdjacentEdgeLocator::new(components.polygons()))
        } else {
            None
        };
        RelatePointLocator {
            is_empty: components.is_empty(),
            is_polygonal,
            points: components.points.iter().map(|&p| CoordKey::new(p)).collect(),
            lines: components
                .lines
                .iter()
                .map(|l| (Envelope::from_coords(l.0.iter()), l.clone()))
                .collect(),
            line_boundary,
            polygons: components
                .polygonals
                .iter()
                .map(|polys| AreaLocator::new(polys.clone(), prepared))
                .collect(),
            adjacent,
        }
    }

    pub fn has_boundary(&self) -> bool {
        self.line_boundary
            .as_ref()
            .map_or(false, |b| b.has_boundary())
    }

    fn is_line_boundary(&self, p: Coord<f64>) -> bool {
        self.line_boundary
            .as_ref()
            .map_or(false, |b| b.is_boundary(p))
    }

    pub fn locate(&self, p: Coord<f64>) -> Location {
        self.locate_with_dim(p).location()
    }

    /// Locates a point, reporting the dimension of the element it lies on.
    pub fn locate_with_dim(&self, p: Coord<f64>) -> DimensionLocation {
        self.locate_dim_loc(p, false, None)
    }

    /// Locates a line endpoint. Line ends lying in an area of a collection
    /// report the area location.
    pub fn locate_line_end_with_dim(&self, p: Coord<f64>) -> DimensionLocation {
        if !self.polygons.is_empty() {
            let loc = self.locate_on_polygons(p, false, None);
            if loc != Location::Exterior {
                return DimensionLocation::area(loc);
            }
        }
        if self.is_line_boundary(p) {
            DimensionLocation::LINE_BOUNDARY
        } else {
            DimensionLocation::LINE_INTERIOR
        }
    }

    pub fn locate_line_end(&self, p: Coord<f64>) -> Location {
        if self.is_line_boundary(p) {
            Location::Boundary
        } else {
            Location::Interior
        }
    }

    /// Locates a node of the geometry, a point known to lie on one of its
    /// edges. `parent_polygonal` is the polygonal element whose ring passes
    /// through the node, if any.
    pub fn locate_node(&self, p: Coord<f64>, parent_polygonal: Option<usize>) -> Location {
        self.locate_node_with_dim(p, parent_polygonal).location()
    }

    pub fn locate_node_with_dim(&self, p: Coord<f64>, parent_polygonal: Option<usize>) -> DimensionLocation {
        self.locate_dim_loc(p, true, parent_polygonal)
    }

    fn locate_dim_loc(&self, p: Coord<f64>, is_node: bool, parent_polygonal: Option<usize>) -> DimensionLocation {
        if self.is_empty {
            return DimensionLocation::EXTERIOR;
        }
        // a node of a polygonal geometry is always on its boundary, which
        // does not hold for collections with overlapping elements
        if is_node && self.is_polygonal {
            return DimensionLocation::AREA_BOUNDARY;
        }

        if !self.polygons.is_empty() {
            let loc = self.locate_on_polygons(p, is_node, parent_polygonal);
            if loc != Location::Exterior {
                return DimensionLocation::area(loc);
            }
        }
        if !self.lines.is_empty() {
            let loc = self.locate_on_lines(p, is_node);
            if loc != Location::Exterior {
                return DimensionLocation::line(loc);
            }
        }
        if self.points.contains(&CoordKey::new(p)) {
            return DimensionLocation::POINT_INTERIOR;
        }
        DimensionLocation::EXTERIOR
    }

    fn locate_on_lines(&self, p: Coord<f64>, is_node: bool) -> Location {
        if self.is_line_boundary(p) {
            return Location::Boundary;
        }
        // a node on the lines is in their interior
        if is_node {
            return Location::Interior;
        }
        let on_line = self
            .lines
            .iter()
            .any(|(env, line)| env.intersects_coord(p) && is_on_line(p, &line.0));
        if on_line {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    fn locate_on_polygons(&self, p: Coord<f64>, is_node: bool, parent_polygonal: Option<usize>) -> Location {
        let mut num_boundary = 0;
        for (i, locator) in self.polygons.iter().enumerate() {
            let loc = if is_node && parent_polygonal == Some(i) {
                Location::Boundary
            } else {
                locator.locate(p)
            };
            match loc {
                Location::Interior => return Location::Interior,
                Location::Boundary => num_boundary += 1,
                Location::Exterior => {}
            }
        }
        match (num_boundary, &self.adjacent) {
            (0, _) => Location::Exterior,
            (1, _) => Location::Boundary,
            (_, Some(adjacent)) => adjacent.locate(p),
            (_, None) => Location::Boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relate::location::Dimension;
    use geo_types::{coord, line_string, point, polygon, Geometry, GeometryCollection};

    fn locator<'a>(components: &Components<'a>, is_polygonal: bool) -> RelatePointLocator<'a> {
        RelatePointLocator::new(components, is_polygonal, BoundaryNodeRule::Mod2, false)
    }

    #[test]
    fn test_mixed_collection() {
        let geom = Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            Geometry::Polygon(polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.)]),
            Geometry::LineString(line_string![(x: 5., y: 5.), (x: 20., y: 5.)]),
            Geometry::Point(point!(x: 30., y: 30.)),
            Geometry::Point(point!(x: 15., y: 5.)),
        ]));
        let components = Components::extract(&geom);
        let loc = locator(&components, false);

        // the polygon wins over the line it contains
        assert_eq!(loc.locate_with_dim(coord! { x: 5., y: 5. }), DimensionLocation::AREA_INTERIOR);
        assert_eq!(loc.locate_with_dim(coord! { x: 10., y: 5. }), DimensionLocation::AREA_BOUNDARY);
        assert_eq!(loc.locate_with_dim(coord! { x: 20., y: 5. }), DimensionLocation::LINE_BOUNDARY);
        assert_eq!(loc.locate_with_dim(coord! { x: 15., y: 5. }), DimensionLocation::LINE_INTERIOR);
        assert_eq!(loc.locate_with_dim(coord! { x: 30., y: 30. }), DimensionLocation::POINT_INTERIOR);
        assert_eq!(loc.locate_with_dim(coord! { x: 30., y: 0. }), DimensionLocation::EXTERIOR);
        assert_eq!(loc.locate_with_dim(coord! { x: 30., y: 0. }).dimension(), Dimension::Empty);

        // the line end inside the polygon reports the area
        assert_eq!(loc.locate_line_end_with_dim(coord! { x: 5., y: 5. }), DimensionLocation::AREA_INTERIOR);
        assert_eq!(loc.locate_line_end_with_dim(coord! { x: 20., y: 5. }), DimensionLocation::LINE_BOUNDARY);
        assert!(loc.has_boundary());
    }

    #[test]
    fn test_polygonal_node() {
        let geom = Geometry::Polygon(polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 0.)]);
        let components = Components::extract(&geom);
        let loc = locator(&components, true);
        assert_eq!(loc.locate_node(coord! { x: 5., y: 0. }, None), Location::Boundary);
        assert_eq!(loc.locate(coord! { x: 8., y: 2. }), Location::Interior);
        assert!(!loc.has_boundary());
    }

    #[test]
    fn test_adjacent_polygons_in_collection() {
        let geom = Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            Geometry::Polygon(polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.)]),
            Geometry::Polygon(polygon![(x: 10., y: 0.), (x: 20., y: 0.), (x: 20., y: 10.), (x: 10., y: 10.), (x: 10., y: 0.)]),
        ]));
        let components = Components::extract(&geom);
        let loc = locator(&components, false);
        assert_eq!(loc.locate(coord! { x: 10., y: 5. }), Location::Interior);
        assert_eq!(loc.locate(coord! { x: 10., y: 10. }), Location::Boundary);
        assert_eq!(loc.locate_node(coord! { x: 10., y: 5. }, Some(0)), Location::Interior);
    }

    #[test]
    fn test_empty() {
        let geom = Geometry::GeometryCollection(GeometryCollection::new_from(vec![]));
        let components = Components::extract(&geom);
        let loc = locator(&components, false);
        assert_eq!(loc.locate_with_dim(coord! { x: 0., y: 0. }), DimensionLocation::EXTERIOR);
        assert_eq!(loc.locate_node(coord! { x: 0., y: 0. }, None), Location::Exterior);
    }
}
