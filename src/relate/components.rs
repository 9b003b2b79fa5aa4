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

use geo_types::{Coord, Geometry, LineString, Polygon};

use crate::relate::envelope::Envelope;
use crate::relate::location::Dimension;

/// Components are the non-empty atomic elements of a geometry, with nested
/// collections flattened.
///
/// A polygonal element is a single polygon or a whole multipolygon; the
/// polygons of a multipolygon stay together because their union is the
/// area being located against. A polygonal element is identified by its
/// index in `polygonals`.
#[derive(Debug, Clone, Default)]
pub struct Components<'a> {
    pub points: Vec<Coord<f64>>,
    pub lines: Vec<Cow<'a, LineString<f64>>>,
    pub polygonals: Vec<Vec<Cow<'a, Polygon<f64>>>>,
}

fn is_empty_polygon(poly: &Polygon<f64>) -> bool {
    poly.exterior().0.is_empty()
}

impl<'a> Components<'a> {
    /// Flattens a geometry with an explicit worklist, preserving the order
    /// of elements in collections.
    pub fn extract(geom: &'a Geometry<f64>) -> Components<'a> {
        let mut components = Components::default();
        let mut stack: Vec<&'a Geometry<f64>> = vec![geom];
        while let Some(g) = stack.pop() {
            match g {
                Geometry::Point(p) => components.points.push(p.0),
                Geometry::MultiPoint(mp) => components.points.extend(mp.0.iter().map(|p| p.0)),
                Geometry::Line(l) => components
                    .lines
                    .push(Cow::Owned(LineString::new(vec![l.start, l.end]))),
                Geometry::LineString(ls) => components.add_line(Cow::Borrowed(ls)),
                Geometry::MultiLineString(mls) => {
                    for ls in &mls.0 {
                        components.add_line(Cow::Borrowed(ls));
                    }
                }
                Geometry::Polygon(poly) => components.add_polygonal(vec![Cow::Borrowed(poly)]),
                Geometry::MultiPolygon(mp) => {
                    components.add_polygonal(mp.0.iter().map(Cow::Borrowed).collect())
                }
                Geometry::Rect(r) => components.add_polygonal(vec![Cow::Owned(r.to_polygon())]),
                Geometry::Triangle(t) => components.add_polygonal(vec![Cow::Owned(t.to_polygon())]),
                Geometry::GeometryCollection(gc) => stack.extend(gc.0.iter().rev()),
            }
        }
        components
    }

    fn add_line(&mut self, line: Cow<'a, LineString<f64>>) {
        if !line.0.is_empty() {
            self.lines.push(line);
        }
    }

    fn add_polygonal(&mut self, polygons: Vec<Cow<'a, Polygon<f64>>>) {
        let polygons: Vec<Cow<'a, Polygon<f64>>> = polygons.into_iter().filter(|p| !is_empty_polygon(p)).collect();
        if !polygons.is_empty() {
            self.polygonals.push(polygons);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygonals.is_empty()
    }

    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn has_areas(&self) -> bool {
        !self.polygonals.is_empty()
    }

    /// The highest dimension of any element.
    pub fn dimension(&self) -> Dimension {
        if self.has_areas() {
            Dimension::Area
        } else if self.has_lines() {
            Dimension::Line
        } else if self.has_points() {
            Dimension::Point
        } else {
            Dimension::Empty
        }
    }

    /// Reports whether every line has all of its vertices equal.
    pub fn is_zero_length(&self) -> bool {
        self.lines.iter().all(|line| match line.0.first() {
            Some(p0) => line.0.iter().all(|p| p == p0),
            None => true,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Cow<'a, Polygon<f64>>> {
        self.polygonals.iter().flatten()
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::from_coords(self.points.iter());
        for line in &self.lines {
            env.expand_to_include_envelope(&Envelope::from_coords(line.0.iter()));
        }
        for poly in self.polygons() {
            env.expand_to_include_envelope(&Envelope::from_coords(poly.exterior().0.iter()));
        }
        env
    }
}
