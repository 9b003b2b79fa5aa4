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

use geo_types::{Coord, LineString, Polygon};

use crate::relate::envelope::Envelope;
use crate::relate::interval_index::IntervalIndex;
use crate::relate::location::Location;
use crate::relate::orientation::{orientation_index, Orientation};

/// PointInAreaLocator locates a point relative to a polygonal area.
pub trait PointInAreaLocator {
    fn locate(&self, p: Coord<f64>) -> Location;
}

/// RayCrossingCounter counts the crossings of a horizontal ray, cast from a
/// point towards positive X, with the segments of one or more rings.
///
/// Segments may be supplied in any order. Once the point is found to lie on
/// a segment the remaining segments need not be counted.
#[derive(Debug, Clone, Copy)]
pub struct RayCrossingCounter {
    p: Coord<f64>,
    crossings: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    pub fn new(p: Coord<f64>) -> RayCrossingCounter {
        RayCrossingCounter {
            p,
            crossings: 0,
            on_segment: false,
        }
    }

    pub fn count_segment(&mut self, p1: Coord<f64>, p2: Coord<f64>) {
        let p = self.p;
        // segment strictly left of the point
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p == p2 {
            self.on_segment = true;
            return;
        }
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = if p1.x <= p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
            if p.x >= min_x && p.x <= max_x {
                self.on_segment = true;
            }
            return;
        }
        // the segment straddles the ray; endpoints on the ray count as above
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == Orientation::Collinear {
                self.on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orient = orient.reverse();
            }
            if orient == Orientation::CounterClockwise {
                self.crossings += 1;
            }
        }
    }

    pub fn count_ring(&mut self, ring: &LineString<f64>) {
        for seg in ring.0.windows(2) {
            self.count_segment(seg[0], seg[1]);
            if self.on_segment {
                return;
            }
        }
    }

    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// Locates a point relative to a single closed ring.
pub fn locate_in_ring(p: Coord<f64>, ring: &LineString<f64>) -> Location {
    let mut counter = RayCrossingCounter::new(p);
    counter.count_ring(ring);
    counter.location()
}

fn locate_in_polygon(p: Coord<f64>, polygon: &Polygon<f64>) -> Location {
    if polygon.exterior().0.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring(p, polygon.exterior()) {
        Location::Interior => {}
        loc => return loc,
    }
    for hole in polygon.interiors() {
        match locate_in_ring(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

/// SimplePointInAreaLocator tests a point against every ring of the area.
/// It needs no preprocessing and suits one-off queries.
#[derive(Debug, Clone)]
pub struct SimplePointInAreaLocator<'a> {
    polygons: Vec<Cow<'a, Polygon<f64>>>,
    env: Envelope,
}

impl<'a> SimplePointInAreaLocator<'a> {
    pub fn new(polygons: Vec<Cow<'a, Polygon<f64>>>) -> Self {
        let env = polygons_envelope(&polygons);
        SimplePointInAreaLocator { polygons, env }
    }
}

impl PointInAreaLocator for SimplePointInAreaLocator<'_> {
    fn locate(&self, p: Coord<f64>) -> Location {
        if !self.env.intersects_coord(p) {
            return Location::Exterior;
        }
        self.polygons
            .iter()
            .map(|poly| locate_in_polygon(p, poly))
            .find(|&loc| loc != Location::Exterior)
            .unwrap_or(Location::Exterior)
    }
}

/// IndexedPointInAreaLocator indexes the ring segments of the area by their
/// Y extent, so a query only visits the segments its ray can cross.
#[derive(Debug, Clone)]
pub struct IndexedPointInAreaLocator {
    index: IntervalIndex<(Coord<f64>, Coord<f64>)>,
    env: Envelope,
}

impl IndexedPointInAreaLocator {
    pub fn new(polygons: &[Cow<'_, Polygon<f64>>]) -> Self {
        let mut segments = vec![];
        for poly in polygons {
            if poly.exterior().0.is_empty() {
                continue;
            }
            for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
                for seg in ring.0.windows(2) {
                    let (lo, hi) = if seg[0].y <= seg[1].y {
                        (seg[0].y, seg[1].y)
                    } else {
                        (seg[1].y, seg[0].y)
                    };
                    segments.push((lo, hi, (seg[0], seg[1])));
                }
            }
        }
        IndexedPointInAreaLocator {
            index: IntervalIndex::new(segments),
            env: polygons_envelope(polygons),
        }
    }
}

impl PointInAreaLocator for IndexedPointInAreaLocator {
    fn locate(&self, p: Coord<f64>) -> Location {
        if !self.env.intersects_coord(p) {
            return Location::Exterior;
        }
        let mut counter = RayCrossingCounter::new(p);
        self.index.query(p.y, p.y, |&(p0, p1)| counter.count_segment(p0, p1));
        counter.location()
    }
}

/// AreaLocator is the locator chosen for one polygonal element: the simple
/// one for one-off queries, the indexed one for prepared geometries.
#[derive(Debug, Clone)]
pub enum AreaLocator<'a> {
    Simple(SimplePointInAreaLocator<'a>),
    Indexed(IndexedPointInAreaLocator),
}

impl<'a> AreaLocator<'a> {
    pub fn new(polygons: Vec<Cow<'a, Polygon<f64>>>, indexed: bool) -> Self {
        if indexed {
            AreaLocator::Indexed(IndexedPointInAreaLocator::new(&polygons))
        } else {
            AreaLocator::Simple(SimplePointInAreaLocator::new(polygons))
        }
    }
}

impl PointInAreaLocator for AreaLocator<'_> {
    fn locate(&self, p: Coord<f64>) -> Location {
        match self {
            AreaLocator::Simple(l) => l.locate(p),
            AreaLocator::Indexed(l) => l.locate(p),
        }
    }
}

fn polygons_envelope(polygons: &[Cow<'_, Polygon<f64>>]) -> Envelope {
    let mut env = Envelope::null();
    for poly in polygons {
        env.expand_to_include_envelope(&Envelope::from_coords(poly.exterior().0.iter()));
    }
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, polygon};

    fn square_with_hole() -> Polygon<f64> {
        polygon!(
            exterior: [
                (x: 0., y: 0.),
                (x: 10., y: 0.),
                (x: 10., y: 10.),
                (x: 0., y: 10.),
                (x: 0., y: 0.),
            ],
            interiors: [
                [
                    (x: 4., y: 4.),
                    (x: 6., y: 4.),
                    (x: 6., y: 6.),
                    (x: 4., y: 6.),
                    (x: 4., y: 4.),
                ],
            ],
        )
    }

    fn cases() -> Vec<(Coord<f64>, Location)> {
        vec![
            (coord! { x: 2., y: 2. }, Location::Interior),
            (coord! { x: 5., y: 5. }, Location::Exterior),
            (coord! { x: 4., y: 5. }, Location::Boundary),
            (coord! { x: 0., y: 0. }, Location::Boundary),
            (coord! { x: 10., y: 5. }, Location::Boundary),
            (coord! { x: 5., y: 0. }, Location::Boundary),
            (coord! { x: 11., y: 5. }, Location::Exterior),
            (coord! { x: -1., y: 0. }, Location::Exterior),
            (coord! { x: 2., y: 4. }, Location::Interior),
        ]
    }

    #[test]
    fn test_ring_locate() {
        let poly = square_with_hole();
        assert_eq!(locate_in_ring(coord! { x: 5., y: 5. }, poly.exterior()), Location::Interior);
        assert_eq!(locate_in_ring(coord! { x: 10., y: 10. }, poly.exterior()), Location::Boundary);
        assert_eq!(locate_in_ring(coord! { x: 15., y: 10. }, poly.exterior()), Location::Exterior);
    }

    #[test]
    fn test_simple_locator() {
        let poly = square_with_hole();
        let locator = SimplePointInAreaLocator::new(vec![Cow::Borrowed(&poly)]);
        for (p, want) in cases() {
            assert_eq!(locator.locate(p), want, "point {:?}", p);
        }
    }

    #[test]
    fn test_indexed_matches_simple() {
        let poly = square_with_hole();
        let simple = AreaLocator::new(vec![Cow::Borrowed(&poly)], false);
        let indexed = AreaLocator::new(vec![Cow::Borrowed(&poly)], true);
        for (p, want) in cases() {
            assert_eq!(simple.locate(p), want, "simple {:?}", p);
            assert_eq!(indexed.locate(p), want, "indexed {:?}", p);
        }
    }

    #[test]
    fn test_empty_area() {
        let locator = AreaLocator::new(vec![], true);
        assert_eq!(locator.locate(coord! { x: 0., y: 0. }), Location::Exterior);
    }
}
