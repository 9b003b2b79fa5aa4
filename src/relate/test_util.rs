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

use geo_types::{coord, Coord, Geometry, LineString, MultiPoint, Point, Polygon};
use rand::Rng;

// Random geometries live on a small integer grid so that shared vertices,
// collinear edges and touching boundaries are frequent.
const GRID: i32 = 10;

/// square returns the axis-aligned square with lower left corner (x, y).
pub fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size), (x, y)]),
        vec![],
    ))
}

fn random_coord<R: Rng>(rng: &mut R) -> Coord<f64> {
    coord! { x: rng.gen_range(0..=GRID) as f64, y: rng.gen_range(0..=GRID) as f64 }
}

// random_extent returns a non-zero side length that keeps the shape on the grid.
fn random_extent<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(1..=GRID / 2) as f64
}

/// random_line returns a line of 2 to 4 vertices with no repeated
/// consecutive points. The line may cross itself.
pub fn random_line<R: Rng>(rng: &mut R) -> LineString<f64> {
    let n = rng.gen_range(2..=4);
    let mut pts: Vec<Coord<f64>> = vec![random_coord(rng)];
    while pts.len() < n {
        let c = random_coord(rng);
        if pts.last() != Some(&c) {
            pts.push(c);
        }
    }
    LineString::new(pts)
}

/// random_polygon returns a rectangle or a right triangle.
pub fn random_polygon<R: Rng>(rng: &mut R) -> Polygon<f64> {
    let c = random_coord(rng);
    let (w, h) = (random_extent(rng), random_extent(rng));
    let ring = if rng.gen_bool(0.5) {
        vec![(c.x, c.y), (c.x + w, c.y), (c.x + w, c.y + h), (c.x, c.y + h), (c.x, c.y)]
    } else {
        vec![(c.x, c.y), (c.x + w, c.y), (c.x, c.y + h), (c.x, c.y)]
    };
    Polygon::new(LineString::from(ring), vec![])
}

/// random_geometry returns a point, multipoint, line or polygon.
pub fn random_geometry<R: Rng>(rng: &mut R) -> Geometry<f64> {
    match rng.gen_range(0..5) {
        0 => Geometry::Point(Point(random_coord(rng))),
        1 => {
            let n = rng.gen_range(1..=3);
            Geometry::MultiPoint(MultiPoint::new((0..n).map(|_| Point(random_coord(rng))).collect()))
        }
        2 => Geometry::LineString(random_line(rng)),
        _ => Geometry::Polygon(random_polygon(rng)),
    }
}
