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

use crate::relate::envelope::segment_envelope_contains;
use crate::relate::orientation::{is_ccw, orientation_index, Orientation};

/// CoordKey is a coordinate usable as an ordered map or set key.
///
/// Keys order by x and then y. Negative zero is folded into positive zero
/// so the two compare equal, as they do as f64 values.
#[derive(Debug, Clone, Copy)]
pub struct CoordKey {
    x: f64,
    y: f64,
}

impl CoordKey {
    pub fn new(c: Coord<f64>) -> CoordKey {
        // adding positive zero turns -0.0 into 0.0
        CoordKey {
            x: c.x + 0.0,
            y: c.y + 0.0,
        }
    }

    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<Coord<f64>> for CoordKey {
    fn from(c: Coord<f64>) -> Self {
        CoordKey::new(c)
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Compares two coordinates by x and then y.
pub fn compare_coords(a: Coord<f64>, b: Coord<f64>) -> Ordering {
    CoordKey::new(a).cmp(&CoordKey::new(b))
}

/// Reports whether p lies on the closed segment p0-p1.
pub fn is_on_segment(p: Coord<f64>, p0: Coord<f64>, p1: Coord<f64>) -> bool {
    segment_envelope_contains(p0, p1, p) && orientation_index(p0, p1, p) == Orientation::Collinear
}

/// Reports whether p lies on any segment of the coordinate chain.
pub fn is_on_line(p: Coord<f64>, pts: &[Coord<f64>]) -> bool {
    if pts.len() == 1 {
        return pts[0] == p;
    }
    pts.windows(2).any(|seg| is_on_segment(p, seg[0], seg[1]))
}

/// Returns the coordinates with consecutive duplicates removed.
pub fn remove_repeated_points(pts: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(pts.len());
    for &p in pts {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

/// Returns a copy of a closed ring, reversed if needed so that it is
/// oriented clockwise (`cw` true) or counter-clockwise.
pub fn orient_ring(pts: &[Coord<f64>], cw: bool) -> Vec<Coord<f64>> {
    let mut out = pts.to_vec();
    if cw == is_ccw(pts) {
        out.reverse();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;
    use std::collections::BTreeSet;

    #[test]
    fn test_key_negative_zero() {
        let a = CoordKey::new(coord! { x: -0.0, y: 1.0 });
        let b = CoordKey::new(coord! { x: 0.0, y: 1.0 });
        assert_eq!(a, b);
        let set: BTreeSet<CoordKey> = vec![a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_key_order() {
        let mut keys = vec![
            CoordKey::new(coord! { x: 1., y: 2. }),
            CoordKey::new(coord! { x: 0., y: 5. }),
            CoordKey::new(coord! { x: 1., y: -1. }),
        ];
        keys.sort();
        let coords: Vec<Coord<f64>> = keys.iter().map(|k| k.coord()).collect();
        assert_eq!(
            coords,
            vec![coord! { x: 0., y: 5. }, coord! { x: 1., y: -1. }, coord! { x: 1., y: 2. }]
        );
    }

    #[test]
    fn test_on_line() {
        let line = vec![coord! { x: 0., y: 0. }, coord! { x: 10., y: 0. }, coord! { x: 10., y: 10. }];
        assert!(is_on_line(coord! { x: 5., y: 0. }, &line));
        assert!(is_on_line(coord! { x: 10., y: 3. }, &line));
        assert!(!is_on_line(coord! { x: 5., y: 1. }, &line));
        assert!(!is_on_line(coord! { x: 11., y: 0. }, &line));
    }

    #[test]
    fn test_remove_repeated_and_orient() {
        let ring = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 0. },
        ];
        let clean = remove_repeated_points(&ring);
        assert_eq!(clean.len(), 4);
        assert!(is_ccw(&clean));
        let cw = orient_ring(&clean, true);
        assert!(!is_ccw(&cw));
        assert_eq!(cw[0], coord! { x: 0., y: 0. });
        assert_eq!(orient_ring(&clean, false), clean);
    }
}
