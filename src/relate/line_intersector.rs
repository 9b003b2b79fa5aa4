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

use cgmath::Vector2;
use geo_types::Coord;

use crate::relate::envelope::{segment_envelope_contains, Envelope};
use crate::relate::orientation::{orientation_index, Orientation};

/// SegmentIntersection describes how two line segments intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not intersect.
    None,
    /// The segments meet in a single point. The intersection is proper when
    /// the point lies in the interior of both segments.
    Point { point: Coord<f64>, is_proper: bool },
    /// The segments are collinear and overlap between the two points.
    Collinear(Coord<f64>, Coord<f64>),
}

impl SegmentIntersection {
    pub fn has_intersection(&self) -> bool {
        !matches!(self, SegmentIntersection::None)
    }

    pub fn is_proper(&self) -> bool {
        matches!(self, SegmentIntersection::Point { is_proper: true, .. })
    }

    /// The intersection points: none, one, or the two ends of a collinear
    /// overlap.
    pub fn points(&self) -> impl Iterator<Item = Coord<f64>> {
        let (first, second) = match *self {
            SegmentIntersection::None => (None, None),
            SegmentIntersection::Point { point, .. } => (Some(point), None),
            SegmentIntersection::Collinear(p0, p1) => (Some(p0), Some(p1)),
        };
        first.into_iter().chain(second)
    }
}

fn same_side(a: Orientation, b: Orientation) -> bool {
    (a == Orientation::CounterClockwise && b == Orientation::CounterClockwise)
        || (a == Orientation::Clockwise && b == Orientation::Clockwise)
}

/// Computes the intersection of the segments p1-p2 and q1-q2.
///
/// Intersections at segment endpoints are reported with the exact endpoint
/// coordinate, so that every segment meeting at a vertex produces the same
/// node coordinate.
pub fn intersect_segments(
    p1: Coord<f64>,
    p2: Coord<f64>,
    q1: Coord<f64>,
    q2: Coord<f64>,
) -> SegmentIntersection {
    if !Envelope::from_segment(p1, p2).intersects(&Envelope::from_segment(q1, q2)) {
        return SegmentIntersection::None;
    }

    let pq1 = orientation_index(p1, p2, q1);
    let pq2 = orientation_index(p1, p2, q2);
    if same_side(pq1, pq2) {
        return SegmentIntersection::None;
    }
    let qp1 = orientation_index(q1, q2, p1);
    let qp2 = orientation_index(q1, q2, p2);
    if same_side(qp1, qp2) {
        return SegmentIntersection::None;
    }

    let collinear = [pq1, pq2, qp1, qp2]
        .iter()
        .all(|&o| o == Orientation::Collinear);
    if collinear {
        return collinear_intersection(p1, p2, q1, q2);
    }

    // One intersection point. If it is an endpoint, report the endpoint
    // itself rather than a computed value.
    if [pq1, pq2, qp1, qp2].contains(&Orientation::Collinear) {
        let point = if p1 == q1 || p1 == q2 {
            p1
        } else if p2 == q1 || p2 == q2 {
            p2
        } else if pq1 == Orientation::Collinear {
            q1
        } else if pq2 == Orientation::Collinear {
            q2
        } else if qp1 == Orientation::Collinear {
            p1
        } else {
            p2
        };
        return SegmentIntersection::Point {
            point,
            is_proper: false,
        };
    }

    SegmentIntersection::Point {
        point: proper_intersection(p1, p2, q1, q2),
        is_proper: true,
    }
}

fn collinear_intersection(
    p1: Coord<f64>,
    p2: Coord<f64>,
    q1: Coord<f64>,
    q2: Coord<f64>,
) -> SegmentIntersection {
    let q1_in_p = segment_envelope_contains(p1, p2, q1);
    let q2_in_p = segment_envelope_contains(p1, p2, q2);
    let p1_in_q = segment_envelope_contains(q1, q2, p1);
    let p2_in_q = segment_envelope_contains(q1, q2, p2);

    let touching = |a: Coord<f64>, b: Coord<f64>, others_outside: bool| {
        if a == b && others_outside {
            SegmentIntersection::Point {
                point: a,
                is_proper: false,
            }
        } else {
            SegmentIntersection::Collinear(a, b)
        }
    };

    if q1_in_p && q2_in_p {
        return SegmentIntersection::Collinear(q1, q2);
    }
    if p1_in_q && p2_in_q {
        return SegmentIntersection::Collinear(p1, p2);
    }
    if q1_in_p && p1_in_q {
        return touching(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return touching(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return touching(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return touching(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

// proper_intersection computes the crossing point of two segments known to
// cross in their interiors. If rounding pushes the computed point outside
// the segment envelopes, the endpoint nearest the other segment is used.
fn proper_intersection(p1: Coord<f64>, p2: Coord<f64>, q1: Coord<f64>, q2: Coord<f64>) -> Coord<f64> {
    // work relative to the middle of the overlap to preserve precision
    let env = Envelope::from_segment(p1, p2).intersection(&Envelope::from_segment(q1, q2));
    let mid = Vector2::new((env.min_x + env.max_x) / 2.0, (env.min_y + env.max_y) / 2.0);

    let a = Vector2::new(p1.x, p1.y) - mid;
    let da = Vector2::new(p2.x - p1.x, p2.y - p1.y);
    let b = Vector2::new(q1.x, q1.y) - mid;
    let db = Vector2::new(q2.x - q1.x, q2.y - q1.y);

    let denom = da.perp_dot(db);
    let t = (b - a).perp_dot(db) / denom;
    let v = a + da * t + mid;
    let pt = Coord { x: v.x, y: v.y };

    let in_envelopes = segment_envelope_contains(p1, p2, pt) && segment_envelope_contains(q1, q2, pt);
    if pt.x.is_finite() && pt.y.is_finite() && in_envelopes {
        return pt;
    }
    nearest_endpoint(p1, p2, q1, q2)
}

fn distance_to_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let ab = Vector2::new(b.x - a.x, b.y - a.y);
    let ap = Vector2::new(p.x - a.x, p.y - a.y);
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 == 0.0 {
        return ap.x.hypot(ap.y);
    }
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    let d = ap - ab * t;
    d.x.hypot(d.y)
}

fn nearest_endpoint(p1: Coord<f64>, p2: Coord<f64>, q1: Coord<f64>, q2: Coord<f64>) -> Coord<f64> {
    let candidates = [
        (p1, distance_to_segment(p1, q1, q2)),
        (p2, distance_to_segment(p2, q1, q2)),
        (q1, distance_to_segment(q1, p1, p2)),
        (q2, distance_to_segment(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_proper_crossing() {
        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 10., y: 0. },
        );
        assert!(r.is_proper());
        assert_eq!(r.points().collect::<Vec<_>>(), vec![coord! { x: 5., y: 5. }]);
    }

    #[test]
    fn test_endpoint_touch() {
        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
        );
        assert_eq!(
            r,
            SegmentIntersection::Point {
                point: coord! { x: 10., y: 0. },
                is_proper: false
            }
        );

        // endpoint in the interior of the other segment
        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 5., y: 0. },
            coord! { x: 5., y: 10. },
        );
        assert_eq!(r.points().collect::<Vec<_>>(), vec![coord! { x: 5., y: 0. }]);
        assert!(!r.is_proper());
    }

    #[test]
    fn test_disjoint() {
        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 0., y: 1. },
            coord! { x: 10., y: 1. },
        );
        assert!(!r.has_intersection());
        assert_eq!(r.points().count(), 0);

        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 4., y: 4. },
            coord! { x: 10., y: 0. },
            coord! { x: 6., y: 4. },
        );
        assert_eq!(r, SegmentIntersection::None);
    }

    #[test]
    fn test_collinear() {
        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 5., y: 0. },
            coord! { x: 15., y: 0. },
        );
        assert_eq!(
            r,
            SegmentIntersection::Collinear(coord! { x: 5., y: 0. }, coord! { x: 10., y: 0. })
        );

        let r = intersect_segments(
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 20., y: 0. },
        );
        assert_eq!(
            r,
            SegmentIntersection::Point {
                point: coord! { x: 10., y: 0. },
                is_proper: false
            }
        );
    }

    #[test]
    fn test_nearly_parallel_stays_in_envelope() {
        let p1 = coord! { x: 0., y: 0. };
        let p2 = coord! { x: 1e9, y: 1. };
        let q1 = coord! { x: 0., y: 1e-9 };
        let q2 = coord! { x: 1e9, y: 1. - 1e-9 };
        if let SegmentIntersection::Point { point, .. } = intersect_segments(p1, p2, q1, q2) {
            assert!(segment_envelope_contains(p1, p2, point));
            assert!(segment_envelope_contains(q1, q2, point));
        }
    }
}
