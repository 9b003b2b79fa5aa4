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

//! Angular relations between edges that meet at a node.
//!
//! Directions are compared by quadrant first and then by orientation, so no
//! angle is ever computed and the ordering is exact: two directions compare
//! equal only when they are collinear and point the same way.

use std::cmp::Ordering;

use cgmath::Vector2;
use geo_types::Coord;

use crate::relate::orientation::{orientation_index, Orientation};

// Quadrants are numbered counter-clockwise starting from the positive X
// axis, so a larger quadrant means a larger angle.
fn quadrant(origin: Coord<f64>, p: Coord<f64>) -> u8 {
    let d = Vector2::new(p.x - origin.x, p.y - origin.y);
    if d.x >= 0.0 {
        if d.y >= 0.0 {
            0
        } else {
            3
        }
    } else if d.y >= 0.0 {
        1
    } else {
        2
    }
}

/// Compares the angles of the directions origin->p and origin->q, measured
/// counter-clockwise from the positive X axis.
pub fn compare_angle(origin: Coord<f64>, p: Coord<f64>, q: Coord<f64>) -> Ordering {
    let quadrant_p = quadrant(origin, p);
    let quadrant_q = quadrant(origin, q);
    match quadrant_p.cmp(&quadrant_q) {
        Ordering::Equal => {}
        ord => return ord,
    }
    // same quadrant: p is greater if it lies CCW of q
    match orientation_index(origin, q, p) {
        Orientation::CounterClockwise => Ordering::Greater,
        Orientation::Clockwise => Ordering::Less,
        Orientation::Collinear => Ordering::Equal,
    }
}

fn is_angle_greater(origin: Coord<f64>, p: Coord<f64>, q: Coord<f64>) -> bool {
    compare_angle(origin, p, q) == Ordering::Greater
}

// compare_between reports where the direction of p lies relative to the
// angular range (e0, e1): Greater when strictly inside, Less when strictly
// outside, and Equal when collinear with either bound.
fn compare_between(origin: Coord<f64>, p: Coord<f64>, e0: Coord<f64>, e1: Coord<f64>) -> Ordering {
    let comp0 = compare_angle(origin, p, e0);
    if comp0 == Ordering::Equal {
        return Ordering::Equal;
    }
    let comp1 = compare_angle(origin, p, e1);
    if comp1 == Ordering::Equal {
        return Ordering::Equal;
    }
    if comp0 == Ordering::Greater && comp1 == Ordering::Less {
        return Ordering::Greater;
    }
    Ordering::Less
}

fn is_between(origin: Coord<f64>, p: Coord<f64>, e0: Coord<f64>, e1: Coord<f64>) -> bool {
    is_angle_greater(origin, p, e0) && !is_angle_greater(origin, p, e1)
}

/// Reports whether the edge pair a0-node-a1 crosses the edge pair
/// b0-node-b1, where all four edges share the node. The pairs cross when
/// exactly one of the b edges lies inside the angle spanned by the a edges.
/// Collinear edges are never reported as crossing.
pub fn is_crossing(
    node: Coord<f64>,
    a0: Coord<f64>,
    a1: Coord<f64>,
    b0: Coord<f64>,
    b1: Coord<f64>,
) -> bool {
    let (a_lo, a_hi) = if is_angle_greater(node, a0, a1) {
        (a1, a0)
    } else {
        (a0, a1)
    };

    let between0 = compare_between(node, b0, a_lo, a_hi);
    if between0 == Ordering::Equal {
        return false;
    }
    let between1 = compare_between(node, b1, a_lo, a_hi);
    if between1 == Ordering::Equal {
        return false;
    }
    between0 != between1
}

/// Reports whether the segment node-b lies in the interior of a ring whose
/// edges at the node are a0-node-a1. The ring is assumed to be oriented
/// clockwise, so its interior lies on the right of a0 -> node -> a1.
pub fn is_interior_segment(node: Coord<f64>, a0: Coord<f64>, a1: Coord<f64>, b: Coord<f64>) -> bool {
    let (a_lo, a_hi, interior_between) = if is_angle_greater(node, a0, a1) {
        (a1, a0, false)
    } else {
        (a0, a1, true)
    };
    is_between(node, b, a_lo, a_hi) == interior_between
}
