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

use bigdecimal::BigDecimal;
use cgmath::Vector2;
use geo_types::Coord;

// Relative error bound of the floating point determinant. Determinants
// whose magnitude falls below this fraction of their summed terms are
// recomputed exactly.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Orientation is the turn direction of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    fn from_sign(s: f64) -> Orientation {
        if s > 0.0 {
            Orientation::CounterClockwise
        } else if s < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }

    pub fn reverse(self) -> Orientation {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

// triage_orientation computes the orientation of the triangle (a, b, c)
// with plain floating point arithmetic, and reports None when the result is
// too close to zero to be trusted.
fn triage_orientation(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Option<Orientation> {
    let ac = Vector2::new(a.x - c.x, a.y - c.y);
    let bc = Vector2::new(b.x - c.x, b.y - c.y);
    let det_left = ac.x * bc.y;
    let det_right = ac.y * bc.x;
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return Some(Orientation::from_sign(det));
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return Some(Orientation::from_sign(det));
        }
        -det_left - det_right
    } else {
        return Some(Orientation::from_sign(det));
    };

    let err_bound = DP_SAFE_EPSILON * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Some(Orientation::from_sign(det));
    }
    None
}

// exact converts a finite f64 into the BigDecimal with exactly the same
// value, as mantissa * 2^exponent.
fn exact(v: f64) -> BigDecimal {
    let bits = v.to_bits();
    let negative = bits >> 63 != 0;
    let exp_bits = ((bits >> 52) & 0x7ff) as i64;
    let fraction = (bits & 0x000f_ffff_ffff_ffff) as i64;
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), exp_bits - 1075)
    };
    let mantissa = if negative { -mantissa } else { mantissa };
    BigDecimal::from(mantissa) * pow2(exponent)
}

// pow2 returns 2^exponent exactly, by repeated squaring of 2 or 1/2.
fn pow2(exponent: i64) -> BigDecimal {
    let mut base = if exponent >= 0 {
        BigDecimal::from(2i64)
    } else {
        BigDecimal::from(1i64) / BigDecimal::from(2i64)
    };
    let mut n = exponent.unsigned_abs();
    let mut result = BigDecimal::from(1i64);
    while n > 0 {
        if n & 1 == 1 {
            result = result * base.clone();
        }
        base = base.clone() * base;
        n >>= 1;
    }
    result
}

// exact_orientation evaluates the orientation determinant in exact
// arithmetic. It is only reached for nearly collinear triples.
fn exact_orientation(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Orientation {
    let (ax, ay) = (exact(a.x), exact(a.y));
    let (bx, by) = (exact(b.x), exact(b.y));
    let (cx, cy) = (exact(c.x), exact(c.y));

    let det = (ax.clone() - cx.clone()) * (by - cy.clone()) - (ay - cy) * (bx - cx);
    let zero = BigDecimal::from(0i64);
    if det > zero {
        Orientation::CounterClockwise
    } else if det < zero {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns the orientation of q relative to the directed segment p1-p2.
/// CounterClockwise means q lies to the left of the segment.
///
/// The result is exact: a fast floating point filter answers nearly all
/// cases, and the rest are decided with arbitrary precision arithmetic.
pub fn orientation_index(p1: Coord<f64>, p2: Coord<f64>, q: Coord<f64>) -> Orientation {
    triage_orientation(p1, p2, q).unwrap_or_else(|| exact_orientation(p1, p2, q))
}

/// Reports whether a closed ring is oriented counter-clockwise. Rings with
/// fewer than three distinct vertices or with no area report false.
pub fn is_ccw(ring: &[Coord<f64>]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    // number of points without the closing endpoint
    let n = ring.len() - 1;

    // find the first highest point after a lower point, if one exists
    let mut up_hi = ring[0];
    let mut prev_y = up_hi.y;
    let mut up_low = ring[0];
    let mut i_up_hi = 0;
    for i in 1..=n {
        let py = ring[i].y;
        if py > prev_y && py >= up_hi.y {
            up_hi = ring[i];
            i_up_hi = i;
            up_low = ring[i - 1];
        }
        prev_y = py;
    }
    if i_up_hi == 0 {
        return false;
    }

    // find the next lower point after the high point
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi.y {
            break;
        }
    }
    let down_low = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 { i_down_low - 1 } else { n - 1 };
    let down_hi = ring[i_down_hi];

    if up_hi == down_hi {
        // the high point is a single vertex, so the turn at it decides
        if up_low == up_hi || down_low == up_hi || up_low == down_low {
            return false;
        }
        return orientation_index(up_low, up_hi, down_low) == Orientation::CounterClockwise;
    }
    // a flat top segment is traversed right to left in a CCW ring
    down_hi.x - up_hi.x < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_orientation_basic() {
        let p0 = coord! { x: 0., y: 0. };
        let p1 = coord! { x: 10., y: 0. };
        assert_eq!(orientation_index(p0, p1, coord! { x: 5., y: 1. }), Orientation::CounterClockwise);
        assert_eq!(orientation_index(p0, p1, coord! { x: 5., y: -1. }), Orientation::Clockwise);
        assert_eq!(orientation_index(p0, p1, coord! { x: 20., y: 0. }), Orientation::Collinear);
        assert_eq!(Orientation::Clockwise.reverse(), Orientation::CounterClockwise);
    }

    #[test]
    fn test_orientation_nearly_collinear() {
        // exactly collinear, but the filter cannot decide it
        let p0 = coord! { x: 0.5, y: 0.5 };
        let p1 = coord! { x: 12.0, y: 12.0 };
        let p2 = coord! { x: 24.0, y: 24.0 };
        assert_eq!(orientation_index(p0, p1, p2), Orientation::Collinear);

        let q = coord! { x: 0.5 + f64::EPSILON, y: 0.5 };
        let o = orientation_index(coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. }, q);
        assert_eq!(o, Orientation::Clockwise);
    }

    #[test]
    fn test_exact_conversion() {
        assert_eq!(exact(0.5), BigDecimal::from(1i64) / BigDecimal::from(2i64));
        assert_eq!(exact(-3.0), BigDecimal::from(-3i64));
        assert_eq!(exact(0.0), BigDecimal::from(0i64));
        assert_eq!(exact(1024.0), BigDecimal::from(1024i64));
    }

    #[test]
    fn test_exact_matches_filter() {
        let a = coord! { x: 1.0, y: 2.0 };
        let b = coord! { x: 4.0, y: 7.0 };
        for c in [coord! { x: 0.0, y: 5.0 }, coord! { x: 9.0, y: 1.0 }, coord! { x: 7.0, y: 12.0 }] {
            assert_eq!(exact_orientation(a, b, c), orientation_index(a, b, c));
        }
    }

    #[test]
    fn test_is_ccw() {
        let ccw = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ];
        assert!(is_ccw(&ccw));
        let mut cw = ccw.clone();
        cw.reverse();
        assert!(!is_ccw(&cw));

        let flat = vec![coord! { x: 0., y: 0. }, coord! { x: 1., y: 0. }, coord! { x: 0., y: 0. }];
        assert!(!is_ccw(&flat));
    }
}
