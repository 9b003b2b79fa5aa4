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

use crate::relate::envelope::Envelope;
use crate::relate::intersection_matrix::{IntersectionMatrix, IntersectionPattern, PatternCell};
use crate::relate::location::{Dimension, Location};
use crate::relate::topology_predicate::TopologyPredicate;

use Location::*;

/// PredicateValue is the value of a predicate: unknown until it is set, and
/// never changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredicateValue(Option<bool>);

impl PredicateValue {
    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }

    pub fn value(&self) -> bool {
        self.0 == Some(true)
    }

    pub fn set(&mut self, value: bool) {
        if self.0.is_none() {
            self.0 = Some(value);
        }
    }

    pub fn set_if(&mut self, value: bool, cond: bool) {
        if cond {
            self.set(value);
        }
    }

    /// Sets the value to false unless the condition holds.
    pub fn require(&mut self, cond: bool) {
        if !cond {
            self.set(false);
        }
    }
}

fn is_intersection(loc_a: Location, loc_b: Location) -> bool {
    loc_a != Exterior && loc_b != Exterior
}

/// Tests whether the geometries have any point in common.
#[derive(Debug, Clone, Default)]
pub struct IntersectsPredicate {
    value: PredicateValue,
}

impl TopologyPredicate for IntersectsPredicate {
    fn name(&self) -> &'static str {
        "intersects"
    }

    fn require_self_noding(&self) -> bool {
        false
    }

    fn require_exterior_check(&self, _is_source_a: bool) -> bool {
        false
    }

    fn init_envelopes(&mut self, env_a: &Envelope, env_b: &Envelope) {
        self.value.require(env_a.intersects(env_b));
    }

    fn update_dimension(&mut self, loc_a: Location, loc_b: Location, _dim: Dimension) {
        self.value.set_if(true, is_intersection(loc_a, loc_b));
    }

    fn finish(&mut self) {
        self.value.set(false);
    }

    fn is_known(&self) -> bool {
        self.value.is_known()
    }

    fn value(&self) -> bool {
        self.value.value()
    }
}

/// Tests whether the geometries have no point in common.
#[derive(Debug, Clone, Default)]
pub struct DisjointPredicate {
    value: PredicateValue,
}

impl TopologyPredicate for DisjointPredicate {
    fn name(&self) -> &'static str {
        "disjoint"
    }

    fn require_self_noding(&self) -> bool {
        false
    }

    fn require_interaction(&self) -> bool {
        false
    }

    fn require_exterior_check(&self, _is_source_a: bool) -> bool {
        false
    }

    fn init_envelopes(&mut self, env_a: &Envelope, env_b: &Envelope) {
        self.value.set_if(true, env_a.disjoint(env_b));
    }

    fn update_dimension(&mut self, loc_a: Location, loc_b: Location, _dim: Dimension) {
        self.value.set_if(false, is_intersection(loc_a, loc_b));
    }

    fn finish(&mut self) {
        self.value.set(true);
    }

    fn is_known(&self) -> bool {
        self.value.is_known()
    }

    fn value(&self) -> bool {
        self.value.value()
    }
}

/// MatrixState is the state shared by predicates evaluated on the
/// intersection matrix.
#[derive(Debug, Clone)]
pub struct MatrixState {
    pub value: PredicateValue,
    pub dim_a: Dimension,
    pub dim_b: Dimension,
    pub matrix: IntersectionMatrix,
}

impl Default for MatrixState {
    fn default() -> Self {
        // the exteriors of two bounded planar geometries always intersect
        let mut matrix = IntersectionMatrix::new();
        matrix.set(Exterior, Exterior, Dimension::Area);
        MatrixState {
            value: PredicateValue::default(),
            dim_a: Dimension::Empty,
            dim_b: Dimension::Empty,
            matrix,
        }
    }
}

impl MatrixState {
    pub fn get(&self, loc_a: Location, loc_b: Location) -> Dimension {
        self.matrix.get(loc_a, loc_b)
    }

    pub fn is_intersects(&self, loc_a: Location, loc_b: Location) -> bool {
        self.matrix.get(loc_a, loc_b) >= Dimension::Point
    }

    /// Reports whether the other geometry intersects the exterior of the
    /// given one.
    pub fn intersects_exterior_of(&self, is_a: bool) -> bool {
        if is_a {
            self.is_intersects(Exterior, Interior) || self.is_intersects(Exterior, Boundary)
        } else {
            self.is_intersects(Interior, Exterior) || self.is_intersects(Boundary, Exterior)
        }
    }
}

/// Reports whether a geometry of dimension `dim0` can cover one of
/// dimension `dim1`. Points may be covered by zero-length lines.
pub fn is_dims_compatible_with_covers(dim0: Dimension, dim1: Dimension) -> bool {
    if dim0 == Dimension::Point && dim1 == Dimension::Line {
        return true;
    }
    dim0 >= dim1
}

/// PredicateRule decides a predicate from a partially computed intersection
/// matrix.
pub trait PredicateRule {
    fn name(&self) -> &'static str;

    fn require_covers(&self, _is_source_a: bool) -> bool {
        false
    }

    fn require_exterior_check(&self, _is_source_a: bool) -> bool {
        true
    }

    fn require_interaction(&self) -> bool {
        true
    }

    fn init_dims(&self, _state: &mut MatrixState) {}

    fn init_envelopes(&self, _state: &mut MatrixState, _env_a: &Envelope, _env_b: &Envelope) {}

    /// Reports whether the matrix computed so far decides the predicate.
    fn is_determined(&self, state: &MatrixState) -> bool;

    fn value_im(&self, state: &MatrixState) -> bool;
}

/// IMPredicate evaluates a predicate rule on the intersection matrix.
/// Cells only ever increase, and the value is fixed as soon as the rule
/// reports it is determined.
#[derive(Debug, Clone)]
pub struct IMPredicate<R> {
    rule: R,
    state: MatrixState,
}

impl<R: PredicateRule> IMPredicate<R> {
    pub fn new(rule: R) -> Self {
        IMPredicate {
            rule,
            state: MatrixState::default(),
        }
    }

    pub fn matrix(&self) -> IntersectionMatrix {
        self.state.matrix
    }
}

impl<R: PredicateRule> TopologyPredicate for IMPredicate<R> {
    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn require_interaction(&self) -> bool {
        self.rule.require_interaction()
    }

    fn require_covers(&self, is_source_a: bool) -> bool {
        self.rule.require_covers(is_source_a)
    }

    fn require_exterior_check(&self, is_source_a: bool) -> bool {
        self.rule.require_exterior_check(is_source_a)
    }

    fn init_dims(&mut self, dim_a: Dimension, dim_b: Dimension) {
        self.state.dim_a = dim_a;
        self.state.dim_b = dim_b;
        self.rule.init_dims(&mut self.state);
    }

    fn init_envelopes(&mut self, env_a: &Envelope, env_b: &Envelope) {
        self.rule.init_envelopes(&mut self.state, env_a, env_b);
    }

    fn update_dimension(&mut self, loc_a: Location, loc_b: Location, dim: Dimension) {
        if dim <= self.state.get(loc_a, loc_b) {
            return;
        }
        self.state.matrix.set(loc_a, loc_b, dim);
        if self.rule.is_determined(&self.state) {
            let value = self.rule.value_im(&self.state);
            self.state.value.set(value);
        }
    }

    fn finish(&mut self) {
        let value = self.rule.value_im(&self.state);
        self.state.value.set(value);
    }

    fn is_known(&self) -> bool {
        self.state.value.is_known()
    }

    fn value(&self) -> bool {
        self.state.value.value()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContainsRule;

impl PredicateRule for ContainsRule {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn require_covers(&self, is_source_a: bool) -> bool {
        is_source_a
    }

    fn require_exterior_check(&self, is_source_a: bool) -> bool {
        !is_source_a
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let compatible = is_dims_compatible_with_covers(state.dim_a, state.dim_b);
        state.value.require(compatible);
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        state.value.require(env_a.covers(env_b));
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        state.intersects_exterior_of(true)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_contains()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WithinRule;

impl PredicateRule for WithinRule {
    fn name(&self) -> &'static str {
        "within"
    }

    fn require_covers(&self, is_source_a: bool) -> bool {
        !is_source_a
    }

    fn require_exterior_check(&self, is_source_a: bool) -> bool {
        is_source_a
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let compatible = is_dims_compatible_with_covers(state.dim_b, state.dim_a);
        state.value.require(compatible);
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        state.value.require(env_b.covers(env_a));
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        state.intersects_exterior_of(false)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_within()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoversRule;

impl PredicateRule for CoversRule {
    fn name(&self) -> &'static str {
        "covers"
    }

    fn require_covers(&self, is_source_a: bool) -> bool {
        is_source_a
    }

    fn require_exterior_check(&self, is_source_a: bool) -> bool {
        !is_source_a
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let compatible = is_dims_compatible_with_covers(state.dim_a, state.dim_b);
        state.value.require(compatible);
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        state.value.require(env_a.covers(env_b));
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        state.intersects_exterior_of(true)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_covers()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoveredByRule;

impl PredicateRule for CoveredByRule {
    fn name(&self) -> &'static str {
        "coveredBy"
    }

    fn require_covers(&self, is_source_a: bool) -> bool {
        !is_source_a
    }

    fn require_exterior_check(&self, is_source_a: bool) -> bool {
        is_source_a
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let compatible = is_dims_compatible_with_covers(state.dim_b, state.dim_a);
        state.value.require(compatible);
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        state.value.require(env_b.covers(env_a));
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        state.intersects_exterior_of(false)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_covered_by()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrossesRule;

impl PredicateRule for CrossesRule {
    fn name(&self) -> &'static str {
        "crosses"
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let both_points_or_areas = (state.dim_a == Dimension::Point && state.dim_b == Dimension::Point)
            || (state.dim_a == Dimension::Area && state.dim_b == Dimension::Area);
        state.value.require(!both_points_or_areas);
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        let (dim_a, dim_b) = (state.dim_a, state.dim_b);
        if dim_a == Dimension::Line && dim_b == Dimension::Line {
            // lines overlapping in a line do not cross
            state.get(Interior, Interior) > Dimension::Point
        } else if dim_a < dim_b {
            state.is_intersects(Interior, Interior) && state.is_intersects(Interior, Exterior)
        } else if dim_a > dim_b {
            state.is_intersects(Interior, Interior) && state.is_intersects(Exterior, Interior)
        } else {
            false
        }
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_crosses(state.dim_a, state.dim_b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsTopoRule;

impl PredicateRule for EqualsTopoRule {
    fn name(&self) -> &'static str {
        "equals"
    }

    // two empty geometries are equal
    fn require_interaction(&self) -> bool {
        false
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let same = state.dim_a == state.dim_b;
        state.value.require(same);
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        state.value.set_if(true, env_a.is_null() && env_b.is_null());
        state.value.require(env_a == env_b);
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        state.is_intersects(Interior, Exterior)
            || state.is_intersects(Boundary, Exterior)
            || state.is_intersects(Exterior, Interior)
            || state.is_intersects(Exterior, Boundary)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_equals(state.dim_a, state.dim_b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapsRule;

impl PredicateRule for OverlapsRule {
    fn name(&self) -> &'static str {
        "overlaps"
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let same = state.dim_a == state.dim_b;
        state.value.require(same);
    }

    fn is_determined(&self, state: &MatrixState) -> bool {
        let exteriors = state.is_intersects(Interior, Exterior) && state.is_intersects(Exterior, Interior);
        match state.dim_a {
            Dimension::Point | Dimension::Area => state.is_intersects(Interior, Interior) && exteriors,
            Dimension::Line => state.get(Interior, Interior) == Dimension::Line && exteriors,
            Dimension::Empty => false,
        }
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_overlaps(state.dim_a, state.dim_b)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TouchesRule;

impl PredicateRule for TouchesRule {
    fn name(&self) -> &'static str {
        "touches"
    }

    fn init_dims(&self, state: &mut MatrixState) {
        let both_points = state.dim_a == Dimension::Point && state.dim_b == Dimension::Point;
        state.value.require(!both_points);
    }

    // touching geometries have disjoint interiors
    fn is_determined(&self, state: &MatrixState) -> bool {
        state.is_intersects(Interior, Interior)
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        state.matrix.is_touches(state.dim_a, state.dim_b)
    }
}

/// PatternRule matches the matrix against a DE-9IM pattern.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pattern: IntersectionPattern,
}

impl PatternRule {
    pub fn new(pattern: IntersectionPattern) -> Self {
        PatternRule { pattern }
    }

    pub fn pattern(&self) -> &IntersectionPattern {
        &self.pattern
    }

    // The pattern needs the geometries to interact when it requires a
    // non-empty intersection of interiors or boundaries.
    fn requires_interaction(&self) -> bool {
        [(Interior, Interior), (Interior, Boundary), (Boundary, Interior), (Boundary, Boundary)]
            .iter()
            .any(|&(a, b)| match self.pattern.get(a, b) {
                PatternCell::NonEmpty => true,
                PatternCell::Exactly(d) => d >= Dimension::Point,
                PatternCell::DontCare => false,
            })
    }
}

impl PredicateRule for PatternRule {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn require_interaction(&self) -> bool {
        self.requires_interaction()
    }

    fn init_envelopes(&self, state: &mut MatrixState, env_a: &Envelope, env_b: &Envelope) {
        let requires_interaction = self.requires_interaction();
        state.value.set_if(false, requires_interaction && env_a.disjoint(env_b));
    }

    // Cells only increase, so the pattern fails for good once a cell
    // exceeds the exact dimension it requires.
    fn is_determined(&self, state: &MatrixState) -> bool {
        Location::ALL.iter().any(|&a| {
            Location::ALL.iter().any(|&b| match self.pattern.get(a, b) {
                PatternCell::Exactly(d) => state.get(a, b) > d,
                _ => false,
            })
        })
    }

    fn value_im(&self, state: &MatrixState) -> bool {
        self.pattern.matches(&state.matrix)
    }
}

/// MatrixRule computes the full matrix and decides nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixRule;

impl PredicateRule for MatrixRule {
    fn name(&self) -> &'static str {
        "relate"
    }

    fn require_interaction(&self) -> bool {
        false
    }

    fn is_determined(&self, _state: &MatrixState) -> bool {
        false
    }

    fn value_im(&self, _state: &MatrixState) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope {
        Envelope::from_segment(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
    }

    #[test]
    fn test_value_is_set_once() {
        let mut v = PredicateValue::default();
        assert!(!v.is_known());
        v.require(true);
        assert!(!v.is_known());
        v.set_if(true, true);
        v.set(false);
        v.require(false);
        assert!(v.is_known());
        assert!(v.value());
    }

    #[test]
    fn test_disjoint_envelopes() {
        let mut p = DisjointPredicate::default();
        p.init_envelopes(&env(0., 0., 1., 1.), &env(2., 2., 3., 3.));
        assert!(p.is_known());
        assert!(p.value());

        let mut p = IntersectsPredicate::default();
        p.init_envelopes(&env(0., 0., 1., 1.), &env(2., 2., 3., 3.));
        assert!(p.is_known());
        assert!(!p.value());
    }

    #[test]
    fn test_intersects_ignores_exterior() {
        let mut p = IntersectsPredicate::default();
        p.update_dimension(Interior, Exterior, Dimension::Area);
        assert!(!p.is_known());
        p.update_dimension(Boundary, Boundary, Dimension::Point);
        assert!(p.value());
    }

    #[test]
    fn test_contains_dims_and_early_exit() {
        let mut p = IMPredicate::new(ContainsRule);
        p.init_dims(Dimension::Line, Dimension::Area);
        assert!(p.is_known());
        assert!(!p.value());

        let mut p = IMPredicate::new(ContainsRule);
        p.init_dims(Dimension::Area, Dimension::Point);
        p.update_dimension(Interior, Interior, Dimension::Point);
        assert!(!p.is_known());
        p.update_dimension(Exterior, Interior, Dimension::Point);
        assert!(p.is_known());
        assert!(!p.value());

        // points may be covered by a zero-length line
        assert!(is_dims_compatible_with_covers(Dimension::Point, Dimension::Line));
        assert!(!is_dims_compatible_with_covers(Dimension::Line, Dimension::Area));
    }

    #[test]
    fn test_crosses_lines() {
        let mut p = IMPredicate::new(CrossesRule);
        p.init_dims(Dimension::Line, Dimension::Line);
        p.update_dimension(Interior, Interior, Dimension::Point);
        assert!(!p.is_known());
        p.finish();
        assert!(p.value());

        let mut p = IMPredicate::new(CrossesRule);
        p.init_dims(Dimension::Area, Dimension::Area);
        assert!(p.is_known());
        assert!(!p.value());
    }

    #[test]
    fn test_equals_empty() {
        let mut p = IMPredicate::new(EqualsTopoRule);
        p.init_dims(Dimension::Empty, Dimension::Empty);
        p.init_envelopes(&Envelope::null(), &Envelope::null());
        assert!(p.is_known());
        assert!(p.value());
    }

    #[test]
    fn test_pattern_early_exit() {
        let mut p = IMPredicate::new(PatternRule::new("T*F**F***".parse().unwrap()));
        assert!(p.require_interaction());
        p.update_dimension(Interior, Interior, Dimension::Area);
        assert!(!p.is_known());
        p.update_dimension(Interior, Exterior, Dimension::Point);
        assert!(p.is_known());
        assert!(!p.value());

        let p = IMPredicate::new(PatternRule::new("FF*FF****".parse().unwrap()));
        assert!(!p.require_interaction());
    }

    #[test]
    fn test_overlaps_and_touches() {
        let mut p = IMPredicate::new(OverlapsRule);
        p.init_dims(Dimension::Area, Dimension::Area);
        p.update_dimension(Interior, Interior, Dimension::Area);
        p.update_dimension(Interior, Exterior, Dimension::Area);
        assert!(!p.is_known());
        p.update_dimension(Exterior, Interior, Dimension::Area);
        assert!(p.is_known());
        assert!(p.value());

        let mut p = IMPredicate::new(TouchesRule);
        p.init_dims(Dimension::Area, Dimension::Area);
        p.update_dimension(Boundary, Boundary, Dimension::Line);
        p.finish();
        assert!(p.value());
        assert_eq!(p.matrix().to_string(), "FFFF1FFF2");
    }
}
