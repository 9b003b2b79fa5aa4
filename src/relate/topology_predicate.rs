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
use crate::relate::error::RelateResult;
use crate::relate::intersection_matrix::IntersectionMatrix;
use crate::relate::location::{Dimension, Location};
use crate::relate::predicates::{
    ContainsRule, CoveredByRule, CoversRule, CrossesRule, DisjointPredicate, EqualsTopoRule, IMPredicate,
    IntersectsPredicate, MatrixRule, OverlapsRule, PatternRule, TouchesRule, WithinRule,
};

/// TopologyPredicate is a spatial relationship evaluated incrementally as
/// the topology of two geometries is discovered.
///
/// The evaluator first calls `init_dims` and `init_envelopes`, then reports
/// every intersection found with `update_dimension`, and calls `finish`
/// when nothing is left to discover. Evaluation stops as soon as
/// `is_known` returns true.
#[enum_delegate::register]
pub trait TopologyPredicate {
    fn name(&self) -> &'static str;

    /// Reports whether the predicate needs self-intersections of the
    /// inputs to be computed. Predicates that only test for any
    /// intersection do not.
    fn require_self_noding(&self) -> bool {
        true
    }

    /// Reports whether the predicate can only be true when the inputs
    /// interact, so that disjoint envelopes decide it.
    fn require_interaction(&self) -> bool {
        true
    }

    /// Reports whether the predicate can only be true when the envelope of
    /// the given input covers the envelope of the other.
    fn require_covers(&self, _is_source_a: bool) -> bool {
        false
    }

    /// Reports whether the points of the given input must be tested for
    /// lying in the exterior of the other.
    fn require_exterior_check(&self, _is_source_a: bool) -> bool {
        true
    }

    fn init_dims(&mut self, _dim_a: Dimension, _dim_b: Dimension) {}

    fn init_envelopes(&mut self, _env_a: &Envelope, _env_b: &Envelope) {}

    /// Records that the `loc_a` location of A and the `loc_b` location of
    /// B intersect with dimension `dim`.
    fn update_dimension(&mut self, loc_a: Location, loc_b: Location, dim: Dimension);

    fn finish(&mut self);

    fn is_known(&self) -> bool;

    fn value(&self) -> bool;
}

/// RelatePredicate is one of the supported relationships.
#[enum_delegate::implement(TopologyPredicate)]
#[derive(Debug, Clone)]
pub enum RelatePredicate {
    Intersects(IntersectsPredicate),
    Disjoint(DisjointPredicate),
    Contains(IMPredicate<ContainsRule>),
    Within(IMPredicate<WithinRule>),
    Covers(IMPredicate<CoversRule>),
    CoveredBy(IMPredicate<CoveredByRule>),
    Crosses(IMPredicate<CrossesRule>),
    EqualsTopo(IMPredicate<EqualsTopoRule>),
    Overlaps(IMPredicate<OverlapsRule>),
    Touches(IMPredicate<TouchesRule>),
    Matches(IMPredicate<PatternRule>),
    Matrix(IMPredicate<MatrixRule>),
}

impl RelatePredicate {
    pub fn intersects() -> Self {
        RelatePredicate::Intersects(IntersectsPredicate::default())
    }

    pub fn disjoint() -> Self {
        RelatePredicate::Disjoint(DisjointPredicate::default())
    }

    pub fn contains() -> Self {
        RelatePredicate::Contains(IMPredicate::new(ContainsRule))
    }

    pub fn within() -> Self {
        RelatePredicate::Within(IMPredicate::new(WithinRule))
    }

    pub fn covers() -> Self {
        RelatePredicate::Covers(IMPredicate::new(CoversRule))
    }

    pub fn covered_by() -> Self {
        RelatePredicate::CoveredBy(IMPredicate::new(CoveredByRule))
    }

    pub fn crosses() -> Self {
        RelatePredicate::Crosses(IMPredicate::new(CrossesRule))
    }

    pub fn equals_topo() -> Self {
        RelatePredicate::EqualsTopo(IMPredicate::new(EqualsTopoRule))
    }

    pub fn overlaps() -> Self {
        RelatePredicate::Overlaps(IMPredicate::new(OverlapsRule))
    }

    pub fn touches() -> Self {
        RelatePredicate::Touches(IMPredicate::new(TouchesRule))
    }

    /// A predicate testing the matrix against a DE-9IM pattern such as
    /// `"T*F**FFF*"`.
    pub fn matches(pattern: &str) -> RelateResult<Self> {
        Ok(RelatePredicate::Matches(IMPredicate::new(PatternRule::new(pattern.parse()?))))
    }

    /// A predicate computing the full intersection matrix. It is never
    /// known before `finish`.
    pub fn matrix() -> Self {
        RelatePredicate::Matrix(IMPredicate::new(MatrixRule))
    }

    /// The intersection matrix built so far, for predicates that build
    /// one.
    pub fn intersection_matrix(&self) -> Option<IntersectionMatrix> {
        match self {
            RelatePredicate::Intersects(_) | RelatePredicate::Disjoint(_) => None,
            RelatePredicate::Contains(p) => Some(p.matrix()),
            RelatePredicate::Within(p) => Some(p.matrix()),
            RelatePredicate::Covers(p) => Some(p.matrix()),
            RelatePredicate::CoveredBy(p) => Some(p.matrix()),
            RelatePredicate::Crosses(p) => Some(p.matrix()),
            RelatePredicate::EqualsTopo(p) => Some(p.matrix()),
            RelatePredicate::Overlaps(p) => Some(p.matrix()),
            RelatePredicate::Touches(p) => Some(p.matrix()),
            RelatePredicate::Matches(p) => Some(p.matrix()),
            RelatePredicate::Matrix(p) => Some(p.matrix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::*;

    #[test]
    fn test_dispatch() {
        let mut p = RelatePredicate::intersects();
        assert_eq!(p.name(), "intersects");
        assert!(!p.require_self_noding());
        assert!(!p.is_known());
        p.update_dimension(Interior, Boundary, Dimension::Point);
        assert!(p.is_known());
        assert!(p.value());
        assert_eq!(p.intersection_matrix(), None);
    }

    #[test]
    fn test_matrix_never_known_early() {
        let mut p = RelatePredicate::matrix();
        assert!(!p.require_interaction());
        for a in Location::ALL {
            for b in Location::ALL {
                p.update_dimension(a, b, Dimension::Area);
                assert!(!p.is_known());
            }
        }
        p.finish();
        assert!(p.is_known());
        assert_eq!(p.intersection_matrix().map(|m| m.to_string()), Some("222222222".to_string()));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RelatePredicate::matches("T*F").is_err());
        assert!(RelatePredicate::matches("T*F**FFF*").is_ok());
    }
}
