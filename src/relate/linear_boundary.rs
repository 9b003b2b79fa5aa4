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

use std::collections::BTreeMap;

use geo_types::{Coord, LineString};

use crate::relate::boundary_node_rule::BoundaryNodeRule;
use crate::relate::coordinate::CoordKey;

/// LinearBoundary determines the boundary points of a set of lines under a
/// boundary node rule.
///
/// Every line contributes both of its endpoints, so the endpoint of a closed
/// line is counted twice.
#[derive(Debug, Clone)]
pub struct LinearBoundary {
    vertex_degree: BTreeMap<CoordKey, usize>,
    has_boundary: bool,
    rule: BoundaryNodeRule,
}

impl LinearBoundary {
    pub fn new<'a, I>(lines: I, rule: BoundaryNodeRule) -> LinearBoundary
    where
        I: IntoIterator<Item = &'a LineString<f64>>,
    {
        let mut vertex_degree = BTreeMap::new();
        for line in lines {
            let (first, last) = match (line.0.first(), line.0.last()) {
                (Some(&first), Some(&last)) => (first, last),
                _ => continue,
            };
            *vertex_degree.entry(CoordKey::new(first)).or_insert(0) += 1;
            *vertex_degree.entry(CoordKey::new(last)).or_insert(0) += 1;
        }
        let has_boundary = vertex_degree.values().any(|&degree| rule.is_in_boundary(degree));
        LinearBoundary {
            vertex_degree,
            has_boundary,
            rule,
        }
    }

    pub fn has_boundary(&self) -> bool {
        self.has_boundary
    }

    pub fn is_boundary(&self, p: Coord<f64>) -> bool {
        self.vertex_degree
            .get(&CoordKey::new(p))
            .map_or(false, |&degree| self.rule.is_in_boundary(degree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, line_string};

    #[test]
    fn test_open_line() {
        let line = line_string![(x: 0., y: 0.), (x: 10., y: 0.)];
        let boundary = LinearBoundary::new([&line], BoundaryNodeRule::Mod2);
        assert!(boundary.has_boundary());
        assert!(boundary.is_boundary(coord! { x: 0., y: 0. }));
        assert!(boundary.is_boundary(coord! { x: 10., y: 0. }));
        assert!(!boundary.is_boundary(coord! { x: 5., y: 0. }));
    }

    #[test]
    fn test_closed_line() {
        let ring = line_string![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 0.)];
        let mod2 = LinearBoundary::new([&ring], BoundaryNodeRule::Mod2);
        assert!(!mod2.has_boundary());
        assert!(!mod2.is_boundary(coord! { x: 0., y: 0. }));

        let endpoint = LinearBoundary::new([&ring], BoundaryNodeRule::Endpoint);
        assert!(endpoint.has_boundary());
        assert!(endpoint.is_boundary(coord! { x: 0., y: 0. }));
    }

    #[test]
    fn test_shared_endpoint() {
        let a = line_string![(x: 0., y: 0.), (x: 5., y: 0.)];
        let b = line_string![(x: 5., y: 0.), (x: 5., y: 5.)];
        let mod2 = LinearBoundary::new([&a, &b], BoundaryNodeRule::Mod2);
        assert!(!mod2.is_boundary(coord! { x: 5., y: 0. }));
        assert!(mod2.is_boundary(coord! { x: 0., y: 0. }));

        let multivalent = LinearBoundary::new([&a, &b], BoundaryNodeRule::MultivalentEndpoint);
        assert!(multivalent.is_boundary(coord! { x: 5., y: 0. }));
        assert!(!multivalent.is_boundary(coord! { x: 0., y: 0. }));
    }
}
