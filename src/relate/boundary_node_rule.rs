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

use std::fmt;
use std::str::FromStr;

use crate::relate::error::RelateError;

/// BoundaryNodeRule decides whether a node where line endpoints meet lies in
/// the boundary of a lineal geometry, given the number of endpoints
/// incident on it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryNodeRule {
    /// The OGC SFS rule: a node is in the boundary when an odd number of
    /// endpoints meet there. Closed rings have no boundary.
    Mod2,
    /// Every endpoint is in the boundary, including those of closed lines.
    Endpoint,
    /// Only nodes with more than one incident endpoint are in the boundary.
    MultivalentEndpoint,
    /// Only nodes with exactly one incident endpoint are in the boundary.
    MonovalentEndpoint,
}

impl BoundaryNodeRule {
    pub fn is_in_boundary(self, boundary_count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => boundary_count % 2 == 1,
            BoundaryNodeRule::Endpoint => boundary_count > 0,
            BoundaryNodeRule::MultivalentEndpoint => boundary_count > 1,
            BoundaryNodeRule::MonovalentEndpoint => boundary_count == 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BoundaryNodeRule::Mod2 => "mod2",
            BoundaryNodeRule::Endpoint => "endpoint",
            BoundaryNodeRule::MultivalentEndpoint => "multivalent-endpoint",
            BoundaryNodeRule::MonovalentEndpoint => "monovalent-endpoint",
        }
    }
}

impl Default for BoundaryNodeRule {
    fn default() -> Self {
        BoundaryNodeRule::Mod2
    }
}

impl fmt::Display for BoundaryNodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BoundaryNodeRule {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "mod2" | "ogc" | "ogc-sfs" => Ok(BoundaryNodeRule::Mod2),
            "endpoint" => Ok(BoundaryNodeRule::Endpoint),
            "multivalent-endpoint" => Ok(BoundaryNodeRule::MultivalentEndpoint),
            "monovalent-endpoint" => Ok(BoundaryNodeRule::MonovalentEndpoint),
            _ => Err(RelateError::UnsupportedBoundaryNodeRule(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_boundary() {
        let counts = [0, 1, 2, 3];
        let mod2: Vec<bool> = counts.iter().map(|&c| BoundaryNodeRule::Mod2.is_in_boundary(c)).collect();
        assert_eq!(mod2, vec![false, true, false, true]);

        let endpoint: Vec<bool> =
            counts.iter().map(|&c| BoundaryNodeRule::Endpoint.is_in_boundary(c)).collect();
        assert_eq!(endpoint, vec![false, true, true, true]);

        let multi: Vec<bool> = counts
            .iter()
            .map(|&c| BoundaryNodeRule::MultivalentEndpoint.is_in_boundary(c))
            .collect();
        assert_eq!(multi, vec![false, false, true, true]);

        let mono: Vec<bool> = counts
            .iter()
            .map(|&c| BoundaryNodeRule::MonovalentEndpoint.is_in_boundary(c))
            .collect();
        assert_eq!(mono, vec![false, true, false, false]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Mod2".parse::<BoundaryNodeRule>().unwrap(), BoundaryNodeRule::Mod2);
        assert_eq!(
            "multivalent_endpoint".parse::<BoundaryNodeRule>().unwrap(),
            BoundaryNodeRule::MultivalentEndpoint
        );
        for rule in [
            BoundaryNodeRule::Mod2,
            BoundaryNodeRule::Endpoint,
            BoundaryNodeRule::MultivalentEndpoint,
            BoundaryNodeRule::MonovalentEndpoint,
        ] {
            assert_eq!(rule.to_string().parse::<BoundaryNodeRule>().unwrap(), rule);
        }
        assert_eq!(
            "odd".parse::<BoundaryNodeRule>(),
            Err(RelateError::UnsupportedBoundaryNodeRule("odd".to_string()))
        );
    }
}
