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

use thiserror::Error;

/// RelateError represents errors that can occur while evaluating a
/// topological relationship.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelateError {
    /// A DE-9IM pattern or matrix string could not be parsed
    #[error("invalid DE-9IM pattern '{0}'")]
    InvalidPattern(String),
    /// The named boundary node rule is not known
    #[error("unsupported boundary node rule '{0}'")]
    UnsupportedBoundaryNodeRule(String),
    /// A dimension outside the expected range reached the topology computer
    #[error("unexpected dimension: {0}")]
    UnexpectedDimension(String),
    /// Node section data is inconsistent with the node it was added to
    #[error("invalid node section: {0}")]
    InvalidNodeSection(String),
}

/// Result type for relate operations
pub type RelateResult<T> = Result<T, RelateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = RelateError::InvalidPattern("T*F".to_string());
        assert_eq!(e.to_string(), "invalid DE-9IM pattern 'T*F'");

        let e = RelateError::UnsupportedBoundaryNodeRule("odd".to_string());
        assert_eq!(e.to_string(), "unsupported boundary node rule 'odd'");
    }
}
