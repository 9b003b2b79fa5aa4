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

/// Location is the topological location of a point relative to a geometry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// The point lies in the interior of the geometry
    Interior,
    /// The point lies on the boundary of the geometry
    Boundary,
    /// The point lies outside the geometry
    Exterior,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];

    /// Index of the location as a row or column of an intersection matrix.
    pub fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Dimension is the topological dimension of a geometry or of the
/// intersection recorded in a DE-9IM cell. `Empty` is the dimension of the
/// empty set, written as `F` in matrix strings.
///
/// Dimensions are ordered, so the maximum of two dimensions is the
/// dimension of their union.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Empty,
    Point,
    Line,
    Area,
}

impl Dimension {
    /// The matrix symbol of this dimension.
    pub fn symbol(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Point => '0',
            Dimension::Line => '1',
            Dimension::Area => '2',
        }
    }

    /// Parses a dimension symbol. `T` has no single dimension so it is not
    /// accepted here.
    pub fn from_symbol(c: char) -> Option<Dimension> {
        match c {
            'F' | 'f' => Some(Dimension::Empty),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Line),
            '2' => Some(Dimension::Area),
            _ => None,
        }
    }

    /// Numeric value in the conventional -1..=2 range.
    pub fn value(self) -> i32 {
        match self {
            Dimension::Empty => -1,
            Dimension::Point => 0,
            Dimension::Line => 1,
            Dimension::Area => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Dimension::Empty
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Empty
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_order() {
        assert!(Dimension::Empty < Dimension::Point);
        assert!(Dimension::Point < Dimension::Line);
        assert!(Dimension::Line < Dimension::Area);
        assert_eq!(Dimension::Line.max(Dimension::Point), Dimension::Line);
    }

    #[test]
    fn test_dimension_symbols() {
        for d in [Dimension::Empty, Dimension::Point, Dimension::Line, Dimension::Area] {
            assert_eq!(Dimension::from_symbol(d.symbol()), Some(d));
        }
        assert_eq!(Dimension::from_symbol('T'), None);
        assert_eq!(Dimension::Empty.value(), -1);
    }

    #[test]
    fn test_location_index() {
        let idx: Vec<usize> = Location::ALL.iter().map(|l| l.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(Location::Boundary.to_string(), "b");
    }
}
