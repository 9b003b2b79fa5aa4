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

use crate::relate::error::{RelateError, RelateResult};
use crate::relate::location::{Dimension, Location};

/// IntersectionMatrix is a Dimensionally Extended Nine-Intersection Model
/// (DE-9IM) matrix. Rows are the locations of geometry A, columns the
/// locations of geometry B, and each cell records the dimension of the
/// intersection of the two point sets.
///
/// The string form lists the cells row by row, e.g. `"FF2FF1212"`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

// A cell counts as "true" when it records a non-empty intersection.
fn is_true(d: Dimension) -> bool {
    d != Dimension::Empty
}

impl IntersectionMatrix {
    /// Returns a matrix with every cell set to `F`.
    pub fn new() -> Self {
        IntersectionMatrix {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }

    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    pub fn set(&mut self, a: Location, b: Location, dim: Dimension) {
        self.cells[a.index()][b.index()] = dim;
    }

    /// Raises the cell to at least `dim`. Cells never decrease.
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if *cell < dim {
            *cell = dim;
        }
    }

    /// Returns the matrix of the relation with the arguments swapped.
    pub fn transpose(&self) -> IntersectionMatrix {
        let mut t = IntersectionMatrix::new();
        for a in Location::ALL {
            for b in Location::ALL {
                t.set(b, a, self.get(a, b));
            }
        }
        t
    }

    pub fn is_disjoint(&self) -> bool {
        use Location::*;
        !is_true(self.get(Interior, Interior))
            && !is_true(self.get(Interior, Boundary))
            && !is_true(self.get(Boundary, Interior))
            && !is_true(self.get(Boundary, Boundary))
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// Tests for the touches relation, which depends on the dimensions of
    /// the input geometries. Two points never touch.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        if dim_a > dim_b {
            return self.is_touches(dim_b, dim_a);
        }
        let applies = matches!(
            (dim_a, dim_b),
            (Dimension::Area, Dimension::Area)
                | (Dimension::Line, Dimension::Line)
                | (Dimension::Line, Dimension::Area)
                | (Dimension::Point, Dimension::Area)
                | (Dimension::Point, Dimension::Line)
        );
        if !applies {
            return false;
        }
        !is_true(self.get(Interior, Interior))
            && (is_true(self.get(Interior, Boundary))
                || is_true(self.get(Boundary, Interior))
                || is_true(self.get(Boundary, Boundary)))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::*;
        use Location::*;
        match (dim_a, dim_b) {
            (Point, Line) | (Point, Area) | (Line, Area) => {
                is_true(self.get(Interior, Interior)) && is_true(self.get(Interior, Exterior))
            }
            (Line, Point) | (Area, Point) | (Area, Line) => {
                is_true(self.get(Interior, Interior)) && is_true(self.get(Exterior, Interior))
            }
            (Line, Line) => self.get(Interior, Interior) == Point,
            _ => false,
        }
    }

    pub fn is_within(&self) -> bool {
        use Location::*;
        is_true(self.get(Interior, Interior))
            && !is_true(self.get(Interior, Exterior))
            && !is_true(self.get(Boundary, Exterior))
    }

    pub fn is_contains(&self) -> bool {
        use Location::*;
        is_true(self.get(Interior, Interior))
            && !is_true(self.get(Exterior, Interior))
            && !is_true(self.get(Exterior, Boundary))
    }

    pub fn is_covers(&self) -> bool {
        use Location::*;
        let has_point_in_common = is_true(self.get(Interior, Interior))
            || is_true(self.get(Interior, Boundary))
            || is_true(self.get(Boundary, Interior))
            || is_true(self.get(Boundary, Boundary));
        has_point_in_common
            && !is_true(self.get(Exterior, Interior))
            && !is_true(self.get(Exterior, Boundary))
    }

    pub fn is_covered_by(&self) -> bool {
        use Location::*;
        let has_point_in_common = is_true(self.get(Interior, Interior))
            || is_true(self.get(Interior, Boundary))
            || is_true(self.get(Boundary, Interior))
            || is_true(self.get(Boundary, Boundary));
        has_point_in_common
            && !is_true(self.get(Interior, Exterior))
            && !is_true(self.get(Boundary, Exterior))
    }

    /// Tests for topological equality. Geometries of different dimension
    /// are never equal.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        if dim_a != dim_b {
            return false;
        }
        is_true(self.get(Interior, Interior))
            && !is_true(self.get(Interior, Exterior))
            && !is_true(self.get(Boundary, Exterior))
            && !is_true(self.get(Exterior, Interior))
            && !is_true(self.get(Exterior, Boundary))
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        let ends = is_true(self.get(Interior, Exterior)) && is_true(self.get(Exterior, Interior));
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Area, Dimension::Area) => {
                is_true(self.get(Interior, Interior)) && ends
            }
            (Dimension::Line, Dimension::Line) => {
                self.get(Interior, Interior) == Dimension::Line && ends
            }
            _ => false,
        }
    }

    /// Tests whether the matrix matches a DE-9IM pattern string.
    pub fn matches(&self, pattern: &str) -> RelateResult<bool> {
        let pattern: IntersectionPattern = pattern.parse()?;
        Ok(pattern.matches(self))
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntersectionMatrix({})", self)
    }
}

impl FromStr for IntersectionMatrix {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(RelateError::InvalidPattern(s.to_string()));
        }
        let mut m = IntersectionMatrix::new();
        for (i, c) in symbols.into_iter().enumerate() {
            let dim = Dimension::from_symbol(c)
                .ok_or_else(|| RelateError::InvalidPattern(s.to_string()))?;
            m.cells[i / 3][i % 3] = dim;
        }
        Ok(m)
    }
}

/// PatternCell is one required value of a DE-9IM pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCell {
    /// `*`, any value matches
    DontCare,
    /// `T`, any non-empty intersection matches
    NonEmpty,
    /// `F`, `0`, `1` or `2`, only the given dimension matches
    Exactly(Dimension),
}

impl PatternCell {
    pub fn matches(self, dim: Dimension) -> bool {
        match self {
            PatternCell::DontCare => true,
            PatternCell::NonEmpty => is_true(dim),
            PatternCell::Exactly(d) => d == dim,
        }
    }
}

/// IntersectionPattern is a parsed DE-9IM pattern such as `"T*F**F***"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionPattern {
    cells: [[PatternCell; 3]; 3],
}

impl IntersectionPattern {
    pub fn get(&self, a: Location, b: Location) -> PatternCell {
        self.cells[a.index()][b.index()]
    }

    pub fn matches(&self, m: &IntersectionMatrix) -> bool {
        Location::ALL.iter().all(|&a| {
            Location::ALL
                .iter()
                .all(|&b| self.get(a, b).matches(m.get(a, b)))
        })
    }
}

impl FromStr for IntersectionPattern {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != 9 {
            return Err(RelateError::InvalidPattern(s.to_string()));
        }
        let mut cells = [[PatternCell::DontCare; 3]; 3];
        for (i, c) in symbols.into_iter().enumerate() {
            cells[i / 3][i % 3] = match c {
                '*' => PatternCell::DontCare,
                'T' | 't' => PatternCell::NonEmpty,
                _ => PatternCell::Exactly(
                    Dimension::from_symbol(c)
                        .ok_or_else(|| RelateError::InvalidPattern(s.to_string()))?,
                ),
            };
        }
        Ok(IntersectionPattern { cells })
    }
}

impl fmt::Display for IntersectionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    PatternCell::DontCare => '*',
                    PatternCell::NonEmpty => 'T',
                    PatternCell::Exactly(d) => d.symbol(),
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
