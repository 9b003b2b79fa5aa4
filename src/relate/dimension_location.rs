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

use crate::relate::location::{Dimension, Location};

/// DimensionLocation packs the location of a point together with the
/// dimension of the geometry element it was located on.
///
/// The code is `100 + 10 * dim + loc` for points located on an element, and
/// the plain exterior location index otherwise. Exterior points carry no
/// element dimension; callers substitute the dimension of the whole target
/// geometry with `dimension_or`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimensionLocation(u8);

impl DimensionLocation {
    pub const EXTERIOR: DimensionLocation = DimensionLocation(2);
    pub const POINT_INTERIOR: DimensionLocation = DimensionLocation(103);
    pub const LINE_INTERIOR: DimensionLocation = DimensionLocation(110);
    pub const LINE_BOUNDARY: DimensionLocation = DimensionLocation(111);
    pub const AREA_INTERIOR: DimensionLocation = DimensionLocation(120);
    pub const AREA_BOUNDARY: DimensionLocation = DimensionLocation(121);

    // Points have no boundary, so a point location is interior or exterior.
    pub fn point(loc: Location) -> DimensionLocation {
        match loc {
            Location::Interior => DimensionLocation::POINT_INTERIOR,
            _ => DimensionLocation::EXTERIOR,
        }
    }

    pub fn line(loc: Location) -> DimensionLocation {
        match loc {
            Location::Interior => DimensionLocation::LINE_INTERIOR,
            Location::Boundary => DimensionLocation::LINE_BOUNDARY,
            Location::Exterior => DimensionLocation::EXTERIOR,
        }
    }

    pub fn area(loc: Location) -> DimensionLocation {
        match loc {
            Location::Interior => DimensionLocation::AREA_INTERIOR,
            Location::Boundary => DimensionLocation::AREA_BOUNDARY,
            Location::Exterior => DimensionLocation::EXTERIOR,
        }
    }

    pub fn location(self) -> Location {
        match self {
            DimensionLocation::POINT_INTERIOR
            | DimensionLocation::LINE_INTERIOR
            | DimensionLocation::AREA_INTERIOR => Location::Interior,
            DimensionLocation::LINE_BOUNDARY | DimensionLocation::AREA_BOUNDARY => {
                Location::Boundary
            }
            _ => Location::Exterior,
        }
    }

    /// The dimension of the element the point was located on, or `Empty`
    /// for exterior locations.
    pub fn dimension(self) -> Dimension {
        match self {
            DimensionLocation::POINT_INTERIOR => Dimension::Point,
            DimensionLocation::LINE_INTERIOR | DimensionLocation::LINE_BOUNDARY => Dimension::Line,
            DimensionLocation::AREA_INTERIOR | DimensionLocation::AREA_BOUNDARY => Dimension::Area,
            _ => Dimension::Empty,
        }
    }

    /// Like `dimension`, but reports `exterior_dim` for exterior locations.
    pub fn dimension_or(self, exterior_dim: Dimension) -> Dimension {
        if self == DimensionLocation::EXTERIOR {
            return exterior_dim;
        }
        self.dimension()
    }

    pub fn code(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for DimensionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DimensionLocation({}:{})", self.dimension(), self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose() {
        let dl = DimensionLocation::LINE_BOUNDARY;
        assert_eq!(dl.location(), Location::Boundary);
        assert_eq!(dl.dimension(), Dimension::Line);
        assert_eq!(dl.code(), 111);

        let dl = DimensionLocation::area(Location::Interior);
        assert_eq!(dl, DimensionLocation::AREA_INTERIOR);
        assert_eq!(dl.dimension_or(Dimension::Point), Dimension::Area);
    }

    #[test]
    fn test_exterior_dimension() {
        let dl = DimensionLocation::line(Location::Exterior);
        assert_eq!(dl, DimensionLocation::EXTERIOR);
        assert_eq!(dl.location(), Location::Exterior);
        assert_eq!(dl.dimension(), Dimension::Empty);
        assert_eq!(dl.dimension_or(Dimension::Area), Dimension::Area);
    }

    #[test]
    fn test_point_boundary_is_exterior() {
        assert_eq!(DimensionLocation::point(Location::Boundary), DimensionLocation::EXTERIOR);
        assert_eq!(DimensionLocation::point(Location::Interior).dimension(), Dimension::Point);
    }
}
