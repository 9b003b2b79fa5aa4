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

pub mod boundary_node_rule;
pub mod dimension_location;
pub mod envelope;
pub mod error;
pub mod intersection_matrix;
pub mod location;

pub mod coordinate;
pub mod line_intersector;
pub mod orientation;
pub mod polygon_node_topology;

mod adjacent_edge_locator;
mod components;
mod interval_index;
mod linear_boundary;
mod point_locator;
mod polygon_node_converter;
mod relate_point_locator;

pub mod node_section;
pub mod node_sections;
pub mod relate_edge;
pub mod relate_node;

pub mod edge_set_intersector;
pub mod relate_geometry;
pub mod relate_segment_string;
pub mod topology_computer;

pub mod predicates;
pub mod topology_predicate;

pub mod relate_ng;
#[cfg(test)]
mod test_util;

pub use boundary_node_rule::BoundaryNodeRule;
pub use error::{RelateError, RelateResult};
pub use intersection_matrix::{IntersectionMatrix, IntersectionPattern};
pub use location::{Dimension, Location};
pub use relate_ng::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps, relate, relate_pattern,
    relate_with, relate_with_boundary_node_rule, touches, within, RelateNG,
};
pub use topology_predicate::{RelatePredicate, TopologyPredicate};
