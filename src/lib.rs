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

//! DE-9IM topological relationship evaluation for planar `geo-types`
//! geometries.
//!
//! The entry point is [`relate::RelateNG`], which evaluates named
//! predicates, DE-9IM patterns and full intersection matrices. The free
//! functions in [`relate`] cover one-off queries.

pub mod relate;

pub use relate::{
    relate, relate_pattern, BoundaryNodeRule, Dimension, IntersectionMatrix, Location, RelateError, RelateNG,
    RelatePredicate, RelateResult, TopologyPredicate,
};
