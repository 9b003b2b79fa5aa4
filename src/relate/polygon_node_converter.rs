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

//! Conversion of the ring sections of one polygon at a node into sections
//! that each bound a single wedge of the polygon interior.
//!
//! In a valid polygon a shell may touch itself at a node, and holes may
//! touch the shell or each other. Around the node the sections then
//! alternate between the shell and the holes, and the interior consists of
//! the wedges between consecutive sections. Each wedge becomes one shell
//! section running from the incoming arm of one section to the outgoing arm
//! of the next.

use crate::relate::node_section::NodeSection;

/// Converts the sections of a single polygon at a node into sections with
/// disjoint interiors. The sections must all belong to the same polygon.
pub fn convert(mut sections: Vec<NodeSection>) -> Vec<NodeSection> {
    sections.sort_by(|a, b| a.compare_edge_angle(b));
    let sections = extract_unique(sections);
    if sections.len() <= 1 {
        return sections;
    }

    let shell_index = match sections.iter().position(|s| s.is_shell()) {
        Some(i) => i,
        None => return convert_holes(&sections),
    };

    // there may be more than one shell section, each starting a run of holes
    let mut converted = Vec::with_capacity(sections.len());
    let mut next_shell = shell_index;
    loop {
        next_shell = convert_shell_and_holes(&sections, next_shell, &mut converted);
        if next_shell == shell_index {
            break;
        }
    }
    converted
}

fn next(sections: &[NodeSection], i: usize) -> usize {
    if i + 1 >= sections.len() {
        0
    } else {
        i + 1
    }
}

// convert_shell_and_holes emits the wedges from one shell section through
// the holes that follow it, and returns the index of the next shell section.
fn convert_shell_and_holes(sections: &[NodeSection], shell_index: usize, converted: &mut Vec<NodeSection>) -> usize {
    let shell = &sections[shell_index];
    let mut in_vertex = shell.v0();
    let mut i = next(sections, shell_index);
    while !sections[i].is_shell() {
        let hole = &sections[i];
        converted.push(shell.with_vertices(in_vertex, hole.v1()));
        in_vertex = hole.v0();
        i = next(sections, i);
    }
    converted.push(shell.with_vertices(in_vertex, shell.v1()));
    i
}

// With no shell present, the holes alone bound the wedges between them.
fn convert_holes(sections: &[NodeSection]) -> Vec<NodeSection> {
    let template = &sections[0];
    (0..sections.len())
        .map(|i| {
            let in_vertex = sections[i].v0();
            let out_vertex = sections[next(sections, i)].v1();
            template.with_vertices(in_vertex, out_vertex)
        })
        .collect()
}

fn extract_unique(sections: Vec<NodeSection>) -> Vec<NodeSection> {
    let mut unique: Vec<NodeSection> = Vec::with_capacity(sections.len());
    for ns in sections {
        if unique.last() != Some(&ns) {
            unique.push(ns);
        }
    }
    unique
}
