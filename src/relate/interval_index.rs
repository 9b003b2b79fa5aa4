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

// Number of children grouped under each internal node.
const NODE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn intersects(&self, min: f64, max: f64) -> bool {
        !(self.min > max || self.max < min)
    }
}

/// IntervalIndex is a static, packed tree of 1-dimensional intervals.
///
/// The index is built once from all of its items. Leaves are sorted by
/// interval midpoint and each level above groups NODE_CAPACITY nodes of the
/// level below, so queries only descend into subtrees whose bounds overlap
/// the query interval.
#[derive(Debug, Clone)]
pub struct IntervalIndex<T> {
    items: Vec<T>,
    // levels[0] holds the leaf bounds, in the same order as items.
    levels: Vec<Vec<Bounds>>,
}

impl<T> IntervalIndex<T> {
    /// Builds an index over the given (min, max, item) triples.
    pub fn new(entries: Vec<(f64, f64, T)>) -> Self {
        let mut entries = entries;
        entries.sort_by(|a, b| (a.0 + a.1).total_cmp(&(b.0 + b.1)));

        let mut leaves = Vec::with_capacity(entries.len());
        let mut items = Vec::with_capacity(entries.len());
        for (min, max, item) in entries {
            leaves.push(Bounds { min, max });
            items.push(item);
        }

        let mut levels = vec![leaves];
        while let Some(level) = levels.last() {
            if level.len() <= 1 {
                break;
            }
            let parents: Vec<Bounds> = level
                .chunks(NODE_CAPACITY)
                .map(|chunk| Bounds {
                    min: chunk.iter().map(|b| b.min).fold(f64::INFINITY, f64::min),
                    max: chunk.iter().map(|b| b.max).fold(f64::NEG_INFINITY, f64::max),
                })
                .collect();
            levels.push(parents);
        }
        IntervalIndex { items, levels }
    }

    /// Calls visitor for every item whose interval overlaps [min, max].
    pub fn query<F>(&self, min: f64, max: f64, mut visitor: F)
    where
        F: FnMut(&T),
    {
        let top = self.levels.len() - 1;
        let mut stack: Vec<(usize, usize)> = (0..self.levels[top].len()).map(|i| (top, i)).collect();
        while let Some((level, index)) = stack.pop() {
            if !self.levels[level][index].intersects(min, max) {
                continue;
            }
            if level == 0 {
                visitor(&self.items[index]);
                continue;
            }
            let start = index * NODE_CAPACITY;
            let end = (start + NODE_CAPACITY).min(self.levels[level - 1].len());
            stack.extend((start..end).map(|child| (level - 1, child)));
        }
    }
}
