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

use crate::relate::envelope::Envelope;
use crate::relate::error::RelateResult;
use crate::relate::line_intersector::intersect_segments;
use crate::relate::relate_segment_string::RelateSegmentString;
use crate::relate::topology_computer::TopologyComputer;
use crate::relate::topology_predicate::TopologyPredicate;

/// SegmentIntersector receives the candidate segment pairs found by an
/// EdgeSetIntersector.
pub trait SegmentIntersector {
    fn process_intersections(
        &mut self,
        ss0: &RelateSegmentString,
        seg_index0: usize,
        ss1: &RelateSegmentString,
        seg_index1: usize,
    ) -> RelateResult<()>;

    /// Reports whether no further pairs need processing.
    fn is_done(&self) -> bool;
}

/// EdgeSegmentIntersector computes the intersections of segment pairs and
/// reports them to a TopologyComputer as node sections.
pub struct EdgeSegmentIntersector<'c, 'g, P> {
    computer: &'c mut TopologyComputer<'g, P>,
}

impl<'c, 'g, P: TopologyPredicate> EdgeSegmentIntersector<'c, 'g, P> {
    pub fn new(computer: &'c mut TopologyComputer<'g, P>) -> Self {
        EdgeSegmentIntersector { computer }
    }

    // ss_a is the string of A whenever the pair spans both geometries.
    fn add_intersections(
        &mut self,
        ss_a: &RelateSegmentString,
        seg_index_a: usize,
        ss_b: &RelateSegmentString,
        seg_index_b: usize,
    ) -> RelateResult<()> {
        let (a0, a1) = ss_a.segment(seg_index_a);
        let (b0, b1) = ss_b.segment(seg_index_b);
        let intersection = intersect_segments(a0, a1, b0, b1);
        if !intersection.has_intersection() {
            return Ok(());
        }
        for int_pt in intersection.points() {
            // a shared vertex is reported once, by the segments containing it
            if intersection.is_proper()
                || (ss_a.is_containing_segment(seg_index_a, int_pt)
                    && ss_b.is_containing_segment(seg_index_b, int_pt))
            {
                let nsa = ss_a.create_node_section(seg_index_a, int_pt);
                let nsb = ss_b.create_node_section(seg_index_b, int_pt);
                self.computer.add_intersection(nsa, nsb)?;
            }
        }
        Ok(())
    }
}

impl<P: TopologyPredicate> SegmentIntersector for EdgeSegmentIntersector<'_, '_, P> {
    fn process_intersections(
        &mut self,
        ss0: &RelateSegmentString,
        seg_index0: usize,
        ss1: &RelateSegmentString,
        seg_index1: usize,
    ) -> RelateResult<()> {
        // a segment does not intersect itself
        if std::ptr::eq(ss0, ss1) && seg_index0 == seg_index1 {
            return Ok(());
        }
        if ss0.is_a() {
            self.add_intersections(ss0, seg_index0, ss1, seg_index1)
        } else {
            self.add_intersections(ss1, seg_index1, ss0, seg_index0)
        }
    }

    fn is_done(&self) -> bool {
        self.computer.is_result_known()
    }
}

#[derive(Debug, Clone, Copy)]
struct SweepSegment {
    env: Envelope,
    string: usize,
    index: usize,
}

/// EdgeSetIntersector finds the pairs of segments with intersecting
/// envelopes by sweeping the segments in order of their minimum x.
#[derive(Debug)]
pub struct EdgeSetIntersector<'s> {
    strings: Vec<&'s RelateSegmentString>,
    segments: Vec<SweepSegment>,
}

impl<'s> EdgeSetIntersector<'s> {
    /// Indexes the segments of the strings that intersect `env`, or all
    /// segments when there is no envelope.
    pub fn new<I>(strings: I, env: Option<&Envelope>) -> Self
    where
        I: IntoIterator<Item = &'s RelateSegmentString>,
    {
        let strings: Vec<&RelateSegmentString> = strings.into_iter().collect();
        let mut segments = vec![];
        for (string, ss) in strings.iter().enumerate() {
            for index in 0..ss.num_segments() {
                let (p0, p1) = ss.segment(index);
                let seg_env = Envelope::from_segment(p0, p1);
                if env.map_or(true, |e| e.intersects(&seg_env)) {
                    segments.push(SweepSegment {
                        env: seg_env,
                        string,
                        index,
                    });
                }
            }
        }
        segments.sort_by(|a, b| {
            a.env
                .min_x
                .total_cmp(&b.env.min_x)
                .then_with(|| a.string.cmp(&b.string))
                .then_with(|| a.index.cmp(&b.index))
        });
        EdgeSetIntersector { strings, segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Processes every pair of segments with intersecting envelopes,
    /// including pairs from the same string.
    pub fn process_all<S: SegmentIntersector>(&self, intersector: &mut S) -> RelateResult<()> {
        self.sweep(intersector, |_, _| true)
    }

    /// Processes only pairs with one segment from each geometry.
    pub fn process_mutual<S: SegmentIntersector>(&self, intersector: &mut S) -> RelateResult<()> {
        self.sweep(intersector, |ss0, ss1| ss0.is_a() != ss1.is_a())
    }

    fn sweep<S, F>(&self, intersector: &mut S, accept: F) -> RelateResult<()>
    where
        S: SegmentIntersector,
        F: Fn(&RelateSegmentString, &RelateSegmentString) -> bool,
    {
        for (i, s0) in self.segments.iter().enumerate() {
            let ss0 = self.strings[s0.string];
            for s1 in &self.segments[i + 1..] {
                if s1.env.min_x > s0.env.max_x {
                    break;
                }
                let ss1 = self.strings[s1.string];
                if !accept(ss0, ss1) || !s0.env.intersects(&s1.env) {
                    continue;
                }
                intersector.process_intersections(ss0, s0.index, ss1, s1.index)?;
                if intersector.is_done() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{coord, Coord};

    #[derive(Default)]
    struct PairCollector {
        pairs: Vec<(usize, usize, usize, usize)>,
    }

    impl SegmentIntersector for PairCollector {
        fn process_intersections(
            &mut self,
            ss0: &RelateSegmentString,
            seg_index0: usize,
            ss1: &RelateSegmentString,
            seg_index1: usize,
        ) -> RelateResult<()> {
            self.pairs.push((ss0.id(), seg_index0, ss1.id(), seg_index1));
            Ok(())
        }

        fn is_done(&self) -> bool {
            false
        }
    }

    fn c(x: f64, y: f64) -> Coord<f64> {
        coord! { x: x, y: y }
    }

    #[test]
    fn test_mutual_skips_same_geometry() {
        let a = RelateSegmentString::line(vec![c(0., 0.), c(10., 10.), c(0., 10.), c(10., 0.)], true, 0);
        let b = RelateSegmentString::line(vec![c(20., 0.), c(20., 10.)], false, 1);
        let index = EdgeSetIntersector::new(vec![&a, &b], None);
        assert_eq!(index.len(), 4);

        let mut collector = PairCollector::default();
        index.process_mutual(&mut collector).unwrap();
        assert!(collector.pairs.is_empty());

        let mut collector = PairCollector::default();
        index.process_all(&mut collector).unwrap();
        // the self-crossing of the first and last segments is a candidate
        assert!(collector.pairs.iter().any(|&(_, i, _, j)| (i, j) == (0, 2) || (i, j) == (2, 0)));
        assert!(collector.pairs.iter().all(|&(s0, _, s1, _)| s0 == 0 && s1 == 0));
    }

    #[test]
    fn test_envelope_filter() {
        let a = RelateSegmentString::line(vec![c(0., 0.), c(1., 0.), c(50., 0.)], true, 0);
        let env = Envelope::from_segment(c(-1., -1.), c(2., 1.));
        let index = EdgeSetIntersector::new(vec![&a], Some(&env));
        assert_eq!(index.len(), 2);
        let env = Envelope::from_segment(c(-10., -10.), c(-5., -5.));
        assert!(EdgeSetIntersector::new(vec![&a], Some(&env)).is_empty());
    }
}
