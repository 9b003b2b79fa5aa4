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

use geo_types::Coord;

/// Envelope is an axis-aligned bounding rectangle. The null envelope
/// bounds nothing and is the envelope of every empty geometry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Envelope::null()
    }
}

impl Envelope {
    pub fn null() -> Envelope {
        Envelope {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_coord(c: Coord<f64>) -> Envelope {
        Envelope {
            min_x: c.x,
            min_y: c.y,
            max_x: c.x,
            max_y: c.y,
        }
    }

    /// Envelope of the segment p0-p1.
    pub fn from_segment(p0: Coord<f64>, p1: Coord<f64>) -> Envelope {
        Envelope {
            min_x: p0.x.min(p1.x),
            min_y: p0.y.min(p1.y),
            max_x: p0.x.max(p1.x),
            max_y: p0.y.max(p1.y),
        }
    }

    pub fn from_coords<'a, I>(coords: I) -> Envelope
    where
        I: IntoIterator<Item = &'a Coord<f64>>,
    {
        let mut env = Envelope::null();
        for c in coords {
            env.expand_to_include(*c);
        }
        env
    }

    pub fn is_null(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn expand_to_include(&mut self, c: Coord<f64>) {
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }

    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if other.is_null() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    pub fn disjoint(&self, other: &Envelope) -> bool {
        !self.intersects(other)
    }

    pub fn intersects_coord(&self, c: Coord<f64>) -> bool {
        !(c.x > self.max_x || c.x < self.min_x || c.y > self.max_y || c.y < self.min_y)
    }

    /// Reports whether `other` lies inside this envelope. Nothing covers
    /// or is covered by the null envelope.
    pub fn covers(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn intersection(&self, other: &Envelope) -> Envelope {
        if !self.intersects(other) {
            return Envelope::null();
        }
        Envelope {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }
}

/// Reports whether q lies in the envelope of the segment p0-p1.
pub fn segment_envelope_contains(p0: Coord<f64>, p1: Coord<f64>, q: Coord<f64>) -> bool {
    q.x >= p0.x.min(p1.x) && q.x <= p0.x.max(p1.x) && q.y >= p0.y.min(p1.y) && q.y <= p0.y.max(p1.y)
}
