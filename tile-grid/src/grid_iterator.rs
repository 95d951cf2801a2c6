//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::tile_matrix_set::TileLimits;
use geoframe_core::position::Scalable;

/// Level-by-level iterator
pub struct GridIterator {
    z: u8,
    x: u32,
    y: u32,
    maxz: u8,
    limits: Vec<TileLimits>,
    finished: bool,
}

impl GridIterator {
    /// Iterates `limits` (indexed by zoom level) from `minz` to `maxz`.
    pub fn new(minz: u8, maxz: u8, limits: Vec<TileLimits>) -> GridIterator {
        if minz <= maxz && limits.len() > minz as usize {
            let maxz = std::cmp::min(maxz, limits.len() as u8 - 1);
            let mut iter = GridIterator {
                z: minz,
                x: 0,
                y: 0,
                maxz,
                limits,
                finished: false,
            };
            iter.start_level(minz);
            iter
        } else {
            // Return "empty" iterator for invalid parameters
            GridIterator {
                z: 0,
                x: 0,
                y: 0,
                maxz: 0,
                limits: Vec::new(),
                finished: true,
            }
        }
    }

    /// Moves to the first cell of the next non-empty level from `z`.
    fn start_level(&mut self, z: u8) {
        let mut z = z;
        loop {
            let limit = &self.limits[z as usize];
            if !limit.is_empty() {
                self.z = z;
                self.x = limit.minx;
                self.y = limit.miny;
                return;
            }
            if z >= self.maxz {
                self.finished = true;
                return;
            }
            z += 1;
        }
    }
}

impl Iterator for GridIterator {
    /// Current tile
    type Item = Scalable;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = Scalable::new(self.z, self.x, self.y);
        let limit = &self.limits[self.z as usize];
        if self.y + 1 < limit.maxy {
            self.y += 1;
        } else if self.x + 1 < limit.maxx {
            self.x += 1;
            self.y = limit.miny;
        } else if self.z < self.maxz {
            self.start_level(self.z + 1);
        } else {
            self.finished = true;
        }
        Some(current)
    }
}
