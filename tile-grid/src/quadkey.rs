//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Quad-key tile addresses
//!
//! One base-4 digit per zoom level, most significant level first. The digit
//! is `2 * y_bit + x_bit`, zoom level 0 is the empty string.

use geoframe_core::error::FormatError;
use geoframe_core::position::Scalable;

/// Deepest zoom level representable by `u32` tile numbers
pub const MAX_QUADKEY_ZOOM: usize = 31;

/// Quad-key of a tile
pub fn quad_key(tile: &Scalable) -> Result<String, FormatError> {
    if usize::from(tile.zoom) > MAX_QUADKEY_ZOOM {
        return Err(FormatError::Invalid {
            kind: "quad key tile",
            violations: vec![format!(
                "zoom level {} exceeds {}",
                tile.zoom, MAX_QUADKEY_ZOOM
            )],
        });
    }
    let key = (1..=tile.zoom)
        .rev()
        .map(|level| {
            let mask = 1u32 << (level - 1);
            let mut digit = b'0';
            if tile.x & mask != 0 {
                digit += 1;
            }
            if tile.y & mask != 0 {
                digit += 2;
            }
            digit as char
        })
        .collect();
    Ok(key)
}

/// Tile of a quad-key
pub fn quad_key_to_tile(key: &str) -> Result<Scalable, FormatError> {
    let invalid = || FormatError::InvalidText {
        kind: "quad key",
        text: key.to_string(),
    };
    if key.len() > MAX_QUADKEY_ZOOM {
        return Err(invalid());
    }
    let zoom = key.len() as u8;
    let mut tile = Scalable::new(zoom, 0, 0);
    for (i, digit) in key.chars().enumerate() {
        let mask = 1u32 << (zoom as usize - i - 1);
        match digit {
            '0' => {}
            '1' => tile.x |= mask,
            '2' => tile.y |= mask,
            '3' => {
                tile.x |= mask;
                tile.y |= mask;
            }
            _ => return Err(invalid()),
        }
    }
    Ok(tile)
}
