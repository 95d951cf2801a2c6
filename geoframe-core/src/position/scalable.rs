//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::FormatError;
use crate::position::{Position, Projected};
use std::fmt;
use std::str::FromStr;

/// Integer pixel or tile address at a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scalable {
    /// Zoom level
    pub zoom: u8,
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
}

impl Scalable {
    pub fn new(zoom: u8, x: u32, y: u32) -> Scalable {
        Scalable { zoom, x, y }
    }

    /// The top-left position at the next zoom level (`None` if it does not fit into `u32`).
    pub fn zoom_in(&self) -> Option<Scalable> {
        self.zoom_to(self.zoom.checked_add(1)?)
    }

    /// The containing position at the previous zoom level (`None` at zoom 0).
    pub fn zoom_out(&self) -> Option<Scalable> {
        if self.zoom == 0 {
            return None;
        }
        self.zoom_to(self.zoom - 1)
    }

    /// Scales the address to another zoom level (top-left corner when zooming in).
    ///
    /// `None` if the scaled column or row does not fit into `u32`.
    pub fn zoom_to(&self, zoom: u8) -> Option<Scalable> {
        if zoom >= self.zoom {
            let shift = u32::from(zoom - self.zoom);
            Some(Scalable {
                zoom,
                x: shift_up(self.x, shift)?,
                y: shift_up(self.y, shift)?,
            })
        } else {
            let shift = u32::from(self.zoom - zoom);
            Some(Scalable {
                zoom,
                x: self.x.checked_shr(shift).unwrap_or(0),
                y: self.y.checked_shr(shift).unwrap_or(0),
            })
        }
    }

    /// The four addresses at the next zoom level, row by row.
    pub fn children(&self) -> Option<[Scalable; 4]> {
        let Scalable { zoom, x, y } = self.zoom_in()?;
        Some([
            Scalable { zoom, x, y },
            Scalable { zoom, x: x + 1, y },
            Scalable { zoom, x, y: y + 1 },
            Scalable {
                zoom,
                x: x + 1,
                y: y + 1,
            },
        ])
    }

    /// Projected position with integer x and y.
    pub fn to_projected(&self) -> Projected {
        Projected::new(f64::from(self.x), f64::from(self.y))
    }

    /// `zoom/x/y` path as used by XYZ tile URLs.
    pub fn to_path(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }

    /// Parse `zoom,x,y` (or any other delimiter).
    pub fn parse(text: &str, delimiter: &str) -> Result<Scalable, FormatError> {
        let parts: Vec<&str> = text.split(delimiter).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(FormatError::arity("scalable position", "3", parts.len()));
        }
        let invalid = |v: &str| FormatError::InvalidNumber(v.to_string());
        Ok(Scalable {
            zoom: parts[0].parse().map_err(|_| invalid(parts[0]))?,
            x: parts[1].parse().map_err(|_| invalid(parts[1]))?,
            y: parts[2].parse().map_err(|_| invalid(parts[2]))?,
        })
    }
}

fn shift_up(value: u32, shift: u32) -> Option<u32> {
    if value == 0 {
        Some(0)
    } else if shift < value.leading_zeros() + 1 && shift < 32 {
        Some(value << shift)
    } else {
        None
    }
}

impl Position for Scalable {
    fn x(&self) -> f64 {
        f64::from(self.x)
    }
    fn y(&self) -> f64 {
        f64::from(self.y)
    }
    fn opt_z(&self) -> Option<f64> {
        None
    }
    fn opt_m(&self) -> Option<f64> {
        None
    }
}

impl FromStr for Scalable {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scalable::parse(s, ",")
    }
}

impl fmt::Display for Scalable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.zoom, self.x, self.y)
    }
}
