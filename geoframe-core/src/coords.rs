//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate type tags

use crate::error::FormatError;
use std::fmt;

/// Coordinate type of a position or of a flat coordinate array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coords {
    /// Horizontal x, y (or lon, lat)
    Xy,
    /// x, y and elevation/z
    Xyz,
    /// x, y and measure
    Xym,
    /// x, y, elevation/z and measure
    Xyzm,
}

impl Coords {
    pub fn select(is_3d: bool, is_measured: bool) -> Coords {
        match (is_3d, is_measured) {
            (false, false) => Coords::Xy,
            (true, false) => Coords::Xyz,
            (false, true) => Coords::Xym,
            (true, true) => Coords::Xyzm,
        }
    }

    /// Coordinate type implied by a number of values (a measure-only 3-tuple needs an explicit type).
    pub fn from_dimension(count: usize) -> Result<Coords, FormatError> {
        match count {
            2 => Ok(Coords::Xy),
            3 => Ok(Coords::Xyz),
            4 => Ok(Coords::Xyzm),
            _ => Err(FormatError::arity("position", "2, 3 or 4", count)),
        }
    }

    pub fn is_3d(&self) -> bool {
        matches!(self, Coords::Xyz | Coords::Xyzm)
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Coords::Xym | Coords::Xyzm)
    }

    /// Number of spatial dimensions (2 or 3).
    pub fn spatial_dimension(&self) -> usize {
        if self.is_3d() {
            3
        } else {
            2
        }
    }

    /// Number of values per position (2 to 4).
    pub fn coordinate_dimension(&self) -> usize {
        self.spatial_dimension() + if self.is_measured() { 1 } else { 0 }
    }

    /// Index of the measure value inside a position tuple.
    pub fn index_of_m(&self) -> Option<usize> {
        match self {
            Coords::Xym => Some(2),
            Coords::Xyzm => Some(3),
            _ => None,
        }
    }

    /// WKT style specifier (`""`, `"Z"`, `"M"`, `"ZM"`).
    pub fn specifier(&self) -> &'static str {
        match self {
            Coords::Xy => "",
            Coords::Xyz => "Z",
            Coords::Xym => "M",
            Coords::Xyzm => "ZM",
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Coords::Xy => "xy",
            Coords::Xyz => "xyz",
            Coords::Xym => "xym",
            Coords::Xyzm => "xyzm",
        };
        write!(f, "{}", name)
    }
}

/// Splits a flat coordinate array into position tuples `(x, y, z, m)`.
///
/// Fails when the array length is not a multiple of the coordinate dimension.
pub fn split_positions(
    values: &[f64],
    coord_type: Coords,
) -> Result<Vec<(f64, f64, Option<f64>, Option<f64>)>, FormatError> {
    let dim = coord_type.coordinate_dimension();
    if values.len() % dim != 0 {
        return Err(FormatError::arity(
            "coordinate array",
            &format!("a multiple of {}", dim),
            values.len(),
        ));
    }
    Ok(values
        .chunks(dim)
        .map(|c| {
            let z = if coord_type.is_3d() { Some(c[2]) } else { None };
            let m = coord_type.index_of_m().map(|i| c[i]);
            (c[0], c[1], z, m)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(Coords::Xy.coordinate_dimension(), 2);
        assert_eq!(Coords::Xym.coordinate_dimension(), 3);
        assert_eq!(Coords::Xym.spatial_dimension(), 2);
        assert_eq!(Coords::Xyzm.coordinate_dimension(), 4);
        assert_eq!(Coords::select(true, false), Coords::Xyz);
        assert_eq!(Coords::from_dimension(3), Ok(Coords::Xyz));
        assert!(Coords::from_dimension(5).is_err());
        assert_eq!(Coords::Xyzm.specifier(), "ZM");
    }

    #[test]
    fn test_split_positions() {
        let positions = split_positions(&[1.0, 2.0, 9.0, 3.0, 4.0, 8.0], Coords::Xym).unwrap();
        assert_eq!(
            positions,
            vec![(1.0, 2.0, None, Some(9.0)), (3.0, 4.0, None, Some(8.0))]
        );
        assert!(split_positions(&[1.0, 2.0, 3.0], Coords::Xy).is_err());
    }
}
