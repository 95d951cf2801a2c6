//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Geographic and projected positions, bounding boxes, coordinate reference systems,
//! projections, spherical geodesy and the UTM/MGRS grid reference systems.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

pub mod bbox;
pub mod config;
pub mod coords;
pub mod crs;
pub mod error;
pub mod geodesy;
pub mod mgrs;
pub mod position;
pub mod projection;
pub mod units;
pub mod utm;

pub use crate::config::{parse_config, read_config, ApplicationCfg, Config};
pub use crate::coords::Coords;
pub use crate::crs::{AxisOrder, CoordRefSys};
pub use crate::error::{Direction, FormatError, GeoError, GeoResult, ProjectionError};
