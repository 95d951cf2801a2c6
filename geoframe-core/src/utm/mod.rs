//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Universal Transverse Mercator zones and coordinates

use crate::crs::CoordRefSys;
use crate::error::{FormatError, GeoError, GeoResult, Violations};
use crate::mgrs::latitude_band;
use crate::position::{CreatePosition, Geographic, Position, Projected};
use crate::projection::{
    Datum, Endpoints, TransverseMercator, UTM_MAX_LATITUDE, UTM_MIN_LATITUDE,
};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod utm_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn of_latitude(lat: f64) -> Hemisphere {
        if lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "N"),
            Hemisphere::South => write!(f, "S"),
        }
    }
}

impl FromStr for Hemisphere {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(Hemisphere::North),
            "S" | "s" => Ok(Hemisphere::South),
            _ => Err(FormatError::InvalidText {
                kind: "hemisphere",
                text: s.to_string(),
            }),
        }
    }
}

/// UTM longitude zone (1 to 60) and hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtmZone {
    lon_zone: u8,
    hemisphere: Hemisphere,
}

impl UtmZone {
    pub fn new(lon_zone: u8, hemisphere: Hemisphere) -> Result<UtmZone, FormatError> {
        let mut violations = Violations::default();
        violations.check((1..=60).contains(&lon_zone), || {
            format!("zone {} not in [1, 60]", lon_zone)
        });
        violations.into_result("UTM zone")?;
        Ok(UtmZone {
            lon_zone,
            hemisphere,
        })
    }

    /// Zone from an already validated longitude zone.
    pub(crate) fn from_parts(lon_zone: u8, hemisphere: Hemisphere) -> UtmZone {
        debug_assert!((1..=60).contains(&lon_zone));
        UtmZone {
            lon_zone,
            hemisphere,
        }
    }

    /// Zone containing a position, including the Norway and Svalbard exceptions.
    pub fn from_geographic(position: &Geographic) -> UtmZone {
        let (lon, lat) = (position.lon(), position.lat());
        // lon is in [-180, 180)
        let mut zone = ((lon + 180.0) / 6.0).floor() as u8 + 1;
        match latitude_band(lat) {
            Some('V') if zone == 31 && lon >= 3.0 => zone += 1,
            Some('X') if zone == 32 => zone = if lon < 9.0 { 31 } else { 33 },
            Some('X') if zone == 34 => zone = if lon < 21.0 { 33 } else { 35 },
            Some('X') if zone == 36 => zone = if lon < 33.0 { 35 } else { 37 },
            _ => {}
        }
        UtmZone {
            lon_zone: zone.min(60),
            hemisphere: Hemisphere::of_latitude(lat),
        }
    }

    pub fn lon_zone(&self) -> u8 {
        self.lon_zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        (self.lon_zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    /// EPSG code of the zone CRS for datums with registered UTM systems.
    pub fn epsg_code(&self, datum: &Datum) -> Option<u32> {
        let zone = self.lon_zone as u32;
        match (datum.name, self.hemisphere) {
            ("WGS84", Hemisphere::North) => Some(32600 + zone),
            ("WGS84", Hemisphere::South) => Some(32700 + zone),
            ("ETRS89", Hemisphere::North) if (28..=38).contains(&zone) => Some(25800 + zone),
            ("NAD83", Hemisphere::North) if (1..=23).contains(&zone) => Some(26900 + zone),
            ("ED50", Hemisphere::North) if (28..=38).contains(&zone) => Some(23000 + zone),
            _ => None,
        }
    }

    /// CRS of the zone, an EPSG CRS if registered.
    pub fn crs(&self, datum: &Datum) -> CoordRefSys {
        match self.epsg_code(datum) {
            Some(code) => CoordRefSys::from_epsg(code),
            None => CoordRefSys::new(&format!("{} / UTM zone {}", datum.name, self)),
        }
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.lon_zone, self.hemisphere)
    }
}

impl FromStr for UtmZone {
    type Err = FormatError;

    /// Parses `31N` or `31 N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || FormatError::InvalidText {
            kind: "UTM zone",
            text: s.to_string(),
        };
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (zone, hemisphere) = text.split_at(split);
        let zone = zone.parse::<u8>().map_err(|_| invalid())?;
        UtmZone::new(zone, hemisphere.parse()?)
    }
}

/// UTM coordinate in a zone on a datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utm {
    zone: UtmZone,
    easting: f64,
    northing: f64,
    elev: Option<f64>,
    m: Option<f64>,
    datum: Datum,
    convergence: Option<f64>,
    scale: Option<f64>,
}

impl Utm {
    /// Validates easting in `[0, 1000000]` and northing in `[0, 10000000]`.
    pub fn new(zone: UtmZone, easting: f64, northing: f64, datum: Datum) -> Result<Utm, FormatError> {
        let mut violations = Violations::default();
        violations.check((0.0..=1000e3).contains(&easting), || {
            format!("easting {} not in [0, 1000000]", easting)
        });
        violations.check((0.0..=10000e3).contains(&northing), || {
            format!("northing {} not in [0, 10000000]", northing)
        });
        violations.into_result("UTM coordinate")?;
        Ok(Utm {
            zone,
            easting,
            northing,
            elev: None,
            m: None,
            datum,
            convergence: None,
            scale: None,
        })
    }

    pub fn with_elev(self, elev: f64) -> Utm {
        Utm {
            elev: Some(elev),
            ..self
        }
    }

    pub fn with_m(self, m: f64) -> Utm {
        Utm { m: Some(m), ..self }
    }

    /// Projects a position into the zone containing it.
    pub fn from_geographic(position: &Geographic, datum: Datum) -> GeoResult<Utm> {
        Utm::from_geographic_in_zone(position, UtmZone::from_geographic(position).lon_zone, datum)
    }

    /// Projects a position into a given longitude zone (hemisphere follows the latitude).
    pub fn from_geographic_in_zone(position: &Geographic, lon_zone: u8, datum: Datum) -> GeoResult<Utm> {
        let zone = UtmZone::new(lon_zone, Hemisphere::of_latitude(position.lat()))?;
        let endpoints = grid_endpoints(&zone, &datum);
        let fail = |reason: &str| -> GeoError {
            endpoints
                .failure(position.x(), position.y(), position.opt_z(), position.opt_m(), reason)
                .into()
        };
        if !(UTM_MIN_LATITUDE..=UTM_MAX_LATITUDE).contains(&position.lat()) {
            return Err(fail("latitude outside UTM limits [-80, 84]"));
        }
        let point = TransverseMercator::utm(&zone, datum.ellipsoid)
            .forward(position.lon(), position.lat())
            .ok_or_else(|| fail("non-finite result"))?;
        // round to nm
        let easting = (point.x * 1e9).round() / 1e9;
        let northing = (point.y * 1e9).round() / 1e9;
        let utm = Utm::new(zone, easting, northing, datum).map_err(|_| fail("outside the UTM grid"))?;
        Ok(Utm {
            elev: position.opt_elev(),
            m: position.opt_m(),
            convergence: Some(point.convergence),
            scale: Some(point.scale),
            ..utm
        })
    }

    /// Unprojects to a position on the same datum.
    pub fn to_geographic(&self) -> GeoResult<Geographic> {
        let point = TransverseMercator::utm(&self.zone, self.datum.ellipsoid)
            .inverse(self.easting, self.northing)
            .ok_or_else(|| {
                grid_endpoints(&self.zone, &self.datum)
                    .reversed()
                    .failure(
                        self.easting,
                        self.northing,
                        self.elev,
                        self.m,
                        "latitude iteration did not converge",
                    )
            })?;
        Ok(Geographic::create(point.x, point.y, self.elev, self.m))
    }

    pub fn zone(&self) -> &UtmZone {
        &self.zone
    }
    pub fn easting(&self) -> f64 {
        self.easting
    }
    pub fn northing(&self) -> f64 {
        self.northing
    }
    pub fn datum(&self) -> &Datum {
        &self.datum
    }
    /// Meridian convergence in degrees, known for projected positions.
    pub fn convergence(&self) -> Option<f64> {
        self.convergence
    }
    /// Point scale factor, known for projected positions.
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Easting/northing as a projected position.
    pub fn to_projected(&self) -> Projected {
        Projected::create(self.easting, self.northing, self.elev, self.m)
    }

    /// `31 N 448252 5411933` with the given decimals for easting and northing.
    pub fn to_text(&self, decimals: usize) -> String {
        format!(
            "{} {} {:.*} {:.*}",
            self.zone.lon_zone, self.zone.hemisphere, decimals, self.easting, decimals, self.northing
        )
    }

    /// Parses `31 N 448251 5411932` on WGS 84.
    pub fn parse(text: &str, datum: Datum) -> Result<Utm, FormatError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(FormatError::InvalidText {
                kind: "UTM coordinate",
                text: text.to_string(),
            });
        }
        let zone = parts[0].parse::<u8>().map_err(|_| FormatError::InvalidText {
            kind: "UTM zone",
            text: parts[0].to_string(),
        })?;
        let zone = UtmZone::new(zone, parts[1].parse()?)?;
        let easting = parts[2]
            .parse::<f64>()
            .map_err(|_| FormatError::InvalidNumber(parts[2].to_string()))?;
        let northing = parts[3]
            .parse::<f64>()
            .map_err(|_| FormatError::InvalidNumber(parts[3].to_string()))?;
        Utm::new(zone, easting, northing, datum)
    }
}

/// Geographic to UTM grid endpoints of a zone on a datum
fn grid_endpoints(zone: &UtmZone, datum: &Datum) -> Endpoints {
    Endpoints::forward(CoordRefSys::from_epsg(datum.epsg), zone.crs(datum))
}

impl FromStr for Utm {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Utm::parse(s, Datum::WGS84)
    }
}

impl fmt::Display for Utm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(0))
    }
}
