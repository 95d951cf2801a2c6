//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Military Grid Reference System
//!
//! A reference consists of a grid zone (UTM longitude zone and 8° latitude band),
//! a 100 km square identified by a column and a row letter and an easting/northing
//! within that square.

use crate::error::{FormatError, GeoError, GeoResult, Violations};
use crate::position::Geographic;
use crate::projection::{Datum, TransverseMercator};
use crate::utm::{Hemisphere, Utm, UtmZone};
use regex::Regex;
use std::fmt;
use std::str::FromStr;


/// Latitude bands from 80°S to 84°N, each 8° high except `X` (12°).
pub const LATITUDE_BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// 100 km column letters for `(zone - 1) % 3`.
const COLUMN_LETTERS: [&str; 3] = ["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];

/// 100 km row letters for `(zone - 1) % 2`.
const ROW_LETTERS: [&str; 2] = ["ABCDEFGHJKLMNPQRSTUV", "FGHJKLMNPQRSTUVABCDE"];

lazy_static! {
    static ref MILITARY_REF: Regex =
        Regex::new(r"^(\d{1,2})([A-Za-z])([A-Za-z])([A-Za-z])(\d*)$").expect("valid regex");
    static ref GRID_ZONE_REF: Regex = Regex::new(r"^(\d{1,2})([A-Za-z])$").expect("valid regex");
    static ref SQUARE_REF: Regex = Regex::new(r"^([A-Za-z])([A-Za-z])$").expect("valid regex");
}

/// Latitude band letter of a latitude in `[-80, 84]`.
pub fn latitude_band(lat: f64) -> Option<char> {
    if !(-80.0..=84.0).contains(&lat) {
        return None;
    }
    let index = ((lat / 8.0 + 10.0).floor() as usize).min(LATITUDE_BANDS.len() - 1);
    LATITUDE_BANDS.chars().nth(index)
}

/// Southern latitude of a band.
pub fn band_south_latitude(band: char) -> Option<f64> {
    LATITUDE_BANDS
        .find(band.to_ascii_uppercase())
        .map(|index| (index as f64 - 10.0) * 8.0)
}

fn column_letters(lon_zone: u8) -> &'static str {
    COLUMN_LETTERS[(lon_zone as usize + 2) % 3]
}

fn row_letters(lon_zone: u8) -> &'static str {
    ROW_LETTERS[(lon_zone as usize + 1) % 2]
}

fn check_grid_zone(violations: &mut Violations, lon_zone: u8, band: char) {
    violations.check((1..=60).contains(&lon_zone), || {
        format!("zone {} not in [1, 60]", lon_zone)
    });
    violations.check(LATITUDE_BANDS.contains(band), || {
        format!("band {} not one of {}", band, LATITUDE_BANDS)
    });
}

fn check_square(violations: &mut Violations, lon_zone: u8, column: char, row: char) {
    if (1..=60).contains(&lon_zone) {
        let columns = column_letters(lon_zone);
        violations.check(columns.contains(column), || {
            format!("column {} not one of {} for zone {}", column, columns, lon_zone)
        });
        let rows = row_letters(lon_zone);
        violations.check(rows.contains(row), || {
            format!("row {} not one of {} for zone {}", row, rows, lon_zone)
        });
    }
}

/// Grid zone designation, e.g. `31U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MgrsGridZone {
    lon_zone: u8,
    band: char,
}

impl MgrsGridZone {
    pub fn new(lon_zone: u8, band: char) -> Result<MgrsGridZone, FormatError> {
        let band = band.to_ascii_uppercase();
        let mut violations = Violations::default();
        check_grid_zone(&mut violations, lon_zone, band);
        violations.into_result("MGRS grid zone")?;
        Ok(MgrsGridZone { lon_zone, band })
    }

    pub fn lon_zone(&self) -> u8 {
        self.lon_zone
    }

    pub fn band(&self) -> char {
        self.band
    }

    pub fn hemisphere(&self) -> Hemisphere {
        if self.band >= 'N' {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    pub fn utm_zone(&self) -> UtmZone {
        UtmZone::from_parts(self.lon_zone, self.hemisphere())
    }

    fn parse_parts(text: &str) -> Result<(u8, char), FormatError> {
        let caps = GRID_ZONE_REF
            .captures(text.trim())
            .ok_or_else(|| FormatError::InvalidText {
                kind: "MGRS grid zone",
                text: text.to_string(),
            })?;
        Ok((caps[1].parse().unwrap_or(0), caps[2].chars().next().unwrap_or(' ')))
    }
}

impl fmt::Display for MgrsGridZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.lon_zone, self.band)
    }
}

impl FromStr for MgrsGridZone {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon_zone, band) = MgrsGridZone::parse_parts(s)?;
        MgrsGridZone::new(lon_zone, band)
    }
}

/// 100 km grid square, e.g. `31U DQ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MgrsGridSquare {
    zone: MgrsGridZone,
    column: char,
    row: char,
}

impl MgrsGridSquare {
    pub fn new(lon_zone: u8, band: char, column: char, row: char) -> Result<MgrsGridSquare, FormatError> {
        let (band, column, row) = (
            band.to_ascii_uppercase(),
            column.to_ascii_uppercase(),
            row.to_ascii_uppercase(),
        );
        let mut violations = Violations::default();
        check_grid_zone(&mut violations, lon_zone, band);
        check_square(&mut violations, lon_zone, column, row);
        violations.into_result("MGRS grid square")?;
        Ok(MgrsGridSquare {
            zone: MgrsGridZone { lon_zone, band },
            column,
            row,
        })
    }

    pub fn zone(&self) -> &MgrsGridZone {
        &self.zone
    }

    /// Column (easting) letter.
    pub fn column(&self) -> char {
        self.column
    }

    /// Row (northing) letter.
    pub fn row(&self) -> char {
        self.row
    }
}

impl fmt::Display for MgrsGridSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.zone, self.column, self.row)
    }
}

/// Output options of MGRS references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgrsFormat {
    /// Total number of easting and northing digits: 2, 4, 6, 8 or 10
    pub digits: u8,
    /// Without separating spaces, e.g. `31UDQ4825111932`
    pub military_style: bool,
    /// Zone with two digits, e.g. `04Q`
    pub zero_pad_zone: bool,
}

impl Default for MgrsFormat {
    fn default() -> Self {
        MgrsFormat {
            digits: 10,
            military_style: false,
            zero_pad_zone: false,
        }
    }
}

/// Full MGRS reference with easting/northing in meters inside the 100 km square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mgrs {
    square: MgrsGridSquare,
    easting: f64,
    northing: f64,
    datum: Datum,
}

impl Mgrs {
    /// Validates all components, reporting every violated constraint.
    pub fn new(
        lon_zone: u8,
        band: char,
        column: char,
        row: char,
        easting: f64,
        northing: f64,
        datum: Datum,
    ) -> Result<Mgrs, FormatError> {
        let (band, column, row) = (
            band.to_ascii_uppercase(),
            column.to_ascii_uppercase(),
            row.to_ascii_uppercase(),
        );
        let mut violations = Violations::default();
        check_grid_zone(&mut violations, lon_zone, band);
        check_square(&mut violations, lon_zone, column, row);
        violations.check((0.0..100e3).contains(&easting), || {
            format!("easting {} not in [0, 99999]", easting)
        });
        violations.check((0.0..100e3).contains(&northing), || {
            format!("northing {} not in [0, 99999]", northing)
        });
        violations.into_result("MGRS reference")?;
        Ok(Mgrs {
            square: MgrsGridSquare {
                zone: MgrsGridZone { lon_zone, band },
                column,
                row,
            },
            easting,
            northing,
            datum,
        })
    }

    pub fn square(&self) -> &MgrsGridSquare {
        &self.square
    }
    pub fn zone(&self) -> &MgrsGridZone {
        &self.square.zone
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

    /// Reference of a UTM coordinate, the band is derived from its latitude.
    pub fn from_utm(utm: &Utm) -> GeoResult<Mgrs> {
        let position = utm.to_geographic()?;
        Mgrs::from_utm_at(utm, position.lat())
    }

    /// Reference of a position, projected into its UTM zone.
    pub fn from_geographic(position: &Geographic, datum: Datum) -> GeoResult<Mgrs> {
        let utm = Utm::from_geographic(position, datum)?;
        Mgrs::from_utm_at(&utm, position.lat())
    }

    fn from_utm_at(utm: &Utm, lat: f64) -> GeoResult<Mgrs> {
        let lon_zone = utm.zone().lon_zone();
        let invalid = |violation: String| -> GeoError {
            FormatError::Invalid {
                kind: "MGRS reference",
                violations: vec![violation],
            }
            .into()
        };
        let band = latitude_band(lat)
            .ok_or_else(|| invalid(format!("latitude {} outside MGRS bands", lat)))?;
        let col = (utm.easting() / 100e3).floor() as usize;
        let column = column_letters(lon_zone)
            .chars()
            .nth(col.wrapping_sub(1))
            .ok_or_else(|| invalid(format!("easting {} outside 100 km columns", utm.easting())))?;
        let row = (utm.northing() / 100e3).floor() as usize % 20;
        let row = row_letters(lon_zone)
            .chars()
            .nth(row)
            .ok_or_else(|| invalid(format!("northing {} outside 100 km rows", utm.northing())))?;
        // round to nm
        let easting = ((utm.easting() % 100e3) * 1e6).round() / 1e6;
        let northing = ((utm.northing() % 100e3) * 1e6).round() / 1e6;
        Ok(Mgrs::new(
            lon_zone,
            band,
            column,
            row,
            easting.min(99_999.999_999),
            northing.min(99_999.999_999),
            *utm.datum(),
        )?)
    }

    /// UTM coordinate of the reference.
    pub fn to_utm(&self) -> GeoResult<Utm> {
        let zone = self.square.zone;
        let lon_zone = zone.lon_zone;
        let utm_zone = zone.utm_zone();
        let col = column_letters(lon_zone)
            .find(self.square.column)
            .map_or(0, |i| i + 1);
        let row = row_letters(lon_zone).find(self.square.row).unwrap_or(0);
        let e100k = col as f64 * 100e3;
        let n100k = row as f64 * 100e3;

        // northing of the bottom of the band, row letters repeat every 2000 km
        let band_lat = band_south_latitude(zone.band).unwrap_or(0.0);
        let tm = TransverseMercator::utm(&utm_zone, self.datum.ellipsoid);
        let band_northing = tm
            .forward(utm_zone.central_meridian(), band_lat)
            .map_or(0.0, |p| (p.y / 100e3).floor() * 100e3);
        let mut n2m = 0.0;
        while n2m + n100k + self.northing < band_northing {
            n2m += 2000e3;
        }
        Ok(Utm::new(
            utm_zone,
            e100k + self.easting,
            n2m + n100k + self.northing,
            self.datum,
        )?)
    }

    /// Position of the south-west corner of the referenced cell.
    pub fn to_geographic(&self) -> GeoResult<Geographic> {
        self.to_utm()?.to_geographic()
    }

    /// Text with `digits` easting/northing digits (2, 4, 6, 8 or 10), e.g. `31U DQ 48251 11932`.
    pub fn to_text(&self, digits: u8) -> Result<String, FormatError> {
        self.format(&MgrsFormat {
            digits,
            ..MgrsFormat::default()
        })
    }

    pub fn format(&self, format: &MgrsFormat) -> Result<String, FormatError> {
        let digits = format.digits;
        let mut violations = Violations::default();
        violations.check(matches!(digits, 2 | 4 | 6 | 8 | 10), || {
            format!("digits {} not one of 2, 4, 6, 8, 10", digits)
        });
        violations.into_result("MGRS precision")?;
        let half = (digits / 2) as usize;
        let unit = 10f64.powi(5 - half as i32);
        let e = (self.easting / unit).floor() as u32;
        let n = (self.northing / unit).floor() as u32;
        let zone = &self.square.zone;
        let gzd = if format.zero_pad_zone {
            format!("{:02}{}", zone.lon_zone, zone.band)
        } else {
            zone.to_string()
        };
        let sep = if format.military_style { "" } else { " " };
        Ok(format!(
            "{gzd}{sep}{col}{row}{sep}{e:0w$}{sep}{n:0w$}",
            gzd = gzd,
            sep = sep,
            col = self.square.column,
            row = self.square.row,
            e = e,
            n = n,
            w = half
        ))
    }

    /// Parses spaced (`31U DQ 48251 11932`) or military (`31UDQ4825111932`) references.
    ///
    /// Less than five easting/northing digits refer to the south-west corner of
    /// the cell, e.g. `31U DQ 48 11` is `31U DQ 48000 11000`.
    pub fn parse(text: &str, datum: Datum) -> Result<Mgrs, FormatError> {
        let invalid = || FormatError::InvalidText {
            kind: "MGRS reference",
            text: text.to_string(),
        };
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let (lon_zone, band, column, row, easting, northing) = match tokens.as_slice() {
            [military] => {
                let caps = MILITARY_REF.captures(military).ok_or_else(invalid)?;
                let digits = &caps[5];
                if digits.len() % 2 != 0 || digits.len() > 10 {
                    return Err(invalid());
                }
                let (e, n) = digits.split_at(digits.len() / 2);
                (
                    caps[1].parse::<u8>().map_err(|_| invalid())?,
                    first_char(&caps[2]),
                    first_char(&caps[3]),
                    first_char(&caps[4]),
                    e.to_string(),
                    n.to_string(),
                )
            }
            [gzd, square, e, n] => {
                let (lon_zone, band) = MgrsGridZone::parse_parts(gzd).map_err(|_| invalid())?;
                let caps = SQUARE_REF.captures(square).ok_or_else(invalid)?;
                (
                    lon_zone,
                    band,
                    first_char(&caps[1]),
                    first_char(&caps[2]),
                    e.to_string(),
                    n.to_string(),
                )
            }
            _ => return Err(invalid()),
        };
        Mgrs::new(
            lon_zone,
            band,
            column,
            row,
            parse_offset(&easting)?,
            parse_offset(&northing)?,
            datum,
        )
    }
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or(' ')
}

/// Meters from digits, right-padded to five digits.
fn parse_offset(digits: &str) -> Result<f64, FormatError> {
    let padded = if digits.len() < 5 && !digits.contains('.') {
        format!("{:0<5}", digits)
    } else {
        digits.to_string()
    };
    padded
        .parse::<f64>()
        .map_err(|_| FormatError::InvalidNumber(digits.to_string()))
}

impl FromStr for Mgrs {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mgrs::parse(s, Datum::WGS84)
    }
}

impl fmt::Display for Mgrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text(10) {
            Ok(text) => write!(f, "{}", text),
            Err(_) => Err(fmt::Error),
        }
    }
}
