//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Coordinate reference system identifiers

use std::fmt;
use std::hash::{Hash, Hasher};

const OGC_CRS_PREFIX: &str = "http://www.opengis.net/def/crs/";
const EPSG_URI_PREFIX: &str = "http://www.opengis.net/def/crs/EPSG/0/";

/// Axis order of the first two coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// Longitude (or easting, x) first
    LonLat,
    /// Latitude (or northing, y) first
    LatLon,
}

/// Identifier of a coordinate reference system.
///
/// Identifiers are normalized once at construction, equality compares normalized ids.
#[derive(Debug, Clone)]
pub struct CoordRefSys {
    id: String,
    axis_order: Option<AxisOrder>,
}

impl CoordRefSys {
    /// Construct from any supported identifier spelling.
    ///
    /// `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326` and
    /// `http://www.opengis.net/def/crs/EPSG/0/4326` all normalize to the latter.
    pub fn new(id: &str) -> CoordRefSys {
        let id = normalize_id(id);
        let axis_order = axis_order_of(&id);
        CoordRefSys { id, axis_order }
    }

    pub fn from_epsg(code: u32) -> CoordRefSys {
        CoordRefSys::new(&format!("{}{}", EPSG_URI_PREFIX, code))
    }

    /// WGS 84 longitude/latitude.
    pub fn crs84() -> CoordRefSys {
        CoordRefSys::new("http://www.opengis.net/def/crs/OGC/1.3/CRS84")
    }

    /// WGS 84 longitude/latitude/ellipsoidal height.
    pub fn crs84h() -> CoordRefSys {
        CoordRefSys::new("http://www.opengis.net/def/crs/OGC/0/CRS84h")
    }

    /// WGS 84 latitude/longitude.
    pub fn epsg_4326() -> CoordRefSys {
        CoordRefSys::from_epsg(4326)
    }

    /// WGS 84 / Pseudo-Mercator.
    pub fn epsg_3857() -> CoordRefSys {
        CoordRefSys::from_epsg(3857)
    }

    /// WGS 84 geocentric (ECEF).
    pub fn epsg_4978() -> CoordRefSys {
        CoordRefSys::from_epsg(4978)
    }

    /// Normalized identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Axis order, if known for this CRS.
    pub fn axis_order(&self) -> Option<AxisOrder> {
        self.axis_order
    }

    /// True when coordinates are stated latitude first.
    pub fn swap_xy(&self) -> bool {
        self.axis_order == Some(AxisOrder::LatLon)
    }

    /// EPSG code, if the identifier is an EPSG CRS.
    pub fn epsg_code(&self) -> Option<u32> {
        self.id
            .strip_prefix(EPSG_URI_PREFIX)
            .and_then(|code| code.parse().ok())
    }

    /// `EPSG:<code>` representation, if the identifier is an EPSG CRS.
    pub fn epsg(&self) -> Option<String> {
        self.epsg_code().map(|code| format!("EPSG:{}", code))
    }

    pub fn is_crs84(&self) -> bool {
        self.id.ends_with("/CRS84") || self.id.ends_with("/CRS84h")
    }

    /// True for known geographic (longitude/latitude based) systems.
    pub fn is_geographic(&self) -> bool {
        self.is_crs84()
            || self
                .epsg_code()
                .map_or(false, |code| GEOGRAPHIC_EPSG.contains(&code))
    }

    /// True for WGS 84 based geographic systems (CRS84, EPSG:4326 and friends).
    pub fn is_wgs84_geographic(&self) -> bool {
        self.is_crs84() || matches!(self.epsg_code(), Some(4326) | Some(4979))
    }
}

const GEOGRAPHIC_EPSG: [u32; 7] = [4326, 4258, 4269, 4979, 4937, 4230, 4277];

fn normalize_id(id: &str) -> String {
    let id = id.trim();
    let upper = id.to_uppercase();
    if let Some(code) = upper.strip_prefix("EPSG:") {
        if let Ok(code) = code.parse::<u32>() {
            return format!("{}{}", EPSG_URI_PREFIX, code);
        }
    }
    if let Some(rest) = upper.strip_prefix("URN:OGC:DEF:CRS:EPSG:") {
        // version part may be empty (`EPSG::4326`) or explicit (`EPSG:9.8:4326`)
        if let Some(code) = rest.rsplit(':').next().and_then(|c| c.parse::<u32>().ok()) {
            return format!("{}{}", EPSG_URI_PREFIX, code);
        }
    }
    match upper.as_str() {
        "CRS:84" | "OGC:CRS84" | "URN:OGC:DEF:CRS:OGC:1.3:CRS84" | "URN:OGC:DEF:CRS:OGC::CRS84" => {
            return format!("{}OGC/1.3/CRS84", OGC_CRS_PREFIX)
        }
        "OGC:CRS84H" | "URN:OGC:DEF:CRS:OGC::CRS84H" | "URN:OGC:DEF:CRS:OGC:0:CRS84H" => {
            return format!("{}OGC/0/CRS84h", OGC_CRS_PREFIX)
        }
        _ => {}
    }
    let lower = id.to_lowercase();
    if lower.starts_with("http://www.opengis.net/def/crs/")
        || lower.starts_with("https://www.opengis.net/def/crs/")
    {
        let path = &id[id.find("/def/crs/").map_or(0, |i| i + "/def/crs/".len())..];
        return format!("{}{}", OGC_CRS_PREFIX, path.trim_end_matches('/'));
    }
    id.to_string()
}

fn axis_order_of(id: &str) -> Option<AxisOrder> {
    if id.ends_with("/CRS84") || id.ends_with("/CRS84h") {
        return Some(AxisOrder::LonLat);
    }
    let code: u32 = id.strip_prefix(EPSG_URI_PREFIX)?.parse().ok()?;
    match code {
        c if GEOGRAPHIC_EPSG.contains(&c) => Some(AxisOrder::LatLon),
        3857 | 4978 => Some(AxisOrder::LonLat),
        32601..=32660 | 32701..=32760 | 25801..=25860 => Some(AxisOrder::LonLat),
        _ => None,
    }
}

impl PartialEq for CoordRefSys {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CoordRefSys {}

impl Hash for CoordRefSys {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CoordRefSys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg() {
            Some(epsg) => write!(f, "{}", epsg),
            None => write!(f, "{}", self.id),
        }
    }
}

impl From<&str> for CoordRefSys {
    fn from(id: &str) -> Self {
        CoordRefSys::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let expected = "http://www.opengis.net/def/crs/EPSG/0/4326";
        for id in &[
            "EPSG:4326",
            "epsg:4326",
            " urn:ogc:def:crs:EPSG::4326 ",
            "urn:ogc:def:crs:EPSG:9.8.1:4326",
            "http://www.opengis.net/def/crs/EPSG/0/4326",
            "https://www.opengis.net/def/crs/EPSG/0/4326/",
        ] {
            assert_eq!(CoordRefSys::new(id).id(), expected, "{}", id);
        }
        assert_eq!(CoordRefSys::new("CRS:84"), CoordRefSys::crs84());
        assert_eq!(CoordRefSys::new("OGC:CRS84"), CoordRefSys::crs84());
        assert_eq!(CoordRefSys::new("custom:42").id(), "custom:42");
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(CoordRefSys::crs84().axis_order(), Some(AxisOrder::LonLat));
        assert_eq!(CoordRefSys::epsg_4326().axis_order(), Some(AxisOrder::LatLon));
        assert!(CoordRefSys::epsg_4326().swap_xy());
        assert!(!CoordRefSys::epsg_3857().swap_xy());
        assert_eq!(CoordRefSys::from_epsg(32631).axis_order(), Some(AxisOrder::LonLat));
        assert_eq!(CoordRefSys::from_epsg(2056).axis_order(), None);
    }

    #[test]
    fn test_epsg() {
        assert_eq!(CoordRefSys::epsg_3857().epsg(), Some("EPSG:3857".to_string()));
        assert_eq!(CoordRefSys::epsg_3857().epsg_code(), Some(3857));
        assert_eq!(CoordRefSys::crs84().epsg(), None);
        assert_eq!(CoordRefSys::epsg_3857().to_string(), "EPSG:3857");
        assert!(CoordRefSys::crs84().is_geographic());
        assert!(CoordRefSys::from_epsg(4258).is_geographic());
        assert!(!CoordRefSys::epsg_3857().is_geographic());
    }
}
