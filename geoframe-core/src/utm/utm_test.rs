//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::crs::CoordRefSys;
use crate::error::{Direction, FormatError, GeoError};
use crate::position::{Geographic, Position};
use crate::projection::Datum;
use crate::utm::{Hemisphere, Utm, UtmZone};

fn zone_of(lon: f64, lat: f64) -> String {
    UtmZone::from_geographic(&Geographic::new(lon, lat)).to_string()
}

#[test]
fn test_zone_designation() {
    assert_eq!(zone_of(2.2945, 48.8582), "31N");
    assert_eq!(zone_of(151.0, -33.9), "56S");
    assert_eq!(zone_of(-180.0, 0.0), "1N");
    assert_eq!(zone_of(179.9, 0.0), "60N");
    // Norway
    assert_eq!(zone_of(2.5, 60.0), "31N");
    assert_eq!(zone_of(3.5, 60.0), "32N");
    assert_eq!(zone_of(5.32, 60.39), "32N");
    assert_eq!(zone_of(3.5, 55.0), "31N");
    // Svalbard
    assert_eq!(zone_of(8.0, 78.0), "31N");
    assert_eq!(zone_of(10.0, 78.0), "33N");
    assert_eq!(zone_of(20.0, 78.0), "33N");
    assert_eq!(zone_of(22.0, 78.0), "35N");
    assert_eq!(zone_of(32.0, 78.0), "35N");
    assert_eq!(zone_of(34.0, 78.0), "37N");
}

#[test]
fn test_zone() {
    let zone = UtmZone::new(31, Hemisphere::North).unwrap();
    assert_eq!(zone.central_meridian(), 3.0);
    assert_eq!(UtmZone::new(1, Hemisphere::South).unwrap().central_meridian(), -177.0);
    assert_eq!(zone.crs(&Datum::WGS84).epsg_code(), Some(32631));
    assert_eq!(
        UtmZone::new(56, Hemisphere::South).unwrap().crs(&Datum::WGS84).epsg_code(),
        Some(32756)
    );
    assert_eq!(
        UtmZone::new(32, Hemisphere::North).unwrap().epsg_code(&Datum::ETRS89),
        Some(25832)
    );
    assert_eq!(
        UtmZone::new(30, Hemisphere::North).unwrap().crs(&Datum::OSGB36).id(),
        "OSGB36 / UTM zone 30N"
    );

    assert_eq!("31N".parse::<UtmZone>(), Ok(zone));
    assert_eq!(
        "56 S".parse::<UtmZone>().map(|z| z.hemisphere()),
        Ok(Hemisphere::South)
    );
    assert!("N31".parse::<UtmZone>().is_err());
    assert!("31".parse::<UtmZone>().is_err());
    assert_eq!(
        "0N".parse::<UtmZone>().unwrap_err().violations(),
        &["zone 0 not in [1, 60]".to_string()]
    );
}

#[test]
fn test_from_geographic() {
    let eiffel = Geographic::new(2.2945, 48.8582);
    let utm = Utm::from_geographic(&eiffel, Datum::WGS84).unwrap();
    assert_eq!(utm.zone().to_string(), "31N");
    assert!((utm.easting() - 448251.7952059537).abs() < 1e-6);
    assert!((utm.northing() - 5411932.677669734).abs() < 1e-6);
    assert!((utm.convergence().unwrap() - -0.5313122085867797).abs() < 1e-9);
    assert!((utm.scale().unwrap() - 0.9996328974298713).abs() < 1e-12);
    assert_eq!(utm.to_string(), "31 N 448252 5411933");
    assert_eq!(utm.to_text(3), "31 N 448251.795 5411932.678");

    let back = utm.to_geographic().unwrap();
    assert!(back.equals_2d(&eiffel, Some(1e-9)));

    // central meridian lands exactly on the false easting
    let utm = Utm::from_geographic(&Geographic::new(3.0, 10.0), Datum::WGS84).unwrap();
    assert_eq!(utm.easting(), 500000.0);

    let bergen = Utm::from_geographic(&Geographic::new(5.32, 60.39), Datum::WGS84).unwrap();
    assert_eq!(bergen.zone().lon_zone(), 32);
    assert!((bergen.easting() - 297230.22020962584).abs() < 1e-6);

    let forced =
        Utm::from_geographic_in_zone(&eiffel, 30, Datum::WGS84).unwrap();
    assert!((forced.easting() - 888276.9620803524).abs() < 1e-6);
}

#[test]
fn test_southern_hemisphere() {
    let sydney = Geographic::new(151.0, -33.9).with_elev(58.0);
    let utm = Utm::from_geographic(&sydney, Datum::WGS84).unwrap();
    assert_eq!(utm.zone().hemisphere(), Hemisphere::South);
    assert!((utm.easting() - 315073.8835986343).abs() < 1e-6);
    assert!((utm.northing() - 6247131.133850952).abs() < 1e-6);
    assert_eq!(utm.to_projected().opt_z(), Some(58.0));

    let back = utm.to_geographic().unwrap();
    assert!(back.equals_3d(&sydney, Some(1e-9), Some(0.0)));
}

#[test]
fn test_outside_utm_limits() {
    let err = Utm::from_geographic(&Geographic::new(3.0, 85.0), Datum::WGS84).unwrap_err();
    match err {
        GeoError::Projection(err) => {
            assert_eq!(err.to_crs, "EPSG:32631");
            assert_eq!(err.values, vec![3.0, 85.0]);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(Utm::from_geographic(&Geographic::new(3.0, -80.5), Datum::WGS84).is_err());
}

#[test]
fn test_parse() {
    let utm: Utm = "31 N 448251.795 5411932.678".parse().unwrap();
    assert_eq!(utm.zone().lon_zone(), 31);
    assert_eq!(utm.easting(), 448251.795);
    assert_eq!(utm.convergence(), None);
    let p = utm.to_geographic().unwrap();
    assert!((p.lon() - 2.2945).abs() < 1e-7);
    assert!((p.lat() - 48.8582).abs() < 1e-7);

    assert_eq!(
        "31 X 1 2".parse::<Utm>(),
        Err(FormatError::InvalidText {
            kind: "hemisphere",
            text: "X".to_string()
        })
    );
    assert!("31 N 1".parse::<Utm>().is_err());
    assert_eq!(
        "31 N 1 x".parse::<Utm>(),
        Err(FormatError::InvalidNumber("x".to_string()))
    );
    let err = "31 N -5 20000000".parse::<Utm>().unwrap_err();
    assert_eq!(
        err.violations(),
        &[
            "easting -5 not in [0, 1000000]".to_string(),
            "northing 20000000 not in [0, 10000000]".to_string()
        ]
    );
}

#[test]
fn test_inverse_failure() {
    let utm: Utm = "31 N 448251.795 5411932.678".parse().unwrap();
    let broken = Utm {
        easting: f64::NAN,
        ..utm
    };
    match broken.to_geographic() {
        Err(GeoError::Projection(err)) => {
            assert_eq!(err.direction, Direction::Inverse);
            assert_eq!(err.from_crs, CoordRefSys::from_epsg(32631).to_string());
            assert_eq!(err.to_crs, CoordRefSys::from_epsg(4326).to_string());
            assert_eq!(err.reason, "latitude iteration did not converge");
        }
        other => panic!("unexpected result {:?}", other),
    }
}
