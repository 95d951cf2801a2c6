//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::coords::Coords;
use crate::crs::CoordRefSys;
use crate::error::{Direction, GeoError};
use crate::position::{Geographic, Position, Projected};
use crate::projection::*;
use crate::utm::{Hemisphere, UtmZone};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{} != {} (tolerance {})",
        actual,
        expected,
        tolerance
    );
}

#[test]
fn test_web_mercator() {
    let adapter = WebMercator::new();
    assert_eq!(adapter.from_crs(), &CoordRefSys::crs84());
    assert_eq!(adapter.to_crs().epsg(), Some("EPSG:3857".to_string()));

    let chicago = Geographic::new(-87.65, 41.85).with_elev(180.0);
    let projected: Projected = adapter.forward().project(&chicago).unwrap();
    // x = R * lon in radians
    assert_close(projected.x(), EARTH_RADIUS * (-87.65f64).to_radians(), 1e-9);
    assert_close(projected.x(), -9757153.368030429, 1e-6);
    assert_close(projected.y(), 5138536.587247468, 1e-6);
    assert_eq!(projected.opt_z(), Some(180.0));

    let unprojected: Geographic = adapter.inverse().project(&projected).unwrap();
    assert!(unprojected.equals_3d(&chicago, Some(1e-12), Some(0.0)));
}

#[test]
fn test_web_mercator_clamps_latitude() {
    let (x, y) = lonlat_to_merc(180.0, 90.0);
    assert_close(x, 20037508.342789244, 1e-6);
    assert_close(y, 20037508.342789244, 1e-3);
    let (_, lat) = merc_to_lonlat(0.0, y);
    assert_close(lat, MAX_LATITUDE, 1e-9);
}

#[test]
fn test_project_coords() {
    let adapter = WebMercator::new();
    let values = [0.0, 0.0, 5.0, 180.0, 0.0, 6.0];
    let projected = adapter
        .forward()
        .project_coords(&values, Coords::Xym)
        .unwrap();
    assert_eq!(projected.len(), 6);
    assert_eq!(projected[2], 5.0);
    assert_close(projected[3], 20037508.342789244, 1e-6);
    assert_eq!(projected[5], 6.0);

    let back = adapter
        .inverse()
        .project_coords(&projected, Coords::Xym)
        .unwrap();
    assert_close(back[3], 180.0, 1e-12);

    let err = adapter
        .forward()
        .project_coords(&[1.0, 2.0, 3.0], Coords::Xy)
        .unwrap_err();
    assert!(matches!(err, GeoError::Format(_)));
}

#[test]
fn test_geocentric() {
    let adapter = Geocentric::new();
    assert_eq!(adapter.to_crs(), &CoordRefSys::epsg_4978());

    let eiffel = Geographic::new(2.2945, 48.8582).with_elev(300.0);
    let ecef: Projected = adapter.forward().project(&eiffel).unwrap();
    assert_close(ecef.x(), 4201149.773830762, 1e-6);
    assert_close(ecef.y(), 168331.67492114453, 1e-6);
    assert_close(ecef.z(), 4780424.334247514, 1e-6);

    let back: Geographic = adapter.inverse().project(&ecef).unwrap();
    assert!(back.equals_3d(&eiffel, Some(1e-9), Some(1e-6)));

    // 2D input is placed on the ellipsoid and always yields X/Y/Z
    let values = adapter
        .forward()
        .project_coords(&[0.0, 0.0], Coords::Xy)
        .unwrap();
    assert_eq!(values, vec![6378137.0, 0.0, 0.0]);
}

#[test]
fn test_geocentric_poles() {
    let (lon, lat, height) = Ellipsoid::WGS84.from_geocentric(0.0, 0.0, 6356852.314245);
    assert_eq!((lon, lat), (0.0, 90.0));
    assert_close(height, 100.0, 1e-6);
}

#[test]
fn test_utm_adapter() {
    let zone = UtmZone::new(31, Hemisphere::North).unwrap();
    let adapter = UtmAdapter::new(zone, Datum::WGS84);
    assert_eq!(adapter.to_crs().epsg_code(), Some(32631));

    let eiffel = Geographic::new(2.2945, 48.8582);
    let utm: Projected = adapter.forward().project(&eiffel).unwrap();
    assert_close(utm.x(), 448251.7952059537, 1e-6);
    assert_close(utm.y(), 5411932.677669734, 1e-6);

    let err = adapter
        .forward()
        .project::<Projected, _>(&Geographic::new(3.0, 86.5))
        .unwrap_err();
    assert_eq!(err.direction, Direction::Forward);
    assert_eq!(err.from_crs, "http://www.opengis.net/def/crs/OGC/1.3/CRS84");
    assert_eq!(err.to_crs, "EPSG:32631");
    assert_eq!(err.values, vec![3.0, 86.5]);
}

#[test]
fn test_utm_round_trip() {
    let zone = UtmZone::new(31, Hemisphere::North).unwrap();
    let adapter = UtmAdapter::new(zone, Datum::WGS84);
    // deterministic pseudo random sample of zone 31N
    let mut seed: u64 = 42;
    let mut next = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };
    for _ in 0..1000 {
        let p = Geographic::new(next() * 6.0, next() * 84.0);
        let projected: Projected = adapter.forward().project(&p).unwrap();
        let back: Geographic = adapter.inverse().project(&projected).unwrap();
        assert!(
            back.equals_2d(&p, Some(1e-9)),
            "{:?} != {:?}",
            back,
            p
        );
    }
}

#[test]
fn test_transverse_mercator_scale() {
    let zone = UtmZone::new(56, Hemisphere::South).unwrap();
    let tm = TransverseMercator::utm(&zone, Ellipsoid::WGS84);
    assert_eq!(tm.central_meridian(), 153.0);
    let p = tm.forward(151.0, -33.9).unwrap();
    assert_close(p.x, 315073.8835986343, 1e-6);
    assert_close(p.y, 6247131.133850952, 1e-6);
    assert_close(p.convergence, 1.1158067869507355, 1e-9);
    assert_close(p.scale, 1.0000215882728531, 1e-12);

    let central = tm.forward(153.0, -40.0).unwrap();
    assert_close(central.x, 500000.0, 1e-9);
    assert_close(central.scale, 0.9996, 1e-12);
}

#[test]
fn test_datum_conversion() {
    let greenwich = Geographic::new(-0.00147, 51.47788);
    let osgb = Datum::WGS84.convert(&greenwich, &Datum::OSGB36);
    assert_close(osgb.lat(), 51.47736415721844, 1e-9);
    assert_close(osgb.lon(), 0.00014961757150299556, 1e-9);
    assert_eq!(osgb.opt_elev(), None);

    let back = Datum::OSGB36.convert(&osgb, &Datum::WGS84);
    assert!(back.equals_2d(&greenwich, Some(1e-6)));

    assert_eq!(Datum::WGS84.convert(&greenwich, &Datum::WGS84), greenwich);
    assert_eq!(Datum::from_name("etrs89"), Some(Datum::ETRS89));
    assert_eq!(Datum::from_name("unknown"), None);
}

#[test]
fn test_endpoints() {
    let endpoints = Endpoints::forward(CoordRefSys::crs84(), CoordRefSys::epsg_3857());
    let reversed = endpoints.reversed();
    assert_eq!(reversed.direction, Direction::Inverse);
    assert_eq!(reversed.source, CoordRefSys::epsg_3857());
    assert_eq!(reversed.reversed(), endpoints);

    let err = reversed.failure(1.0, 2.0, None, Some(4.0), "test");
    assert_eq!(err.values, vec![1.0, 2.0, 4.0]);
    assert_eq!(
        err.to_string(),
        "inverse projection from EPSG:3857 to http://www.opengis.net/def/crs/OGC/1.3/CRS84 failed for (1,2,4): test"
    );
}
