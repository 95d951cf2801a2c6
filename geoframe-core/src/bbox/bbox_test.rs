//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::bbox::{GeoBox, PositionBox, ProjBox};
use crate::coords::Coords;
use crate::error::FormatError;
use crate::position::{Geographic, Position, Projected};

#[test]
fn test_projbox() {
    let b = ProjBox::new(-10.0, -5.0, 20.0, 15.0);
    assert_eq!(b.width(), 30.0);
    assert_eq!(b.height(), 20.0);
    assert_eq!(b.coord_type(), Coords::Xy);
    assert_eq!(b.min(), Projected::new(-10.0, -5.0));
    assert_eq!(b.max(), Projected::new(20.0, 15.0));
    assert_eq!(b.center(), Projected::new(5.0, 5.0));
    assert_eq!(b.corners_2d()[1], Projected::new(20.0, -5.0));
    assert!(b.intersects_point_2d(&Projected::new(20.0, 0.0)));
    assert!(!b.intersects_point_2d(&Projected::new(20.1, 0.0)));
    assert!(b.intersects_2d(&ProjBox::new(19.0, 14.0, 30.0, 30.0)));
    assert!(!b.intersects_2d(&ProjBox::new(21.0, 14.0, 30.0, 30.0)));

    let merged = b.merge(&ProjBox::new(0.0, -20.0, 5.0, 0.0));
    assert_eq!(merged.values(), vec![-10.0, -20.0, 20.0, 15.0]);
}

#[test]
fn test_projbox_dimensions() {
    let b = ProjBox::from_coords(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert!(b.is_3d());
    assert!(!b.is_measured());
    assert_eq!(b.min_z(), Some(3.0));
    assert_eq!(b.max(), Projected::new(4.0, 5.0).with_z(6.0));
    assert_eq!(b.to_string(), "1,2,3,4,5,6");

    let b = ProjBox::new(0.0, 0.0, 1.0, 1.0).with_z(0.0, 2.0).with_m(1.0, 3.0);
    assert_eq!(b.coord_type(), Coords::Xyzm);
    assert_eq!(b.values(), vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 3.0]);

    // merging with a 2D box drops z and m
    let merged = b.merge(&ProjBox::new(0.0, 0.0, 2.0, 2.0));
    assert_eq!(merged.coord_type(), Coords::Xy);

    assert_eq!(
        ProjBox::from_coords(&[1.0, 2.0, 3.0]),
        Err(FormatError::InvalidArity {
            kind: "projected box",
            expected: "4, 6 or 8".to_string(),
            actual: 3
        })
    );
}

#[test]
fn test_projbox_from_positions() {
    let points = vec![
        Projected::new(1.0, 5.0),
        Projected::new(-2.0, 3.0),
        Projected::new(4.0, -1.0),
    ];
    let b = ProjBox::from_positions(&points).unwrap();
    assert_eq!(b, ProjBox::new(-2.0, -1.0, 4.0, 5.0));
    let empty: Vec<Projected> = Vec::new();
    assert_eq!(ProjBox::from_positions(&empty), None);
}

#[test]
fn test_box_equality() {
    let a = ProjBox::new(0.0, 0.0, 10.0, 10.0).with_z(0.0, 5.0);
    let b = ProjBox::new(0.01, 0.0, 10.0, 9.99).with_z(0.0, 5.2);
    assert!(!a.equals_2d(&b, None));
    assert!(a.equals_2d(&b, Some(0.05)));
    assert!(!a.equals_3d(&b, Some(0.05), Some(0.1)));
    assert!(a.equals_3d(&b, Some(0.05), Some(0.5)));
    let c = ProjBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.equals_3d(&c, None, Some(100.0)));
}

#[test]
fn test_geobox_clipping() {
    let b = GeoBox::new(-200.0, -95.0, 200.0, 95.0);
    assert_eq!(b, GeoBox::world());
    assert_eq!(b.width(), 360.0);
    assert_eq!(b.height(), 180.0);
    assert!(!b.spans_antimeridian());
}

#[test]
fn test_geobox_antimeridian() {
    let b = GeoBox::new(177.0, -20.0, -178.0, -16.0);
    assert!(b.spans_antimeridian());
    assert_eq!(b.width(), 5.0);
    assert_eq!(b.height(), 4.0);

    let parts = b.split_on_antimeridian();
    assert_eq!(
        parts,
        vec![
            GeoBox::new(177.0, -20.0, 180.0, -16.0),
            GeoBox::new(-180.0, -20.0, -178.0, -16.0)
        ]
    );
    assert_eq!(parts[0].merge_geographically(&parts[1]), b);

    assert!(b.intersects_point_2d(&Geographic::new(179.0, -18.0)));
    assert!(b.intersects_point_2d(&Geographic::new(-179.0, -18.0)));
    assert!(!b.intersects_point_2d(&Geographic::new(0.0, -18.0)));

    let c = b.center();
    assert_eq!((c.lon(), c.lat()), (179.5, -18.0));

    let complement = b.complementary();
    assert!(!complement.spans_antimeridian());
    assert_eq!(complement.width(), 355.0);
    assert_eq!(complement.complementary(), b);

    let plain = GeoBox::new(10.0, 0.0, 20.0, 5.0);
    assert_eq!(plain.split_on_antimeridian(), vec![plain]);
}

#[test]
fn test_geobox_merge() {
    let a = GeoBox::new(0.0, 0.0, 10.0, 10.0);
    let b = GeoBox::new(20.0, -5.0, 30.0, 5.0);
    assert_eq!(a.merge_geographically(&b), GeoBox::new(0.0, -5.0, 30.0, 10.0));
    assert_eq!(b.merge_geographically(&a), GeoBox::new(0.0, -5.0, 30.0, 10.0));

    // shorter way across the antimeridian
    let east = GeoBox::new(170.0, 0.0, 175.0, 1.0);
    let west = GeoBox::new(-175.0, 0.0, -170.0, 1.0);
    let merged = east.merge_geographically(&west);
    assert_eq!((merged.west(), merged.east()), (170.0, -170.0));
    assert_eq!(merged.width(), 20.0);

    // contained box
    let inner = GeoBox::new(2.0, 2.0, 3.0, 3.0);
    assert_eq!(a.merge_geographically(&inner), a);

    // boxes covering the globe together
    let left = GeoBox::new(-180.0, 0.0, 0.0, 1.0);
    let right = GeoBox::new(0.0, 0.0, 180.0, 1.0);
    let merged = left.merge_geographically(&right);
    assert_eq!((merged.west(), merged.east()), (-180.0, 180.0));

    // elevation ranges merge when present on both sides
    let a3 = a.with_elev(0.0, 100.0);
    let b3 = b.with_elev(-10.0, 50.0);
    let merged = a3.merge_geographically(&b3);
    assert_eq!((merged.min_elev(), merged.max_elev()), (Some(-10.0), Some(100.0)));
}

#[test]
fn test_geobox_intersects() {
    let spanning = GeoBox::new(170.0, -10.0, -170.0, 10.0);
    assert!(spanning.intersects_2d(&GeoBox::new(-175.0, 0.0, -160.0, 20.0)));
    assert!(spanning.intersects_2d(&GeoBox::new(160.0, 0.0, 171.0, 20.0)));
    assert!(!spanning.intersects_2d(&GeoBox::new(0.0, 0.0, 10.0, 5.0)));
    assert!(!spanning.intersects_2d(&GeoBox::new(175.0, 11.0, 176.0, 20.0)));
    assert!(spanning.intersects_2d(&GeoBox::new(175.0, 0.0, -175.0, 1.0)));
}

#[test]
fn test_geobox_parse() {
    let b: GeoBox = "-180,-85,180,85".parse().unwrap();
    assert_eq!(b, GeoBox::new(-180.0, -85.0, 180.0, 85.0));
    assert_eq!(b.min(), Geographic::new(-180.0, -85.0));
    assert_eq!(b.max().lat(), 85.0);
    assert_eq!(b.to_string(), "-180,-85,180,85");

    let b = GeoBox::parse("1 2 3 4 5 6", " ").unwrap();
    assert_eq!((b.min_elev(), b.max_elev()), (Some(3.0), Some(6.0)));
    assert_eq!((b.east(), b.north()), (4.0, 5.0));

    assert!("1,2,3,4,5".parse::<GeoBox>().is_err());
    assert!("1,2,x,4".parse::<GeoBox>().is_err());
    assert_eq!(b.min().x(), 1.0);
}
