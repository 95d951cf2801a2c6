//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile_matrix_set::*;
use geoframe_core::bbox::{GeoBox, PositionBox, ProjBox};
use geoframe_core::crs::CoordRefSys;
use geoframe_core::position::{Geographic, Position, Projected, Scalable};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{} != {} (tolerance {})",
        actual,
        expected,
        tolerance
    );
}

fn chicago() -> Geographic {
    Geographic::new(-87.65, 41.85)
}

#[test]
fn test_web_mercator_quad() {
    let tms = TileMatrixSet::web_mercator_quad();
    assert_eq!(tms.id(), "WebMercatorQuad");
    assert_eq!(tms.crs(), CoordRefSys::epsg_3857());
    assert_eq!(tms.unit(), Unit::Meters);
    assert_eq!((tms.min_zoom(), tms.max_zoom()), (0, 22));
    assert_close(tms.bounds().max_x(), 20037508.342789244, 1e-6);
    assert_eq!(tms.matrix_width(0), 1);
    assert_eq!(tms.matrix_height(10), 1024);
    assert_eq!(tms.map_width(3), 2048);
    assert_eq!(tms.map_height(22), 256 << 22);
}

#[test]
fn test_resolutions() {
    let tms = TileMatrixSet::web_mercator_quad();
    assert_close(tms.pixel_resolution(0), 156543.03392804097, 1e-6);
    assert_close(tms.pixel_resolution(10), 152.8740565703525, 1e-9);
    assert_close(tms.pixel_resolution_meters(10), 152.8740565703525, 1e-9);
    assert_close(tms.tile_resolution(10), 152.8740565703525 * 256.0, 1e-6);
    assert_close(tms.scale_denominator(10), 545978.7734655447, 1e-6);
    assert_close(
        tms.scale_denominator_ppi(10, 2.0 * DEFAULT_PPI),
        2.0 * 545978.7734655447,
        1e-6,
    );

    assert_close(tms.zoom_from_pixel_resolution(152.87405657035254), 10.0, 1e-9);
    assert_close(tms.zoom_from_scale_denominator(545978.7734655448), 10.0, 1e-9);
    assert_close(tms.zoom_from_scale_denominator(2.0 * 545978.7734655448), 9.0, 1e-9);
}

#[test]
fn test_world_crs84_quad() {
    let tms = TileMatrixSet::world_crs84_quad();
    assert_eq!(tms.id(), "WorldCRS84Quad");
    assert_eq!(tms.crs(), CoordRefSys::crs84());
    assert_eq!(tms.unit(), Unit::Degrees);
    assert_eq!((tms.matrix_width(0), tms.matrix_height(0)), (2, 1));
    assert_eq!(tms.map_width(1), 1024);
    assert_close(tms.pixel_resolution(10), 0.0006866455078125, 1e-15);
    assert_close(tms.pixel_resolution_meters(10), 76.43702828517625, 1e-9);
    assert_close(tms.scale_denominator(10), 272989.38673277234, 1e-6);

    let world = tms.position_to_world(&chicago());
    assert_close(world.x(), (180.0 - 87.65) / 360.0 * 512.0, 1e-9);
    assert_close(world.y(), (90.0 - 41.85) / 180.0 * 256.0, 1e-9);

    let projected = tms.tile_to_projected_bounds(&Scalable::new(0, 1, 0));
    assert!(projected.equals_2d(&ProjBox::new(0.0, -90.0, 180.0, 90.0), Some(1e-9)));
    let bounds = tms.tile_to_bounds(&Scalable::new(0, 1, 0));
    assert_close(bounds.west(), 0.3515625, 1e-9);
    assert_close(bounds.south(), -89.6484375, 1e-9);
    assert_close(bounds.east(), 179.6484375, 1e-9);
    assert_close(bounds.north(), 89.6484375, 1e-9);
    assert_eq!(
        tms.position_to_tile(&Geographic::new(10.0, 50.0), 0),
        Scalable::new(0, 1, 0)
    );
}

#[test]
fn test_position_to_pixel() {
    let tms = TileMatrixSet::web_mercator_quad();
    let world = tms.position_to_world(&chicago());
    assert_close(world.x(), 65.67111111111112, 1e-9);
    assert_close(world.y(), 95.1749265469741, 1e-9);

    assert_eq!(tms.position_to_pixel(&chicago(), 3), Scalable::new(3, 525, 761));
    assert_eq!(tms.position_to_tile(&chicago(), 3), Scalable::new(3, 2, 2));
    assert_eq!(
        tms.position_to_pixel(&chicago(), 10),
        Scalable::new(10, 67247, 97459)
    );
    assert_eq!(
        tms.position_to_tile(&chicago(), 10),
        Scalable::new(10, 262, 380)
    );
    assert_eq!(
        tms.pixel_to_tile(&Scalable::new(10, 67247, 97459)),
        Scalable::new(10, 262, 380)
    );

    // pixel center is inside the pixel
    let center = tms.pixel_to_position(&Scalable::new(10, 67247, 97459));
    assert_eq!(
        tms.position_to_pixel(&center, 10),
        Scalable::new(10, 67247, 97459)
    );
    assert_close(center.lon(), chicago().lon(), 1e-3);
    assert_close(center.lat(), chicago().lat(), 1e-3);
}

#[test]
fn test_pixel_clamping() {
    let tms = TileMatrixSet::web_mercator_quad();
    // latitudes beyond the Mercator limit end up in the first or last row
    assert_eq!(
        tms.position_to_pixel(&Geographic::new(0.0, 90.0), 2),
        Scalable::new(2, 512, 0)
    );
    assert_eq!(
        tms.position_to_pixel(&Geographic::new(0.0, -90.0), 2),
        Scalable::new(2, 512, 1023)
    );
    assert_eq!(
        tms.world_to_pixel(&Projected::new(256.0, 300.0), 0),
        Scalable::new(0, 255, 255)
    );
    assert_eq!(
        tms.world_to_pixel(&Projected::new(-1.0, -0.5), 4),
        Scalable::new(4, 0, 0)
    );
    assert_eq!(
        tms.world_to_tile(&Projected::new(256.0, 256.0), 1),
        Scalable::new(1, 1, 1)
    );
}

#[test]
fn test_world_round_trip() {
    let tms = TileMatrixSet::web_mercator_quad();
    let projected = Projected::new(-1017529.7205322646, 7044436.526761843);
    let world = tms.projected_to_world(&projected);
    assert_close(world.x(), 486.0 / 4.0, 1e-9);
    assert_close(world.y(), 332.0 / 4.0, 1e-9);
    let back = tms.world_to_projected(&world);
    assert_close(back.x(), projected.x(), 1e-6);
    assert_close(back.y(), projected.y(), 1e-6);

    let position = tms.world_to_position(&Projected::new(128.0, 128.0));
    assert_close(position.lon(), 0.0, 1e-9);
    assert_close(position.lat(), 0.0, 1e-9);
}

#[test]
fn test_tile_bounds() {
    let tms = TileMatrixSet::web_mercator_quad();
    let tile = Scalable::new(10, 486, 332);

    let projected = tms.tile_to_projected_bounds(&tile);
    let expected = ProjBox::new(
        -1017529.7205322646,
        7005300.768279834,
        -978393.9620502554,
        7044436.526761843,
    );
    assert!(projected.equals_2d(&expected, Some(1e-6)));

    // centers of the edge pixels
    let bounds = tms.tile_to_bounds(&tile);
    assert_close(bounds.west(), -9.139938354492173, 1e-9);
    assert_close(bounds.south(), 53.12081736139974, 1e-9);
    assert_close(bounds.east(), -8.789749145507807, 1e-9);
    assert_close(bounds.north(), 53.330462921131215, 1e-9);
    let north_west = tms.pixel_to_position(&Scalable::new(10, 486 * 256, 332 * 256));
    assert_close(bounds.west(), north_west.lon(), 1e-12);
    assert_close(bounds.north(), north_west.lat(), 1e-12);

    let center = tms.tile_to_position(&tile);
    assert_close(center.lon(), -8.96484374999999, 1e-9);
    assert_close(center.lat(), 53.22576843579022, 1e-9);
    assert!(bounds.intersects_point_2d(&center));

    let world = tms.tile_to_bounds(&Scalable::new(0, 0, 0));
    assert_close(world.west(), -179.296875, 1e-9);
    assert_close(world.east(), 179.296875, 1e-9);
    assert_close(world.south(), -84.9901001802348, 1e-9);
    assert_close(world.north(), 84.9901001802348, 1e-9);

    let quarter = tms.tile_to_projected_bounds(&Scalable::new(1, 1, 0));
    assert_close(quarter.min_x(), 0.0, 1e-6);
    assert_close(quarter.min_y(), 0.0, 1e-6);
    assert_close(quarter.max_x(), 20037508.342789244, 1e-6);
    assert_close(quarter.max_y(), 20037508.342789244, 1e-6);
    let quarter = tms.tile_to_bounds(&Scalable::new(1, 1, 0));
    assert_close(quarter.west(), 0.3515625, 1e-9);
    assert_close(quarter.south(), 0.3515602939922582, 1e-9);
    assert_close(quarter.east(), 179.6484375, 1e-9);
    assert_close(quarter.north(), 85.02070774312594, 1e-9);

    let north_west = tms.tile_to_bounds(&Scalable::new(1, 0, 0));
    assert_close(north_west.west(), -179.6484375, 1e-9);
    assert_close(north_west.north(), 85.02070774312594, 1e-9);
}

#[test]
fn test_zoom_limits() {
    let tms = TileMatrixSet::web_mercator_quad();
    assert_eq!(tms.max_supported_zoom(), 24);
    assert_eq!(TileMatrixSet::world_crs84_quad().max_supported_zoom(), 23);
    assert_eq!(tms.clone().with_tile_size(512).max_supported_zoom(), 23);

    // zoom range is limited to u32 pixel indices
    let deep = tms.clone().with_zoom_range(0, 30);
    assert_eq!((deep.min_zoom(), deep.max_zoom()), (0, 24));
    assert_eq!(deep.map_width(24), 1 << 32);
    let deep = tms.clone().with_zoom_range(28, 30);
    assert_eq!((deep.min_zoom(), deep.max_zoom()), (24, 24));

    // deeper zoom levels are clamped to the max zoom level
    let position = Geographic::new(170.0, 0.0);
    assert_eq!(
        tms.position_to_tile(&position, 25),
        tms.position_to_tile(&position, 22)
    );
    assert_eq!(tms.position_to_tile(&position, 32).zoom, 22);
    assert_eq!(tms.position_to_pixel(&position, 255).zoom, 22);
    assert_eq!(tms.matrix_width(40), 1 << 22);

    let deep = tms.clone().with_zoom_range(0, 24);
    let tile = deep.position_to_tile(&position, 24);
    assert_eq!(tile, Scalable::new(24, 16311182, 8388608));
    let pixel = deep.world_to_pixel(&Projected::new(256.0, 0.0), 24);
    assert_eq!(pixel, Scalable::new(24, u32::MAX, 0));

    // reverse conversions accept any zoom level
    let bounds = tms.tile_to_projected_bounds(&Scalable::new(32, u32::MAX, 0));
    assert_close(bounds.max_x(), 20037508.342789244, 1e-6);
    assert!(tms.tile_to_bounds(&Scalable::new(40, 0, 0)).west() < -179.9);
}

#[test]
fn test_bottom_left_origin() {
    let tms = TileMatrixSet::web_mercator_quad().with_origin(CanvasOrigin::BottomLeft);
    assert_eq!(tms.origin(), CanvasOrigin::BottomLeft);
    assert_eq!(tms.position_to_pixel(&chicago(), 3), Scalable::new(3, 525, 1286));
    assert_eq!(tms.position_to_tile(&chicago(), 3), Scalable::new(3, 2, 5));

    // row numbers are flipped, extents are not
    let top_left = TileMatrixSet::web_mercator_quad();
    assert!(tms
        .tile_to_projected_bounds(&Scalable::new(8, 133, 165))
        .equals_2d(
            &top_left.tile_to_projected_bounds(&Scalable::new(8, 133, 90)),
            Some(1e-6)
        ));
    let center = tms.tile_to_position(&Scalable::new(8, 133, 165));
    assert_close(center.lon(), 7.734374999999989, 1e-9);
    assert_close(center.lat(), 46.55886030311719, 1e-9);
}

#[test]
fn test_projected_tile_limits() {
    let tms = TileMatrixSet::web_mercator_quad();

    let limits = tms.projected_tile_limits(&tms.tile_to_projected_bounds(&Scalable::new(0, 0, 0)), 0);
    assert_eq!(limits.len(), 23);
    assert_eq!(
        limits[0],
        TileLimits {
            minx: 0,
            miny: 0,
            maxx: 1,
            maxy: 1,
        }
    );
    assert_eq!(
        limits[10],
        TileLimits {
            minx: 0,
            miny: 0,
            maxx: 1024,
            maxy: 1024,
        }
    );
    assert_eq!(limits[10].count(), 1024 * 1024);

    let extent = ProjBox::new(
        -1017529.7205322683,
        7005300.768279828,
        -978393.9620502591,
        7044436.526761841,
    );
    let limits = tms.projected_tile_limits(&extent, 0);
    assert_eq!(
        limits[9],
        TileLimits {
            minx: 243,
            miny: 166,
            maxx: 244,
            maxy: 167,
        }
    );
    assert_eq!(
        limits[10],
        TileLimits {
            minx: 486,
            miny: 332,
            maxx: 487,
            maxy: 333,
        }
    );

    let limits = tms
        .with_origin(CanvasOrigin::BottomLeft)
        .projected_tile_limits(&extent, 0);
    assert_eq!(
        limits[10],
        TileLimits {
            minx: 486,
            miny: 691,
            maxx: 487,
            maxy: 692,
        }
    );
}

#[test]
fn test_tile_limits() {
    let tms = TileMatrixSet::web_mercator_quad();
    let switzerland = GeoBox::new(5.9, 45.8, 10.5, 47.8);

    let limits = tms.tile_limits(&switzerland, 0);
    assert_eq!(limits.len(), 1);
    assert_eq!(
        limits[0][5],
        TileLimits {
            minx: 16,
            miny: 11,
            maxx: 17,
            maxy: 12,
        }
    );
    assert_eq!(
        limits[0][8],
        TileLimits {
            minx: 132,
            miny: 89,
            maxx: 136,
            maxy: 92,
        }
    );
    assert_eq!(
        limits[0][12],
        TileLimits {
            minx: 2115,
            miny: 1427,
            maxx: 2168,
            maxy: 1461,
        }
    );

    let limits = tms.tile_limits(&switzerland, 1);
    assert_eq!(
        limits[0][8],
        TileLimits {
            minx: 131,
            miny: 88,
            maxx: 137,
            maxy: 93,
        }
    );
    // tolerance never leaves the matrix
    assert_eq!(
        limits[0][0],
        TileLimits {
            minx: 0,
            miny: 0,
            maxx: 1,
            maxy: 1,
        }
    );
}

#[test]
fn test_tiles() {
    let tms = TileMatrixSet::web_mercator_quad();
    let switzerland = GeoBox::new(5.9, 45.8, 10.5, 47.8);
    let tiles: Vec<Scalable> = tms.tiles(&switzerland, 0, 5).collect();
    assert_eq!(tiles.first(), Some(&Scalable::new(0, 0, 0)));
    assert_eq!(tiles.last(), Some(&Scalable::new(5, 16, 11)));
    assert_eq!(tiles.len(), 6);
    for tile in &tiles {
        assert!(tms.tile_to_bounds(tile).intersects_2d(&switzerland));
    }
    assert_eq!(tms.tiles(&switzerland, 8, 8).count(), 12);

    // zoom range of the matrix set limits iteration
    let tms = tms.with_zoom_range(2, 3);
    let zooms: Vec<u8> = tms.tiles(&switzerland, 0, 10).map(|t| t.zoom).collect();
    assert_eq!(zooms.first(), Some(&2));
    assert_eq!(zooms.last(), Some(&3));
}
