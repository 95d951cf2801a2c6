//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile matrix sets

use crate::grid_iterator::GridIterator;
use geoframe_core::bbox::{GeoBox, PositionBox, ProjBox};
use geoframe_core::crs::CoordRefSys;
use geoframe_core::position::{Geographic, Position, Projected, Scalable};
use geoframe_core::projection::{lonlat_to_merc, merc_to_lonlat, EARTH_RADIUS};
use geoframe_core::units::{clip_latitude, clip_longitude};
use std::f64::consts;
use std::fmt;
use std::sync::Arc;

/// Meters per degree on the WGS 84 equator
const METERS_PER_DEGREE: f64 = EARTH_RADIUS * 2.0 * consts::PI / 360.0;

/// Standardized rendering pixel size according to OGC Symbology Encoding standard
pub const PIXEL_SCREEN_WIDTH: f64 = 0.00028;

const METERS_PER_INCH: f64 = 0.0254;

/// Pixels per inch of the standardized rendering pixel
pub const DEFAULT_PPI: f64 = METERS_PER_INCH / PIXEL_SCREEN_WIDTH;

/// Min and max tile numbers (max exclusive)
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TileLimits {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl TileLimits {
    pub fn is_empty(&self) -> bool {
        self.minx >= self.maxx || self.miny >= self.maxy
    }
    /// Number of tiles
    pub fn count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.maxx - self.minx) * u64::from(self.maxy - self.miny)
        }
    }
}

/// Corner of pixel and tile number 0/0
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CanvasOrigin {
    TopLeft,
    BottomLeft,
}

/// Ground units
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Unit {
    Meters,
    Degrees,
}

/// Projects geographic positions into the CRS of a tile matrix set.
///
/// The matrix set maps `bounds` linearly onto its pixel canvas.
pub trait ScaledConverter: Send + Sync + fmt::Debug {
    /// CRS of projected coordinates
    fn crs(&self) -> CoordRefSys;
    /// Bounds of the matrix set in CRS units
    fn bounds(&self) -> ProjBox;
    /// CRS coordinates of a longitude/latitude
    fn project(&self, lon: f64, lat: f64) -> (f64, f64);
    /// Longitude/latitude of CRS coordinates
    fn unproject(&self, x: f64, y: f64) -> (f64, f64);
}

/// Spherical Mercator (EPSG:3857), square world up to ±85.0511°
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMercatorConverter;

impl ScaledConverter for WebMercatorConverter {
    fn crs(&self) -> CoordRefSys {
        CoordRefSys::epsg_3857()
    }
    fn bounds(&self) -> ProjBox {
        let max = consts::PI * EARTH_RADIUS;
        ProjBox::new(-max, -max, max, max)
    }
    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        lonlat_to_merc(lon, lat)
    }
    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let (lon, lat) = merc_to_lonlat(x, y);
        // ±π·R may unproject to ±180.00000000000003
        (clip_longitude(lon), lat)
    }
}

/// Plate carrée on WGS 84 longitude/latitude (CRS84)
#[derive(Clone, Copy, Debug, Default)]
pub struct Crs84Converter;

impl ScaledConverter for Crs84Converter {
    fn crs(&self) -> CoordRefSys {
        CoordRefSys::crs84()
    }
    fn bounds(&self) -> ProjBox {
        ProjBox::new(-180.0, -90.0, 180.0, 90.0)
    }
    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (lon, clip_latitude(lat))
    }
    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        (clip_longitude(x), clip_latitude(y))
    }
}

/// Tile matrix set
///
/// Zoom level `z` has `base_matrix_width * 2^z` by `base_matrix_height * 2^z`
/// tiles of `tile_size` pixels. All conversions chain through "world"
/// coordinates, the fractional pixel coordinates at zoom 0.
#[derive(Clone, Debug)]
pub struct TileMatrixSet {
    id: String,
    /// The width and height of an individual tile, in pixels.
    tile_size: u16,
    origin: CanvasOrigin,
    min_zoom: u8,
    max_zoom: u8,
    /// Number of tile columns at zoom 0
    base_matrix_width: u32,
    /// Number of tile rows at zoom 0
    base_matrix_height: u32,
    unit: Unit,
    converter: Arc<dyn ScaledConverter>,
}

impl TileMatrixSet {
    /// Web Mercator Quad (Google maps compatible)
    pub fn web_mercator_quad() -> TileMatrixSet {
        TileMatrixSet::new(
            "WebMercatorQuad",
            256,
            CanvasOrigin::TopLeft,
            0,
            22,
            (1, 1),
            Unit::Meters,
            Arc::new(WebMercatorConverter),
        )
    }

    /// World CRS84 Quad, two tiles at zoom 0
    pub fn world_crs84_quad() -> TileMatrixSet {
        TileMatrixSet::new(
            "WorldCRS84Quad",
            256,
            CanvasOrigin::TopLeft,
            0,
            17,
            (2, 1),
            Unit::Degrees,
            Arc::new(Crs84Converter),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        tile_size: u16,
        origin: CanvasOrigin,
        min_zoom: u8,
        max_zoom: u8,
        base_matrix: (u32, u32),
        unit: Unit,
        converter: Arc<dyn ScaledConverter>,
    ) -> TileMatrixSet {
        debug_assert!(tile_size > 0 && base_matrix.0 > 0 && base_matrix.1 > 0);
        debug_assert!(min_zoom <= max_zoom);
        TileMatrixSet {
            id: id.to_string(),
            tile_size,
            origin,
            min_zoom,
            max_zoom,
            base_matrix_width: base_matrix.0,
            base_matrix_height: base_matrix.1,
            unit,
            converter,
        }
        .bounded()
    }

    pub fn with_tile_size(self, tile_size: u16) -> TileMatrixSet {
        debug_assert!(tile_size > 0);
        TileMatrixSet { tile_size, ..self }.bounded()
    }

    pub fn with_origin(self, origin: CanvasOrigin) -> TileMatrixSet {
        TileMatrixSet { origin, ..self }
    }

    pub fn with_zoom_range(self, min_zoom: u8, max_zoom: u8) -> TileMatrixSet {
        debug_assert!(min_zoom <= max_zoom);
        TileMatrixSet {
            min_zoom,
            max_zoom,
            ..self
        }
        .bounded()
    }

    /// Limits the zoom range to `max_supported_zoom`
    fn bounded(mut self) -> TileMatrixSet {
        let supported = self.max_supported_zoom();
        if self.max_zoom > supported {
            warn!(
                "Limiting max zoom level of {} from {} to {}",
                self.id, self.max_zoom, supported
            );
            self.max_zoom = supported;
            self.min_zoom = self.min_zoom.min(supported);
        }
        self
    }

    /// Deepest zoom level with tile and pixel indices fitting into `u32`
    pub fn max_supported_zoom(&self) -> u8 {
        let base = u64::from(self.base_matrix_width.max(self.base_matrix_height));
        let fits = |zoom: u8| {
            let tiles = base << zoom;
            tiles <= u64::from(u32::MAX) && tiles * u64::from(self.tile_size) <= 1u64 << 32
        };
        (0..=31u8).rev().find(|&zoom| fits(zoom)).unwrap_or(0)
    }

    /// Zoom level clamped to `max_zoom`
    fn level(&self, zoom: u8) -> u8 {
        if zoom > self.max_zoom {
            trace!("Clamping zoom level {} to {}", zoom, self.max_zoom);
            self.max_zoom
        } else {
            zoom
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn tile_size(&self) -> u16 {
        self.tile_size
    }
    pub fn origin(&self) -> CanvasOrigin {
        self.origin
    }
    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
    pub fn unit(&self) -> Unit {
        self.unit
    }
    pub fn crs(&self) -> CoordRefSys {
        self.converter.crs()
    }
    /// Bounds in CRS units
    pub fn bounds(&self) -> ProjBox {
        self.converter.bounds()
    }

    /// Number of tile columns. Zoom levels above `max_zoom` are clamped.
    pub fn matrix_width(&self, zoom: u8) -> u32 {
        self.base_matrix_width << self.level(zoom)
    }
    /// Number of tile rows. Zoom levels above `max_zoom` are clamped.
    pub fn matrix_height(&self, zoom: u8) -> u32 {
        self.base_matrix_height << self.level(zoom)
    }
    /// Width in pixels
    pub fn map_width(&self, zoom: u8) -> u64 {
        u64::from(self.matrix_width(zoom)) * u64::from(self.tile_size)
    }
    /// Height in pixels
    pub fn map_height(&self, zoom: u8) -> u64 {
        u64::from(self.matrix_height(zoom)) * u64::from(self.tile_size)
    }

    /// Tile width in CRS units
    pub fn tile_resolution(&self, zoom: u8) -> f64 {
        self.bounds().width() / (f64::from(self.base_matrix_width) * zoom_scale(zoom))
    }
    /// Pixel width in CRS units
    pub fn pixel_resolution(&self, zoom: u8) -> f64 {
        self.tile_resolution(zoom) / f64::from(self.tile_size)
    }
    /// Pixel width in meters
    pub fn pixel_resolution_meters(&self, zoom: u8) -> f64 {
        match self.unit {
            Unit::Meters => self.pixel_resolution(zoom),
            Unit::Degrees => self.pixel_resolution(zoom) * METERS_PER_DEGREE,
        }
    }
    /// Scale denominator based on standardized pixel size (https://www.ogc.org/standards/se)
    pub fn scale_denominator(&self, zoom: u8) -> f64 {
        self.scale_denominator_ppi(zoom, DEFAULT_PPI)
    }
    /// Scale denominator for a screen with `ppi` pixels per inch
    pub fn scale_denominator_ppi(&self, zoom: u8, ppi: f64) -> f64 {
        self.pixel_resolution_meters(zoom) * ppi / METERS_PER_INCH
    }
    /// Fractional zoom level of a pixel resolution in CRS units
    pub fn zoom_from_pixel_resolution(&self, resolution: f64) -> f64 {
        (self.pixel_resolution(0) / resolution).log2()
    }
    /// Fractional zoom level of a scale denominator (standardized pixel size)
    pub fn zoom_from_scale_denominator(&self, scale_denominator: f64) -> f64 {
        (self.scale_denominator(0) / scale_denominator).log2()
    }

    /// World coordinates of a geographic position
    pub fn position_to_world(&self, position: &Geographic) -> Projected {
        let (x, y) = self.converter.project(position.lon(), position.lat());
        self.projected_to_world(&Projected::new(x, y))
    }

    /// World coordinates of a position in the CRS of the matrix set
    pub fn projected_to_world(&self, position: &Projected) -> Projected {
        let bounds = self.bounds();
        let sx = (position.x() - bounds.min_x()) / bounds.width();
        let sy = (bounds.max_y() - position.y()) / bounds.height();
        let wx = sx * self.map_width(0) as f64;
        let wy = match self.origin {
            CanvasOrigin::TopLeft => sy * self.map_height(0) as f64,
            CanvasOrigin::BottomLeft => (1.0 - sy) * self.map_height(0) as f64,
        };
        Projected::new(wx, wy)
    }

    /// Position in the CRS of the matrix set of world coordinates
    pub fn world_to_projected(&self, world: &Projected) -> Projected {
        let bounds = self.bounds();
        let sx = world.x() / self.map_width(0) as f64;
        let sy = match self.origin {
            CanvasOrigin::TopLeft => world.y() / self.map_height(0) as f64,
            CanvasOrigin::BottomLeft => 1.0 - world.y() / self.map_height(0) as f64,
        };
        Projected::new(
            bounds.min_x() + sx * bounds.width(),
            bounds.max_y() - sy * bounds.height(),
        )
    }

    /// Geographic position of world coordinates
    pub fn world_to_position(&self, world: &Projected) -> Geographic {
        let projected = self.world_to_projected(world);
        let (lon, lat) = self.converter.unproject(projected.x(), projected.y());
        Geographic::new(lon, lat)
    }

    /// Pixel containing world coordinates, clamped to the canvas.
    /// Zoom levels above `max_zoom` are clamped.
    pub fn world_to_pixel(&self, world: &Projected, zoom: u8) -> Scalable {
        let zoom = self.level(zoom);
        let scale = zoom_scale(zoom);
        Scalable::new(
            zoom,
            clamp_index(world.x() * scale, self.map_width(zoom)),
            clamp_index(world.y() * scale, self.map_height(zoom)),
        )
    }

    /// Tile containing world coordinates
    pub fn world_to_tile(&self, world: &Projected, zoom: u8) -> Scalable {
        self.pixel_to_tile(&self.world_to_pixel(world, zoom))
    }

    pub fn position_to_pixel(&self, position: &Geographic, zoom: u8) -> Scalable {
        self.world_to_pixel(&self.position_to_world(position), zoom)
    }

    pub fn position_to_tile(&self, position: &Geographic, zoom: u8) -> Scalable {
        self.world_to_tile(&self.position_to_world(position), zoom)
    }

    /// Tile containing a pixel
    pub fn pixel_to_tile(&self, pixel: &Scalable) -> Scalable {
        let size = u32::from(self.tile_size);
        Scalable::new(pixel.zoom, pixel.x / size, pixel.y / size)
    }

    /// World coordinates of the pixel center
    pub fn pixel_to_world(&self, pixel: &Scalable) -> Projected {
        let scale = zoom_scale(pixel.zoom);
        Projected::new(
            (f64::from(pixel.x) + 0.5) / scale,
            (f64::from(pixel.y) + 0.5) / scale,
        )
    }

    /// Geographic position of the pixel center
    pub fn pixel_to_position(&self, pixel: &Scalable) -> Geographic {
        self.world_to_position(&self.pixel_to_world(pixel))
    }

    /// Geographic position of the tile center
    pub fn tile_to_position(&self, tile: &Scalable) -> Geographic {
        let size = f64::from(self.tile_size);
        let scale = zoom_scale(tile.zoom);
        self.world_to_position(&Projected::new(
            (f64::from(tile.x) + 0.5) * size / scale,
            (f64::from(tile.y) + 0.5) * size / scale,
        ))
    }

    /// Tile bounds in the CRS of the matrix set
    pub fn tile_to_projected_bounds(&self, tile: &Scalable) -> ProjBox {
        let size = f64::from(self.tile_size);
        let scale = zoom_scale(tile.zoom);
        let corner = |x: f64, y: f64| {
            self.world_to_projected(&Projected::new(x * size / scale, y * size / scale))
        };
        let (x, y) = (f64::from(tile.x), f64::from(tile.y));
        let a = corner(x, y);
        let b = corner(x + 1.0, y + 1.0);
        ProjBox::new(
            a.x().min(b.x()),
            a.y().min(b.y()),
            a.x().max(b.x()),
            a.y().max(b.y()),
        )
    }

    /// Geographic tile bounds, spanned by the centers of the edge pixels
    pub fn tile_to_bounds(&self, tile: &Scalable) -> GeoBox {
        let size = f64::from(self.tile_size);
        let scale = zoom_scale(tile.zoom);
        let pixel_center = |index: u32, offset: f64| (f64::from(index) * size + offset) / scale;
        let first = self.world_to_position(&Projected::new(
            pixel_center(tile.x, 0.5),
            pixel_center(tile.y, 0.5),
        ));
        let last = self.world_to_position(&Projected::new(
            pixel_center(tile.x, size - 0.5),
            pixel_center(tile.y, size - 0.5),
        ));
        GeoBox::new(
            first.lon().min(last.lon()),
            first.lat().min(last.lat()),
            first.lon().max(last.lon()),
            first.lat().max(last.lat()),
        )
    }

    /// Tile index limits covering an extent in CRS units, indexed by zoom level
    pub fn projected_tile_limits(&self, extent: &ProjBox, tolerance: i32) -> Vec<TileLimits> {
        // Based on mapcache_grid_compute_limits
        const EPSILON: f64 = 0.0000001;
        let bounds = self.bounds();
        (0..=self.max_zoom)
            .map(|zoom| {
                let unit = self.tile_resolution(zoom);
                let unitheight = bounds.height() / f64::from(self.matrix_height(zoom));
                let (level_maxx, level_maxy) =
                    (self.matrix_width(zoom) as i64, self.matrix_height(zoom) as i64);
                let minx = ((extent.min_x() - bounds.min_x()) / unit + EPSILON).floor() as i64;
                let maxx = ((extent.max_x() - bounds.min_x()) / unit - EPSILON).ceil() as i64;
                let (miny, maxy) = match self.origin {
                    CanvasOrigin::BottomLeft => (
                        ((extent.min_y() - bounds.min_y()) / unitheight + EPSILON).floor() as i64,
                        ((extent.max_y() - bounds.min_y()) / unitheight - EPSILON).ceil() as i64,
                    ),
                    CanvasOrigin::TopLeft => (
                        ((bounds.max_y() - extent.max_y()) / unitheight + EPSILON).floor() as i64,
                        ((bounds.max_y() - extent.min_y()) / unitheight - EPSILON).ceil() as i64,
                    ),
                };
                let tolerance = i64::from(tolerance);
                // to avoid requesting out-of-range tiles
                let clamp = |v: i64, max: i64| v.max(0).min(max) as u32;
                TileLimits {
                    minx: clamp(minx - tolerance, level_maxx),
                    miny: clamp(miny - tolerance, level_maxy),
                    maxx: clamp(maxx + tolerance, level_maxx),
                    maxy: clamp(maxy + tolerance, level_maxy),
                }
            })
            .collect()
    }

    /// Tile index limits covering a geographic box, one list per side of the antimeridian
    pub fn tile_limits(&self, bbox: &GeoBox, tolerance: i32) -> Vec<Vec<TileLimits>> {
        bbox.split_on_antimeridian()
            .iter()
            .map(|part| {
                let (minx, miny) = self.converter.project(part.west(), part.south());
                let (maxx, maxy) = self.converter.project(part.east(), part.north());
                self.projected_tile_limits(&ProjBox::new(minx, miny, maxx, maxy), tolerance)
            })
            .collect()
    }

    /// Tiles covering a geographic box, level by level
    pub fn tiles(&self, bbox: &GeoBox, min_zoom: u8, max_zoom: u8) -> impl Iterator<Item = Scalable> {
        let min_zoom = min_zoom.max(self.min_zoom);
        let max_zoom = max_zoom.min(self.max_zoom);
        let parts: Vec<GridIterator> = self
            .tile_limits(bbox, 0)
            .into_iter()
            .map(|limits| GridIterator::new(min_zoom, max_zoom, limits))
            .collect();
        parts.into_iter().flatten()
    }
}

impl Default for TileMatrixSet {
    fn default() -> Self {
        TileMatrixSet::web_mercator_quad()
    }
}

fn zoom_scale(zoom: u8) -> f64 {
    2f64.powi(i32::from(zoom))
}

/// Floors a pixel coordinate into `[0, size - 1]`
fn clamp_index(value: f64, size: u64) -> u32 {
    let max = (size - 1) as f64;
    let index = value.floor();
    if index < 0.0 || index > max || index.is_nan() {
        trace!("Clamping pixel index {} into [0, {}]", value, max);
    }
    index.max(0.0).min(max) as u32
}

