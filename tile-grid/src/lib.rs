//! A library for tile matrix set calculations
//!
//! ## Predefined tile matrix sets
//!
//! ```rust
//! use geoframe_core::position::{Geographic, Scalable};
//! use tile_grid::TileMatrixSet;
//!
//! let tms = TileMatrixSet::web_mercator_quad();
//! let chicago = Geographic::new(-87.65, 41.85);
//! assert_eq!(tms.position_to_tile(&chicago, 3), Scalable::new(3, 2, 2));
//! assert_eq!(tms.matrix_width(3), 8);
//! ```
//!
//! ## Quad-keys
//!
//! ```rust
//! use geoframe_core::position::Scalable;
//! use tile_grid::{quad_key, quad_key_to_tile};
//!
//! assert_eq!(quad_key(&Scalable::new(3, 3, 5)).unwrap(), "213");
//! assert_eq!(quad_key_to_tile("213").unwrap(), Scalable::new(3, 3, 5));
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use geoframe_core::bbox::GeoBox;
//! use tile_grid::TileMatrixSet;
//!
//! let tms = TileMatrixSet::web_mercator_quad();
//! for tile in tms.tiles(&GeoBox::new(5.9, 45.8, 10.5, 47.8), 0, 2) {
//!     println!("Tile {}", tile.to_path());
//! }
//! ```

#[macro_use]
extern crate log;

mod grid_iterator;
mod quadkey;
mod tile_matrix_set;
#[cfg(test)]
mod tile_matrix_set_test;
mod tmscfg;

pub use grid_iterator::GridIterator;
pub use quadkey::{quad_key, quad_key_to_tile, MAX_QUADKEY_ZOOM};
pub use tile_matrix_set::{
    CanvasOrigin, Crs84Converter, ScaledConverter, TileLimits, TileMatrixSet, Unit,
    WebMercatorConverter, DEFAULT_PPI, PIXEL_SCREEN_WIDTH,
};
