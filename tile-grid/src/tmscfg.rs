//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile_matrix_set::{CanvasOrigin, TileMatrixSet};
use geoframe_core::config::{Config, TileMatrixSetCfg};

impl<'a> Config<'a, TileMatrixSetCfg> for TileMatrixSet {
    fn from_config(cfg: &TileMatrixSetCfg) -> Result<Self, String> {
        let tms = match cfg.predefined.as_ref().map(String::as_str) {
            Some("web_mercator_quad") => TileMatrixSet::web_mercator_quad(),
            Some("world_crs84_quad") => TileMatrixSet::world_crs84_quad(),
            Some(name) => return Err(format!("Unkown tile matrix set '{}'", name)),
            None => return Err("Invalid tile matrix set definition".to_string()),
        };
        let origin = match &cfg.origin as &str {
            "TopLeft" => CanvasOrigin::TopLeft,
            "BottomLeft" => CanvasOrigin::BottomLeft,
            _ => return Err(format!("Unexpected enum value '{}'", cfg.origin)),
        };
        if cfg.tile_size == 0 {
            return Err("Tile size must be positive".to_string());
        }
        let tms = tms.with_tile_size(cfg.tile_size);
        if cfg.min_zoom > cfg.max_zoom || cfg.max_zoom > tms.max_supported_zoom() {
            return Err(format!(
                "Invalid zoom range {}-{}",
                cfg.min_zoom, cfg.max_zoom
            ));
        }
        info!(
            "Using tile matrix set {} with {}px tiles, zoom {}-{}",
            tms.id(),
            cfg.tile_size,
            cfg.min_zoom,
            cfg.max_zoom
        );
        Ok(tms
            .with_origin(origin)
            .with_zoom_range(cfg.min_zoom, cfg.max_zoom))
    }
    fn gen_config() -> String {
        let toml = r#"
[tile_matrix_set]
# web_mercator_quad or world_crs84_quad
predefined = "web_mercator_quad"
tile_size = 256
max_zoom = 22
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        let predefined = match self.id() {
            "WorldCRS84Quad" => "world_crs84_quad",
            _ => "web_mercator_quad",
        };
        let origin = match self.origin() {
            CanvasOrigin::TopLeft => "TopLeft",
            CanvasOrigin::BottomLeft => "BottomLeft",
        };
        format!(
            r#"
[tile_matrix_set]
predefined = "{}"
tile_size = {}
min_zoom = {}
max_zoom = {}
origin = "{}"
"#,
            predefined,
            self.tile_size(),
            self.min_zoom(),
            self.max_zoom(),
            origin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoframe_core::config::parse_config;

    #[test]
    fn test_tms_from_config() {
        let toml = r#"
            #[tile_matrix_set]
            predefined = "web_mercator_quad"
            "#;
        let config: TileMatrixSetCfg = parse_config(toml.to_string(), "").unwrap();
        let tms = TileMatrixSet::from_config(&config).unwrap();
        assert_eq!(tms.id(), "WebMercatorQuad");
        assert_eq!(tms.tile_size(), 256);
        assert_eq!(tms.max_zoom(), 22);
        assert_eq!(tms.origin(), CanvasOrigin::TopLeft);

        let toml = r#"
            predefined = "world_crs84_quad"
            tile_size = 512
            min_zoom = 2
            max_zoom = 10
            origin = "BottomLeft"
            "#;
        let config: TileMatrixSetCfg = parse_config(toml.to_string(), "").unwrap();
        let tms = TileMatrixSet::from_config(&config).unwrap();
        assert_eq!(tms.id(), "WorldCRS84Quad");
        assert_eq!(tms.tile_size(), 512);
        assert_eq!((tms.min_zoom(), tms.max_zoom()), (2, 10));
        assert_eq!(tms.origin(), CanvasOrigin::BottomLeft);
        assert_eq!(tms.matrix_width(0), 2);

        let runtime: TileMatrixSetCfg = parse_config(
            tms.gen_runtime_config().replace("[tile_matrix_set]", ""),
            "",
        )
        .unwrap();
        assert_eq!(runtime.predefined, Some("world_crs84_quad".to_string()));
        assert_eq!(runtime.tile_size, 512);
        assert_eq!(runtime.origin, "BottomLeft");
    }

    #[test]
    fn test_config_errors() {
        let parse = |toml: &str| -> Result<TileMatrixSet, String> {
            let config: TileMatrixSetCfg = parse_config(toml.to_string(), "")?;
            TileMatrixSet::from_config(&config)
        };
        assert_eq!(
            parse(r#"predefined = "swiss""#).err(),
            Some("Unkown tile matrix set 'swiss'".to_string())
        );
        assert_eq!(
            parse("tile_size = 256").err(),
            Some("Invalid tile matrix set definition".to_string())
        );
        assert_eq!(
            parse("predefined = \"web_mercator_quad\"\norigin = \"TopRight\"").err(),
            Some("Unexpected enum value 'TopRight'".to_string())
        );
        assert_eq!(
            parse("predefined = \"web_mercator_quad\"\nmin_zoom = 5\nmax_zoom = 4").err(),
            Some("Invalid zoom range 5-4".to_string())
        );
        assert_eq!(
            parse("predefined = \"web_mercator_quad\"\nmax_zoom = 25").err(),
            Some("Invalid zoom range 0-25".to_string())
        );
        assert_eq!(
            parse("predefined = \"web_mercator_quad\"\ntile_size = 4096\nmax_zoom = 21").err(),
            Some("Invalid zoom range 0-21".to_string())
        );
        assert!(parse("predefined = \"web_mercator_quad\"\nmax_zoom = 24").is_ok());
    }
}
