//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! TOML configuration

use crate::geodesy::{Spherical, MEAN_EARTH_RADIUS};
use crate::mgrs::MgrsFormat;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;


pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub tile_matrix_set: TileMatrixSetCfg,
    #[serde(default)]
    pub geodesy: GeodesyCfg,
    #[serde(default)]
    pub mgrs: MgrsCfg,
    #[serde(rename = "projection", default)]
    pub projections: Vec<ProjectionCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TileMatrixSetCfg {
    /// `web_mercator_quad` or `world_crs84_quad`
    pub predefined: Option<String>,
    /// Width and height of a tile in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u16,
    #[serde(default)]
    pub min_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    /// `TopLeft` or `BottomLeft`
    #[serde(default = "default_origin")]
    pub origin: String,
}

pub fn default_tile_size() -> u16 {
    256
}

pub fn default_max_zoom() -> u8 {
    22
}

pub fn default_origin() -> String {
    "TopLeft".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct GeodesyCfg {
    /// Sphere radius in meters
    #[serde(default = "default_earth_radius")]
    pub earth_radius: f64,
}

impl Default for GeodesyCfg {
    fn default() -> Self {
        GeodesyCfg {
            earth_radius: default_earth_radius(),
        }
    }
}

pub fn default_earth_radius() -> f64 {
    MEAN_EARTH_RADIUS
}

#[derive(Deserialize, Clone, Debug)]
pub struct MgrsCfg {
    #[serde(default = "default_mgrs_digits")]
    pub digits: u8,
    #[serde(default)]
    pub military_style: bool,
    #[serde(default)]
    pub zero_pad_zone: bool,
}

impl Default for MgrsCfg {
    fn default() -> Self {
        MgrsCfg {
            digits: default_mgrs_digits(),
            military_style: false,
            zero_pad_zone: false,
        }
    }
}

pub fn default_mgrs_digits() -> u8 {
    10
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectionCfg {
    /// CRS identifier, e.g. `EPSG:2056`
    pub crs: String,
    /// proj-string definition
    pub definition: String,
}

impl<'a> Config<'a, GeodesyCfg> for Spherical {
    fn from_config(cfg: &GeodesyCfg) -> Result<Self, String> {
        if cfg.earth_radius.is_finite() && cfg.earth_radius > 0.0 {
            Ok(Spherical::new(cfg.earth_radius))
        } else {
            Err(format!("Invalid earth radius {}", cfg.earth_radius))
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[geodesy]
earth_radius = 6371000.0
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            r#"
[geodesy]
earth_radius = {:.1}
"#,
            self.radius()
        )
    }
}

impl<'a> Config<'a, MgrsCfg> for MgrsFormat {
    fn from_config(cfg: &MgrsCfg) -> Result<Self, String> {
        match cfg.digits {
            2 | 4 | 6 | 8 | 10 => Ok(MgrsFormat {
                digits: cfg.digits,
                military_style: cfg.military_style,
                zero_pad_zone: cfg.zero_pad_zone,
            }),
            digits => Err(format!("Invalid MGRS digits {}, expected 2, 4, 6, 8 or 10", digits)),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[mgrs]
digits = 10
military_style = false
"#;
        toml.to_string()
    }
}

pub const DEFAULT_CONFIG: &'static str = r#"
[tile_matrix_set]
predefined = "web_mercator_quad"
tile_size = 256
max_zoom = 22

[geodesy]
earth_radius = 6371000.0

[mgrs]
digits = 10
military_style = false

#[[projection]]
#crs = "EPSG:2056"
#definition = "+proj=somerc +lat_0=46.9524055555556 +lon_0=7.43958333333333 +k_0=1 +x_0=2600000 +y_0=1200000 +ellps=bessel +towgs84=674.374,15.056,405.346,0,0,0,0 +units=m +no_defs"
"#;

lazy_static! {
    static ref OLD_ENV_VAR: Regex = Regex::new(r"\$\{([[:alnum:]_]+)\}").expect("valid regex");
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };
    info!("Reading configuration from '{}'", path);

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    if OLD_ENV_VAR.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;
    debug!("Rendered configuration:\n{}", toml);

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
