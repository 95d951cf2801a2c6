//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Process-wide proj-string definitions

use geoframe_core::config::{Config, ProjectionCfg};
use geoframe_core::crs::CoordRefSys;
use geoframe_core::error::FormatError;
use proj4rs::proj::Proj;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::sync::{PoisonError, RwLock};

lazy_static! {
    static ref DEFINITIONS: RwLock<HashMap<CoordRefSys, String>> = RwLock::new(HashMap::new());
}

const WGS84_LONGLAT: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Registers a proj-string for a CRS, replacing any previous definition.
pub fn register_definition(crs: &CoordRefSys, definition: &str) -> Result<(), FormatError> {
    parse_definition(crs, definition)?;
    info!("Registering definition for {}: {}", crs, definition.trim());
    let mut definitions = DEFINITIONS.write().unwrap_or_else(PoisonError::into_inner);
    definitions.insert(crs.clone(), definition.trim().to_string());
    Ok(())
}

pub fn registered_definition(crs: &CoordRefSys) -> Option<String> {
    let definitions = DEFINITIONS.read().unwrap_or_else(PoisonError::into_inner);
    definitions.get(crs).cloned()
}

pub fn unregister_definition(crs: &CoordRefSys) -> Option<String> {
    let mut definitions = DEFINITIONS.write().unwrap_or_else(PoisonError::into_inner);
    definitions.remove(crs)
}

pub(crate) fn parse_definition(crs: &CoordRefSys, definition: &str) -> Result<Proj, FormatError> {
    Proj::from_proj_string(definition.trim()).map_err(|e| {
        debug!("Invalid definition for {}: {:?}", crs, e);
        FormatError::UnresolvedCrs {
            crs: crs.to_string(),
            definition: definition.trim().to_string(),
        }
    })
}

/// Definition of a CRS, either explicit, registered or from the EPSG database.
pub(crate) fn resolve_definition(
    crs: &CoordRefSys,
    explicit: Option<&str>,
) -> Result<String, FormatError> {
    if let Some(definition) = explicit {
        return Ok(definition.trim().to_string());
    }
    if let Some(definition) = registered_definition(crs) {
        return Ok(definition);
    }
    if crs.is_wgs84_geographic() {
        return Ok(WGS84_LONGLAT.to_string());
    }
    crs.epsg_code()
        .and_then(|code| u16::try_from(code).ok())
        .and_then(crs_definitions::from_code)
        .map(|def| def.proj4.to_string())
        .ok_or_else(|| FormatError::UnresolvedCrs {
            crs: crs.to_string(),
            definition: "none".to_string(),
        })
}

/// A `[[projection]]` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjDefinition {
    pub crs: CoordRefSys,
    pub definition: String,
}

impl ProjDefinition {
    pub fn register(&self) -> Result<(), FormatError> {
        register_definition(&self.crs, &self.definition)
    }
}

impl<'a> Config<'a, ProjectionCfg> for ProjDefinition {
    fn from_config(cfg: &ProjectionCfg) -> Result<Self, String> {
        let crs = CoordRefSys::new(&cfg.crs);
        parse_definition(&crs, &cfg.definition).map_err(|e| e.to_string())?;
        Ok(ProjDefinition {
            crs,
            definition: cfg.definition.trim().to_string(),
        })
    }
    fn gen_config() -> String {
        let toml = r#"
#[[projection]]
#crs = "EPSG:2056"
#definition = "+proj=somerc +lat_0=46.9524055555556 +lon_0=7.43958333333333 +k_0=1 +x_0=2600000 +y_0=1200000 +ellps=bessel +towgs84=674.374,15.056,405.346,0,0,0,0 +units=m +no_defs"
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            r#"
[[projection]]
crs = "{}"
definition = "{}"
"#,
            self.crs, self.definition
        )
    }
}
