//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::{App, AppSettings, ArgMatches, SubCommand};
use geoframe_core::config::{DEFAULT_CONFIG, GeodesyCfg, MgrsCfg, TileMatrixSetCfg};
use geoframe_core::geodesy::Spherical;
use geoframe_core::mgrs::{Mgrs, MgrsFormat};
use geoframe_core::position::{Geographic, Scalable};
use geoframe_core::projection::Datum;
use geoframe_core::utm::Utm;
use geoframe_core::{parse_config, read_config, ApplicationCfg, Config};
use std::str::FromStr;
use tile_grid::{quad_key, quad_key_to_tile, TileMatrixSet};

#[cfg(feature = "with-proj4")]
use geoframe_core::crs::CoordRefSys;
#[cfg(feature = "with-proj4")]
use geoframe_core::projection::{Projection, ProjectionAdapter};
#[cfg(feature = "with-proj4")]
use geoframe_core::config::ProjectionCfg;
#[cfg(feature = "with-proj4")]
use geoframe_proj4::{Proj4d, ProjDefinition};

/// Runtime objects built from the configuration
pub struct Context {
    pub tms: TileMatrixSet,
    pub geodesy: Spherical,
    pub mgrs: MgrsFormat,
}

pub fn build_app<'a, 'b>(version: &'a str) -> App<'a, 'b> {
    App::new("geoframe")
        .version(version)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("geographic coordinates, projections, tile matrix sets and MGRS/UTM grids")
        .subcommand(SubCommand::with_name("tile")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --position=[LON,LAT] 'Geographic position'
                                              --zoom=[LEVEL] 'Zoom level'
                                              --tile=[Z/X/Y] 'Tile address'")
                        .about("Tile, pixel and quad-key of a position or bounds of a tile"))
        .subcommand(SubCommand::with_name("quadkey")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --key=[QUADKEY] 'Quad-key to decode'
                                              --tile=[Z/X/Y] 'Tile address to encode'")
                        .about("Quad-key encoding and decoding"))
        .subcommand(SubCommand::with_name("mgrs")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --position=[LON,LAT] 'Geographic position'
                                              --digits=[2|4|6|8|10] 'Easting and northing digits'
                                              --ref=[MGRS] 'MGRS reference'")
                        .about("MGRS reference of a position or position of a reference"))
        .subcommand(SubCommand::with_name("utm")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --position=[LON,LAT] 'Geographic position'
                                              --zone=[ZONE] 'Force longitude zone'
                                              --ref=[UTM] 'UTM coordinate with zone, hemisphere, easting and northing'")
                        .about("UTM coordinate of a position or position of a UTM coordinate"))
        .subcommand(SubCommand::with_name("distance")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --from=<LON,LAT> 'Start position'
                                              --to=<LON,LAT> 'End position'")
                        .about("Great-circle distance, bearings and midpoint"))
        .subcommand(SubCommand::with_name("project")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --from-crs=<CRS> 'Source CRS, e.g. EPSG:4326'
                                              --to-crs=<CRS> 'Target CRS, e.g. EPSG:2056'
                                              --from-def=[PROJ] 'Source proj-string'
                                              --to-def=[PROJ] 'Target proj-string'
                                              --coords=<X,Y[,Z]> 'Coordinates, longitude first'
                                              --inverse 'Project from target to source'")
                        .about("Project coordinates between two CRS"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
}

fn parse_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str, kind: &str) -> Result<Option<T>, String> {
    args.value_of(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| format!("Error parsing '{}' as {}", name, kind))
        })
        .transpose()
}

fn position_arg(args: &ArgMatches<'_>, name: &str) -> Result<Option<Geographic>, String> {
    args.value_of(name)
        .map(|s| Geographic::parse(s, ",", None).map_err(|e| format!("Error parsing '{}': {}", name, e)))
        .transpose()
}

fn tile_arg(args: &ArgMatches<'_>) -> Result<Option<Scalable>, String> {
    args.value_of("tile")
        .map(|s| Scalable::parse(s, "/").map_err(|e| format!("Error parsing 'tile': {}", e)))
        .transpose()
}

pub fn context_from_config(config: &ApplicationCfg) -> Result<Context, String> {
    #[cfg(feature = "with-proj4")]
    for projection in &config.projections {
        ProjDefinition::from_config(projection)?
            .register()
            .map_err(|e| e.to_string())?;
    }
    #[cfg(not(feature = "with-proj4"))]
    {
        if !config.projections.is_empty() {
            warn!("Ignoring [[projection]] definitions, built without proj4 support");
        }
    }
    Ok(Context {
        tms: TileMatrixSet::from_config(&config.tile_matrix_set)?,
        geodesy: Spherical::from_config(&config.geodesy)?,
        mgrs: MgrsFormat::from_config(&config.mgrs)?,
    })
}

pub fn context_from_args(args: &ArgMatches<'_>) -> Result<Context, String> {
    let config: ApplicationCfg = match args.value_of("config") {
        Some(path) => read_config(path)?,
        None => parse_config(DEFAULT_CONFIG.to_string(), "")?,
    };
    context_from_config(&config)
}

pub fn tile(args: &ArgMatches<'_>, ctx: &Context) -> Result<String, String> {
    let tms = &ctx.tms;
    if let Some(tile) = tile_arg(args)? {
        if tile.zoom > tms.max_zoom() {
            return Err(format!("Zoom level {} exceeds maximum {}", tile.zoom, tms.max_zoom()));
        }
        let center = tms.tile_to_position(&tile);
        return Ok(format!(
            "bounds {}\ncenter {:.6},{:.6}",
            tms.tile_to_bounds(&tile).to_text(","),
            center.lon(),
            center.lat()
        ));
    }
    let position = position_arg(args, "position")?.ok_or("Missing 'position' or 'tile'")?;
    let zoom: u8 = parse_arg(args, "zoom", "integer value")?.unwrap_or(tms.max_zoom());
    if zoom > tms.max_zoom() {
        return Err(format!("Zoom level {} exceeds maximum {}", zoom, tms.max_zoom()));
    }
    let tile = tms.position_to_tile(&position, zoom);
    Ok(format!(
        "tile {}\npixel {}\nquadkey {}\nbounds {}",
        tile.to_path(),
        tms.position_to_pixel(&position, zoom).to_path(),
        quad_key(&tile).map_err(|e| e.to_string())?,
        tms.tile_to_bounds(&tile).to_text(",")
    ))
}

pub fn quadkey(args: &ArgMatches<'_>) -> Result<String, String> {
    if let Some(key) = args.value_of("key") {
        return quad_key_to_tile(key)
            .map(|tile| tile.to_path())
            .map_err(|e| e.to_string());
    }
    let tile = tile_arg(args)?.ok_or("Missing 'key' or 'tile'")?;
    quad_key(&tile).map_err(|e| e.to_string())
}

pub fn mgrs(args: &ArgMatches<'_>, ctx: &Context) -> Result<String, String> {
    if let Some(reference) = args.value_of("ref") {
        let mgrs = Mgrs::parse(reference, Datum::WGS84).map_err(|e| e.to_string())?;
        let position = mgrs.to_geographic().map_err(|e| e.to_string())?;
        return Ok(format!("{:.6},{:.6}", position.lon(), position.lat()));
    }
    let position = position_arg(args, "position")?.ok_or("Missing 'position' or 'ref'")?;
    let mut format = ctx.mgrs;
    if let Some(digits) = parse_arg(args, "digits", "integer value")? {
        format.digits = digits;
    }
    Mgrs::from_geographic(&position, Datum::WGS84)
        .map_err(|e| e.to_string())?
        .format(&format)
        .map_err(|e| e.to_string())
}

pub fn utm(args: &ArgMatches<'_>) -> Result<String, String> {
    if let Some(reference) = args.value_of("ref") {
        let utm = Utm::parse(reference, Datum::WGS84).map_err(|e| e.to_string())?;
        let position = utm.to_geographic().map_err(|e| e.to_string())?;
        return Ok(format!("{:.6},{:.6}", position.lon(), position.lat()));
    }
    let position = position_arg(args, "position")?.ok_or("Missing 'position' or 'ref'")?;
    let utm = match parse_arg(args, "zone", "integer value")? {
        Some(zone) => Utm::from_geographic_in_zone(&position, zone, Datum::WGS84),
        None => Utm::from_geographic(&position, Datum::WGS84),
    };
    utm.map(|utm| utm.to_string()).map_err(|e| e.to_string())
}

pub fn distance(args: &ArgMatches<'_>, ctx: &Context) -> Result<String, String> {
    let from = position_arg(args, "from")?.ok_or("Missing 'from'")?;
    let to = position_arg(args, "to")?.ok_or("Missing 'to'")?;
    let geodesy = &ctx.geodesy;
    let midpoint = geodesy.midpoint(&from, &to);
    Ok(format!(
        "distance {:.3} m\ninitial bearing {:.6}\nfinal bearing {:.6}\nmidpoint {:.6},{:.6}",
        geodesy.distance_haversine(&from, &to),
        geodesy.initial_bearing(&from, &to),
        geodesy.final_bearing(&from, &to),
        midpoint.lon(),
        midpoint.lat()
    ))
}

#[cfg(feature = "with-proj4")]
pub fn project(args: &ArgMatches<'_>) -> Result<String, String> {
    let from = CoordRefSys::new(args.value_of("from-crs").ok_or("Missing 'from-crs'")?);
    let to = CoordRefSys::new(args.value_of("to-crs").ok_or("Missing 'to-crs'")?);
    let coords: Vec<f64> = args
        .value_of("coords")
        .ok_or("Missing 'coords'")?
        .split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| "Error parsing 'coords' as list of float values".to_string())
        })
        .collect::<Result<_, _>>()?;
    if coords.len() < 2 || coords.len() > 3 {
        return Err(format!("Expected 2 or 3 coordinates, got {}", coords.len()));
    }
    let adapter = Proj4d::resolve(&from, &to, args.value_of("from-def"), args.value_of("to-def"))
        .map_err(|e| e.to_string())?;
    let z = coords.get(2).cloned();
    let (x, y, z, _) = if args.is_present("inverse") {
        adapter.inverse().project_xyz(coords[0], coords[1], z, None)
    } else {
        adapter.forward().project_xyz(coords[0], coords[1], z, None)
    }
    .map_err(|e| e.to_string())?;
    Ok(match z {
        Some(z) => format!("{},{},{}", x, y, z),
        None => format!("{},{}", x, y),
    })
}

#[cfg(not(feature = "with-proj4"))]
pub fn project(_args: &ArgMatches<'_>) -> Result<String, String> {
    Err("Built without proj4 support".to_string())
}

pub fn gen_config(ctx: Option<&Context>) -> String {
    #[allow(unused_mut)]
    let mut config = match ctx {
        Some(ctx) => vec![
            ctx.tms.gen_runtime_config(),
            ctx.geodesy.gen_runtime_config(),
            ctx.mgrs.gen_runtime_config(),
        ],
        None => vec![
            <TileMatrixSet as Config<TileMatrixSetCfg>>::gen_config(),
            <Spherical as Config<GeodesyCfg>>::gen_config(),
            <MgrsFormat as Config<MgrsCfg>>::gen_config(),
        ],
    };
    #[cfg(feature = "with-proj4")]
    config.push(<ProjDefinition as Config<ProjectionCfg>>::gen_config());
    config.join("")
}
