//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Angle and longitude/latitude helpers

/// Degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Radians to degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Wraps a longitude into `[-180, 180)`.
///
/// Values already in range are returned unchanged. Non-finite input is returned as is.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) || !lon.is_finite() {
        lon
    } else {
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        // rem_euclid may round up to the divisor itself
        if wrapped >= 180.0 {
            -180.0
        } else {
            wrapped
        }
    }
}

/// Clamps a longitude into `[-180, 180]`.
pub fn clip_longitude(lon: f64) -> f64 {
    lon.max(-180.0).min(180.0)
}

/// Clamps a latitude into `[-90, 90]`.
pub fn clip_latitude(lat: f64) -> f64 {
    lat.max(-90.0).min(90.0)
}

/// Wraps an angle (e.g. a bearing) into `[0, 360)`.
pub fn wrap_360(degrees: f64) -> f64 {
    if (0.0..360.0).contains(&degrees) || !degrees.is_finite() {
        degrees
    } else {
        degrees.rem_euclid(360.0)
    }
}

/// Formats an angle as degrees, minutes and seconds, e.g. `48°51′29.52″`.
///
/// `decimals` applies to the seconds part.
pub fn format_dms(degrees: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    // round once on total seconds to avoid 60″ carries
    let total = (degrees.abs() * 3600.0 * scale).round() / scale;
    let d = (total / 3600.0).floor();
    let m = ((total - d * 3600.0) / 60.0).floor();
    let s = total - d * 3600.0 - m * 60.0;
    let sign = if degrees < 0.0 { "-" } else { "" };
    format!(
        "{}{}°{:02}′{:0width$.prec$}″",
        sign,
        d,
        m,
        s,
        width = if decimals > 0 { decimals + 3 } else { 2 },
        prec = decimals
    )
}

/// Formats a latitude as DMS with a hemisphere suffix (`N`/`S`).
pub fn format_lat_dms(lat: f64, decimals: usize) -> String {
    let hemisphere = if lat < 0.0 { 'S' } else { 'N' };
    format!("{} {}", format_dms(lat.abs(), decimals), hemisphere)
}

/// Formats a longitude as DMS with a hemisphere suffix (`E`/`W`).
pub fn format_lon_dms(lon: f64, decimals: usize) -> String {
    let hemisphere = if lon < 0.0 { 'W' } else { 'E' };
    format!("{} {}", format_dms(lon.abs(), decimals), hemisphere)
}
