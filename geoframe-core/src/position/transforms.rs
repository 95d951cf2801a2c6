//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Position transforms for `CreatePosition::transform`

use crate::position::CreatePosition;

/// Translates by the given offsets (z and m offsets only apply when present).
pub fn translate<P: CreatePosition>(dx: f64, dy: f64, dz: f64, dm: f64) -> impl Fn(&P) -> P {
    move |p: &P| {
        P::create(
            p.x() + dx,
            p.y() + dy,
            p.opt_z().map(|z| z + dz),
            p.opt_m().map(|m| m + dm),
        )
    }
}

/// Scales x, y and z by the given factors, m is kept.
pub fn scale<P: CreatePosition>(sx: f64, sy: f64, sz: f64) -> impl Fn(&P) -> P {
    move |p: &P| P::create(p.x() * sx, p.y() * sy, p.opt_z().map(|z| z * sz), p.opt_m())
}

/// Rotates counter-clockwise by `radians` around `(cx, cy)` in the xy plane.
pub fn rotate_2d<P: CreatePosition>(radians: f64, cx: f64, cy: f64) -> impl Fn(&P) -> P {
    let (sin, cos) = radians.sin_cos();
    move |p: &P| {
        let dx = p.x() - cx;
        let dy = p.y() - cy;
        P::create(
            cx + dx * cos - dy * sin,
            cy + dx * sin + dy * cos,
            p.opt_z(),
            p.opt_m(),
        )
    }
}
