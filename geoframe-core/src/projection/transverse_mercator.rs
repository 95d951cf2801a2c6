//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Ellipsoidal transverse Mercator (Krüger series to sixth order in n)

use super::{Components, Datum, Ellipsoid, Endpoints, Projection, ProjectionAdapter};
use crate::crs::CoordRefSys;
use crate::error::{Direction, ProjectionError};
use crate::units::wrap_longitude;
use crate::utm::{Hemisphere, UtmZone};

/// UTM scale factor on the central meridian.
pub const UTM_K0: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500e3;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10000e3;
/// Latitude limits of the UTM system.
pub const UTM_MIN_LATITUDE: f64 = -80.0;
pub const UTM_MAX_LATITUDE: f64 = 84.0;

const MAX_ITERATIONS: usize = 50;

/// Projected point with meridian convergence (degrees) and point scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmPoint {
    pub x: f64,
    pub y: f64,
    pub convergence: f64,
    pub scale: f64,
}

/// Transverse Mercator projection on an ellipsoid.
#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    central_meridian: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    e: f64,
    /// 2πA is the circumference of a meridian
    big_a: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> TransverseMercator {
        let f = ellipsoid.f;
        let e = (f * (2.0 - f)).sqrt();
        let n = f / (2.0 - f);
        let (n2, n3, n4, n5, n6) = (n * n, n.powi(3), n.powi(4), n.powi(5), n.powi(6));
        let big_a = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);
        let alpha = [
            1.0 / 2.0 * n - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4
                - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            212378941.0 / 319334400.0 * n6,
        ];
        let beta = [
            1.0 / 2.0 * n - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4
                - 81.0 / 512.0 * n5
                + 96199.0 / 604800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5
                + 5569.0 / 90720.0 * n6,
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            20648693.0 / 638668800.0 * n6,
        ];
        TransverseMercator {
            ellipsoid,
            central_meridian,
            k0,
            false_easting,
            false_northing,
            e,
            big_a,
            alpha,
            beta,
        }
    }

    /// Projection of a UTM zone.
    pub fn utm(zone: &UtmZone, ellipsoid: Ellipsoid) -> TransverseMercator {
        let false_northing = match zone.hemisphere() {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_FALSE_NORTHING_SOUTH,
        };
        TransverseMercator::new(
            ellipsoid,
            zone.central_meridian(),
            UTM_K0,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }

    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    /// Projects longitude/latitude in degrees. `None` for non-finite results.
    pub fn forward(&self, lon: f64, lat: f64) -> Option<TmPoint> {
        let e = self.e;
        let phi = lat.to_radians();
        let lambda = wrap_longitude(lon - self.central_meridian).to_radians();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let tan_lambda = lambda.tan();

        let tau = phi.tan();
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        let tau_p = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
        let xi_p = tau_p.atan2(cos_lambda);
        let eta_p = (sin_lambda / (tau_p * tau_p + cos_lambda * cos_lambda).sqrt()).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        let mut p_p = 1.0;
        let mut q_p = 0.0;
        for (i, alpha) in self.alpha.iter().enumerate() {
            let j2 = 2.0 * (i + 1) as f64;
            xi += alpha * (j2 * xi_p).sin() * (j2 * eta_p).cosh();
            eta += alpha * (j2 * xi_p).cos() * (j2 * eta_p).sinh();
            p_p += j2 * alpha * (j2 * xi_p).cos() * (j2 * eta_p).cosh();
            q_p += j2 * alpha * (j2 * xi_p).sin() * (j2 * eta_p).sinh();
        }

        let x = self.k0 * self.big_a * eta + self.false_easting;
        let y = self.k0 * self.big_a * xi + self.false_northing;

        let gamma_p = (tau_p / (1.0 + tau_p * tau_p).sqrt() * tan_lambda).atan();
        let gamma_pp = q_p.atan2(p_p);
        let convergence = (gamma_p + gamma_pp).to_degrees();

        let sin_phi = phi.sin();
        let k_p = (1.0 - e * e * sin_phi * sin_phi).sqrt() * (1.0 + tau * tau).sqrt()
            / (tau_p * tau_p + cos_lambda * cos_lambda).sqrt();
        let k_pp = self.big_a / self.ellipsoid.a * (p_p * p_p + q_p * q_p).sqrt();
        let scale = self.k0 * k_p * k_pp;

        let point = TmPoint {
            x,
            y,
            convergence,
            scale,
        };
        if x.is_finite() && y.is_finite() {
            Some(point)
        } else {
            None
        }
    }

    /// Unprojects to longitude (`x`) and latitude (`y`) in degrees.
    ///
    /// `None` when the latitude iteration does not converge.
    pub fn inverse(&self, x: f64, y: f64) -> Option<TmPoint> {
        let e = self.e;
        let eta = (x - self.false_easting) / (self.k0 * self.big_a);
        let xi = (y - self.false_northing) / (self.k0 * self.big_a);

        let mut xi_p = xi;
        let mut eta_p = eta;
        let mut p = 1.0;
        let mut q = 0.0;
        for (i, beta) in self.beta.iter().enumerate() {
            let j2 = 2.0 * (i + 1) as f64;
            xi_p -= beta * (j2 * xi).sin() * (j2 * eta).cosh();
            eta_p -= beta * (j2 * xi).cos() * (j2 * eta).sinh();
            p -= j2 * beta * (j2 * xi).cos() * (j2 * eta).cosh();
            q += j2 * beta * (j2 * xi).sin() * (j2 * eta).sinh();
        }

        let sinh_eta_p = eta_p.sinh();
        let (sin_xi_p, cos_xi_p) = xi_p.sin_cos();
        let tau_p = sin_xi_p / (sinh_eta_p * sinh_eta_p + cos_xi_p * cos_xi_p).sqrt();

        let mut tau = tau_p;
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
            let tau_i_p = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
            let delta = (tau_p - tau_i_p) / (1.0 + tau_i_p * tau_i_p).sqrt()
                * (1.0 + (1.0 - e * e) * tau * tau)
                / ((1.0 - e * e) * (1.0 + tau * tau).sqrt());
            tau += delta;
            if !delta.is_finite() {
                break;
            }
            if delta.abs() <= 1e-12 {
                converged = true;
                break;
            }
        }
        if !converged {
            return None;
        }

        let phi = tau.atan();
        let lambda = sinh_eta_p.atan2(cos_xi_p);

        let gamma_p = (xi_p.tan() * eta_p.tanh()).atan();
        let gamma_pp = q.atan2(p);
        let convergence = (gamma_p + gamma_pp).to_degrees();

        let sin_phi = phi.sin();
        let k_p = (1.0 - e * e * sin_phi * sin_phi).sqrt()
            * (1.0 + tau * tau).sqrt()
            * (sinh_eta_p * sinh_eta_p + cos_xi_p * cos_xi_p).sqrt();
        let k_pp = self.big_a / self.ellipsoid.a / (p * p + q * q).sqrt();
        let scale = self.k0 * k_p * k_pp;

        let lon = wrap_longitude(lambda.to_degrees() + self.central_meridian);
        let lat = phi.to_degrees();
        if lon.is_finite() && lat.is_finite() {
            Some(TmPoint {
                x: lon,
                y: lat,
                convergence,
                scale,
            })
        } else {
            None
        }
    }
}

/// One direction of a UTM zone projection.
#[derive(Debug, Clone)]
pub struct UtmProjection {
    endpoints: Endpoints,
    tm: TransverseMercator,
}

impl Projection for UtmProjection {
    fn project_xyz(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Components, ProjectionError> {
        match self.endpoints.direction {
            Direction::Forward => {
                if !(UTM_MIN_LATITUDE..=UTM_MAX_LATITUDE).contains(&y) {
                    return Err(self.endpoints.failure(
                        x,
                        y,
                        z,
                        m,
                        "latitude outside UTM limits [-80, 84]",
                    ));
                }
                self.tm
                    .forward(x, y)
                    .map(|p| (p.x, p.y, z, m))
                    .ok_or_else(|| self.endpoints.failure(x, y, z, m, "non-finite result"))
            }
            Direction::Inverse => self
                .tm
                .inverse(x, y)
                .map(|p| (p.x, p.y, z, m))
                .ok_or_else(|| {
                    self.endpoints
                        .failure(x, y, z, m, "latitude iteration did not converge")
                }),
        }
    }
}

impl UtmProjection {
    pub fn transverse_mercator(&self) -> &TransverseMercator {
        &self.tm
    }
}

/// Geographic to UTM zone adapter for a datum.
#[derive(Debug, Clone)]
pub struct UtmAdapter {
    zone: UtmZone,
    datum: Datum,
    forward: UtmProjection,
    inverse: UtmProjection,
}

impl UtmAdapter {
    pub fn new(zone: UtmZone, datum: Datum) -> UtmAdapter {
        let geographic = if datum == Datum::WGS84 {
            CoordRefSys::crs84()
        } else {
            CoordRefSys::from_epsg(datum.epsg)
        };
        let projected = zone.crs(&datum);
        debug!("UTM adapter {} -> {} ({})", geographic, projected, datum);
        let tm = TransverseMercator::utm(&zone, datum.ellipsoid);
        let endpoints = Endpoints::forward(geographic, projected);
        UtmAdapter {
            zone,
            datum,
            inverse: UtmProjection {
                endpoints: endpoints.reversed(),
                tm: tm.clone(),
            },
            forward: UtmProjection { endpoints, tm },
        }
    }

    pub fn zone(&self) -> &UtmZone {
        &self.zone
    }

    pub fn datum(&self) -> &Datum {
        &self.datum
    }
}

impl ProjectionAdapter for UtmAdapter {
    type Forward = UtmProjection;
    type Inverse = UtmProjection;

    fn from_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.source
    }
    fn to_crs(&self) -> &CoordRefSys {
        &self.forward.endpoints.target
    }
    fn forward(&self) -> &UtmProjection {
        &self.forward
    }
    fn inverse(&self) -> &UtmProjection {
        &self.inverse
    }
}
