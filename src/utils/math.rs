use nalgebra::Vector3;
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert metres per second to kilometres per hour
#[inline]
pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * 3.6
}

/// Planar (x,z) magnitude of a y-up world vector
#[inline]
pub fn horizontal_speed(velocity: &Vector3<f64>) -> f64 {
    (velocity.x.powi(2) + velocity.z.powi(2)).sqrt()
}
