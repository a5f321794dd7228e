// src/domain/geo.rs

/// Kilometres per degree of arc, the approximation used for search radii.
const KM_PER_DEGREE: f64 = 111.111;

/// Great-circle distance in kilometres between two points given in degrees.
///
/// The cosine is clamped to 1.0 so near-identical points can't push `acos`
/// out of its domain through rounding noise. Identical points are exactly 0.
pub fn compute_distance(lat_from: f64, lng_from: f64, lat_to: f64, lng_to: f64) -> f64 {
    if lat_from == lat_to && lng_from == lng_to {
        return 0.0;
    }

    let cos_angle = lat_to.to_radians().cos()
        * lat_from.to_radians().cos()
        * (lng_to - lng_from).to_radians().cos()
        + lat_to.to_radians().sin() * lat_from.to_radians().sin();

    KM_PER_DEGREE * cos_angle.min(1.0).acos().to_degrees()
}
