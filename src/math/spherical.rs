use std::f32::consts::PI;

use super::Vector;

/// Cartesian unit vector to `(phi, theta)`, with `phi` the azimuth in
/// `(-pi, pi]` and `theta` the polar angle from `+z` in `[0, pi]`.
pub fn cartesian_to_spherical(v: Vector) -> (f32, f32) {
    let theta = v.z().clamp(-1.0, 1.0).acos();
    let phi = v.y().atan2(v.x());
    (phi, theta)
}

/// Inverse of [`cartesian_to_spherical`]. Returns a unit vector.
pub fn spherical_to_cartesian(phi: f32, theta: f32) -> Vector {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Maps `(phi, theta)` to equirectangular `(u, v)` in `[0, 1) x [0, 1]`.
/// `v` is intentionally non-uniform in solid angle (`cos(theta)/2 + 0.5`)
/// -- kept verbatim for compatibility with reference renders, per the
/// design notes.
pub fn spherical_to_equirect(phi: f32, theta: f32) -> (f32, f32) {
    let wrapped_phi = if phi < 0.0 { phi + (2.0 * PI) } else { phi };
    let u = wrapped_phi / (2.0 * PI);
    let v = (theta.cos() * 0.5) + 0.5;
    (u, v)
}

/// Inverse of [`spherical_to_equirect`].
pub fn equirect_to_spherical(u: f32, v: f32) -> (f32, f32) {
    let mut phi = u * 2.0 * PI;
    if phi > PI {
        phi -= 2.0 * PI;
    }
    let theta = ((v - 0.5) * 2.0).clamp(-1.0, 1.0).acos();
    (phi, theta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() < eps, "{} !~= {}", a, b);
    }

    #[test]
    fn cartesian_roundtrip() {
        let dirs = [
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(0.0, 0.0, 1.0),
            Vector::new(0.0, 0.0, -1.0),
            Vector::new(0.577_350_3, 0.577_350_3, 0.577_350_3),
        ];
        for d in dirs {
            let (phi, theta) = cartesian_to_spherical(d);
            let back = spherical_to_cartesian(phi, theta);
            assert_close(back.x(), d.x(), 1e-5);
            assert_close(back.y(), d.y(), 1e-5);
            assert_close(back.z(), d.z(), 1e-5);
            assert_close(back.length(), 1.0, 1e-5);
        }
    }

    #[test]
    fn equirect_roundtrip_scenarios() {
        let cases = [
            (0.0, PI / 2.0),
            (-PI / 2.0, PI / 2.0),
            (PI, PI / 2.0),
            (PI / 2.0, PI / 4.0),
            (0.0, 0.0),
            (0.0, PI),
        ];
        for (phi, theta) in cases {
            let (u, v) = spherical_to_equirect(phi, theta);
            let (phi2, theta2) = equirect_to_spherical(u, v);
            assert_close(phi2, phi, 1e-5);
            assert_close(theta2, theta, 1e-5);
        }
    }

    #[test]
    fn equirect_unit_range() {
        let (u, v) = spherical_to_equirect(-3.0, 2.5);
        assert!((0.0..1.0).contains(&u));
        assert!((0.0..=1.0).contains(&v));
    }
}
