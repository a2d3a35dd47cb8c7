//! Lighting types for the renderer.

use crate::color::Color;
use crate::math::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector compared against face normals; a normal equal to it is fully lit.
    pub direction: Vec3,
    /// Floor brightness in [0.0, 1.0] applied to every face.
    pub ambient_intensity: f64,
}

impl DirectionalLight {
    /// Create a new directional light.
    /// The direction will be normalized and the ambient term clamped to [0, 1].
    pub fn new(direction: Vec3, ambient_intensity: f64) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            ambient_intensity: clamp_unit(ambient_intensity),
        }
    }

    pub fn set_ambient(&mut self, ambient_intensity: f64) {
        self.ambient_intensity = clamp_unit(ambient_intensity);
    }

    /// Lambertian diffuse term, `max(0, n · l)`.
    pub fn diffuse(&self, normal: Vec3) -> f64 {
        normal.normalize().dot(self.direction).max(0.0)
    }

    /// Total light intensity for flat shading.
    ///
    /// Returns `min(1, ambient + diffuse)`, so the result is always in [0.0, 1.0].
    pub fn intensity(&self, normal: Vec3) -> f64 {
        clamp_unit(self.ambient_intensity + self.diffuse(normal))
    }

    /// Lit color of a face: every channel of `base` scaled by [`Self::intensity`].
    pub fn shade(&self, base: Color, normal: Vec3) -> Color {
        base.scale(self.intensity(normal))
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_illumination() {
        // Normal equal to the light direction is fully lit.
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 0.0);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!((light.intensity(normal) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 0.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert!(light.intensity(normal) == 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), 0.0);
        let normal = Vec3::new(0.0, -1.0, 1.0);
        // cos(45) ≈ 0.707, normal is normalized at use
        let intensity = light.intensity(normal);
        assert!((intensity - 0.707).abs() < 0.01);
    }

    #[test]
    fn ambient_sets_the_floor() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), 0.3);
        let away = Vec3::new(0.0, 0.0, 1.0);
        assert!((light.intensity(away) - 0.3).abs() < 1e-12);
        assert_eq!(light.shade(Color::rgb(200, 100, 10), away), Color::rgb(60, 30, 3));
    }

    #[test]
    fn intensity_saturates_at_one() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -7.0), 0.9);
        let normal = Vec3::new(0.0, 0.0, -3.0);
        assert_eq!(light.intensity(normal), 1.0);
        assert_eq!(light.shade(Color::RED, normal), Color::RED);
    }

    #[test]
    fn shaded_channels_never_exceed_base() {
        let base = Color::rgb(255, 128, 7);
        for ambient in [0.0, 0.25, 0.5, 1.0, 3.0] {
            let light = DirectionalLight::new(Vec3::new(0.3, -0.2, -1.0), ambient);
            for normal in [
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-0.2, 0.9, -0.1),
            ] {
                let lit = light.shade(base, normal);
                assert!(lit.r <= base.r && lit.g <= base.g && lit.b <= base.b);
            }
        }
    }
}
