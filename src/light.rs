use crate::Vec3;

/// What a light contributes at one surface point.
pub struct Illumination {
    /// Unit direction from the surface point toward the light.
    pub dir: Vec3,
    pub color: Vec3,
    /// Euclidean distance to the light, infinite for directional lights.
    /// Shadow rays use it as their upper bound.
    pub distance: f64,
}

pub trait Light: Send + Sync {
    fn illumination(&self, p: Vec3) -> Illumination;
}

pub struct DirectionalLight {
    direction: Vec3,
    color: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            direction: direction.unit(),
            color,
        }
    }
}

impl Light for DirectionalLight {
    fn illumination(&self, _p: Vec3) -> Illumination {
        // the direction to the light is opposite the light's own direction
        Illumination {
            dir: -self.direction,
            color: self.color,
            distance: f64::INFINITY,
        }
    }
}

pub struct PointLight {
    position: Vec3,
    color: Vec3,
    falloff: f64,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3, falloff: f64) -> Self {
        Self {
            position,
            color,
            falloff,
        }
    }
}

impl Light for PointLight {
    fn illumination(&self, p: Vec3) -> Illumination {
        let to_light = self.position - p;
        let distance = to_light.length();
        Illumination {
            dir: to_light / distance,
            color: self.color / (1. + self.falloff * distance * distance),
            distance,
        }
    }
}
