use crate::material::Material;
use crate::vec3::Vec3;
use crate::Ray;
use std::sync::Arc;

/// Tangent-bitangent-normal basis of a surface point, used to carry a
/// normal-map perturbation from tangent space into world space.
#[derive(Copy, Clone, Debug)]
pub struct Tbn {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub normal: Vec3,
}

impl Tbn {
    pub fn apply(&self, v: Vec3) -> Vec3 {
        v.x * self.tangent + v.y * self.bitangent + v.z * self.normal
    }
}

/// The closest intersection found along one ray. The normal is the
/// geometric outward normal, never flipped toward the viewer: the tracer
/// itself decides whether a ray is entering or exiting a surface.
pub struct HitRecord {
    pub t: f64,
    pub p: Vec3,
    pub normal: Vec3,
    pub uv: Option<(f64, f64)>,
    pub tbn: Option<Tbn>,
    pub mat: Arc<Material>,
}

impl HitRecord {
    pub fn new(t: f64, outward_normal: Vec3, r: &Ray, mat: Arc<Material>) -> Self {
        Self {
            t,
            p: r.at(t),
            normal: outward_normal.unit(),
            uv: None,
            tbn: None,
            mat,
        }
    }

    pub fn with_uv(mut self, uv: (f64, f64)) -> Self {
        self.uv = Some(uv);
        self
    }

    pub fn with_tbn(mut self, tbn: Tbn) -> Self {
        self.tbn = Some(tbn);
        self
    }
}

/// Anything a ray can intersect. An implementation reports a hit only for a
/// candidate `t` strictly inside `(t_min, t_max)`; callers shrink `t_max`
/// to the best `t` seen so far, which keeps the returned record the
/// globally closest one.
pub trait Hitable: Send + Sync {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord>;
}
