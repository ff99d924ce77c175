use crate::material::Material;
use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use std::sync::Arc;

/// Infinite plane `n . x + d = 0`.
pub struct Plane {
    normal: Vec3,
    d: f64,
    material: Arc<Material>,
}

impl Plane {
    pub fn new(normal: Vec3, d: f64, material: Arc<Material>) -> Self {
        Self {
            normal: normal.unit(),
            d,
            material,
        }
    }
}

impl Hitable for Plane {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let n_rd = self.normal * r.dir;
        if n_rd == 0. {
            // parallel
            return None;
        }
        let t = -(self.d + self.normal * r.orig) / n_rd;
        if t > t_min && t < t_max {
            Some(HitRecord::new(
                t,
                self.normal,
                r,
                Arc::clone(&self.material),
            ))
        } else {
            None
        }
    }
}
