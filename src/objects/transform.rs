use crate::objects::hit::{HitRecord, Hitable};
use crate::{Ray, Vec3};
use nalgebra::Matrix4;
use std::sync::Arc;

/// Wraps a child object with an affine matrix. The incoming ray is mapped
/// into object space by the inverse matrix; the direction is deliberately
/// not renormalized, so any scale in the matrix scales the reported `t` by
/// the same factor and `t` stays valid against the world-space ray.
pub struct Transform {
    obj: Arc<dyn Hitable>,
    inverse: Matrix4<f64>,
    normal_to_world: Matrix4<f64>,
}

impl Transform {
    pub fn new(matrix: Matrix4<f64>, obj: Arc<dyn Hitable>) -> Self {
        let inverse = match matrix.try_inverse() {
            Some(inv) => inv,
            None => panic!("singular transform matrix"),
        };
        Self {
            obj,
            normal_to_world: inverse.transpose(),
            inverse,
        }
    }

    pub fn translation(offset: Vec3, obj: Arc<dyn Hitable>) -> Self {
        Self::new(
            Matrix4::new_translation(&nalgebra::Vector3::new(offset.x, offset.y, offset.z)),
            obj,
        )
    }
}

impl Hitable for Transform {
    fn hit(&self, r: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let local = Ray::new(
            r.orig.transform_point(&self.inverse),
            r.dir.transform_dir(&self.inverse),
        );
        let mut rec = self.obj.hit(&local, t_min, t_max)?;
        rec.normal = rec.normal.transform_dir(&self.normal_to_world).unit();
        rec.p = r.at(rec.t);
        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::objects::sphere::Sphere;

    fn unit_sphere() -> Arc<dyn Hitable> {
        Arc::new(Sphere::new(
            Vec3::zero(),
            1.,
            Arc::new(Material::matte(Vec3::ones())),
        ))
    }

    #[test]
    fn test_translated_sphere() {
        let t = Transform::translation(Vec3::new(5., 0., 0.), unit_sphere());
        let r = Ray::new(Vec3::new(5., 0., -10.), Vec3::new(0., 0., 1.));
        let rec = t.hit(&r, 0., f64::INFINITY).unwrap();
        assert!((rec.t - 9.).abs() < 1e-9);
        assert!((rec.p - Vec3::new(5., 0., -1.)).length() < 1e-9);
        assert!((rec.normal - Vec3::new(0., 0., -1.)).length() < 1e-9);
    }

    #[test]
    fn test_scaled_sphere_normal_renormalized() {
        // non-uniform scale: ellipsoid with x radius 2
        let m = Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(2., 1., 1.));
        let t = Transform::new(m, unit_sphere());
        let r = Ray::new(Vec3::new(-10., 0., 0.), Vec3::new(1., 0., 0.));
        let rec = t.hit(&r, 0., f64::INFINITY).unwrap();
        assert!((rec.t - 8.).abs() < 1e-9);
        assert!((rec.normal.length() - 1.).abs() < 1e-9);
        assert!((rec.normal - Vec3::new(-1., 0., 0.)).length() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_singular_matrix_panics() {
        Transform::new(Matrix4::zeros(), unit_sphere());
    }
}
