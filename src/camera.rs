use crate::vec3::degrees_to_radians;
use crate::{Ray, Vec3};
use rand::RngCore;

/// Maps a normalized screen coordinate in `[-1, 1]^2` to a world-space
/// ray. Implementations may draw randomness, so repeated calls with the
/// same coordinate are allowed to produce different rays.
pub trait Camera: Send + Sync {
    fn generate_ray(&self, point: (f64, f64), rng: &mut dyn RngCore) -> Ray;

    fn t_min(&self) -> f64 {
        0.
    }
}

struct CameraBasis {
    center: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    /// Distance to the virtual screen, `1 / tan(fov / 2)`.
    dist: f64,
    aspect: f64,
}

impl CameraBasis {
    fn new(center: Vec3, direction: Vec3, up: Vec3, vfov_degrees: f64, aspect: f64) -> Self {
        let w = direction.unit();
        let u = Vec3::cross(w, up).unit();
        let v = Vec3::cross(u, w).unit();
        Self {
            center,
            u,
            v,
            w,
            dist: 1. / f64::tan(degrees_to_radians(vfov_degrees) / 2.),
            aspect,
        }
    }

    fn pinhole_dir(&self, (x, y): (f64, f64)) -> Vec3 {
        (x * self.u + self.aspect * y * self.v + self.dist * self.w).unit()
    }
}

pub struct PerspectiveCamera {
    basis: CameraBasis,
}

impl PerspectiveCamera {
    pub fn new(center: Vec3, direction: Vec3, up: Vec3, vfov_degrees: f64, aspect: f64) -> Self {
        Self {
            basis: CameraBasis::new(center, direction, up, vfov_degrees, aspect),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn generate_ray(&self, point: (f64, f64), _rng: &mut dyn RngCore) -> Ray {
        Ray::new(self.basis.center, self.basis.pinhole_dir(point))
    }
}

/// Depth-of-field camera. The pinhole ray is projected to its focal point,
/// then the origin is jittered inside an aperture-radius disk of the
/// (u, v) plane and re-aimed at that focal point, so only geometry near
/// the focus distance stays sharp across samples.
pub struct ThinLensCamera {
    basis: CameraBasis,
    focus_dist: f64,
    aperture: f64,
}

impl ThinLensCamera {
    pub fn new(
        center: Vec3,
        direction: Vec3,
        up: Vec3,
        vfov_degrees: f64,
        aspect: f64,
        focus_dist: f64,
        aperture: f64,
    ) -> Self {
        Self {
            basis: CameraBasis::new(center, direction, up, vfov_degrees, aspect),
            focus_dist,
            aperture,
        }
    }
}

impl Camera for ThinLensCamera {
    fn generate_ray(&self, point: (f64, f64), rng: &mut dyn RngCore) -> Ray {
        let focal_point = self.basis.center + self.focus_dist * self.basis.pinhole_dir(point);
        let rd = self.aperture * Vec3::random_in_unit_disk(rng);
        let origin = self.basis.center + rd.x * self.basis.u + rd.y * self.basis.v;
        Ray::new(origin, (focal_point - origin).unit())
    }
}
