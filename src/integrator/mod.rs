pub mod raycaster;
pub mod raytracer;

pub use raycaster::{BlurryRayCaster, DepthRayCaster, NormalsRayCaster, RayCaster};
pub use raytracer::RayTracer;

use crate::scene::Scene;
use crate::{Ray, Vec3};
use rand::RngCore;

/// Offset applied to secondary rays so they cannot re-hit the surface
/// they start on. Secondary directions are normalized, so this is in
/// world units.
pub const EPSILON: f64 = 0.001;

/// A per-ray shading strategy. `sample_pixel` is the entry point the
/// renderer calls for each screen coordinate; strategies that need more
/// than one camera ray per pixel override it.
pub trait Integrator: Send + Sync {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3;

    fn sample_pixel(&self, scene: &Scene, point: (f64, f64), rng: &mut dyn RngCore) -> Vec3 {
        let ray = scene.camera().generate_ray(point, rng);
        self.sample_ray(scene, &ray)
    }
}
