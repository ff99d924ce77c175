use crate::integrator::Integrator;
use crate::objects::hit::Hitable;
use crate::scene::Scene;
use crate::{Ray, Vec3};
use rand::RngCore;

/// Local illumination only: ambient plus one Phong-shaded bounce per
/// light, no shadows, no recursion.
pub struct RayCaster {
    phong: bool,
}

impl RayCaster {
    pub fn new() -> Self {
        Self { phong: true }
    }

    /// Diffuse-only variant, used by the depth-of-field pass and as the
    /// degenerate form of the recursive tracer.
    pub fn diffuse_only() -> Self {
        Self { phong: false }
    }
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for RayCaster {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3 {
        let rec = match scene.group().hit(r, scene.camera().t_min(), f64::INFINITY) {
            Some(rec) => rec,
            None => return scene.background_color(r.dir),
        };
        let mut color = Vec3::elemul(scene.ambient_light(), rec.mat.diffuse_color());
        for light in scene.lights() {
            let ill = light.illumination(rec.p);
            color += rec.mat.shading_color(r, &rec, ill.dir, ill.color, self.phong);
        }
        if rec.mat.has_cubemap() {
            color += rec.mat.environment_color(r, &rec);
        }
        color
    }
}

/// Grayscale visualization of hit distance: white at or below
/// `depth_min`, black at or above `depth_max`, linear in between.
pub struct DepthRayCaster {
    pub depth_min: f64,
    pub depth_max: f64,
}

impl Integrator for DepthRayCaster {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3 {
        match scene.group().hit(r, scene.camera().t_min(), f64::INFINITY) {
            Some(rec) if rec.t < self.depth_min => Vec3::ones(),
            Some(rec) if rec.t > self.depth_max => Vec3::zero(),
            Some(rec) => {
                Vec3::gray((self.depth_max - rec.t) / (self.depth_max - self.depth_min))
            }
            None => Vec3::zero(),
        }
    }
}

/// Visualizes surface normals, folding negative components into positive
/// so every axis renders as a color channel.
pub struct NormalsRayCaster;

impl Integrator for NormalsRayCaster {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3 {
        match scene.group().hit(r, scene.camera().t_min(), f64::INFINITY) {
            Some(rec) => rec.normal.abs(),
            None => Vec3::zero(),
        }
    }
}

const BLUR_SAMPLES: usize = 10;

/// Depth-of-field pass: averages several independently jittered thin-lens
/// samples per pixel, shading without the Phong lobe.
pub struct BlurryRayCaster {
    inner: RayCaster,
}

impl BlurryRayCaster {
    pub fn new() -> Self {
        Self {
            inner: RayCaster::diffuse_only(),
        }
    }
}

impl Default for BlurryRayCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for BlurryRayCaster {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3 {
        self.inner.sample_ray(scene, r)
    }

    fn sample_pixel(&self, scene: &Scene, point: (f64, f64), rng: &mut dyn RngCore) -> Vec3 {
        let camera = scene.lens_camera().unwrap_or_else(|| scene.camera());
        let mut color = Vec3::zero();
        for _ in 0..BLUR_SAMPLES {
            let ray = camera.generate_ray(point, rng);
            color += self.sample_ray(scene, &ray);
        }
        color / BLUR_SAMPLES as f64
    }
}
