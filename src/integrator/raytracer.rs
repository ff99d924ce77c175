use crate::integrator::{Integrator, EPSILON};
use crate::light::Illumination;
use crate::objects::hit::{HitRecord, Hitable};
use crate::scene::Scene;
use crate::{Ray, Vec3};

pub const VACUUM_REFRACTION_INDEX: f64 = 1.0;

/// Snell refraction of `d` through a surface with normal `n`, going from
/// refraction index `n_in` into `n_out`, plus the Schlick-approximated
/// Fresnel reflection weight. Total internal reflection yields no
/// transmitted direction and a weight of one. A zero `n_in + n_out`
/// denominator propagates non-finite values rather than erroring.
pub fn transmitted_direction(
    normal: Vec3,
    d: Vec3,
    n_in: f64,
    n_out: f64,
) -> (Option<Vec3>, f64) {
    let ratio = n_in / n_out;
    let d_dot_n = d * normal;
    let radicand = 1. - ratio * ratio * (1. - d_dot_n * d_dot_n);
    // a non-finite radicand must land in the reflection branch too
    if !(radicand >= 0.) {
        return (None, 1.);
    }
    let t = (ratio * (d - d_dot_n * normal) - radicand.sqrt() * normal).unit();
    let r0 = ((n_out - n_in) / (n_out + n_in)).powi(2);
    let c = if n_in <= n_out {
        d_dot_n.abs()
    } else {
        (t * normal).abs()
    };
    (Some(t), r0 + (1. - r0) * (1. - c).powi(5))
}

/// Whitted-style recursive tracer: local illumination with binary shadow
/// rays, plus mirror reflection and Snell refraction blended by Fresnel
/// weight, recursing up to `max_bounces` levels deep.
pub struct RayTracer {
    max_bounces: u32,
    shadows: bool,
}

impl RayTracer {
    pub fn new(max_bounces: u32, shadows: bool) -> Self {
        Self {
            max_bounces,
            shadows,
        }
    }

    fn in_shadow(&self, scene: &Scene, p: Vec3, ill: &Illumination) -> bool {
        // the light direction is normalized, so EPSILON and the distance
        // bound are world units for point and directional lights alike
        let shadow_ray = Ray::new(p, ill.dir);
        scene.group().hit(&shadow_ray, EPSILON, ill.distance).is_some()
    }

    fn trace_reflection(
        &self,
        scene: &Scene,
        ray: &Ray,
        rec: &HitRecord,
        bounces: u32,
        refraction_index: f64,
    ) -> Vec3 {
        let reflected = Ray::new(rec.p, Vec3::reflect(ray.dir, rec.normal));
        Vec3::elemul(
            rec.mat.specular_color(),
            self.trace_ray(scene, &reflected, EPSILON, bounces + 1, refraction_index),
        )
    }

    /// Returns the refracted contribution and the Fresnel reflection
    /// weight. A ray leaving the surface (`d . N > 0`) flips the normal
    /// and exits into vacuum.
    fn trace_refraction(
        &self,
        scene: &Scene,
        ray: &Ray,
        rec: &HitRecord,
        bounces: u32,
        refraction_index: f64,
    ) -> (Vec3, f64) {
        let mut normal = rec.normal;
        let mut n_out = rec.mat.refraction_index();
        if ray.dir * normal > 0. {
            normal = -normal;
            n_out = VACUUM_REFRACTION_INDEX;
        }
        match transmitted_direction(normal, ray.dir, refraction_index, n_out) {
            (Some(t), r) => {
                let refracted = Ray::new(rec.p, t);
                let color = Vec3::elemul(
                    rec.mat.specular_color(),
                    self.trace_ray(scene, &refracted, EPSILON, bounces + 1, n_out),
                );
                (color, r)
            }
            (None, r) => (Vec3::zero(), r),
        }
    }

    fn trace_ray(
        &self,
        scene: &Scene,
        ray: &Ray,
        t_min: f64,
        bounces: u32,
        refraction_index: f64,
    ) -> Vec3 {
        let rec = match scene.group().hit(ray, t_min, f64::INFINITY) {
            Some(rec) => rec,
            None => return scene.background_color(ray.dir),
        };

        let mut color = Vec3::elemul(scene.ambient_light(), rec.mat.diffuse_color());
        for light in scene.lights() {
            let ill = light.illumination(rec.p);
            if self.shadows && self.in_shadow(scene, rec.p, &ill) {
                continue;
            }
            color += rec.mat.shading_color(ray, &rec, ill.dir, ill.color, false);
        }
        if rec.mat.has_cubemap() {
            color += rec.mat.environment_color(ray, &rec);
        }

        if bounces < self.max_bounces {
            let reflection = self.trace_reflection(scene, ray, &rec, bounces, refraction_index);
            let (refraction, r) =
                self.trace_refraction(scene, ray, &rec, bounces, refraction_index);
            color += r * reflection + (1. - r) * refraction;
        }
        color
    }
}

impl Integrator for RayTracer {
    fn sample_ray(&self, scene: &Scene, r: &Ray) -> Vec3 {
        self.trace_ray(
            scene,
            r,
            scene.camera().t_min(),
            0,
            VACUUM_REFRACTION_INDEX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::integrator::raycaster::RayCaster;
    use crate::light::{DirectionalLight, PointLight};
    use crate::material::Material;
    use crate::objects::plane::Plane;
    use crate::objects::sphere::Sphere;
    use crate::scene::Scene;
    use std::sync::Arc;

    fn test_camera() -> Arc<PerspectiveCamera> {
        Arc::new(PerspectiveCamera::new(
            Vec3::new(0., 0., -5.),
            Vec3::new(0., 0., 1.),
            Vec3::new(0., 1., 0.),
            60.,
            1.,
        ))
    }

    fn sphere_scene(material: Material) -> Scene {
        let mut builder = Scene::builder();
        builder
            .camera(test_camera())
            .background_color(Vec3::new(0.1, 0.2, 0.3))
            .ambient_light(Vec3::gray(0.05));
        builder.add_light(Arc::new(PointLight::new(
            Vec3::new(0., 5., -5.),
            Vec3::ones(),
            0.,
        )));
        let m = builder.add_material(material);
        let mat = builder.material(m).unwrap();
        builder.add_object(Arc::new(Sphere::new(Vec3::zero(), 1., mat)));
        builder.build().unwrap()
    }

    #[test]
    fn test_equal_media_fresnel_vanishes_at_normal_incidence() {
        let normal = Vec3::new(0., 1., 0.);
        let d = Vec3::new(0., -1., 0.);
        let (t, r) = transmitted_direction(normal, d, 1.5, 1.5);
        assert_eq!(r, 0.);
        // the ray passes through unbent
        assert!((t.unwrap() - d).length() < 1e-12);
    }

    #[test]
    fn test_total_internal_reflection() {
        let normal = Vec3::new(0., 1., 0.);
        // grazing exit from glass into vacuum, beyond the critical angle
        let d = Vec3::new(0.9, -0.436, 0.).unit();
        let (t, r) = transmitted_direction(normal, d, 1.5, 1.0);
        assert!(t.is_none());
        assert_eq!(r, 1.);
    }

    #[test]
    fn test_refraction_bends_toward_normal_entering_denser() {
        let normal = Vec3::new(0., 1., 0.);
        let d = Vec3::new(1., -1., 0.).unit();
        let (t, r) = transmitted_direction(normal, d, 1.0, 1.5);
        let t = t.unwrap();
        // transmitted direction is unit and closer to -normal than d was
        assert!((t.length() - 1.).abs() < 1e-12);
        assert!((t * -normal) > (d * -normal));
        assert!(r > 0. && r < 1.);
    }

    #[test]
    fn test_zero_bounces_matches_diffuse_caster() {
        let scene = sphere_scene(Material::new(Vec3::new(0.6, 0.6, 0.6), Vec3::gray(0.9), 16., 1.5));
        let tracer = RayTracer::new(0, false);
        let caster = RayCaster::diffuse_only();
        for (ox, oy) in [(0., 0.), (0.3, 0.2), (-0.4, 0.1), (2., 2.)] {
            let r = Ray::new(Vec3::new(ox, oy, -5.), Vec3::new(0., 0., 1.));
            let a = tracer.sample_ray(&scene, &r);
            let b = caster.sample_ray(&scene, &r);
            assert!((a - b).length() < 1e-12);
        }
    }

    #[test]
    fn test_reflective_sphere_picks_up_background() {
        // purely specular sphere against a colored background
        let mut builder = Scene::builder();
        builder
            .camera(test_camera())
            .background_color(Vec3::new(1., 0., 0.));
        let m = builder.add_material(Material::new(Vec3::zero(), Vec3::ones(), 0., 0.));
        let mat = builder.material(m).unwrap();
        builder.add_object(Arc::new(Sphere::new(Vec3::zero(), 1., mat)));
        let scene = builder.build().unwrap();

        let tracer = RayTracer::new(1, false);
        let r = Ray::new(Vec3::new(0., 0., -5.), Vec3::new(0., 0., 1.));
        let c = tracer.sample_ray(&scene, &r);
        // refraction index 0 forces total reflection, so the mirror
        // bounce returns the background at full weight
        assert!((c - Vec3::new(1., 0., 0.)).length() < 1e-9);
    }

    #[test]
    fn test_shadow_ray_blocks_point_light() {
        let mut builder = Scene::builder();
        builder.camera(test_camera());
        builder.add_light(Arc::new(PointLight::new(
            Vec3::new(0., 5., 0.),
            Vec3::ones(),
            0.,
        )));
        let floor = builder.add_material(Material::matte(Vec3::ones()));
        let blocker = builder.add_material(Material::matte(Vec3::ones()));
        builder.add_object(Arc::new(Plane::new(
            Vec3::new(0., 1., 0.),
            0.,
            builder.material(floor).unwrap(),
        )));
        // small sphere between the light and the origin
        builder.add_object(Arc::new(Sphere::new(
            Vec3::new(0., 2.5, 0.),
            0.5,
            builder.material(blocker).unwrap(),
        )));
        let scene = builder.build().unwrap();

        let shadowed = RayTracer::new(0, true);
        let unshadowed = RayTracer::new(0, false);
        // aim at the plane point right under the blocker
        let r = Ray::new(Vec3::new(0., 1., -1.), Vec3::new(0., -1., 1.));
        assert_eq!(shadowed.sample_ray(&scene, &r), Vec3::zero());
        assert!(unshadowed.sample_ray(&scene, &r).x > 0.);
    }

    #[test]
    fn test_occluder_beyond_light_does_not_shadow() {
        let mut builder = Scene::builder();
        builder.camera(test_camera());
        builder.add_light(Arc::new(PointLight::new(
            Vec3::new(0., 2., 0.),
            Vec3::ones(),
            0.,
        )));
        let floor = builder.add_material(Material::matte(Vec3::ones()));
        let high = builder.add_material(Material::matte(Vec3::ones()));
        builder.add_object(Arc::new(Plane::new(
            Vec3::new(0., 1., 0.),
            0.,
            builder.material(floor).unwrap(),
        )));
        // sphere above the light: along the shadow ray but past its bound
        builder.add_object(Arc::new(Sphere::new(
            Vec3::new(0., 5., 0.),
            0.5,
            builder.material(high).unwrap(),
        )));
        let scene = builder.build().unwrap();

        let tracer = RayTracer::new(0, true);
        let r = Ray::new(Vec3::new(0., 1., -1.), Vec3::new(0., -1., 1.));
        assert!(tracer.sample_ray(&scene, &r).x > 0.);
    }

    #[test]
    fn test_deeper_recursion_changes_glass_shading() {
        let scene = sphere_scene(Material::new(Vec3::gray(0.1), Vec3::gray(0.9), 32., 1.5));
        let r = Ray::new(Vec3::new(0., 0., -5.), Vec3::new(0., 0., 1.));
        let local = RayTracer::new(0, false).sample_ray(&scene, &r);
        let traced = RayTracer::new(4, false).sample_ray(&scene, &r);
        assert!((local - traced).length() > 1e-6);
    }

    #[test]
    fn test_directional_light_shadowing() {
        let mut builder = Scene::builder();
        builder.camera(test_camera());
        builder.add_light(Arc::new(DirectionalLight::new(
            Vec3::new(0., -1., 0.),
            Vec3::ones(),
        )));
        let floor = builder.add_material(Material::matte(Vec3::ones()));
        let blocker = builder.add_material(Material::matte(Vec3::ones()));
        builder.add_object(Arc::new(Plane::new(
            Vec3::new(0., 1., 0.),
            0.,
            builder.material(floor).unwrap(),
        )));
        builder.add_object(Arc::new(Sphere::new(
            Vec3::new(0., 3., 0.),
            0.5,
            builder.material(blocker).unwrap(),
        )));
        let scene = builder.build().unwrap();

        let tracer = RayTracer::new(0, true);
        let under = Ray::new(Vec3::new(0., 1., -1.), Vec3::new(0., -1., 1.));
        assert_eq!(tracer.sample_ray(&scene, &under), Vec3::zero());
        let clear = Ray::new(Vec3::new(3., 1., -1.), Vec3::new(0., -1., 1.));
        assert!(tracer.sample_ray(&scene, &clear).x > 0.);
    }
}
