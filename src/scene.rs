use crate::camera::{Camera, PerspectiveCamera, ThinLensCamera};
use crate::light::{DirectionalLight, Light, PointLight};
use crate::material::Material;
use crate::noise::Noise;
use crate::objects::group::Group;
use crate::objects::hit::Hitable;
use crate::objects::plane::Plane;
use crate::objects::sphere::Sphere;
use crate::objects::transform::Transform;
use crate::objects::triangle::Triangle;
use crate::texture::CubeMap;
use crate::Vec3;
use nalgebra::Matrix4;
use std::sync::Arc;
use thiserror::Error;

/// Construction-time invariant violations. Geometric and numeric edge
/// cases during rendering are never errors; only building a scene that
/// references resources or indices that do not exist is.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("light index {index} out of range ({count} lights)")]
    LightIndex { index: usize, count: usize },
    #[error("material index {index} out of range ({count} materials)")]
    MaterialIndex { index: usize, count: usize },
    #[error("scene has no camera")]
    MissingCamera,
    #[error("unknown scene index {0}")]
    UnknownScene(usize),
    #[error("failed to load texture: {0}")]
    Texture(#[from] image::ImageError),
    #[error("failed to load mesh: {0}")]
    Mesh(#[from] tobj::LoadError),
}

/// Read-only scene graph: geometry, materials, lights and cameras are
/// built once and never change during a render.
pub struct Scene {
    group: Group,
    camera: Arc<dyn Camera>,
    lens_camera: Option<Arc<dyn Camera>>,
    background_color: Vec3,
    cubemap: Option<Arc<CubeMap>>,
    ambient_light: Vec3,
    lights: Vec<Arc<dyn Light>>,
    materials: Vec<Arc<Material>>,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn camera(&self) -> &dyn Camera {
        &*self.camera
    }

    /// Thin-lens variant for depth-of-field passes, when configured.
    pub fn lens_camera(&self) -> Option<&dyn Camera> {
        self.lens_camera.as_deref()
    }

    /// Solid background color, or a cubemap lookup by ray direction.
    pub fn background_color(&self, dir: Vec3) -> Vec3 {
        match &self.cubemap {
            Some(cm) => cm.color_at(dir),
            None => self.background_color,
        }
    }

    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    pub fn lights(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    pub fn light(&self, index: usize) -> Result<&dyn Light, SceneError> {
        self.lights
            .get(index)
            .map(|l| &**l)
            .ok_or(SceneError::LightIndex {
                index,
                count: self.lights.len(),
            })
    }

    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn material(&self, index: usize) -> Result<Arc<Material>, SceneError> {
        self.materials
            .get(index)
            .cloned()
            .ok_or(SceneError::MaterialIndex {
                index,
                count: self.materials.len(),
            })
    }
}

pub struct SceneBuilder {
    group: Group,
    camera: Option<Arc<dyn Camera>>,
    lens_camera: Option<Arc<dyn Camera>>,
    background_color: Vec3,
    cubemap: Option<Arc<CubeMap>>,
    ambient_light: Vec3,
    lights: Vec<Arc<dyn Light>>,
    materials: Vec<Arc<Material>>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self {
            group: Group::new(),
            camera: None,
            lens_camera: None,
            background_color: Vec3::gray(0.5),
            cubemap: None,
            ambient_light: Vec3::zero(),
            lights: Vec::new(),
            materials: Vec::new(),
        }
    }
}

impl SceneBuilder {
    pub fn camera(&mut self, camera: Arc<dyn Camera>) -> &mut Self {
        self.camera = Some(camera);
        self
    }

    pub fn lens_camera(&mut self, camera: Arc<dyn Camera>) -> &mut Self {
        self.lens_camera = Some(camera);
        self
    }

    pub fn background_color(&mut self, color: Vec3) -> &mut Self {
        self.background_color = color;
        self
    }

    pub fn cubemap(&mut self, cubemap: Arc<CubeMap>) -> &mut Self {
        self.cubemap = Some(cubemap);
        self
    }

    pub fn ambient_light(&mut self, color: Vec3) -> &mut Self {
        self.ambient_light = color;
        self
    }

    pub fn add_light(&mut self, light: Arc<dyn Light>) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Registers a material and returns its index for later reference.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(Arc::new(material));
        self.materials.len() - 1
    }

    pub fn material(&self, index: usize) -> Result<Arc<Material>, SceneError> {
        self.materials
            .get(index)
            .cloned()
            .ok_or(SceneError::MaterialIndex {
                index,
                count: self.materials.len(),
            })
    }

    pub fn add_object(&mut self, obj: Arc<dyn Hitable>) -> &mut Self {
        self.group.add(obj);
        self
    }

    pub fn build(self) -> Result<Scene, SceneError> {
        let camera = self.camera.ok_or(SceneError::MissingCamera)?;
        log::debug!(
            "scene built: {} objects, {} lights, {} materials",
            self.group.len(),
            self.lights.len(),
            self.materials.len()
        );
        Ok(Scene {
            group: self.group,
            camera,
            lens_camera: self.lens_camera,
            background_color: self.background_color,
            cubemap: self.cubemap,
            ambient_light: self.ambient_light,
            lights: self.lights,
            materials: self.materials,
        })
    }
}

fn glass_sphere_scene(aspect: f64) -> Result<Scene, SceneError> {
    let mut builder = Scene::builder();
    builder
        .camera(Arc::new(PerspectiveCamera::new(
            Vec3::new(0., 0.5, -4.),
            Vec3::new(0., 0., 1.),
            Vec3::new(0., 1., 0.),
            60.,
            aspect,
        )))
        .background_color(Vec3::new(0.2, 0.3, 0.5))
        .ambient_light(Vec3::gray(0.1));
    builder.add_light(Arc::new(PointLight::new(
        Vec3::new(2., 5., -1.),
        Vec3::gray(1.6),
        0.02,
    )));
    builder.add_light(Arc::new(DirectionalLight::new(
        Vec3::new(-0.5, -1., 0.5),
        Vec3::gray(0.4),
    )));

    let floor = builder.add_material(Material::matte(Vec3::new(0.55, 0.5, 0.45)));
    let glass = builder.add_material(Material::new(
        Vec3::gray(0.05),
        Vec3::gray(0.9),
        64.,
        1.5,
    ));
    let copper = builder.add_material(Material::new(
        Vec3::new(0.7, 0.35, 0.2),
        Vec3::gray(0.25),
        16.,
        0.,
    ));

    builder.add_object(Arc::new(Plane::new(
        Vec3::new(0., 1., 0.),
        1.,
        builder.material(floor)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(0., 0., 1.),
        1.,
        builder.material(glass)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(-2.2, -0.4, 2.5),
        0.6,
        builder.material(copper)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(2.2, -0.2, 3.),
        0.8,
        builder.material(copper)?,
    )));
    builder.build()
}

fn marble_scene(aspect: f64) -> Result<Scene, SceneError> {
    let mut builder = Scene::builder();
    builder
        .camera(Arc::new(PerspectiveCamera::new(
            Vec3::new(0., 1., -5.),
            Vec3::new(0., -0.1, 1.),
            Vec3::new(0., 1., 0.),
            50.,
            aspect,
        )))
        .background_color(Vec3::new(0.05, 0.05, 0.08))
        .ambient_light(Vec3::gray(0.15));
    builder.add_light(Arc::new(PointLight::new(
        Vec3::new(-3., 6., -2.),
        Vec3::gray(2.),
        0.02,
    )));

    let floor = builder.add_material(Material::matte(Vec3::gray(0.4)));
    let marble = builder.add_material(Material::matte(Vec3::ones()).with_noise(Noise::new(
        5,
        Vec3::gray(0.9),
        Vec3::new(0.25, 0.2, 0.35),
        6.,
        3.,
    )));
    let mirror = builder.add_material(Material::new(Vec3::gray(0.1), Vec3::gray(0.8), 32., 0.));

    builder.add_object(Arc::new(Plane::new(
        Vec3::new(0., 1., 0.),
        1.,
        builder.material(floor)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(-1.2, 0., 1.),
        1.,
        builder.material(marble)?,
    )));
    // squashed mirror sphere
    builder.add_object(Arc::new(Transform::new(
        Matrix4::new_translation(&nalgebra::Vector3::new(1.5, -0.5, 2.))
            * Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(1.2, 0.5, 1.2)),
        Arc::new(Sphere::new(Vec3::zero(), 1., builder.material(mirror)?)),
    )));
    builder.add_object(Arc::new(
        Triangle::new(
            Vec3::new(-3., -1., 4.),
            Vec3::new(0., 2.5, 5.),
            Vec3::new(3., -1., 4.),
            builder.material(marble)?,
        )
        .with_texcoords([(0., 0.), (0.5, 1.), (1., 0.)]),
    ));
    builder.build()
}

fn depth_of_field_scene(aspect: f64) -> Result<Scene, SceneError> {
    let center = Vec3::new(0., 0., -6.);
    let direction = Vec3::new(0., 0., 1.);
    let up = Vec3::new(0., 1., 0.);
    let mut builder = Scene::builder();
    builder
        .camera(Arc::new(PerspectiveCamera::new(
            center, direction, up, 45., aspect,
        )))
        .lens_camera(Arc::new(ThinLensCamera::new(
            center, direction, up, 45., aspect, 6., 0.25,
        )))
        .background_color(Vec3::new(0.3, 0.3, 0.35))
        .ambient_light(Vec3::gray(0.1));
    builder.add_light(Arc::new(DirectionalLight::new(
        Vec3::new(-1., -1., 1.),
        Vec3::gray(1.2),
    )));

    let near = builder.add_material(Material::matte(Vec3::new(0.8, 0.2, 0.2)));
    let mid = builder.add_material(Material::matte(Vec3::new(0.2, 0.8, 0.2)));
    let far = builder.add_material(Material::matte(Vec3::new(0.2, 0.2, 0.8)));

    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(-1.5, 0., -3.),
        0.7,
        builder.material(near)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(0., 0., 0.),
        0.7,
        builder.material(mid)?,
    )));
    builder.add_object(Arc::new(Sphere::new(
        Vec3::new(1.5, 0., 3.),
        0.7,
        builder.material(far)?,
    )));
    builder.build()
}

/// Built-in scene catalog, in place of an external scene-file format.
pub fn select_scene(index: usize, aspect: f64) -> Result<Scene, SceneError> {
    match index {
        0 => glass_sphere_scene(aspect),
        1 => marble_scene(aspect),
        2 => depth_of_field_scene(aspect),
        _ => Err(SceneError::UnknownScene(index)),
    }
}
