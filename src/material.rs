use crate::noise::Noise;
use crate::objects::hit::HitRecord;
use crate::texture::{CubeMap, NormalMap, Texture};
use crate::Ray;
use crate::Vec3;
use std::sync::Arc;

/// Surface appearance, shared by reference across geometry and immutable
/// once the scene is built.
///
/// The diffuse albedo is resolved in precedence order: procedural noise,
/// then image texture (when the hit carries texture coordinates), then the
/// flat diffuse color.
pub struct Material {
    diffuse_color: Vec3,
    specular_color: Vec3,
    shininess: f64,
    refraction_index: f64,
    texture: Option<Texture>,
    normal_map: Option<NormalMap>,
    noise: Option<Noise>,
    cubemap: Option<Arc<CubeMap>>,
}

impl Material {
    pub fn new(
        diffuse_color: Vec3,
        specular_color: Vec3,
        shininess: f64,
        refraction_index: f64,
    ) -> Self {
        Self {
            diffuse_color,
            specular_color,
            shininess,
            refraction_index,
            texture: None,
            normal_map: None,
            noise: None,
            cubemap: None,
        }
    }

    /// Purely diffuse surface.
    pub fn matte(diffuse_color: Vec3) -> Self {
        Self::new(diffuse_color, Vec3::zero(), 0., 0.)
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_normal_map(mut self, normal_map: NormalMap) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    pub fn with_noise(mut self, noise: Noise) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn with_cubemap(mut self, cubemap: Arc<CubeMap>) -> Self {
        self.cubemap = Some(cubemap);
        self
    }

    pub fn diffuse_color(&self) -> Vec3 {
        self.diffuse_color
    }

    pub fn specular_color(&self) -> Vec3 {
        self.specular_color
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    pub fn has_cubemap(&self) -> bool {
        self.cubemap.is_some()
    }

    fn shading_normal(&self, rec: &HitRecord) -> Vec3 {
        if let (Some(map), Some((u, v)), Some(tbn)) = (&self.normal_map, rec.uv, rec.tbn) {
            tbn.apply(map.normal_at(u, v)).unit()
        } else {
            rec.normal
        }
    }

    fn albedo(&self, rec: &HitRecord) -> Vec3 {
        if let Some(noise) = &self.noise {
            noise.color_at(rec.p)
        } else if let (Some(texture), Some((u, v))) = (&self.texture, rec.uv) {
            texture.color_at(u, v)
        } else {
            self.diffuse_color
        }
    }

    /// Shaded color for one light. In casting mode a Phong specular lobe is
    /// added; the recursive tracer handles specular transport itself and
    /// asks for the diffuse term only.
    pub fn shading_color(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        dir_to_light: Vec3,
        light_color: Vec3,
        ray_casting: bool,
    ) -> Vec3 {
        let n = self.shading_normal(rec);
        let diffuse_shading = (dir_to_light * n).max(0.);
        let diffuse = diffuse_shading * Vec3::elemul(light_color, self.albedo(rec));
        if !ray_casting {
            return diffuse;
        }
        let specular_shading = ((dir_to_light.unit() - 2. * diffuse_shading * n)
            * ray.dir.unit())
        .max(0.);
        let specular =
            specular_shading.powf(self.shininess) * Vec3::elemul(light_color, self.specular_color);
        diffuse + specular
    }

    /// Decorative environment lookup for cubemapped surfaces: half a
    /// mirror-reflected cubemap sample, half the noise color at the hit
    /// point. Never recurses into the scene.
    pub fn environment_color(&self, ray: &Ray, rec: &HitRecord) -> Vec3 {
        let cubemap = match &self.cubemap {
            Some(c) => c,
            None => return Vec3::zero(),
        };
        let reflection = Vec3::reflect(ray.dir, rec.normal);
        let noise_color = match &self.noise {
            Some(noise) => noise.color_at(rec.p),
            None => Vec3::zero(),
        };
        0.5 * cubemap.color_at(reflection) + 0.5 * noise_color
    }
}
