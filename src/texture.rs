use crate::Vec3;
use image::{DynamicImage, GenericImageView, ImageError};
use std::convert::TryInto;
use std::path::Path;

/// Image texture with bilinear filtering. `u` runs left to right, `v`
/// bottom to top; lookups outside `[0, 1]` clamp to the border texels.
pub struct Texture {
    img: DynamicImage,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn load(path: &Path) -> Result<Self, ImageError> {
        Ok(Self::from_image(image::open(path)?))
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self { img, width, height }
    }

    fn texel(&self, x: i64, y: i64) -> Vec3 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        Vec3::from(self.img.get_pixel(x, y))
    }

    pub fn color_at(&self, u: f64, v: f64) -> Vec3 {
        let x = u * self.width as f64;
        let y = (1. - v) * self.height as f64;
        let (ix, iy) = (x.floor() as i64, y.floor() as i64);
        let (alpha, beta) = (x - ix as f64, y - iy as f64);
        (1. - alpha) * (1. - beta) * self.texel(ix, iy)
            + alpha * (1. - beta) * self.texel(ix + 1, iy)
            + (1. - alpha) * beta * self.texel(ix, iy + 1)
            + alpha * beta * self.texel(ix + 1, iy + 1)
    }
}

/// Tangent-space normal map: texels decode to `2 * rgb - 1`.
pub struct NormalMap(Texture);

impl NormalMap {
    pub fn load(path: &Path) -> Result<Self, ImageError> {
        Ok(Self(Texture::load(path)?))
    }

    pub fn from_image(img: DynamicImage) -> Self {
        Self(Texture::from_image(img))
    }

    pub fn normal_at(&self, u: f64, v: f64) -> Vec3 {
        2. * self.0.color_at(u, v) - Vec3::ones()
    }
}

/// Face order of a cube map.
pub const CUBE_FACES: [&str; 6] = ["right", "left", "top", "bottom", "front", "back"];

/// Six-face environment map indexed by world direction: the dominant axis
/// of the direction selects the face, the remaining two components index
/// into it.
pub struct CubeMap {
    faces: [Texture; 6],
}

impl CubeMap {
    pub fn new(faces: [Texture; 6]) -> Self {
        Self { faces }
    }

    /// Loads `right/left/top/bottom/front/back` images with the given
    /// extension from a directory.
    pub fn load(dir: &Path, ext: &str) -> Result<Self, ImageError> {
        let mut faces = Vec::with_capacity(6);
        for name in &CUBE_FACES {
            faces.push(Texture::load(&dir.join(format!("{}.{}", name, ext)))?);
        }
        let faces: [Texture; 6] = match faces.try_into() {
            Ok(f) => f,
            Err(_) => unreachable!(),
        };
        Ok(Self::new(faces))
    }

    pub fn color_at(&self, dir: Vec3) -> Vec3 {
        let a = dir.abs();
        let (face, u, v) = if a.x >= a.y && a.x >= a.z {
            if dir.x > 0. {
                (0, -dir.z / a.x, dir.y / a.x)
            } else {
                (1, dir.z / a.x, dir.y / a.x)
            }
        } else if a.y >= a.z {
            if dir.y > 0. {
                (2, dir.x / a.y, -dir.z / a.y)
            } else {
                (3, dir.x / a.y, dir.z / a.y)
            }
        } else if dir.z > 0. {
            (4, dir.x / a.z, dir.y / a.z)
        } else {
            (5, -dir.x / a.z, dir.y / a.z)
        };
        self.faces[face].color_at((u + 1.) / 2., (v + 1.) / 2.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(r: u8, g: u8, b: u8) -> Texture {
        Texture::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            4,
            4,
            Rgba([r, g, b, 255]),
        )))
    }

    #[test]
    fn test_solid_texture_lookup() {
        let t = solid(255, 0, 0);
        assert!((t.color_at(0.5, 0.5) - Vec3::new(1., 0., 0.)).length() < 1e-9);
        // border clamp
        assert!((t.color_at(-1., 2.) - Vec3::new(1., 0., 0.)).length() < 1e-9);
    }

    #[test]
    fn test_bilinear_blend() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        let t = Texture::from_image(DynamicImage::ImageRgba8(img));
        // halfway between the two texel centers
        let c = t.color_at(0.5, 0.5);
        assert!((c.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normal_map_decodes_to_unit_range() {
        let n = NormalMap::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([128, 128, 255, 255]),
        )));
        let v = n.normal_at(0.5, 0.5);
        assert!(v.x.abs() < 0.01);
        assert!(v.y.abs() < 0.01);
        assert!((v.z - 1.).abs() < 0.01);
    }

    #[test]
    fn test_cubemap_selects_dominant_axis() {
        let cm = CubeMap::new([
            solid(255, 0, 0),
            solid(0, 255, 0),
            solid(0, 0, 255),
            solid(255, 255, 0),
            solid(0, 255, 255),
            solid(255, 0, 255),
        ]);
        assert!((cm.color_at(Vec3::new(1., 0.1, 0.1)) - Vec3::new(1., 0., 0.)).length() < 1e-9);
        assert!((cm.color_at(Vec3::new(-1., 0.1, 0.1)) - Vec3::new(0., 1., 0.)).length() < 1e-9);
        assert!((cm.color_at(Vec3::new(0.1, 1., 0.1)) - Vec3::new(0., 0., 1.)).length() < 1e-9);
        assert!((cm.color_at(Vec3::new(0.1, 0.1, -1.)) - Vec3::new(1., 0., 1.)).length() < 1e-9);
    }
}
