use crate::image_buffer::Image;
use crate::Vec3;

/// Separable 5-tap blur used to resolve 3x-supersampled renders.
pub const GAUSSIAN_KERNEL: [f64; 5] = [0.1201, 0.2339, 0.2931, 0.2339, 0.1201];

pub struct Smoothing;

impl Smoothing {
    /// In-place separable Gaussian: one vertical pass, one horizontal
    /// pass, taps clamped at the borders.
    pub fn gaussian(image: &mut Image, kernel: &[f64; 5]) {
        let (w, h) = (image.width(), image.height());
        let mut res = Image::new(w, h);
        for i in 0..w {
            for j in 0..h {
                let mut color = Vec3::zero();
                for (k, weight) in kernel.iter().enumerate() {
                    let y = (j as i64 - 2 + k as i64).clamp(0, h as i64 - 1) as usize;
                    color += *weight * image.pixel(i, y);
                }
                res.set_pixel(i, j, color);
            }
        }
        image.set_image(&res);
        for i in 0..w {
            for j in 0..h {
                let mut color = Vec3::zero();
                for (k, weight) in kernel.iter().enumerate() {
                    let x = (i as i64 - 2 + k as i64).clamp(0, w as i64 - 1) as usize;
                    color += *weight * image.pixel(x, j);
                }
                res.set_pixel(i, j, color);
            }
        }
        image.set_image(&res);
    }
}
