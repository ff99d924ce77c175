use crate::image_buffer::Image;
use crate::integrator::Integrator;
use crate::scene::Scene;
use rand::{Rng, RngCore};

/// Drives the per-pixel sampling loop. Pixel `(i, j)` maps to the
/// normalized screen coordinate `(-1 + 2i/(w-1), -1 + 2j/(h-1))`. With
/// jitter enabled the image is first enlarged 3x per axis and every
/// sample position is perturbed by up to half a pixel; the caller then
/// resolves the oversampled buffer with `Smoothing` and a 3:1 sampling
/// rate.
pub struct Renderer;

impl Renderer {
    pub fn render_scene(
        scene: &Scene,
        img: &mut Image,
        integrator: &dyn Integrator,
        jittered: bool,
        rng: &mut dyn RngCore,
        mut on_progress: impl FnMut(f64),
    ) {
        let (mut w, mut h) = (img.width(), img.height());
        if jittered {
            w *= 3;
            h *= 3;
            img.reset(w, h);
        }
        for j in 0..h {
            for i in 0..w {
                let (mut x, mut y) = (i as f64, j as f64);
                if jittered {
                    x += rng.gen::<f64>() - 0.5;
                    y += rng.gen::<f64>() - 0.5;
                }
                let x = -1. + 2. * x / (w - 1) as f64;
                let y = -1. + 2. * y / (h - 1) as f64;
                let color = integrator.sample_pixel(scene, (x, y), rng);
                img.set_pixel(i, j, color);
            }
            on_progress((j + 1) as f64 / h as f64);
        }
    }
}
