use crate::Vec3;
use image::{ImageBuffer, ImageError, Rgb, RgbImage};
use std::path::Path;

/// Render target: a flat buffer of linear colors. A sampling rate greater
/// than one marks a pending decimation: readers that go through the
/// `sampled_*` accessors see the buffer at `1/rate` of its stored size,
/// which is how a 3x-supersampled render collapses back to the requested
/// resolution.
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<Vec3>,
    sampling_rate: f64,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![Vec3::zero(); width * height],
            sampling_rate: 1.,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Vec3 {
        assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Vec3) {
        assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = color;
    }

    pub fn set_all_pixels(&mut self, color: Vec3) {
        for pixel in &mut self.data {
            *pixel = color;
        }
    }

    /// Resize and clear; drops any pending sampling rate.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, Vec3::zero());
        self.sampling_rate = 1.;
    }

    pub fn set_sampling_rate(&mut self, rate: f64) {
        assert!(rate > 0.);
        self.sampling_rate = rate;
    }

    pub fn sampled_width(&self) -> usize {
        if self.sampling_rate == 1. {
            self.width
        } else {
            (self.width as f64 / self.sampling_rate).floor() as usize
        }
    }

    pub fn sampled_height(&self) -> usize {
        if self.sampling_rate == 1. {
            self.height
        } else {
            (self.height as f64 / self.sampling_rate).floor() as usize
        }
    }

    pub fn sampled_pixel(&self, x: usize, y: usize) -> Vec3 {
        self.pixel(
            (x as f64 * self.sampling_rate).floor() as usize,
            (y as f64 * self.sampling_rate).floor() as usize,
        )
    }

    /// Copy dimensions, sampling rate and contents from another image.
    pub fn set_image(&mut self, other: &Image) {
        self.width = other.width;
        self.height = other.height;
        self.sampling_rate = other.sampling_rate;
        self.data.clear();
        self.data.extend_from_slice(&other.data);
    }

    /// Encode at the sampled resolution.
    pub fn save(&self, path: &Path) -> Result<(), ImageError> {
        let (w, h) = (self.sampled_width(), self.sampled_height());
        let mut img: RgbImage = ImageBuffer::new(w as u32, h as u32);
        for y in 0..h {
            for x in 0..w {
                *img.get_pixel_mut(x as u32, y as u32) = Rgb::from(self.sampled_pixel(x, y));
            }
        }
        img.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut img = Image::new(4, 3);
        img.set_pixel(2, 1, Vec3::ones());
        assert_eq!(img.pixel(2, 1), Vec3::ones());
        assert_eq!(img.pixel(0, 0), Vec3::zero());
    }

    #[test]
    fn test_reset_clears_rate() {
        let mut img = Image::new(2, 2);
        img.set_sampling_rate(3.);
        img.reset(6, 6);
        assert_eq!(img.width(), 6);
        assert_eq!(img.sampled_width(), 6);
    }

    #[test]
    fn test_sampled_decimation() {
        let mut img = Image::new(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                img.set_pixel(x, y, Vec3::gray((y * 6 + x) as f64));
            }
        }
        img.set_sampling_rate(3.);
        assert_eq!(img.sampled_width(), 2);
        assert_eq!(img.sampled_height(), 2);
        assert_eq!(img.sampled_pixel(0, 0), img.pixel(0, 0));
        assert_eq!(img.sampled_pixel(1, 0), img.pixel(3, 0));
        assert_eq!(img.sampled_pixel(1, 1), img.pixel(3, 3));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        Image::new(2, 2).pixel(2, 0);
    }
}
