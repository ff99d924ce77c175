#![allow(clippy::float_cmp)]
#[macro_use]
extern crate lazy_static;

pub mod camera;
pub mod image_buffer;
pub mod integrator;
pub mod light;
pub mod material;
pub mod noise;
pub mod objects;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod smoothing;
pub mod texture;
pub mod vec3;

pub use ray::Ray;
pub use vec3::Vec3;
