use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use std::time::Instant;
use whitted::image_buffer::Image;
use whitted::integrator::{
    BlurryRayCaster, DepthRayCaster, Integrator, NormalsRayCaster, RayCaster, RayTracer,
};
use whitted::renderer::Renderer;
use whitted::scene::{select_scene, Scene};
use whitted::smoothing::{Smoothing, GAUSSIAN_KERNEL};

#[derive(Parser)]
#[clap(name = "whitted", version, about = "Whitted-style ray tracer")]
struct Args {
    /// Built-in scene index
    #[clap(long, default_value_t = 0)]
    scene: usize,

    #[clap(long, default_value_t = 800)]
    width: usize,

    #[clap(long, default_value_t = 600)]
    height: usize,

    /// Main render output path
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Maximum recursion depth for reflection and refraction
    #[clap(long, default_value_t = 4)]
    bounces: u32,

    /// Cast shadow rays toward each light
    #[clap(long)]
    shadows: bool,

    /// 3x supersampling with per-sample jitter
    #[clap(long)]
    jitter: bool,

    /// Gaussian blur plus 3:1 downsample after rendering
    #[clap(long)]
    filter: bool,

    /// One-bounce ray casting instead of recursive tracing
    #[clap(long)]
    casting: bool,

    /// Depth-of-field pass through the scene's thin-lens camera
    #[clap(long)]
    blurry: bool,

    /// Depth map output path
    #[clap(long)]
    depth_output: Option<PathBuf>,

    #[clap(long, default_value_t = 0.0)]
    depth_min: f64,

    #[clap(long, default_value_t = 1.0)]
    depth_max: f64,

    /// Normals map output path
    #[clap(long)]
    normals_output: Option<PathBuf>,

    /// Seed for jitter and lens sampling; random when omitted
    #[clap(long)]
    seed: Option<u64>,
}

fn render_pass(
    scene: &Scene,
    integrator: &dyn Integrator,
    args: &Args,
    jitter: bool,
    filter: bool,
    rng: &mut dyn RngCore,
) -> Image {
    let mut img = Image::new(args.width, args.height);
    let bar = ProgressBar::new(100);
    let start = Instant::now();
    Renderer::render_scene(scene, &mut img, integrator, jitter, rng, |fraction| {
        bar.set_position((fraction * 100.) as u64)
    });
    bar.finish();
    if filter {
        Smoothing::gaussian(&mut img, &GAUSSIAN_KERNEL);
        img.set_sampling_rate(3.);
    }
    info!("pass finished in {:.2?}", start.elapsed());
    img
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.output.is_none() && args.depth_output.is_none() && args.normals_output.is_none() {
        bail!("no output requested: pass --output, --depth-output or --normals-output");
    }

    let aspect = args.width as f64 / args.height as f64;
    let scene = select_scene(args.scene, aspect)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "scene {}: {} objects, {} lights",
        args.scene,
        scene.group().len(),
        scene.num_lights()
    );

    if let Some(path) = &args.output {
        let integrator: Box<dyn Integrator> = if args.blurry {
            Box::new(BlurryRayCaster::new())
        } else if args.casting {
            Box::new(RayCaster::new())
        } else {
            Box::new(RayTracer::new(args.bounces, args.shadows))
        };
        let img = render_pass(&scene, &*integrator, &args, args.jitter, args.filter, &mut rng);
        img.save(path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    if let Some(path) = &args.depth_output {
        let caster = DepthRayCaster {
            depth_min: args.depth_min,
            depth_max: args.depth_max,
        };
        let img = render_pass(&scene, &caster, &args, false, false, &mut rng);
        img.save(path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    if let Some(path) = &args.normals_output {
        let img = render_pass(&scene, &NormalsRayCaster, &args, false, false, &mut rng);
        img.save(path)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
