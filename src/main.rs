use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use phong_lighting::config::SceneConfig;
use phong_lighting::core::OrbitCamera;
use phong_lighting::material_library::MaterialLibrary;
use phong_lighting::render::{render_sphere, Sphere, SphereScene};

/// Render a Blinn-Phong lit sphere to a PNG
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene configuration (created with defaults if missing)
    #[arg(long, default_value = "config/scene.json")]
    config: String,

    /// Material library (created with defaults if missing)
    #[arg(long, default_value = "config/materials.json")]
    materials: String,

    /// Output image path
    #[arg(short, long, default_value = "phong.png")]
    output: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = SceneConfig::load_or_default(&args.config);
    let library = MaterialLibrary::load_or_default(&args.materials);

    config.render.validate()?;

    let material = library.get_or_default(&config.material);
    material.validate()?;

    let scene = SphereScene {
        camera: OrbitCamera::from(config.camera.clone()),
        sphere: Sphere::new(config.render.sphere_center, config.render.sphere_radius),
        material,
        rig: config.build_rig()?,
        background: config.render.background_color,
    };

    info!(
        "Rendering '{}' at {}x{}",
        config.material, config.render.width, config.render.height
    );
    let framebuffer = render_sphere(&scene, config.render.width, config.render.height);
    framebuffer.save(&args.output)?;

    Ok(())
}
