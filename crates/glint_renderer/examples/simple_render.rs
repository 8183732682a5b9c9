//! Simple ray tracer example.
//!
//! Renders the showcase scene once per schedule and saves each to PNG.

use glint_core::Preset;
use glint_renderer::{render_frame, Camera, RenderConfig, Schedule};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let scene = Preset::Showcase.build();
    println!("Scene has {} surfaces", scene.len());

    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let camera = Camera::default();

    for schedule in [Schedule::Static, Schedule::Dynamic, Schedule::WorkStealing] {
        let config = RenderConfig::default()
            .with_resolution(800, 600)
            .with_threads(threads)
            .with_schedule(schedule);

        println!("Rendering {}x{} with {} schedule on {} threads...",
            config.width, config.height, schedule.name(), threads);

        let (image, stats) = render_frame(&config, &scene, &camera).expect("Render failed");
        stats.log();

        let filename = format!("simple_{}.png", schedule.name());
        image.save(&filename).expect("Failed to save image");
        println!("Rendered in {:?}, saved to {}", stats.elapsed, filename);
    }
}
