//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/showcase.json

use std::env;

use glint_core::{Scene, SurfaceKind};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/showcase.json");
        println!("  cargo run --example inspect_scene -- scenes/mirrors.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match Scene::load(path) {
        Ok(scene) => {
            println!("\n=== Scene: {} surfaces ===", scene.len());
            println!(
                "Light: ({:.2}, {:.2}, {:.2}) color ({:.2}, {:.2}, {:.2})",
                scene.light.position.x,
                scene.light.position.y,
                scene.light.position.z,
                scene.light.color.x,
                scene.light.color.y,
                scene.light.color.z
            );
            println!("Ambient: {:.3}", scene.ambient);

            println!("\n--- Surfaces ---");
            for (i, surface) in scene.surfaces().iter().enumerate() {
                let p = surface.position;
                println!(
                    "  [{}] {} at ({:.2}, {:.2}, {:.2})",
                    i,
                    surface.kind_name(),
                    p.x,
                    p.y,
                    p.z
                );
                match surface.kind {
                    SurfaceKind::Sphere { radius } => println!("       Radius: {:.3}", radius),
                    SurfaceKind::Plane { normal } => {
                        println!("       Normal: ({:.2}, {:.2}, {:.2})", normal.x, normal.y, normal.z)
                    }
                    SurfaceKind::Checkerboard {
                        normal, tile_size, ..
                    } => println!(
                        "       Normal: ({:.2}, {:.2}, {:.2}), tile {:.3}",
                        normal.x, normal.y, normal.z, tile_size
                    ),
                }
                let m = surface.material;
                println!(
                    "       Reflection {:.2}, diffuse {:.2}, specular {:.2}^{:.0}",
                    m.reflection, m.diffuse, m.specular_c, m.specular_k
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
