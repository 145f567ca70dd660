//! Example: Load and inspect a scene description.
//!
//! Run with: cargo run --example inspect_scene -- assets/simple.json

use std::env;

use arbor_core::{load_scene, NodeKind, Primitive, SceneNode};
use arbor_math::{DMat4, Mat4Ext, Point3};

fn print_node(node: &SceneNode, parent: DMat4, depth: usize) {
    let world = parent * *node.transform();
    let origin = world.apply_point(Point3::ORIGIN);
    let kind = match node.kind() {
        NodeKind::Transform => "node".to_string(),
        NodeKind::Joint(joint) => {
            let angles = joint.current_angles();
            format!("joint x={:.1} y={:.1}", angles.x, angles.y)
        }
        NodeKind::Geometry(geometry) => match geometry.primitive() {
            Primitive::Mesh(mesh) => format!(
                "mesh {} vertices, {} faces",
                mesh.vertex_count(),
                mesh.face_count()
            ),
            primitive => primitive.kind_name().to_string(),
        },
    };
    println!(
        "{:indent$}{} [{}] at ({:.2}, {:.2}, {:.2})",
        "",
        node.name(),
        kind,
        origin.x,
        origin.y,
        origin.z,
        indent = depth * 2
    );
    for child in node.children() {
        print_node(child, world, depth + 1);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- assets/simple.json");
        println!("  cargo run --example inspect_scene -- assets/puppet.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", scene.name);
            println!("Nodes: {}", scene.root.node_count());
            println!("Materials: {}", scene.materials.len());

            println!("\n--- Materials ---");
            for (name, material) in &scene.materials {
                let kd = material.diffuse();
                println!(
                    "  {} - kd ({:.2}, {:.2}, {:.2}), shininess {}",
                    name,
                    kd.x,
                    kd.y,
                    kd.z,
                    material.shininess()
                );
            }

            println!("\n--- Hierarchy ---");
            print_node(&scene.root, DMat4::IDENTITY, 1);

            match &scene.render {
                Some(render) => {
                    println!("\n--- Render ---");
                    println!("  Output: {}", render.output.display());
                    println!("  Size: {}x{}", render.width, render.height);
                    println!("  Eye: {}", render.eye);
                    println!("  Fov: {:.1} degrees", render.fov.to_degrees());
                    println!("  Lights: {}", render.lights.len());
                    println!("  Shading: {:?}", render.shading);
                }
                None => println!("\nNo render section"),
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
        }
    }
}
