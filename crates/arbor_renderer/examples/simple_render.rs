//! Simple ray casting example.
//!
//! Builds a small scene in code, renders it with Phong shading and saves a PNG.

use std::sync::Arc;

use arbor_core::{Material, Mesh, Primitive, SceneNode};
use arbor_math::{Axis, DVec3, Point3};
use arbor_renderer::{render_parallel, Camera, Colour, Light, RenderConfig, ShadingModel};

fn main() {
    env_logger::init();

    println!("Arbor Renderer - Simple Example");
    println!("===============================");

    let start = std::time::Instant::now();
    let root = build_scene();
    println!("Scene built in {:?} ({} nodes)", start.elapsed(), root.node_count());

    let mut camera = Camera::new()
        .with_resolution(640, 480)
        .with_position(
            Point3::new(0.0, 2.0, 12.0), // eye
            DVec3::new(0.0, -0.15, -1.0), // view
            DVec3::Y,                     // up
        )
        .with_lens(45.0_f64.to_radians(), 1.0);
    camera.initialize();

    let config = RenderConfig {
        background: Colour::new(0.1, 0.1, 0.2),
        ambient: Colour::splat(0.15),
        lights: vec![
            Light::new(Point3::new(-10.0, 10.0, 10.0), Colour::splat(0.8)),
            Light::new(Point3::new(8.0, 4.0, 6.0), Colour::new(0.4, 0.3, 0.2)),
        ],
        shading: ShadingModel::Phong,
        ..RenderConfig::default()
    };

    println!("Rendering {}x{}...", camera.image_width, camera.image_height);

    let start = std::time::Instant::now();
    let image = match render_parallel(&camera, &root, &config) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            return;
        }
    };
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.png";
    match image.save(filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save image: {}", e),
    }
}

fn build_scene() -> SceneNode {
    let stone = Arc::new(Material::phong(Colour::new(0.6, 0.6, 0.55), Colour::splat(0.1), 5.0));
    let red = Arc::new(Material::phong(Colour::new(0.8, 0.15, 0.1), Colour::splat(0.6), 40.0));
    let blue = Arc::new(Material::phong(Colour::new(0.1, 0.3, 0.8), Colour::splat(0.3), 15.0));

    let mut root = SceneNode::new("root");

    // Ground slab
    let mut ground = SceneNode::geometry("ground", Primitive::Cube, stone.clone());
    ground.translate(DVec3::new(-10.0, -2.0, -10.0));
    ground.scale(DVec3::new(20.0, 1.0, 20.0));
    root.add_child(ground);

    // A squashed sphere sitting on the ground
    let mut egg = SceneNode::geometry("egg", Primitive::Sphere, red);
    egg.translate(DVec3::new(-2.0, 0.0, 0.0));
    egg.scale(DVec3::new(1.0, 1.5, 1.0));
    root.add_child(egg);

    // An arm of two boxes hinged on a joint
    let mut shoulder = SceneNode::new("shoulder");
    shoulder.translate(DVec3::new(2.0, -1.0, 0.0));
    shoulder.rotate(Axis::Z, 20.0);
    let mut upper = SceneNode::geometry("upper", Primitive::Cube, blue.clone());
    upper.scale(DVec3::new(0.5, 2.0, 0.5));
    shoulder.add_child(upper);

    let mut elbow = SceneNode::new("elbow");
    elbow.translate(DVec3::new(0.0, 2.0, 0.0));
    elbow.rotate(Axis::Z, -45.0);
    let mut lower = SceneNode::geometry("lower", Primitive::Cube, blue);
    lower.scale(DVec3::new(0.4, 1.5, 0.4));
    elbow.add_child(lower);
    shoulder.add_child(elbow);
    root.add_child(shoulder);

    // A tetrahedron mesh
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 2, 3]];
    match Mesh::new(vertices, faces) {
        Ok(mesh) => {
            let mut tetra = SceneNode::geometry("tetra", Primitive::Mesh(mesh), stone);
            tetra.translate(DVec3::new(-0.5, -1.0, 3.0));
            root.add_child(tetra);
        }
        Err(e) => eprintln!("Skipping mesh: {}", e),
    }

    root
}
