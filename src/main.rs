#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

use std::path::Path;
use std::process;
use std::str::FromStr;

use clap::{App, Arg};

use pathforge::assets::{load_image_or_fallback, load_mesh_or_fallback};
use pathforge::consts::SAMPLES_PER_PIXEL;
use pathforge::material::{Material, MaterialSystem, BACKGROUND_MATERIAL};
use pathforge::math::{Point, Quaternion};
use pathforge::mesh::build_mesh_midphase;
use pathforge::timer::Timer;
use pathforge::{add_object_to_scene, build_scene_broadphase, render_scene, Camera, Scene};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let mut t = Timer::new();

    let args = App::new("pathforge")
        .version(VERSION)
        .about("A multi-threaded CPU path tracer")
        .arg(
            Arg::with_name("asset_dir")
                .long("asset-dir")
                .value_name("DIR")
                .help("Directory to load mesh and image assets from")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("spp")
                .short("s")
                .long("spp")
                .value_name("N")
                .help("Samples per pixel")
                .takes_value(true)
                .validator(|s| usize::from_str(&s).map(|_| ()).map_err(|_| "must be an integer".to_string())),
        )
        .arg(
            Arg::with_name("threads")
                .short("t")
                .long("threads")
                .value_name("N")
                .help("Number of worker threads. Defaults to the number of logical cores.")
                .takes_value(true)
                .validator(|s| usize::from_str(&s).map(|_| ()).map_err(|_| "must be an integer".to_string())),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Output .ppm path")
                .takes_value(true)
                .default_value("render.ppm"),
        )
        .arg(Arg::with_name("stats").long("stats").help("Print render statistics"))
        .get_matches();

    let asset_dir = args.value_of("asset_dir").unwrap();
    let spp = args.value_of("spp").map(|s| usize::from_str(s).unwrap()).unwrap_or(SAMPLES_PER_PIXEL);
    let thread_count = args.value_of("threads").map(|s| usize::from_str(s).unwrap()).unwrap_or_else(num_cpus::get);
    let output_path = args.value_of("output").unwrap();
    let print_stats = args.is_present("stats");

    println!("Loading assets from '{}'...", asset_dir);
    t.tick();
    let mut mesh = load_mesh_or_fallback(&format!("{}/mesh.obj", asset_dir), true);
    let env_image = load_image_or_fallback(&format!("{}/env.hdr", asset_dir));
    println!("\tLoaded assets in {:.3}s", t.tick());

    if mesh.triangle_count() == 0 {
        eprintln!("error: no usable geometry; aborting before render");
        process::exit(1);
    }

    println!("Building scene...");
    build_mesh_midphase(&mut mesh);

    let mut scene = Scene::new();
    add_object_to_scene(&mut scene, mesh, 0, Point::new(0.0, 0.0, -5.0), Quaternion::identity(), 1.0);
    build_scene_broadphase(&mut scene);

    let mut materials = MaterialSystem::new();
    materials.register_material(0, Material::diffuse([0.8, 0.8, 0.8]));
    materials.register_image(0, env_image);
    materials.register_material(
        BACKGROUND_MATERIAL,
        Material { albedo: [0.0, 0.0, 0.0], emission: [0.0, 0.0, 0.0], albedo_texture: u32::MAX, emission_texture: 0 },
    );

    let camera = Camera::new(Point::new(0.0, 0.0, 0.0), Quaternion::identity(), 1.0, 512, 512);
    println!("\tBuilt scene in {:.3}s", t.tick());

    println!("Rendering with {} threads at {} spp...", thread_count, spp);
    let (image, metrics) = render_scene(&scene, &materials, &camera, 512, 512, thread_count, spp);
    println!("\tRendered in {:.3}s", t.tick());

    if print_stats {
        println!("Render stats:");
        println!("\tRays traced:          {}", metrics.rays_traced);
        println!("\tAABB tests:           {}", metrics.aabb_tests);
        println!("\tTriangle tests:       {}", metrics.triangle_tests);
        println!("\tTraversal overflows:  {}", metrics.traversal_overflows);
    }

    println!("Writing image to '{}'...", output_path);
    if let Err(e) = image.write_ppm(Path::new(output_path)) {
        eprintln!("error: failed to write output image: {}", e);
        process::exit(1);
    }
    println!("\tWrote image in {:.3}s", t.tick());
}
