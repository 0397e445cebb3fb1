use std::{fs::File, path::Path};

use camera::Camera;
use cgmath::{num_traits::zero, vec2, Vector2};
use image::{Image, RGB};
use rand::thread_rng;
use raymarch::{raymarch, trace_homogeneous};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use scene::Scene;
use types::Float;

mod bounds;
mod camera;
mod grid;
mod image;
mod intersections;
mod parsed_scene;
mod ppm;
mod ray;
mod raymarch;
mod scene;
mod scene_parser;
mod types;

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(scene_path), Some(output_path)) = (args.next(), args.next()) else {
        println!("Usage: volumetric-rt <scene.json> <output.ppm>");
        return;
    };

    let parsed = match scene_parser::parse_scene(Path::new(&scene_path)) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("Cannot load scene {scene_path}: {err}");
            return;
        },
    };
    let scene = Scene::new(parsed);
    let img = generate_image(&scene);

    let file = match File::create(&output_path) {
        Ok(file) => file,
        Err(err) => {
            println!("Cannot create output file {output_path}: {err}");
            return;
        },
    };
    if let Err(err) = ppm::save_to_ppm(img, file) {
        println!("Cannot write {output_path}: {err}");
    }
}

fn generate_image(scene: &Scene) -> Image {
    let camera = Camera::new(&scene.camera, scene.dimensions.x, scene.dimensions.y);
    let mut img = Image::new(scene.dimensions.x, scene.dimensions.y);

    img.bytes.par_iter_mut().enumerate().for_each(|(index, pixel)| {
        let x = index % scene.dimensions.x;
        let y = index / scene.dimensions.x;
        *pixel = render_pixel(vec2(x, y), &camera, scene);
    });

    img
}

fn render_pixel(pixel: Vector2<usize>, camera: &Camera, scene: &Scene) -> RGB {
    let trace: fn(&ray::Ray, &Scene) -> RGB = match scene.homogeneous {
        true => trace_homogeneous,
        false => raymarch,
    };
    if scene.samples <= 1 {
        return trace(&camera.ray(pixel), scene);
    }
    let mut rng = thread_rng();
    let mut color: RGB = zero();
    for _ in 0..scene.samples {
        color += trace(&camera.fuzzy_ray(pixel, &mut rng), scene);
    }
    color / scene.samples as Float
}
