use cgmath::{vec2, vec3, Vector2};

use crate::{bounds::Bounds, grid::DensityGrid, intersections::HitPolicy, parsed_scene, types::{Float, Vec3}};

#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: Float,
    /// Medium policy: when set, any hit reports `inside = true` between the
    /// two roots, treating the whole interior as participating medium rather
    /// than a surface. The reference renderer behaves this way for spheres.
    pub medium: bool,
}

#[derive(Debug, Clone)]
pub enum Shape {
    Box(Bounds),
    Sphere(Sphere),
    /// A bounded density volume: box geometry plus a voxel grid.
    Volume(DensityGrid),
}

#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    /// Scatter color, used by the homogeneous shading path.
    pub color: Vec3,
    /// Scattering coefficient.
    pub sigma: Float,
}

impl Primitive {
    fn new(parsed: parsed_scene::Primitive) -> Self {
        let shape = match parsed.shape {
            parsed_scene::Shape::Box { min, max } => Shape::Box(Bounds::new(to_vec3(min), to_vec3(max))),
            parsed_scene::Shape::Sphere { center, radius, medium } => Shape::Sphere(Sphere {
                center: to_vec3(center),
                radius,
                medium: medium.unwrap_or(true),
            }),
            parsed_scene::Shape::Volume { min, max, dimension, density, .. } => {
                let bounds = Bounds::new(to_vec3(min), to_vec3(max));
                Shape::Volume(match density {
                    Some(data) => DensityGrid::new(bounds, dimension, data),
                    None => DensityGrid::noise(bounds, dimension, &mut rand::thread_rng()),
                })
            },
        };
        Self {
            shape,
            color: vec3_or(parsed.color, vec3(1.0, 1.0, 1.0)),
            sigma: parsed.sigma.unwrap_or(1.0),
        }
    }

    /// Medium density at a world-space position: grid sample for volumes,
    /// uniform 1.0 for everything else.
    pub fn density_at(&self, p: &Vec3) -> Float {
        match &self.shape {
            Shape::Volume(grid) => grid.lookup(p),
            _ => 1.0,
        }
    }
}

#[derive(Debug)]
pub struct CameraParams {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub fov_x: Float,
}

impl CameraParams {
    fn new(camera: parsed_scene::Camera) -> Self {
        Self {
            position: vec3_or(camera.position, vec3(0.0, 0.0, 0.0)),
            look_at: vec3_or(camera.look_at, vec3(0.0, 0.0, -1.0)),
            up: vec3_or(camera.up, Vec3::unit_y()),
            fov_x: camera.fov_x.unwrap_or(std::f32::consts::FRAC_PI_2),
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub bg_color: Vec3,
    pub light_dir: Vec3,
    pub light_color: Vec3,
    pub step_size: Float,
    pub absorption: Float,
    pub hit_policy: HitPolicy,
    /// Shade hits with the single-segment transmission path instead of ray
    /// marching.
    pub homogeneous: bool,
    pub samples: usize,
    pub camera: CameraParams,
    pub dimensions: Vector2<usize>,
}

impl Scene {
    pub fn new(parsed: parsed_scene::Scene) -> Self {
        Self {
            primitives: parsed.primitives.into_iter().map(Primitive::new).collect(),
            bg_color: vec3_or(parsed.bg_color, vec3(0.572, 0.772, 0.921)),
            light_dir: vec3_or(parsed.light_dir, vec3(-0.315798, 0.719361, 0.618702)),
            light_color: vec3_or(parsed.light_color, vec3(1.3, 0.3, 0.9)),
            step_size: parsed.step_size.filter(|s| *s > 0.0).unwrap_or(0.1),
            absorption: parsed.absorption.unwrap_or(0.0),
            hit_policy: match parsed.nearest_hit.unwrap_or(false) {
                true => HitPolicy::Nearest,
                false => HitPolicy::LastInOrder,
            },
            homogeneous: parsed.homogeneous.unwrap_or(false),
            samples: parsed.samples.unwrap_or(1),
            dimensions: parsed.dimensions.map(|d| vec2(d[0], d[1])).unwrap_or(vec2(512, 512)),
            camera: CameraParams::new(parsed.camera),
        }
    }
}

fn to_vec3(v: [Float; 3]) -> Vec3 {
    vec3(v[0], v[1], v[2])
}

fn vec3_or(v: Option<[Float; 3]>, default: Vec3) -> Vec3 {
    v.map(to_vec3).unwrap_or(default)
}

#[cfg(test)]
pub fn test_scene(primitives: Vec<Primitive>) -> Scene {
    let mut scene = Scene::new(parsed_scene::Scene::empty());
    scene.primitives = primitives;
    scene
}

#[cfg(test)]
mod test {
    use cgmath::{vec2, vec3};

    use crate::parsed_scene;

    use super::{Scene, Shape};

    #[test]
    fn defaults_match_the_reference() {
        let scene = Scene::new(parsed_scene::Scene::empty());
        assert_eq!(scene.bg_color, vec3(0.572, 0.772, 0.921));
        assert_eq!(scene.light_color, vec3(1.3, 0.3, 0.9));
        assert_eq!(scene.step_size, 0.1);
        assert_eq!(scene.absorption, 0.0);
        assert_eq!(scene.dimensions, vec2(512, 512));
        assert!(scene.primitives.is_empty());
    }

    #[test]
    fn non_positive_step_size_falls_back_to_default() {
        let parsed: parsed_scene::Scene =
            serde_json::from_str(r#"{ "step_size": 0.0 }"#).unwrap();
        assert_eq!(Scene::new(parsed).step_size, 0.1);

        let parsed: parsed_scene::Scene =
            serde_json::from_str(r#"{ "step_size": -0.5 }"#).unwrap();
        assert_eq!(Scene::new(parsed).step_size, 0.1);
    }

    #[test]
    fn volume_without_cache_gets_noise_densities() {
        let parsed: parsed_scene::Scene = serde_json::from_str(
            r#"{ "primitives": [
                { "type": "volume", "min": [-3,-3,-3], "max": [3,3,3], "dimension": 4 }
            ] }"#,
        )
        .unwrap();
        let scene = Scene::new(parsed);
        let Shape::Volume(grid) = &scene.primitives[0].shape else {
            panic!("expected a volume");
        };
        assert_eq!(grid.dimension, 4);
        let d = grid.lookup(&vec3(0.0, 0.0, 0.0));
        assert!((0.0..1.0).contains(&d));
    }
}
