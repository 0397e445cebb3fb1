use crate::types::Float;

#[derive(Debug, serde::Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    pub bg_color: Option<[Float; 3]>,
    pub light_dir: Option<[Float; 3]>,
    pub light_color: Option<[Float; 3]>,
    pub step_size: Option<Float>,
    pub absorption: Option<Float>,
    pub nearest_hit: Option<bool>,
    pub homogeneous: Option<bool>,
    pub samples: Option<usize>,
    pub dimensions: Option<[usize; 2]>,
    #[serde(default)]
    pub camera: Camera,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Camera {
    pub position: Option<[Float; 3]>,
    pub look_at: Option<[Float; 3]>,
    pub up: Option<[Float; 3]>,
    pub fov_x: Option<Float>,
}

#[derive(Debug, serde::Deserialize)]
pub struct Primitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub color: Option<[Float; 3]>,
    pub sigma: Option<Float>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Box {
        min: [Float; 3],
        max: [Float; 3],
    },
    Sphere {
        center: [Float; 3],
        radius: Float,
        medium: Option<bool>,
    },
    Volume {
        min: [Float; 3],
        max: [Float; 3],
        #[serde(default = "default_dimension")]
        dimension: usize,
        density_cache: Option<String>,
        /// Filled by the loader from `density_cache`, never from JSON.
        #[serde(skip)]
        density: Option<Vec<Float>>,
    },
}

fn default_dimension() -> usize {
    128
}

impl Scene {
    pub fn empty() -> Self {
        Self {
            primitives: vec![],
            bg_color: None,
            light_dir: None,
            light_color: None,
            step_size: None,
            absorption: None,
            nearest_hit: None,
            homogeneous: None,
            samples: None,
            dimensions: None,
            camera: Camera::default(),
        }
    }
}
