use cgmath::{num_traits::AsPrimitive, InnerSpace, Vector2};
use rand::{rngs::ThreadRng, Rng};

use crate::{ray::Ray, scene::CameraParams, types::{Float, Vec3}};

pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    tan_half_fov_x: Float,
    tan_half_fov_y: Float,
    width: Float,
    height: Float,
}

impl Camera {
    pub fn new(params: &CameraParams, width: usize, height: usize) -> Self {
        let fwidth: Float = width.as_();
        let fheight: Float = height.as_();
        let forward = (params.look_at - params.position).normalize();
        let right = forward.cross(params.up).normalize();
        let up = right.cross(forward);
        let tan_half_fov_x = (params.fov_x / 2.0).tan();
        let aspect_ratio = fwidth / fheight;
        Self {
            position: params.position,
            right,
            up,
            forward,
            tan_half_fov_x,
            tan_half_fov_y: tan_half_fov_x / aspect_ratio,
            width: fwidth,
            height: fheight,
        }
    }

    pub fn ray(&self, pixel: Vector2<usize>) -> Ray {
        self.ray_through(pixel.x as Float + 0.5, pixel.y as Float + 0.5)
    }

    pub fn fuzzy_ray(&self, pixel: Vector2<usize>, rng: &mut ThreadRng) -> Ray {
        let px = pixel.x as Float + rng.gen_range(0.0..1.0);
        let py = pixel.y as Float + rng.gen_range(0.0..1.0);
        self.ray_through(px, py)
    }

    fn ray_through(&self, px: Float, py: Float) -> Ray {
        let x = (2.0 * px / self.width - 1.0) * self.tan_half_fov_x;
        let y = -(2.0 * py / self.height - 1.0) * self.tan_half_fov_y;
        let dir = (x * self.right + y * self.up + self.forward).normalize();
        Ray { origin: self.position, dir }
    }
}

#[cfg(test)]
mod test {
    use cgmath::{vec2, vec3, InnerSpace};

    use crate::scene::CameraParams;

    use super::Camera;

    fn looking_down_z() -> Camera {
        let params = CameraParams {
            position: vec3(0.0, 0.0, 0.0),
            look_at: vec3(0.0, 0.0, -1.0),
            up: vec3(0.0, 1.0, 0.0),
            fov_x: std::f32::consts::FRAC_PI_2,
        };
        Camera::new(&params, 2, 2)
    }

    #[test]
    fn rays_are_unit_length() {
        let camera = looking_down_z();
        let ray = camera.ray(vec2(0, 0));
        assert!((ray.dir.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pixels_mirror_around_the_axis() {
        let camera = looking_down_z();
        let a = camera.ray(vec2(0, 0));
        let b = camera.ray(vec2(1, 1));
        assert!(a.dir.z < 0.0 && b.dir.z < 0.0);
        assert!((a.dir.x + b.dir.x).abs() < 1e-6);
        assert!((a.dir.y + b.dir.y).abs() < 1e-6);
    }
}
