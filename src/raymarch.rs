use cgmath::{num_traits::zero, InnerSpace};

use crate::{image::RGB, intersections::{intersect_scene, intersect_shape, HitInterval}, ray::Ray, scene::{Primitive, Scene}, types::{Float, Vec3}};

/// Number of steps tiling `[t0, t1]` and the corrected step size, so that
/// `ns * step` covers the interval exactly with no overshoot. `ns >= 1`.
/// A non-positive (or NaN) step size collapses to a single step over the
/// whole interval instead of an unbounded march.
pub fn step_count(t0: Float, t1: Float, step_size: Float) -> (usize, Float) {
    if !(step_size > 0.0) {
        return (1, t1 - t0);
    }
    let ns = ((t1 - t0) / step_size).ceil().max(1.0);
    (ns as usize, (t1 - t0) / ns)
}

pub fn raymarch(ray: &Ray, scene: &Scene) -> RGB {
    let Some((interval, primitive)) = intersect_scene(ray, scene) else {
        return scene.bg_color;
    };
    march_interval(ray, &interval, primitive, scene, &|p| primitive.density_at(p))
}

/// Forward ray marching over a hit interval: per-step Beer-Lambert
/// attenuation plus single-scatter estimation along a secondary light ray
/// cast against the hit object alone. `density` supplies the medium density
/// at a sample position; pass `|_| 1.0` for a uniform medium.
pub fn march_interval(
    ray: &Ray,
    interval: &HitInterval,
    primitive: &Primitive,
    scene: &Scene,
    density: &dyn Fn(&Vec3) -> Float,
) -> RGB {
    if interval.t1 <= interval.t0 {
        return scene.bg_color;
    }
    let scattering = primitive.sigma;
    let extinction = scattering + scene.absorption;
    let (ns, step) = step_count(interval.t0, interval.t1, scene.step_size);

    let mut transparency: Float = 1.0;
    let mut result: RGB = zero();
    for n in 0..ns {
        // midpoint of the step
        let t = interval.t0 + step * (n as Float + 0.5);
        let sample_pos = ray.position_at(t);
        let d = density(&sample_pos);

        transparency *= (-step * d * extinction).exp();

        let light_ray = Ray { origin: sample_pos, dir: scene.light_dir };
        let Some(light_hit) = intersect_shape(&primitive.shape, &light_ray) else {
            continue;
        };
        if !light_hit.inside {
            continue;
        }
        let light_attenuation = (-d * light_hit.t1 * extinction).exp();
        result += transparency * light_attenuation * scattering * d * step * scene.light_color;
    }

    scene.bg_color * transparency + result
}

/// Single-segment shading: the whole interval attenuates at once and the
/// primitive's scatter color fills the remainder. No light ray, no marching.
pub fn trace_homogeneous(ray: &Ray, scene: &Scene) -> RGB {
    let Some((interval, primitive)) = intersect_scene(ray, scene) else {
        return scene.bg_color;
    };
    let p0 = interval.point;
    let p1 = ray.position_at(interval.t1);
    let transmission = (-(p1 - p0).magnitude() * primitive.sigma).exp();
    scene.bg_color * transmission + primitive.color * (1.0 - transmission)
}
