use cgmath::{num_traits::zero, vec3, InnerSpace as _};

use crate::{bounds::Bounds, ray::Ray, scene::{Primitive, Scene, Shape, Sphere}, types::{Float, Vec3}};

/// Parametric interval over which a ray overlaps a primitive. `t0 <= t1`
/// whenever a hit is reported; `t0` may be negative, callers decide what to
/// do with hits behind the origin. The box test rejects intervals lying
/// entirely behind the origin; the sphere test reports both quadratic roots
/// even when both are negative, as the reference renderer does.
#[derive(Debug)]
pub struct HitInterval {
    pub t0: Float,
    pub t1: Float,
    pub point: Vec3,
    pub normal: Vec3,
    pub inside: bool,
}

impl Default for HitInterval {
    fn default() -> Self {
        Self {
            t0: Float::INFINITY,
            t1: Float::INFINITY,
            point: zero(),
            normal: zero(),
            inside: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum HitPolicy {
    /// The last primitive in iteration order that reports a hit wins,
    /// matching the reference renderer. Not a nearest-hit search.
    LastInOrder,
    /// Smallest entry parameter wins.
    Nearest,
}

pub fn intersect_scene<'a>(ray: &Ray, scene: &'a Scene) -> Option<(HitInterval, &'a Primitive)> {
    let mut res: Option<(HitInterval, &Primitive)> = None;
    for primitive in &scene.primitives {
        let Some(interval) = intersect_shape(&primitive.shape, ray) else { continue; };
        match &res {
            Some((best, _)) => {
                let replace = match scene.hit_policy {
                    HitPolicy::LastInOrder => true,
                    HitPolicy::Nearest => interval.t0 < best.t0,
                };
                if replace {
                    res = Some((interval, primitive));
                }
            },
            None => res = Some((interval, primitive)),
        }
    }
    res
}

pub fn intersect_shape(shape: &Shape, ray: &Ray) -> Option<HitInterval> {
    match shape {
        Shape::Box(bounds) => intersect_box(bounds, ray),
        Shape::Sphere(sphere) => intersect_sphere(sphere, ray),
        Shape::Volume(grid) => intersect_box(&grid.bounds, ray),
    }
}

struct SlabHit {
    t: Float,
    normal: Float,
    dim_index: usize,
}

impl SlabHit {
    fn max(self, other: SlabHit) -> Self {
        if self.t < other.t { other } else { self }
    }
    fn min(self, other: SlabHit) -> Self {
        if self.t < other.t { self } else { other }
    }

    fn real_normal(&self) -> Vec3 {
        if self.dim_index == 0 {
            return vec3(self.normal, 0.0, 0.0);
        }
        if self.dim_index == 1 {
            return vec3(0.0, self.normal, 0.0);
        }
        vec3(0.0, 0.0, self.normal)
    }
}

/// Slab test. An axis with zero ray direction either rules the box out (the
/// origin lies outside that slab) or imposes no constraint, so no division
/// by zero is ever performed.
pub fn intersect_box(b: &Bounds, ray: &Ray) -> Option<HitInterval> {
    let mut t: Option<(SlabHit, SlabHit)> = None;
    for i in 0..3 {
        if ray.dir[i] == 0.0 {
            if ray.origin[i] < b.min[i] || b.max[i] < ray.origin[i] {
                return None;
            }
            continue;
        }
        let (t1, t2, normal) = slab_planes_intersect(b, ray, i);
        t = Some(match t {
            Some((max_t1, min_t2)) => {
                let near = SlabHit { t: t1, normal, dim_index: i }.max(max_t1);
                let far = SlabHit { t: t2, normal, dim_index: i }.min(min_t2);
                if far.t < near.t {
                    return None;
                }
                (near, far)
            },
            None => (
                SlabHit { t: t1, normal, dim_index: i },
                SlabHit { t: t2, normal, dim_index: i },
            ),
        })
    }

    let (near, far) = t?;
    if far.t < 0.0 {
        // the whole overlap lies behind the origin
        return None;
    }
    Some(HitInterval {
        t0: near.t,
        t1: far.t,
        point: ray.position_at(near.t),
        normal: near.real_normal(),
        inside: false,
    })
}

fn slab_planes_intersect(b: &Bounds, ray: &Ray, index: usize) -> (Float, Float, Float) {
    let t1 = (b.min[index] - ray.origin[index]) / ray.dir[index];
    let t2 = (b.max[index] - ray.origin[index]) / ray.dir[index];
    if t1 < t2 { (t1, t2, -1.0) } else { (t2, t1, 1.0) }
}

pub fn intersect_sphere(sphere: &Sphere, ray: &Ray) -> Option<HitInterval> {
    let oc = ray.origin - sphere.center;
    let a = ray.dir.magnitude2();
    let half_b = oc.dot(ray.dir);
    let c = oc.magnitude2() - sphere.radius * sphere.radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();
    let t0 = (-half_b - sqrtd) / a;
    let t1 = (-half_b + sqrtd) / a;
    let point = ray.position_at(t0);
    Some(HitInterval {
        t0,
        t1,
        point,
        normal: (point - sphere.center) / sphere.radius,
        inside: sphere.medium,
    })
}
