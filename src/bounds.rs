use crate::types::Vec3;

/// Axis-aligned extent, `min` and `max` corners.
#[derive(Debug, Clone)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        self.min + self.size() / 2.0
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        for i in 0..3 {
            if p[i] < self.min[i] || self.max[i] < p[i] {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use cgmath::vec3;

    use super::Bounds;

    #[test]
    fn center() {
        let b = Bounds::new(vec3(-3.0, -3.0, -3.0), vec3(3.0, 3.0, 3.0));
        assert_eq!(b.center(), vec3(0.0, 0.0, 0.0));
        assert_eq!(b.size(), vec3(6.0, 6.0, 6.0));
    }

    #[test]
    fn contains_boundary() {
        let b = Bounds::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 2.0, 1.0));
        assert!(b.contains(&vec3(1.0, 2.0, 1.0)));
        assert!(!b.contains(&vec3(1.0, 2.1, 1.0)));
    }
}
