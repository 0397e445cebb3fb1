use std::io::{self, Read};

use cgmath::ElementWise;
use rand::Rng;

use crate::{bounds::Bounds, types::{Float, Vec3}};

/// Uniform voxel grid of density samples, `dimension^3` values in row-major
/// order (x fastest).
#[derive(Debug, Clone)]
pub struct DensityGrid {
    pub bounds: Bounds,
    pub dimension: usize,
    data: Vec<Float>,
}

impl DensityGrid {
    pub fn new(bounds: Bounds, dimension: usize, data: Vec<Float>) -> Self {
        assert_eq!(data.len(), dimension * dimension * dimension);
        Self { bounds, dimension, data }
    }

    pub fn noise(bounds: Bounds, dimension: usize, rng: &mut impl Rng) -> Self {
        let voxels = dimension * dimension * dimension;
        let data = (0..voxels).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self { bounds, dimension, data }
    }

    /// Nearest-neighbor sample. Positions outside the bounds, and voxel
    /// indices outside `[0, dimension)`, read as zero density.
    pub fn lookup(&self, p: &Vec3) -> Float {
        if !self.bounds.contains(p) {
            return 0.0;
        }
        let local = (*p - self.bounds.min).div_element_wise(self.bounds.size());
        let voxel = local * self.dimension as Float;
        let xi = voxel.x.floor() as isize;
        let yi = voxel.y.floor() as isize;
        let zi = voxel.z.floor() as isize;
        let dim = self.dimension as isize;
        if xi < 0 || dim <= xi || yi < 0 || dim <= yi || zi < 0 || dim <= zi {
            return 0.0;
        }
        self.data[((zi * dim + yi) * dim + xi) as usize]
    }
}

/// Raw density cache: `dimension^3` little-endian f32 values, nothing else.
pub fn read_density_cache(mut reader: impl Read, dimension: usize) -> io::Result<Vec<Float>> {
    let mut raw = vec![0u8; dimension * dimension * dimension * 4];
    reader.read_exact(&mut raw)?;
    Ok(raw
        .chunks_exact(4)
        .map(|b| Float::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

#[cfg(test)]
mod test {
    use cgmath::vec3;

    use crate::{bounds::Bounds, types::Float};

    use super::{read_density_cache, DensityGrid};

    fn counting_grid(dimension: usize) -> DensityGrid {
        let bounds = Bounds::new(vec3(-3.0, -3.0, -3.0), vec3(3.0, 3.0, 3.0));
        let voxels = dimension * dimension * dimension;
        DensityGrid::new(bounds, dimension, (0..voxels).map(|i| i as Float).collect())
    }

    #[test]
    fn center_voxel() {
        let grid = counting_grid(4);
        // center of the bounds lands in voxel (2, 2, 2)
        let expected = ((2 * 4 + 2) * 4 + 2) as Float;
        assert_eq!(grid.lookup(&grid.bounds.center()), expected);
    }

    #[test]
    fn out_of_bounds_is_zero() {
        let grid = counting_grid(4);
        assert_eq!(grid.lookup(&vec3(10.0, 0.0, 0.0)), 0.0);
        assert_eq!(grid.lookup(&vec3(0.0, -3.1, 0.0)), 0.0);
    }

    #[test]
    fn max_corner_is_zero() {
        // the max corner floors to voxel index `dimension`, outside the grid
        let grid = counting_grid(4);
        assert_eq!(grid.lookup(&vec3(3.0, 3.0, 3.0)), 0.0);
    }

    #[test]
    fn cache_roundtrip() {
        let values: Vec<Float> = (0..8).map(|i| i as Float / 2.0).collect();
        let raw: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(read_density_cache(raw.as_slice(), 2).unwrap(), values);
    }

    #[test]
    fn truncated_cache_is_an_error() {
        let raw = [0u8; 8 * 4 - 1];
        assert!(read_density_cache(raw.as_slice(), 2).is_err());
    }
}
