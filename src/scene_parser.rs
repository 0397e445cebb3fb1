use std::{fs::File, io, path::Path};

use crate::{grid, parsed_scene::{Scene, Shape}};

/// Loads a JSON scene description and the density caches it references.
/// Everything recoverable surfaces here as an `io::Error` for the driver.
pub fn parse_scene(path: &Path) -> io::Result<Scene> {
    let file = File::open(path)?;
    let mut scene: Scene = serde_json::from_reader(io::BufReader::new(file))?;

    for primitive in &mut scene.primitives {
        let Shape::Volume { dimension, density_cache, density, .. } = &mut primitive.shape else {
            continue;
        };
        let Some(cache_path) = density_cache else { continue; };
        let cache = File::open(cache_path.as_str())?;
        *density = Some(grid::read_density_cache(io::BufReader::new(cache), *dimension)?);
    }

    Ok(scene)
}
