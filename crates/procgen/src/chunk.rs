//! Chunk grid addressing.

use std::fmt;

use glam::DVec3;

/// Integer grid coordinate of a chunk.
///
/// Chunk `(x, z)` covers world `[x·size, (x+1)·size)` on the X axis and the
/// same span on Z, so lookup by floor division, mesh footprint and building
/// placement all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the world-space point `(x, z)`.
    pub fn from_world(x: f64, z: f64, chunk_size: f64) -> Self {
        Self {
            x: (x / chunk_size).floor() as i32,
            z: (z / chunk_size).floor() as i32,
        }
    }

    /// Opaque map key, `"x,z"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// World-space corner of the chunk (y = 0).
    pub fn world_origin(&self, chunk_size: f64) -> DVec3 {
        DVec3::new(self.x as f64 * chunk_size, 0.0, self.z as f64 * chunk_size)
    }

    /// Offset by whole chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Every chunk within `radius` of `self` on both axes, inclusive:
    /// a `(2r+1)²` window in row-major order.
    pub fn window(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let radius = radius.max(0);
        (-radius..=radius).flat_map(move |dx| (-radius..=radius).map(move |dz| self.offset(dx, dz)))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_world_floors_negative_coordinates() {
        assert_eq!(ChunkCoord::from_world(0.0, 0.0, 200.0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(199.9, 200.0, 200.0), ChunkCoord::new(0, 1));
        assert_eq!(ChunkCoord::from_world(-0.1, -200.0, 200.0), ChunkCoord::new(-1, -1));
        assert_eq!(ChunkCoord::from_world(-200.1, 450.0, 200.0), ChunkCoord::new(-2, 2));
    }

    #[test]
    fn key_formats_as_comma_pair() {
        assert_eq!(ChunkCoord::new(-3, 12).key(), "-3,12");
    }

    #[test]
    fn window_covers_square() {
        let centre = ChunkCoord::new(5, -2);
        let cells: Vec<_> = centre.window(3).collect();
        assert_eq!(cells.len(), 49);
        assert!(cells.contains(&ChunkCoord::new(2, -5)));
        assert!(cells.contains(&ChunkCoord::new(8, 1)));
        assert!(!cells.contains(&ChunkCoord::new(9, 1)));
        assert_eq!(centre.window(0).collect::<Vec<_>>(), vec![centre]);
    }

    #[test]
    fn world_origin_scales_by_chunk_size() {
        assert_eq!(ChunkCoord::new(-2, 3).world_origin(200.0), DVec3::new(-400.0, 0.0, 600.0));
    }
}
