//! Procedural generation for the endless world: seeded randomness, value
//! noise, heightfield terrain chunks and building placement.

pub mod buildings;
pub mod chunk;
pub mod value_noise;
pub mod prng;
pub mod terrain;

pub use buildings::*;
pub use chunk::*;
pub use value_noise::*;
pub use prng::*;
pub use terrain::*;
