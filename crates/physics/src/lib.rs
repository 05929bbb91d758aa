//! Aircraft state and the arcade flight model for OpenSky.

pub mod flight_model;
pub mod sim_state;

pub use flight_model::*;
pub use sim_state::*;
