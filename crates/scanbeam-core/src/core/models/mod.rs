pub mod beamlet;

pub use beamlet::{Beamlet, DirectionCosines};
