//! Domain layer: email composition, order notifications and their ports

pub mod communication;
pub mod orders;
