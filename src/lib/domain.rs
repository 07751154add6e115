//! Domain logic

pub mod communication;
pub mod deliver;
pub mod params;
