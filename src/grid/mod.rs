pub mod occupancy;
pub mod pixels;
