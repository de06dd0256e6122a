pub mod cpu;
pub mod recording;
pub mod stroke;
pub mod surface;
