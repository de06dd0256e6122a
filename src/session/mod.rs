pub mod config;
pub mod lifecycle;
pub mod scheduler;
pub mod seed;

pub use lifecycle::{Agent, Session};
