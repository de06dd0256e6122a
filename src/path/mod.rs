pub mod finder;
pub mod history;
