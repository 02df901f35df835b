pub mod actions;
pub mod arithmetic;
pub mod data;
pub mod fractals;
pub mod util;
