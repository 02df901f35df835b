pub mod fire_gradient;
pub mod hsv_cycle;
