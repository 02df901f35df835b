pub mod colour;
pub mod complex;
pub mod frame_buffer;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod pixel_sample;
pub mod point;
pub mod render_job;
pub mod tile;
pub mod viewport;
