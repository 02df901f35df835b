pub mod cancellation;
pub mod render_job;
pub mod render_tile;
pub mod sample_pixel;
pub mod schedule_tiles;
