pub mod render_tile;
