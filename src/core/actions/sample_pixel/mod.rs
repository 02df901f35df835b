pub mod sample_pixel;
