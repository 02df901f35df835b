pub mod default_worker_threads;
pub mod partition_tiles;
