pub mod render_job_parallel_rayon;
