pub mod coordinator_error;
