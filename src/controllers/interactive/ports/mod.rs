//! Interfaces between the coordinator and the presentation layer.

pub mod presenter_port;
