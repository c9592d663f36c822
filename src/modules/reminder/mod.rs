pub mod job;
pub mod routes;
pub mod service;
