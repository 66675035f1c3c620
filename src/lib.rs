pub mod configuration;
pub mod domain;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod startup;
pub mod storage;
pub mod telemetry;
pub mod util;
