pub mod assertions;
pub mod authentication;
pub mod booker_client;
pub mod configuration;
pub mod domain;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod telemetry;
pub mod utils;
