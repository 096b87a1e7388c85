pub mod folder;
pub mod ioc;
pub mod service;
pub mod telemetry;
