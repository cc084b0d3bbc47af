pub mod configuration;
pub mod domain;
pub mod flows;
pub mod routes;
pub mod services;
pub mod startup;
