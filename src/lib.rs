pub mod config;
pub mod data;
pub mod error;
pub mod gateway;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod worker;
