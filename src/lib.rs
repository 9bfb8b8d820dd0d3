// Library for tests to access modules

pub mod config;
pub mod models;
pub mod power_repo;
pub mod presenter;
pub mod render;
pub mod sampler;
pub mod version;
