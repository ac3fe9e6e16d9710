pub mod app;
pub mod atomese;
pub mod biogrid;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs_util;
pub mod output;
pub mod registry;
pub mod store;
pub mod summary;
pub mod table;
pub mod transform;
pub mod writer;
