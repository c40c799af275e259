//! src/lib.rs
pub mod app;
pub mod domain;
pub mod no_sql;
pub mod services;
pub mod settings_model;
pub mod storage;
