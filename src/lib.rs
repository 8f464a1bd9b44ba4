pub mod config;
pub mod consts;
pub mod convert;
pub mod dispatch;
pub mod dtos;
pub mod error;
pub mod formats;
pub mod models;
pub mod routes;
pub mod state;
pub mod validate;
