pub mod config;
pub mod error;
pub mod service;
pub mod router;
pub mod middleware;
pub mod db;
pub mod handlers;
pub mod types;

pub use error::WheelError;
pub use db::WheelStorage;
pub use service::spin::SpinEngine;
