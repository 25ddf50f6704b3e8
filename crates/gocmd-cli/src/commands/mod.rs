pub mod config;
pub mod dispatch;
pub mod scan;
pub mod schema;
pub mod show;
