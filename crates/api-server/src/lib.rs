#![warn(clippy::unwrap_used)]

pub mod dashboard;
pub mod rest;
pub mod server;
pub mod swagger;

pub use server::ApiServer;
pub use swagger::ApiDoc;
