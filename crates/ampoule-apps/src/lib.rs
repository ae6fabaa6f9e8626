//! Application composition: route registration, resource mounting, and
//! the single entry point a deployment wires to its transport.

pub mod app;
pub mod resource;

pub use app::App;
pub use resource::Resource;
