//! Application composition: [`App`](crate::App) and mountable
//! [`Resource`](crate::Resource) groups.

pub use ampoule_apps::*;
