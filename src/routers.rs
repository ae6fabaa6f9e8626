//! Routing: the route table, keyword parsers, argument building, and
//! the URL matcher.

pub use ampoule_routers::*;
