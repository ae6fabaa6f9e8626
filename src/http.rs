//! HTTP vocabulary: requests, responses, replies, middleware, the
//! transport event shapes, and the JSON codec seam.

pub use ampoule_http::*;
