//! The framework error type, kinds, keys, and codes.

pub use ampoule_exception::*;
