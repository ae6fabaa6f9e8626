//! The dispatch pipeline: the dispatcher, error responders, and the
//! thread-local request context.

pub use ampoule_dispatch::*;
