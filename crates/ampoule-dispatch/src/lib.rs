//! Dispatch pipeline: event decoding, route resolution, the middleware
//! chain, handler invocation, and error-to-response mapping.

pub mod context;
pub mod dispatcher;
pub mod errors;

pub use context::{current, elapsed_time, remaining_time, ContextGuard};
pub use dispatcher::Dispatcher;
pub use errors::{ErrorHandlerRegistry, ErrorResponder};
