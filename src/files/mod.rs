//! Static file serving
//!
//! Maps request paths onto files under the web root and turns each request
//! into a 200, 404 or 405 response.

pub mod handler;
pub mod resolver;

pub use handler::StaticHandler;
pub use resolver::{FileResolver, ResolvedFile};
