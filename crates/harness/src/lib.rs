pub mod backend;
pub mod resolver;

pub use backend::{TestBackend, TestPlayer};
pub use resolver::SharedResolver;
