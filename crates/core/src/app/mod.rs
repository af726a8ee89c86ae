pub mod export;
pub mod parse;
pub mod pipeline;

// Re-exports
pub use export::*;
pub use parse::*;
pub use pipeline::*;
