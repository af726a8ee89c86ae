pub mod history;
pub mod sheet;

// Re-exports
pub use history::*;
pub use sheet::*;
