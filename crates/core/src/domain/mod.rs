pub mod record;
pub mod table;

// Re-exports for convenience
pub use record::*;
pub use table::*;
