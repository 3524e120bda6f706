// Re-export model modules
pub mod quote;
pub mod quotes;

pub use quote::*;
pub use quotes::*;
