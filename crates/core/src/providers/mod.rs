pub mod registry;
pub mod traits;

// Rate feed implementations
pub mod frankfurter;
pub mod rate_feed;
