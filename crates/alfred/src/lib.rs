pub mod agent;
pub mod completion;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod normalizer;
pub mod providers;
pub mod token_counter;
