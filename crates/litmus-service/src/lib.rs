pub mod client;
pub mod embedded;
pub mod protocol;
pub mod server;

pub use client::AnalysisClient;
pub use embedded::EmbeddedService;
