pub mod client;
pub mod gateway;
pub mod types;

pub use client::AdminClient;
pub use gateway::AdminApi;
