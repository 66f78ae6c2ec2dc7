pub mod tokens;

pub use tokens::{SessionTokens, TokenStore};
