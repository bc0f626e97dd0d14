pub mod abi;
pub mod actors;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;

pub use abi::*;
pub use actors::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use helpers::*;
