pub mod canned;
pub mod client;

pub use canned::CannedProvider;
pub use client::HttpProvider;
