// Aquamark watermarking library

pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod watermark;
