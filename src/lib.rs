// src/lib.rs

//! wordcrawl: bounded parallel web crawler reporting the most popular words.

pub mod crawl;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod profiler;
pub mod storage;
pub mod utils;
