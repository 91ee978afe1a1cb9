pub mod args;
pub mod cli;
pub mod codec;
pub mod config;
pub mod gist_api;
pub mod service;
mod terminal;
