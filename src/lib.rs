pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod keys;
pub mod objects;
pub mod program;
pub mod rpc;
pub mod tx;
