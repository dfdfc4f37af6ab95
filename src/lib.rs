pub mod cli;
pub mod codegen;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod logging;
pub mod render;
