/*
 * This module consolidates the logic of the project collector: the fixed
 * selection rules, the scanner that walks the project tree, the archiver that
 * writes the combined file, and the `collect` entry point that ties them
 * together.
 */
pub mod archiver;
pub mod collector;
pub mod config;
pub mod file_system;
pub mod models;

pub use collector::collect;
