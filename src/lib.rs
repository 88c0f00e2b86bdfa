//! Snake on a toroidal grid: a bounded snake, a bounded set of food cells and a
//! per-tick controller that drives an abstract pixel display, directional input and
//! feedback channel.
//!
//! - Core model (geometry, canvas, snake, food, controller) has no I/O of its own
//! - Hardware seams live in `hal`
//! - `terminal` plugs the core into crossterm and ratatui

pub mod canvas;
pub mod config;
pub mod controller;
pub mod food;
pub mod geometry;
pub mod hal;
pub mod score;
pub mod snake;
pub mod terminal;

#[cfg(test)]
mod testing;
