//! # IO Module
//!
//! How the user talks to the program: the interactive [`menu`], the one-shot
//! [`commands`] behind the CLI subcommands, and the shared text [`render`]ing.
//! This is the only layer that reads the local clock.

pub mod commands;
pub mod menu;
pub mod render;

pub use menu::Menu;
