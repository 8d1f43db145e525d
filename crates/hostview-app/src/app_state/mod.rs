//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the host window, the embedding core and the background
//! runtime that discovers the renderer window.

mod core;
mod event_handler;
mod init;
mod layout;
mod polling;
mod shutdown;
mod title;

pub use core::HostviewApp;
