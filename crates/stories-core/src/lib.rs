#![cfg_attr(not(test), no_std)]

//! Headless core for a stories-style carousel: timed progress segments, a
//! page host and drag-to-dismiss gestures.

pub mod config;
pub mod host;
pub mod input;
pub mod pages;
pub mod progress;
pub mod render;
pub mod surface;
