//! Headless driver for the blockyard engine.
//!
//! Seeds a small arena, spawns a body and plays scripted input against it on a
//! fixed tick. Rendering and real input devices live elsewhere; this crate is
//! what they would drive.

pub mod config;
pub mod scene;
pub mod session;
