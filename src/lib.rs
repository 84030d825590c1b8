//! Brickmosaic: pictures to brick mosaics.
//!
//! The mosaic pipeline itself lives in `mosaic_core`. This crate adds
//! palette and config loading, rendering of previews and numbered
//! instruction sheets, an HTTP API and a command-line front end.

#![allow(clippy::module_inception)]

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
