pub mod alpha_bleed;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod pack;
pub mod pipeline;
pub mod raster;
pub mod resize;
