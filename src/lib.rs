//! Head-to-head football match history: loaders for CSV, JSON and REST
//! sources, the aggregation core, and text rendering.

pub mod annotations;
pub mod api_source;
pub mod config;
pub mod csv_source;
pub mod feed;
pub mod h2h;
pub mod http_client;
pub mod json_source;
pub mod league;
pub mod loader;
pub mod render;
pub mod sample;
pub mod search;
pub mod state;
