pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod selection;

pub mod data {
    pub mod dataset;
    pub mod loader;
    pub mod parser;
    pub mod source;
    pub mod summary;
}

pub mod plot {
    pub mod chart;
    pub mod plot_html;
    pub mod plot_json;
    pub mod render;
}

pub use error::{Error, Result};
