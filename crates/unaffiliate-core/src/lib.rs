pub mod config;
pub mod logging;

pub mod background;
pub mod domains;
pub mod error;
pub mod intercept;
pub mod message;
pub mod scan;
pub mod stats;
pub mod url_model;
