#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod render_cql;
pub mod render_json;
pub mod renderer;

mod temporal;

pub use config::{BytesFormat, RenderConfig, RenderMode};
pub use error::RenderError;
pub use renderer::{DefaultRenderer, ValueRenderer, render};
