//! Terminal plots for the text commands.

pub mod ascii;

pub use ascii::render_ascii_plot;
