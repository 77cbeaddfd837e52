//! Report rendering, comment export and output layout.

pub mod export;
pub mod generator;
pub mod layout;

pub use export::{load_comments_json, write_export};
pub use generator::{generate_insights_file, generate_insights_text, generate_readme};
pub use layout::output_directory;
