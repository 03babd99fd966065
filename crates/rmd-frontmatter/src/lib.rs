//! rmd-frontmatter: Typed access to R Markdown output options
//!
//! This crate provides:
//! - A front matter record with typed access to its `output` field
//! - List/get/set of per-format output options
//! - A shared handle for records edited from several places
//! - Helpers to find the `---` delimited block in document text
//!
//! YAML parsing is left to the caller; records are exchanged as JSON.
//!
//! # Example
//!
//! ```
//! use rmd_frontmatter::{FrontMatter, OutputOptions};
//!
//! let mut fm = FrontMatter::from_json(r#"{"title": "Report", "output": "html_document"}"#).unwrap();
//! assert_eq!(fm.list_formats(), vec!["html_document"]);
//!
//! let mut pdf = OutputOptions::new();
//! pdf.set("keep_tex", true);
//! fm.set_output_option("pdf_document", pdf);
//!
//! assert!(fm.get_output_option("pdf_document").is_some());
//! assert!(fm.get_output_option("word_document").is_none());
//! ```

pub mod delimit;
pub mod error;
pub mod front_matter;
pub mod options;
pub mod shared;

pub use delimit::{FrontMatterBlock, join_front_matter, split_front_matter};
pub use error::{FrontMatterError, Result};
pub use front_matter::{FRONTMATTER_SEPARATOR, FrontMatter, OutputFormats};
pub use options::OutputOptions;
pub use shared::SharedFrontMatter;
