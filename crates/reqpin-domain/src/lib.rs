#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod comments;
pub mod convert;
pub mod manifest;
pub mod rewrite;

pub use comments::{read_comments, read_comments_file, CommentTable, IGNORE_KEY};
pub use convert::{convert_line, package_name};
pub use manifest::{
    generated_header, name_from_raw_file, output_file_name, raw_file_name, render_manifest,
    ManifestOutput, DEFAULT_GENERATOR,
};
pub use rewrite::{LocalOverride, RewriteRule, RewriteRules};
