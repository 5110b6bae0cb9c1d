use crate::{comments::CommentTable, convert::convert_line, rewrite::RewriteRules};

pub const DEFAULT_GENERATOR: &str = "reqpin";

const FILE_PREFIX: &str = "requirements-";
const RAW_SUFFIX: &str = "-raw.txt";
const OUTPUT_SUFFIX: &str = ".txt";

#[must_use]
pub fn raw_file_name(name: &str) -> String {
    format!("{FILE_PREFIX}{name}{RAW_SUFFIX}")
}

#[must_use]
pub fn output_file_name(name: &str) -> String {
    format!("{FILE_PREFIX}{name}{OUTPUT_SUFFIX}")
}

/// Extract `<name>` from `requirements-<name>-raw.txt`.
#[must_use]
pub fn name_from_raw_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(RAW_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// The two-line banner every generated manifest starts with.
#[must_use]
pub fn generated_header(generator: &str) -> String {
    format!("# This file is automatically generated by {generator}\n\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOutput {
    pub contents: String,
    pub written: usize,
    pub omitted: usize,
}

/// Build the generated manifest from resolver output, keeping the resolver's
/// line order.
///
/// Every resolved line that is not ignored becomes one output line, except
/// blank resolver lines, which are skipped rather than written as empty lines.
#[must_use]
pub fn render_manifest(
    generator: &str,
    frozen: &str,
    comments: &CommentTable,
    rules: &RewriteRules,
) -> ManifestOutput {
    let mut contents = generated_header(generator);
    let mut written = 0;
    let mut omitted = 0;
    for line in frozen.lines().filter(|line| !line.trim().is_empty()) {
        match convert_line(line, comments, rules) {
            Some(converted) => {
                contents.push_str(&converted);
                contents.push('\n');
                written += 1;
            }
            None => omitted += 1,
        }
    }
    ManifestOutput {
        contents,
        written,
        omitted,
    }
}
