use crate::{comments::CommentTable, rewrite::RewriteRules};

/// Name of the package a resolved line pins: everything before the first `=`.
#[must_use]
pub fn package_name(line: &str) -> &str {
    line.split('=').next().unwrap_or(line)
}

/// Rewrite one resolved line for the generated manifest.
///
/// Returns `None` when the package is listed in the ignore directive; the
/// line must then be left out of the output.
#[must_use]
pub fn convert_line(line: &str, comments: &CommentTable, rules: &RewriteRules) -> Option<String> {
    let mut line = rules.apply(line);
    let name = package_name(&line);
    if comments.is_ignored(name) {
        return None;
    }
    if let Some(comment) = comments.annotation(name) {
        line.push_str("  # ");
        line.push_str(comment);
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(pairs: &[(&str, &str)]) -> CommentTable {
        let mut table = CommentTable::default();
        for (key, value) in pairs {
            table.insert(*key, *value);
        }
        table
    }

    fn rules() -> RewriteRules {
        RewriteRules::standard().expect("rules")
    }

    #[test]
    fn name_is_text_before_first_equals() {
        assert_eq!(package_name("foo==1.0"), "foo");
        assert_eq!(package_name("foo===1.0"), "foo");
        assert_eq!(package_name("./scripts/dev/pylint_checkers"), "./scripts/dev/pylint_checkers");
        assert_eq!(package_name(""), "");
    }

    #[test]
    fn plain_line_passes_through() {
        assert_eq!(
            convert_line("baz==3.0", &comments(&[]), &rules()).as_deref(),
            Some("baz==3.0")
        );
    }

    #[test]
    fn ignored_package_is_omitted() {
        let table = comments(&[("ignore", "a,b,c")]);
        for line in ["a==1", "b==2", "c==3"] {
            assert_eq!(convert_line(line, &table, &rules()), None, "{line}");
        }
        assert_eq!(
            convert_line("ab==1", &table, &rules()).as_deref(),
            Some("ab==1")
        );
    }

    #[test]
    fn annotation_is_appended_once() {
        let table = comments(&[("foo", "pinned for compat")]);
        let converted = convert_line("foo==1.0", &table, &rules()).expect("kept");
        assert_eq!(converted, "foo==1.0  # pinned for compat");
        assert_eq!(converted.matches("  # pinned for compat").count(), 1);
    }

    #[test]
    fn ignore_wins_over_annotation() {
        let table = comments(&[("foo", "note"), ("ignore", "foo")]);
        assert_eq!(convert_line("foo==1.0", &table, &rules()), None);
    }

    #[test]
    fn lint_plugin_line_is_replaced_and_may_be_annotated() {
        let table = comments(&[("./scripts/dev/pylint_checkers", "local checkers")]);
        assert_eq!(
            convert_line("qute-pylint==0.4", &table, &rules()).as_deref(),
            Some("./scripts/dev/pylint_checkers  # local checkers")
        );
    }

    #[test]
    fn commit_is_stripped_before_name_lookup() {
        let table = comments(&[("pkg", "from git")]);
        assert_eq!(
            convert_line("pkg==1.2@0123abcd  # trailing", &table, &rules()).as_deref(),
            Some("pkg==1.2  # trailing  # from git")
        );
    }

    #[test]
    fn scm_line_name_runs_to_first_equals() {
        let table = comments(&[("ignore", "-e git+https://example.invalid/x.git#egg")]);
        assert_eq!(
            convert_line("-e git+https://example.invalid/x.git#egg=x", &table, &rules()),
            None
        );
    }
}
