use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Whole-string match for user supplied or cached versions.
regex!(VERSION_EXACT_REGEX, r"^(\d+)\.(\d+)\.(\d+)$");
// Unanchored search used against upstream redirect targets.
regex!(VERSION_SEARCH_REGEX, r"(\d+)\.(\d+)\.(\d+)");
// RPM tags are case-insensitive; the value may carry macros such as `%{?dist}`.
regex!(RELEASE_TAG_REGEX, r"(?mi)^[ \t]*Release[ \t]*:[ \t]*(.*)$");
regex!(DIGITS_REGEX, r"\d+");
// Mock profiles are Python: `config_opts['dist'] = 'el6'  # comment`
regex!(CONFIG_OPT_REGEX, r#"^\s*config_opts\[\s*['"]([A-Za-z0-9_.]+)['"]\s*\]\s*=\s*(.*)$"#);
