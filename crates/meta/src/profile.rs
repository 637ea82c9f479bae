use crate::consts::CONFIG_OPT_REGEX;
use std::path::{Path, PathBuf};

const DIST_KEY: &str = "dist";
const ARCH_KEY: &str = "target_arch";

/// Reads declared facts out of mock build-root profiles
/// (`<config_dir>/<profile>.cfg`).
///
/// Only plain `config_opts['key'] = value` lines of the profile itself are
/// read. Files pulled in with `include('templates/...')` are not followed, so
/// a key declared only in a template reads as undeclared.
///
/// Lookups never fail: a missing profile, an unreadable file or an undeclared
/// key all produce an empty string. Deciding whether an empty value is fatal
/// is the caller's job.
#[derive(Debug, Clone)]
pub struct ProfileInspector {
    config_dir: PathBuf,
}

impl ProfileInspector {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self { config_dir: config_dir.into() }
    }

    /// Distribution tag of the profile, e.g. `el6` for `epel-6-x86_64`.
    pub fn dist_of(&self, profile: &str) -> String {
        self.lookup(profile, DIST_KEY)
    }

    /// Architecture the profile builds for when none is requested.
    pub fn default_arch_of(&self, profile: &str) -> String {
        self.lookup(profile, ARCH_KEY)
    }

    fn profile_path(&self, profile: &str) -> Option<PathBuf> {
        // A profile is a bare name, never a path.
        if profile.is_empty() || profile.contains(['/', '\\', '\0']) || profile.starts_with('.') {
            return None;
        }
        Some(self.config_dir.join(format!("{profile}.cfg")))
    }

    fn lookup(&self, profile: &str, key: &str) -> String {
        let Some(path) = self.profile_path(profile) else {
            tracing::debug!(profile, "Refusing to inspect profile with a path-like name");
            return String::new();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => declared_value(&text, key).unwrap_or_default(),
            Err(err) => {
                tracing::debug!(profile, path = %path.display(), error = %err, "Mock profile unreadable");
                String::new()
            },
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Later assignments win, the same way they would when mock evaluates the
/// profile.
fn declared_value(text: &str, key: &str) -> Option<String> {
    text.lines()
        .filter_map(|line| CONFIG_OPT_REGEX.captures(line))
        .filter(|caps| &caps[1] == key)
        .last()
        .map(|caps| strip_value(&caps[2]))
}

/// A quoted value runs to its closing quote, `#` included. Anything else
/// ends at the first `#` and loses its stray quotes.
fn strip_value(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(quote) = raw.chars().next().filter(|c| matches!(c, '\'' | '"')) {
        let body = &raw[1..];
        if let Some(end) = body.find(quote) {
            return body[..end].trim().to_string();
        }
    }
    let without_comment = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    without_comment.chars().filter(|c| !matches!(c, '\'' | '"')).collect::<String>().trim().to_string()
}
