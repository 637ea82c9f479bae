use std::fmt::{Display, Formatter, Result as FmtResult};

/// File name pattern used to decide whether an artifact already exists.
///
/// A pattern is either an exact name, or a literal prefix and suffix around a
/// single `*` wildcard. The wildcard matches any run of characters (including
/// none) that contains no path separator. Prefix and suffix may not overlap
/// in the matched name.
///
/// ```
/// use ghostyum_repo::ArtifactPattern;
///
/// let pattern = ArtifactPattern::wildcard("ghost-5.2.0-", ".src.rpm");
/// assert!(pattern.matches("ghost-5.2.0-3.el6.src.rpm"));
/// assert!(!pattern.matches("ghost-5.2.1-3.el6.src.rpm"));
/// assert_eq!(pattern.to_string(), "ghost-5.2.0-*.src.rpm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPattern {
    Exact(String),
    Wildcard { prefix: String, suffix: String },
}

impl ArtifactPattern {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn wildcard(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Wildcard { prefix: prefix.into(), suffix: suffix.into() }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == exact,
            Self::Wildcard { prefix, suffix } => {
                if name.len() < prefix.len() + suffix.len() {
                    return false;
                }
                match name.strip_prefix(prefix.as_str()).and_then(|rest| rest.strip_suffix(suffix.as_str())) {
                    Some(middle) => !middle.contains(['/', '\\']),
                    None => false,
                }
            },
        }
    }
}

impl Display for ArtifactPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Exact(exact) => f.write_str(exact),
            Self::Wildcard { prefix, suffix } => write!(f, "{prefix}*{suffix}"),
        }
    }
}
