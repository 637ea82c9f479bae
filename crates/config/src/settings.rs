use directories::ProjectDirs;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub(crate) const QUALIFIER: &str = "org";
pub(crate) const ORGANIZATION: &str = "ghost";
pub(crate) const APPLICATION: &str = "ghostyum";

/// Every configurable knob of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// mock build-root profile.
    #[serde(deserialize_with = "deserialize_text")]
    pub root: String,
    /// Binary-phase architecture. Unset means the profile's default.
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// Install directory the other paths default relative to.
    pub base_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<PathBuf>,
    /// Release to build. Unset means the latest upstream release.
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub srpm_only: bool,
    /// GPG key name for `rpmsign`. Unset disables signing.
    #[serde(default, deserialize_with = "deserialize_optional_text", skip_serializing_if = "Option::is_none")]
    pub sign_key: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub package: String,
    /// Where mock keeps its `<profile>.cfg` files.
    pub mock_config_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Seconds a resolved latest version stays valid.
    pub cache_timeout: u64,
    /// Redirects to the latest release archive.
    pub latest_url: String,
    /// Release archive URL, with a `{version}` placeholder.
    pub download_url: String,
    /// Skip a phase only when the exact release-qualified package exists,
    /// rather than any package of the same version.
    pub match_release: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: "epel-6-x86_64".to_string(),
            arch: None,
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            repo: None,
            spec: None,
            sources: None,
            version: None,
            srpm_only: false,
            sign_key: None,
            package: "ghost".to_string(),
            mock_config_dir: PathBuf::from("/etc/mock"),
            cache_dir: None,
            cache_timeout: 42_600,
            latest_url: "https://ghost.org/zip/ghost-latest.zip".to_string(),
            download_url: "https://ghost.org/zip/ghost-{version}.zip".to_string(),
            match_release: false,
        }
    }
}

impl Settings {
    /// `repo`, else `<base_dir>/yum`.
    pub fn repo_dir(&self) -> PathBuf {
        self.repo.clone().unwrap_or_else(|| self.base_dir.join("yum"))
    }

    /// `spec`, else `<base_dir>/ghost.spec`.
    pub fn spec_path(&self) -> PathBuf {
        self.spec.clone().unwrap_or_else(|| self.base_dir.join("ghost.spec"))
    }

    /// `sources`, else `<base_dir>/sources`.
    pub fn sources_dir(&self) -> PathBuf {
        self.sources.clone().unwrap_or_else(|| self.base_dir.join("sources"))
    }

    /// `cache_dir`, else the user's cache directory, else `<base_dir>/.cache`.
    pub fn cache_path(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        match ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
            Some(dirs) => dirs.cache_dir().to_path_buf(),
            None => self.base_dir.join(".cache"),
        }
    }
}

/// Accepts a string, or a number or boolean taken as its literal text.
///
/// Environment variables and unquoted TOML values such as a key id
/// `37017186` arrive as numbers, but every such setting is a name.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl Visitor<'_> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// [`deserialize_text`] for settings that may be left unset.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalTextVisitor;

    impl<'de> Visitor<'de> for OptionalTextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an optional string or number")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserialize_text(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalTextVisitor)
}

/// Command-line values. Only flags that were given are set, so unset ones
/// never mask the environment or the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srpm_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_timeout: Option<u64>,
}
