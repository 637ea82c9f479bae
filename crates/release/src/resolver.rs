use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use ghostyum_cache::{Clock, VersionStore};
use ghostyum_meta::ReleaseVersion;
use ghostyum_tools::Transport;
use std::sync::Arc;

/// Cache key under which the latest known release is stored.
pub const LATEST_VERSION_KEY: &str = "latest-version";

/// Resolves "the latest upstream release" with a time-bounded cache in front
/// of the network lookup.
///
/// Upstream publishes its latest release as a redirect from a stable URL to a
/// versioned archive URL. The first `MAJOR.MINOR.PATCH` in the redirect
/// target is the version.
pub struct VersionResolver {
    store: Arc<dyn VersionStore>,
    clock: Arc<dyn Clock>,
    transport: Arc<dyn Transport>,
    latest_url: String,
    max_age: u64,
}

impl VersionResolver {
    pub fn new(
        store: Arc<dyn VersionStore>,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn Transport>,
        latest_url: impl Into<String>,
        max_age: u64,
    ) -> Self {
        Self { store, clock, transport, latest_url: latest_url.into(), max_age }
    }

    /// Returns the cached version while it is younger than `max_age` seconds,
    /// otherwise looks it up and records the answer.
    ///
    /// A failed lookup is an error even when a stale entry exists. Failing to
    /// record a fresh answer is only logged.
    #[tracing::instrument(level = "debug", skip(self), fields(url = %self.latest_url))]
    pub fn resolve(&self) -> Result<ReleaseVersion> {
        let now = self.clock.now();
        if let Some(version) = self.cached(now) {
            tracing::info!(%version, "Using cached latest version");
            return Ok(version);
        }

        let target = self
            .transport
            .redirect_target(&self.latest_url)
            .or_raise(|| ErrorKind::Lookup(self.latest_url.clone()))?;
        let version = ReleaseVersion::search(&target).ok_or_raise(|| ErrorKind::NoVersion(target.clone()))?;
        tracing::info!(%version, "Resolved latest version");

        if let Err(err) = self.store.put(LATEST_VERSION_KEY, now, version.as_str()) {
            tracing::warn!(error = %*err, "Could not record latest version in cache");
        }
        Ok(version)
    }

    fn cached(&self, now: i64) -> Option<ReleaseVersion> {
        let entry = match self.store.get(LATEST_VERSION_KEY) {
            Ok(entry) => entry?,
            Err(err) => {
                tracing::warn!(error = %*err, "Could not read version cache");
                return None;
            },
        };
        if !entry.is_fresh(now, self.max_age) {
            tracing::debug!(age = entry.age(now), max_age = self.max_age, "Cached version expired");
            return None;
        }
        match entry.value.parse::<ReleaseVersion>() {
            Ok(version) => Some(version),
            Err(_) => {
                tracing::warn!(value = %entry.value, "Ignoring unparseable cached version");
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostyum_cache::{FileStore, FixedClock, MemoryStore};
    use ghostyum_tools::fakes::FakeTransport;
    use rstest::rstest;

    const LATEST: &str = "https://ghost.org/zip/ghost-latest.zip";
    const NOW: i64 = 1_700_000_000;
    const TIMEOUT: u64 = 42_600;

    fn resolver(store: Arc<dyn VersionStore>, transport: Arc<FakeTransport>, now: i64) -> VersionResolver {
        VersionResolver::new(store, Arc::new(FixedClock(now)), transport, LATEST, TIMEOUT)
    }

    fn upstream(version: &str) -> Arc<FakeTransport> {
        Arc::new(FakeTransport::new().with_redirect(format!("https://ghost.org/zip/ghost-{version}.zip")))
    }

    #[test]
    fn test_fresh_cache_skips_lookup() {
        let store = Arc::new(MemoryStore::with_entry(LATEST_VERSION_KEY, NOW - 100, "5.1.0"));
        let transport = upstream("5.2.0");
        let version = resolver(store.clone(), transport.clone(), NOW).resolve().unwrap();
        assert_eq!(version.as_str(), "5.1.0");
        assert!(transport.lookups().is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_second_resolve_uses_cache() {
        let store = Arc::new(MemoryStore::default());
        let transport = upstream("5.2.0");
        let resolver = resolver(store.clone(), transport.clone(), NOW);
        assert_eq!(resolver.resolve().unwrap().as_str(), "5.2.0");
        assert_eq!(resolver.resolve().unwrap().as_str(), "5.2.0");
        assert_eq!(transport.lookups(), [LATEST]);
        assert_eq!(store.writes(), 1);
    }

    #[rstest]
    #[case::expired(NOW - 50_000)]
    #[case::exactly_at_timeout(NOW - TIMEOUT as i64)]
    fn test_stale_cache_is_refreshed(#[case] recorded: i64) {
        let store = Arc::new(MemoryStore::with_entry(LATEST_VERSION_KEY, recorded, "5.1.0"));
        let transport = upstream("5.2.0");
        let version = resolver(store.clone(), transport.clone(), NOW).resolve().unwrap();
        assert_eq!(version.as_str(), "5.2.0");
        assert_eq!(transport.lookups().len(), 1);
        let entry = store.get(LATEST_VERSION_KEY).unwrap().unwrap();
        assert_eq!(entry.timestamp, NOW);
        assert_eq!(entry.value, "5.2.0");
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let store = Arc::new(MemoryStore::with_entry(LATEST_VERSION_KEY, NOW + 1_000_000, "5.1.0"));
        let transport = upstream("5.2.0");
        assert_eq!(resolver(store, transport.clone(), NOW).resolve().unwrap().as_str(), "5.1.0");
        assert!(transport.lookups().is_empty());
    }

    #[test]
    fn test_unparseable_cache_entry_is_ignored() {
        let store = Arc::new(MemoryStore::with_entry(LATEST_VERSION_KEY, NOW, "latest"));
        let transport = upstream("5.2.0");
        assert_eq!(resolver(store, transport.clone(), NOW).resolve().unwrap().as_str(), "5.2.0");
        assert_eq!(transport.lookups().len(), 1);
    }

    #[test]
    fn test_lookup_failure_has_no_stale_fallback() {
        let store = Arc::new(MemoryStore::with_entry(LATEST_VERSION_KEY, NOW - 50_000, "5.1.0"));
        let transport = Arc::new(FakeTransport::new());
        let err = resolver(store.clone(), transport, NOW).resolve().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Lookup(url) if url == LATEST));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_redirect_without_version() {
        let store = Arc::new(MemoryStore::default());
        let transport = Arc::new(FakeTransport::new().with_redirect("https://ghost.org/download"));
        let err = resolver(store.clone(), transport, NOW).resolve().unwrap_err();
        assert!(matches!(&*err, ErrorKind::NoVersion(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_writes_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        let version = resolver(store, upstream("5.2.0"), NOW).resolve().unwrap();
        assert_eq!(version.as_str(), "5.2.0");
        let text = std::fs::read_to_string(dir.path().join(LATEST_VERSION_KEY)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [NOW.to_string().as_str(), "5.2.0"]);
    }

    #[test]
    fn test_unwritable_cache_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("cache");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let store = Arc::new(FileStore::new(&blocker));
        let version = resolver(store, upstream("5.2.0"), NOW).resolve().unwrap();
        assert_eq!(version.as_str(), "5.2.0");
    }
}
