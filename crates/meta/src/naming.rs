//! Expected file names of built packages.
//!
//! ```
//! use ghostyum_meta::naming::{binary_package_name, source_package_name};
//! let version = "5.2.0".parse().unwrap();
//! let srpm = source_package_name("ghost", &version, "3", "el6");
//! assert_eq!(srpm, "ghost-5.2.0-3.el6.src.rpm");
//! assert_eq!(binary_package_name(&srpm, "x86_64"), "ghost-5.2.0-3.el6.x86_64.rpm");
//! ```

use crate::ReleaseVersion;

/// Package format extension (without the leading dot).
pub const PACKAGE_EXT: &str = "rpm";
/// Architecture marker carried by source packages.
pub const SOURCE_ARCH: &str = "src";

/// `<package>-<version>-<release>.<dist>.src.rpm`
pub fn source_package_name(package: &str, version: &ReleaseVersion, release: &str, dist: &str) -> String {
    format!("{package}-{version}-{release}.{dist}.{SOURCE_ARCH}.{PACKAGE_EXT}")
}

/// Swaps the `.src.` architecture marker of a source package name for `arch`.
///
/// Only the marker directly in front of the extension is replaced, so a
/// package whose own name happens to contain `.src.` is left intact. Names
/// without the marker are returned unchanged.
pub fn binary_package_name(source_name: &str, arch: &str) -> String {
    let marker = format!(".{SOURCE_ARCH}.{PACKAGE_EXT}");
    match source_name.strip_suffix(&marker) {
        Some(stem) => format!("{stem}.{arch}.{PACKAGE_EXT}"),
        None => source_name.to_string(),
    }
}

/// Name prefix shared by every build of `version`, regardless of release
/// counter or dist tag: `<package>-<version>-`.
pub fn version_prefix(package: &str, version: &ReleaseVersion) -> String {
    format!("{package}-{version}-")
}

/// Name suffix of packages built for `arch`: `.<arch>.rpm`.
pub fn arch_suffix(arch: &str) -> String {
    format!(".{arch}.{PACKAGE_EXT}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn version(s: &str) -> ReleaseVersion {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("ghost", "5.2.0", "3", "el6", "ghost-5.2.0-3.el6.src.rpm")]
    #[case("ghost", "0.11.14", "1", "el7", "ghost-0.11.14-1.el7.src.rpm")]
    #[case("ghost-cli", "1.25.3", "12", "fc39", "ghost-cli-1.25.3-12.fc39.src.rpm")]
    fn test_source_package_name(
        #[case] package: &str,
        #[case] v: &str,
        #[case] release: &str,
        #[case] dist: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(source_package_name(package, &version(v), release, dist), expected);
    }

    #[rstest]
    #[case("ghost-5.2.0-3.el6.src.rpm", "x86_64", "ghost-5.2.0-3.el6.x86_64.rpm")]
    #[case("ghost-5.2.0-3.el6.src.rpm", "noarch", "ghost-5.2.0-3.el6.noarch.rpm")]
    #[case("my.src.tool-1.0.0-1.el6.src.rpm", "i686", "my.src.tool-1.0.0-1.el6.i686.rpm")]
    #[case("ghost-5.2.0-3.el6.x86_64.rpm", "i686", "ghost-5.2.0-3.el6.x86_64.rpm")]
    fn test_binary_package_name(#[case] source: &str, #[case] arch: &str, #[case] expected: &str) {
        assert_eq!(binary_package_name(source, arch), expected);
    }

    #[test]
    fn test_prefix_and_suffix_frame_the_full_names() {
        let v = version("5.2.0");
        let srpm = source_package_name("ghost", &v, "3", "el6");
        let rpm = binary_package_name(&srpm, "x86_64");
        assert!(srpm.starts_with(&version_prefix("ghost", &v)));
        assert!(srpm.ends_with(&arch_suffix(SOURCE_ARCH)));
        assert!(rpm.starts_with(&version_prefix("ghost", &v)));
        assert!(rpm.ends_with(&arch_suffix("x86_64")));
    }
}
