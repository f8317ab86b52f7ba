//! Version token parsing.
//!
//! A token is split once on the first `:`. The prefixes `ref:` and `path:`
//! select a git ref or a local path; everything after the prefix is kept
//! verbatim, colons included. Any other token is a plain version and keeps
//! its full text, so `1.0:beta` stays `1.0:beta`.
//!
//! `latest` is only meaningful on the command line and is recognized by
//! [`VersionSpec::parse_argument`], never by [`VersionSpec::parse`].

use std::fmt;

const REF_PREFIX: &str = "ref";
const PATH_PREFIX: &str = "path";
const LATEST: &str = "latest";

/// The kind of a parsed version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionKind {
    /// A plain version string.
    Version,
    /// A git ref (branch, tag or commit) to build from.
    Ref,
    /// A local path holding an already-built tool.
    Path,
    /// The newest version, optionally filtered.
    Latest,
}

impl VersionKind {
    /// Name used for `ASDF_INSTALL_TYPE`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Ref => "ref",
            Self::Path => "path",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version token parsed into its kind and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// Plain version. Holds the full original token.
    Version(String),
    /// Git ref, without the `ref:` prefix.
    Ref(String),
    /// Local path, without the `path:` prefix.
    Path(String),
    /// `latest` or `latest:<filter>`.
    Latest {
        /// Filter passed on to the plugin, if any.
        filter: Option<String>,
    },
}

impl VersionSpec {
    /// Parse a version token as found in a declaration file.
    ///
    /// Total over all inputs.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.split_once(':') {
            Some((REF_PREFIX, rest)) => Self::Ref(rest.to_string()),
            Some((PATH_PREFIX, rest)) => Self::Path(rest.to_string()),
            _ => Self::Version(token.to_string()),
        }
    }

    /// Parse a version token given as a command-line argument.
    ///
    /// Recognizes `latest` and `latest:<filter>` before falling back to
    /// [`VersionSpec::parse`]. Only the segment directly after `latest:` is
    /// used as the filter; an empty filter is treated as none.
    #[must_use]
    pub fn parse_argument(token: &str) -> Self {
        let mut segments = token.split(':');
        if segments.next() == Some(LATEST) {
            let filter = segments
                .next()
                .filter(|f| !f.is_empty())
                .map(ToString::to_string);
            return Self::Latest { filter };
        }
        Self::parse(token)
    }

    /// The kind of this spec.
    #[must_use]
    pub fn kind(&self) -> VersionKind {
        match self {
            Self::Version(_) => VersionKind::Version,
            Self::Ref(_) => VersionKind::Ref,
            Self::Path(_) => VersionKind::Path,
            Self::Latest { .. } => VersionKind::Latest,
        }
    }

    /// The value of this spec. For `Latest` this is the filter, or `""`.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Version(v) | Self::Ref(v) | Self::Path(v) => v,
            Self::Latest { filter } => filter.as_deref().unwrap_or(""),
        }
    }

    /// Value exported as `ASDF_INSTALL_TYPE`.
    #[must_use]
    pub fn install_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether this is `latest`, with or without a filter.
    #[must_use]
    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest { .. })
    }

    /// Name used for the download and install directories of this version.
    #[must_use]
    pub fn to_filesystem_name(&self) -> String {
        format_for_filesystem(self.kind(), self.value())
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => f.write_str(v),
            Self::Ref(r) => write!(f, "{REF_PREFIX}:{r}"),
            Self::Path(p) => write!(f, "{PATH_PREFIX}:{p}"),
            Self::Latest { filter: None } => f.write_str(LATEST),
            Self::Latest { filter: Some(x) } => write!(f, "{LATEST}:{x}"),
        }
    }
}

/// Render a version as a directory name.
///
/// Refs become `ref-<value>`; every other kind is used as is.
#[must_use]
pub fn format_for_filesystem(kind: VersionKind, value: &str) -> String {
    match kind {
        VersionKind::Ref => format!("ref-{value}"),
        VersionKind::Version | VersionKind::Path | VersionKind::Latest => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_version() {
        assert_eq!(
            VersionSpec::parse("1.2.3"),
            VersionSpec::Version("1.2.3".into())
        );
    }

    #[test]
    fn parse_ref_keeps_remaining_colons() {
        let spec = VersionSpec::parse("ref:abc:def");
        assert_eq!(spec, VersionSpec::Ref("abc:def".into()));
        assert_eq!(spec.kind(), VersionKind::Ref);
        assert_eq!(spec.value(), "abc:def");
    }

    #[test]
    fn parse_path() {
        assert_eq!(
            VersionSpec::parse("path:/x/y"),
            VersionSpec::Path("/x/y".into())
        );
    }

    #[test]
    fn parse_unknown_prefix_keeps_full_token() {
        assert_eq!(
            VersionSpec::parse("1.0:beta"),
            VersionSpec::Version("1.0:beta".into())
        );
        assert_eq!(
            VersionSpec::parse("refs:main"),
            VersionSpec::Version("refs:main".into())
        );
    }

    #[test]
    fn parse_does_not_recognize_latest() {
        assert_eq!(
            VersionSpec::parse("latest"),
            VersionSpec::Version("latest".into())
        );
        assert_eq!(
            VersionSpec::parse("latest:3"),
            VersionSpec::Version("latest:3".into())
        );
    }

    #[test]
    fn parse_empty_remainders() {
        assert_eq!(VersionSpec::parse("ref:"), VersionSpec::Ref(String::new()));
        assert_eq!(VersionSpec::parse(""), VersionSpec::Version(String::new()));
    }

    #[test]
    fn parse_argument_latest() {
        assert_eq!(
            VersionSpec::parse_argument("latest"),
            VersionSpec::Latest { filter: None }
        );
        assert_eq!(
            VersionSpec::parse_argument("latest:3.1"),
            VersionSpec::Latest {
                filter: Some("3.1".into())
            }
        );
        assert_eq!(
            VersionSpec::parse_argument("latest:"),
            VersionSpec::Latest { filter: None }
        );
    }

    #[test]
    fn parse_argument_uses_only_first_filter_segment() {
        assert_eq!(
            VersionSpec::parse_argument("latest:1:2"),
            VersionSpec::Latest {
                filter: Some("1".into())
            }
        );
    }

    #[test]
    fn parse_argument_falls_through() {
        assert_eq!(
            VersionSpec::parse_argument("ref:main"),
            VersionSpec::Ref("main".into())
        );
        assert_eq!(
            VersionSpec::parse_argument("latest-lts"),
            VersionSpec::Version("latest-lts".into())
        );
    }

    #[test]
    fn latest_value_is_filter() {
        let spec = VersionSpec::parse_argument("latest:18");
        assert!(spec.is_latest());
        assert_eq!(spec.value(), "18");
        assert_eq!(VersionSpec::Latest { filter: None }.value(), "");
    }

    #[test]
    fn filesystem_names() {
        assert_eq!(
            format_for_filesystem(VersionKind::Ref, "abc123"),
            "ref-abc123"
        );
        assert_eq!(format_for_filesystem(VersionKind::Version, "1.2.3"), "1.2.3");
        assert_eq!(format_for_filesystem(VersionKind::Path, "/opt/lua"), "/opt/lua");
        assert_eq!(
            VersionSpec::parse("ref:v1.0").to_filesystem_name(),
            "ref-v1.0"
        );
    }

    #[test]
    fn display_round_trips_tokens() {
        for token in ["1.2.3", "ref:abc:def", "path:/x/y", "1.0:beta"] {
            assert_eq!(VersionSpec::parse(token).to_string(), token);
        }
        assert_eq!(VersionSpec::parse_argument("latest:3").to_string(), "latest:3");
    }

    #[test]
    fn install_type_names() {
        assert_eq!(VersionKind::Version.as_str(), "version");
        assert_eq!(VersionKind::Ref.to_string(), "ref");
        assert_eq!(VersionKind::Path.as_str(), "path");
    }
}
