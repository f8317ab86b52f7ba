//! Install lifecycle events.

use std::fmt;

/// A point in the install pipeline where a hook may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Before the download callback.
    PreDownload,
    /// Before the install callback.
    PreInstall,
    /// After the install callback succeeded.
    PostInstall,
}

impl HookEvent {
    /// Event name without the plugin suffix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreDownload => "pre_asdf_download",
            Self::PreInstall => "pre_asdf_install",
            Self::PostInstall => "post_asdf_install",
        }
    }

    /// Name of the hook for a plugin, e.g. `pre_asdf_install_lua`.
    #[must_use]
    pub fn hook_name(self, plugin: &str) -> String {
        format!("{}_{plugin}", self.as_str())
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_names() {
        assert_eq!(HookEvent::PreDownload.hook_name("lua"), "pre_asdf_download_lua");
        assert_eq!(HookEvent::PreInstall.hook_name("lua"), "pre_asdf_install_lua");
        assert_eq!(
            HookEvent::PostInstall.hook_name("nodejs"),
            "post_asdf_install_nodejs"
        );
    }
}
