use std::fmt;
use std::str::FromStr;

/// Device class a story run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    Mobile,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Platform::Desktop),
            "mobile" => Ok(Platform::Mobile),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// Which device classes a story may be scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSet {
    All,
    DesktopOnly,
    MobileOnly,
    /// Never scheduled anywhere (e.g. the site breaks under replay).
    None,
}

impl PlatformSet {
    pub const fn supports(self, platform: Platform) -> bool {
        match self {
            PlatformSet::All => true,
            PlatformSet::DesktopOnly => matches!(platform, Platform::Desktop),
            PlatformSet::MobileOnly => matches!(platform, Platform::Mobile),
            PlatformSet::None => false,
        }
    }
}

impl fmt::Display for PlatformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlatformSet::All => "all",
            PlatformSet::DesktopOnly => "desktop",
            PlatformSet::MobileOnly => "mobile",
            PlatformSet::None => "none",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    Mac,
    Linux,
    Android,
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" | "win" => Ok(Os::Windows),
            "mac" => Ok(Os::Mac),
            "linux" => Ok(Os::Linux),
            "android" => Ok(Os::Android),
            other => Err(format!("unknown os: {}", other)),
        }
    }
}

/// Runtime descriptor the driver evaluates story predicates against.
#[derive(Debug, Clone)]
pub struct Environment {
    pub platform: Platform,
    pub os: Os,
    /// OS release tag, e.g. "yosemite" or "elcapitan" on Mac.
    pub os_version: Option<String>,
    /// Low-memory device class (svelte builds).
    pub low_end_device: bool,
}

impl Environment {
    pub fn new(platform: Platform, os: Os) -> Self {
        Self {
            platform,
            os,
            os_version: None,
            low_end_device: false,
        }
    }

    pub fn os_version_is(&self, tag: &str) -> bool {
        self.os_version.as_deref() == Some(tag)
    }
}

/// Per-story runtime exclusion, evaluated by the driver before scheduling.
pub type DisablePredicate = fn(&Environment) -> bool;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_set_membership() {
        assert!(PlatformSet::All.supports(Platform::Desktop));
        assert!(PlatformSet::All.supports(Platform::Mobile));
        assert!(PlatformSet::DesktopOnly.supports(Platform::Desktop));
        assert!(!PlatformSet::DesktopOnly.supports(Platform::Mobile));
        assert!(PlatformSet::MobileOnly.supports(Platform::Mobile));
        assert!(!PlatformSet::MobileOnly.supports(Platform::Desktop));
    }

    #[test]
    fn none_supports_no_platform() {
        assert!(!PlatformSet::None.supports(Platform::Desktop));
        assert!(!PlatformSet::None.supports(Platform::Mobile));
    }

    #[test]
    fn os_version_tag_matching() {
        let mut env = Environment::new(Platform::Desktop, Os::Mac);
        assert!(!env.os_version_is("yosemite"));
        env.os_version = Some("yosemite".to_string());
        assert!(env.os_version_is("yosemite"));
        assert!(!env.os_version_is("elcapitan"));
    }
}
