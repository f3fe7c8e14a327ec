// Linux-specific helpers: /etc/os-release.

/// Read distro name from /etc/os-release (Linux), preferring PRETTY_NAME over NAME.
pub(super) fn read_os_pretty_name_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        parse_os_release(&content)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_os_release(content: &str) -> Option<String> {
    let value = |key: &str| {
        content
            .lines()
            .find_map(|line| line.strip_prefix(key))
            .map(|v| v.trim().trim_matches('"'))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    value("PRETTY_NAME=").or_else(|| value("NAME="))
}
