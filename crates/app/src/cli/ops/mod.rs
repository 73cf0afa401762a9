pub mod cat;
pub mod df;
pub mod health;
pub mod link;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod rm;
pub mod rmdir;
pub mod serve;
pub mod stat;
pub mod touch;
pub mod truncate;
pub mod version;
pub mod write;

pub use cat::Cat;
pub use df::Df;
pub use health::Health;
pub use link::Link;
pub use ls::Ls;
pub use mkdir::Mkdir;
pub use mv::Mv;
pub use rm::Rm;
pub use rmdir::Rmdir;
pub use serve::Serve;
pub use stat::Stat;
pub use touch::Touch;
pub use truncate::Truncate;
pub use version::Version;
pub use write::Write;

use common::TimeSpec;

/// Render a timestamp as "YYYY-MM-DD HH:MM:SS" (UTC).
pub(crate) fn format_time(t: TimeSpec) -> String {
    chrono::DateTime::from_timestamp(t.sec, t.nsec as u32)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("@{}", t.sec))
}

/// Parse a permission argument written in octal ("755").
pub(crate) fn parse_octal(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s, 8).map_err(|e| format!("invalid octal mode '{}': {}", s, e))
}
