//! Build stamp and version bump

use b4x_fs::{NormalizedPath, io};

use crate::context::ActionContext;
use crate::timefmt::format_datetime;
use crate::version::BuildVersion;
use crate::Result;

/// The text written to `Files/build.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStamp {
    pub path: NormalizedPath,
    pub text: String,
}

/// Write `"<date> <time>"` to `Files/build.txt`.
///
/// Formats are .NET style; `None` falls back to the configured formats.
pub fn write_build_stamp(
    ctx: &ActionContext,
    date_format: Option<&str>,
    time_format: Option<&str>,
) -> Result<BuildStamp> {
    let build = &ctx.config().build;
    let date = format_datetime(&ctx.now(), date_format.unwrap_or(build.date_format.as_str()))?;
    let time = format_datetime(&ctx.now(), time_format.unwrap_or(build.time_format.as_str()))?;
    let text = format!("{date} {time}");

    let path = ctx.layout().build_stamp_file();
    io::write_text(&path, &text)?;
    tracing::info!(path = %path, stamp = %text, "Wrote build stamp");
    Ok(BuildStamp { path, text })
}

/// Result of [`update_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub path: NormalizedPath,
    /// `None` when the version file did not exist
    pub previous: Option<BuildVersion>,
    pub current: BuildVersion,
}

/// Increment the build number in `Files/version.txt`, creating it with
/// `0.0.1` when absent.
pub fn update_version(ctx: &ActionContext) -> Result<VersionBump> {
    let path = ctx.layout().version_file();

    let previous = if path.is_file() {
        Some(BuildVersion::parse(&io::read_text(&path)?)?)
    } else {
        None
    };
    let current = previous
        .as_ref()
        .map(BuildVersion::next)
        .unwrap_or_else(BuildVersion::initial);

    io::write_text(&path, &current.to_string())?;
    tracing::info!(path = %path, version = %current, "Updated version");
    Ok(VersionBump {
        path,
        previous,
        current,
    })
}
