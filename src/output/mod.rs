//! Human-readable and JSON rendering of engine results.

use serde::Serialize;
use strum_macros::Display;

use crate::astro::AstroObject;
use crate::predict::{QuickCheck, VisibilityInfo, VisibilityWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ObjectWindows<'a> {
    name: &'a str,
    windows: &'a [VisibilityWindow],
}

pub fn render_visibility(
    infos: &[VisibilityInfo],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    log::debug!("Rendering {} visibility results as {}", infos.len(), format);
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = infos
                .iter()
                .map(|info| ObjectWindows {
                    name: &info.object.name,
                    windows: &info.visibility_windows,
                })
                .collect();
            serde_json::to_string(&entries)
        }
        OutputFormat::Text => Ok(infos.iter().map(visibility_text).collect()),
    }
}

fn visibility_text(info: &VisibilityInfo) -> String {
    let mut out = format!("Visibility of {}:\n", info.object.name);
    if info.visibility_windows.is_empty() {
        out.push_str("  never visible in range\n");
    }
    for (i, window) in info.visibility_windows.iter().enumerate() {
        let duration = window.duration().to_std().unwrap_or_default();
        out.push_str(&format!("{}: {}\n", i, humantime::format_duration(duration)));
        out.push_str(&format!(
            "\tStart: {} ({:.2}°)\n",
            window.start_time.to_rfc3339(),
            window.start_alt
        ));
        out.push_str(&format!(
            "\tEnd: {} ({:.2}°)\n",
            window.end_time.to_rfc3339(),
            window.end_alt
        ));
    }
    out
}

pub fn render_quick_checks(
    checks: &[QuickCheck],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    log::debug!("Rendering {} quick checks as {}", checks.len(), format);
    match format {
        OutputFormat::Json => serde_json::to_string(checks),
        OutputFormat::Text => Ok(checks
            .iter()
            .map(|c| {
                format!(
                    "Object {} never visible: {}, ever in azimuth window: {}\n",
                    c.name, c.never_visible, c.ever_in_azimuth_window
                )
            })
            .collect()),
    }
}

pub fn render_objects(
    objects: &[AstroObject],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    log::debug!("Rendering {} objects as {}", objects.len(), format);
    match format {
        OutputFormat::Json => serde_json::to_string(objects),
        OutputFormat::Text => Ok(objects
            .iter()
            .map(|o| {
                let ra = &o.coordinate.ra;
                let dec = &o.coordinate.dec;
                format!(
                    "{}\t{}\tRA {:02}h{:02}m{:05.2}s\tDec {}{:02}°{:02}'{:04.1}\"\n",
                    o.name,
                    o.kind.as_deref().unwrap_or("-"),
                    ra.hour,
                    ra.min,
                    ra.sec,
                    if dec.is_southern() { '-' } else { '+' },
                    dec.degree.abs(),
                    dec.min,
                    dec.sec
                )
            })
            .collect()),
    }
}
