use crate::astro::{equatorial_to_horizontal, AstroObject};
use crate::predict::merge::merge_windows;
use crate::predict::reachability::{object_ever_in_azimuth_window, object_never_visible};
use crate::predict::types::{TimeRange, VisibilityInfo, VisibilityWindow};
use crate::site::SiteConfig;

enum ScanState {
    Searching,
    WindowOpen(VisibilityWindow),
}

/// Visibility windows for every object, merged across all site configs.
///
/// One entry per object, in input order. Objects that are never visible get
/// an empty window list.
pub fn compute_visibility(
    objects: &[AstroObject],
    configs: &[SiteConfig],
    range: &TimeRange,
) -> Vec<VisibilityInfo> {
    log::info!(
        "Scanning {} objects against {} configs from {} to {} every {} min",
        objects.len(),
        configs.len(),
        range.start(),
        range.end(),
        range.step_minutes()
    );

    objects
        .iter()
        .map(|object| {
            let windows = configs
                .iter()
                .flat_map(|config| scan_config(object, config, range))
                .collect();
            let merged = merge_windows(windows);
            log::info!("{}: {} visibility windows", object.name, merged.len());
            VisibilityInfo {
                object: object.clone(),
                visibility_windows: merged,
            }
        })
        .collect()
}

/// Unmerged windows for one object behind one site config.
pub fn scan_config(
    object: &AstroObject,
    config: &SiteConfig,
    range: &TimeRange,
) -> Vec<VisibilityWindow> {
    if object_never_visible(object, config) || !object_ever_in_azimuth_window(object, config) {
        log::debug!(
            "{} can never be seen through the window facing {:.1}°",
            object.name,
            config.direct_azimuth
        );
        return Vec::new();
    }

    let facing = config.telescope_altitude_bounds(config.direct_azimuth);
    log::debug!(
        "Opening spans {:.2}°..{:.2}° altitude at {:.1}° azimuth",
        facing.min_deg,
        facing.max_deg,
        config.direct_azimuth
    );

    let mut windows = Vec::new();
    let mut state = ScanState::Searching;

    for t in range.instants() {
        let horizontal = equatorial_to_horizontal(&object.coordinate, &config.position, t);
        let alt = horizontal.altitude_deg;
        let visible = config.is_visible(horizontal);
        log::trace!(
            "{} alt {:.2}° az {:.2}° visible={}",
            t.to_rfc3339(),
            alt,
            horizontal.azimuth_deg,
            visible
        );

        state = match (state, visible) {
            (ScanState::Searching, false) => ScanState::Searching,
            (ScanState::Searching, true) => {
                ScanState::WindowOpen(VisibilityWindow::opened_at(t, alt))
            }
            (ScanState::WindowOpen(mut window), true) => {
                window.extend_to(t, alt);
                ScanState::WindowOpen(window)
            }
            (ScanState::WindowOpen(window), false) => {
                windows.push(window);
                ScanState::Searching
            }
        };
    }

    if let ScanState::WindowOpen(window) = state {
        windows.push(window);
    }

    windows
}
