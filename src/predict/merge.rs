use crate::predict::types::VisibilityWindow;

/// Fold windows from any number of site configs into a sorted, non-overlapping list.
///
/// Windows that touch (next start equal to current end) are joined. Sorting is
/// stable, so equal start times keep their input order.
pub fn merge_windows(mut windows: Vec<VisibilityWindow>) -> Vec<VisibilityWindow> {
    windows.sort_by_key(|w| w.start_time);

    let mut merged: Vec<VisibilityWindow> = Vec::with_capacity(windows.len());
    for window in windows {
        match merged.last_mut() {
            Some(last) if window.start_time <= last.end_time => {
                if window.end_time > last.end_time {
                    last.extend_to(window.end_time, window.end_alt);
                }
            }
            _ => merged.push(window),
        }
    }
    merged
}
