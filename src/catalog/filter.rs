use super::types::CatalogRow;

/// Row selection. Unset bounds do not filter; a set bound drops rows whose
/// value is missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub kind: Option<String>,
    /// Smallest accepted minor axis, arcminutes.
    pub min_size_arcmin: Option<f64>,
    /// Largest accepted major axis, arcminutes.
    pub max_size_arcmin: Option<f64>,
    /// Faintest accepted V magnitude (numerically largest).
    pub faintest_magnitude: Option<f64>,
    /// Brightest accepted V magnitude (numerically smallest).
    pub brightest_magnitude: Option<f64>,
}

impl CatalogFilter {
    pub fn matches(&self, row: &CatalogRow) -> bool {
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            if row.kind != kind {
                return false;
            }
        }

        if self.min_size_arcmin.is_some() || self.max_size_arcmin.is_some() {
            let (Some(major), Some(minor)) =
                (parse_number(&row.major_axis), parse_number(&row.minor_axis))
            else {
                return false;
            };
            let (small, large) = (major.min(minor), major.max(minor));
            if self.min_size_arcmin.is_some_and(|min| small < min) {
                return false;
            }
            if self.max_size_arcmin.is_some_and(|max| large > max) {
                return false;
            }
        }

        if self.faintest_magnitude.is_some() || self.brightest_magnitude.is_some() {
            let Some(v_mag) = parse_number(&row.v_mag) else {
                return false;
            };
            if self.faintest_magnitude.is_some_and(|faint| v_mag > faint) {
                return false;
            }
            if self.brightest_magnitude.is_some_and(|bright| v_mag < bright) {
                return false;
            }
        }

        true
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}
