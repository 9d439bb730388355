use std::fs;
use std::path::Path;

use crate::astro::{AstroObject, Declination, EquatorialCoordinate, RightAscension};
use crate::catalog::error::CatalogError;
use crate::catalog::filter::CatalogFilter;
use crate::catalog::types::CatalogRow;

const DELIMITER: char = ';';

/// Read a semicolon-delimited catalog file and keep the rows the filter accepts.
pub fn read_catalog(path: &Path, filter: &CatalogFilter) -> Result<Vec<CatalogRow>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let rows = parse_catalog(&content, filter)?;
    log::info!("Loaded {} catalog rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse catalog text. The first non-empty line is the header and is skipped.
pub fn parse_catalog(content: &str, filter: &CatalogFilter) -> Result<Vec<CatalogRow>, CatalogError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    lines.next().ok_or(CatalogError::MissingHeader)?;

    let rows = lines
        .map(|(idx, line)| {
            let fields: Vec<&str> = line.split(DELIMITER).collect();
            CatalogRow::from_fields(idx + 1, &fields)
        })
        .filter(|row| {
            let keep = filter.matches(row);
            if !keep {
                log::trace!("Skipping catalog entry {}", row.name);
            }
            keep
        })
        .collect();

    Ok(rows)
}

/// Convert rows to engine targets. Any malformed coordinate fails the whole batch.
pub fn to_astro_objects(rows: &[CatalogRow]) -> Result<Vec<AstroObject>, CatalogError> {
    rows.iter()
        .map(|row| -> Result<AstroObject, CatalogError> {
            let invalid = |field, message| CatalogError::InvalidCoordinate {
                row: row.line,
                name: row.name.clone(),
                field,
                message,
            };
            let ra = parse_ra(&row.ra).map_err(|e| invalid("RA", e))?;
            let dec = parse_dec(&row.dec).map_err(|e| invalid("Dec", e))?;
            Ok(AstroObject {
                name: row.display_name(),
                coordinate: EquatorialCoordinate { ra, dec },
                kind: Some(row.kind.clone()).filter(|k| !k.is_empty()),
            })
        })
        .collect()
}

/// Parse `HH:MM:SS.ss`.
pub fn parse_ra(s: &str) -> Result<RightAscension, String> {
    let [hour, min, sec] = parse_sexagesimal(s)
        .ok_or_else(|| format!("expected HH:MM:SS.ss, got {:?}", s))?;
    Ok(RightAscension { hour, min, sec })
}

/// Parse `[+-]DD:MM:SS.s`.
pub fn parse_dec(s: &str) -> Result<Declination, String> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let [degree, min, sec] = parse_sexagesimal(body)
        .filter(|[d, _, _]| d.is_sign_positive())
        .ok_or_else(|| format!("expected [+-]DD:MM:SS.s, got {:?}", s))?;
    Ok(Declination {
        degree: if negative { -degree } else { degree },
        min,
        sec,
        negative,
    })
}

fn parse_sexagesimal(s: &str) -> Option<[f64; 3]> {
    let parts: Vec<f64> = s
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        &[a, b, c] if parts.iter().all(|v| v.is_finite()) => Some([a, b, c]),
        _ => None,
    }
}
