/// One catalog line, still as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    /// 1-based line number in the source, header included.
    pub line: usize,
    pub name: String,
    pub kind: String,
    pub ra: String,
    pub dec: String,
    pub constellation: String,
    pub major_axis: String,
    pub minor_axis: String,
    pub position_angle: String,
    pub b_mag: String,
    pub v_mag: String,
    pub common_names: String,
}

impl CatalogRow {
    pub fn from_fields(line: usize, fields: &[&str]) -> Self {
        let field = |idx: usize| fields.get(idx).map(|f| f.trim().to_string()).unwrap_or_default();
        Self {
            line,
            name: field(0),
            kind: field(1),
            ra: field(2),
            dec: field(3),
            constellation: field(4),
            major_axis: field(5),
            minor_axis: field(6),
            position_angle: field(7),
            b_mag: field(8),
            v_mag: field(9),
            common_names: field(28),
        }
    }

    /// `"Common (Name)"` when the row has common names, else the catalog name.
    pub fn display_name(&self) -> String {
        if self.common_names.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.common_names, self.name)
        }
    }
}
