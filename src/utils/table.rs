//! Table rendering for CLI listings.

use super::formatting::{pad_right, truncate};

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Cells wider than their column are truncated; missing cells render
    /// empty.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|col| pad_right(&truncate(&col.header, col.width), col.width))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    pad_right(&truncate(cell, col.width), col.width)
                })
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_rows() {
        let mut table = Table::new(vec![Column::new("ID", 4), Column::new("NAME", 6)]);
        table.add_row(vec!["ab".into(), "Blue Bottle".into()]);
        table.add_row(vec!["cd".into()]);

        assert_eq!(table.render(), "ID   NAME\nab   Blue …\ncd\n");
    }
}
