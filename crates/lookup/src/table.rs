//! Grid tables for formatted output.
//!
//! ```text
//! +-----+------------+
//! |   # | Definition |
//! +=====+============+
//! |   1 | ...        |
//! +-----+------------+
//! ```

use crate::result::{Category, LookupResult};
use console::measure_text_width;

/// Headers get at least this much room beyond their own width.
const HEADER_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: String,
    align: Align,
}

/// A bordered table with one header row.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn column(mut self, header: &str, align: Align) -> Self {
        self.columns.push(Column {
            header: header.to_string(),
            align,
        });
        self
    }

    fn row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let cells = self
                    .rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .max()
                    .unwrap_or(0);
                cells.max(measure_text_width(&column.header) + HEADER_PADDING)
            })
            .collect()
    }

    /// Render without a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() * 2 + 3);

        lines.push(rule(&widths, '-'));
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        lines.push(self.line(&widths, &headers));
        lines.push(rule(&widths, '='));
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(self.line(&widths, &cells));
            lines.push(rule(&widths, '-'));
        }
        if self.rows.is_empty() {
            // header rule doubles as the bottom border
            lines.pop();
            lines.push(rule(&widths, '-'));
        }

        lines.join("\n")
    }

    fn line(&self, widths: &[usize], cells: &[&str]) -> String {
        let mut out = String::from("|");
        for ((cell, width), column) in cells.iter().zip(widths).zip(&self.columns) {
            out.push(' ');
            out.push_str(&pad(cell, *width, column.align));
            out.push_str(" |");
        }
        out
    }
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.extend(std::iter::repeat(fill).take(width + 2));
        out.push('+');
    }
    out
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let gap = " ".repeat(width.saturating_sub(measure_text_width(cell)));
    match align {
        Align::Left => format!("{cell}{gap}"),
        Align::Right => format!("{gap}{cell}"),
    }
}

/// Table for one category: numbered for definitions and examples, single column otherwise.
pub fn category_table(category: Category, values: &[String]) -> Table {
    if category.is_enumerated() {
        let mut table = Table::new()
            .column("#", Align::Right)
            .column(category.column(), Align::Left);
        for (i, value) in values.iter().enumerate() {
            table.row(vec![(i + 1).to_string(), value.clone()]);
        }
        table
    } else {
        let mut table = Table::new().column(category.column(), Align::Left);
        for value in values {
            table.row(vec![value.clone()]);
        }
        table
    }
}

/// Every non-empty category as a heading followed by its table.
pub fn render_tables(result: &LookupResult) -> String {
    let mut out = String::new();
    for (category, values) in result.non_empty() {
        out.push('\n');
        out.push_str(&category.title().to_uppercase());
        out.push('\n');
        out.push_str(&category_table(category, values).render());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn enumerated_table_has_right_aligned_numbers() {
        let table = category_table(
            Category::Definitions,
            &strings(&["feeling joy", "well expressed"]),
        );
        let expected = "\
+-----+----------------+
|   # | Definition     |
+=====+================+
|   1 | feeling joy    |
+-----+----------------+
|   2 | well expressed |
+-----+----------------+";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn narrow_values_keep_header_padding() {
        let table = category_table(Category::Antonyms, &strings(&["sad"]));
        let expected = "\
+-----------+
| Antonym   |
+===========+
| sad       |
+-----------+";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn wide_characters_are_measured_by_display_width() {
        let table = category_table(Category::Synonyms, &strings(&["日本語日本語"]));
        let rendered = table.render();
        let widths: Vec<usize> = rendered.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{rendered}");
    }

    #[test]
    fn sections_skip_empty_categories() {
        let result = LookupResult {
            synonyms: strings(&["glad", "happy"]),
            examples: strings(&["a happy smile"]),
            ..LookupResult::default()
        };
        let rendered = render_tables(&result);
        assert!(rendered.starts_with("\nSYNONYMS\n+"));
        assert!(rendered.contains("\nEXAMPLES\n"));
        assert!(!rendered.contains("ANTONYMS"));
        assert!(!rendered.contains("DEFINITIONS"));
        assert!(rendered.find("SYNONYMS") < rendered.find("EXAMPLES"));
        assert!(rendered.ends_with("+\n"));
    }

    #[test]
    fn empty_result_renders_nothing() {
        assert_eq!(render_tables(&LookupResult::default()), "");
    }
}
