//! Pipe table detection and rendering.

use crate::columns::{ColumnType, infer_column_type};

use super::classes::{ClassMap, class_attr};
use super::inline::format_inline;

/// Pipe table parsed from Markdown source.
///
/// Cells hold the raw Markdown text with surrounding whitespace trimmed.
/// Rows may have fewer or more cells than the header; cells are rendered
/// positionally without count matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses a table starting at the first line.
    ///
    /// Expects a pipe row, a separator row and at least one pipe row of
    /// data. Returns the table and the number of lines it spans, or `None`
    /// when the lines do not form a table.
    pub fn parse(lines: &[&str]) -> Option<(Self, usize)> {
        let [header, separator, rest @ ..] = lines else {
            return None;
        };

        if !is_pipe_row(header) || !is_separator_row(separator) {
            return None;
        }

        let rows: Vec<Vec<String>> = rest
            .iter()
            .take_while(|line| is_pipe_row(line))
            .map(|line| split_cells(line))
            .collect();

        if rows.is_empty() {
            return None;
        }

        let consumed = rows.len() + 2;
        Some((
            Self {
                header: split_cells(header),
                rows,
            },
            consumed,
        ))
    }

    /// Header cell texts.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Body rows of cell texts.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Infers a type for every column from its body cells.
    ///
    /// Covers as many columns as the widest row or the header, whichever
    /// is larger. Uses the sampling heuristic of [`infer_column_type`].
    pub fn column_types(&self) -> Vec<ColumnType> {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..width)
            .map(|column| {
                infer_column_type(
                    self.rows
                        .iter()
                        .filter_map(|row| row.get(column).map(String::as_str)),
                )
            })
            .collect()
    }

    /// Renders the table as a single line of HTML.
    ///
    /// With `annotate` set, each header cell carries a `data-type` attribute
    /// naming the inferred type of its column.
    pub(super) fn to_html(&self, classes: &ClassMap, annotate: bool) -> String {
        let types = if annotate {
            self.column_types()
        } else {
            Vec::new()
        };

        let mut html = format!("<table{}><thead><tr>", class_attr(&classes.table));
        for (column, cell) in self.header.iter().enumerate() {
            let data_type = types
                .get(column)
                .map(|ty| format!(" data-type=\"{}\"", ty))
                .unwrap_or_default();
            html.push_str(&format!(
                "<th{}{}>{}</th>",
                class_attr(&classes.header_cell),
                data_type,
                format_inline(cell, classes)
            ));
        }
        html.push_str("</tr></thead><tbody>");

        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!(
                    "<td{}>{}</td>",
                    class_attr(&classes.body_cell),
                    format_inline(cell, classes)
                ));
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
        html
    }
}

/// Replaces every table in the text with its rendered HTML line.
pub(super) fn render_tables(text: &str, classes: &ClassMap, annotate: bool) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut output: Vec<String> = Vec::with_capacity(lines.len());

    let mut index = 0;
    while index < lines.len() {
        if let Some((table, consumed)) = Table::parse(&lines[index..]) {
            output.push(table.to_html(classes, annotate));
            index += consumed;
        } else {
            output.push(lines[index].to_string());
            index += 1;
        }
    }

    output.join("\n")
}

/// A line of the form `| ... |` with at least one character between pipes.
fn is_pipe_row(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.starts_with('|') && line.ends_with('|')
}

/// A pipe row made only of `-`, `:`, `|` and whitespace.
fn is_separator_row(line: &str) -> bool {
    is_pipe_row(line)
        && line
            .trim()
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Splits a pipe row into trimmed, non-empty cells.
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect()
}
