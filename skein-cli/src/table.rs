//! A minimal column-aligned table renderer, grounded in `dandy::table::Table`
//! (same push-row/pad/join shape), adapted to own its strings rather than
//! borrow them — `skein`'s state names and symbol labels are generated at
//! print time (`s0`, `s1`, ...) rather than parsed out of source text, so
//! there's no `&str` buffer to borrow from.
use std::cmp::max;

#[derive(Default, Debug, Clone)]
pub struct Table {
    column_widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.column_widths.len() {
            self.column_widths.resize(row.len(), 0);
        }
        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = max(*width, cell.chars().count());
        }
        self.rows.push(row);
    }

    pub fn render(&self, sep: &str) -> String {
        let pad = |s: &str, width: usize| {
            let len = s.chars().count();
            if len < width {
                format!("{s}{}", " ".repeat(width - len))
            } else {
                s.to_string()
            }
        };
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.column_widths)
                    .map(|(cell, width)| format!("{}{sep}", pad(cell, *width)))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
