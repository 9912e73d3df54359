// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::records::Record;
use prettytable::{format::consts::FORMAT_DEFAULT, Cell, Row, Table};

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<R: Record> ToTable for [R] {
    fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_DEFAULT);
        table.set_titles(Row::new(R::HEADERS.iter().map(|h| Cell::new(h)).collect()));

        for record in self {
            let cells = record.cells().iter().map(|c| Cell::new(c)).collect();
            table.add_row(Row::new(cells));
        }

        table
    }
}

/// Render records into a bordered grid, one line per element
pub fn render_lines<T: ToTable + ?Sized>(records: &T) -> Vec<String> {
    records
        .to_table()
        .to_string()
        .lines()
        .map(str::to_owned)
        .collect()
}
