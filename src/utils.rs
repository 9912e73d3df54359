// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{Field, Prototype, Value};
use rustyline::DefaultEditor;

/// Source of operator input, one prompted line at a time
pub(crate) trait LineReader {
    fn readline(&mut self, prompt: &str) -> rustyline::Result<String>;
}

impl LineReader for DefaultEditor {
    fn readline(&mut self, prompt: &str) -> rustyline::Result<String> {
        DefaultEditor::readline(self, prompt)
    }
}

macro_rules! field {
    ($ed:ident, $name:expr, $opt:expr, $ty:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = if $opt {
            format!("{}{} (optional, {}): ", $crate::PROMPT, $name, $ty)
        } else {
            format!("{}{} (required, {}): ", $crate::PROMPT, $name, $ty)
        };

        match $ed.readline(&msg) {
            Ok(line) => Ok(Some(line)),

            // CTRL-D
            Err(ReadlineError::Eof) => Ok(None),

            // Any error, CTRL-C included
            Err(e) => Err(e),
        }
    }};
}

/// Ask the operator for every field, re-prompting until each value parses.
///
/// Returns `None` if the operator cancelled with CTRL-C, or with CTRL-D
/// twice in a row on a required field (also what a closed stdin looks like).
pub(crate) fn build_prototype<'a, R: LineReader>(
    rl: &mut R,
    fields: Vec<Field<'a>>,
) -> Result<Option<Prototype<'a>>, Error> {
    use rustyline::error::ReadlineError;

    if fields.iter().any(Field::is_optional) {
        println!("Press CTRL-D to leave an optional field empty");
    }

    let mut prototype = Prototype::new();

    for field in fields {
        let is_optional = field.is_optional();
        let (name, ty) = field.into_tuple();
        let mut eof = false;

        loop {
            let input: Option<String> = match field!(rl, name, is_optional, ty) {
                Ok(input) => input,
                Err(ReadlineError::Interrupted) => return Ok(None),
                Err(e) => return Err(e.into()),
            };

            match input {
                Some(input) if is_optional && input.trim().is_empty() => break,

                Some(input) => match Value::from_str(&input, ty) {
                    Ok(value) => {
                        prototype.insert(name, value);
                        break;
                    }

                    Err(e) => {
                        eof = false;
                        println!("Error: invalid {} '{}', expected {}", name, input.trim(), ty);
                        log::debug!("Rejected value for {}: {}", name, e);
                    }
                },

                None if is_optional => break,

                None if eof => {
                    println!();
                    return Ok(None);
                }

                None => {
                    println!("Error: {} is required, CTRL-D again to cancel", name);
                    eof = true;
                    continue;
                }
            }
        }
    }

    Ok(Some(prototype))
}
