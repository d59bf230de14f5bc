//! Minimal CSV tables for the small files kept in the object store.
//!
//! Supports RFC 4180 quoting (`"a, b"`, doubled quotes), LF and CRLF line
//! endings and a leading UTF-8 BOM. Blank lines are skipped. The first record
//! is always the header.

use thiserror::Error;

/// CSV parse and shape errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV document has no header row")]
    Empty,

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("row has {found} fields, header has {expected}")]
    RowWidth { expected: usize, found: usize },
}

/// Header plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Empty table with the given header.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { header: header.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    /// Parse a CSV document.
    ///
    /// # Errors
    /// Returns [`CsvError::Empty`] when there is no header row and
    /// [`CsvError::UnterminatedQuote`] for an unclosed quoted field.
    pub fn parse(text: &str) -> Result<Self, CsvError> {
        let mut records = parse_records(text)?.into_iter();
        let header = records.next().ok_or(CsvError::Empty)?;
        Ok(Self { header, rows: records.collect() })
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Value of `column` in the first data row.
    #[must_use]
    pub fn first_value(&self, column: &str) -> Option<&str> {
        let index = self.column(column)?;
        self.rows.first().and_then(|row| row.get(index)).map(String::as_str)
    }

    /// Append a row that matches the header width.
    ///
    /// # Errors
    /// Returns [`CsvError::RowWidth`] when the widths differ.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), CsvError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.header.len() {
            return Err(CsvError::RowWidth { expected: self.header.len(), found: row.len() });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Serialize with LF line endings and a trailing newline.
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        for record in std::iter::once(&self.header).chain(self.rows.iter()) {
            for (i, field) in record.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_field(&mut out, field);
            }
            out.push('\n');
        }
        out
    }
}

fn write_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn parse_records(text: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut started = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                quote_line = line;
                started = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                if started {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                started = false;
            }
            _ => {
                field.push(ch);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: quote_line });
    }
    if started {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}
