//! Framing of the line-oriented catalog file: which layout, which delimiter, whether a
//! header line precedes the records.

use const_format::concatcp;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

macro_rules! author_slot {
    ($n:literal) => {
        concatcp!("familyName", $n, ",firstName", $n, ",nationality", $n, ",birthYear", $n)
    };
}

macro_rules! author_group {
    ($n:literal) => {
        concatcp!("name", $n, ",nationality", $n, ",birthYear", $n)
    };
}

/// Column names of the fixed-slot layout, comma separated. This is also its header line.
pub const FIXED_SLOT_COLUMNS: &str = concatcp!(
    "title,",
    author_slot!("One"),
    ",",
    author_slot!("Two"),
    ",",
    author_slot!("Three"),
    ",year,isbn,ebook,edition"
);

/// Column names of the variable-slot layout with all three author groups present.
pub const VARIABLE_SLOT_COLUMNS: &str = concatcp!(
    "title,isbn,ebook,year,",
    author_group!("One"),
    ",",
    author_group!("Two"),
    ",",
    author_group!("Three")
);

pub const FIXED_SLOT_FIELDS: usize = 17;
pub const VARIABLE_SLOT_MIN_FIELDS: usize = 4;

/// Field order and author-slot policy of a line.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `title, [familyName,firstName,nationality,birthYear]x3, year, isbn, ebook, edition`
    #[default]
    FixedSlot,
    /// `title|isbn|ebook|year` followed by up to three `name|nationality|birthYear` groups
    VariableSlot,
}

impl Layout {
    /// Same spelling as in the configuration file.
    pub fn name(self) -> &'static str {
        match self {
            Layout::FixedSlot => "fixed-slot",
            Layout::VariableSlot => "variable-slot",
        }
    }

    pub fn default_delimiter(self) -> char {
        match self {
            Layout::FixedSlot => ',',
            Layout::VariableSlot => '|',
        }
    }

    pub fn default_header(self) -> bool {
        match self {
            Layout::FixedSlot => true,
            Layout::VariableSlot => false,
        }
    }

    /// The variable-slot layout keeps a single name per author.
    pub fn stores_first_name(self) -> bool {
        matches!(self, Layout::FixedSlot)
    }

    pub fn stores_edition(self) -> bool {
        matches!(self, Layout::FixedSlot)
    }

    pub fn min_fields(self) -> usize {
        match self {
            Layout::FixedSlot => FIXED_SLOT_FIELDS,
            Layout::VariableSlot => VARIABLE_SLOT_MIN_FIELDS,
        }
    }

    pub fn columns(self) -> impl Iterator<Item = &'static str> {
        match self {
            Layout::FixedSlot => FIXED_SLOT_COLUMNS,
            Layout::VariableSlot => VARIABLE_SLOT_COLUMNS,
        }
        .split(',')
    }

    /// Name of the column at `index`, used in error reports.
    pub fn column_name(self, index: usize) -> &'static str {
        self.columns().nth(index).unwrap_or("extra")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    pub layout: Layout,
    pub header: bool,
    delimiter:  u8,
}

impl LineFormat {
    pub fn new(layout: Layout, delimiter: char, header: bool) -> Result<Self, FormatError> {
        if !delimiter.is_ascii() || matches!(delimiter, '\n' | '\r' | '"') {
            return Err(FormatError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            layout,
            header,
            delimiter: delimiter as u8,
        })
    }

    /// The layout with its usual delimiter and header setting.
    pub fn preset(layout: Layout) -> Self {
        Self {
            layout,
            header: layout.default_header(),
            delimiter: layout.default_delimiter() as u8,
        }
    }

    pub fn fixed_slot() -> Self {
        Self::preset(Layout::FixedSlot)
    }

    pub fn variable_slot() -> Self {
        Self::preset(Layout::VariableSlot)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter as char
    }

    pub fn header_fields(&self) -> Vec<&'static str> {
        self.layout.columns().collect()
    }

    pub fn header_line(&self) -> String {
        self.header_fields().join(&self.delimiter().to_string())
    }

    /// Naive positional splitting: no quoting, no escapes, blank lines skipped.
    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(self.header)
            .flexible(true)
            .quoting(false);
        builder
    }

    pub(crate) fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'));
        builder
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::fixed_slot()
    }
}
