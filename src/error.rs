use thiserror::Error;

/// A line could not be turned into a [`Book`](crate::types::book::Book).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field {index} ({name}): cannot parse {raw:?} as {expected}")]
    InvalidField {
        index:    usize,
        name:     &'static str,
        raw:      String,
        expected: &'static str,
    },

    #[error("trailing author group has {found} of 3 fields")]
    PartialAuthorGroup { found: usize },

    #[error("input holds more than one line")]
    MultipleLines,

    #[error("could not split line: {0}")]
    Split(#[from] csv::Error),
}

/// A [`Book`](crate::types::book::Book) cannot be written without corrupting the line layout.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("field {field} contains forbidden character {character:?}: {value:?}")]
    ForbiddenCharacter {
        field:     &'static str,
        value:     String,
        character: char,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("delimiter {0:?} must be a single ASCII character other than a quote or line break")]
    InvalidDelimiter(char),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("line {line}: {source}")]
    Decode {
        line:   u64,
        #[source]
        source: DecodeError,
    },

    #[error("book {isbn}: {source}")]
    Encode {
        isbn:   String,
        #[source]
        source: EncodeError,
    },

    #[error("no book with ISBN {isbn}")]
    NotFound { isbn: String },

    #[error("a book with ISBN {isbn} already exists")]
    DuplicateIsbn { isbn: String },

    #[error("a book has at most {max} authors")]
    TooManyAuthors { max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
