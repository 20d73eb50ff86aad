//! One [`Book`] per line. Fields are positional; nothing is quoted or escaped, so text that
//! contains the delimiter or a line break is refused on encode.

use csv::StringRecord;
use tracing::warn;

use crate::{
    error::{DecodeError, EncodeError},
    format::{Layout, LineFormat, FIXED_SLOT_FIELDS, VARIABLE_SLOT_MIN_FIELDS},
    types::{
        author::{Author, Authors, MAX_AUTHORS},
        book::{Book, DEFAULT_EDITION},
    },
};

const SLOT_WIDTH: usize = 4;
const GROUP_WIDTH: usize = 3;

/// Encode `book` as a single line without terminator.
pub fn encode(book: &Book, format: &LineFormat) -> Result<String, EncodeError> {
    let record = encode_record(book, format)?;
    Ok(record
        .iter()
        .collect::<Vec<_>>()
        .join(&format.delimiter().to_string()))
}

pub fn encode_record(book: &Book, format: &LineFormat) -> Result<StringRecord, EncodeError> {
    let fields = match format.layout {
        Layout::FixedSlot => fixed_slot_fields(book),
        Layout::VariableSlot => variable_slot_fields(book),
    };
    let delimiter = format.delimiter();
    for (index, value) in fields.iter().enumerate() {
        if let Some(character) = value
            .chars()
            .find(|c| *c == delimiter || *c == '\n' || *c == '\r')
        {
            return Err(EncodeError::ForbiddenCharacter {
                field: format.layout.column_name(index),
                value: value.clone(),
                character,
            });
        }
    }
    Ok(StringRecord::from(fields))
}

fn fixed_slot_fields(book: &Book) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIXED_SLOT_FIELDS);
    fields.push(book.title.clone());
    for slot in 0..MAX_AUTHORS {
        match book.authors.get(slot) {
            Some(author) => fields.extend([
                author.family_name.clone(),
                author.first_name.clone(),
                author.nationality.clone(),
                author.birth_year.to_string(),
            ]),
            None => fields.extend(std::iter::repeat(String::new()).take(SLOT_WIDTH)),
        }
    }
    fields.extend([
        book.year_published.to_string(),
        book.isbn.clone(),
        book.is_ebook.to_string(),
        book.edition.to_string(),
    ]);
    fields
}

fn variable_slot_fields(book: &Book) -> Vec<String> {
    let mut fields = vec![
        book.title.clone(),
        book.isbn.clone(),
        book.is_ebook.to_string(),
        book.year_published.to_string(),
    ];
    for author in &book.authors {
        fields.extend([
            author.full_name(),
            author.nationality.clone(),
            author.birth_year.to_string(),
        ]);
    }
    fields
}

/// Decode a single line. Decoding is all-or-nothing; input spanning several lines is refused.
pub fn decode(line: &str, format: &LineFormat) -> Result<Book, DecodeError> {
    let mut builder = format.reader_builder();
    builder.has_headers(false);
    let mut reader = builder.from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(DecodeError::FieldCount {
            expected: format.layout.min_fields(),
            found:    0,
        });
    }
    if reader.read_record(&mut StringRecord::new())? {
        return Err(DecodeError::MultipleLines);
    }
    decode_record(&record, format)
}

pub fn decode_record(record: &StringRecord, format: &LineFormat) -> Result<Book, DecodeError> {
    let fields = Fields {
        record,
        layout: format.layout,
    };
    match format.layout {
        Layout::FixedSlot => decode_fixed_slot(&fields),
        Layout::VariableSlot => decode_variable_slot(&fields),
    }
}

fn decode_fixed_slot(fields: &Fields) -> Result<Book, DecodeError> {
    fields.require(FIXED_SLOT_FIELDS)?;
    if fields.len() > FIXED_SLOT_FIELDS {
        warn!(
            found = fields.len(),
            "ignoring fields past the edition column"
        );
    }

    let mut authors = Vec::with_capacity(MAX_AUTHORS);
    for slot in 0..MAX_AUTHORS {
        let base = 1 + slot * SLOT_WIDTH;
        if (base..base + SLOT_WIDTH).all(|i| fields.text(i).is_empty()) {
            continue;
        }
        authors.push(Author {
            family_name: fields.text(base).to_string(),
            first_name:  fields.text(base + 1).to_string(),
            nationality: fields.text(base + 2).to_string(),
            birth_year:  fields.integer(base + 3)?,
        });
    }

    Ok(Book {
        title:          fields.text(0).to_string(),
        year_published: fields.integer(13)?,
        isbn:           fields.text(14).to_string(),
        is_ebook:       fields.boolean(15)?,
        edition:        fields.integer(16)?,
        authors:        Authors::from_slots(authors),
    })
}

fn decode_variable_slot(fields: &Fields) -> Result<Book, DecodeError> {
    fields.require(VARIABLE_SLOT_MIN_FIELDS)?;
    let trailing = fields.len() - VARIABLE_SLOT_MIN_FIELDS;
    let consumed = trailing.min(MAX_AUTHORS * GROUP_WIDTH);
    if consumed % GROUP_WIDTH != 0 {
        return Err(DecodeError::PartialAuthorGroup {
            found: consumed % GROUP_WIDTH,
        });
    }
    if trailing > consumed {
        warn!(
            found = fields.len(),
            "ignoring fields past the third author"
        );
    }

    let authors = (0..consumed / GROUP_WIDTH)
        .map(|group| -> Result<Author, DecodeError> {
            let base = VARIABLE_SLOT_MIN_FIELDS + group * GROUP_WIDTH;
            Ok(Author::single_name(
                fields.text(base),
                fields.text(base + 1),
                fields.integer(base + 2)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Book {
        title:          fields.text(0).to_string(),
        isbn:           fields.text(1).to_string(),
        is_ebook:       fields.boolean(2)?,
        year_published: fields.integer(3)?,
        edition:        DEFAULT_EDITION,
        authors:        Authors::from_slots(authors),
    })
}

struct Fields<'r> {
    record: &'r StringRecord,
    layout: Layout,
}

impl<'r> Fields<'r> {
    fn len(&self) -> usize {
        self.record.len()
    }

    fn require(&self, expected: usize) -> Result<(), DecodeError> {
        if self.len() < expected {
            return Err(DecodeError::FieldCount {
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }

    fn text(&self, index: usize) -> &'r str {
        self.record.get(index).unwrap_or_default()
    }

    fn invalid(&self, index: usize, expected: &'static str) -> DecodeError {
        DecodeError::InvalidField {
            index,
            name: self.layout.column_name(index),
            raw: self.text(index).to_string(),
            expected,
        }
    }

    fn integer(&self, index: usize) -> Result<i32, DecodeError> {
        self.text(index)
            .trim()
            .parse::<i32>()
            .map_err(|_| self.invalid(index, "integer"))
    }

    fn boolean(&self, index: usize) -> Result<bool, DecodeError> {
        let raw = self.text(index).trim();
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid(index, "boolean"))
        }
    }
}
