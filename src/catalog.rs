//! The in-memory collection of books and its persistence through the line codec.

use std::{
    fs::{self, File},
    io::{ErrorKind, Read, Write},
    path::Path,
};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    codec,
    error::{CatalogError, Result},
    format::LineFormat,
    query::Selection,
    types::book::{Book, BookPatch},
};

/// Books in insertion order. Lookups by ISBN return the first match.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every record from `source`. The first malformed line aborts the whole load.
    pub fn load<R: Read>(source: R, format: &LineFormat) -> Result<Self> {
        let mut reader = format.reader_builder().from_reader(source);
        if format.header {
            let headers = reader.headers()?;
            if !headers.is_empty() && !headers.iter().eq(format.layout.columns()) {
                warn!(found = ?headers, "header does not match the expected columns");
            }
        }

        let mut books = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let book = codec::decode_record(&record, format)
                .map_err(|source| CatalogError::Decode { line, source })?;
            debug!(line, isbn = %book.isbn, "decoded book");
            books.push(book);
        }
        info!(count = books.len(), "loaded catalog");
        Ok(Self { books })
    }

    pub fn open(path: &Path, format: &LineFormat) -> Result<Self> {
        info!(path = %path.display(), "opening catalog");
        let file = File::open(path)?;
        Self::load(file, format)
    }

    /// Like [`Catalog::open`], but a missing file is an empty catalog.
    pub fn open_or_default(path: &Path, format: &LineFormat) -> Result<Self> {
        match File::open(path) {
            Ok(file) => {
                info!(path = %path.display(), "opening catalog");
                Self::load(file, format)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no catalog file yet, starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the header (if any) and one line per book. Every book is encoded before the
    /// first byte is written, so an unencodable book leaves `sink` untouched.
    pub fn persist<W: Write>(&self, sink: W, format: &LineFormat) -> Result<()> {
        let records = self
            .books
            .iter()
            .map(|book| {
                codec::encode_record(book, format).map_err(|source| CatalogError::Encode {
                    isbn: book.isbn.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut writer = format.writer_builder().from_writer(sink);
        if format.header {
            writer.write_record(format.header_fields())?;
        }
        for record in &records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        debug!(count = records.len(), "persisted catalog");
        Ok(())
    }

    /// Persist to `path` through a temporary file in the same directory, then rename it
    /// over the target. An existing file keeps its permissions.
    pub fn save(&self, path: &Path, format: &LineFormat) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut file = NamedTempFile::new_in(dir)?;
        match fs::metadata(path) {
            Ok(metadata) => file.as_file().set_permissions(metadata.permissions())?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.persist(&mut file, format)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        info!(path = %path.display(), count = self.books.len(), "saved catalog");
        Ok(())
    }

    /// Add `book` at the end. ISBNs are not checked for uniqueness.
    pub fn append(&mut self, book: Book) {
        debug!(isbn = %book.isbn, "appending book");
        self.books.push(book);
    }

    /// Add `book` at the end unless a book with the same ISBN exists.
    pub fn try_append(&mut self, book: Book) -> Result<()> {
        if self.find_by_isbn(&book.isbn).is_ok() {
            return Err(CatalogError::DuplicateIsbn { isbn: book.isbn });
        }
        self.append(book);
        Ok(())
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Result<&Book> {
        self.books
            .iter()
            .find(|book| book.isbn == isbn)
            .ok_or_else(|| CatalogError::NotFound {
                isbn: isbn.to_string(),
            })
    }

    pub fn update_fields(&mut self, isbn: &str, patch: BookPatch) -> Result<&Book> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.isbn == isbn)
            .ok_or_else(|| CatalogError::NotFound {
                isbn: isbn.to_string(),
            })?;
        debug!(isbn, ?patch, "updating book");
        book.apply(patch);
        Ok(&*book)
    }

    /// Books matching `predicate`, in catalog order. Each call scans the current records.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Book> + 'a
    where
        P: Fn(&Book) -> bool + 'a,
    {
        self.books.iter().filter(move |book| predicate(*book))
    }

    pub fn select<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a Book> + 'a {
        self.filter(move |book| selection.matches(book))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl FromIterator<Book> for Catalog {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
