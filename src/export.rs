use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::{catalog::Catalog, types::book::Book};

/// One row of a Goodreads-compatible library export.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Export {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: Option<String>,
    #[serde(rename = "Author l-f")]
    author_lf: Option<String>,
    #[serde(rename = "Additional Authors")]
    additional_authors: Option<String>,
    #[serde(rename = "ISBN13")]
    isbn13: String,
    #[serde(rename = "Binding")]
    binding: String,
    #[serde(rename = "Year Published")]
    year_published: i32,
    #[serde(rename = "Original Publication Year")]
    original_publication_year: Option<i32>,
}

impl From<&Book> for Export {
    fn from(book: &Book) -> Self {
        let mut authors = book.authors.iter();
        let first = authors.next();
        let additional = authors.map(|x| x.full_name()).collect::<Vec<_>>();
        Self {
            title: book.title.clone(),
            author: first.map(|x| x.full_name()),
            author_lf: first.map(|x| {
                if x.first_name.is_empty() {
                    x.family_name.clone()
                } else {
                    format!("{}, {}", x.family_name, x.first_name)
                }
            }),
            additional_authors: if additional.is_empty() {
                None
            } else {
                Some(additional.join(", "))
            },
            // same quoting Goodreads uses in its own exports
            isbn13: format!("=\"{}\"", book.isbn),
            binding: String::from(if book.is_ebook { "Ebook" } else { "Paperback" }),
            year_published: book.year_published,
            original_publication_year: None,
        }
    }
}

impl Export {
    pub fn new(catalog: &Catalog) -> Vec<Self> {
        catalog.iter().map(Self::from).collect()
    }

    pub fn export<W: Write>(data: Vec<Self>, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for record in data {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Dump the whole catalog as pretty-printed JSON.
pub fn export_json<W: Write>(catalog: &Catalog, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, catalog)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::author::{Author, Authors};

    fn good_omens() -> Book {
        Book::new("Good Omens", "9780060853983", false, 1990).with_authors(
            Authors::try_from(vec![
                Author::new("Pratchett", "Terry", "British", 1948),
                Author::new("Gaiman", "Neil", "British", 1960),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn goodreads_rows() {
        let catalog: Catalog = [good_omens()].into_iter().collect();
        let mut out = Vec::new();
        Export::export(Export::new(&catalog), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Title,Author,Author l-f,Additional Authors,ISBN13,Binding,Year Published,\
                 Original Publication Year"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "Good Omens,Terry Pratchett,\"Pratchett, Terry\",Neil Gaiman,\
                 \"=\"\"9780060853983\"\"\",Paperback,1990,"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn single_name_author_has_no_comma() {
        let book = Book::new("Dune", "9780441013593", true, 1965).with_authors(
            Authors::try_from(vec![Author::single_name("Herbert", "American", 1920)]).unwrap(),
        );
        let row = Export::from(&book);
        assert_eq!(row.author_lf.as_deref(), Some("Herbert"));
        assert_eq!(row.additional_authors, None);
        assert_eq!(row.binding, "Ebook");
    }

    #[test]
    fn json_snapshot_lists_books() {
        let catalog: Catalog = [good_omens()].into_iter().collect();
        let mut out = Vec::new();
        export_json(&catalog, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["books"][0]["title"], "Good Omens");
        assert_eq!(value["books"][0]["authors"][1]["family_name"], "Gaiman");
    }
}
