//! Read-only predicates over books, used to build the listing views.

use crate::types::book::Book;

pub fn is_ebook(book: &Book) -> bool {
    book.is_ebook
}

pub fn is_physical(book: &Book) -> bool {
    !book.is_ebook
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// True if an author's family name, first name or full name equals `name`, ignoring case.
/// Single-name authors match on the one name they have. `name` is compared as given.
pub fn author_matches(book: &Book, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    book.authors.iter().any(|author| {
        [author.family_name.as_str(), author.first_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .any(|part| eq_ignore_case(part, name))
            || eq_ignore_case(&author.full_name(), name)
    })
}

/// True if any author's full name contains `needle`, ignoring case.
pub fn author_contains(book: &Book, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return false;
    }
    book.authors
        .iter()
        .any(|author| author.full_name().to_lowercase().contains(&needle))
}

/// The listing views offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Ebooks,
    Physical,
    Author { name: String, exact: bool },
}

impl Selection {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Selection::All => true,
            Selection::Ebooks => is_ebook(book),
            Selection::Physical => is_physical(book),
            Selection::Author { name, exact: true } => author_matches(book, name),
            Selection::Author { name, exact: false } => author_contains(book, name),
        }
    }
}
