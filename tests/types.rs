use pretty_assertions::assert_eq;

use bookshelf::{Author, Authors, Book, BookPatch, CatalogError};

#[test]
fn book_rendering() {
    let book = Book::new("Good Omens", "9780060853983", true, 1990).with_authors(
        Authors::try_from(vec![
            Author::new("Pratchett", "Terry", "British", 1948),
            Author::new("Gaiman", "Neil", "British", 1960),
        ])
        .unwrap(),
    );
    assert_eq!(
        book.to_string(),
        "Title: Good Omens\n\
         ISBN: 9780060853983\n\
         eBook: Yes\n\
         Year Published: 1990\n\
         Edition: 1\n\
         Authors: Terry Pratchett (British, 1948); Neil Gaiman (British, 1960)"
    );
}

#[test]
fn rendering_without_authors() {
    let book = Book::new("Anonymous", "1", false, 1000).with_edition(3);
    assert_eq!(
        book.to_string(),
        "Title: Anonymous\nISBN: 1\neBook: No\nYear Published: 1000\nEdition: 3\nAuthors: "
    );
}

#[test]
fn single_name_author_rendering() {
    assert_eq!(
        Author::single_name("Herbert", "American", 1920).to_string(),
        "Herbert (American, 1920)"
    );
}

#[test]
fn at_most_three_authors() {
    let mut authors = Authors::new();
    for name in ["A", "B", "C"] {
        authors.push(Author::single_name(name, "", 0)).unwrap();
    }
    assert!(authors.is_full());
    assert!(matches!(
        authors.push(Author::single_name("D", "", 0)),
        Err(CatalogError::TooManyAuthors { max: 3 })
    ));
    assert_eq!(authors.len(), 3);

    let four = vec![Author::default(); 4];
    assert!(Authors::try_from(four).is_err());
}

#[test]
fn authors_reject_overflow_when_deserialized() {
    let json = r#"[
        {"family_name": "A", "first_name": "", "nationality": "", "birth_year": 1},
        {"family_name": "B", "first_name": "", "nationality": "", "birth_year": 2},
        {"family_name": "C", "first_name": "", "nationality": "", "birth_year": 3},
        {"family_name": "D", "first_name": "", "nationality": "", "birth_year": 4}
    ]"#;
    assert!(serde_json::from_str::<Authors>(json).is_err());
}

#[test]
fn patch_touches_only_present_fields() {
    let mut book = Book::new("Old", "1", false, 1999).with_edition(2);
    assert!(BookPatch::default().is_empty());
    book.apply(BookPatch::default().year_published(2001));
    assert_eq!(book, Book::new("Old", "1", false, 2001).with_edition(2));
}
