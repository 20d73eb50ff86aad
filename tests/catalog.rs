use std::fs;

use pretty_assertions::assert_eq;

use bookshelf::{
    query::{is_ebook, Selection},
    Author, Authors, Book, BookPatch, Catalog, CatalogError, DecodeError, LineFormat,
};

const FIXED_SLOT_FILE: &str = "\
title,familyNameOne,firstNameOne,nationalityOne,birthYearOne,familyNameTwo,firstNameTwo,nationalityTwo,birthYearTwo,familyNameThree,firstNameThree,nationalityThree,birthYearThree,year,isbn,ebook,edition
Dune,Herbert,Frank,American,1920,,,,,,,,,1965,9780441013593,false,1
Good Omens,Pratchett,Terry,British,1948,Gaiman,Neil,British,1960,,,,,1990,9780060853983,true,2
";

fn sample() -> Catalog {
    [
        Book::new("X", "A", true, 2000),
        Book::new("Y", "B", false, 2001),
        Book::new("Z", "C", true, 2002),
        Book::new("W", "D", false, 2003),
    ]
    .into_iter()
    .collect()
}

#[test]
fn load_fixed_slot_file() {
    let catalog = Catalog::load(FIXED_SLOT_FILE.as_bytes(), &LineFormat::fixed_slot()).unwrap();
    assert_eq!(catalog.len(), 2);
    let dune = catalog.find_by_isbn("9780441013593").unwrap();
    assert_eq!(dune.title, "Dune");
    assert_eq!(
        dune.authors.as_slice(),
        &[Author::new("Herbert", "Frank", "American", 1920)]
    );
    let omens = &catalog.books()[1];
    assert!(omens.is_ebook);
    assert_eq!(omens.edition, 2);
    assert_eq!(omens.authors.len(), 2);
}

#[test]
fn persist_reproduces_the_file() {
    let format = LineFormat::fixed_slot();
    let catalog = Catalog::load(FIXED_SLOT_FILE.as_bytes(), &format).unwrap();
    let mut out = Vec::new();
    catalog.persist(&mut out, &format).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), FIXED_SLOT_FILE);
}

#[test]
fn variable_slot_file_has_no_header() {
    let format = LineFormat::variable_slot();
    let source = "Dune|9780441013593|false|1965|Herbert|American|1920\n\
                  Anonymous|1|true|1000\n";
    let catalog = Catalog::load(source.as_bytes(), &format).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.books()[1].authors.is_empty());

    let mut out = Vec::new();
    catalog.persist(&mut out, &format).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), source);
}

#[test]
fn blank_lines_and_crlf_are_tolerated() {
    let source = "T|1|false|2000\r\n\r\nU|2|true|2001\r\n";
    let catalog = Catalog::load(source.as_bytes(), &LineFormat::variable_slot()).unwrap();
    let isbns = catalog.iter().map(|b| b.isbn.as_str()).collect::<Vec<_>>();
    assert_eq!(isbns, ["1", "2"]);
}

#[test]
fn empty_source_is_an_empty_catalog() {
    for format in [LineFormat::fixed_slot(), LineFormat::variable_slot()] {
        let catalog = Catalog::load("".as_bytes(), &format).unwrap();
        assert!(catalog.is_empty());
    }
}

#[test]
fn load_fails_on_first_malformed_line() {
    let source = "Dune|9780441013593|false|1965|Herbert|American|1920\n\
                  Broken|2|false|1965|Herbert\n";
    let err = Catalog::load(source.as_bytes(), &LineFormat::variable_slot()).unwrap_err();
    match err {
        CatalogError::Decode { line, source } => {
            assert_eq!(line, 2);
            assert!(matches!(source, DecodeError::PartialAuthorGroup { found: 2 }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unencodable_book_leaves_sink_untouched() {
    let mut catalog = sample();
    catalog.append(Book::new("Comma, here", "E", false, 2004));
    let mut out = Vec::new();
    let err = catalog.persist(&mut out, &LineFormat::fixed_slot()).unwrap_err();
    assert!(matches!(err, CatalogError::Encode { ref isbn, .. } if isbn == "E"));
    assert!(out.is_empty());
}

#[test]
fn update_fields_is_targeted() {
    let mut catalog = sample();
    let updated = catalog
        .update_fields("A", BookPatch::default().title("Z"))
        .unwrap()
        .clone();
    assert_eq!(updated.title, "Z");
    assert!(updated.is_ebook);
    assert_eq!(updated.year_published, 2000);
    assert_eq!(catalog.find_by_isbn("B").unwrap().title, "Y");

    assert!(matches!(
        catalog.update_fields("Q", BookPatch::default().title("Z")),
        Err(CatalogError::NotFound { ref isbn }) if isbn == "Q"
    ));
}

#[test]
fn update_fields_applies_every_present_field() {
    let mut catalog = sample();
    let authors = Authors::try_from(vec![Author::single_name("Anon", "", 0)]).unwrap();
    catalog
        .update_fields(
            "B",
            BookPatch::default()
                .is_ebook(true)
                .year_published(1999)
                .authors(authors.clone()),
        )
        .unwrap();
    let book = catalog.find_by_isbn("B").unwrap();
    assert_eq!(book.title, "Y");
    assert!(book.is_ebook);
    assert_eq!(book.year_published, 1999);
    assert_eq!(book.authors, authors);
}

#[test]
fn first_duplicate_wins() {
    let mut catalog = sample();
    catalog.append(Book::new("Second A", "A", false, 2010));
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.find_by_isbn("A").unwrap().title, "X");

    catalog.update_fields("A", BookPatch::default().title("First")).unwrap();
    assert_eq!(catalog.books()[4].title, "Second A");
}

#[test]
fn try_append_rejects_duplicates() {
    let mut catalog = sample();
    assert!(matches!(
        catalog.try_append(Book::new("Again", "B", false, 2010)),
        Err(CatalogError::DuplicateIsbn { .. })
    ));
    catalog.try_append(Book::new("New", "E", false, 2010)).unwrap();
    assert_eq!(catalog.books().last().unwrap().isbn, "E");
}

#[test]
fn filter_keeps_catalog_order_and_sees_edits() {
    let mut catalog = sample();
    let ebooks = catalog.filter(is_ebook).map(|b| b.isbn.clone()).collect::<Vec<_>>();
    assert_eq!(ebooks, ["A", "C"]);

    catalog
        .update_fields("D", BookPatch::default().is_ebook(true))
        .unwrap();
    let ebooks = catalog.filter(is_ebook).map(|b| b.isbn.clone()).collect::<Vec<_>>();
    assert_eq!(ebooks, ["A", "C", "D"]);

    let physical = catalog
        .select(&Selection::Physical)
        .map(|b| b.isbn.as_str())
        .collect::<Vec<_>>();
    assert_eq!(physical, ["B"]);
}

#[test]
fn save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("library.csv");
    let format = LineFormat::fixed_slot();

    let missing = Catalog::open_or_default(&path, &format).unwrap();
    assert!(missing.is_empty());
    assert!(matches!(
        Catalog::open(&path, &format),
        Err(CatalogError::Io(_))
    ));

    let catalog = Catalog::load(FIXED_SLOT_FILE.as_bytes(), &format).unwrap();
    catalog.save(&path, &format).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXED_SLOT_FILE);
    assert_eq!(Catalog::open(&path, &format).unwrap(), catalog);

    let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn failed_save_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.csv");
    let format = LineFormat::fixed_slot();
    fs::write(&path, FIXED_SLOT_FILE).unwrap();

    let mut catalog = Catalog::open(&path, &format).unwrap();
    catalog.append(Book::new("Bad, title", "E", false, 2004));
    assert!(catalog.save(&path, &format).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXED_SLOT_FILE);
}

#[cfg(unix)]
#[test]
fn save_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.csv");
    let format = LineFormat::fixed_slot();
    fs::write(&path, FIXED_SLOT_FILE).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    Catalog::new().save(&path, &format).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
