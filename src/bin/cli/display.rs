use bookshelf::{
    config::{Config, Styleable},
    Book,
};

/// ISBNs are shown hyphenated when they parse; anything else is shown as stored.
fn hyphenated(isbn: &str) -> String {
    isbn.parse::<isbn2::Isbn>()
        .ok()
        .and_then(|x| x.hyphenate().ok())
        .map(|x| x.to_string())
        .unwrap_or_else(|| isbn.to_string())
}

pub fn render(book: &Book, config: &Config) -> String {
    let ebook = if book.is_ebook {
        config.output_ebook_true.format_str("Yes")
    } else {
        config.output_ebook_false.format_str("No")
    };
    [
        config.output_title.format_str(&book.title),
        config.output_isbn.format_str(hyphenated(&book.isbn)),
        ebook,
        config.output_year.format_str(book.year_published),
        config.output_edition.format_str(book.edition),
        config.output_author.format_vec(book.authors.iter()),
    ]
    .join("\n")
}

pub fn separator(config: &Config) -> String {
    let separator = &config.output_separator;
    separator.description.style(&separator.style_description)
}

pub fn error(e: &anyhow::Error, config: &Config) -> String {
    config.output_error.format_str(format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenates_valid_isbns_only() {
        assert_eq!(hyphenated("9780441013593"), "978-0-441-01359-3");
        assert_eq!(hyphenated("not an isbn"), "not an isbn");
    }
}
