use std::fmt::Display;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{
    format::LineFormat,
    traits::{CreateByPrompt, UpdateByPrompt},
    types::{
        author::Authors,
        prompt::{prompt_number, prompt_number_skippable, prompt_text, validator_field},
    },
};

/// Edition assumed when a layout does not store one.
pub const DEFAULT_EDITION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title:          String,
    pub isbn:           String,
    pub is_ebook:       bool,
    pub year_published: i32,
    pub edition:        i32,
    pub authors:        Authors,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        isbn: impl Into<String>,
        is_ebook: bool,
        year_published: i32,
    ) -> Self {
        Self {
            title: title.into(),
            isbn: isbn.into(),
            is_ebook,
            year_published,
            edition: DEFAULT_EDITION,
            authors: Authors::new(),
        }
    }

    pub fn with_edition(mut self, edition: i32) -> Self {
        self.edition = edition;
        self
    }

    pub fn with_authors(mut self, authors: Authors) -> Self {
        self.authors = authors;
        self
    }

    /// Overwrite every field the patch carries; the rest stay untouched.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(is_ebook) = patch.is_ebook {
            self.is_ebook = is_ebook;
        }
        if let Some(year_published) = patch.year_published {
            self.year_published = year_published;
        }
        if let Some(authors) = patch.authors {
            self.authors = authors;
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new("", "", false, 0)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "ISBN: {}", self.isbn)?;
        writeln!(f, "eBook: {}", if self.is_ebook { "Yes" } else { "No" })?;
        writeln!(f, "Year Published: {}", self.year_published)?;
        writeln!(f, "Edition: {}", self.edition)?;
        write!(f, "Authors: {}", self.authors)
    }
}

/// Fields to overwrite on an existing [`Book`]. `None` means "leave unchanged".
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BookPatch {
    pub title:          Option<String>,
    pub is_ebook:       Option<bool>,
    pub year_published: Option<i32>,
    pub authors:        Option<Authors>,
}

impl BookPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_ebook(mut self, is_ebook: bool) -> Self {
        self.is_ebook = Some(is_ebook);
        self
    }

    pub fn year_published(mut self, year_published: i32) -> Self {
        self.year_published = Some(year_published);
        self
    }

    pub fn authors(mut self, authors: Authors) -> Self {
        self.authors = Some(authors);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.is_ebook.is_none()
            && self.year_published.is_none()
            && self.authors.is_none()
    }
}

impl CreateByPrompt for Book {
    fn create_by_prompt(format: &LineFormat) -> Result<Self> {
        let delimiter = format.delimiter();
        let title = prompt_text("What is the title of the book?", delimiter)?;
        let isbn = prompt_text("What is the ISBN of the book?", delimiter)?;
        let is_ebook = inquire::Confirm::new("Is this an eBook?")
            .with_default(false)
            .prompt()?;
        let year_published = prompt_number("What year was it published?", None)?;
        let edition = if format.layout.stores_edition() {
            prompt_number("Which edition is it?", Some(DEFAULT_EDITION))?
        } else {
            DEFAULT_EDITION
        };
        let authors = Authors::create_by_prompt(format)?;
        if !inquire::Confirm::new("Add book?")
            .with_default(true)
            .prompt()?
        {
            anyhow::bail!("Aborted");
        };

        Ok(Self {
            title,
            isbn,
            is_ebook,
            year_published,
            edition,
            authors,
        })
    }
}

impl UpdateByPrompt for Book {
    type Patch = BookPatch;

    fn update_by_prompt(&self, format: &LineFormat) -> Result<BookPatch> {
        let title = inquire::Text::new("Change title to: (leave empty to keep)")
            .with_validator(validator_field(format.delimiter()))
            .prompt_skippable()?
            .filter(|x| !x.trim().is_empty());
        let is_ebook = inquire::Confirm::new("Is this an eBook?")
            .with_default(self.is_ebook)
            .prompt_skippable()?
            .filter(|x| *x != self.is_ebook);
        let year_published = prompt_number_skippable(
            "Change year published to: (leave empty to keep)",
        )?;

        Ok(BookPatch {
            title,
            is_ebook,
            year_published,
            authors: None,
        })
    }
}
