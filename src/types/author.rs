use std::{fmt::Display, ops::Deref};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{
    error::CatalogError,
    format::LineFormat,
    traits::CreateByPrompt,
    types::prompt::{prompt_number, prompt_text, validator_field},
};

/// Upper bound on the authors attached to one book.
pub const MAX_AUTHORS: usize = 3;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub family_name: String,
    /// Empty for authors read from a single-name layout, whose whole name lives in `family_name`.
    pub first_name:  String,
    pub nationality: String,
    pub birth_year:  i32,
}

impl Author {
    pub fn new(
        family_name: impl Into<String>,
        first_name: impl Into<String>,
        nationality: impl Into<String>,
        birth_year: i32,
    ) -> Self {
        Self {
            family_name: family_name.into(),
            first_name: first_name.into(),
            nationality: nationality.into(),
            birth_year,
        }
    }

    pub fn single_name(name: impl Into<String>, nationality: impl Into<String>, birth_year: i32) -> Self {
        Self::new(name, "", nationality, birth_year)
    }

    /// First and family name joined by a space, or just the family name.
    pub fn full_name(&self) -> String {
        if self.first_name.is_empty() {
            self.family_name.clone()
        } else {
            format!("{} {}", self.first_name, self.family_name)
        }
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.full_name(),
            self.nationality,
            self.birth_year
        )
    }
}

/// The authors of a book: a dense list of at most [`MAX_AUTHORS`] entries.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Author>", into = "Vec<Author>")]
pub struct Authors(Vec<Author>);

impl Authors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Built by the codec, which never reads more than [`MAX_AUTHORS`] slots.
    pub(crate) fn from_slots(authors: Vec<Author>) -> Self {
        debug_assert!(authors.len() <= MAX_AUTHORS);
        Self(authors)
    }

    pub fn push(&mut self, author: Author) -> Result<(), CatalogError> {
        if self.is_full() {
            return Err(CatalogError::TooManyAuthors { max: MAX_AUTHORS });
        }
        self.0.push(author);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_AUTHORS
    }

    pub fn as_slice(&self) -> &[Author] {
        &self.0
    }
}

impl Deref for Authors {
    type Target = [Author];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Authors {
    type Item = &'a Author;
    type IntoIter = std::slice::Iter<'a, Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Author>> for Authors {
    type Error = CatalogError;

    fn try_from(authors: Vec<Author>) -> Result<Self, Self::Error> {
        if authors.len() > MAX_AUTHORS {
            return Err(CatalogError::TooManyAuthors { max: MAX_AUTHORS });
        }
        Ok(Self(authors))
    }
}

impl From<Authors> for Vec<Author> {
    fn from(authors: Authors) -> Self {
        authors.0
    }
}

impl Display for Authors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut i = self.0.iter().peekable();
        while let Some(author) = i.next() {
            write!(f, "{author}")?;
            if i.peek().is_some() {
                write!(f, "; ")?;
            }
        }
        Ok(())
    }
}

impl CreateByPrompt for Authors {
    fn create_by_prompt(format: &LineFormat) -> Result<Self> {
        let delimiter = format.delimiter();
        let mut authors = Self::new();
        while !authors.is_full() {
            let name_prompt = if format.layout.stores_first_name() {
                "What is the author's family name? (leave empty to finish)"
            } else {
                "What is the author's name? (leave empty to finish)"
            };
            let family_name = inquire::Text::new(name_prompt)
                .with_validator(validator_field(delimiter))
                .prompt_skippable()?
                .filter(|x| !x.trim().is_empty());
            let Some(family_name) = family_name else {
                break;
            };
            let first_name = if format.layout.stores_first_name() {
                inquire::Text::new("What is the author's first name?")
                    .with_validator(validator_field(delimiter))
                    .prompt()?
            } else {
                String::new()
            };
            let nationality = prompt_text("What is the author's nationality?", delimiter)?;
            let birth_year = prompt_number("When was the author born?", None)?;
            authors.push(Author {
                family_name,
                first_name,
                nationality,
                birth_year,
            })?;
        }
        Ok(authors)
    }
}
