pub mod author;
pub mod book;
pub(crate) mod prompt;
