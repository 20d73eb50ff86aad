pub mod catalog;
pub mod codec;
pub mod config;
pub mod default_colors;
pub mod error;
pub mod export;
pub mod format;
pub mod query;
pub mod traits;
pub mod types;

pub use catalog::Catalog;
pub use error::{CatalogError, DecodeError, EncodeError, FormatError};
pub use format::{Layout, LineFormat};
pub use types::{
    author::{Author, Authors},
    book::{Book, BookPatch},
};
