use std::borrow::Cow;

use bookshelf::Layout;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Shows the active layout and how many books are loaded, with the data file on the right.
pub struct BookshelfPrompt {
    pub layout: Layout,
    pub books:  usize,
    pub file:   String,
}

impl BookshelfPrompt {
    fn summary(&self) -> String {
        let noun = if self.books == 1 { "book" } else { "books" };
        format!("bookshelf [{} | {} {}] ", self.layout.name(), self.books, noun)
    }
}

impl Prompt for BookshelfPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Owned(self.summary())
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed(&self.file)
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        match prompt_mode {
            PromptEditMode::Custom(mode) => format!("({mode}) ").into(),
            _ => "> ".into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("… ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        match history_search.status {
            PromptHistorySearchStatus::Passing => format!("(search: {}) ", history_search.term),
            PromptHistorySearchStatus::Failing => {
                format!("(failing search: {}) ", history_search.term)
            }
        }
        .into()
    }
}
