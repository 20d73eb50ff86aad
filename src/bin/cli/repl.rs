use std::{
    fs,
    path::{Path, PathBuf},
};

use reedline::{
    ColumnarMenu, DefaultCompleter, Emacs, ExampleHighlighter, FileBackedHistory, KeyCode,
    KeyModifiers, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use tracing::debug;

use crate::prompt::BookshelfPrompt;

const HISTORY_SIZE: usize = 1000;
const COMPLETION_MENU: &str = "completion_menu";

/// Where the command history of the catalog at `data_file` is kept: beside it, named after it.
pub fn history_path(data_file: &Path) -> PathBuf {
    let stem = data_file
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bookshelf".into());
    data_file.with_file_name(format!(".{stem}_history"))
}

pub struct Repl {
    reedline: Reedline,
    prompt:   BookshelfPrompt,
}

impl Repl {
    pub fn new(commands: Vec<String>, history: &Path, prompt: BookshelfPrompt) -> anyhow::Result<Self> {
        if let Some(dir) = history.parent().filter(|x| !x.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        debug!(path = %history.display(), "using command history");
        let history = Box::new(FileBackedHistory::with_file(
            HISTORY_SIZE,
            history.to_path_buf(),
        )?);

        let mut keybindings = reedline::default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let reedline = Reedline::create()
            .with_history(history)
            .with_highlighter(Box::new(ExampleHighlighter::new(commands.clone())))
            .with_completer(Box::new(DefaultCompleter::new_with_wordlen(commands, 1)))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(
                ColumnarMenu::default().with_name(COMPLETION_MENU),
            )))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Repl { reedline, prompt })
    }

    /// Keep the prompt's book count in step with the catalog after adds.
    pub fn set_book_count(&mut self, books: usize) {
        self.prompt.books = books;
    }

    pub fn read_line(&mut self) -> anyhow::Result<Signal> {
        Ok(self.reedline.read_line(&self.prompt)?)
    }
}
