use std::{env, fs::File, io, path::PathBuf, process::exit};

use anyhow::Result;
use clap::ArgMatches;
use reedline::Signal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod command_parser;
mod display;
mod prompt;
mod repl;

use bookshelf::{
    config::Config,
    export::{export_json, Export},
    query::Selection,
    traits::*,
    Book, Catalog, LineFormat,
};

/// Everything a command needs: the configuration and the catalog loaded from disk.
struct Session {
    config:  Config,
    format:  LineFormat,
    path:    PathBuf,
    catalog: Catalog,
}

impl Session {
    fn open() -> Result<Self> {
        let config = Config::read_config()?;
        let format = config.format.line_format()?;
        let path = config.data_path()?;
        let catalog = Catalog::open_or_default(&path, &format)?;
        Ok(Self {
            config,
            format,
            path,
            catalog,
        })
    }

    fn save(&self) -> Result<()> {
        self.catalog.save(&self.path, &self.format)?;
        Ok(())
    }

    fn print_books<'a>(&self, books: impl Iterator<Item = &'a Book>) {
        let mut count = 0;
        for book in books {
            println!("{}", display::render(book, &self.config));
            println!("{}", display::separator(&self.config));
            count += 1;
        }
        if count == 0 {
            println!("No books found.");
        }
    }
}

fn selection(matches: &ArgMatches) -> Selection {
    match matches.subcommand() {
        Some(("ebooks", _)) => Selection::Ebooks,
        Some(("physical", _)) => Selection::Physical,
        Some(("author", matches)) => Selection::Author {
            name:  matches
                .get_many::<String>("name")
                .map(|x| x.map(|x| x.trim()).collect::<Vec<_>>().join(" "))
                .unwrap_or_default(),
            exact: !matches.get_flag("contains"),
        },
        _ => Selection::All,
    }
}

fn isbn(matches: &ArgMatches) -> Result<&str> {
    match matches.get_one::<String>("isbn") {
        Some(isbn) => Ok(isbn),
        None => anyhow::bail!("ISBN required"),
    }
}

fn export_writer(matches: &ArgMatches) -> Result<Box<dyn io::Write>> {
    Ok(match matches.get_one::<String>("output") {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}

fn handle_command(command: String, session: &mut Session) -> Result<()> {
    let args = command_parser::arg_parser_repl();
    let command = match shlex::split(&command) {
        Some(command) => command,
        None => anyhow::bail!("Invalid command"),
    };
    let matches = args.try_get_matches_from(command)?;
    match matches.subcommand() {
        Some(("list", matches)) => {
            let selection = selection(matches);
            debug!(?selection, "listing books");
            session.print_books(session.catalog.select(&selection));
        }
        Some(("show", matches)) => {
            let book = session.catalog.find_by_isbn(isbn(matches)?)?;
            println!("{}", display::render(book, &session.config));
        }
        Some(("add", _)) => {
            let book = Book::create_by_prompt(&session.format)?;
            if session.config.unique_isbn {
                session.catalog.try_append(book)?;
            } else {
                session.catalog.append(book);
            }
            session.save()?;
            println!("Book added successfully.");
        }
        Some(("edit", matches)) => {
            let isbn = isbn(matches)?;
            let book = session.catalog.find_by_isbn(isbn)?;
            println!("Editing book:\n{}", display::render(book, &session.config));
            let patch = book.update_by_prompt(&session.format)?;
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            session.catalog.update_fields(isbn, patch)?;
            session.save()?;
            println!("Book updated successfully.");
        }
        Some(("export", matches)) => match matches.subcommand() {
            Some(("goodreads", matches)) => {
                Export::export(Export::new(&session.catalog), export_writer(matches)?)?;
            }
            Some(("json", matches)) => {
                export_json(&session.catalog, export_writer(matches)?)?;
            }
            Some((name, _matches)) => unimplemented!("{}", name),
            None => unreachable!("subcommand required"),
        },
        Some(("config", _)) => {
            println!("{}", Config::default_as_string()?);
        }
        Some(("exit", _)) => {
            println!("Goodbye!");
            exit(0);
        }
        Some((name, _matches)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(())
}

/// Logs go to stderr so they never mix with listings on stdout.
fn initialize_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_repl(session: &mut Session) -> Result<()> {
    let prompt = prompt::BookshelfPrompt {
        layout: session.format.layout,
        books:  session.catalog.len(),
        file:   session
            .path
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let mut repl = repl::Repl::new(
        command_parser::generate_completions(),
        &repl::history_path(&session.path),
        prompt,
    )?;
    loop {
        repl.set_book_count(session.catalog.len());
        match repl.read_line() {
            Ok(Signal::Success(buffer)) => {
                if buffer.trim().is_empty() {
                    continue;
                }
                if let Err(e) = handle_command(buffer, session) {
                    println!("{}", display::error(&e, &session.config));
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("\nAborted!");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let args = env::args().skip(1).collect::<Vec<String>>();
    let mut session = Session::open()?;
    info!(path = %session.path.display(), books = session.catalog.len(), "session ready");

    if args.is_empty() {
        return run_repl(&mut session);
    }
    let args_parsed = command_parser::arg_parser_cli().try_get_matches_from(&args)?;
    if let Some(("repl", _)) = args_parsed.subcommand() {
        run_repl(&mut session)
    } else {
        handle_command(shlex::join(args.iter().map(String::as_str)), &mut session)
    }
}
