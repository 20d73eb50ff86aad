use clap::{Arg, ArgAction, Command};

fn arg_isbn() -> Arg {
    Arg::new("isbn").required(true).help("ISBN of the book")
}

fn arg_output() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Write to this file instead of stdout")
}

pub fn arg_parser() -> Command {
    Command::new("bookshelf")
        .about("Personal book catalog")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List books in catalog order")
                .subcommand_required(true)
                .subcommand(Command::new("all").about("Every book"))
                .subcommand(Command::new("ebooks").about("eBooks only"))
                .subcommand(Command::new("physical").about("Books that are not eBooks"))
                .subcommand(
                    Command::new("author")
                        .about("Books by an author")
                        .arg(Arg::new("name").required(true).num_args(1..))
                        .arg(
                            Arg::new("contains")
                                .long("contains")
                                .action(ArgAction::SetTrue)
                                .help("Match part of the name instead of a whole name"),
                        ),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single book")
                .arg(arg_isbn()),
        )
        .subcommand(Command::new("add").about("Add a book"))
        .subcommand(
            Command::new("edit")
                .about("Edit title, eBook flag or year of a book")
                .arg(arg_isbn()),
        )
        .subcommand(
            Command::new("export")
                .about("Export the catalog")
                .subcommand_required(true)
                .subcommand(
                    Command::new("goodreads")
                        .about("Goodreads compatible CSV")
                        .arg(arg_output()),
                )
                .subcommand(
                    Command::new("json")
                        .about("JSON snapshot")
                        .arg(arg_output()),
                ),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn arg_parser_repl() -> Command {
    arg_parser().subcommand(Command::new("exit").about("Leave the read eval print loop"))
}

pub fn arg_parser_cli() -> Command {
    arg_parser().subcommand(Command::new("repl").about("Launch a read eval print loop"))
}

pub fn generate_completions() -> Vec<String> {
    let cmd = arg_parser_repl();
    fn add_command(parent_fn_name: &str, cmd: &Command, subcmds: &mut Vec<String>) {
        let fn_name = format!(
            "{parent_fn_name} {cmd_name}",
            parent_fn_name = parent_fn_name,
            cmd_name = cmd.get_name()
        )
        .trim()
        .to_string();
        subcmds.push(fn_name.clone());
        for subcmd in cmd.get_subcommands() {
            add_command(&fn_name, subcmd, subcmds);
        }
    }
    let mut subcmds = vec![];
    for subcmd in cmd.get_subcommands() {
        add_command("", subcmd, &mut subcmds);
    }
    subcmds.sort();
    subcmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_is_consistent() {
        arg_parser_cli().debug_assert();
        arg_parser_repl().debug_assert();
    }

    #[test]
    fn author_name_may_span_words() {
        let matches = arg_parser_repl()
            .try_get_matches_from(["list", "author", "Frank", "Herbert", "--contains"])
            .unwrap();
        let (_, list) = matches.subcommand().unwrap();
        let (_, author) = list.subcommand().unwrap();
        let name = author
            .get_many::<String>("name")
            .unwrap()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(name, ["Frank", "Herbert"]);
        assert!(author.get_flag("contains"));
    }

    #[test]
    fn completions_cover_nested_commands() {
        let completions = generate_completions();
        assert!(completions.contains(&"list ebooks".to_string()));
        assert!(completions.contains(&"export json".to_string()));
        assert!(completions.contains(&"exit".to_string()));
    }
}
