use clap::{value_parser, Arg, ArgAction, Command};
use nextvolume::source::Source;

pub fn arg_parser() -> Command {
    Command::new("nextvolume")
        .about("Find the series you started and the book to read next")
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .global(true)
                .value_parser(Source::NAMES)
                .default_value("goodreads")
                .help("Where to read the library from"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Goodreads export to read instead of the configured one"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more, repeat for even more"),
        )
        .subcommand(
            Command::new("series")
                .about("List unfinished series with the next unread book (default)")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the summaries as JSON"),
                ),
        )
        .subcommand(
            Command::new("series-books")
                .about("List every book of one series in reading order")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("read")
                .about("List read books, most recent first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .conflicts_with("days"),
                )
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("added")
                .about("List books added in the last days")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32))
                        .default_value("30"),
                ),
        )
        .subcommand(Command::new("tbr").about("List the to-read shelf"))
        .subcommand(Command::new("reading").about("List books currently being read"))
        .subcommand(
            Command::new("shelf")
                .about("List books on a shelf")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("authors").about("Most read authors"))
        .subcommand(Command::new("ratings").about("How read books were rated"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}
