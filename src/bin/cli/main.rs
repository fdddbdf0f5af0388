use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::ArgMatches;
use tracing::{debug, Level};

mod command_parser;

use nextvolume::{
    config::Config,
    library::{newest_first, Library},
    report,
    source::Source,
};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load(matches: &ArgMatches, config: &Config) -> Result<Library> {
    let source = matches
        .get_one::<String>("source")
        .map(|x| x.parse::<Source>())
        .transpose()?
        .unwrap_or_default();
    debug!("Loading library from {source}.");
    match (source, matches.get_one::<PathBuf>("file")) {
        (Source::Goodreads, Some(path)) => {
            nextvolume::source::goodreads::load_path(&shellexpand::path::tilde(path))
        }
        (source, Some(_)) => bail!("--file only applies to the goodreads source, not {source}"),
        (source, None) => source.load(config),
    }
}

fn handle_command(matches: &ArgMatches, config: &Config) -> Result<String> {
    let today = chrono::Local::now().date_naive();
    if let Some(("config", _)) = matches.subcommand() {
        return Config::default_as_string();
    }
    let library = load(matches, config)?;
    let out = match matches.subcommand() {
        None => report::unfinished_series(&library.incomplete_series(), config),
        Some(("series", sub)) => {
            let summaries = library.incomplete_series();
            if sub.get_flag("json") {
                serde_json::to_string_pretty(&summaries)?
            } else {
                report::unfinished_series(&summaries, config)
            }
        }
        Some(("series-books", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or_default();
            report::book_list(name, &library.series_books(name), today, config)
        }
        Some(("read", sub)) => {
            let limit = sub.get_one::<usize>("limit").copied();
            let books = match (sub.get_one::<i32>("year"), sub.get_one::<u32>("days")) {
                (Some(year), _) => newest_first(library.read_in_year(*year), limit),
                (None, Some(days)) => newest_first(library.read_in_period(*days, today), limit),
                (None, None) => library.read_books(limit, true),
            };
            report::book_list("READ", &books, today, config)
        }
        Some(("added", sub)) => {
            let days = sub.get_one::<u32>("days").copied().unwrap_or(30);
            report::book_list("ADDED", &library.added_in_period(days, today), today, config)
        }
        Some(("tbr", _)) => report::book_list("TO READ", &library.tbr_books(), today, config),
        Some(("reading", _)) => {
            report::book_list("CURRENTLY READING", &library.currently_reading(), today, config)
        }
        Some(("shelf", sub)) => {
            let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or_default();
            report::book_list(name, &library.books_by_shelf(name), today, config)
        }
        Some(("authors", _)) => report::author_stats(&library.author_stats(), config),
        Some(("ratings", _)) => report::rating_distribution(&library.rating_distribution(), config),
        Some((name, _)) => unreachable!("unknown subcommand {}", name),
    };
    Ok(out)
}

fn main() -> Result<()> {
    let matches = command_parser::arg_parser().get_matches();
    init_logging(matches.get_count("verbose"));

    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let config = Config::read_config()?;

    print!("{}", handle_command(&matches, &config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_is_rejected_for_calibre() {
        let matches = command_parser::arg_parser()
            .try_get_matches_from(["nextvolume", "--source", "calibre", "--file", "export.csv"])
            .unwrap();
        let err = load(&matches, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--file"));
    }
}
