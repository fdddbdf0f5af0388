use std::{borrow::Cow, process::Command};

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    config::CalibreConfig,
    library::Library,
    traits::{Field, RawRow},
};

/// One book object from `calibredb list --for-machine`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibreRow<'c> {
    pub values: Map<String, Value>,
    pub config: &'c CalibreConfig,
}

impl CalibreRow<'_> {
    fn key(&self, field: Field) -> Option<&str> {
        Some(match field {
            Field::BookId => "id",
            Field::Title => "title",
            Field::Author => "authors",
            Field::Isbn => "isbn",
            Field::Publisher => "publisher",
            Field::Series => "series",
            Field::SeriesIndex => "series_index",
            Field::Read => self.config.read_column.as_str(),
            Field::Archived => self.config.archived_column.as_str(),
            _ => return None,
        })
    }
}

impl RawRow for CalibreRow<'_> {
    fn get_raw(&self, field: Field) -> Option<Cow<'_, str>> {
        match self.values.get(self.key(field)?)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            Value::Bool(false) => Some(Cow::Borrowed("false")),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Array(values) => Some(Cow::Owned(
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" & "),
            )),
            Value::Object(_) => None,
        }
    }

    fn has_series_fields(&self) -> bool {
        true
    }
}

/// Columns requested from calibre.
pub fn fields(config: &CalibreConfig) -> String {
    format!(
        "title,authors,series,series_index,{},{}",
        config.read_column, config.archived_column
    )
}

/// Arguments passed to `calibredb`.
pub fn arguments(config: &CalibreConfig) -> Result<Vec<String>> {
    let mut args = vec!["list".to_string()];
    if let Some(library) = &config.library {
        args.push(format!("--with-library={library}"));
    }
    if let Some(username) = &config.username {
        args.push(format!("--username={username}"));
    }
    if let Some(password) = &config.password {
        args.push(format!("--password={password}"));
    }
    args.push(format!("--fields={}", fields(config)));
    args.push("--search=series:true".to_string());
    args.push("--for-machine".to_string());
    let extra = shlex::split(&config.extra_args)
        .ok_or_else(|| anyhow!("Invalid calibre extra_args: {}", config.extra_args))?;
    args.extend(extra);
    Ok(args)
}

fn redacted(args: &[String]) -> String {
    args.iter()
        .map(|x| {
            if x.starts_with("--password=") {
                "--password=***".to_string()
            } else {
                x.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Asks `calibredb` for every book in a series.
pub fn query(config: &CalibreConfig) -> Result<Library> {
    let args = arguments(config)?;
    debug!("Running {} {}", config.calibredb.display(), redacted(&args));
    let output = Command::new(&config.calibredb)
        .args(&args)
        .output()
        .with_context(|| format!("Couldn't run {}", config.calibredb.display()))?;
    if !output.status.success() {
        bail!(
            "{} exited with {}: {}",
            config.calibredb.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let json = String::from_utf8(output.stdout).context("calibredb output isn't valid utf-8")?;
    parse(&json, config)
}

/// Builds a library from the JSON array `calibredb list --for-machine` prints.
pub fn parse(json: &str, config: &CalibreConfig) -> Result<Library> {
    let de = &mut serde_json::Deserializer::from_str(json);
    let books: Vec<Map<String, Value>> =
        serde_path_to_error::deserialize(de).context("Couldn't parse calibredb output")?;
    let rows = books
        .into_iter()
        .map(|values| CalibreRow { values, config })
        .collect::<Vec<_>>();
    let library = Library::from_rows(&rows);
    info!("Loaded {} books from calibre.", library.len());
    Ok(library)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_values_are_rendered() {
        let config = CalibreConfig::default();
        let json = r#"[{"id": 7, "title": "Dune", "authors": "Frank Herbert", "series": "Dune",
                        "series_index": 1.0, "*read": true, "*archived": null}]"#;
        let library = parse(json, &config).unwrap();
        let book = &library.books()[0];
        assert_eq!(book.book_id.as_deref(), Some("7"));
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.series.as_deref(), Some("Dune"));
        assert_eq!(book.series_index, Some(1.0));
        assert!(book.read);
        assert!(!book.archived);
    }

    #[test]
    fn custom_columns_follow_config() {
        let config = CalibreConfig {
            read_column: "#finished".into(),
            archived_column: "#hidden".into(),
            ..CalibreConfig::default()
        };
        let json = r##"[{"title": "Dune", "series": "Dune", "#finished": true, "#hidden": true,
                         "*read": false}]"##;
        let book = parse(json, &config).unwrap().books()[0].clone();
        assert!(book.read);
        assert!(book.archived);
    }

    #[test]
    fn bad_json_names_the_path() {
        let err = parse(r#"[{"title": "Dune"}, 3]"#, &CalibreConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("[1]"));
    }

    #[test]
    fn password_is_redacted() {
        let config = CalibreConfig {
            library: Some("http://localhost:8080/#books".into()),
            username: Some("me".into()),
            password: Some("hunter2".into()),
            extra_args: "--limit 10".into(),
            ..CalibreConfig::default()
        };
        let args = arguments(&config).unwrap();
        assert_eq!(args.last().map(String::as_str), Some("10"));
        let fields = "--fields=title,authors,series,series_index,*read,*archived";
        assert!(args.iter().any(|x| x == fields));
        let shown = redacted(&args);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("--password=***"));
    }
}
