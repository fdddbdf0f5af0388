//! Where rows come from. Both sources hand a fully loaded
//! [`Library`](crate::library::Library) to the rest of the crate.

use std::{fmt::Display, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{config::Config, library::Library};

pub mod calibre;
pub mod goodreads;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Goodreads,
    Calibre,
}

impl Source {
    pub const NAMES: [&'static str; 2] = ["goodreads", "calibre"];

    pub fn load(self, config: &Config) -> Result<Library> {
        match self {
            Self::Goodreads => goodreads::load_path(&config.goodreads_export_path()),
            Self::Calibre => calibre::query(&config.calibre),
        }
    }
}

impl FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "goodreads" => Ok(Self::Goodreads),
            "calibre" => Ok(Self::Calibre),
            _ => bail!("Unknown source {s}, expected one of {}", Self::NAMES.join(", ")),
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goodreads => write!(f, "goodreads"),
            Self::Calibre => write!(f, "calibre"),
        }
    }
}
