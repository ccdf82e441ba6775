// Every variant carries the path it was working on.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    AssetLoad { path: String, reason: String },     // Font file missing or unreadable
    ConfigRead { path: String, reason: String },    // Settings file could not be read
    ConfigParse { path: String, reason: String },   // Settings file is not valid JSON
    ConfigInvalid { path: String, reason: String }, // Settings parse but make no sense
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AssetLoad { path, reason } => write!(f, "failed to load asset {path}: {reason}"),
            Error::ConfigRead { path, reason } => write!(f, "failed to read settings {path}: {reason}"),
            Error::ConfigParse { path, reason } => write!(f, "malformed settings in {path}: {reason}"),
            Error::ConfigInvalid { path, reason } => write!(f, "invalid settings in {path}: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
