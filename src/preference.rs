//!
//! The persisted wrap preference.
//!
//! The preference lives in a single key-value slot. Reads go through [`PreferenceStore::get`],
//! which reports an absent or unrecognised value as unset (`None`). Writes only ever happen
//! in response to an explicit "remember" choice or a reset.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use toml_edit::{DocumentMut, value};

/// Storage key of the preference slot.
pub const PREFERENCE_KEY: &str = "clarion_code_wrap";

/// File name of the durable store inside the user config directory.
pub const PREFERENCE_FILE_NAME: &str = "preferences.toml";

/// A remembered answer to "wrap this paste?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapPreference {
    Always,
    Never,
}

impl WrapPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            WrapPreference::Always => "always",
            WrapPreference::Never => "never",
        }
    }

    /// The preference that remembers a yes/no answer.
    pub fn from_choice(should_wrap: bool) -> Self {
        if should_wrap {
            WrapPreference::Always
        } else {
            WrapPreference::Never
        }
    }

    /// Interpret a raw stored value. Anything unrecognised is treated as unset.
    pub fn from_stored(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match raw.parse() {
            Ok(pref) => Some(pref),
            Err(e) => {
                log::warn!("Ignoring stored wrap preference: {e}");
                None
            }
        }
    }
}

impl fmt::Display for WrapPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapPreference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(WrapPreference::Always),
            "never" => Ok(WrapPreference::Never),
            other => Err(PreferenceError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Invalid wrap preference '{0}' (expected 'always' or 'never')")]
    InvalidValue(String),
    #[error("Failed to access preference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse preference file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml_edit::TomlError,
    },
}

/// A single durable preference slot
pub trait PreferenceStore {
    /// Current preference; `None` when unset or unreadable
    fn get(&self) -> Option<WrapPreference>;

    /// Replace any stored preference
    fn set(&self, value: WrapPreference) -> Result<(), PreferenceError>;

    /// Delete the stored preference
    fn clear(&self) -> Result<(), PreferenceError>;
}

/// In-process store holding the raw slot value
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    slot: RefCell<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary raw slot value, as another writer may have left it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> Option<WrapPreference> {
        WrapPreference::from_stored(self.slot.borrow().as_deref())
    }

    fn set(&self, value: WrapPreference) -> Result<(), PreferenceError> {
        *self.slot.borrow_mut() = Some(value.as_str().to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), PreferenceError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// Durable store backed by a TOML file.
///
/// Only [`PREFERENCE_KEY`] is read or written; other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform user config directory, if one can be determined.
    pub fn in_user_config_dir() -> Option<Self> {
        use etcetera::{BaseStrategy, choose_base_strategy};

        match choose_base_strategy() {
            Ok(strategy) => Some(Self::new(
                strategy.config_dir().join("clarion-fence").join(PREFERENCE_FILE_NAME),
            )),
            Err(e) => {
                log::debug!("[clarion-fence] Failed to determine user config directory: {e}");
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Load the document, or `None` if the file does not exist.
    fn load(&self) -> Result<Option<DocumentMut>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path_str(),
                    source,
                });
            }
        };
        content
            .parse::<DocumentMut>()
            .map(Some)
            .map_err(|source| PreferenceError::Parse {
                path: self.path_str(),
                source,
            })
    }

    fn save(&self, doc: &DocumentMut) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path_str(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, doc.to_string()).map_err(io_err)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self) -> Option<WrapPreference> {
        match self.load() {
            Ok(Some(doc)) => WrapPreference::from_stored(doc.get(PREFERENCE_KEY).and_then(|item| item.as_str())),
            Ok(None) => None,
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    fn set(&self, pref: WrapPreference) -> Result<(), PreferenceError> {
        // An unparseable file is replaced rather than blocking the write
        let mut doc = match self.load() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(PreferenceError::Parse { .. }) => DocumentMut::new(),
            Err(e) => return Err(e),
        };
        doc[PREFERENCE_KEY] = value(pref.as_str());
        self.save(&doc)?;
        log::debug!("[clarion-fence] Saved wrap preference '{pref}' to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), PreferenceError> {
        let Some(mut doc) = self.load()? else {
            return Ok(());
        };
        if doc.remove(PREFERENCE_KEY).is_some() {
            self.save(&doc)?;
            log::debug!("[clarion-fence] Cleared wrap preference in {}", self.path.display());
        }
        Ok(())
    }
}
