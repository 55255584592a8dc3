//! Addressable position: `talk.md#3` opens `talk.md` at slide 3.

use std::fmt;
use std::path::{Path, PathBuf};

/// A deck path plus an optional fragment identifier holding a 1-based slide
/// number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: PathBuf,
    fragment: Option<String>,
}

impl Location {
    /// Splits `arg` at its last `#` when a non-empty run of ASCII digits
    /// follows it. Otherwise the whole argument is taken as a path.
    pub fn parse(arg: &str) -> Self {
        if let Some((path, fragment)) = arg.rsplit_once('#') {
            let numeric = !fragment.is_empty() && fragment.bytes().all(|b| b.is_ascii_digit());
            if !path.is_empty() && numeric {
                return Self {
                    path: PathBuf::from(path),
                    fragment: Some(fragment.to_string()),
                };
            }
        }
        Self {
            path: PathBuf::from(arg),
            fragment: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// 0-based start index encoded in the fragment, if it names a slide in a
    /// deck of `total` slides.
    pub fn seed(&self, total: usize) -> Option<usize> {
        let number: usize = self.fragment.as_deref()?.parse().ok()?;
        (1..=total).contains(&number).then(|| number - 1)
    }

    /// Rewrites the fragment to point at the 0-based `index`.
    pub fn set_slide(&mut self, index: usize) {
        self.fragment = Some((index + 1).to_string());
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
