use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::equation::EquationParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquationLogError {
    Io(String),
}

impl fmt::Display for EquationLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for EquationLogError {}

#[derive(Debug, Clone)]
pub struct EquationLog {
    path: PathBuf,
}

impl EquationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, params: &EquationParams) -> Result<String, EquationLogError> {
        let code = params.to_code();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| EquationLogError::Io(e.to_string()))?;
            }
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| EquationLogError::Io(e.to_string()))?;
        writeln!(file, "{code}").map_err(|e| EquationLogError::Io(e.to_string()))?;
        Ok(code)
    }

    /// Saved codes in file order. A missing file is an empty log.
    pub fn codes(&self) -> Result<Vec<String>, EquationLogError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(v) => v,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(EquationLogError::Io(err.to_string())),
        };
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    pub fn last(&self) -> Result<Option<String>, EquationLogError> {
        Ok(self.codes()?.pop())
    }
}
