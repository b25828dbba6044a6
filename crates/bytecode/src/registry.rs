//! Named rule streams and the full grammar listing.

use std::fmt;
use std::io;
use std::path::Path;

use common::debug::{create_logger, Logger};
use common::{log, log_fail, log_success};
use hashbrown::HashMap;

use crate::disasm::Disassembler;

/// Errors from building or persisting a rule listing.
#[derive(Debug)]
pub enum RegistryError {
    /// A rule with this name was already added
    DuplicateRule(String),
    /// IO error while writing the listing
    Io(io::Error),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateRule(name) => write!(f, "rule {} already defined", name),
            RegistryError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegistryError {
    fn from(e: io::Error) -> Self {
        RegistryError::Io(e)
    }
}

/// Rule storage in insertion order.
///
/// Rules are only ever appended; the listing always follows the order in
/// which they were added, never name order.
pub struct RuleRegistry {
    disasm: Disassembler,
    index: HashMap<String, usize>,
    rules: Vec<(String, Vec<u32>)>,
    log: Logger,
}

impl RuleRegistry {
    pub fn new(disasm: Disassembler) -> Self {
        Self {
            disasm,
            index: HashMap::new(),
            rules: Vec::new(),
            log: create_logger("registry"),
        }
    }

    /// Add a rule. Fails if `name` is taken, leaving the existing rule as is.
    pub fn add(&mut self, name: impl Into<String>, stream: Vec<u32>) -> Result<(), RegistryError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            log_fail!(self.log, "duplicate rule {}", name);
            return Err(RegistryError::DuplicateRule(name));
        }
        log!(self.log, "add rule {} ({} cells)", name, stream.len());
        self.index.insert(name.clone(), self.rules.len());
        self.rules.push((name, stream));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[u32]> {
        self.index.get(name).map(|&idx| self.rules[idx].1.as_slice())
    }

    /// Rule names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, stream)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> + '_ {
        self.rules.iter().map(|(name, stream)| (name.as_str(), stream.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn disassembler(&self) -> &Disassembler {
        &self.disasm
    }

    /// Render every rule as a `name:` header followed by its indented
    /// disassembly, with a blank line between rules.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for (name, stream) in &self.rules {
            parts.push(format!("{}:", name));
            parts.extend(self.disasm.decode(stream).iter().map(|line| line.indented(1)));
            parts.push(String::new());
        }
        parts.join("\n").trim_end().to_string()
    }

    /// Write [`render`](Self::render) to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        log!(self.log, "writing bytecodes to {}", path.display());
        std::fs::write(path, self.render())?;
        log_success!(self.log, "wrote {} rules to {}", self.rules.len(), path.display());
        Ok(())
    }
}
