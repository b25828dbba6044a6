//! Free-form listing builder.
//!
//! Collects lines at an indentation level, with helpers for raw opcode lines
//! and bannered code sections.

use std::io;
use std::path::Path;

use common::debug::{create_logger, Logger};
use common::log;
use common::text::centered;

use crate::disasm::INDENT;

/// Width of `out_code` banners.
pub const BANNER_WIDTH: usize = 34;

pub struct OpDumper {
    name: String,
    level: usize,
    lines: Vec<String>,
    log: Logger,
}

impl OpDumper {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 0,
            lines: Vec::new(),
            log: create_logger("dumper"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn inc_level(&mut self) {
        self.level += 1;
    }

    pub fn dec_level(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn out(&mut self, text: &str) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.level), text));
    }

    /// `OPCODES: 1 2 3`
    pub fn out_bytecodes(&mut self, stream: &[u32]) {
        let cells: Vec<String> = stream.iter().map(u32::to_string).collect();
        self.out(&format!("OPCODES: {}", cells.join(" ")));
    }

    /// Emit `lines` between a centered `label` banner and a closing rule.
    pub fn out_code<S: AsRef<str>>(&mut self, lines: &[S], label: Option<&str>) {
        let label = label.filter(|l| !l.is_empty()).unwrap_or("UNKNOWN");
        self.out(&centered(label, BANNER_WIDTH, '-', 2));
        for line in lines {
            self.out(line.as_ref());
        }
        self.out(&"-".repeat(BANNER_WIDTH));
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        log!(self.log, "writing opcodes for {} to {}", self.name, path.display());
        std::fs::write(path, self.contents())
    }
}
