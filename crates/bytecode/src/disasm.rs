//! Recursive disassembler for parser bytecode.
//!
//! Blocks are length-prefixed sub-streams, so a listing is rebuilt by decoding
//! each block slice recursively one level deeper. The cursor only ever moves
//! forward and every block length is clamped to the data that is actually
//! there, which bounds the work by the stream length even on garbage input.

use std::fmt;

use common::debug::{create_logger, Logger};
use common::{log_detail, log_fail};

use crate::instruction::{self, OpInfo};
use crate::symbols::{SymbolResolver, SymbolTables};

/// Indentation per nesting level.
pub const INDENT: &str = "  ";

/// Deepest block nesting that is decoded. Anything below renders as
/// [`ELIDED`].
pub const MAX_DEPTH: usize = 256;

/// Stand-in line for blocks nested past [`MAX_DEPTH`].
pub const ELIDED: &str = "...";

/// Disassembly options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisasmOptions {
    /// Prefix opcodes and arguments with their raw values.
    pub detailed: bool,
}

/// One rendered listing line and its nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Self { depth, text: text.into() }
    }

    /// Render with `extra` additional levels of indentation.
    pub fn indented(&self, extra: usize) -> String {
        format!("{}{}", INDENT.repeat(self.depth + extra), self.text)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", INDENT.repeat(self.depth), self.text)
    }
}

/// Join lines with `\n`, indenting every line by `extra` further levels.
pub fn render_lines(lines: &[Line], extra: usize) -> String {
    lines
        .iter()
        .map(|line| line.indented(extra))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bytecode disassembler.
///
/// Decoding borrows the disassembler immutably, so one instance can serve any
/// number of streams, including from several threads.
pub struct Disassembler {
    resolver: SymbolResolver,
    log: Logger,
}

impl Disassembler {
    pub fn new(symbols: SymbolTables, options: DisasmOptions) -> Self {
        Self::with_resolver(SymbolResolver::new(symbols, options.detailed))
    }

    pub fn with_resolver(resolver: SymbolResolver) -> Self {
        Self { resolver, log: create_logger("disasm") }
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    /// Decode a whole stream into depth-annotated lines.
    pub fn decode(&self, stream: &[u32]) -> Vec<Line> {
        let mut lines = Vec::new();
        self.decode_into(stream, 0, &mut lines);
        lines
    }

    /// Decode and render a stream, two spaces per nesting level.
    pub fn render(&self, stream: &[u32]) -> String {
        render_lines(&self.decode(stream), 0)
    }

    fn decode_into(&self, stream: &[u32], depth: usize, out: &mut Vec<Line>) {
        if depth > MAX_DEPTH {
            if !stream.is_empty() {
                log_fail!(self.log, "block nested past depth {}, {} cells elided", MAX_DEPTH, stream.len());
                out.push(Line::new(depth, ELIDED));
            }
            return;
        }

        let mut pc = 0;
        while pc < stream.len() {
            let code = stream[pc];
            pc += 1;

            let info = match instruction::lookup(code) {
                Some(info) => info,
                None => {
                    log_fail!(self.log, "unknown opcode {} at {}", code, pc - 1);
                    out.push(Line::new(depth, format!("OPCODE {}", code)));
                    continue;
                }
            };

            log_detail!(self.log, "{} at {}", info.name, pc - 1);
            let args_end = pc.saturating_add(info.args.len()).min(stream.len());
            out.push(Line::new(depth, self.instruction_text(info, &stream[pc..args_end])));
            pc = args_end;

            for &label in info.blocks {
                let len = match stream.get(pc) {
                    Some(&len) => len,
                    None => {
                        log_fail!(self.log, "{}: missing {} block length", info.name, label.as_str());
                        break;
                    }
                };
                pc += 1;

                let end = pc.saturating_add(len as usize).min(stream.len());
                if end - pc < len as usize {
                    log_fail!(
                        self.log,
                        "{}: {} block of {} clamped to {}",
                        info.name,
                        label.as_str(),
                        len,
                        end - pc
                    );
                }

                if let Some(marker) = label.marker((end - pc) as u32) {
                    out.push(Line::new(depth, marker));
                }
                self.log.push_indent();
                self.decode_into(&stream[pc..end], depth + 1, out);
                self.log.pop_indent();
                pc = end;
            }
        }
    }

    fn instruction_text(&self, info: &OpInfo, args: &[u32]) -> String {
        let mut text = String::new();
        if self.resolver.is_detailed() {
            text.push_str(&format!("({}) ", info.code));
        }
        text.push_str(info.name);
        for (&value, &kind) in args.iter().zip(info.args) {
            text.push(' ');
            text.push_str(&self.resolver.resolve(value, kind));
        }
        text
    }
}
