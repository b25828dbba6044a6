//! pegscope bytecode listings
//!
//! Decodes the flat bytecode that a PEG parser generator emits for each
//! grammar rule into a nested, human-readable listing.
//!
//! # Overview
//!
//! - [`instruction`] - Opcode table: mnemonic, argument kinds, block labels
//! - [`SymbolResolver`] - Renders rule, literal and expectation references
//! - [`Disassembler`] - Recursive decoder for length-prefixed blocks
//! - [`RuleRegistry`] - Insertion-ordered rule streams and the full listing
//! - [`Grammar`] - Compiled grammar loaded from JSON
//! - [`OpDumper`] - Free-form listing builder
//!
//! # Example
//!
//! ```
//! use pegscope_bytecode::{DisasmOptions, Disassembler, SymbolTables};
//!
//! let symbols = SymbolTables::new().with_rules(["start", "expr"]);
//! let disasm = Disassembler::new(symbols, DisasmOptions::default());
//!
//! // IF with a three-cell THEN block (POP; RULE 1) and an empty ELSE block
//! assert_eq!(disasm.render(&[13, 3, 6, 27, 1, 0]), "IF\n  POP\n  RULE <expr>");
//! ```

pub mod disasm;
pub mod dumper;
pub mod grammar;
pub mod instruction;
pub mod registry;
pub mod symbols;

pub use disasm::{render_lines, DisasmOptions, Disassembler, Line};
pub use dumper::OpDumper;
pub use grammar::{Grammar, GrammarError, GrammarRule};
pub use instruction::{lookup, ArgKind, BlockLabel, OpInfo};
pub use registry::{RegistryError, RuleRegistry};
pub use symbols::{
    Expectation, ExpectationKind, SymbolResolver, SymbolTables, UnknownExpectationKind,
};
