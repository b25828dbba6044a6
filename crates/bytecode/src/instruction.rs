//! Opcode table for the parser bytecode.
//!
//! Every instruction is an opcode cell followed by a fixed number of argument
//! cells and, for control-flow forms, one length-prefixed block per label:
//!
//! ```text
//! op, arg1 .. argN, len(block1), block1 .., len(block2), block2 ..
//! ```

/// Opcode constants
pub mod op {
    // Stack manipulation
    pub const PUSH_UNDEFINED: u32 = 1;
    pub const PUSH_NULL: u32 = 2;
    pub const PUSH_FAILED: u32 = 3;
    pub const PUSH_EMPTY_ARRAY: u32 = 4;
    pub const PUSH_CUR_POS: u32 = 5;
    pub const POP: u32 = 6;
    pub const POP_CUR_POS: u32 = 7;
    pub const POP_N: u32 = 8;
    pub const NIP: u32 = 9;
    pub const APPEND: u32 = 10;
    pub const WRAP: u32 = 11;
    pub const TEXT: u32 = 12;
    pub const PUSH_EMPTY_STRING: u32 = 35;
    pub const PLUCK: u32 = 36;

    // Conditions and loops
    pub const IF: u32 = 13;
    pub const IF_ERROR: u32 = 14;
    pub const IF_NOT_ERROR: u32 = 15;
    pub const WHILE_NOT_ERROR: u32 = 16;
    pub const IF_LT: u32 = 30;
    pub const IF_GE: u32 = 31;
    pub const IF_LT_DYNAMIC: u32 = 32;
    pub const IF_GE_DYNAMIC: u32 = 33;

    // Input matching
    pub const MATCH_ANY: u32 = 17;
    pub const MATCH_STRING: u32 = 18;
    pub const MATCH_STRING_IC: u32 = 19;
    pub const MATCH_CHAR_CLASS: u32 = 20;
    pub const ACCEPT_N: u32 = 21;
    pub const ACCEPT_STRING: u32 = 22;
    pub const FAIL: u32 = 23;

    // Positions, actions and rule calls
    pub const LOAD_SAVED_POS: u32 = 24;
    pub const UPDATE_SAVED_POS: u32 = 25;
    pub const CALL: u32 = 26;
    pub const RULE: u32 = 27;
}

/// How an argument cell is turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Plain number (counts, positions)
    Number,
    /// Index into the literal pool
    Literal,
    /// Index into the rule-name list
    Rule,
    /// Index into the expectation pool
    Expectation,
    /// Index into the character-class pool
    Class,
}

/// Name of a nested block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockLabel {
    /// Taken branch or loop body. Never rendered as a marker.
    Then,
    /// Alternative branch. Rendered as `ELSE` only when non-empty.
    Else,
}

impl BlockLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockLabel::Then => "THEN",
            BlockLabel::Else => "ELSE",
        }
    }

    /// Marker line to emit before a block of `len` cells, if any.
    pub fn marker(self, len: u32) -> Option<&'static str> {
        match self {
            BlockLabel::Then => None,
            BlockLabel::Else if len == 0 => None,
            BlockLabel::Else => Some(self.as_str()),
        }
    }
}

/// Static description of one opcode.
#[derive(Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub code: u32,
    pub name: &'static str,
    pub args: &'static [ArgKind],
    pub blocks: &'static [BlockLabel],
}

const NONE: &[ArgKind] = &[];
const NUMBER: &[ArgKind] = &[ArgKind::Number];
const LITERAL: &[ArgKind] = &[ArgKind::Literal];

const NO_BLOCKS: &[BlockLabel] = &[];
const BRANCH: &[BlockLabel] = &[BlockLabel::Then, BlockLabel::Else];
const LOOP: &[BlockLabel] = &[BlockLabel::Then];

const fn info(
    code: u32,
    name: &'static str,
    args: &'static [ArgKind],
    blocks: &'static [BlockLabel],
) -> OpInfo {
    OpInfo { code, name, args, blocks }
}

/// Sorted by opcode.
static TABLE: [OpInfo; 33] = [
    info(op::PUSH_UNDEFINED, "PUSH_UNDEFINED", NONE, NO_BLOCKS),
    info(op::PUSH_NULL, "PUSH_NULL", NONE, NO_BLOCKS),
    info(op::PUSH_FAILED, "PUSH_FAILED", NONE, NO_BLOCKS),
    info(op::PUSH_EMPTY_ARRAY, "PUSH_EMPTY_ARRAY", NONE, NO_BLOCKS),
    info(op::PUSH_CUR_POS, "PUSH_CUR_POS", NONE, NO_BLOCKS),
    info(op::POP, "POP", NONE, NO_BLOCKS),
    info(op::POP_CUR_POS, "POP_CUR_POS", NONE, NO_BLOCKS),
    info(op::POP_N, "POP_N", NUMBER, NO_BLOCKS),
    info(op::NIP, "NIP", NONE, NO_BLOCKS),
    info(op::APPEND, "APPEND", NONE, NO_BLOCKS),
    info(op::WRAP, "WRAP", NUMBER, NO_BLOCKS),
    info(op::TEXT, "TEXT", NONE, NO_BLOCKS),
    info(op::IF, "IF", NONE, BRANCH),
    info(op::IF_ERROR, "IF_ERROR", NONE, BRANCH),
    info(op::IF_NOT_ERROR, "IF_NOT_ERROR", NONE, BRANCH),
    info(op::WHILE_NOT_ERROR, "WHILE_NOT_ERROR", NONE, LOOP),
    info(op::MATCH_ANY, "MATCH_ANY", NONE, BRANCH),
    info(op::MATCH_STRING, "MATCH_STRING", LITERAL, BRANCH),
    info(op::MATCH_STRING_IC, "MATCH_STRING_IC", LITERAL, BRANCH),
    info(op::MATCH_CHAR_CLASS, "MATCH_CHAR_CLASS", &[ArgKind::Class], NO_BLOCKS),
    info(op::ACCEPT_N, "ACCEPT_N", NUMBER, NO_BLOCKS),
    info(op::ACCEPT_STRING, "ACCEPT_STRING", LITERAL, NO_BLOCKS),
    info(op::FAIL, "FAIL", &[ArgKind::Expectation], NO_BLOCKS),
    info(op::LOAD_SAVED_POS, "LOAD_SAVED_POS", NUMBER, NO_BLOCKS),
    info(op::UPDATE_SAVED_POS, "UPDATE_SAVED_POS", NUMBER, NO_BLOCKS),
    info(op::CALL, "CALL", NONE, NO_BLOCKS),
    info(op::RULE, "RULE", &[ArgKind::Rule], NO_BLOCKS),
    info(op::IF_LT, "IF_LT", NONE, BRANCH),
    info(op::IF_GE, "IF_GE", NONE, BRANCH),
    info(op::IF_LT_DYNAMIC, "IF_LT_DYNAMIC", NONE, BRANCH),
    info(op::IF_GE_DYNAMIC, "IF_GE_DYNAMIC", NONE, BRANCH),
    info(op::PUSH_EMPTY_STRING, "PUSH_EMPTY_STRING", NONE, NO_BLOCKS),
    info(
        op::PLUCK,
        "PLUCK",
        &[ArgKind::Number, ArgKind::Number, ArgKind::Number, ArgKind::Number],
        NO_BLOCKS,
    ),
];

/// Look up an opcode. Unknown opcodes return `None`.
#[inline]
pub fn lookup(code: u32) -> Option<&'static OpInfo> {
    TABLE
        .binary_search_by_key(&code, |info| info.code)
        .ok()
        .map(|idx| &TABLE[idx])
}

/// Look up an opcode by mnemonic.
pub fn lookup_name(name: &str) -> Option<&'static OpInfo> {
    TABLE.iter().find(|info| info.name == name)
}

/// The whole table, sorted by opcode.
pub fn all() -> &'static [OpInfo] {
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in TABLE.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} before {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn test_lookup_known() {
        let info = lookup(35).expect("PUSH_EMPTY_STRING");
        assert_eq!(info.name, "PUSH_EMPTY_STRING");
        assert!(info.args.is_empty());
        assert!(info.blocks.is_empty());

        let info = lookup(op::MATCH_STRING).unwrap();
        assert_eq!(info.args, &[ArgKind::Literal]);
        assert_eq!(info.blocks, &[BlockLabel::Then, BlockLabel::Else]);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup(0).is_none());
        assert!(lookup(28).is_none());
        assert!(lookup(34).is_none());
        assert!(lookup(u32::MAX).is_none());
    }

    #[test]
    fn test_block_arity() {
        assert_eq!(lookup(op::WHILE_NOT_ERROR).unwrap().blocks.len(), 1);
        for code in [op::IF, op::IF_ERROR, op::IF_NOT_ERROR, op::IF_LT, op::IF_GE_DYNAMIC] {
            assert_eq!(lookup(code).unwrap().blocks.len(), 2);
        }
    }

    #[test]
    fn test_lookup_name_round_trips() {
        for info in all() {
            assert_eq!(lookup_name(info.name).map(|i| i.code), Some(info.code));
        }
        assert!(lookup_name("JUMP").is_none());
    }

    #[test]
    fn test_block_markers() {
        assert_eq!(BlockLabel::Then.marker(3), None);
        assert_eq!(BlockLabel::Else.marker(0), None);
        assert_eq!(BlockLabel::Else.marker(1), Some("ELSE"));
    }
}
