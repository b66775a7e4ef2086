// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tokenizer for the textual (ASM) script form

use serde::Serialize;
use utils::ensure;

use crate::{
    error::ParseError,
    opcodes::{looks_like_opcode, Opcode},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Opcode mnemonic, upper-cased. May or may not be registered.
    Opcode,
    /// Decimal numeral, kept verbatim.
    Number,
    /// Hexadecimal data, lower-cased, optionally with the `0x` prefix.
    Hex,
    /// Illustrative identifier such as `<pubkey>`.
    Placeholder,
}

/// Validated and normalized script token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    /// Validate and normalize a single whitespace-free token.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        ensure!(!raw.is_empty(), ParseError::EmptyScript);

        let (text, kind) = if looks_like_opcode(raw) {
            (raw.to_ascii_uppercase(), TokenKind::Opcode)
        } else if raw.bytes().all(|b| b.is_ascii_digit()) {
            (raw.to_owned(), TokenKind::Number)
        } else if is_hex(raw) {
            (raw.to_ascii_lowercase(), TokenKind::Hex)
        } else if is_placeholder(raw) {
            (raw.to_owned(), TokenKind::Placeholder)
        } else {
            return Err(ParseError::InvalidToken(raw.to_owned()));
        };

        Ok(Self { text, kind })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_opcode(&self) -> bool {
        self.kind == TokenKind::Opcode
    }

    pub fn is_data(&self) -> bool {
        !self.is_opcode()
    }

    /// The registered opcode this token names, if any.
    pub fn opcode(&self) -> Option<Opcode> {
        if self.is_opcode() {
            Opcode::from_name(&self.text)
        } else {
            None
        }
    }

    /// Hex digits of a data token without the `0x` prefix. Decimal numerals qualify too since
    /// every decimal digit is a hex digit.
    pub fn hex_digits(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Hex => Some(strip_hex_prefix(&self.text)),
            TokenKind::Number => Some(&self.text),
            TokenKind::Opcode | TokenKind::Placeholder => None,
        }
    }

    /// Numeric value of a small-number token: a numeral or one of `OP_0` .. `OP_16`.
    pub fn small_number(&self) -> Option<i64> {
        let n = match self.kind {
            TokenKind::Number => self.text.parse().ok(),
            TokenKind::Opcode => self.opcode().and_then(Opcode::small_number),
            TokenKind::Hex | TokenKind::Placeholder => None,
        }?;
        (0..=16).contains(&n).then_some(n)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn is_hex(s: &str) -> bool {
    let digits = strip_hex_prefix(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_placeholder(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'<' | b'>'))
}

/// Split script text on whitespace and validate every token.
pub fn tokenize_script(script: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = script.split_whitespace().map(Token::parse).collect::<Result<Vec<_>, _>>()?;
    ensure!(!tokens.is_empty(), ParseError::EmptyScript);
    Ok(tokens)
}

/// Tokens of a script along with non-fatal warnings found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedScript {
    tokens: Vec<Token>,
    warnings: Vec<String>,
}

impl ParsedScript {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Warnings joined into a single line, empty if there are none.
    pub fn warning_message(&self) -> String {
        self.warnings.join("; ")
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<String>) {
        (self.tokens, self.warnings)
    }
}

/// Tokenize a script and collect warnings about suspicious but valid input.
pub fn parse_script(script: &str) -> Result<ParsedScript, ParseError> {
    let tokens = tokenize_script(script)?;
    let mut warnings = Vec::new();

    if let [only] = tokens.as_slice() {
        if only.opcode() == Some(Opcode::OP_RETURN) {
            warnings.push("Script contains only OP_RETURN with no data payload".to_owned());
        }
    }

    warnings.extend(
        tokens
            .iter()
            .filter(|t| t.is_opcode() && t.opcode().is_none())
            .map(|t| format!("Unknown opcode '{t}' - will be processed as no-op")),
    );

    Ok(ParsedScript { tokens, warnings })
}

/// Breakdown of a token sequence into opcodes and data pushes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScriptComponents {
    pub opcodes: Vec<String>,
    pub data_pushes: Vec<String>,
    pub total_tokens: usize,
}

impl ScriptComponents {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let (opcodes, data_pushes): (Vec<&Token>, Vec<&Token>) =
            tokens.iter().partition(|t| t.is_opcode());
        Self {
            opcodes: opcodes.into_iter().map(ToString::to_string).collect(),
            data_pushes: data_pushes.into_iter().map(ToString::to_string).collect(),
            total_tokens: tokens.len(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn standard_script() {
        let tokens = tokenize_script("OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG").unwrap();
        assert_eq!(
            texts(&tokens),
            ["OP_DUP", "OP_HASH160", "ab6807", "OP_EQUALVERIFY", "OP_CHECKSIG"]
        );
        assert_eq!(tokens[2].kind(), TokenKind::Hex);
    }

    #[test]
    fn whitespace_collapses() {
        let tokens = tokenize_script("  op_dup\t\tOP_hash160 \n\n AB68  \r\n").unwrap();
        assert_eq!(texts(&tokens), ["OP_DUP", "OP_HASH160", "ab68"]);
    }

    #[rstest]
    #[case("op_checksig", "OP_CHECKSIG", TokenKind::Opcode)]
    #[case("OP_NOSUCHTHING", "OP_NOSUCHTHING", TokenKind::Opcode)]
    #[case("0xDEADbeef", "0xdeadbeef", TokenKind::Hex)]
    #[case("0XAB", "0xab", TokenKind::Hex)]
    #[case("ABCDEF", "abcdef", TokenKind::Hex)]
    #[case("42", "42", TokenKind::Number)]
    #[case("<pubkey>", "<pubkey>", TokenKind::Placeholder)]
    #[case("my_Label", "my_Label", TokenKind::Placeholder)]
    #[case("0x", "0x", TokenKind::Placeholder)]
    fn token_normalization(#[case] raw: &str, #[case] text: &str, #[case] kind: TokenKind) {
        let token = Token::parse(raw).unwrap();
        assert_eq!(token.text(), text);
        assert_eq!(token.kind(), kind);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn empty_script(#[case] script: &str) {
        assert_eq!(tokenize_script(script), Err(ParseError::EmptyScript));
    }

    #[rstest]
    #[case("OP_DUP -1", "-1")]
    #[case("ab+cd", "ab+cd")]
    #[case("OP_DUP [x]", "[x]")]
    #[case("héllo", "héllo")]
    fn invalid_tokens(#[case] script: &str, #[case] bad: &str) {
        let err = tokenize_script(script).unwrap_err();
        assert_eq!(err, ParseError::InvalidToken(bad.to_owned()));
        assert!(err.to_string().starts_with("invalid token: "));
    }

    #[test]
    fn warnings() {
        let parsed = parse_script("OP_RETURN").unwrap();
        assert_eq!(
            parsed.warnings(),
            ["Script contains only OP_RETURN with no data payload"]
        );

        let parsed = parse_script("OP_RETURN 68656c6c6f").unwrap();
        assert!(parsed.warnings().is_empty());
        assert_eq!(parsed.warning_message(), "");

        let parsed = parse_script("OP_FOO 01 OP_bar").unwrap();
        assert_eq!(
            parsed.warning_message(),
            "Unknown opcode 'OP_FOO' - will be processed as no-op; \
             Unknown opcode 'OP_BAR' - will be processed as no-op"
        );
    }

    #[test]
    fn small_numbers() {
        let number = |s: &str| Token::parse(s).unwrap().small_number();
        assert_eq!(number("2"), Some(2));
        assert_eq!(number("16"), Some(16));
        assert_eq!(number("17"), None);
        assert_eq!(number("OP_3"), Some(3));
        assert_eq!(number("OP_0"), Some(0));
        assert_eq!(number("OP_TRUE"), None);
        assert_eq!(number("ab"), None);
    }

    #[test]
    fn components() {
        let tokens = tokenize_script("2 <a> <b> 2 OP_CHECKMULTISIG").unwrap();
        let components = ScriptComponents::from_tokens(&tokens);
        assert_eq!(components.opcodes, ["OP_CHECKMULTISIG"]);
        assert_eq!(components.data_pushes, ["2", "<a>", "<b>", "2"]);
        assert_eq!(components.total_tokens, 5);
    }
}
