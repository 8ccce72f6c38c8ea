//! Ways of cutting element content into comparable tokens.

use std::fmt;
use std::str::FromStr;

use lissa_core::errors::ConfigError;

/// Tokenizer selected by the `tokenization` argument.
///
/// Empty tokens are never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenization {
    /// Split on spaces and line breaks, then drop `. , ? : ; ! ( )`.
    Word,
    /// One token per character.
    Char,
    /// Split on non-alphanumerics and underscores, then at lower-to-upper case changes.
    UnderCamel,
    /// Alphanumeric runs; once a word contains a digit, `.`, `:` and `,` stay inside it.
    Smart,
}

impl Tokenization {
    pub fn tokenize(self, input: &str) -> Vec<String> {
        match self {
            Self::Word => tokenize_word(input),
            Self::Char => input.chars().map(String::from).collect(),
            Self::UnderCamel => tokenize_under_camel(input),
            Self::Smart => tokenize_smart(input),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Word => "WORD",
            Self::Char => "CHAR",
            Self::UnderCamel => "UNDER_CAMEL",
            Self::Smart => "SMART",
        }
    }
}

impl fmt::Display for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tokenization {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WORD" => Ok(Self::Word),
            "CHAR" => Ok(Self::Char),
            "UNDER_CAMEL" => Ok(Self::UnderCamel),
            "SMART" => Ok(Self::Smart),
            _ => Err(ConfigError::UnknownModule {
                kind: "tokenization".to_string(),
                name: s.to_string(),
            }),
        }
    }
}

const WORD_PUNCTUATION: [char; 8] = ['.', ',', '?', ':', ';', '!', '(', ')'];

fn tokenize_word(input: &str) -> Vec<String> {
    input
        .split("\r\n")
        .flat_map(|line| line.split([' ', '\n']))
        .map(|token| token.replace(WORD_PUNCTUATION, ""))
        .filter(|token| !token.is_empty())
        .collect()
}

fn tokenize_under_camel(input: &str) -> Vec<String> {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

fn split_camel_case(word: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut after_lower = false;
    for (i, c) in word.char_indices() {
        if c.is_uppercase() {
            if after_lower {
                parts.push(word[start..i].to_string());
                start = i;
            }
            after_lower = false;
        } else if c.is_lowercase() {
            after_lower = true;
        }
    }
    parts.push(word[start..].to_string());
    parts
}

fn tokenize_smart(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word = false;
    let mut separators_allowed = false;
    for (i, c) in input.char_indices() {
        if c.is_alphanumeric() {
            if c.is_numeric() {
                separators_allowed = true;
            }
            if !in_word {
                in_word = true;
                start = i;
            }
        } else if in_word && separators_allowed && matches!(c, '.' | ':' | ',') {
            continue;
        } else if in_word {
            tokens.push(input[start..i].to_string());
            in_word = false;
            separators_allowed = false;
        }
    }
    if in_word {
        tokens.push(input[start..].to_string());
    }
    tokens
}
