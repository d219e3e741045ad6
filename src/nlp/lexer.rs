// Rule-based tokenizer and coarse part-of-speech classifier.
//
// Splitting follows Unicode word boundaries (UAX #29), so "3.5" and "don't"
// stay whole while "fast." becomes "fast" + ".". Each piece is then classed as
// a word, number, symbol or punctuation mark from its characters alone.

use std::sync::LazyLock;

use regex_lite::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::traits::PartOfSpeech;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+([.,:/]\d+)*$").expect("numeric pattern is valid"));

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion",
];

/// ASCII characters that are symbols rather than punctuation.
const ASCII_SYMBOLS: &str = "$%+<=>^`|~#&*@\\";

/// A token as it appears in the source text, before lower-casing and lemmatization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub text: &'a str,
    pub pos: PartOfSpeech,
}

/// Split `text` into lexemes, dropping whitespace.
pub fn tokenize(text: &str) -> Vec<Lexeme<'_>> {
    text.split_word_bounds()
        .filter(|piece| !piece.chars().all(char::is_whitespace))
        .map(|piece| Lexeme {
            text: piece,
            pos: classify(piece),
        })
        .collect()
}

/// Classify a single token by its characters.
pub fn classify(token: &str) -> PartOfSpeech {
    if NUMERIC.is_match(token) {
        return PartOfSpeech::Num;
    }
    if token.chars().any(char::is_alphanumeric) {
        let lower = token.to_lowercase();
        if NUMBER_WORDS.iter().any(|w| *w == lower) {
            return PartOfSpeech::Num;
        }
        return PartOfSpeech::Word;
    }
    if token.chars().any(is_symbol) {
        PartOfSpeech::Sym
    } else {
        PartOfSpeech::Punct
    }
}

fn is_symbol(c: char) -> bool {
    if ASCII_SYMBOLS.contains(c) {
        return true;
    }
    if c.is_ascii_punctuation() {
        return false;
    }
    !is_unicode_punct(c)
}

fn is_unicode_punct(c: char) -> bool {
    matches!(c,
        '\u{2010}'..='\u{2027}'
        | '\u{2030}'..='\u{205E}'
        | '\u{3001}'..='\u{3003}'
        | '¡' | '¿' | '«' | '»' | '§' | '¶' | '·'
    ) && !matches!(c, '\u{2030}' | '\u{2031}' | '\u{2044}' | '\u{2052}')
}
