//! # Unicode codecs
//!
//! Bounded indexed lookups from a code point `i ∈ [0, 0x10FFFF]` to its raw
//! integer value, its UTF-8/UTF-16/UTF-32/ASCII encodings, and its JSON
//! string-escape encodings (a DFA over bytes accepting every valid JSON
//! representation of that code point, plus a canonicalizer choosing the
//! shortest one). `dandy` has no equivalent — its alphabet is always
//! concrete strings, never code points — so this module only borrows the
//! general shape of "a process-wide immutable lookup, populated once" from
//! elsewhere in the crate: the per-code-point JSON DFA table is cached
//! behind a [`std::sync::OnceLock`], the modern `std` replacement for the
//! `lazy_static` dev-only pattern `dandy`'s test fixtures use.
use crate::dfa::Dfa;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// A validated Unicode code point in `[0, 0x10FFFF]`. Surrogate code points
/// (`0xD800..=0xDFFF`) are excluded — they are never themselves valid
/// scalar values, only an artifact of UTF-16 encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(u32);

pub const MAX: u32 = 0x10FFFF;

impl CodePoint {
    /// `None` if `value` is outside `[0, 0x10FFFF]` or is a surrogate —
    /// out-of-range lookups return none rather than panicking.
    pub fn new(value: u32) -> Option<Self> {
        if value > MAX || (0xD800..=0xDFFF).contains(&value) {
            None
        } else {
            Some(CodePoint(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// The code point's raw integer value (trivial, but completes the set of
/// projections alongside the encoded ones).
pub fn raw(cp: CodePoint) -> u32 {
    cp.value()
}

/// UTF-8 byte sequence for `cp`.
pub fn utf8(cp: CodePoint) -> Vec<u8> {
    let c = char::from_u32(cp.value()).expect("validated code point is a valid char");
    let mut buf = [0u8; 4];
    c.encode_utf8(&mut buf).as_bytes().to_vec()
}

/// UTF-16 code-unit sequence, with surrogate-pair encoding for `i >= 0x10000`.
pub fn utf16(cp: CodePoint) -> Vec<u16> {
    let v = cp.value();
    if v < 0x10000 {
        vec![v as u16]
    } else {
        let v = v - 0x10000;
        let high = 0xD800 + (v >> 10);
        let low = 0xDC00 + (v & 0x3FF);
        vec![high as u16, low as u16]
    }
}

/// UTF-32: the code point, verbatim, as a single code unit.
pub fn utf32(cp: CodePoint) -> Vec<u32> {
    vec![cp.value()]
}

/// ASCII projection, restricted to `i <= 0x7F`.
pub fn ascii(cp: CodePoint) -> Option<u8> {
    (cp.value() <= 0x7F).then_some(cp.value() as u8)
}

/// `NAMED_ESCAPES[i] = c` means code point `i` has the single-character
/// JSON escape `\c` (RFC 8259 §7's short escapes), distinct from the
/// general `\uXXXX` fallback every code point also has.
const NAMED_ESCAPES: &[(u32, u8)] = &[
    (0x08, b'b'),
    (0x09, b't'),
    (0x0A, b'n'),
    (0x0C, b'f'),
    (0x0D, b'r'),
    (0x22, b'"'),
    (0x5C, b'\\'),
];

fn named_escape(cp: CodePoint) -> Option<u8> {
    NAMED_ESCAPES.iter().find(|(c, _)| *c == cp.value()).map(|(_, e)| *e)
}

/// Whether `cp` may appear literally, unescaped, inside a JSON string —
/// everything except the C0 control range, the quote, and the backslash.
fn literal_allowed(cp: CodePoint) -> bool {
    !(cp.value() <= 0x1F || cp.value() == 0x22 || cp.value() == 0x5C)
}

/// `\uXXXX` hex digits for a single UTF-16 code unit, lowercase.
fn hex4(unit: u16) -> [u8; 4] {
    let hex = format!("{unit:04x}");
    let bytes = hex.as_bytes();
    [bytes[0], bytes[1], bytes[2], bytes[3]]
}

fn uescape(unit: u16) -> Vec<u8> {
    let mut out = vec![b'\\', b'u'];
    out.extend(hex4(unit));
    out
}

pub mod json {
    use super::*;

    /// The shortest valid JSON-string representation of `cp`: a literal
    /// byte sequence beats a single-character escape, which beats a
    /// `\uXXXX` (or surrogate-pair `\uXXXX\uXXXX`) escape.
    pub fn canonical(cp: CodePoint) -> Vec<u8> {
        if literal_allowed(cp) {
            return utf8(cp);
        }
        if let Some(c) = named_escape(cp) {
            return vec![b'\\', c];
        }
        utf16(cp).into_iter().flat_map(uescape).collect()
    }

    /// Every hex-case variant of `digits`' `\uXXXX...` rendering — JSON's
    /// grammar accepts `a`-`f` in either case, so the DFA built from this
    /// must too.
    fn hex_case_variants(digits: &[u8]) -> Vec<Vec<u8>> {
        let mut variants = vec![Vec::new()];
        for &d in digits {
            let options: Vec<u8> = if d.is_ascii_alphabetic() {
                vec![d.to_ascii_lowercase(), d.to_ascii_uppercase()]
            } else {
                vec![d]
            };
            variants = variants
                .into_iter()
                .flat_map(|prefix| {
                    options.iter().map(move |&opt| {
                        let mut next = prefix.clone();
                        next.push(opt);
                        next
                    })
                })
                .collect();
        }
        variants
    }

    /// A DFA (over bytes) accepting every valid JSON-string encoding of
    /// `cp`: the literal (if legal), the named escape (if any), and every
    /// hex-case variant of the `\uXXXX` (or surrogate-pair) escape.
    fn build(cp: CodePoint) -> Dfa<u8> {
        let mut alternatives: Vec<Dfa<u8>> = Vec::new();
        if literal_allowed(cp) {
            alternatives.push(Dfa::verbatim(utf8(cp)));
        }
        if let Some(c) = named_escape(cp) {
            alternatives.push(Dfa::verbatim(vec![b'\\', c]));
        }
        let units = utf16(cp);
        let mut hex_digits = Vec::new();
        for unit in units {
            hex_digits.extend(hex4(unit));
        }
        for variant in hex_case_variants(&hex_digits) {
            let mut word = Vec::with_capacity(variant.len() / 4 * 6);
            for chunk in variant.chunks(4) {
                word.push(b'\\');
                word.push(b'u');
                word.extend_from_slice(chunk);
            }
            alternatives.push(Dfa::verbatim(word));
        }
        alternatives.into_iter().reduce(|a, b| a.union(&b)).unwrap_or_else(Dfa::empty)
    }

    static CACHE: OnceLock<Mutex<HashMap<u32, Dfa<u8>>>> = OnceLock::new();

    /// The DFA accepting every valid JSON-string encoding of `cp`, built on
    /// first request for that code point and cached in the process-wide
    /// table thereafter (reads never block on construction of entries
    /// other callers already forced).
    pub fn string_dfa(cp: CodePoint) -> Dfa<u8> {
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut guard = cache.lock().expect("json dfa cache poisoned");
        guard.entry(cp.value()).or_insert_with(|| build(cp)).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_surrogate_pair_for_astral_code_point() {
        let cp = CodePoint::new(0x1F600).unwrap();
        assert_eq!(utf16(cp), vec![0xD83D, 0xDE00]);
    }

    #[test]
    fn utf16_single_unit_for_bmp_code_point() {
        let cp = CodePoint::new(0x41).unwrap();
        assert_eq!(utf16(cp), vec![0x41]);
    }

    #[test]
    fn ascii_rejects_above_0x7f() {
        assert_eq!(ascii(CodePoint::new(0x80).unwrap()), None);
        assert_eq!(ascii(CodePoint::new(0x41).unwrap()), Some(0x41));
    }

    #[test]
    fn surrogate_code_points_are_rejected() {
        assert_eq!(CodePoint::new(0xD800), None);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(CodePoint::new(MAX + 1), None);
    }

    #[test]
    fn canonical_quote_is_backslash_quote() {
        let cp = CodePoint::new(0x22).unwrap();
        assert_eq!(json::canonical(cp), vec![0x5C, 0x22]);
    }

    #[test]
    fn canonical_letter_a_is_literal() {
        let cp = CodePoint::new(0x41).unwrap();
        assert_eq!(json::canonical(cp), vec![0x41]);
    }

    #[test]
    fn canonical_control_without_named_escape_is_u_escape() {
        let cp = CodePoint::new(0x01).unwrap();
        assert_eq!(json::canonical(cp), vec![0x5C, 0x75, 0x30, 0x30, 0x30, 0x31]);
    }

    #[test]
    fn string_dfa_accepts_the_canonical_form() {
        for value in [0x22, 0x41, 0x01, 0x1F600] {
            let cp = CodePoint::new(value).unwrap();
            let dfa = json::string_dfa(cp);
            assert!(dfa.accepts(&json::canonical(cp)), "code point {value:#x}");
        }
    }

    #[test]
    fn string_dfa_accepts_uppercase_hex_variant() {
        let cp = CodePoint::new(0x00AB).unwrap();
        let dfa = json::string_dfa(cp);
        assert!(dfa.accepts(b"\\u00AB"));
        assert!(dfa.accepts(b"\\u00ab"));
    }

    #[test]
    fn canonical_is_no_longer_than_any_accepted_string() {
        // canonical form is never longer than any other accepted encoding.
        for value in [0x22, 0x5C, 0x41, 0x01, 0x7F] {
            let cp = CodePoint::new(value).unwrap();
            let dfa = json::string_dfa(cp);
            let canonical_len = json::canonical(cp).len();
            if let Some(shortest) = dfa.enumerate().take(20).map(|w| w.len()).min() {
                assert!(canonical_len <= shortest);
            }
        }
    }
}
