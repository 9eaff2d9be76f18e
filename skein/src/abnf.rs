//! # ABNF front-end (out of scope)
//!
//! Per spec.md §1/§6, the core treats ABNF parsing as an external
//! collaborator: "the front-end produces values of the pattern type; the
//! core compiles them to DFAs." This module is that contract made
//! concrete enough to exercise — a small `nom`-backed parser for a useful
//! subset of RFC 5234 (rule definitions, alternation `/`, concatenation,
//! grouping, optional `[ ]`, repetition counts, and quoted literals) that
//! produces [`crate::pattern::Pattern<char>`] values. It is intentionally
//! not a complete ABNF implementation (no core rules like `ALPHA`/`DIGIT`,
//! no numeric value notation, no comments) — completing that is catalog
//! and front-end work outside this crate's hard engineering, per spec.md's
//! scope note that out-of-scope collaborators "contribute no hard
//! engineering themselves."
use crate::pattern::Pattern;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while1};
use nom::character::complete::{char as nom_char, digit1, multispace0};
use nom::combinator::{map, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;
use std::collections::BTreeMap;
use thiserror::Error;

/// A parsed rule: its name and the pattern it defines, with references to
/// other rules left as [`Pattern::Symbol`]-free placeholders resolved by
/// [`Ruleset::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub body: Element,
}

/// An unresolved element of a rule body: either a literal pattern over
/// `char`, or a reference to another rule by name (resolved against a
/// [`Ruleset`] before it can become a [`Pattern`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Literal(Pattern<char>),
    RuleRef(String),
    Alternation(Vec<Element>),
    Concatenation(Vec<Element>),
    Optional(Box<Element>),
    Repeat(Box<Element>),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AbnfError {
    #[error("parse error at {0:?}")]
    Parse(String),
    #[error("rule {0:?} referenced but never defined")]
    UndefinedRule(String),
    #[error("rule {0:?} defined more than once")]
    DuplicateRule(String),
}

/// A parsed, not-yet-resolved collection of rule definitions.
#[derive(Clone, Debug, Default)]
pub struct Ruleset {
    rules: BTreeMap<String, Element>,
}

impl Ruleset {
    pub fn parse(source: &str) -> Result<Self, AbnfError> {
        let mut rules = BTreeMap::new();
        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (_, Rule { name, body }) =
                rule_def(line).map_err(|e| AbnfError::Parse(format!("{e:?}")))?;
            if rules.insert(name.clone(), body).is_some() {
                return Err(AbnfError::DuplicateRule(name));
            }
        }
        Ok(Self { rules })
    }

    /// Lowers every rule to a [`Pattern<char>`], substituting rule
    /// references with the referenced rule's pattern. Cyclic references
    /// are not supported (ABNF rules are commonly recursive, but the
    /// pattern algebra has no fixed-point combinator — see spec.md's
    /// non-goals on concrete syntax; a recursive grammar is a case the
    /// front-end, not the core, would need to handle, e.g. by bounding
    /// recursion depth before handing patterns to the core).
    pub fn resolve(&self, rule_name: &str) -> Result<Pattern<char>, AbnfError> {
        let mut cache = BTreeMap::new();
        self.resolve_into(rule_name, &mut cache)
    }

    fn resolve_into(
        &self,
        rule_name: &str,
        cache: &mut BTreeMap<String, Pattern<char>>,
    ) -> Result<Pattern<char>, AbnfError> {
        if let Some(p) = cache.get(rule_name) {
            return Ok(p.clone());
        }
        let body = self
            .rules
            .get(rule_name)
            .ok_or_else(|| AbnfError::UndefinedRule(rule_name.to_string()))?
            .clone();
        let pattern = self.resolve_element(&body, cache)?;
        cache.insert(rule_name.to_string(), pattern.clone());
        Ok(pattern)
    }

    fn resolve_element(
        &self,
        element: &Element,
        cache: &mut BTreeMap<String, Pattern<char>>,
    ) -> Result<Pattern<char>, AbnfError> {
        match element {
            Element::Literal(p) => Ok(p.clone()),
            Element::RuleRef(name) => self.resolve_into(name, cache),
            Element::Alternation(parts) => {
                let parts = parts
                    .iter()
                    .map(|p| self.resolve_element(p, cache))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Pattern::union(parts))
            }
            Element::Concatenation(parts) => {
                let parts = parts
                    .iter()
                    .map(|p| self.resolve_element(p, cache))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Pattern::concatenate(parts))
            }
            Element::Optional(inner) => {
                let inner = self.resolve_element(inner, cache)?;
                Ok(Pattern::union(vec![Pattern::epsilon(), inner]))
            }
            Element::Repeat(inner) => {
                let inner = self.resolve_element(inner, cache)?;
                Ok(Pattern::star(inner))
            }
        }
    }
}

fn rule_name(input: &str) -> IResult<&str, &str> {
    recognize(take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'))(input)
}

fn rule_def(input: &str) -> IResult<&str, Rule> {
    map(
        tuple((
            rule_name,
            delimited(multispace0, tag("="), multispace0),
            alternation,
        )),
        |(name, _, body)| Rule {
            name: name.to_string(),
            body,
        },
    )(input)
}

fn alternation(input: &str) -> IResult<&str, Element> {
    map(
        separated_list1(delimited(multispace0, nom_char('/'), multispace0), concatenation),
        |mut parts| {
            if parts.len() == 1 {
                parts.remove(0)
            } else {
                Element::Alternation(parts)
            }
        },
    )(input)
}

fn concatenation(input: &str) -> IResult<&str, Element> {
    map(
        separated_list1(multispace0, repetition),
        |mut parts| {
            if parts.len() == 1 {
                parts.remove(0)
            } else {
                Element::Concatenation(parts)
            }
        },
    )(input)
}

fn repetition(input: &str) -> IResult<&str, Element> {
    map(pair(opt(digit1), element), |(count, elem)| match count {
        Some(n) => {
            let n: usize = n.parse().expect("digit1 guarantees parseable count");
            Element::Concatenation(std::iter::repeat(elem).take(n).collect())
        }
        None => elem,
    })(input)
}

fn element(input: &str) -> IResult<&str, Element> {
    alt((quoted_literal, group, optional_group, ref_to_rule))(input)
}

fn quoted_literal(input: &str) -> IResult<&str, Element> {
    map(delimited(nom_char('"'), is_not("\""), nom_char('"')), |s: &str| {
        Element::Literal(Pattern::concatenate(s.chars().map(Pattern::symbol).collect()))
    })(input)
}

fn group(input: &str) -> IResult<&str, Element> {
    delimited(
        pair(nom_char('('), multispace0),
        alternation,
        pair(multispace0, nom_char(')')),
    )(input)
}

fn optional_group(input: &str) -> IResult<&str, Element> {
    map(
        delimited(
            pair(nom_char('['), multispace0),
            alternation,
            pair(multispace0, nom_char(']')),
        ),
        |inner| Element::Optional(Box::new(inner)),
    )(input)
}

fn ref_to_rule(input: &str) -> IResult<&str, Element> {
    map(rule_name, |name| Element::RuleRef(name.to_string()))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_rule() {
        let set = Ruleset::parse("greeting = \"hi\"").unwrap();
        let pattern = set.resolve("greeting").unwrap();
        let dfa: crate::dfa::Dfa<char> = crate::pattern::lower(&pattern);
        assert!(dfa.accepts(&['h', 'i']));
    }

    #[test]
    fn resolves_rule_references() {
        let set = Ruleset::parse("a = \"x\"\nb = a / \"y\"").unwrap();
        let pattern = set.resolve("b").unwrap();
        let dfa: crate::dfa::Dfa<char> = crate::pattern::lower(&pattern);
        assert!(dfa.accepts(&['x']));
        assert!(dfa.accepts(&['y']));
        assert!(!dfa.accepts(&['z']));
    }

    #[test]
    fn undefined_reference_is_an_error() {
        let set = Ruleset::parse("a = b").unwrap();
        assert_eq!(set.resolve("a"), Err(AbnfError::UndefinedRule("b".to_string())));
    }

    #[test]
    fn optional_group_allows_absence() {
        let set = Ruleset::parse("a = [\"x\"] \"y\"").unwrap();
        let pattern = set.resolve("a").unwrap();
        let dfa: crate::dfa::Dfa<char> = crate::pattern::lower(&pattern);
        assert!(dfa.accepts(&['y']));
        assert!(dfa.accepts(&['x', 'y']));
    }
}
