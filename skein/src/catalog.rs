//! # Catalog importer (out of scope)
//!
//! Per spec.md §6, the catalog importer "resolves cross-file rule
//! references by mangling each rule's name to an unambiguous identifier
//! (`"{File: <path> Rule: <name>}"` with lowercased `<name>`) and keeping a
//! reverse map `mangled → (filename, original-name)`." This mangling
//! scheme is part of the core's boundary because downstream tools depend
//! on its exact shape, so it's implemented precisely even though the
//! importer itself is out of scope; everything else about multi-file
//! resolution (actually reading files, I/O errors) belongs to the
//! importer's caller, not here.
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("mangled identifier {0:?} collides with an existing entry for a different rule")]
    ManglingCollision(String),
    #[error("import remark {0:?} does not have the shape \"import <file> <rule>\"")]
    MalformedImport(String),
}

/// Produces the mangled identifier for `(filename, rule_name)`. The rule
/// name is lowercased in the mangled form (but not in the reverse-map
/// entry, which keeps the original casing) per spec.md's wording.
pub fn mangle(filename: &str, rule_name: &str) -> String {
    format!("{{File: {filename} Rule: {}}}", rule_name.to_lowercase())
}

/// An `import` remark: `import <filename> <rulename>`, the only shape the
/// importer recognizes for cross-file references (spec.md §6: "special-
/// cased on a prose-value remark shape: the three tokens `import`, target
/// filename, target rulename").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRemark {
    pub filename: String,
    pub rule_name: String,
}

pub fn parse_import_remark(remark: &str) -> Result<ImportRemark, CatalogError> {
    let tokens: Vec<&str> = remark.split_whitespace().collect();
    match tokens.as_slice() {
        ["import", filename, rule_name] => Ok(ImportRemark {
            filename: filename.to_string(),
            rule_name: rule_name.to_string(),
        }),
        _ => Err(CatalogError::MalformedImport(remark.to_string())),
    }
}

/// Accumulates `(filename, rule_name) → mangled` mappings and their
/// reverse, rejecting a mangled identifier that would collide with an
/// existing entry naming a different `(filename, rule_name)` pair (two
/// distinct rules mangling to the same identifier is the catalog's own
/// construction-time error, analogous to the core's category-1 programmer
/// errors even though the catalog itself is boundary code — see §7).
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    reverse: BTreeMap<String, (String, String)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, filename: &str, rule_name: &str) -> Result<String, CatalogError> {
        let mangled = mangle(filename, rule_name);
        match self.reverse.get(&mangled) {
            Some(existing) if *existing != (filename.to_string(), rule_name.to_string()) => {
                Err(CatalogError::ManglingCollision(mangled))
            }
            _ => {
                self.reverse
                    .insert(mangled.clone(), (filename.to_string(), rule_name.to_string()));
                Ok(mangled)
            }
        }
    }

    pub fn resolve(&self, mangled: &str) -> Option<&(String, String)> {
        self.reverse.get(mangled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangle_lowercases_only_the_rule_name() {
        assert_eq!(mangle("Grammar.abnf", "Greeting"), "{File: Grammar.abnf Rule: greeting}");
    }

    #[test]
    fn parse_import_remark_extracts_three_tokens() {
        let remark = parse_import_remark("import  other.abnf   greeting").unwrap();
        assert_eq!(remark.filename, "other.abnf");
        assert_eq!(remark.rule_name, "greeting");
    }

    #[test]
    fn parse_import_remark_rejects_wrong_token_count() {
        assert!(parse_import_remark("import other.abnf").is_err());
        assert!(parse_import_remark("import other.abnf greeting extra").is_err());
    }

    #[test]
    fn register_then_resolve_round_trips() {
        let mut catalog = Catalog::new();
        let mangled = catalog.register("g.abnf", "Greeting").unwrap();
        assert_eq!(catalog.resolve(&mangled), Some(&("g.abnf".to_string(), "Greeting".to_string())));
    }

    #[test]
    fn registering_a_different_rule_under_the_same_mangled_name_is_an_error() {
        let mut catalog = Catalog::new();
        catalog.register("g.abnf", "Greeting").unwrap();
        // "GREETING" and "Greeting" both lowercase to "greeting", colliding.
        assert!(catalog.register("g.abnf", "GREETING").is_err());
    }
}
