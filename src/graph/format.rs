//! Text serialization of the fact graph.
//!
//! One statement per line: `<subject-ref> <predicate> <object>`. The object
//! is an entity reference, a quoted string, or a quoted lexical form tagged
//! `^^integer` / `^^float`. Blank lines and `#` comments are skipped.
//!
//! ```text
//! recipe-lentil-soup label "Lentil Soup"
//! recipe-lentil-soup hasIngredient ingredient-lentils
//! recipe-lentil-soup totalTime "45"^^integer
//! recipe-lentil-soup rating "4.6"^^float
//! ```
//!
//! Serializing and reparsing reproduces an equal *set* of facts; statement
//! order is not significant.

use std::path::Path;

use crate::error::{FormatError, LarderResult, StoreError};
use crate::entity::parse_reference;

use super::store::FactStore;
use super::{Fact, Predicate, Term};

/// Serialize every fact as one statement per line, in insertion order.
pub fn serialize(store: &FactStore) -> String {
    let mut out = String::new();
    for fact in store.facts() {
        statement(&mut out, store, fact);
        out.push('\n');
    }
    out
}

/// Parse a graph file's text into a fresh store.
///
/// Entities are re-interned from their references as they are encountered.
pub fn parse(text: &str) -> Result<FactStore, FormatError> {
    let mut store = FactStore::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parse_statement(&mut store, idx + 1, line)?;
    }
    Ok(store)
}

/// Load a graph file. A missing file is fatal and reported as not-found
/// before any query can be served.
pub fn load(path: &Path) -> LarderResult<FactStore> {
    if !path.exists() {
        return Err(StoreError::GraphFileMissing {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse(&text)?)
}

/// Write the serialized graph to a file.
pub fn save(store: &FactStore, path: &Path) -> LarderResult<()> {
    std::fs::write(path, serialize(store)).map_err(|source| {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

fn statement(out: &mut String, store: &FactStore, fact: &Fact) {
    out.push_str(&store.registry().reference(fact.subject));
    out.push(' ');
    out.push_str(fact.predicate.name());
    out.push(' ');
    match &fact.object {
        Term::Entity(id) => out.push_str(&store.registry().reference(*id)),
        Term::Str(s) => quote(out, s),
        Term::Int(i) => {
            quote(out, &i.to_string());
            out.push_str("^^integer");
        }
        Term::Float(f) => {
            quote(out, &f.to_string());
            out.push_str("^^float");
        }
    }
}

fn quote(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn parse_statement(store: &mut FactStore, line: usize, text: &str) -> Result<(), FormatError> {
    let (subject_ref, rest) = split_token(text).ok_or_else(|| FormatError::Parse {
        line,
        message: "expected subject, predicate and object".into(),
    })?;
    let subject = intern_reference(store, line, subject_ref)?;

    let (predicate_name, rest) = split_token(rest).ok_or_else(|| FormatError::Parse {
        line,
        message: "statement ends after subject".into(),
    })?;
    let predicate = Predicate::parse(predicate_name).ok_or_else(|| {
        FormatError::UnknownPredicate {
            line,
            name: predicate_name.to_string(),
        }
    })?;

    let object_text = rest.trim();
    if object_text.is_empty() {
        return Err(FormatError::Parse {
            line,
            message: "statement ends after predicate".into(),
        });
    }
    let object = parse_object(store, line, object_text)?;

    store.insert(Fact {
        subject,
        predicate,
        object,
    });
    Ok(())
}

fn parse_object(store: &mut FactStore, line: usize, text: &str) -> Result<Term, FormatError> {
    if text.starts_with('"') {
        let (value, rest) = scan_quoted(text).map_err(|message| FormatError::Parse {
            line,
            message,
        })?;
        return match rest {
            "" => Ok(Term::Str(value)),
            "^^integer" => value.parse::<i64>().map(Term::Int).map_err(|_| {
                FormatError::Parse {
                    line,
                    message: format!("invalid integer literal \"{value}\""),
                }
            }),
            "^^float" => value.parse::<f64>().map(Term::Float).map_err(|_| {
                FormatError::Parse {
                    line,
                    message: format!("invalid float literal \"{value}\""),
                }
            }),
            other => Err(FormatError::Parse {
                line,
                message: format!("unexpected trailing content `{other}` after literal"),
            }),
        };
    }
    if text.split_whitespace().nth(1).is_some() {
        return Err(FormatError::Parse {
            line,
            message: "unexpected content after object".into(),
        });
    }
    let id = intern_reference(store, line, text)?;
    Ok(Term::Entity(id))
}

fn intern_reference(
    store: &mut FactStore,
    line: usize,
    reference: &str,
) -> Result<crate::entity::EntityId, FormatError> {
    let (kind, ident) = parse_reference(reference).ok_or_else(|| FormatError::UnknownReference {
        line,
        reference: reference.to_string(),
    })?;
    Ok(store.intern(kind, ident))
}

/// Split off the first whitespace-delimited token. Returns `None` when the
/// input is empty.
fn split_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(at) => Some((&text[..at], &text[at..])),
        None => Some((text, "")),
    }
}

/// Scan a quoted string with backslash escapes. Returns the unescaped value
/// and the remaining text after the closing quote.
fn scan_quoted(text: &str) -> Result<(String, &str), String> {
    debug_assert!(text.starts_with('"'));
    let mut value = String::new();
    let mut chars = text.char_indices().skip(1);
    while let Some((at, c)) = chars.next() {
        match c {
            '"' => return Ok((value, &text[at + 1..])),
            '\\' => match chars.next() {
                Some((_, '"')) => value.push('"'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, 'n')) => value.push('\n'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, 't')) => value.push('\t'),
                Some((_, other)) => return Err(format!("invalid escape `\\{other}`")),
                None => return Err("unterminated escape".into()),
            },
            _ => value.push(c),
        }
    }
    Err("unterminated string literal".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    fn sample_store() -> FactStore {
        let mut store = FactStore::new();
        let soup = store.intern(EntityKind::Recipe, "lentil-soup");
        let lentils = store.intern(EntityKind::Ingredient, "lentils");
        let indian = store.intern(EntityKind::Cuisine, "indian");
        store.insert(Fact::new(soup, Predicate::Label, "Lentil Soup"));
        store.insert(Fact::new(soup, Predicate::HasIngredient, lentils));
        store.insert(Fact::new(soup, Predicate::HasCuisine, indian));
        store.insert(Fact::new(soup, Predicate::TotalTime, 45i64));
        store.insert(Fact::new(soup, Predicate::Rating, 4.6f64));
        store
    }

    fn statement_set(store: &FactStore) -> std::collections::BTreeSet<String> {
        serialize(store).lines().map(str::to_string).collect()
    }

    #[test]
    fn serialize_emits_one_statement_per_fact() {
        let store = sample_store();
        let text = serialize(&store);
        assert_eq!(text.lines().count(), store.len());
        assert!(text.contains("recipe-lentil-soup label \"Lentil Soup\""));
        assert!(text.contains("recipe-lentil-soup totalTime \"45\"^^integer"));
        assert!(text.contains("recipe-lentil-soup rating \"4.6\"^^float"));
        assert!(text.contains("recipe-lentil-soup hasIngredient ingredient-lentils"));
    }

    #[test]
    fn round_trip_reproduces_equal_fact_set() {
        let store = sample_store();
        let reparsed = parse(&serialize(&store)).unwrap();
        assert_eq!(statement_set(&store), statement_set(&reparsed));
    }

    #[test]
    fn round_trip_escapes_awkward_strings() {
        let mut store = FactStore::new();
        let soup = store.intern(EntityKind::Recipe, "odd");
        store.insert(Fact::new(
            soup,
            Predicate::Label,
            "Say \"when\"\nthen \\stop\ttabbed",
        ));
        let reparsed = parse(&serialize(&store)).unwrap();
        assert_eq!(statement_set(&store), statement_set(&reparsed));
    }

    #[test]
    fn parse_skips_blanks_and_comments() {
        let text = "\n# a comment\nrecipe-dal label \"Dal\"\n\n";
        let store = parse(text).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn parse_rejects_unknown_predicate() {
        let err = parse("recipe-dal hasColour \"red\"").unwrap_err();
        assert!(matches!(err, FormatError::UnknownPredicate { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_bad_reference() {
        let err = parse("planet-mars label \"Mars\"").unwrap_err();
        assert!(matches!(err, FormatError::UnknownReference { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_unterminated_string() {
        let err = parse("recipe-dal label \"Dal").unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_bad_integer_literal() {
        let err = parse("recipe-dal totalTime \"forty\"^^integer").unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 1, .. }));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.facts")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::LarderError::Store(StoreError::GraphFileMissing { .. })
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph.facts");
        let store = sample_store();
        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(statement_set(&store), statement_set(&loaded));
    }
}
