//! Diagnostic error types for the larder engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the larder engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum LarderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("fact graph not found at {path}")]
    #[diagnostic(
        code(larder::store::not_found),
        help(
            "Build one with `larder build <dataset> <graph>`, or point \
             LARDER_GRAPH_PATH at an existing graph file."
        )
    )]
    GraphFileMissing { path: String },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(larder::store::io),
        help("Check that the path exists, is readable/writable, and the disk is not full.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("failed to read dataset {path}: {source}")]
    #[diagnostic(
        code(larder::ingest::io),
        help("Ensure the dataset file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV dataset {path}: {source}")]
    #[diagnostic(
        code(larder::ingest::csv),
        help(
            "The file must be comma-separated with a header row naming the \
             recipe columns (recipe_name, ingredients, directions, ...)."
        )
    )]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON dataset {path}: {source}")]
    #[diagnostic(
        code(larder::ingest::json),
        help(
            "The file must hold a JSON array of record objects, \
             or an object with a `data` array."
        )
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported dataset format: {path}")]
    #[diagnostic(
        code(larder::ingest::format),
        help("Datasets are read from `.csv` or `.json` files; convert other formats first.")
    )]
    UnsupportedFormat { path: String },
}

// ---------------------------------------------------------------------------
// Graph file format errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("malformed statement on line {line}: {message}")]
    #[diagnostic(
        code(larder::format::parse),
        help(
            "Each statement is `<subject-ref> <predicate> <object>` where the object \
             is an entity reference, a quoted string, or a quoted literal tagged \
             `^^integer` / `^^float`."
        )
    )]
    Parse { line: usize, message: String },

    #[error("unknown predicate `{name}` on line {line}")]
    #[diagnostic(
        code(larder::format::predicate),
        help(
            "Valid predicates: label, url, rating, prepTime, cookTime, totalTime, \
             servings, hasIngredient, hasCuisine, hasDiet, avoidsIngredientCategory, \
             step, position, parentCuisine, inCategory."
        )
    )]
    UnknownPredicate { line: usize, name: String },

    #[error("unrecognized entity reference `{reference}` on line {line}")]
    #[diagnostic(
        code(larder::format::reference),
        help(
            "References start with a kind prefix: recipe-, ingredient-, cuisine-, \
             diet-, step-, category-."
        )
    )]
    UnknownReference { line: usize, reference: String },
}

/// Convenience alias for functions returning larder results.
pub type LarderResult<T> = std::result::Result<T, LarderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_converts_to_larder_error() {
        let err = StoreError::GraphFileMissing {
            path: "data/recipes.facts".into(),
        };
        let larder: LarderError = err.into();
        assert!(matches!(
            larder,
            LarderError::Store(StoreError::GraphFileMissing { .. })
        ));
    }

    #[test]
    fn format_error_converts_to_larder_error() {
        let err = FormatError::UnknownPredicate {
            line: 3,
            name: "hasColour".into(),
        };
        let larder: LarderError = err.into();
        assert!(matches!(
            larder,
            LarderError::Format(FormatError::UnknownPredicate { .. })
        ));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = FormatError::Parse {
            line: 12,
            message: "unterminated string".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("12"));
        assert!(msg.contains("unterminated string"));
    }
}
