//! Parse capability used by structural search
//!
//! The pattern-matching engine is opaque to the rest of the crate: it parses
//! source text for a named language and reports matches of a structural
//! pattern with 0-based positions. [`default_engine`] returns the ast-grep
//! backed engine when the `ast-grep` feature is enabled.

use crate::error::{BurrowError, Result};

/// One structural match, positions 0-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxMatch {
    pub text: String,
    pub start_line: usize,
    pub start_column: usize,
}

/// A parsed source file
pub trait SyntaxTree {
    /// All matches of `pattern`, in document order
    ///
    /// An invalid pattern is a [`BurrowError::ParseFailure`].
    fn find_all(&self, pattern: &str) -> Result<Vec<SyntaxMatch>>;
}

pub trait SyntaxEngine: Send + Sync {
    /// Parses `source` as `language`
    ///
    /// Unknown languages and unparsable input are
    /// [`BurrowError::ParseFailure`].
    fn parse(&self, source: &str, language: &str) -> Result<Box<dyn SyntaxTree>>;
}

/// The engine compiled into this build
pub fn default_engine() -> Box<dyn SyntaxEngine> {
    #[cfg(feature = "ast-grep")]
    {
        Box::new(AstGrepEngine)
    }
    #[cfg(not(feature = "ast-grep"))]
    {
        Box::new(UnavailableEngine)
    }
}

/// Stand-in when no engine is compiled in; every parse fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngine;

impl SyntaxEngine for UnavailableEngine {
    fn parse(&self, _source: &str, language: &str) -> Result<Box<dyn SyntaxTree>> {
        Err(BurrowError::ParseFailure(format!(
            "no structural search engine available for '{language}'"
        )))
    }
}

#[cfg(feature = "ast-grep")]
pub use self::ast_grep_engine::AstGrepEngine;

#[cfg(feature = "ast-grep")]
mod ast_grep_engine {
    use super::{SyntaxEngine, SyntaxMatch, SyntaxTree};
    use crate::error::{BurrowError, Result};
    use ast_grep_core::tree_sitter::StrDoc;
    use ast_grep_core::{AstGrep, Pattern};
    use ast_grep_language::SupportLang;
    use std::str::FromStr;

    /// tree-sitter parsing and pattern matching via ast-grep
    #[derive(Debug, Default, Clone, Copy)]
    pub struct AstGrepEngine;

    struct AstGrepTree {
        lang: SupportLang,
        root: AstGrep<StrDoc<SupportLang>>,
    }

    impl SyntaxEngine for AstGrepEngine {
        fn parse(&self, source: &str, language: &str) -> Result<Box<dyn SyntaxTree>> {
            let lang = SupportLang::from_str(language).map_err(|_| {
                BurrowError::ParseFailure(format!("unsupported language '{language}'"))
            })?;
            Ok(Box::new(AstGrepTree {
                lang,
                root: AstGrep::new(source, lang),
            }))
        }
    }

    impl SyntaxTree for AstGrepTree {
        fn find_all(&self, pattern: &str) -> Result<Vec<SyntaxMatch>> {
            let pattern = Pattern::try_new(pattern, self.lang)
                .map_err(|e| BurrowError::ParseFailure(format!("invalid pattern: {e}")))?;

            let matches = self
                .root
                .root()
                .find_all(pattern)
                .map(|m| {
                    let node = m.get_node();
                    let start = node.start_pos();
                    SyntaxMatch {
                        text: node.text().to_string(),
                        start_line: start.line(),
                        start_column: start.column(node),
                    }
                })
                .collect();
            Ok(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_engine_always_fails() {
        let err = UnavailableEngine.parse("x = 1", "python").err().unwrap();
        assert_eq!(err.code(), "PARSE_FAILURE");
    }

    #[cfg(feature = "ast-grep")]
    #[test]
    fn test_ast_grep_engine_finds_calls() {
        let engine = AstGrepEngine;
        let tree = engine
            .parse("import os\nprint('a')\nif x:\n    print(x)\n", "python")
            .unwrap();
        let matches = tree.find_all("print($A)").unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "print('a')");
        assert_eq!((matches[0].start_line, matches[0].start_column), (1, 0));
        assert_eq!((matches[1].start_line, matches[1].start_column), (3, 4));
    }

    #[cfg(feature = "ast-grep")]
    #[test]
    fn test_ast_grep_engine_rejects_unknown_language() {
        assert!(AstGrepEngine.parse("x", "klingon").is_err());
    }
}
