//! Query tokenizer and token folding.
//!
//! The grammar is deliberately precedence-free: tokens are emitted left to
//! right and folded into the filter expression in the same order, so
//! grouping is expressed only through parentheses.

use crate::catalog::TagCatalog;
use crate::error::{FaunerieError, Result};

use super::predicate::PredicateCompiler;

/// Queries at or above this many characters are rejected unless the limit is
/// explicitly lifted.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 1024;

/// Fragment for a query that constrains nothing.
pub const MATCH_ALL: &str = "TRUE";

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A compiled atomic term.
    Query(String),
    And,
    Or,
    Not,
    /// A compiled parenthesized group, without its parentheses.
    Subquery(String),
}

impl QueryToken {
    fn as_fragment(&self) -> String {
        match self {
            Self::Query(fragment) => fragment.clone(),
            Self::And => "AND".to_string(),
            Self::Or => "OR".to_string(),
            Self::Not => "NOT".to_string(),
            Self::Subquery(fragment) => format!("({fragment})"),
        }
    }
}

/// Joins tokens with single spaces, in order.
pub fn fold_tokens(tokens: &[QueryToken]) -> String {
    tokens
        .iter()
        .map(QueryToken::as_fragment)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Query parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    compiler: PredicateCompiler<'a>,
    max_length: usize,
    allow_exceed_length: bool,
}

impl<'a> QueryParser<'a> {
    pub fn new(catalog: &'a TagCatalog, allow_unknown_tags: bool) -> Self {
        Self {
            compiler: PredicateCompiler::new(catalog, allow_unknown_tags),
            max_length: DEFAULT_MAX_QUERY_LENGTH,
            allow_exceed_length: false,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Lifts the query length limit.
    pub fn allow_exceed_length(mut self, allow: bool) -> Self {
        self.allow_exceed_length = allow;
        self
    }

    /// Compiles a full query into a filter expression.
    ///
    /// Returns [`MATCH_ALL`] when the query compiles to nothing, otherwise the
    /// expression wrapped in one parenthesis group.
    pub fn compile(&self, query: &str) -> Result<String> {
        let length = query.chars().count();
        if length >= self.max_length && !self.allow_exceed_length {
            return Err(FaunerieError::QueryTooLong {
                length,
                limit: self.max_length,
            });
        }

        let compiled = self.compile_inner(query)?;
        if compiled.is_empty() {
            Ok(MATCH_ALL.to_string())
        } else {
            Ok(format!("({compiled})"))
        }
    }

    /// Tokenizes a query, compiling each atomic term and each group.
    pub fn tokenize(&self, query: &str) -> Result<Vec<QueryToken>> {
        QueryScanner::new(self, query.trim()).run()
    }

    fn compile_inner(&self, query: &str) -> Result<String> {
        let tokens = self.tokenize(query)?;
        check_token_sequence(query, &tokens)?;
        Ok(fold_tokens(&tokens))
    }
}

/// Rejects token sequences that do not fold into a valid expression: binary
/// connectives need an operand on both sides, `Not` needs an operand after
/// it, and adjacent operands need a connective between them.
fn check_token_sequence(query: &str, tokens: &[QueryToken]) -> Result<()> {
    let malformed = |reason| FaunerieError::MalformedQuery {
        query: query.trim().to_string(),
        reason,
    };

    let mut expects_operand = true;
    for token in tokens {
        match token {
            QueryToken::Query(_) | QueryToken::Subquery(_) => {
                if !expects_operand {
                    return Err(malformed("missing operator between terms"));
                }
                expects_operand = false;
            }
            QueryToken::And | QueryToken::Or => {
                if expects_operand {
                    return Err(malformed("operator without a left operand"));
                }
                expects_operand = true;
            }
            QueryToken::Not => {
                if !expects_operand {
                    return Err(malformed("missing operator before NOT"));
                }
            }
        }
    }

    if expects_operand && !tokens.is_empty() {
        return Err(malformed("operator without a right operand"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Characters after which a keyword is considered complete.
fn ends_keyword(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(ch) => ch.is_whitespace() || matches!(ch, '(' | ')' | ',' | '!' | '-' | '&' | '|'),
    }
}

struct QueryScanner<'p, 'a> {
    parser: &'p QueryParser<'a>,
    query: &'p str,
    chars: Vec<char>,
    position: usize,
    buffer: String,
    tokens: Vec<QueryToken>,
}

impl<'p, 'a> QueryScanner<'p, 'a> {
    fn new(parser: &'p QueryParser<'a>, query: &'p str) -> Self {
        Self {
            parser,
            query,
            chars: query.chars().collect(),
            position: 0,
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<QueryToken>> {
        while self.position < self.chars.len() {
            let ch = self.chars[self.position];
            match ch {
                '!' | '-' if self.buffer_is_blank() => {
                    self.tokens.push(QueryToken::Not);
                    self.position += 1;
                }
                ',' => self.operator(QueryToken::And, 1)?,
                '&' if self.peek(1) == Some('&') => self.operator(QueryToken::And, 2)?,
                '|' if self.peek(1) == Some('|') => self.operator(QueryToken::Or, 2)?,
                'A' if self.keyword_here("AND") => self.operator(QueryToken::And, 3)?,
                'O' if self.keyword_here("OR") => self.operator(QueryToken::Or, 2)?,
                'N' if self.keyword_here("NOT") => self.operator(QueryToken::Not, 3)?,
                '(' if self.buffer_is_blank() => self.group()?,
                ')' if self.buffer_is_blank() => {
                    return Err(FaunerieError::UnbalancedParenthesis {
                        query: self.query.to_string(),
                        position: self.position,
                    });
                }
                _ => {
                    self.buffer.push(ch);
                    self.position += 1;
                }
            }
        }

        self.flush()?;
        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn buffer_is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// A keyword counts only as a whole word: it must start a term (or follow
    /// whitespace) and be followed by a separator or the end of input.
    fn keyword_here(&self, keyword: &str) -> bool {
        let starts_word = self.buffer.is_empty() || self.buffer.ends_with(char::is_whitespace);
        if !starts_word {
            return false;
        }

        let length = keyword.chars().count();
        let matches = keyword
            .chars()
            .enumerate()
            .all(|(offset, expected)| self.peek(offset) == Some(expected));
        matches && ends_keyword(self.peek(length))
    }

    fn operator(&mut self, token: QueryToken, width: usize) -> Result<()> {
        self.flush()?;
        self.tokens.push(token);
        self.position += width;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let term = self.buffer.trim();
        if !term.is_empty() {
            let fragment = self.parser.compiler.compile(term)?;
            self.tokens.push(QueryToken::Query(fragment));
        }
        self.buffer.clear();
        Ok(())
    }

    /// Collects a balanced group starting at an opening parenthesis and
    /// compiles it recursively.
    fn group(&mut self) -> Result<()> {
        let opened_at = self.position;
        self.buffer.clear();
        let mut depth = 0i32;
        let mut inner = String::new();
        self.position += 1;

        while self.position < self.chars.len() {
            let ch = self.chars[self.position];
            self.position += 1;
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                let compiled = self.parser.compile_inner(&inner)?;
                let fragment = if compiled.is_empty() {
                    MATCH_ALL.to_string()
                } else {
                    compiled
                };
                self.tokens.push(QueryToken::Subquery(fragment));
                return Ok(());
            }
            inner.push(ch);
        }

        Err(FaunerieError::UnbalancedParenthesis {
            query: self.query.to_string(),
            position: opened_at,
        })
    }
}
