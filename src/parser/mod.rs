//! Parser for the tagged-prefix expression language
//!
//! A recursive descent parser over the whitespace-free program text. Every
//! expression is wrapped in angle brackets and the tag after `<` selects
//! the production, so a single left-to-right pass with no backtracking is
//! enough. Any missing delimiter aborts the whole parse.

use tracing::trace;

use crate::ast::Expr;
use crate::diagnostics::ParseError;
use crate::text::{is_integer_literal, strip_whitespace};

/// Parse program text into an expression tree.
///
/// Whitespace is tolerated anywhere in the input (it is stripped before
/// parsing); the remainder must form exactly one well-formed expression.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let stripped = strip_whitespace(source);
    trace!(len = stripped.len(), "parse");

    let mut parser = Parser::new(&stripped);
    let expr = parser.parse_expr()?;
    if !parser.at_end() {
        return Err(parser.error_here(ParseErrorKind::TrailingInput));
    }
    Ok(expr)
}

/// Which parse error to build; positions and source text are filled in by
/// the parser.
enum ParseErrorKind {
    UnexpectedEnd,
    Expected(char),
    TrailingInput,
}

/// Parser state: a byte cursor into the stripped text
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Consume `expected` or fail. All delimiters are ASCII, so byte
    /// comparison is safe on UTF-8 input.
    fn expect(&mut self, expected: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.error_here(ParseErrorKind::Expected(expected as char))),
            None => Err(self.error_here(ParseErrorKind::UnexpectedEnd)),
        }
    }

    /// Take the run of characters up to the next `,` or `>`, without
    /// consuming the delimiter. Used for tags, names, and int literals.
    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b',' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let at = (self.pos.min(self.src.len()), 0).into();
        let src = self.src.to_string();
        match kind {
            ParseErrorKind::UnexpectedEnd => ParseError::UnexpectedEnd { at, src },
            ParseErrorKind::Expected(expected) => ParseError::Expected { expected, at, src },
            ParseErrorKind::TrailingInput => ParseError::TrailingInput { at, src },
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(b'<')?;

        let tag_start = self.pos;
        let tag = self.take_name();

        match tag {
            "void" => {
                self.expect(b'>')?;
                Ok(Expr::Void)
            }
            "int" => {
                self.expect(b',')?;
                let lit_start = self.pos;
                let lit = self.take_name();
                self.expect(b'>')?;
                if !is_integer_literal(lit) {
                    return Err(ParseError::InvalidInt {
                        literal: lit.to_string(),
                        at: (lit_start, lit.len()).into(),
                        src: self.src.to_string(),
                    });
                }
                let value = lit.parse::<i64>().map_err(|_| ParseError::InvalidInt {
                    literal: lit.to_string(),
                    at: (lit_start, lit.len()).into(),
                    src: self.src.to_string(),
                })?;
                Ok(Expr::Int(value))
            }
            "pair" => {
                let (a, b) = self.parse_two()?;
                Ok(Expr::Pair(a, b))
            }
            "fst" => Ok(Expr::Fst(self.parse_one()?)),
            "snd" => Ok(Expr::Snd(self.parse_one()?)),
            "neg" => Ok(Expr::Neg(self.parse_one()?)),
            "isvoid" => Ok(Expr::IsVoid(self.parse_one()?)),
            "add" => {
                let (a, b) = self.parse_two()?;
                Ok(Expr::Add(a, b))
            }
            "mul" => {
                let (a, b) = self.parse_two()?;
                Ok(Expr::Mul(a, b))
            }
            "divmod" => {
                let (a, b) = self.parse_two()?;
                Ok(Expr::DivMod(a, b))
            }
            "var" => {
                self.expect(b',')?;
                let name = self.take_name().to_string();
                self.expect(b'>')?;
                Ok(Expr::Var(name))
            }
            "def" => {
                let name = self.parse_leading_name()?;
                let value = Box::new(self.parse_expr()?);
                self.expect(b'>')?;
                Ok(Expr::Def { name, value })
            }
            "let" => {
                let name = self.parse_leading_name()?;
                let bound = Box::new(self.parse_expr()?);
                self.expect(b',')?;
                let body = Box::new(self.parse_expr()?);
                self.expect(b'>')?;
                Ok(Expr::Let { name, bound, body })
            }
            "ifgreater" => {
                self.expect(b',')?;
                let lhs = Box::new(self.parse_expr()?);
                self.expect(b',')?;
                let rhs = Box::new(self.parse_expr()?);
                self.expect(b',')?;
                let then_branch = Box::new(self.parse_expr()?);
                self.expect(b',')?;
                let else_branch = Box::new(self.parse_expr()?);
                self.expect(b'>')?;
                Ok(Expr::IfGreater {
                    lhs,
                    rhs,
                    then_branch,
                    else_branch,
                })
            }
            "fun" => {
                let name = self.parse_leading_name()?;
                let formal = self.take_name().to_string();
                self.expect(b',')?;
                let body = Box::new(self.parse_expr()?);
                self.expect(b'>')?;
                Ok(Expr::Fun { name, formal, body })
            }
            "call" => {
                let name = self.parse_leading_name()?;
                let arg = Box::new(self.parse_expr()?);
                self.expect(b'>')?;
                Ok(Expr::Call { name, arg })
            }
            _ => Err(ParseError::UnknownTag {
                tag: tag.to_string(),
                at: (tag_start, tag.len()).into(),
                src: self.src.to_string(),
            }),
        }
    }

    /// `, NAME ,` — the name-then-subexpression prefix shared by `def`,
    /// `let`, `fun`, and `call`.
    fn parse_leading_name(&mut self) -> Result<String, ParseError> {
        self.expect(b',')?;
        let name = self.take_name().to_string();
        self.expect(b',')?;
        Ok(name)
    }

    /// `, expr >`
    fn parse_one(&mut self) -> Result<Box<Expr>, ParseError> {
        self.expect(b',')?;
        let e = Box::new(self.parse_expr()?);
        self.expect(b'>')?;
        Ok(e)
    }

    /// `, expr , expr >`
    fn parse_two(&mut self) -> Result<(Box<Expr>, Box<Expr>), ParseError> {
        self.expect(b',')?;
        let a = Box::new(self.parse_expr()?);
        self.expect(b',')?;
        let b = Box::new(self.parse_expr()?);
        self.expect(b'>')?;
        Ok((a, b))
    }
}
