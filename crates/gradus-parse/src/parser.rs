// Parser — recursive descent over the token stream, one instance per
// expression. Precedence (lowest to highest):
//
//   1. + -           (additive)
//   2. * /           (multiplicative, including Wolfram juxtaposition)
//   3. - (prefix)
//   4. ** or ^       (power, right-associative)
//   5. atoms, calls, parentheses
//
// The two notations differ only in leaf syntax: call brackets, the power
// operator, implicit multiplication, and the capitalization of names.

use gradus_core::{ExprArena, ExprHandle, Func};
use smallvec::SmallVec;

use crate::token::{Token, TokenKind};
use crate::{Notation, ParseError, Result};

pub struct Parser<'a> {
    arena: &'a mut ExprArena,
    tokens: Vec<Token>,
    pos: usize,
    notation: Notation,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a mut ExprArena, tokens: Vec<Token>, notation: Notation) -> Self {
        Self {
            arena,
            tokens,
            pos: 0,
            notation,
        }
    }

    pub fn parse_expression(mut self) -> Result<ExprHandle> {
        let expr = self.parse_additive()?;
        match &self.peek().kind {
            TokenKind::Eof => Ok(expr),
            other => Err(ParseError::Unexpected {
                got: other.to_string(),
                expected: "end of input",
                pos: self.peek().pos,
            }),
        }
    }

    fn parse_additive(&mut self) -> Result<ExprHandle> {
        let mut terms: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        terms.push(self.parse_multiplicative()?);
        loop {
            match self.peek().kind {
                TokenKind::Plus => {
                    self.advance();
                    terms.push(self.parse_multiplicative()?);
                }
                TokenKind::Minus => {
                    self.advance();
                    let rhs = self.parse_multiplicative()?;
                    terms.push(self.arena.neg(rhs));
                }
                _ => break,
            }
        }
        Ok(self.arena.add(terms))
    }

    fn parse_multiplicative(&mut self) -> Result<ExprHandle> {
        let mut expr = self.parse_unary()?;
        loop {
            match self.peek().kind {
                TokenKind::Star => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    expr = self.arena.mul(smallvec::smallvec![expr, rhs]);
                }
                TokenKind::Slash => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    expr = self.arena.div(expr, rhs);
                }
                // Wolfram juxtaposition: `1000000 n`, `n Sqrt[n]`, `2 (n+1)`
                TokenKind::Ident(_)
                | TokenKind::Integer(_)
                | TokenKind::Decimal { .. }
                | TokenKind::LParen
                    if self.notation == Notation::Wolfram =>
                {
                    let rhs = self.parse_unary()?;
                    expr = self.arena.mul(smallvec::smallvec![expr, rhs]);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<ExprHandle> {
        if self.peek().kind == TokenKind::Minus {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(self.arena.neg(inner));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<ExprHandle> {
        let base = self.parse_primary()?;
        let is_power = match self.peek().kind {
            TokenKind::Caret => true,
            TokenKind::DoubleStar => match self.notation {
                Notation::Algebraic => true,
                Notation::Wolfram => {
                    return Err(ParseError::Unexpected {
                        got: TokenKind::DoubleStar.to_string(),
                        expected: "'^' in Wolfram notation",
                        pos: self.peek().pos,
                    })
                }
            },
            _ => false,
        };
        if is_power {
            self.advance();
            // Right-associative; allows a signed exponent.
            let exp = self.parse_unary()?;
            return Ok(self.arena.pow(base, exp));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<ExprHandle> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(self.arena.integer(n))
            }
            TokenKind::Decimal { num, den } => {
                self.advance();
                let den = i64::try_from(den)
                    .map_err(|_| ParseError::NumberOverflow { pos: token.pos })?;
                Ok(self.arena.rational(num, den))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_additive()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.parse_name(&name, token.pos)
            }
            other => Err(ParseError::Unexpected {
                got: other.to_string(),
                expected: "an expression",
                pos: token.pos,
            }),
        }
    }

    fn parse_name(&mut self, name: &str, pos: usize) -> Result<ExprHandle> {
        let (open, close, close_text): (&TokenKind, &TokenKind, &'static str) =
            match self.notation {
                Notation::Algebraic => (&TokenKind::LParen, &TokenKind::RParen, "')'"),
                Notation::Wolfram => (&TokenKind::LBracket, &TokenKind::RBracket, "']'"),
            };

        if self.peek().kind == *open {
            let func = self.lookup_function(name, pos)?;
            self.advance();
            let mut args: SmallVec<[ExprHandle; 2]> = SmallVec::new();
            if self.peek().kind != *close {
                args.push(self.parse_additive()?);
                while self.peek().kind == TokenKind::Comma {
                    self.advance();
                    args.push(self.parse_additive()?);
                }
            }
            self.expect(close, close_text)?;
            if args.len() != func.arity() {
                return Err(ParseError::WrongArity {
                    name: name.to_string(),
                    expected: func.arity(),
                    found: args.len(),
                });
            }
            return Ok(self.arena.intern(gradus_core::ExprNode::Function { func, args }));
        }

        let is_pi = match self.notation {
            Notation::Algebraic => name == "pi",
            Notation::Wolfram => name == "Pi",
        };
        if is_pi {
            return Ok(self.arena.pi());
        }
        Ok(self.arena.symbol(name))
    }

    fn lookup_function(&self, name: &str, pos: usize) -> Result<Func> {
        let func = match self.notation {
            Notation::Algebraic => match name {
                "log" | "ln" => Some(Func::Log),
                "sqrt" => Some(Func::Sqrt),
                "exp" => Some(Func::Exp),
                "sin" => Some(Func::Sin),
                "cos" => Some(Func::Cos),
                "binomial" => Some(Func::Binomial),
                _ => None,
            },
            Notation::Wolfram => match name {
                "Log" => Some(Func::Log),
                "Sqrt" => Some(Func::Sqrt),
                "Exp" => Some(Func::Exp),
                "Sin" => Some(Func::Sin),
                "Cos" => Some(Func::Cos),
                "Binomial" => Some(Func::Binomial),
                _ => None,
            },
        };
        func.ok_or_else(|| ParseError::UnknownFunction {
            name: name.to_string(),
            pos,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<()> {
        if self.peek().kind == *kind {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::Unexpected {
                got: self.peek().kind.to_string(),
                expected,
                pos: self.peek().pos,
            })
        }
    }
}
