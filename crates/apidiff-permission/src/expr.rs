//! Boolean expression tree over permission identifiers.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PermissionError, PermissionResult};
use crate::lexer::{tokenize, Token};

/// A parsed permission formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    /// Material implication `lhs -> rhs`.
    Implies(Box<Expr>, Box<Expr>),
    Equiv(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parse an expression.
    ///
    /// Precedence from tightest to loosest: `not`, `and`, `or`, `->`/`<-`,
    /// `=`. Binary operators associate to the left.
    pub fn parse(input: &str) -> PermissionResult<Self> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(PermissionError::Empty);
        }

        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.equiv()?;
        match parser.peek() {
            None => Ok(expr),
            Some(Token::RParen) => Err(PermissionError::UnbalancedParen),
            Some(token) => Err(PermissionError::UnexpectedToken {
                token: token.to_string(),
                position: parser.pos,
            }),
        }
    }

    /// Collect every identifier the expression mentions.
    pub fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Not(inner) => inner.collect_variables(out),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) | Expr::Equiv(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
        }
    }

    /// Evaluate under an assignment; `lookup` returns the truth value of an
    /// identifier.
    pub fn eval<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Expr::Var(name) => lookup(name),
            Expr::Not(inner) => !inner.eval(lookup),
            Expr::And(l, r) => l.eval(lookup) && r.eval(lookup),
            Expr::Or(l, r) => l.eval(lookup) || r.eval(lookup),
            Expr::Implies(l, r) => !l.eval(lookup) || r.eval(lookup),
            Expr::Equiv(l, r) => l.eval(lookup) == r.eval(lookup),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => f.write_str(name),
            Expr::Not(inner) => write!(f, "not {inner}"),
            Expr::And(l, r) => write!(f, "({l} and {r})"),
            Expr::Or(l, r) => write!(f, "({l} or {r})"),
            Expr::Implies(l, r) => write!(f, "({l} -> {r})"),
            Expr::Equiv(l, r) => write!(f, "({l} = {r})"),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn equiv(&mut self) -> PermissionResult<Expr> {
        let mut lhs = self.implication()?;
        while self.eat(&Token::Equiv) {
            let rhs = self.implication()?;
            lhs = Expr::Equiv(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn implication(&mut self) -> PermissionResult<Expr> {
        let mut lhs = self.disjunction()?;
        loop {
            if self.eat(&Token::Implies) {
                let rhs = self.disjunction()?;
                lhs = Expr::Implies(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&Token::ImpliedBy) {
                let rhs = self.disjunction()?;
                lhs = Expr::Implies(Box::new(rhs), Box::new(lhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn disjunction(&mut self) -> PermissionResult<Expr> {
        let mut lhs = self.conjunction()?;
        while self.eat(&Token::Or) {
            let rhs = self.conjunction()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn conjunction(&mut self) -> PermissionResult<Expr> {
        let mut lhs = self.unary()?;
        while self.eat(&Token::And) {
            let rhs = self.unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> PermissionResult<Expr> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> PermissionResult<Expr> {
        let position = self.pos;
        match self.tokens.get(position).cloned() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(Expr::Var(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.equiv()?;
                if self.eat(&Token::RParen) {
                    Ok(inner)
                } else {
                    Err(PermissionError::UnbalancedParen)
                }
            }
            Some(Token::RParen) => Err(PermissionError::UnbalancedParen),
            Some(token) => Err(PermissionError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
            None => Err(PermissionError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Var(name.to_string()))
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = Expr::parse("A or B and C").unwrap();
        assert_eq!(
            expr,
            Expr::Or(var("A"), Box::new(Expr::And(var("B"), var("C"))))
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = Expr::parse("(A or B) and C").unwrap();
        assert_eq!(
            expr,
            Expr::And(Box::new(Expr::Or(var("A"), var("B"))), var("C"))
        );
    }

    #[test]
    fn reverse_implication_flips_operands() {
        assert_eq!(Expr::parse("A <- B").unwrap(), Expr::Implies(var("B"), var("A")));
    }

    #[test]
    fn negation_nests() {
        assert_eq!(
            Expr::parse("not not A").unwrap(),
            Expr::Not(Box::new(Expr::Not(var("A"))))
        );
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let expr = Expr::parse("A and B or not C").unwrap();
        assert_eq!(expr.to_string(), "((A and B) or not C)");
    }

    #[test]
    fn collects_sorted_distinct_variables() {
        let expr = Expr::parse("C and (A or C) -> B").unwrap();
        let mut vars = BTreeSet::new();
        expr.collect_variables(&mut vars);
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn evaluation() {
        let expr = Expr::parse("A -> B").unwrap();
        assert!(expr.eval(&|_: &str| false));
        assert!(!expr.eval(&|v: &str| v == "A"));

        let expr = Expr::parse("A = B").unwrap();
        assert!(expr.eval(&|_: &str| true));
        assert!(!expr.eval(&|v: &str| v == "B"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Expr::parse(""), Err(PermissionError::Empty));
        assert_eq!(Expr::parse("   "), Err(PermissionError::Empty));
        assert_eq!(Expr::parse("(A or B"), Err(PermissionError::UnbalancedParen));
        assert_eq!(Expr::parse("A or B)"), Err(PermissionError::UnbalancedParen));
        assert_eq!(Expr::parse("()"), Err(PermissionError::UnbalancedParen));
        assert_eq!(Expr::parse("A and"), Err(PermissionError::UnexpectedEnd));
        assert!(matches!(
            Expr::parse("A B"),
            Err(PermissionError::UnexpectedToken { position: 1, .. })
        ));
        assert!(matches!(
            Expr::parse("and A"),
            Err(PermissionError::UnexpectedToken { position: 0, .. })
        ));
    }
}
