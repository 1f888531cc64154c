//! Tokenizer for permission expressions.

use std::fmt;

use crate::error::{PermissionError, PermissionResult};

/// A lexical token of a permission expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    And,
    Or,
    Not,
    /// `->`
    Implies,
    /// `<-`
    ImpliedBy,
    /// `=` or `==`
    Equiv,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "'{name}'"),
            Token::And => f.write_str("'and'"),
            Token::Or => f.write_str("'or'"),
            Token::Not => f.write_str("'not'"),
            Token::Implies => f.write_str("'->'"),
            Token::ImpliedBy => f.write_str("'<-'"),
            Token::Equiv => f.write_str("'='"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '/')
}

/// Split an expression into tokens.
///
/// Word connectives (`and`, `or`, `not`) are lowercase only; any other
/// word is an identifier.
pub fn tokenize(input: &str) -> PermissionResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '&' => {
                chars.next_if(|(_, n)| *n == '&');
                tokens.push(Token::And);
            }
            '|' => {
                chars.next_if(|(_, n)| *n == '|');
                tokens.push(Token::Or);
            }
            '!' => tokens.push(Token::Not),
            '-' => {
                if chars.next_if(|(_, n)| *n == '>').is_some() {
                    tokens.push(Token::Implies);
                } else {
                    tokens.push(Token::Not);
                }
            }
            '<' => {
                if chars.next_if(|(_, n)| *n == '-').is_some() {
                    tokens.push(Token::ImpliedBy);
                } else {
                    return Err(PermissionError::UnexpectedChar { ch: c, offset });
                }
            }
            '=' => {
                chars.next_if(|(_, n)| *n == '=');
                tokens.push(Token::Equiv);
            }
            c if is_ident_char(c) => {
                let mut word = String::from(c);
                loop {
                    match chars.peek().copied() {
                        Some((_, n)) if is_ident_char(n) => {
                            word.push(n);
                            chars.next();
                        }
                        // A hyphen inside a name, as opposed to `->` or a negation.
                        Some((i, '-'))
                            if input[i + 1..]
                                .chars()
                                .next()
                                .is_some_and(|n| n.is_alphanumeric()) =>
                        {
                            word.push('-');
                            chars.next();
                        }
                        _ => break,
                    }
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Ident(word),
                });
            }
            _ => return Err(PermissionError::UnexpectedChar { ch: c, offset }),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn word_connectives() {
        let tokens = tokenize("ohos.permission.A and (ohos.permission.B or not C)").unwrap();
        assert_eq!(
            tokens,
            vec![
                ident("ohos.permission.A"),
                Token::And,
                Token::LParen,
                ident("ohos.permission.B"),
                Token::Or,
                Token::Not,
                ident("C"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn symbolic_connectives() {
        let tokens = tokenize("A && B || !C -> D <- E == F & G | -H = I").unwrap();
        assert_eq!(
            tokens,
            vec![
                ident("A"),
                Token::And,
                ident("B"),
                Token::Or,
                Token::Not,
                ident("C"),
                Token::Implies,
                ident("D"),
                Token::ImpliedBy,
                ident("E"),
                Token::Equiv,
                ident("F"),
                Token::And,
                ident("G"),
                Token::Or,
                Token::Not,
                ident("H"),
                Token::Equiv,
                ident("I"),
            ]
        );
    }

    #[test]
    fn keywords_inside_names_stay_names() {
        let tokens = tokenize("ohos.permission.STORE_PERSISTENT_DATA or android").unwrap();
        assert_eq!(
            tokens,
            vec![ident("ohos.permission.STORE_PERSISTENT_DATA"), Token::Or, ident("android")]
        );
    }

    #[test]
    fn hyphenated_names() {
        let tokens = tokenize("perm-a->perm-b").unwrap();
        assert_eq!(tokens, vec![ident("perm-a"), Token::Implies, ident("perm-b")]);
    }

    #[test]
    fn uppercase_words_are_identifiers() {
        assert_eq!(tokenize("AND").unwrap(), vec![ident("AND")]);
    }

    #[test]
    fn rejects_unknown_characters() {
        assert_eq!(
            tokenize("A ^ B"),
            Err(PermissionError::UnexpectedChar { ch: '^', offset: 2 })
        );
        assert!(matches!(
            tokenize("A < B"),
            Err(PermissionError::UnexpectedChar { ch: '<', .. })
        ));
    }
}
