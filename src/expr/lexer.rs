//! Tokenizer for the expression grammar

use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
}

impl Token {
    /// Human-readable form for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Ident(s) => format!("'{s}'"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::StarStar => "'**'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Percent => "'%'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Le => "'<='".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Ge => "'>='".to_string(),
            Token::EqEq => "'=='".to_string(),
            Token::Ne => "'!='".to_string(),
        }
    }
}

/// Token plus its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Tokenize an expression. Byte positions are retained for diagnostics.
pub fn tokenize(text: &str) -> Result<Vec<Spanned>, ExprError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let start = i;

        match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
                continue;
            }
            '+' => {
                tokens.push(Spanned { token: Token::Plus, position: start });
                i += 1;
            }
            '-' => {
                tokens.push(Spanned { token: Token::Minus, position: start });
                i += 1;
            }
            '*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push(Spanned { token: Token::StarStar, position: start });
                    i += 2;
                } else {
                    tokens.push(Spanned { token: Token::Star, position: start });
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Spanned { token: Token::Slash, position: start });
                i += 1;
            }
            '%' => {
                tokens.push(Spanned { token: Token::Percent, position: start });
                i += 1;
            }
            '(' => {
                tokens.push(Spanned { token: Token::LParen, position: start });
                i += 1;
            }
            ')' => {
                tokens.push(Spanned { token: Token::RParen, position: start });
                i += 1;
            }
            '[' => {
                tokens.push(Spanned { token: Token::LBracket, position: start });
                i += 1;
            }
            ']' => {
                tokens.push(Spanned { token: Token::RBracket, position: start });
                i += 1;
            }
            ',' => {
                tokens.push(Spanned { token: Token::Comma, position: start });
                i += 1;
            }
            '<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Spanned { token: Token::Le, position: start });
                    i += 2;
                } else {
                    tokens.push(Spanned { token: Token::Lt, position: start });
                    i += 1;
                }
            }
            '>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Spanned { token: Token::Ge, position: start });
                    i += 2;
                } else {
                    tokens.push(Spanned { token: Token::Gt, position: start });
                    i += 1;
                }
            }
            '=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Spanned { token: Token::EqEq, position: start });
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedChar { position: start, ch: '=' });
                }
            }
            '!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Spanned { token: Token::Ne, position: start });
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedChar { position: start, ch: '!' });
                }
            }
            '0'..='9' | '.' => {
                // '.' must open a fraction, not stand alone
                if c == '.' && !bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()) {
                    return Err(ExprError::UnexpectedChar { position: start, ch: '.' });
                }
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'.' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal = &text[start..i];
                let value = literal.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                    position: start,
                    text: literal.to_string(),
                })?;
                tokens.push(Spanned { token: Token::Number(value), position: start });
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_')
                {
                    i += 1;
                }
                tokens.push(Spanned {
                    token: Token::Ident(text[start..i].to_string()),
                    position: start,
                });
            }
            other => {
                return Err(ExprError::UnexpectedChar { position: start, ch: other });
            }
        }
    }

    Ok(tokens)
}
