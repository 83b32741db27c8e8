use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    Comma,
    LParen,
    RParen,
}

impl TokenKind {
    /// Human-readable token description for error messages.
    pub(super) fn describe(&self) -> String {
        match self {
            Self::Number(value) => format!("number {value}"),
            Self::Ident(name) => format!("'{name}'"),
            Self::Plus => "'+'".into(),
            Self::Minus => "'-'".into(),
            Self::Star => "'*'".into(),
            Self::Slash => "'/'".into(),
            Self::Caret => "'^'".into(),
            Self::Bang => "'!'".into(),
            Self::Comma => "','".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    /// Byte offset of the token's first character.
    pub(super) pos: usize,
}

/// Splits the source into tokens, skipping whitespace.
pub(super) fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() || c == b'.' {
            let end = scan_number(bytes, pos);
            let text = &src[pos..end];
            let value = text.parse::<f64>().map_err(|_| ExprError::MalformedNumber {
                pos,
                text: text.to_owned(),
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                pos,
            });
            pos = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            let end = pos
                + bytes[pos..]
                    .iter()
                    .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                    .count();
            tokens.push(Token {
                kind: TokenKind::Ident(src[pos..end].to_owned()),
                pos,
            });
            pos = end;
            continue;
        }

        let kind = match c {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'!' => TokenKind::Bang,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => {
                let found = src[pos..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar { pos, found });
            }
        };
        tokens.push(Token { kind, pos });
        pos += 1;
    }

    Ok(tokens)
}

/// Returns the end offset of the number starting at `start`.
///
/// An exponent marker is only consumed when digits follow it, so `2e` lexes
/// as the number `2` followed by the identifier `e`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = start + digits(start);
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        end += digits(end);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    end
}
