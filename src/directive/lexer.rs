use crate::directive::error::DirectiveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    /// Reference keyword or element id.
    Word(String),

    Colon,
    Pipe,
    Dash,
    Plus,
    Dot,

    Eof,
}

/// Tokenize the parameter text of an `x`/`y` directive.
///
/// A `-` directly in front of a digit is a sign unless it is glued to a
/// preceding number or word (`20-100` is a range, `0.5 -0.5` two numbers).
/// The id after `like`, `with-entry` or `with-exit` is taken verbatim up to
/// whitespace, `:` or `|`, so it matches the ids the other directives accept.
pub(crate) fn lex(keyword: &str, input: &str) -> Result<Vec<Token>, DirectiveError> {
    let mut out: Vec<Token> = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut expect_id = false;

    let digit_at = |j: usize| j < bytes.len() && (bytes[j] as char).is_ascii_digit();

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if std::mem::take(&mut expect_id) && !is_id_stop(bytes[i]) {
            while i < bytes.len() && !is_id_stop(bytes[i]) {
                i += 1;
            }
            out.push(Token {
                kind: TokenKind::Word(input[start..i].to_owned()),
                span: Span { start, end: i },
            });
            continue;
        }

        let after_operand = matches!(
            out.last().map(|t| &t.kind),
            Some(TokenKind::Number(_) | TokenKind::Word(_))
        );
        let glued = after_operand && i > 0 && !(bytes[i - 1] as char).is_whitespace();
        let signed = c == '-'
            && !glued
            && (digit_at(i + 1) || (i + 2 < bytes.len() && bytes[i + 1] == b'.' && digit_at(i + 2)));

        // Number: -?[0-9]*(.[0-9]+)?
        if signed || c.is_ascii_digit() || (c == '.' && digit_at(i + 1)) {
            if signed {
                i += 1;
            }
            while digit_at(i) {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' && digit_at(i + 1) {
                i += 1;
                while digit_at(i) {
                    i += 1;
                }
            }
            if i < bytes.len() && bytes[i] == b'.' && digit_at(i + 1) {
                return Err(DirectiveError::malformed(
                    keyword,
                    format!("invalid number '{}' at byte {start}", &input[start..i + 2]),
                ));
            }
            let s = &input[start..i];
            let v: f64 = s.parse().map_err(|_| {
                DirectiveError::malformed(keyword, format!("invalid number '{s}' at byte {start}"))
            })?;
            out.push(Token {
                kind: TokenKind::Number(v),
                span: Span { start, end: i },
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' || c == '#' {
            i += 1;
            while i < bytes.len() {
                let ch = bytes[i] as char;
                if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                    i += 1;
                } else {
                    break;
                }
            }
            let word = &input[start..i];
            expect_id = matches!(word, "like" | "with-entry" | "with-exit");
            out.push(Token {
                kind: TokenKind::Word(word.to_owned()),
                span: Span { start, end: i },
            });
            continue;
        }

        let kind = match c {
            ':' => TokenKind::Colon,
            '|' => TokenKind::Pipe,
            '-' => TokenKind::Dash,
            '+' => TokenKind::Plus,
            '.' => TokenKind::Dot,
            _ => {
                return Err(DirectiveError::malformed(
                    keyword,
                    format!("unexpected character '{c}' at byte {start}"),
                ));
            }
        };
        i += 1;
        out.push(Token {
            kind,
            span: Span { start, end: i },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });

    Ok(out)
}

fn is_id_stop(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b':' || b == b'|'
}

#[cfg(test)]
#[path = "../../tests/unit/directive/lexer.rs"]
mod tests;
