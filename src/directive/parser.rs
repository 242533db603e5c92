use crate::directive::ast::{
    Axis, AxisArg, ClauseTime, CurveArg, Directive, OpacityArg, ParsedDirectives, RefKind,
    Scalar, SegmentClause, Value,
};
use crate::directive::error::DirectiveError;
use crate::directive::lexer::{Token, TokenKind, lex};

/// Leading token switching an element into absolute positioning.
pub(crate) const ABSOLUTE_FLAG: &str = "!absolute";

/// Split a raw directive string into typed directives.
///
/// Malformed or unknown directives are collected in
/// [`ParsedDirectives::errors`] and left out; the rest come back stably
/// reordered so `leave` and then `y` directives are processed last.
pub(crate) fn parse_directives(text: &str) -> ParsedDirectives {
    let mut parts: Vec<&str> = text
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let absolute = parts.first() == Some(&ABSOLUTE_FLAG);
    if absolute {
        parts.remove(0);
    }

    let mut out = ParsedDirectives {
        absolute,
        ..ParsedDirectives::default()
    };
    for part in parts {
        match parse_directive(part) {
            Ok(d) => out.directives.push(d),
            Err(e) => out.errors.push(e),
        }
    }
    out.directives.sort_by_key(Directive::rank);
    out
}

fn parse_directive(part: &str) -> Result<Directive, DirectiveError> {
    let (keyword, rest) = match part.find(char::is_whitespace) {
        Some(at) => (&part[..at], part[at..].trim()),
        None => (part, ""),
    };
    let params: Vec<&str> = rest.split_whitespace().collect();

    match keyword {
        "enter" => parse_value(keyword, &params).map(Directive::Enter),
        "leave" => parse_value(keyword, &params).map(Directive::Leave),
        "duration" => parse_scalar_words(keyword, &params).map(Directive::Duration),
        "ease" => parse_curve_words(keyword, &params).map(Directive::Ease),
        "opacity-ease" => parse_opacity(keyword, &params).map(Directive::OpacityEase),
        "x" => parse_axis(keyword, rest).map(|a| Directive::Position(Axis::X, a)),
        "y" => parse_axis(keyword, rest).map(|a| Directive::Position(Axis::Y, a)),
        other => Err(DirectiveError::UnknownDirective {
            keyword: other.to_owned(),
        }),
    }
}

fn number(keyword: &str, word: &str) -> Result<f64, DirectiveError> {
    let v: f64 = word
        .parse()
        .map_err(|_| DirectiveError::malformed(keyword, format!("expected a number, got '{word}'")))?;
    if !v.is_finite() {
        return Err(DirectiveError::malformed(
            keyword,
            format!("number must be finite, got '{word}'"),
        ));
    }
    Ok(v)
}

fn parse_value(keyword: &str, params: &[&str]) -> Result<Value, DirectiveError> {
    match params {
        [n] => Ok(Value::Number(number(keyword, n)?)),
        [kind, id, rest @ ..] => {
            let kind = RefKind::from_word(kind).ok_or_else(|| {
                DirectiveError::malformed(keyword, format!("unknown reference form '{kind}'"))
            })?;
            let offset = match (kind.takes_offset(), rest) {
                (false, []) => 0.0,
                (true, [n]) => number(keyword, n)?,
                (true, []) => {
                    return Err(DirectiveError::malformed(
                        keyword,
                        "after-entry/after-exit need an offset",
                    ));
                }
                _ => {
                    return Err(DirectiveError::malformed(
                        keyword,
                        format!("unexpected trailing arguments {rest:?}"),
                    ));
                }
            };
            Ok(Value::Reference {
                kind,
                id: (*id).to_owned(),
                offset,
            })
        }
        _ => Err(DirectiveError::malformed(
            keyword,
            "expected a number or a reference",
        )),
    }
}

fn parse_scalar_words(keyword: &str, params: &[&str]) -> Result<Scalar, DirectiveError> {
    match params {
        [n] => Ok(Scalar::Number(number(keyword, n)?)),
        ["like", id] => Ok(Scalar::Like((*id).to_owned())),
        _ => Err(DirectiveError::malformed(
            keyword,
            "expected a number or 'like ID'",
        )),
    }
}

fn curve_points(keyword: &str, params: &[&str]) -> Result<[f64; 4], DirectiveError> {
    let [a, b, c, d] = params else {
        return Err(DirectiveError::malformed(
            keyword,
            format!("expected 4 numbers, got {}", params.len()),
        ));
    };
    Ok([
        number(keyword, a)?,
        number(keyword, b)?,
        number(keyword, c)?,
        number(keyword, d)?,
    ])
}

fn parse_curve_words(keyword: &str, params: &[&str]) -> Result<CurveArg, DirectiveError> {
    match params {
        ["like", id] => Ok(CurveArg::Like((*id).to_owned())),
        _ => curve_points(keyword, params).map(CurveArg::Points),
    }
}

fn parse_opacity(keyword: &str, params: &[&str]) -> Result<OpacityArg, DirectiveError> {
    match params.len() {
        2 if params[0] == "like" => Ok(OpacityArg::Like(params[1].to_owned())),
        4 => curve_points(keyword, params).map(OpacityArg::Symmetric),
        8 => Ok(OpacityArg::Split {
            fade_in: curve_points(keyword, &params[..4])?,
            fade_out: curve_points(keyword, &params[4..])?,
        }),
        n => Err(DirectiveError::malformed(
            keyword,
            format!("expected 4 or 8 numbers, got {n}"),
        )),
    }
}

fn parse_axis(keyword: &str, rest: &str) -> Result<AxisArg, DirectiveError> {
    let tokens = lex(keyword, rest)?;
    let mut p = AxisParser {
        keyword,
        tokens,
        pos: 0,
    };
    let arg = p.parse_axis()?;
    p.expect(TokenKind::Eof)?;
    Ok(arg)
}

struct AxisParser<'a> {
    keyword: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl AxisParser<'_> {
    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn bump(&mut self) -> TokenKind {
        let t = self.tokens[self.pos].kind.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn error(&self, msg: impl Into<String>) -> DirectiveError {
        let at = self.tokens[self.pos].span.start;
        DirectiveError::malformed(self.keyword, format!("{} (at byte {at})", msg.into()))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), DirectiveError> {
        if *self.peek() == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected {kind:?}, found {:?}", self.peek())))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if *self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<f64, DirectiveError> {
        match self.bump() {
            TokenKind::Number(v) => Ok(v),
            other => Err(self.error(format!("expected a number, found {other:?}"))),
        }
    }

    fn word(&mut self) -> Result<String, DirectiveError> {
        match self.bump() {
            TokenKind::Word(w) => Ok(w),
            other => Err(self.error(format!("expected an element id, found {other:?}"))),
        }
    }

    fn at_scalar(&self) -> bool {
        matches!(self.peek(), TokenKind::Number(_))
            || matches!(self.peek(), TokenKind::Word(w) if w == "like")
    }

    fn scalar(&mut self) -> Result<Scalar, DirectiveError> {
        match self.bump() {
            TokenKind::Number(v) => Ok(Scalar::Number(v)),
            TokenKind::Word(w) if w == "like" => Ok(Scalar::Like(self.word()?)),
            other => Err(self.error(format!("expected a number or 'like ID', found {other:?}"))),
        }
    }

    /// `S -N`: a negative number after the start is the separator plus the
    /// end. Followed by `:` it is the next clause's time instead.
    fn signed_end(&mut self) -> Option<Scalar> {
        let TokenKind::Number(v) = *self.peek() else {
            return None;
        };
        let separator = v.is_sign_negative()
            && !matches!(self.peek_nth(1), TokenKind::Dash | TokenKind::Colon);
        if !separator {
            return None;
        }
        self.bump();
        Some(Scalar::Number(-v))
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        let at = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[at].kind
    }

    /// `| x1 y1 x2 y2 |` or `| like ID |`, opening pipe already consumed.
    fn curve_body(&mut self) -> Result<CurveArg, DirectiveError> {
        let curve = if matches!(self.peek(), TokenKind::Word(w) if w == "like") {
            self.bump();
            CurveArg::Like(self.word()?)
        } else {
            CurveArg::Points([
                self.number()?,
                self.number()?,
                self.number()?,
                self.number()?,
            ])
        };
        self.expect(TokenKind::Pipe)?;
        Ok(curve)
    }

    fn parse_axis(&mut self) -> Result<AxisArg, DirectiveError> {
        if !self.at_scalar() {
            return Err(self.error("expected at least one position"));
        }
        let first = self.scalar()?;
        if self.consume(TokenKind::Dot) {
            return self.parse_custom(first);
        }

        let mut values = vec![first];
        while self.at_scalar() {
            values.push(self.scalar()?);
        }
        let curve = if self.consume(TokenKind::Pipe) {
            Some(self.curve_body()?)
        } else {
            None
        };
        Ok(AxisArg::Waypoints { values, curve })
    }

    fn parse_custom(&mut self, initial: Scalar) -> Result<AxisArg, DirectiveError> {
        let mut clauses = Vec::new();
        while *self.peek() != TokenKind::Eof {
            clauses.push(self.parse_clause()?);
        }
        if clauses.is_empty() {
            return Err(self.error("expected at least one 'time: start - end' clause"));
        }
        Ok(AxisArg::Custom { initial, clauses })
    }

    fn parse_clause(&mut self) -> Result<SegmentClause, DirectiveError> {
        let time = match self.peek().clone() {
            TokenKind::Plus => {
                self.bump();
                ClauseTime::After(self.number()?)
            }
            TokenKind::Number(v) => {
                self.bump();
                ClauseTime::At(v)
            }
            TokenKind::Word(w) => {
                self.bump();
                let kind = match RefKind::from_word(&w) {
                    Some(k @ (RefKind::Like | RefKind::WithEntry | RefKind::WithExit)) => k,
                    _ => return Err(self.error(format!("unknown clause time '{w}'"))),
                };
                ClauseTime::Reference {
                    kind,
                    id: self.word()?,
                }
            }
            other => return Err(self.error(format!("expected a clause time, found {other:?}"))),
        };
        self.expect(TokenKind::Colon)?;

        // `[start]- end`: the dash is required. The lexer reads a spaced
        // `-N` as a negative number, which here stands for `- N`.
        let (start, end) = if self.consume(TokenKind::Dash) {
            (None, self.scalar()?)
        } else {
            let first = self.scalar()?;
            if self.consume(TokenKind::Dash) {
                (Some(first), self.scalar()?)
            } else if let Some(end) = self.signed_end() {
                (Some(first), end)
            } else if let Scalar::Number(v) = first
                && v.is_sign_negative()
            {
                (None, Scalar::Number(-v))
            } else {
                return Err(self.error("expected '-' before the end position"));
            }
        };

        let curve = if self.consume(TokenKind::Pipe) {
            Some(self.curve_body()?)
        } else {
            None
        };

        Ok(SegmentClause {
            time,
            start,
            end,
            curve,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/directive/parser.rs"]
mod tests;
