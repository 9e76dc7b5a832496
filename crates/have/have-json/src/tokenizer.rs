//! Byte-level tokenizer. No allocations outside of decoded string literals;
//! everything else is index arithmetic over the raw buffer, in the same
//! manual byte-walking style as a hot-path field scanner.

use have_diag::{Error, JsonResult};

use crate::byte_view::ByteView;
use crate::location::SourceLocation;
use crate::token::{Token, TokenKind};

const WHITESPACE: [u8; 4] = [b' ', b'\t', b'\r', b'\n'];

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

fn skip_whitespace(view: &ByteView, mut loc: SourceLocation) -> SourceLocation {
    while let Some(b) = view.byte_at(loc.position) {
        if !is_whitespace(b) {
            break;
        }
        loc = loc.advance_one(b);
    }
    loc
}

/// Consumes one token starting at `loc` (after skipping leading
/// whitespace) and returns it, or a lexical error.
pub fn next_token(view: &ByteView, loc: SourceLocation) -> JsonResult<Token> {
    let loc = skip_whitespace(view, loc);

    let Some(c) = view.byte_at(loc.position) else {
        return Err(Error::new(format!(
            "Unexpected end of input at location {loc}"
        )));
    };

    match c {
        b'{' => Ok(Token::operator(TokenKind::OpenObject, loc, c)),
        b'}' => Ok(Token::operator(TokenKind::CloseObject, loc, c)),
        b'[' => Ok(Token::operator(TokenKind::OpenArray, loc, c)),
        b']' => Ok(Token::operator(TokenKind::CloseArray, loc, c)),
        b':' => Ok(Token::operator(TokenKind::Assign, loc, c)),
        b',' => Ok(Token::operator(TokenKind::Separator, loc, c)),
        b'-' | b'0'..=b'9' => parse_number(view, loc),
        b'"' => parse_string(view, loc),
        b't' => parse_keyword(view, loc, "true", TokenKind::TrueLiteral),
        b'f' => parse_keyword(view, loc, "false", TokenKind::FalseLiteral),
        b'n' => parse_keyword(view, loc, "null", TokenKind::NullLiteral),
        other => Err(Error::new(format!(
            "Invalid character '{}' at location {loc}",
            other as char
        ))),
    }
}

fn parse_number(view: &ByteView, start: SourceLocation) -> JsonResult<Token> {
    let bytes = view.as_slice();
    let len = bytes.len();
    let mut i = start.position;

    let negative = bytes[i] == b'-';
    if negative {
        i += 1;
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return Err(Error::new(format!(
            "Malformed number literal at location {start}"
        )));
    }

    let mut mantissa: f64 = 0.0;
    for &b in &bytes[int_start..i] {
        mantissa = mantissa * 10.0 + (b - b'0') as f64;
    }

    let mut has_dot = false;
    if i < len && bytes[i] == b'.' {
        has_dot = true;
        i += 1;
        let frac_start = i;
        let mut factor = 0.1;
        while i < len && bytes[i].is_ascii_digit() {
            mantissa += (bytes[i] - b'0') as f64 * factor;
            factor /= 10.0;
            i += 1;
        }
        if i == frac_start {
            return Err(Error::new(format!(
                "Malformed number literal at location {start}: missing fractional digits"
            )));
        }
    }

    if negative {
        mantissa = -mantissa;
    }

    let end = start.advance_by(i - start.position);
    let kind = if has_dot {
        TokenKind::DecimalLiteral
    } else {
        TokenKind::IntegerLiteral
    };

    Ok(Token {
        kind,
        start,
        end,
        number: Some(mantissa),
        text: None,
        byte: None,
    })
}

fn parse_string(view: &ByteView, start: SourceLocation) -> JsonResult<Token> {
    let bytes = view.as_slice();
    let len = bytes.len();
    let mut i = start.position + 1; // skip opening quote
    let mut out = String::new();

    loop {
        if i >= len {
            return Err(Error::new(format!(
                "Unterminated string starting at location {start}"
            )));
        }
        let b = bytes[i];
        match b {
            b'"' => {
                i += 1;
                break;
            }
            b'\\' => {
                if i + 1 >= len {
                    return Err(Error::new(format!(
                        "Unterminated escape sequence at location {start}"
                    )));
                }
                let escaped = bytes[i + 1];
                let decoded = match escaped {
                    b'b' => 0x08u8,
                    b'f' => 0x0Cu8,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'"' => b'"',
                    b'\\' => b'\\',
                    other => {
                        return Err(Error::new(format!(
                            "Invalid escape sequence '\\{}' at location {start}",
                            other as char
                        )));
                    }
                };
                out.push(decoded as char);
                i += 2;
            }
            b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x08 => {
                return Err(Error::new(format!(
                    "Invalid whitespace byte inside string at location {start}"
                )));
            }
            other => {
                out.push(other as char);
                i += 1;
            }
        }
    }

    let end = start.advance_by(i - start.position);
    Ok(Token {
        kind: TokenKind::StringLiteral,
        start,
        end,
        number: None,
        text: Some(out),
        byte: None,
    })
}

fn parse_keyword(
    view: &ByteView,
    start: SourceLocation,
    expected: &str,
    kind: TokenKind,
) -> JsonResult<Token> {
    let bytes = view.as_slice();
    let expected_bytes = expected.as_bytes();
    let end_pos = start.position + expected_bytes.len();

    if end_pos > bytes.len() || &bytes[start.position..end_pos] != expected_bytes {
        let available = end_pos.min(bytes.len());
        let actual = String::from_utf8_lossy(&bytes[start.position..available]);
        return Err(Error::new(format!(
            "Unknown keyword starting with '{actual}', expected '{expected}', at location {start}"
        )));
    }

    Ok(Token {
        kind,
        start,
        end: start.advance_by(expected_bytes.len()),
        number: None,
        text: None,
        byte: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let view = ByteView::new(input.as_bytes());
        let mut loc = SourceLocation::start();
        let mut out = Vec::new();
        loop {
            match next_token(&view, loc) {
                Ok(tok) => {
                    loc = tok.end;
                    out.push(tok);
                }
                Err(_) => break,
            }
        }
        out
    }

    #[test]
    fn tokenizes_object_with_negative_decimal() {
        let toks = tokens(r#"{"a":-12.5}"#);
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenObject,
                TokenKind::StringLiteral,
                TokenKind::Assign,
                TokenKind::DecimalLiteral,
                TokenKind::CloseObject,
            ]
        );
        assert_eq!(toks[3].number, Some(-12.5));
    }

    #[test]
    fn whitespace_between_tokens_does_not_change_kinds() {
        let a = tokens(r#"{"x":1}"#);
        let b = tokens("  {  \"x\" :\t1\n}  ");
        let ak: Vec<_> = a.iter().map(|t| t.kind).collect();
        let bk: Vec<_> = b.iter().map(|t| t.kind).collect();
        assert_eq!(ak, bk);
    }

    #[test]
    fn rejects_unsupported_escape() {
        let view = ByteView::new(br#""a\x""#);
        let err = next_token(&view, SourceLocation::start()).unwrap_err();
        assert!(err.to_string().contains("Invalid escape sequence"));
    }

    #[test]
    fn rejects_leading_plus() {
        let view = ByteView::new(b"+5");
        let err = next_token(&view, SourceLocation::start()).unwrap_err();
        assert!(err.to_string().contains("Invalid character '+'"));
    }

    #[test]
    fn decodes_all_escapes() {
        let view = ByteView::new(br#""\b\f\n\r\t\"\\""#);
        let tok = next_token(&view, SourceLocation::start()).unwrap();
        assert_eq!(tok.text.unwrap(), "\u{8}\u{c}\n\r\t\"\\");
    }

    #[test]
    fn keyword_mismatch_names_actual_prefix() {
        let view = ByteView::new(b"tru_");
        let err = next_token(&view, SourceLocation::start()).unwrap_err();
        assert!(err.to_string().contains("Unknown keyword"));
    }
}
