use have_diag::{Context, Error, JsonResult};

use crate::byte_view::ByteView;
use crate::element::{ElementKind, JsonElement};
use crate::location::SourceLocation;
use crate::token::TokenKind;
use crate::tokenizer::next_token;

/// Parses a complete document, failing if any trailing non-whitespace
/// content follows the root element.
pub fn parse(view: &ByteView) -> JsonResult<JsonElement> {
    let (root, end) = parse_element(None, SourceLocation::start(), view)
        .context("Failed parsing document")?;

    if let Ok(extra) = next_token(view, end) {
        return Err(Error::new(format!(
            "Unexpected trailing content at location {}",
            extra.start
        )));
    }

    Ok(root)
}

fn parse_element(
    label: Option<String>,
    loc: SourceLocation,
    view: &ByteView,
) -> JsonResult<(JsonElement, SourceLocation)> {
    let tok = next_token(view, loc)?;

    match tok.kind {
        TokenKind::OpenObject => parse_list(
            label,
            tok.end,
            ElementKind::Object,
            TokenKind::CloseObject,
            true,
            tok.start,
            view,
        )
        .context(format!("Failed parsing object at location {}", tok.start)),

        TokenKind::OpenArray => parse_list(
            label,
            tok.end,
            ElementKind::Array,
            TokenKind::CloseArray,
            false,
            tok.start,
            view,
        )
        .context(format!("Failed parsing list at location {}", tok.start)),

        TokenKind::StringLiteral => Ok((
            JsonElement {
                kind: ElementKind::String,
                location: tok.start,
                label,
                children: Vec::new(),
                string_value: tok.text,
                number_value: None,
                boolean_value: None,
            },
            tok.end,
        )),

        TokenKind::IntegerLiteral | TokenKind::DecimalLiteral => Ok((
            JsonElement {
                kind: ElementKind::Number,
                location: tok.start,
                label,
                children: Vec::new(),
                string_value: None,
                number_value: tok.number,
                boolean_value: None,
            },
            tok.end,
        )),

        TokenKind::TrueLiteral | TokenKind::FalseLiteral => Ok((
            JsonElement {
                kind: ElementKind::Boolean,
                location: tok.start,
                label,
                children: Vec::new(),
                string_value: None,
                number_value: None,
                boolean_value: Some(tok.kind == TokenKind::TrueLiteral),
            },
            tok.end,
        )),

        TokenKind::NullLiteral => Ok((
            JsonElement {
                kind: ElementKind::Null,
                location: tok.start,
                label,
                children: Vec::new(),
                string_value: None,
                number_value: None,
                boolean_value: None,
            },
            tok.end,
        )),

        _ => Err(Error::new(format!(
            "Unexpected token at location {}",
            tok.start
        ))),
    }
}

/// Shared recursion for `{...}` and `[...]`. `after_open` is the location
/// right after the opening bracket was consumed; `list_start` is where
/// the opening bracket itself began (used only for error context).
#[allow(clippy::too_many_arguments)]
fn parse_list(
    label: Option<String>,
    after_open: SourceLocation,
    kind: ElementKind,
    end_kind: TokenKind,
    require_keys: bool,
    list_start: SourceLocation,
    view: &ByteView,
) -> JsonResult<(JsonElement, SourceLocation)> {
    let mut children = Vec::new();
    let mut loc = after_open;
    let mut first = true;

    loop {
        if first {
            let peek = next_token(view, loc)?;
            if peek.kind == end_kind {
                loc = peek.end;
                break;
            }
        }
        first = false;

        let mut cur_loc = loc;
        let mut child_label = None;

        if require_keys {
            let key_tok = next_token(view, cur_loc)?;
            if key_tok.kind != TokenKind::StringLiteral {
                return Err(Error::new(format!(
                    "Expected object key at location {}",
                    key_tok.start
                )));
            }
            cur_loc = key_tok.end;

            let assign_tok = next_token(view, cur_loc)?;
            if assign_tok.kind != TokenKind::Assign {
                return Err(Error::new(format!(
                    "Expected ':' after key at location {}",
                    assign_tok.start
                )));
            }
            cur_loc = assign_tok.end;

            child_label = key_tok.text;
        }

        let context_label = child_label.clone().unwrap_or_else(|| children.len().to_string());
        let (child, after) = parse_element(child_label, cur_loc, view)
            .context(format!("Failed parsing child element '{context_label}'"))?;
        children.push(child);
        loc = after;

        let sep_tok = next_token(view, loc)?;
        if sep_tok.kind == end_kind {
            loc = sep_tok.end;
            break;
        }
        if sep_tok.kind == TokenKind::Separator {
            loc = sep_tok.end;
            continue;
        }
        return Err(Error::new(format!(
            "Unexpected list token at location {}",
            sep_tok.start
        )));
    }

    Ok((
        JsonElement {
            kind,
            location: list_start,
            label,
            children,
            string_value: None,
            number_value: None,
            boolean_value: None,
        },
        loc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> JsonResult<JsonElement> {
        let view = ByteView::new(input.as_bytes());
        parse(&view)
    }

    #[test]
    fn parses_mixed_object_with_array_of_scalars() {
        let root = parse_str(r#"{"x": 1, "y": [true, null, false]}"#).unwrap();
        assert_eq!(root.kind, ElementKind::Object);
        let y = root.find_by_label("y").unwrap();
        assert_eq!(y.kind, ElementKind::Array);
        assert_eq!(y.child_count(), 3);
        let kinds: Vec<_> = y.children().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ElementKind::Boolean, ElementKind::Null, ElementKind::Boolean]
        );
        assert_eq!(y.children().next().unwrap().boolean_value, Some(true));
        assert_eq!(y.children().nth(2).unwrap().boolean_value, Some(false));
    }

    #[test]
    fn empty_object_and_array_have_zero_children() {
        let obj = parse_str("{}").unwrap();
        assert_eq!(obj.child_count(), 0);
        let arr = parse_str("[]").unwrap();
        assert_eq!(arr.child_count(), 0);
    }

    #[test]
    fn rejects_leading_comma() {
        let err = parse_str(r#"{,"x":1}"#).unwrap_err();
        assert!(err.to_string().contains("Expected object key"));
    }

    #[test]
    fn rejects_trailing_content() {
        let err = parse_str(r#"{"x":1} garbage"#).unwrap_err();
        assert!(err.to_string().contains("trailing content"));
    }

    #[test]
    fn error_chain_names_outer_and_inner_context() {
        let err = parse_str(r#"{"pairs": [{"x0": +1}]}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed parsing document"));
        assert!(msg.contains("Invalid character '+'"));
    }

    #[test]
    fn position_strictly_increases_across_pre_order_traversal() {
        fn walk(e: &JsonElement, last: &mut usize) {
            assert!(e.location.position >= *last);
            *last = e.location.position;
            for child in e.children() {
                walk(child, last);
            }
        }
        let root = parse_str(r#"{"a": {"b": 1, "c": [1, 2]}}"#).unwrap();
        let mut last = 0;
        walk(&root, &mut last);
    }
}
