use have_diag::{Context, Error, JsonResult};
use have_json::{ElementKind, JsonElement};

/// One decoded `{x0, y0, x1, y1}` pair, borrowed from the parsed tree.
pub struct PairRef<'a> {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub element: &'a JsonElement,
}

/// The three top-level fields the loader expects, per spec.md §6's
/// `{pairs, avg, count}` shape. These checks are structural — spec.md §7.3
/// places them outside the hand-rolled parser's own error taxonomy, raised
/// here by the consumer with the same `have_diag::Error` type.
pub fn pairs<'a>(root: &'a JsonElement) -> JsonResult<Vec<PairRef<'a>>> {
    if root.kind != ElementKind::Object {
        return Err(Error::new("Root element is not an object"));
    }

    let pairs_element = root
        .find_by_label("pairs")
        .ok_or_else(|| Error::new("Missing required field 'pairs'"))?;

    if pairs_element.kind != ElementKind::Array {
        return Err(Error::new("Field 'pairs' is not an array"));
    }

    pairs_element
        .children()
        .enumerate()
        .map(|(i, child)| decode_pair(i, child))
        .collect()
}

fn decode_pair(index: usize, element: &JsonElement) -> JsonResult<PairRef<'_>> {
    let field = |name: &str| -> JsonResult<f64> {
        element
            .find_by_label(name)
            .ok_or_else(|| Error::new(format!("Pair {index} is missing field '{name}'")))?
            .number_value
            .ok_or_else(|| Error::new(format!("Pair {index}'s field '{name}' is not a number")))
    };

    Ok(PairRef {
        x0: field("x0").context(format!("Failed decoding pair {index}"))?,
        y0: field("y0").context(format!("Failed decoding pair {index}"))?,
        x1: field("x1").context(format!("Failed decoding pair {index}"))?,
        y1: field("y1").context(format!("Failed decoding pair {index}"))?,
        element,
    })
}

pub fn avg(root: &JsonElement) -> JsonResult<f64> {
    root.find_by_label("avg")
        .ok_or_else(|| Error::new("Missing required field 'avg'"))?
        .number_value
        .ok_or_else(|| Error::new("Field 'avg' is not a number"))
}

pub fn count(root: &JsonElement) -> JsonResult<u64> {
    let value = root
        .find_by_label("count")
        .ok_or_else(|| Error::new("Missing required field 'count'"))?
        .number_value
        .ok_or_else(|| Error::new("Field 'count' is not a number"))?;
    Ok(value as u64)
}

/// Validates that the declared `count` matches the actual number of pairs
/// decoded, per spec.md §7.3's "count mismatch" structural error.
pub fn check_count(declared: u64, actual: usize) -> JsonResult<()> {
    if declared != actual as u64 {
        return Err(Error::new(format!(
            "Declared count {declared} does not match {actual} decoded pairs"
        )));
    }
    Ok(())
}
