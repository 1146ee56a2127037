//! Parsing free-text model answers into numeric predictions.

use crate::error::{EvalError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// First token that looks like a rating: a digit, optionally followed by
/// a decimal point and one more digit. A trailing " stars" is tolerated
/// but contributes nothing to the captured value.
static RATING_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d(?:\.\d)?)(?: stars)?").expect("rating-token pattern is valid")
});

/// Extract the numeric rating prediction from a model answer.
///
/// Takes the first matching token anywhere in the text, so answers like
/// "The movie deserves 4 stars out of 5" parse to 4.0. An answer with no
/// digit at all is a parse error.
pub fn parse_prediction(text: &str) -> Result<f32> {
    let captures = RATING_TOKEN
        .captures(text)
        .ok_or_else(|| EvalError::NoNumericToken {
            text: text.to_string(),
        })?;

    captures[1].parse().map_err(|_| EvalError::NoNumericToken {
        text: text.to_string(),
    })
}
