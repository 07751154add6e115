//! HTML post-processing

use lazy_static::lazy_static;
use regex::Regex;

use super::ScribeError;

lazy_static! {
    static ref INTER_TAG_WHITESPACE: Regex = Regex::new(r">[\r\n\t ]+<").unwrap();
}

/// Removes whitespace runs found strictly between a closing `>` and the next `<`.
pub fn flatten_html(html: &str) -> String {
    INTER_TAG_WHITESPACE.replace_all(html, "><").into_owned()
}

/// Moves `<style>` rules onto the `style` attribute of matching elements,
/// then flattens the result.
pub fn inline_and_flatten(html: &str) -> Result<String, ScribeError> {
    let inlined = css_inline::inline(html).map_err(|err| ScribeError::InlineCss(err.to_string()))?;

    Ok(flatten_html(&inlined))
}
