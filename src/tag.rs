//! Delimiter-tag selection for generalized strings.
//!
//! A generalized string embeds raw, unescaped content between a pair of
//! backtick-delimited tags: `` ` ``tag`` ` ``content`` ` ``tag`` ` ``. The
//! tag is chosen so the delimiter sequence never occurs inside the content,
//! which is what lets a generalized string carry quotes, backslashes,
//! newlines, or an entire embedded PJson document verbatim.

/// The delimiter character for generalized strings.
pub(crate) const TAG_CHAR: char = '`';

/// Picks the shortest collision-free tag for `content`.
///
/// Escalates through the empty tag, `_`, `__`, … until the delimiter
/// sequence `` ` ``tag`` ` `` no longer occurs in the content. The empty
/// tag is rejected whenever the content contains a backtick at all.
/// Terminates for any finite content, since a run of underscores longer
/// than the content cannot occur inside it.
///
/// The check is literal substring containment, kept identical to the
/// original selection algorithm so previously generated PJson files keep
/// their tags.
///
/// # Examples
///
/// ```rust
/// use pjson::generate_tag;
///
/// assert_eq!(generate_tag("plain text"), "");
/// assert_eq!(generate_tag("has a `backtick`"), "_");
/// assert_eq!(generate_tag("already uses `_` as a tag"), "__");
/// ```
#[must_use]
pub fn generate_tag(content: &str) -> String {
    let mut tag = String::new();
    while collides(content, &tag) {
        tag.push('_');
    }
    tag
}

fn collides(content: &str, tag: &str) -> bool {
    if tag.is_empty() {
        return content.contains(TAG_CHAR);
    }
    let delimiter = format!("{TAG_CHAR}{tag}{TAG_CHAR}");
    content.contains(&delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_for_backtick_free_content() {
        assert_eq!(generate_tag(""), "");
        assert_eq!(generate_tag("hello \"world\" \\ with\nnewline"), "");
    }

    #[test]
    fn single_backtick_forces_underscore() {
        assert_eq!(generate_tag("`"), "_");
        assert_eq!(generate_tag("String with `backtick` inside"), "_");
        assert_eq!(generate_tag("String with ``double`` backticks"), "_");
    }

    #[test]
    fn escalates_past_occupied_tags() {
        assert_eq!(generate_tag("contains `_` tag"), "__");
        assert_eq!(generate_tag("contains `_` and `__` tags"), "___");
    }

    #[test]
    fn tag_never_collides() {
        let contents = [
            "",
            "`",
            "``",
            "`_`",
            "`_` `__` `___`",
            "{nested: `''`doc`''`,}",
        ];
        for content in contents {
            let tag = generate_tag(content);
            let delimiter = format!("`{tag}`");
            assert!(
                !content.contains(&delimiter),
                "tag {tag:?} collides with {content:?}"
            );
        }
    }
}
