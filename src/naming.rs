//! Filename conventions for posts and gallery images.
//!
//! Both post files and gallery images may carry an optional numeric prefix
//! (`NNN-`) used only for ordering on disk. The prefix never reaches a URL:
//!
//! - `010-happy-new-year.md` → id `happy-new-year`
//! - `Happy New Year.md` → id `happy-new-year`
//! - `002-skyline.png` → gallery position 2

/// Result of splitting a stem like `010-happy-new-year`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-happy-new-year`).
    pub number: Option<u32>,
    /// Remainder after `NNN-`, or the full input when unnumbered.
    pub name: String,
    /// `name` with dashes and underscores turned into spaces.
    pub display_title: String,
}

/// Split an optional `NNN-` prefix off a file stem.
///
/// - `"010-happy-new-year"` → number=Some(10), name="happy-new-year"
/// - `"001"` → number=Some(1), name=""
/// - `"binary-objections"` → number=None, name="binary-objections"
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
            display_title: display_title(rest),
        };
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: stem.to_string(),
        display_title: display_title(stem),
    }
}

fn display_title(name: &str) -> String {
    name.replace(['-', '_'], " ")
}

/// Turn a name into a URL-safe post identifier.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run of
/// characters into a single dash. Leading and trailing dashes are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Derive a post id from a markdown file stem.
pub fn post_id(stem: &str) -> String {
    let parsed = parse_entry_name(stem);
    if parsed.name.is_empty() {
        slugify(stem)
    } else {
        slugify(&parsed.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_post_stem() {
        let p = parse_entry_name("010-happy-new-year");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.name, "happy-new-year");
        assert_eq!(p.display_title, "happy new year");
    }

    #[test]
    fn number_only_stem() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn unnumbered_stem_keeps_dashes_in_name() {
        let p = parse_entry_name("binary-objections");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "binary-objections");
        assert_eq!(p.display_title, "binary objections");
    }

    #[test]
    fn underscores_become_spaces_in_display_title() {
        assert_eq!(parse_entry_name("rails_views").display_title, "rails views");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(
            slugify("A DSL For Writing HTML in Ruby!"),
            "a-dsl-for-writing-html-in-ruby"
        );
        assert_eq!(slugify("--already--dashed--"), "already-dashed");
        assert_eq!(slugify("ünïcode café"), "n-code-caf");
    }

    #[test]
    fn post_id_strips_number_prefix() {
        assert_eq!(post_id("010-Happy-New-Year"), "happy-new-year");
        assert_eq!(post_id("component-based-rails-views"), "component-based-rails-views");
    }

    #[test]
    fn post_id_for_number_only_stem_keeps_number() {
        assert_eq!(post_id("2020"), "2020");
    }
}
