//! Splitting a claim body into its limitations

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `:` or `;`, optionally followed by the word "and"
    static ref DELIMITER_PATTERN: Regex = Regex::new(r"(?i)[:;](?:\s+and\b)?").unwrap();

    /// A fragment opening with the word "and"
    static ref LEADING_AND: Regex = Regex::new(r"(?i)^and\b").unwrap();
}

/// Split a claim body into ordered, whitespace-normalized limitations
///
/// The delimiter stays on the clause it ends, so `"a frame; and a handle."`
/// becomes `["a frame; and", "a handle."]`.
pub fn tokenize(body: &str) -> Vec<String> {
    let mut limitations = Vec::new();
    let mut last = 0;

    for m in DELIMITER_PATTERN.find_iter(body) {
        push_clause(&mut limitations, &body[last..m.start()], m.as_str());
        last = m.end();
    }
    push_clause(&mut limitations, &body[last..], "");

    limitations
}

/// Tokenize a claim delivered as several fragments by a structural parser
///
/// A fragment that opens with "and" gives the word back to the fragment
/// before it, then every fragment is tokenized on its own punctuation.
pub fn tokenize_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    stitch_fragments(fragments)
        .iter()
        .flat_map(|fragment| tokenize(fragment))
        .collect()
}

/// Move a leading "and" onto the end of the preceding fragment
pub fn stitch_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    let mut stitched: Vec<String> = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        let mut fragment = normalize_whitespace(fragment.as_ref());
        if let Some(previous) = stitched.last_mut() {
            if let Some(m) = LEADING_AND.find(&fragment) {
                previous.push(' ');
                previous.push_str(m.as_str());
                fragment = fragment[m.end()..].trim_start().to_string();
            }
        }
        if !fragment.is_empty() {
            stitched.push(fragment);
        }
    }

    stitched
}

/// Lowercase the first letter of the first limitation when it opens an
/// ordinary capitalized word ("A widget", "The method")
///
/// Acronyms ("LED lamp") and non-letter openers ("(Canceled)") are untouched.
pub fn decapitalize_leading_word(limitations: &mut [String]) {
    let Some(first) = limitations.first_mut() else {
        return;
    };
    let mut chars = first.chars();
    let Some(initial) = chars.next() else {
        return;
    };
    let second = chars.next();

    let ordinary_word = initial.is_uppercase() && second.map_or(true, |c| !c.is_uppercase());
    if ordinary_word {
        let lowered: String = initial.to_lowercase().collect();
        first.replace_range(..initial.len_utf8(), &lowered);
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_clause(limitations: &mut Vec<String>, clause: &str, delimiter: &str) {
    let clause = normalize_whitespace(clause);
    let delimiter = normalize_whitespace(delimiter);

    if clause.is_empty() {
        // Stray delimiter: keep it on the previous clause so no text is lost
        if let Some(previous) = limitations.last_mut() {
            previous.push_str(&delimiter);
        } else if !delimiter.is_empty() {
            limitations.push(delimiter);
        }
        return;
    }

    limitations.push(format!("{}{}", clause, delimiter));
}
