//! Derived-method-name parser.
//!
//! Converts repository-style method names such as
//! `findDistinctFirst2ByPriceBetweenOrderByNameAsc` into a
//! [`QueryDescriptor`], resolving every field against the entity schema.
//! The grammar is resolved once at call construction; there is no
//! runtime reflection anywhere.

use super::ast::{
    Combinator, Condition, Operator, QueryDescriptor, SortDirection, SortKey,
};
use super::error::{DescriptorError, DescriptorResult};
use crate::schema::{EntitySchema, FieldSpec};

/// Operator suffixes, longest first so `GreaterThan` wins over a
/// hypothetical single-word suffix.
const SUFFIXES: &[(&[&str], Operator)] = &[
    (&["Greater", "Than"], Operator::GreaterThan),
    (&["Less", "Than"], Operator::LessThan),
    (&["Between"], Operator::Between),
    (&["Containing"], Operator::Containing),
    (&["Like"], Operator::Like),
    (&["In"], Operator::In),
];

/// Parser for derived method names.
pub struct DescriptorParser;

impl DescriptorParser {
    /// Parse a method name into a descriptor.
    ///
    /// Grammar: `find [Distinct] [First<N> | Top<N>] By <conditions>?
    /// [OrderBy (<field> (Asc|Desc)?)+]` where conditions are
    /// `<field><op-suffix>?` joined by `And` or `Or` (one kind per name).
    pub fn parse(schema: &EntitySchema, name: &str) -> DescriptorResult<QueryDescriptor> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DescriptorError::Empty);
        }

        let words = split_camel(name);
        let mut idx = 0;

        if words.first().map(String::as_str) != Some("find") {
            return Err(DescriptorError::Syntax(format!(
                "expected name starting with 'find', got '{}'",
                name
            )));
        }
        idx += 1;

        let mut distinct = false;
        if words.get(idx).map(String::as_str) == Some("Distinct") {
            distinct = true;
            idx += 1;
        }

        let mut limit = None;
        if let Some(word) = words.get(idx) {
            if let Some(n) = limit_word(word) {
                limit = Some(n);
                idx += 1;
            }
        }

        if words.get(idx).map(String::as_str) != Some("By") {
            return Err(DescriptorError::Syntax(format!(
                "expected 'By' in '{}'",
                name
            )));
        }
        idx += 1;

        let rest = &words[idx..];
        if rest.is_empty() {
            return Err(DescriptorError::Syntax(format!(
                "nothing follows 'By' in '{}'",
                name
            )));
        }

        // Split off the OrderBy clause before reading conditions.
        let order_pos = rest
            .windows(2)
            .position(|pair| pair[0] == "Order" && pair[1] == "By");
        let (condition_words, order_words) = match order_pos {
            Some(pos) => (&rest[..pos], &rest[pos + 2..]),
            None => (rest, &[][..]),
        };
        if order_pos.is_some() && order_words.is_empty() {
            return Err(DescriptorError::Syntax(format!(
                "'OrderBy' without ordering fields in '{}'",
                name
            )));
        }

        let (conditions, combinator) = parse_conditions(schema, condition_words)?;
        let order = parse_order(schema, order_words)?;

        Ok(QueryDescriptor {
            conditions,
            combinator,
            distinct,
            order,
            limit,
        })
    }
}

/// Split a camel-case name into words. Digits stay attached to the word
/// they follow, so `First2` stays one word.
fn split_camel(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c.is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Read `First<N>` / `Top<N>` words. A bare `First`/`Top` means 1.
fn limit_word(word: &str) -> Option<usize> {
    let digits = word
        .strip_prefix("First")
        .or_else(|| word.strip_prefix("Top"))?;
    if digits.is_empty() {
        return Some(1);
    }
    digits.parse().ok()
}

fn parse_conditions(
    schema: &EntitySchema,
    words: &[String],
) -> DescriptorResult<(Vec<Condition>, Combinator)> {
    if words.is_empty() {
        return Ok((Vec::new(), Combinator::And));
    }

    let mut segments: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut combinator = None;

    for word in words {
        match word.as_str() {
            joiner @ ("And" | "Or") if !current.is_empty() => {
                let kind = if joiner == "And" {
                    Combinator::And
                } else {
                    Combinator::Or
                };
                match combinator {
                    None => combinator = Some(kind),
                    Some(existing) if existing != kind => {
                        return Err(DescriptorError::AmbiguousCombinator);
                    }
                    Some(_) => {}
                }
                segments.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    if current.is_empty() {
        return Err(DescriptorError::Syntax(
            "dangling And/Or at end of conditions".into(),
        ));
    }
    segments.push(current);

    let conditions = segments
        .into_iter()
        .map(|segment| parse_segment(schema, &segment))
        .collect::<DescriptorResult<Vec<_>>>()?;

    Ok((conditions, combinator.unwrap_or(Combinator::And)))
}

/// Parse one condition segment, e.g. `[Price, Greater, Than]`.
fn parse_segment(schema: &EntitySchema, segment: &[&str]) -> DescriptorResult<Condition> {
    // The whole segment as a field first, so a field that happens to end
    // in an operator word still resolves to an equality check.
    if let Some(field) = lookup(schema, segment) {
        return Ok(Condition {
            field,
            op: Operator::Equals,
        });
    }

    for (suffix, op) in SUFFIXES {
        if segment.len() > suffix.len() && segment.ends_with(suffix) {
            let field_words = &segment[..segment.len() - suffix.len()];
            if let Some(field) = lookup(schema, field_words) {
                return Ok(Condition { field, op: *op });
            }
        }
    }

    Err(DescriptorError::UnknownField(snake_case(segment)))
}

fn parse_order(schema: &EntitySchema, words: &[String]) -> DescriptorResult<Vec<SortKey>> {
    let mut keys = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in words {
        match word.as_str() {
            "Asc" | "Desc" if !current.is_empty() => {
                let field = lookup(schema, &current)
                    .ok_or_else(|| DescriptorError::UnknownField(snake_case(&current)))?;
                let direction = if word == "Asc" {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                keys.push(SortKey { field, direction });
                current.clear();
            }
            other => current.push(other),
        }
    }

    // A trailing key without Asc/Desc defaults to ascending.
    if !current.is_empty() {
        let field = lookup(schema, &current)
            .ok_or_else(|| DescriptorError::UnknownField(snake_case(&current)))?;
        keys.push(SortKey {
            field,
            direction: SortDirection::Ascending,
        });
    }

    Ok(keys)
}

fn lookup<S: AsRef<str>>(schema: &EntitySchema, words: &[S]) -> Option<FieldSpec> {
    schema.field(&snake_case(words)).cloned()
}

/// Join camel words into the snake_case field name used in records,
/// e.g. `[Date, Created]` -> `date_created`.
fn snake_case<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
