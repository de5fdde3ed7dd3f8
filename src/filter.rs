//! Filter expression compilation and evaluation.
//!
//! The document store exposes a small wiki-style filter language used by
//! views to select nodes, edges and edge types. An expression is a sequence
//! of whitespace-separated runs. A run is either a bare word (exact title
//! match) or a bracketed step `[op[param]]`, optionally prefixed with `-` to
//! exclude its matches from the result:
//!
//! ```text
//! [prefix[docs/]] -[title[docs/scratch]] "bare title"
//! ```
//!
//! Supported steps: `title`, `prefix`, `suffix`, `regexp`, `all`.
//!
//! Compilation never fails outward: a malformed run compiles to a
//! match-nothing step and logs a warning, so a bad expression degrades to a
//! smaller (possibly empty) match set rather than an error.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::GraphViewError;

/// A single predicate over a document key.
#[derive(Debug, Clone)]
enum FilterStep {
    Title(String),
    Prefix(String),
    Suffix(String),
    Regexp(Regex),
    All,
    /// Degraded form of a run that failed to parse. Matches nothing.
    Nothing,
}

impl FilterStep {
    fn matches(&self, key: &str) -> bool {
        match self {
            FilterStep::Title(title) => key == title,
            FilterStep::Prefix(prefix) => key.starts_with(prefix.as_str()),
            FilterStep::Suffix(suffix) => key.ends_with(suffix.as_str()),
            FilterStep::Regexp(re) => re.is_match(key),
            FilterStep::All => true,
            FilterStep::Nothing => false,
        }
    }
}

impl PartialEq for FilterStep {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterStep::Title(l), FilterStep::Title(r)) => l == r,
            (FilterStep::Prefix(l), FilterStep::Prefix(r)) => l == r,
            (FilterStep::Suffix(l), FilterStep::Suffix(r)) => l == r,
            (FilterStep::Regexp(l), FilterStep::Regexp(r)) => l.as_str() == r.as_str(),
            (FilterStep::All, FilterStep::All) => true,
            (FilterStep::Nothing, FilterStep::Nothing) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FilterRun {
    exclude: bool,
    step: FilterStep,
}

/// A compiled, executable filter expression.
///
/// Evaluation takes the union of all inclusive runs over a source key list
/// (in source order), then removes keys matched by any exclusive run. An
/// expression with only exclusive runs starts from the full source list; the
/// empty expression matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    expression: String,
    runs: Vec<FilterRun>,
}

impl CompiledFilter {
    /// Compile an expression, degrading malformed runs to match-nothing.
    pub fn compile(expression: &str) -> CompiledFilter {
        let mut runs = Vec::new();
        for raw in tokenize(expression) {
            match parse_run(&raw) {
                Ok(run) => runs.push(run),
                Err(err) => {
                    tracing::warn!("Degrading malformed filter run '{raw}' to match-nothing: {err}");
                    runs.push(FilterRun {
                        exclude: false,
                        step: FilterStep::Nothing,
                    });
                }
            }
        }
        CompiledFilter {
            expression: expression.to_string(),
            runs,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate the filter against a list of source keys.
    pub fn run<'a, I>(&self, source: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let has_inclusive = self.runs.iter().any(|run| !run.exclude);
        source
            .into_iter()
            .filter(|key| {
                let included = if has_inclusive {
                    self.runs
                        .iter()
                        .any(|run| !run.exclude && run.step.matches(key))
                } else {
                    // Exclusion-only expressions subtract from the source set.
                    !self.runs.is_empty()
                };
                included
                    && !self
                        .runs
                        .iter()
                        .any(|run| run.exclude && run.step.matches(key))
            })
            .map(str::to_string)
            .collect()
    }

    /// True when the filter matches the single given key.
    pub fn matches(&self, key: &str) -> bool {
        !self.run(std::iter::once(key)).is_empty()
    }
}

impl Serialize for CompiledFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression)
    }
}

impl<'de> Deserialize<'de> for CompiledFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expression = String::deserialize(deserializer)?;
        Ok(CompiledFilter::compile(&expression))
    }
}

/// Split an expression into raw run strings. Bracketed runs may contain
/// whitespace inside their parameter, so this is not a plain split.
fn tokenize(expression: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = expression.trim_start();
    while !rest.is_empty() {
        let bracket_start = if rest.starts_with("-[") {
            Some(1)
        } else if rest.starts_with('[') {
            Some(0)
        } else {
            None
        };
        let end = match bracket_start {
            Some(offset) => match rest[offset..].find("]]") {
                Some(idx) => offset + idx + 2,
                // Unterminated run: consume the remainder so parse_run can
                // report it as malformed.
                None => rest.len(),
            },
            None => rest.find(char::is_whitespace).unwrap_or(rest.len()),
        };
        tokens.push(rest[..end].to_string());
        rest = rest[end..].trim_start();
    }
    tokens
}

fn parse_run(raw: &str) -> Result<FilterRun, GraphViewError> {
    let (exclude, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if !body.starts_with('[') {
        // Bare word: exact title match.
        return Ok(FilterRun {
            exclude,
            step: FilterStep::Title(body.to_string()),
        });
    }
    let inner = body
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix("]]"))
        .ok_or_else(|| GraphViewError::Filter(format!("Unterminated run: '{raw}'")))?;
    let (op, param) = inner
        .split_once('[')
        .ok_or_else(|| GraphViewError::Filter(format!("Missing parameter bracket: '{raw}'")))?;
    let step = match op {
        "title" => FilterStep::Title(param.to_string()),
        "prefix" => FilterStep::Prefix(param.to_string()),
        "suffix" => FilterStep::Suffix(param.to_string()),
        "regexp" => FilterStep::Regexp(Regex::new(param)?),
        "all" => FilterStep::All,
        other => {
            return Err(GraphViewError::Filter(format!(
                "Unknown filter operator '{other}'"
            )))
        }
    };
    Ok(FilterRun { exclude, step })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str, source: &[&str]) -> Vec<String> {
        CompiledFilter::compile(expr).run(source.iter().copied())
    }

    #[test]
    fn test_empty_expression_matches_nothing() {
        assert!(eval("", &["a", "b"]).is_empty());
        assert!(eval("   ", &["a", "b"]).is_empty());
    }

    #[test]
    fn test_bare_words_match_titles() {
        assert_eq!(eval("a c", &["a", "b", "c"]), vec!["a", "c"]);
    }

    #[test]
    fn test_title_and_prefix_steps() {
        let source = ["docs/intro", "docs/outro", "notes/intro"];
        assert_eq!(eval("[title[docs/intro]]", &source), vec!["docs/intro"]);
        assert_eq!(
            eval("[prefix[docs/]]", &source),
            vec!["docs/intro", "docs/outro"]
        );
        assert_eq!(
            eval("[suffix[intro]]", &source),
            vec!["docs/intro", "notes/intro"]
        );
    }

    #[test]
    fn test_regexp_step() {
        let source = ["edge/friend", "edge/follows", "edge/enemy"];
        assert_eq!(
            eval("[regexp[f(riend|ollows)$]]", &source),
            vec!["edge/friend", "edge/follows"]
        );
    }

    #[test]
    fn test_all_and_exclusion() {
        let source = ["a", "b", "c"];
        assert_eq!(eval("[all[]]", &source), vec!["a", "b", "c"]);
        assert_eq!(eval("[all[]] -[title[b]]", &source), vec!["a", "c"]);
        // Exclusion-only expressions subtract from the source set.
        assert_eq!(eval("-[title[b]]", &source), vec!["a", "c"]);
    }

    #[test]
    fn test_param_with_whitespace() {
        let source = ["My Title", "Other"];
        assert_eq!(eval("[title[My Title]]", &source), vec!["My Title"]);
    }

    #[test]
    fn test_malformed_runs_degrade_to_match_nothing() {
        // Invalid regex
        assert!(eval("[regexp[(]]", &["(", "a"]).is_empty());
        // Unknown operator
        assert!(eval("[frobnicate[a]]", &["a"]).is_empty());
        // Unterminated bracket
        assert!(eval("[title[a", &["a"]).is_empty());
        // Healthy runs in the same expression still apply.
        assert_eq!(eval("[regexp[(]] [title[a]]", &["a", "b"]), vec!["a"]);
    }

    #[test]
    fn test_matches_single_key() {
        let filter = CompiledFilter::compile("[prefix[docs/]]");
        assert!(filter.matches("docs/intro"));
        assert!(!filter.matches("notes/intro"));
    }

    #[test]
    fn test_serde_round_trip_recompiles() {
        let filter = CompiledFilter::compile("[prefix[docs/]] -[title[docs/x]]");
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, "\"[prefix[docs/]] -[title[docs/x]]\"");
        let back: CompiledFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
    }
}
