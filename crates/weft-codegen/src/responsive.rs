//! Responsive rewrite of utility class strings.
//!
//! A class string is rewritten token by token against an ordered rule list;
//! the first rule matching a token wins and tokens no rule matches pass
//! through. Each rule belongs to a family of utilities (e.g. font sizes).
//! A rule is skipped when the string already holds a breakpoint-prefixed
//! member of its family, which makes the rewrite idempotent.

use crate::error::Result;
use regex::Regex;

/// Breakpoint prefixes recognised in class tokens.
pub const BREAKPOINTS: [&str; 5] = ["sm", "md", "lg", "xl", "2xl"];

/// How a rule recognises a token.
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(String),
    Pattern(Regex),
}

/// One rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    matcher: Matcher,
    replacement: String,
    family: Regex,
}

impl RewriteRule {
    /// Rule matching exactly `token`.
    pub fn literal(token: &str, replacement: &str, family: &str) -> Result<Self> {
        Ok(Self {
            matcher: Matcher::Literal(token.to_string()),
            replacement: replacement.to_string(),
            family: anchored(family)?,
        })
    }

    /// Rule matching a whole token against `pattern`; `replacement` may use `${n}`.
    pub fn pattern(pattern: &str, replacement: &str, family: &str) -> Result<Self> {
        Ok(Self {
            matcher: Matcher::Pattern(anchored(pattern)?),
            replacement: replacement.to_string(),
            family: anchored(family)?,
        })
    }

    fn apply(&self, token: &str) -> Option<String> {
        match &self.matcher {
            Matcher::Literal(literal) => (literal == token).then(|| self.replacement.clone()),
            Matcher::Pattern(re) => re
                .is_match(token)
                .then(|| re.replace(token, self.replacement.as_str()).into_owned()),
        }
    }

    fn in_family(&self, utility: &str) -> bool {
        self.family.is_match(utility)
    }
}

fn anchored(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{})$", pattern))?)
}

/// (pattern, replacement, family) rows of the built-in Tailwind vocabulary.
const TAILWIND: &[(&str, &str, &str)] = &[
    ("text-6xl", "text-4xl md:text-6xl", TEXT_SIZES),
    ("text-5xl", "text-3xl md:text-5xl", TEXT_SIZES),
    ("text-4xl", "text-2xl md:text-4xl", TEXT_SIZES),
    ("text-3xl", "text-xl md:text-3xl", TEXT_SIZES),
    ("grid-cols-2", "grid-cols-1 md:grid-cols-2", r"grid-cols-\d+"),
    (r"grid-cols-([3-9]|1[0-2])", "grid-cols-1 md:grid-cols-2 lg:grid-cols-${1}", r"grid-cols-\d+"),
    ("flex-row", "flex-col md:flex-row", r"flex-(row|col)(-reverse)?"),
    (r"p-(8|10|12|16)", "p-4 md:p-${1}", r"p-\d+"),
    (r"px-(8|10|12|16)", "px-4 md:px-${1}", r"px-\d+"),
    (r"py-(12|16|20|24)", "py-8 md:py-${1}", r"py-\d+"),
    (r"gap-(8|10|12|16)", "gap-4 md:gap-${1}", r"gap-\d+"),
    (r"w-(\d/\d)", "w-full md:w-${1}", r"w-(full|auto|screen|\d+|\d/\d)"),
];

const TEXT_SIZES: &str = r"text-(xs|sm|base|lg|xl|[2-9]xl)";

/// Ordered rewrite table.
#[derive(Debug, Clone, Default)]
pub struct ResponsiveRules {
    rules: Vec<RewriteRule>,
}

impl ResponsiveRules {
    /// Empty table; every token passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in Tailwind breakpoint vocabulary.
    pub fn tailwind() -> Result<Self> {
        let mut rules = Self::new();
        for (pattern, replacement, family) in TAILWIND {
            rules.push(RewriteRule::pattern(pattern, replacement, family)?);
        }
        Ok(rules)
    }

    /// Append a rule; earlier rules take precedence.
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite a class string. Whitespace is normalised to single spaces and
    /// repeated tokens are dropped.
    pub fn rewrite(&self, classes: &str) -> String {
        let tokens: Vec<&str> = classes.split_whitespace().collect();

        // Utilities the author already made responsive, without their prefix.
        let responsive: Vec<&str> = tokens
            .iter()
            .filter_map(|t| t.split_once(':'))
            .filter(|(prefix, _)| BREAKPOINTS.contains(prefix))
            .map(|(_, utility)| utility)
            .collect();

        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let rewritten = self
                .rules
                .iter()
                .filter(|rule| !responsive.iter().any(|u| rule.in_family(u)))
                .find_map(|rule| rule.apply(token));

            match rewritten {
                Some(expansion) => {
                    for piece in expansion.split_whitespace() {
                        push_unique(&mut out, piece);
                    }
                }
                None => push_unique(&mut out, token),
            }
        }
        out.join(" ")
    }
}

fn push_unique(out: &mut Vec<String>, token: &str) {
    if !out.iter().any(|t| t == token) {
        out.push(token.to_string());
    }
}
