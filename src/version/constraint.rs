//! Version constraint expressions
//!
//! Supports the constraint syntax used by repository index tooling:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `!=1.2.3` - anything but
//! - `>1.2.3`, `>=1.2.3`, `<1.2.3`, `<=1.2.3` - comparison operators (`=>`, `=<` also accepted)
//! - `~1.2.3` - tilde: >=1.2.3 <1.3.0 (`~>` also accepted)
//! - `^1.2.3` - caret: >=1.2.3 <2.0.0
//! - `1.2 - 1.4.5` - hyphen range: >=1.2.0 <=1.4.5
//! - `1.2.x`, `1.*`, `*` - wildcards; a missing component acts as a wildcard
//! - `>=1.0, <2.0` or `>=1.0 <2.0` - all comparators must hold
//! - `^1.0 || ^3.0` - any alternative may hold

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{Prerelease, Version};

use crate::version::error::ConstraintError;
use crate::version::semver::compare_precedence;

/// Expression matching every version, pre-releases included
pub const ANY: &str = "*";

/// A parsed version constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    expression: String,
    alternatives: Vec<Vec<Comparator>>,
}

/// A single primitive check against a version
#[derive(Debug, Clone, PartialEq, Eq)]
enum Comparator {
    Any,
    Exact(Version),
    NotEqual(Version),
    Greater(Version),
    GreaterEq(Version),
    Less(Version),
    LessEq(Version),
    /// >= lower and < upper
    Within { lower: Version, upper: Version },
    /// < lower or >= upper
    Outside { lower: Version, upper: Version },
}

impl Constraint {
    /// Constraint matching any version
    pub fn any() -> Self {
        Self {
            expression: ANY.to_string(),
            alternatives: vec![vec![Comparator::Any]],
        }
    }

    /// Parse a constraint expression
    ///
    /// An empty expression is treated as [`ANY`].
    pub fn parse(expression: &str) -> Result<Self, ConstraintError> {
        if expression.trim().is_empty() {
            return Ok(Self {
                expression: expression.to_string(),
                alternatives: vec![vec![Comparator::Any]],
            });
        }

        let alternatives = expression
            .split("||")
            .map(|alternative| parse_alternative(expression, alternative))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            expression: expression.to_string(),
            alternatives,
        })
    }

    /// The expression as it was written
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Check whether a version satisfies this constraint
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|all| all.iter().all(|comparator| comparator.matches(version)))
    }
}

impl FromStr for Constraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl Comparator {
    fn matches(&self, version: &Version) -> bool {
        match self {
            Comparator::Any => true,
            Comparator::Exact(v) => compare_precedence(version, v) == Ordering::Equal,
            Comparator::NotEqual(v) => {
                admits_prerelease(version, v) && compare_precedence(version, v) != Ordering::Equal
            }
            Comparator::Outside { lower, upper } => {
                admits_prerelease(version, lower)
                    && (compare_precedence(version, lower) == Ordering::Less
                        || compare_precedence(version, upper) != Ordering::Less)
            }
            Comparator::Greater(v) => {
                admits_prerelease(version, v)
                    && compare_precedence(version, v) == Ordering::Greater
            }
            Comparator::GreaterEq(v) => {
                admits_prerelease(version, v) && compare_precedence(version, v) != Ordering::Less
            }
            Comparator::Less(v) => {
                admits_prerelease(version, v) && compare_precedence(version, v) == Ordering::Less
            }
            Comparator::LessEq(v) => {
                admits_prerelease(version, v)
                    && compare_precedence(version, v) != Ordering::Greater
            }
            Comparator::Within { lower, upper } => {
                admits_prerelease(version, lower)
                    && compare_precedence(version, lower) != Ordering::Less
                    && compare_precedence(version, upper) == Ordering::Less
            }
        }
    }
}

/// Pre-releases only satisfy comparators that name a pre-release themselves
fn admits_prerelease(version: &Version, bound: &Version) -> bool {
    version.pre.is_empty() || !bound.pre.is_empty()
}

/// A version with optional (wildcard) components, as written in a constraint
#[derive(Debug)]
struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl PartialVersion {
    fn parse(input: &str) -> Option<Self> {
        let stripped = input.strip_prefix('v').unwrap_or(input);
        let (core, suffix) = match stripped.find(['-', '+']) {
            Some(idx) => stripped.split_at(idx),
            None => (stripped, ""),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return None;
        }

        let mut components = [None; 3];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = match *part {
                "x" | "X" | "*" => break,
                // u64::MAX leaves no room for an exclusive upper bound
                digits => Some(digits.parse::<u64>().ok().filter(|n| *n < u64::MAX)?),
            };
        }
        let [major, minor, patch] = components;

        let pre = if suffix.is_empty() {
            Prerelease::EMPTY
        } else {
            let (major, minor, patch) = (major?, minor?, patch?);
            Version::parse(&format!("{major}.{minor}.{patch}{suffix}"))
                .ok()?
                .pre
        };

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    fn is_complete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// Smallest version covered, wildcards read as zero
    fn lower(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }

    /// First version past the covered range; None when the major itself is a wildcard
    fn upper(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (None, _, _) => None,
            (Some(major), None, _) => Some(Version::new(major + 1, 0, 0)),
            (Some(major), Some(minor), None) => Some(Version::new(major, minor + 1, 0)),
            (Some(major), Some(minor), Some(patch)) => Some(Version::new(major, minor, patch + 1)),
        }
    }
}

fn parse_alternative(
    expression: &str,
    alternative: &str,
) -> Result<Vec<Comparator>, ConstraintError> {
    let tokens: Vec<&str> = alternative
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    let mut comparators = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if token.chars().all(is_operator_char) {
            // Operator separated from its version by whitespace: "> 1.2"
            let version = tokens
                .get(i + 1)
                .ok_or_else(|| ConstraintError::InvalidExpression(expression.to_string()))?;
            comparators.push(build_comparator(expression, token, version)?);
            i += 2;
        } else if tokens.get(i + 1) == Some(&"-") {
            let upper = tokens
                .get(i + 2)
                .ok_or_else(|| ConstraintError::InvalidExpression(expression.to_string()))?;
            comparators.extend(build_hyphen_range(expression, token, upper)?);
            i += 3;
        } else {
            let split = token
                .find(|c: char| !is_operator_char(c))
                .unwrap_or(token.len());
            let (operator, version) = token.split_at(split);
            comparators.push(build_comparator(expression, operator, version)?);
            i += 1;
        }
    }

    if comparators.is_empty() {
        return Err(ConstraintError::InvalidExpression(expression.to_string()));
    }
    Ok(comparators)
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>' | '~' | '^')
}

fn parse_partial(expression: &str, version: &str) -> Result<PartialVersion, ConstraintError> {
    PartialVersion::parse(version).ok_or_else(|| ConstraintError::InvalidVersion {
        expression: expression.to_string(),
        version: version.to_string(),
    })
}

fn build_comparator(
    expression: &str,
    operator: &str,
    version: &str,
) -> Result<Comparator, ConstraintError> {
    let partial = parse_partial(expression, version)?;
    let lower = partial.lower();
    let invalid = || ConstraintError::InvalidExpression(expression.to_string());

    let Some(upper) = partial.upper() else {
        // Bare wildcard: only operators that include everything make sense
        return match operator {
            "" | "=" | ">=" | "=>" | "<=" | "=<" | "~" | "~>" | "^" => Ok(Comparator::Any),
            _ => Err(invalid()),
        };
    };

    let comparator = match operator {
        "" | "=" if partial.is_complete() => Comparator::Exact(lower),
        "" | "=" => Comparator::Within { lower, upper },
        "!=" if partial.is_complete() => Comparator::NotEqual(lower),
        "!=" => Comparator::Outside { lower, upper },
        ">" if partial.is_complete() => Comparator::Greater(lower),
        ">" => Comparator::GreaterEq(upper),
        ">=" | "=>" => Comparator::GreaterEq(lower),
        "<" => Comparator::Less(lower),
        "<=" | "=<" if partial.is_complete() => Comparator::LessEq(lower),
        "<=" | "=<" => Comparator::Less(upper),
        "~" | "~>" => {
            let upper = match partial.minor {
                Some(minor) => Version::new(lower.major, minor + 1, 0),
                None => Version::new(lower.major + 1, 0, 0),
            };
            Comparator::Within { lower, upper }
        }
        "^" => {
            let upper = Version::new(lower.major + 1, 0, 0);
            Comparator::Within { lower, upper }
        }
        _ => return Err(invalid()),
    };
    Ok(comparator)
}

fn build_hyphen_range(
    expression: &str,
    from: &str,
    to: &str,
) -> Result<Vec<Comparator>, ConstraintError> {
    let from = parse_partial(expression, from)?;
    let to = parse_partial(expression, to)?;

    let mut comparators = vec![Comparator::GreaterEq(from.lower())];
    if to.is_complete() {
        comparators.push(Comparator::LessEq(to.lower()));
    } else if let Some(upper) = to.upper() {
        comparators.push(Comparator::Less(upper));
    }
    Ok(comparators)
}
