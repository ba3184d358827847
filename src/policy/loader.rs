use super::{CategoryKind, Matcher, Requirement, Rule, RuleSet};
use crate::error::PolicyError;
use crate::model::ProtocolVersion;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ruleset used when no policy file is given.
pub const DEFAULT_POLICY: &str = include_str!("defaults.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyDocument {
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    name: String,
    #[serde(default)]
    title: Option<String>,
    impact: f32,
    dimension: DimensionKind,
    pattern: String,
    require: Requirement,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DimensionKind {
    Protocol,
    Cipher,
    KeyExchange,
    Authentication,
    Encryption,
    Mac,
}

pub fn load_file(path: &Path) -> Result<RuleSet, PolicyError> {
    let content = fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&content)
}

pub fn load_str(content: &str) -> Result<RuleSet, PolicyError> {
    let doc: PolicyDocument = serde_yaml::from_str(content)?;
    let mut seen = HashSet::new();
    let mut rules = Vec::with_capacity(doc.rules.len());
    for entry in doc.rules {
        if !seen.insert(entry.name.clone()) {
            return Err(PolicyError::Duplicate(entry.name));
        }
        rules.push(compile(entry)?);
    }
    Ok(RuleSet::new(rules))
}

fn compile(entry: RuleEntry) -> Result<Rule, PolicyError> {
    if !(0.0..=1.0).contains(&entry.impact) {
        return Err(PolicyError::Invalid {
            rule: entry.name,
            reason: format!("impact {} is outside 0.0..=1.0", entry.impact),
        });
    }

    let regex = |pattern: &str| {
        Regex::new(pattern).map_err(|source| PolicyError::Pattern {
            rule: entry.name.clone(),
            source,
        })
    };
    let matcher = match entry.dimension {
        DimensionKind::Protocol => {
            let version: ProtocolVersion = entry.pattern.parse().map_err(|reason| PolicyError::Invalid {
                rule: entry.name.clone(),
                reason,
            })?;
            Matcher::Protocol(version)
        }
        DimensionKind::Cipher => Matcher::Cipher(regex(&entry.pattern)?),
        DimensionKind::KeyExchange => Matcher::Category(CategoryKind::KeyExchange, regex(&entry.pattern)?),
        DimensionKind::Authentication => {
            Matcher::Category(CategoryKind::Authentication, regex(&entry.pattern)?)
        }
        DimensionKind::Encryption => Matcher::Category(CategoryKind::Encryption, regex(&entry.pattern)?),
        DimensionKind::Mac => Matcher::Category(CategoryKind::Mac, regex(&entry.pattern)?),
    };

    Ok(Rule {
        title: entry.title.unwrap_or_else(|| entry.name.clone()),
        name: entry.name,
        impact: entry.impact,
        matcher,
        require: entry.require,
    })
}
