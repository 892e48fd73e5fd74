//! Signed-feature extraction from free text.
//!
//! Known feature names are compiled into a single case-insensitive
//! alternation: a binary `+x` matches `x` or `+x`, its counterpart `-x` only
//! matches with the explicit sign, and a privative (unsigned) `x` matches the
//! bare name. Matching runs left to right, greedily, in configured order; the
//! canonical configured name is collected for every hit.
//!
//! Greedy matching silently skips text it cannot account for, so after
//! matching, the input and the concatenated canonical names are both stripped
//! of signs and spaces and compared (ignoring case) to detect leftovers.

use regex::Regex;

use crate::error::{FeatError, FeatResult};

/// Compiled matcher extracting known features from query strings.
#[derive(Debug)]
pub struct FeatureParser {
    features: Vec<String>,
    pattern: Regex,
}

impl FeatureParser {
    /// Compile a parser for the given feature-property names.
    ///
    /// Fails with [`FeatError::InvalidFeatureName`] for malformed names and
    /// with [`FeatError::AmbiguousFeatureNames`] when two sign-stripped names
    /// are in substring relation.
    pub fn new<I, S>(features: I) -> FeatResult<FeatureParser>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let features: Vec<String> = features.into_iter().map(Into::into).collect();

        let ambiguous = substring_pairs(&features);
        if !ambiguous.is_empty() {
            return Err(FeatError::AmbiguousFeatureNames(ambiguous));
        }

        let mut groups = Vec::with_capacity(features.len());
        for feature in &features {
            groups.push(format!("({})", feature_group(feature)?));
        }
        let pattern = Regex::new(&format!("(?i)(?:{})", groups.join("|")))
            .expect("alternation of escaped feature names is a valid pattern");

        Ok(FeatureParser { features, pattern })
    }

    /// The configured canonical names, in order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Extract the canonical names matched in `input`, in match order.
    pub fn parse(&self, input: &str) -> FeatResult<Vec<&str>> {
        let mut matched = Vec::new();
        for caps in self.pattern.captures_iter(input) {
            let group = caps
                .iter()
                .skip(1)
                .position(|g| g.is_some())
                .expect("every match selects exactly one alternation group");
            matched.push(self.features[group].as_str());
        }

        let accounted = strip_signs_and_spaces(&matched.concat());
        let given = strip_signs_and_spaces(input);
        if !given.eq_ignore_ascii_case(&accounted) {
            return Err(FeatError::UnmatchedFeatureText {
                input: input.to_string(),
                known: self.features.clone(),
            });
        }
        Ok(matched)
    }
}

/// All ordered pairs of sign-stripped names in substring relation.
pub(crate) fn substring_pairs<S: AsRef<str>>(features: &[S]) -> Vec<(String, String)> {
    let names = uniqued(features.iter().map(|f| strip_signs(f.as_ref())));
    let mut pairs = Vec::new();
    for (i, left) in names.iter().enumerate() {
        for (j, right) in names.iter().enumerate() {
            if i != j && right.contains(left.as_str()) {
                pairs.push((left.clone(), right.clone()));
            }
        }
    }
    pairs
}

/// Regex fragment for one optionally signed binary or privative feature name.
fn feature_group(name: &str) -> FeatResult<String> {
    if let Some(payload) = name.strip_prefix('+') {
        check_payload(name, payload)?;
        Ok(format!("[+]?{}", regex::escape(payload)))
    } else if let Some(payload) = name.strip_prefix('-') {
        check_payload(name, payload)?;
        Ok(format!("-{}", regex::escape(payload)))
    } else {
        check_payload(name, name)?;
        Ok(regex::escape(name))
    }
}

fn check_payload(name: &str, payload: &str) -> FeatResult<()> {
    if payload.is_empty() || payload.contains(['+', '-']) {
        return Err(FeatError::InvalidFeatureName(name.to_string()));
    }
    Ok(())
}

fn strip_signs(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '+' | '-')).collect()
}

fn strip_signs_and_spaces(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '+' | '-' | ' ')).collect()
}

fn uniqued<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_shapes() {
        assert_eq!(feature_group("+spam").unwrap(), "[+]?spam");
        assert_eq!(feature_group("-spam").unwrap(), "-spam");
        assert_eq!(feature_group("spam").unwrap(), "spam");
    }

    #[test]
    fn group_rejects_malformed() {
        for bad in ["+eggs-spam", "-", "+", "", "eggs+spam"] {
            assert!(matches!(
                feature_group(bad),
                Err(FeatError::InvalidFeatureName(_))
            ));
        }
    }

    #[test]
    fn substring_pairs_sign_stripped() {
        assert_eq!(
            substring_pairs(&["+spam", "-ham", "+pam"]),
            vec![("pam".to_string(), "spam".to_string())]
        );
        // paired signs strip to one name, which is not a violation
        assert!(substring_pairs(&["+1", "-1", "sg", "pl"]).is_empty());
    }
}
