//! Ranking models selectable for the index collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity/ranking model applied when scoring hits.
///
/// The scoring internals are not part of the evaluation contract; the
/// benchmark only requires that the index returns hits ranked by descending
/// score under whichever model is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingModel {
    /// All query terms must appear in the searched fields
    Boolean,
    /// tf-idf cosine similarity
    VectorSpace,
    /// Best normalized edit-distance match per query term
    Fuzzy,
}

impl Default for RankingModel {
    fn default() -> Self {
        RankingModel::VectorSpace
    }
}

impl fmt::Display for RankingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RankingModel::Boolean => "boolean",
            RankingModel::VectorSpace => "vector-space",
            RankingModel::Fuzzy => "fuzzy",
        };
        f.write_str(name)
    }
}

impl FromStr for RankingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" => Ok(RankingModel::Boolean),
            "vector-space" | "vectorspace" => Ok(RankingModel::VectorSpace),
            "fuzzy" => Ok(RankingModel::Fuzzy),
            other => Err(format!(
                "unknown ranking model {other:?} (expected boolean, vector-space, or fuzzy)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trip() {
        for model in [
            RankingModel::Boolean,
            RankingModel::VectorSpace,
            RankingModel::Fuzzy,
        ] {
            assert_eq!(model.to_string().parse::<RankingModel>().unwrap(), model);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("bm42".parse::<RankingModel>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&RankingModel::VectorSpace).unwrap();
        assert_eq!(json, "\"vector-space\"");
    }
}
