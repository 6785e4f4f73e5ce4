//! Retrieval-quality metrics: intersection, precision, recall, interpolated
//! precision at standard recall levels, R-precision, F-measure, E-measure.
//!
//! All functions are pure and never mutate their inputs. Every metric with a
//! denominator follows one convention: a zero denominator yields 0.0, never
//! NaN and never a panic.

use std::collections::HashSet;

/// The three standard recall levels interpolated precision is reported at.
pub const RECALL_LEVELS: [f64; 3] = [0.33, 0.66, 1.0];

/// Document ids present in both lists, deduplicated, ordered by first
/// appearance in `retrieved`. Duplicates in either input never double-count.
pub fn intersection(expected: &[String], retrieved: &[String]) -> Vec<String> {
    let expected_set: HashSet<&str> = expected.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for id in retrieved {
        if expected_set.contains(id.as_str()) && seen.insert(id.as_str()) {
            out.push(id.clone());
        }
    }
    out
}

/// Precision: fraction of retrieved documents that are relevant.
/// 0.0 when nothing was retrieved.
pub fn precision(intersection: &[String], retrieved: &[String]) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }
    intersection.len() as f64 / retrieved.len() as f64
}

/// Recall: fraction of relevant documents that were retrieved.
/// 0.0 when nothing was expected.
pub fn recall(intersection: &[String], expected: &[String]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }
    intersection.len() as f64 / expected.len() as f64
}

/// Precision over the first `cutoff` retrieved documents, with the divisor
/// fixed at `cutoff`. A cutoff of 0 is degenerate and yields 0.0.
fn precision_at_cutoff(expected: &[String], retrieved: &[String], cutoff: usize) -> f64 {
    if cutoff == 0 {
        return 0.0;
    }
    let prefix = &retrieved[..cutoff.min(retrieved.len())];
    intersection(expected, prefix).len() as f64 / cutoff as f64
}

/// Interpolated precision at the standard recall levels {0.33, 0.66, 1.0}:
/// the retrieved list is cut at 33%, 66%, and 100% of its length and
/// precision is measured over each prefix.
pub fn interpolated_precision(expected: &[String], retrieved: &[String]) -> [f64; 3] {
    let n = retrieved.len();
    let cutoffs = [n * 33 / 100, n * 66 / 100, n];
    cutoffs.map(|c| precision_at_cutoff(expected, retrieved, c))
}

/// R-precision: precision over exactly the top-`r` retrieved documents.
/// The divisor is always `r`, even when fewer than `r` documents were
/// retrieved. `r == 0` yields 0.0.
pub fn r_precision(expected: &[String], retrieved: &[String], r: usize) -> f64 {
    precision_at_cutoff(expected, retrieved, r)
}

/// Arithmetic mean of interpolated precision per recall level across all
/// queries. An empty query set yields zeros.
pub fn average_precision_by_level(per_query: &[[f64; 3]]) -> [f64; 3] {
    if per_query.is_empty() {
        return [0.0; 3];
    }
    let n = per_query.len() as f64;
    let mut avg = [0.0; 3];
    for levels in per_query {
        for (acc, value) in avg.iter_mut().zip(levels) {
            *acc += value / n;
        }
    }
    avg
}

/// F-measure: harmonic mean of precision and recall, 0.0 when `p + r == 0`.
pub fn f_measure(p: f64, r: f64) -> f64 {
    if p + r == 0.0 {
        return 0.0;
    }
    (2.0 * p * r) / (p + r)
}

/// E-measure: `1 - (1 + b^2) / (b^2 / r + 1 / p)`.
///
/// Convention: returns 0.0 when either `p` or `r` is exactly 0.0. The
/// formula is undefined there (division by zero); this crate defines the
/// value rather than producing an arithmetic fault.
pub fn e_measure(p: f64, r: f64, b: f64) -> f64 {
    if p == 0.0 || r == 0.0 {
        return 0.0;
    }
    1.0 - (1.0 + b * b) / (b * b / r + 1.0 / p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_intersection_follows_retrieved_order() {
        let expected = ids(&["1", "2", "3"]);
        let retrieved = ids(&["3", "4", "2"]);
        assert_eq!(intersection(&expected, &retrieved), ids(&["3", "2"]));
    }

    #[test]
    fn test_intersection_deduplicates() {
        let expected = ids(&["1", "1", "2"]);
        let retrieved = ids(&["1", "1", "2", "2"]);
        assert_eq!(intersection(&expected, &retrieved), ids(&["1", "2"]));
    }

    #[test]
    fn test_intersection_size_bounded_by_smaller_list() {
        let expected = ids(&["1", "2"]);
        let retrieved = ids(&["1", "2", "3", "4", "5"]);
        let inter = intersection(&expected, &retrieved);
        assert!(inter.len() <= expected.len().min(retrieved.len()));
    }

    #[test]
    fn test_intersection_empty_inputs() {
        assert!(intersection(&[], &ids(&["1"])).is_empty());
        assert!(intersection(&ids(&["1"]), &[]).is_empty());
    }

    #[test]
    fn test_precision_recall_worked_example() {
        // expected {1,2,3}, retrieved {2,3,4,5} -> I = {2,3}
        let expected = ids(&["1", "2", "3"]);
        let retrieved = ids(&["2", "3", "4", "5"]);
        let inter = intersection(&expected, &retrieved);
        assert_eq!(inter, ids(&["2", "3"]));
        assert_relative_eq!(precision(&inter, &retrieved), 0.5);
        assert_relative_eq!(recall(&inter, &expected), 2.0 / 3.0);
    }

    #[test]
    fn test_zero_denominators_yield_zero() {
        let one = ids(&["1"]);
        let inter = intersection(&[], &one);
        assert_eq!(recall(&inter, &[]), 0.0);
        assert_eq!(precision(&inter, &one), 0.0);
        assert_eq!(precision(&[], &[]), 0.0);
    }

    #[test]
    fn test_interpolated_precision_cutoffs() {
        // 10 retrieved -> cutoffs 3, 6, 10
        let expected = ids(&["0", "1", "2", "3", "4"]);
        let retrieved = ids(&["0", "1", "2", "9", "9b", "3", "9c", "9d", "9e", "4"]);
        let levels = interpolated_precision(&expected, &retrieved);
        assert_relative_eq!(levels[0], 3.0 / 3.0);
        assert_relative_eq!(levels[1], 4.0 / 6.0);
        assert_relative_eq!(levels[2], 5.0 / 10.0);
    }

    #[test]
    fn test_interpolated_precision_tiny_list_guards_zero_cutoff() {
        // 2 retrieved -> 33% and 66% cutoffs are both 0
        let expected = ids(&["1"]);
        let retrieved = ids(&["1", "2"]);
        let levels = interpolated_precision(&expected, &retrieved);
        assert_eq!(levels[0], 0.0);
        assert_eq!(levels[1], 0.0);
        assert_relative_eq!(levels[2], 0.5);
    }

    #[test]
    fn test_interpolated_precision_empty_retrieved() {
        assert_eq!(interpolated_precision(&ids(&["1"]), &[]), [0.0; 3]);
    }

    #[test]
    fn test_r_precision_worked_example() {
        // top-2 of [2, 9, 3] against {2, 3} -> {2} -> 1/2
        let expected = ids(&["2", "3"]);
        let retrieved = ids(&["2", "9", "3"]);
        assert_relative_eq!(r_precision(&expected, &retrieved, 2), 0.5);
    }

    #[test]
    fn test_r_precision_divides_by_r_not_list_length() {
        let expected = ids(&["1"]);
        let retrieved = ids(&["1"]);
        assert_relative_eq!(r_precision(&expected, &retrieved, 5), 0.2);
    }

    #[test]
    fn test_r_precision_zero_r() {
        assert_eq!(r_precision(&ids(&["1"]), &ids(&["1"]), 0), 0.0);
    }

    #[test]
    fn test_average_precision_by_level() {
        let per_query = [[1.0, 0.5, 0.25], [0.0, 0.5, 0.75]];
        let avg = average_precision_by_level(&per_query);
        assert_relative_eq!(avg[0], 0.5);
        assert_relative_eq!(avg[1], 0.5);
        assert_relative_eq!(avg[2], 0.5);
    }

    #[test]
    fn test_average_precision_empty() {
        assert_eq!(average_precision_by_level(&[]), [0.0; 3]);
    }

    #[test]
    fn test_f_measure_harmonic_mean() {
        assert_relative_eq!(f_measure(0.5, 0.5), 0.5);
        assert_relative_eq!(f_measure(1.0, 0.5), 2.0 / 3.0);
        assert_eq!(f_measure(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_e_measure_balanced() {
        // b = 1: E = 1 - F
        let (p, r) = (0.5, 0.25);
        assert_relative_eq!(e_measure(p, r, 1.0), 1.0 - f_measure(p, r), epsilon = 1e-12);
    }

    #[test]
    fn test_e_measure_zero_precision_or_recall() {
        assert_eq!(e_measure(0.0, 0.5, 1.0), 0.0);
        assert_eq!(e_measure(0.5, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_e_measure_weighting() {
        // b > 1 weights recall more heavily
        let high_recall = e_measure(0.2, 0.9, 2.0);
        let high_precision = e_measure(0.9, 0.2, 2.0);
        assert!(high_recall < high_precision);
    }
}
