use std::cmp::Ordering;
use std::collections::BTreeMap;
use crate::models::{MatchResult, Recommendation};

/// Regroup ranked results by student
///
/// Each student's list runs from the highest score down; equal scores fall
/// back to the opportunity id so the order never depends on input order.
pub fn recommend(results: &[MatchResult]) -> BTreeMap<String, Vec<Recommendation>> {
    let mut by_student: BTreeMap<String, Vec<Recommendation>> = BTreeMap::new();

    for result in results {
        by_student
            .entry(result.student_id.clone())
            .or_default()
            .push(Recommendation {
                opportunity_id: result.opportunity_id.clone(),
                score: result.score,
                rationale: result.rationale.clone(),
                rank: result.rank,
                accepted: result.accepted,
            });
    }

    for list in by_student.values_mut() {
        list.sort_by(compare_recommendations);
    }

    by_student
}

fn compare_recommendations(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.opportunity_id.cmp(&b.opportunity_id))
}
