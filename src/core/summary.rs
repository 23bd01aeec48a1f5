use crate::models::{MatchResult, MatchSummary, OpportunityPosting};

/// Aggregate a ranked result sequence for the dashboards
pub fn summarize(results: &[MatchResult], opportunities: &[OpportunityPosting]) -> MatchSummary {
    let total_capacity: u64 = opportunities.iter().map(|o| o.capacity as u64).sum();

    let accepted: Vec<&MatchResult> = results.iter().filter(|r| r.accepted).collect();
    let accepted_count = accepted.len();

    let boosted_accepted = accepted
        .iter()
        .filter(|r| r.breakdown.diversity_bonus > 0.0)
        .count();

    MatchSummary {
        total_pairs: results.len(),
        accepted_count,
        total_capacity,
        unfilled_slots: total_capacity.saturating_sub(accepted_count as u64),
        mean_score: mean(results.iter().map(|r| r.score)),
        mean_accepted_score: mean(accepted.iter().map(|r| r.score)),
        boosted_accepted,
    }
}

fn mean<I: Iterator<Item = f64>>(scores: I) -> f64 {
    let (sum, count) = scores.fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));
    if count == 0 {
        return 0.0;
    }
    ((sum / count as f64) * 100.0).round() / 100.0
}
