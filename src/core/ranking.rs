use std::cmp::Ordering;

/// A scored pair before ranks are assigned
#[derive(Debug, Clone)]
pub struct RankedCandidate<'a> {
    pub student_id: &'a str,
    pub gpa: f64,
    pub score: f64,
}

/// Ranking order: higher score, then higher gpa, then lower id
///
/// Ids are unique within a run, so this is a total order.
pub fn compare_candidates(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.gpa.total_cmp(&a.gpa))
        .then_with(|| a.student_id.cmp(b.student_id))
}

/// Anything that can be placed in a per-opportunity ranking
pub trait Rankable {
    fn ranking_key(&self) -> RankedCandidate<'_>;
}

/// Sort candidates of one opportunity into ranking order
pub fn rank_candidates<T: Rankable>(candidates: &mut [T]) {
    candidates.sort_by(|a, b| compare_candidates(&a.ranking_key(), &b.ranking_key()));
}

/// Whether the 1-based `rank` falls within `capacity` slots
#[inline]
pub fn is_accepted(rank: u32, capacity: u32) -> bool {
    rank <= capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, gpa: f64, score: f64) -> RankedCandidate<'_> {
        RankedCandidate {
            student_id: id,
            gpa,
            score,
        }
    }

    #[test]
    fn test_score_first() {
        let a = candidate("b", 3.0, 80.0);
        let b = candidate("a", 4.0, 70.0);
        assert_eq!(compare_candidates(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_gpa_breaks_score_tie() {
        let a = candidate("b", 3.9, 80.0);
        let b = candidate("a", 3.5, 80.0);
        assert_eq!(compare_candidates(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_id_breaks_full_tie() {
        let a = candidate("s-02", 3.5, 80.0);
        let b = candidate("s-01", 3.5, 80.0);
        assert_eq!(compare_candidates(&a, &b), Ordering::Greater);
    }

    struct Row(&'static str, f64, f64);

    impl Rankable for Row {
        fn ranking_key(&self) -> RankedCandidate<'_> {
            candidate(self.0, self.1, self.2)
        }
    }

    #[test]
    fn test_rank_candidates() {
        let mut rows = vec![
            Row("s3", 3.2, 50.0),
            Row("s1", 3.8, 90.0),
            Row("s2", 3.9, 90.0),
            Row("s0", 3.2, 50.0),
        ];
        rank_candidates(&mut rows);
        let order: Vec<_> = rows.iter().map(|row| row.0).collect();
        assert_eq!(order, vec!["s2", "s1", "s0", "s3"]);
    }

    #[test]
    fn test_capacity_cutoff() {
        assert!(is_accepted(1, 1));
        assert!(!is_accepted(2, 1));
        assert!(is_accepted(3, 5));
    }
}
