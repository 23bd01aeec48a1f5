use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use validator::Validate;
use crate::core::{
    error::MatchError,
    fairness::FairnessTable,
    rationale::format_rationale,
    ranking::{is_accepted, rank_candidates, Rankable, RankedCandidate},
    recommendations::recommend,
    scoring::{calculate_match_score, calculate_sub_scores, ScoringParams},
    skills::{SkillSet, SkillVocabulary},
    summary::summarize,
    weights::{validate_weights, RawWeights, WeightConfig},
};
use crate::models::{
    MatchOutcome, MatchResult, OpportunityPosting, SkillWarning, StudentProfile, SubScores,
};

/// Pair count above which scoring fans out across the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

struct PreparedStudent<'a> {
    profile: &'a StudentProfile,
    skills: SkillSet,
    under_representation: f64,
}

struct PreparedOpportunity<'a> {
    posting: &'a OpportunityPosting,
    required: SkillSet,
}

/// Scored pair before ranks are assigned
struct ScoredPair<'a> {
    student_id: &'a str,
    gpa: f64,
    score: f64,
    sub: SubScores,
    rationale: Vec<String>,
}

impl Rankable for ScoredPair<'_> {
    fn ranking_key(&self) -> RankedCandidate<'_> {
        RankedCandidate {
            student_id: self.student_id,
            gpa: self.gpa,
            score: self.score,
        }
    }
}

/// Internship matching engine
///
/// # Pipeline Stages
/// 1. Weight validation and input checks
/// 2. Skill and fairness preparation per profile
/// 3. Pair scoring (parallel for large inputs)
/// 4. Per-opportunity ranking and capacity cut-off
///
/// The engine is pure: identical inputs always give identical output.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    params: ScoringParams,
    fairness: FairnessTable,
    vocabulary: Option<SkillVocabulary>,
    parallel_threshold: usize,
}

impl MatchEngine {
    pub fn new(params: ScoringParams) -> Self {
        Self {
            params,
            fairness: FairnessTable::default(),
            vocabulary: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_default_params() -> Self {
        Self::new(ScoringParams::default())
    }

    pub fn with_fairness_table(mut self, fairness: FairnessTable) -> Self {
        self.fairness = fairness;
        self
    }

    /// Enable strict mode against a controlled skill vocabulary
    pub fn with_vocabulary(mut self, vocabulary: SkillVocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Zero disables parallel scoring
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn fairness_table(&self) -> &FairnessTable {
        &self.fairness
    }

    pub fn is_strict(&self) -> bool {
        self.vocabulary.is_some()
    }

    /// Validate raw weights, then score and rank every pair
    pub fn compute_matches(
        &self,
        students: &[StudentProfile],
        opportunities: &[OpportunityPosting],
        weights: &RawWeights,
    ) -> Result<MatchOutcome, MatchError> {
        let weights = validate_weights(weights)?;
        self.compute_with_weights(students, opportunities, &weights)
    }

    /// Score and rank every pair under already validated weights
    pub fn compute_with_weights(
        &self,
        students: &[StudentProfile],
        opportunities: &[OpportunityPosting],
        weights: &WeightConfig,
    ) -> Result<MatchOutcome, MatchError> {
        if students.is_empty() {
            return Err(MatchError::EmptyInput("no students supplied".to_string()));
        }
        if opportunities.is_empty() {
            return Err(MatchError::EmptyInput("no opportunities supplied".to_string()));
        }

        check_students(students)?;
        check_opportunities(opportunities)?;

        let vocabulary = self.vocabulary.as_ref();

        let prepared_students: Vec<PreparedStudent<'_>> = students
            .iter()
            .map(|profile| PreparedStudent {
                profile,
                skills: SkillSet::build(&profile.skills, vocabulary),
                under_representation: self
                    .fairness
                    .under_representation(&profile.demographic_attributes),
            })
            .collect();

        let prepared_opportunities: Vec<PreparedOpportunity<'_>> = opportunities
            .iter()
            .map(|posting| PreparedOpportunity {
                posting,
                required: SkillSet::build(&posting.required_skills, vocabulary),
            })
            .collect();

        if let Some(student) = prepared_students.iter().find(|s| s.skills.total() == 0) {
            return Err(MatchError::InvalidProfile {
                id: student.profile.id.clone(),
                reason: "skills must contain at least one non-blank tag".to_string(),
            });
        }

        let warnings: Vec<SkillWarning> = prepared_students
            .iter()
            .flat_map(|s| s.skills.warnings(&s.profile.id))
            .chain(
                prepared_opportunities
                    .iter()
                    .flat_map(|o| o.required.warnings(&o.posting.id)),
            )
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for warning in &warnings {
            tracing::warn!(
                "Unknown skill tag '{}' on {}, treated as non-matching",
                warning.tag,
                warning.owner_id
            );
        }

        let student_count = prepared_students.len();
        let total_pairs = student_count * prepared_opportunities.len();

        let score_pair = |index: usize| {
            let opportunity = &prepared_opportunities[index / student_count];
            let student = &prepared_students[index % student_count];
            self.score_pair(student, opportunity, weights)
        };

        let scored: Vec<ScoredPair<'_>> =
            if self.parallel_threshold > 0 && total_pairs > self.parallel_threshold {
                tracing::debug!("Scoring {} pairs in parallel", total_pairs);
                (0..total_pairs).into_par_iter().map(score_pair).collect()
            } else {
                (0..total_pairs).map(score_pair).collect()
            };

        let mut results = Vec::with_capacity(total_pairs);
        for (opportunity, mut chunk) in prepared_opportunities
            .iter()
            .zip(chunk_by_opportunity(scored, student_count))
        {
            rank_candidates(&mut chunk);

            for (position, pair) in chunk.into_iter().enumerate() {
                let rank = position as u32 + 1;
                results.push(MatchResult {
                    student_id: pair.student_id.to_string(),
                    opportunity_id: opportunity.posting.id.clone(),
                    score: pair.score,
                    rationale: pair.rationale,
                    rank,
                    accepted: is_accepted(rank, opportunity.posting.capacity),
                    breakdown: pair.sub,
                });
            }
        }

        let summary = summarize(&results, opportunities);
        let recommendations = recommend(&results);

        tracing::debug!(
            "Scored {} pairs, {} accepted across {} opportunities",
            summary.total_pairs,
            summary.accepted_count,
            opportunities.len()
        );

        Ok(MatchOutcome {
            results,
            recommendations,
            warnings,
            summary,
        })
    }

    fn score_pair<'a>(
        &self,
        student: &PreparedStudent<'a>,
        opportunity: &PreparedOpportunity<'_>,
        weights: &WeightConfig,
    ) -> ScoredPair<'a> {
        let sub = calculate_sub_scores(
            &student.skills,
            &opportunity.required,
            &student.profile.location_preference,
            &opportunity.posting.location,
            student.under_representation,
            &self.params,
        );

        ScoredPair {
            student_id: &student.profile.id,
            gpa: student.profile.gpa,
            score: calculate_match_score(&sub, weights),
            sub,
            rationale: format_rationale(&sub, weights, &self.params),
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_default_params()
    }
}

/// Split pair-ordered scores into one vector per opportunity
fn chunk_by_opportunity(scored: Vec<ScoredPair<'_>>, student_count: usize) -> Vec<Vec<ScoredPair<'_>>> {
    let mut chunks = Vec::with_capacity(scored.len() / student_count.max(1));
    let mut iter = scored.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(student_count).collect());
    }
    chunks
}

fn check_students(students: &[StudentProfile]) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(students.len());
    for student in students {
        student.validate().map_err(|e| MatchError::InvalidProfile {
            id: student.id.clone(),
            reason: e.to_string(),
        })?;
        if !seen.insert(student.id.as_str()) {
            return Err(MatchError::DuplicateId {
                kind: "student",
                id: student.id.clone(),
            });
        }
    }
    Ok(())
}

fn check_opportunities(opportunities: &[OpportunityPosting]) -> Result<(), MatchError> {
    let mut seen = HashSet::with_capacity(opportunities.len());
    for opportunity in opportunities {
        opportunity.validate().map_err(|e| MatchError::InvalidProfile {
            id: opportunity.id.clone(),
            reason: e.to_string(),
        })?;
        if !seen.insert(opportunity.id.as_str()) {
            return Err(MatchError::DuplicateId {
                kind: "opportunity",
                id: opportunity.id.clone(),
            });
        }
    }
    Ok(())
}
