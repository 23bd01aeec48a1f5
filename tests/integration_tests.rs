// Integration tests for Intern Match

use intern_match::core::{FairnessTable, MatchEngine, RawWeights, SkillVocabulary};
use intern_match::models::{AttributeValue, OpportunityPosting, StudentProfile};
use intern_match::MatchError;
use std::collections::{BTreeMap, HashMap};

fn create_student(id: &str, skills: &[&str], locations: &[&str], gpa: f64) -> StudentProfile {
    StudentProfile {
        id: id.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        location_preference: locations.iter().map(|s| s.to_string()).collect(),
        demographic_attributes: BTreeMap::new(),
        gpa,
        prior_experience_count: 1,
        project_count: 3,
    }
}

fn create_opportunity(id: &str, skills: &[&str], location: &str, capacity: u32) -> OpportunityPosting {
    OpportunityPosting {
        id: id.to_string(),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        location: location.to_string(),
        capacity,
    }
}

fn cohort() -> (Vec<StudentProfile>, Vec<OpportunityPosting>) {
    let mut first_gen = create_student("stu-04", &["Python", "PyTorch", "C++"], &["Pittsburgh, PA", "Remote"], 3.85);
    first_gen
        .demographic_attributes
        .insert("firstGen".to_string(), AttributeValue::Flag(true));

    let students = vec![
        create_student("stu-01", &["React", "TypeScript", "Node.js", "Python"], &["Palo Alto, CA", "San Francisco, CA"], 3.9),
        create_student("stu-02", &["Java", "Spring Boot", "AWS", "Docker"], &["Boston, MA"], 3.8),
        create_student("stu-03", &["Python", "R", "TensorFlow", "SQL"], &["Berkeley, CA", "San Francisco, CA", "New York, NY"], 3.95),
        first_gen,
        create_student("stu-05", &["JavaScript", "React", "MongoDB", "Express"], &["Atlanta, GA", "Austin, TX"], 3.75),
    ];

    let opportunities = vec![
        create_opportunity("opp-frontend", &["React", "TypeScript", "Tailwind CSS"], "San Francisco, CA", 1),
        create_opportunity("opp-data", &["Python", "Machine Learning", "SQL"], "New York, NY", 2),
        create_opportunity("opp-fullstack", &["Node.js", "React", "MongoDB"], "Austin, TX", 3),
    ];

    (students, opportunities)
}

#[test]
fn test_integration_end_to_end_matching() {
    let engine = MatchEngine::with_default_params()
        .with_fairness_table(FairnessTable::new([("firstGen", 0.6)]));
    let (students, opportunities) = cohort();

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::new(40.0, 25.0, 35.0))
        .unwrap();

    assert_eq!(outcome.results.len(), 15);

    // Every opportunity has a full, strictly ranked candidate list
    let mut per_opportunity: HashMap<&str, Vec<_>> = HashMap::new();
    for result in &outcome.results {
        per_opportunity
            .entry(result.opportunity_id.as_str())
            .or_default()
            .push(result);
    }
    for opportunity in &opportunities {
        let ranked = &per_opportunity[opportunity.id.as_str()];
        assert_eq!(ranked.len(), students.len());
        for (i, result) in ranked.iter().enumerate() {
            assert_eq!(result.rank as usize, i + 1);
            assert_eq!(result.accepted, i < opportunity.capacity as usize);
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    // Frontend: stu-01 holds React and TypeScript and prefers SF second
    let frontend_top = per_opportunity["opp-frontend"][0];
    assert_eq!(frontend_top.student_id, "stu-01");
    assert_eq!(frontend_top.breakdown.location, 0.5);
    assert!(frontend_top.rationale[0].starts_with("skills: "));

    assert_eq!(outcome.summary.total_capacity, 6);
    assert_eq!(outcome.summary.accepted_count, 6);
    assert_eq!(outcome.summary.unfilled_slots, 0);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_idempotent_output() {
    let engine = MatchEngine::with_default_params()
        .with_fairness_table(FairnessTable::new([("firstGen", 0.6)]));
    let (students, opportunities) = cohort();
    let weights = RawWeights::new(40.0, 25.0, 35.0);

    let first = engine.compute_matches(&students, &opportunities, &weights).unwrap();
    let second = engine.compute_matches(&students, &opportunities, &weights).unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_ties_resolved_by_gpa_then_id() {
    let engine = MatchEngine::with_default_params();
    let students = vec![
        create_student("b", &["Rust"], &["Remote"], 3.5),
        create_student("c", &["Rust"], &["Remote"], 3.9),
        create_student("a", &["Rust"], &["Remote"], 3.5),
    ];
    let opportunities = vec![create_opportunity("o1", &["Rust"], "Remote", 1)];

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::default())
        .unwrap();

    let order: Vec<_> = outcome.results.iter().map(|r| r.student_id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    assert!(outcome.results.iter().all(|r| r.score == outcome.results[0].score));
    assert_eq!(outcome.summary.accepted_count, 1);
}

#[test]
fn test_capacity_larger_than_pool() {
    let engine = MatchEngine::with_default_params();
    let students = vec![create_student("s1", &["Go"], &[], 3.0)];
    let opportunities = vec![create_opportunity("o1", &["Go"], "Remote", 4)];

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::default())
        .unwrap();

    assert!(outcome.results[0].accepted);
    assert_eq!(outcome.summary.unfilled_slots, 3);
}

#[test]
fn test_empty_students_rejected() {
    let engine = MatchEngine::with_default_params();
    let opportunities = vec![create_opportunity("o1", &["Go"], "Remote", 1)];

    let err = engine
        .compute_matches(&[], &opportunities, &RawWeights::default())
        .unwrap_err();
    assert!(matches!(err, MatchError::EmptyInput(_)));
}

#[test]
fn test_empty_opportunities_rejected() {
    let engine = MatchEngine::with_default_params();
    let students = vec![create_student("s1", &["Go"], &[], 3.0)];

    let err = engine
        .compute_matches(&students, &[], &RawWeights::default())
        .unwrap_err();
    assert_eq!(err.code(), "EmptyInput");
}

#[test]
fn test_zero_weights_rejected() {
    let engine = MatchEngine::with_default_params();
    let (students, opportunities) = cohort();

    let err = engine
        .compute_matches(&students, &opportunities, &RawWeights::new(0.0, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, MatchError::InvalidConfiguration(_)));
}

#[test]
fn test_weights_checked_before_inputs() {
    let engine = MatchEngine::with_default_params();
    let err = engine
        .compute_matches(&[], &[], &RawWeights::new(-1.0, 1.0, 1.0))
        .unwrap_err();
    assert_eq!(err.code(), "InvalidConfiguration");
}

#[test]
fn test_zero_capacity_rejected() {
    let engine = MatchEngine::with_default_params();
    let students = vec![create_student("s1", &["Go"], &[], 3.0)];
    let opportunities = vec![create_opportunity("o1", &["Go"], "Remote", 0)];

    let err = engine
        .compute_matches(&students, &opportunities, &RawWeights::default())
        .unwrap_err();
    assert_eq!(err.code(), "InvalidProfile");
}

#[test]
fn test_strict_mode_proceeds_with_warnings() {
    let engine = MatchEngine::with_default_params().with_vocabulary(SkillVocabulary::new([
        "react", "typescript", "python", "sql", "node.js", "mongodb",
    ]));
    let (students, opportunities) = cohort();

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::default())
        .unwrap();

    assert_eq!(outcome.results.len(), 15);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.owner_id == "opp-frontend" && w.tag == "tailwind css"));
    assert!(outcome.warnings.iter().all(|w| w.code == "UnknownSkillTag"));

    // Tailwind CSS can never be satisfied, so two of three is the ceiling
    let frontend_top = outcome
        .results
        .iter()
        .find(|r| r.opportunity_id == "opp-frontend" && r.rank == 1)
        .unwrap();
    assert!((frontend_top.breakdown.skills - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_student_recommendations() {
    let engine = MatchEngine::with_default_params()
        .with_fairness_table(FairnessTable::new([("firstGen", 0.6)]));
    let (students, opportunities) = cohort();

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::default())
        .unwrap();

    assert_eq!(outcome.recommendations.len(), students.len());
    for student in &students {
        let recs = &outcome.recommendations[&student.id];
        assert_eq!(recs.len(), opportunities.len());
        for pair in recs.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].opportunity_id < pair[1].opportunity_id)
            );
        }

        // Same numbers as the per-opportunity view
        for rec in recs {
            let result = outcome
                .results
                .iter()
                .find(|r| r.student_id == student.id && r.opportunity_id == rec.opportunity_id)
                .unwrap();
            assert_eq!(rec.score, result.score);
            assert_eq!(rec.rank, result.rank);
            assert_eq!(rec.accepted, result.accepted);
            assert_eq!(rec.rationale, result.rationale);
        }
    }

    // stu-05 shares two full-stack skills and lists Austin
    assert_eq!(outcome.recommendations["stu-05"][0].opportunity_id, "opp-fullstack");
}

#[test]
fn test_zero_weight_factor_not_in_rationale() {
    let engine = MatchEngine::with_default_params();
    let students = vec![create_student("s1", &["Go"], &["Remote"], 3.0)];
    let opportunities = vec![create_opportunity("o1", &["Rust"], "Remote", 1)];

    let outcome = engine
        .compute_matches(&students, &opportunities, &RawWeights::new(1.0, 0.0, 0.0))
        .unwrap();

    let result = &outcome.results[0];
    assert_eq!(result.score, 0.0);
    assert_eq!(result.breakdown.location, 1.0);
    assert!(result.rationale.is_empty());
}
