use std::collections::BTreeMap;

use crate::store::{CandidateStatus, FixtureStore, Recommendation, RoundKind, RoundStatus};

/// Candidate counts per pipeline stage, in stage order. Every status appears,
/// including empty ones, so the funnel shape is stable.
pub fn status_funnel(store: &FixtureStore) -> Vec<(CandidateStatus, u64)> {
    CandidateStatus::ALL
        .iter()
        .map(|&status| {
            let count = store
                .candidates()
                .iter()
                .filter(|c| c.status == status)
                .count() as u64;
            (status, count)
        })
        .collect()
}

pub fn average_rating(store: &FixtureStore) -> f32 {
    let candidates = store.candidates();
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.rating).sum::<f32>() / candidates.len() as f32
}

/// Share of evaluated, completed rounds whose recommendation was to advance.
/// None when nothing has been evaluated yet.
pub fn overall_pass_rate(store: &FixtureStore) -> Option<f32> {
    let evaluated: Vec<_> = store
        .rounds()
        .iter()
        .filter(|r| r.status == RoundStatus::Completed)
        .filter_map(|r| store.evaluation_for(&r.id))
        .collect();

    if evaluated.is_empty() {
        return None;
    }

    let advanced = evaluated
        .iter()
        .filter(|e| e.recommendation == Recommendation::Advance)
        .count();
    Some(advanced as f32 / evaluated.len() as f32)
}

/// Pass rate per round kind, skipping kinds with no evaluated completed round.
pub fn pass_rate_by_round(store: &FixtureStore) -> Vec<(RoundKind, f32)> {
    RoundKind::ALL
        .iter()
        .filter_map(|&kind| {
            let evaluated: Vec<_> = store
                .rounds()
                .iter()
                .filter(|r| r.round == kind && r.status == RoundStatus::Completed)
                .filter_map(|r| store.evaluation_for(&r.id))
                .collect();

            if evaluated.is_empty() {
                return None;
            }

            let advanced = evaluated
                .iter()
                .filter(|e| e.recommendation == Recommendation::Advance)
                .count();
            Some((kind, advanced as f32 / evaluated.len() as f32))
        })
        .collect()
}

/// Application counts keyed by "YYYY-MM", in calendar order.
pub fn monthly_applications(store: &FixtureStore) -> Vec<(String, u64)> {
    let mut by_month: BTreeMap<String, u64> = BTreeMap::new();
    for candidate in store.candidates() {
        let month = candidate.applied_at.format("%Y-%m").to_string();
        *by_month.entry(month).or_insert(0) += 1;
    }
    by_month.into_iter().collect()
}

/// Evaluation scores bucketed for the analysis bar chart.
pub fn score_distribution(store: &FixtureStore) -> Vec<(&'static str, u64)> {
    const LABELS: [&str; 5] = ["<6", "6-7", "7-8", "8-9", "9+"];
    let mut buckets = [0u64; 5];

    for eval in store.evaluations() {
        let idx = match eval.score {
            s if s < 6.0 => 0,
            s if s < 7.0 => 1,
            s if s < 8.0 => 2,
            s if s < 9.0 => 3,
            _ => 4,
        };
        buckets[idx] += 1;
    }

    LABELS.iter().zip(buckets).map(|(l, n)| (*l, n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FixtureStore {
        FixtureStore::load_embedded().expect("bundled fixtures must parse")
    }

    #[test]
    fn funnel_covers_every_status_and_every_candidate() {
        let store = store();
        let funnel = status_funnel(&store);

        assert_eq!(funnel.len(), CandidateStatus::ALL.len());
        let total: u64 = funnel.iter().map(|(_, n)| n).sum();
        assert_eq!(total as usize, store.candidates().len());
        // Fixture spot checks
        assert!(funnel.contains(&(CandidateStatus::Interviewing, 3)));
        assert!(funnel.contains(&(CandidateStatus::Hired, 1)));
    }

    #[test]
    fn average_rating_is_in_range() {
        let avg = average_rating(&store());
        assert!(avg > 6.0 && avg < 9.0);
    }

    #[test]
    fn pass_rates_count_only_completed_evaluated_rounds() {
        let store = store();

        // 7 evaluated completed rounds, 5 advanced
        let overall = overall_pass_rate(&store).unwrap();
        assert!((overall - 5.0 / 7.0).abs() < 1e-6);

        let by_round = pass_rate_by_round(&store);
        // Onsite rounds exist but none completed, so the kind is skipped
        assert!(by_round.iter().all(|(kind, _)| *kind != RoundKind::Onsite));

        let phone = by_round
            .iter()
            .find(|(kind, _)| *kind == RoundKind::Phone)
            .map(|(_, rate)| *rate)
            .unwrap();
        assert!((phone - 1.0 / 3.0).abs() < 1e-6);

        let technical = by_round
            .iter()
            .find(|(kind, _)| *kind == RoundKind::Technical)
            .map(|(_, rate)| *rate)
            .unwrap();
        assert!((technical - 1.0).abs() < 1e-6);
    }

    #[test]
    fn monthly_applications_in_calendar_order() {
        let store = store();
        let months = monthly_applications(&store);

        assert!(months.windows(2).all(|w| w[0].0 < w[1].0));
        let total: u64 = months.iter().map(|(_, n)| n).sum();
        assert_eq!(total as usize, store.candidates().len());
        assert!(months.contains(&("2025-06".to_string(), 5)));
    }

    #[test]
    fn score_distribution_buckets_every_evaluation() {
        let store = store();
        let distribution = score_distribution(&store);

        let total: u64 = distribution.iter().map(|(_, n)| n).sum();
        assert_eq!(total as usize, store.evaluations().len());
        // 5.2 lands in the lowest bucket, 8.9 in 8-9
        assert_eq!(distribution[0], ("<6", 1));
        assert_eq!(distribution[3], ("8-9", 3));
    }
}
