use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a candidate id has no matching record.
pub const UNKNOWN_CANDIDATE: &str = "未知候选人";
/// Placeholder shown when a job id has no matching record.
pub const UNKNOWN_JOB: &str = "未知职位";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Pending,
    Screening,
    Interviewing,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 6] = [
        CandidateStatus::Pending,
        CandidateStatus::Screening,
        CandidateStatus::Interviewing,
        CandidateStatus::Offer,
        CandidateStatus::Hired,
        CandidateStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "待筛选",
            CandidateStatus::Screening => "筛选中",
            CandidateStatus::Interviewing => "面试中",
            CandidateStatus::Offer => "已发Offer",
            CandidateStatus::Hired => "已入职",
            CandidateStatus::Rejected => "已淘汰",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub position: String,
    pub status: CandidateStatus,
    pub rating: f32,
    pub experience_years: u8,
    pub skills: Vec<String>,
    pub education: String,
    pub applied_at: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Paused,
    Closed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Open => "招聘中",
            JobStatus::Paused => "已暂停",
            JobStatus::Closed => "已关闭",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobDescription {
    pub id: String,
    pub title: String,
    pub department: String,
    pub headcount: u8,
    pub skills: Vec<String>,
    pub status: JobStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Phone,
    Technical,
    Onsite,
    Final,
}

impl RoundKind {
    pub const ALL: [RoundKind; 4] = [
        RoundKind::Phone,
        RoundKind::Technical,
        RoundKind::Onsite,
        RoundKind::Final,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::Phone => "电话初筛",
            RoundKind::Technical => "技术面",
            RoundKind::Onsite => "现场面",
            RoundKind::Final => "终面",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Scheduled,
    InProgress,
    Completed,
    Canceled,
}

impl RoundStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoundStatus::Scheduled => "待进行",
            RoundStatus::InProgress => "进行中",
            RoundStatus::Completed => "已完成",
            RoundStatus::Canceled => "已取消",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterviewRound {
    pub id: String,
    pub candidate_id: String,
    pub job_id: String,
    pub interviewer: String,
    pub round: RoundKind,
    pub scheduled_at: NaiveDateTime,
    pub status: RoundStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    Scenario,
}

impl QuestionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::Technical => "技术",
            QuestionCategory::Behavioral => "行为",
            QuestionCategory::Scenario => "情景",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterviewQuestion {
    pub text: String,
    pub category: QuestionCategory,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Advance,
    Hold,
    Reject,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Advance => "进入下一轮",
            Recommendation::Hold => "待定",
            Recommendation::Reject => "不通过",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterviewEvaluation {
    pub round_id: String,
    pub score: f32,
    pub strengths: String,
    pub concerns: String,
    pub recommendation: Recommendation,
}

/// Read-only repository over the bundled fixture data. Built once at startup
/// and never mutated; every screen renders filtered views of these slices.
pub struct FixtureStore {
    candidates: Vec<Candidate>,
    jobs: Vec<JobDescription>,
    rounds: Vec<InterviewRound>,
    evaluations: Vec<InterviewEvaluation>,
}

impl FixtureStore {
    pub fn load_embedded() -> Result<Self> {
        let candidates = serde_json::from_str(include_str!("../data/candidates.json"))
            .context("parsing bundled candidate fixtures")?;
        let jobs = serde_json::from_str(include_str!("../data/jobs.json"))
            .context("parsing bundled job fixtures")?;
        let rounds = serde_json::from_str(include_str!("../data/rounds.json"))
            .context("parsing bundled interview round fixtures")?;
        let evaluations = serde_json::from_str(include_str!("../data/evaluations.json"))
            .context("parsing bundled evaluation fixtures")?;

        Ok(Self {
            candidates,
            jobs,
            rounds,
            evaluations,
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn jobs(&self) -> &[JobDescription] {
        &self.jobs
    }

    pub fn rounds(&self) -> &[InterviewRound] {
        &self.rounds
    }

    pub fn evaluations(&self) -> &[InterviewEvaluation] {
        &self.evaluations
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn job(&self, id: &str) -> Option<&JobDescription> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn round(&self, id: &str) -> Option<&InterviewRound> {
        self.rounds.iter().find(|r| r.id == id)
    }

    pub fn evaluation_for(&self, round_id: &str) -> Option<&InterviewEvaluation> {
        self.evaluations.iter().find(|e| e.round_id == round_id)
    }

    /// Candidate display name, degrading to a placeholder on a missing id.
    pub fn candidate_name(&self, id: &str) -> &str {
        self.candidate(id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CANDIDATE)
    }

    /// Job display title, degrading to a placeholder on a missing id.
    pub fn job_title(&self, id: &str) -> &str {
        self.job(id).map(|j| j.title.as_str()).unwrap_or(UNKNOWN_JOB)
    }

    /// Candidates matching the substring query (name or position, case-folded)
    /// and the optional status filter, in fixture order.
    pub fn search_candidates(
        &self,
        query: &str,
        status: Option<CandidateStatus>,
    ) -> Vec<&Candidate> {
        let query = query.to_lowercase();

        self.candidates
            .iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .filter(|c| {
                query.is_empty()
                    || c.name.to_lowercase().contains(&query)
                    || c.position.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Rounds still ahead (scheduled or in progress), earliest first.
    pub fn upcoming_rounds(&self) -> Vec<&InterviewRound> {
        let mut rounds: Vec<&InterviewRound> = self
            .rounds
            .iter()
            .filter(|r| {
                matches!(r.status, RoundStatus::Scheduled | RoundStatus::InProgress)
            })
            .collect();
        rounds.sort_by_key(|r| r.scheduled_at);
        rounds
    }

    /// Finished rounds, most recent first.
    pub fn completed_rounds(&self) -> Vec<&InterviewRound> {
        let mut rounds: Vec<&InterviewRound> = self
            .rounds
            .iter()
            .filter(|r| r.status == RoundStatus::Completed)
            .collect();
        rounds.sort_by_key(|r| std::cmp::Reverse(r.scheduled_at));
        rounds
    }

    pub fn rounds_for_candidate(&self, candidate_id: &str) -> Vec<&InterviewRound> {
        let mut rounds: Vec<&InterviewRound> = self
            .rounds
            .iter()
            .filter(|r| r.candidate_id == candidate_id)
            .collect();
        rounds.sort_by_key(|r| r.scheduled_at);
        rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FixtureStore {
        FixtureStore::load_embedded().expect("bundled fixtures must parse")
    }

    #[test]
    fn embedded_fixtures_load() {
        let store = store();
        assert_eq!(store.candidates().len(), 12);
        assert_eq!(store.jobs().len(), 5);
        assert_eq!(store.rounds().len(), 12);
        assert_eq!(store.evaluations().len(), 7);
    }

    #[test]
    fn lookup_by_id() {
        let store = store();
        assert_eq!(store.candidate("C001").unwrap().name, "张伟");
        assert_eq!(store.job("J003").unwrap().department, "数据智能部");
        assert_eq!(store.round("R002").unwrap().round, RoundKind::Technical);
        assert!(store.candidate("C404").is_none());
    }

    #[test]
    fn missing_ids_degrade_to_placeholders() {
        let store = store();
        assert_eq!(store.candidate_name("C999"), UNKNOWN_CANDIDATE);
        assert_eq!(store.job_title("J999"), UNKNOWN_JOB);
        // The dangling round in the fixtures resolves to the placeholder too
        let dangling = store.round("R012").unwrap();
        assert_eq!(store.candidate_name(&dangling.candidate_id), UNKNOWN_CANDIDATE);
    }

    #[test]
    fn search_matches_name_and_position_case_folded() {
        let store = store();
        assert_eq!(store.search_candidates("张伟", None).len(), 1);
        // Position substring
        assert_eq!(store.search_candidates("后端", None).len(), 3);
        // Every engineer-title position matches the shared substring
        assert_eq!(store.search_candidates("工程师", None).len(), 8);
        assert!(store.search_candidates("不存在的人", None).is_empty());
    }

    #[test]
    fn search_respects_status_filter() {
        let store = store();
        let interviewing = store.search_candidates("", Some(CandidateStatus::Interviewing));
        assert_eq!(interviewing.len(), 3);
        assert!(interviewing.iter().all(|c| c.status == CandidateStatus::Interviewing));

        // Filter combines with the substring query
        let filtered = store.search_candidates("后端", Some(CandidateStatus::Rejected));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "C010");
    }

    #[test]
    fn round_partitions_are_sorted() {
        let store = store();

        let upcoming = store.upcoming_rounds();
        assert!(!upcoming.is_empty());
        assert!(upcoming.windows(2).all(|w| w[0].scheduled_at <= w[1].scheduled_at));
        assert!(upcoming
            .iter()
            .all(|r| matches!(r.status, RoundStatus::Scheduled | RoundStatus::InProgress)));

        let completed = store.completed_rounds();
        assert_eq!(completed.len(), 7);
        assert!(completed.windows(2).all(|w| w[0].scheduled_at >= w[1].scheduled_at));
    }

    #[test]
    fn rounds_for_candidate_in_time_order() {
        let store = store();
        let rounds = store.rounds_for_candidate("C001");
        assert_eq!(rounds.len(), 3);
        assert!(rounds.windows(2).all(|w| w[0].scheduled_at <= w[1].scheduled_at));
    }

    #[test]
    fn evaluation_lookup() {
        let store = store();
        let eval = store.evaluation_for("R010").unwrap();
        assert_eq!(eval.recommendation, Recommendation::Reject);
        assert!(store.evaluation_for("R003").is_none());
    }
}
