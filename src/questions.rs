use crate::store::{InterviewQuestion, JobDescription, QuestionCategory};

// Per-skill technical prompts. {skill} is substituted verbatim.
const TECHNICAL_TEMPLATES: [&str; 2] = [
    "请结合实际项目，介绍您在{skill}方面最有挑战的一次实践。",
    "线上出现与{skill}相关的故障或性能问题时，您的排查思路是什么？",
];

// Fixed non-technical tail appended after the per-skill questions.
const CLOSING_QUESTIONS: [(&str, QuestionCategory); 3] = [
    (
        "请描述一次与团队意见不一致的经历，您是如何推动达成共识的？",
        QuestionCategory::Behavioral,
    ),
    (
        "过去一年您主动学习了哪项新技术？为什么选择它？",
        QuestionCategory::Behavioral,
    ),
    (
        "如果项目上线前一天发现一个重大缺陷，您会如何权衡处理？",
        QuestionCategory::Scenario,
    ),
];

/// Interview questions for a job, filled from the hardcoded templates.
/// Deterministic: the same job always yields the same list, in order.
pub fn questions_for_job(job: &JobDescription) -> Vec<InterviewQuestion> {
    let mut questions =
        Vec::with_capacity(job.skills.len() * TECHNICAL_TEMPLATES.len() + CLOSING_QUESTIONS.len());

    for skill in &job.skills {
        for template in TECHNICAL_TEMPLATES {
            questions.push(InterviewQuestion {
                text: template.replace("{skill}", skill),
                category: QuestionCategory::Technical,
            });
        }
    }

    for (text, category) in CLOSING_QUESTIONS {
        questions.push(InterviewQuestion {
            text: text.to_string(),
            category,
        });
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JobStatus;

    fn job(skills: &[&str]) -> JobDescription {
        JobDescription {
            id: "J100".to_string(),
            title: "高级后端工程师".to_string(),
            department: "平台技术部".to_string(),
            headcount: 1,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            status: JobStatus::Open,
        }
    }

    #[test]
    fn every_skill_gets_technical_questions() {
        let job = job(&["Java", "Redis"]);
        let questions = questions_for_job(&job);

        assert_eq!(questions.len(), 2 * TECHNICAL_TEMPLATES.len() + CLOSING_QUESTIONS.len());
        assert!(questions.iter().any(|q| q.text.contains("Java")));
        assert!(questions.iter().any(|q| q.text.contains("Redis")));
        assert!(questions
            .iter()
            .filter(|q| q.category == QuestionCategory::Technical)
            .all(|q| !q.text.contains("{skill}")));
    }

    #[test]
    fn closing_questions_follow_the_technical_block() {
        let job = job(&["Go"]);
        let questions = questions_for_job(&job);

        let first_non_technical = questions
            .iter()
            .position(|q| q.category != QuestionCategory::Technical)
            .unwrap();
        assert_eq!(first_non_technical, TECHNICAL_TEMPLATES.len());
        assert_eq!(
            questions.last().unwrap().category,
            QuestionCategory::Scenario
        );
    }

    #[test]
    fn no_skills_still_yields_the_fixed_tail() {
        let job = job(&[]);
        let questions = questions_for_job(&job);
        assert_eq!(questions.len(), CLOSING_QUESTIONS.len());
    }

    #[test]
    fn generation_is_deterministic() {
        let job = job(&["Vue", "TypeScript"]);
        let a: Vec<String> = questions_for_job(&job).into_iter().map(|q| q.text).collect();
        let b: Vec<String> = questions_for_job(&job).into_iter().map(|q| q.text).collect();
        assert_eq!(a, b);
    }
}
