use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry. Created on submission or simulated reply,
/// never mutated, discarded when the panel closes.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The recognized question topics, one per canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    CandidateQuality,
    PassRate,
    Recommendation,
    Prediction,
    Optimization,
}

fn mentions_candidate_quality(text: &str) -> bool {
    (text.contains("候选人") && text.contains("质量"))
        || (text.contains("candidate") && text.contains("quality"))
}

fn mentions_pass_rate(text: &str) -> bool {
    (text.contains("面试") && text.contains("通过率"))
        || (text.contains("interview") && text.contains("pass"))
}

fn mentions_recommendation(text: &str) -> bool {
    text.contains("推荐")
        || text.contains("建议")
        || text.contains("recommend")
        || text.contains("suggest")
}

fn mentions_prediction(text: &str) -> bool {
    text.contains("预测")
        || text.contains("趋势")
        || text.contains("predict")
        || text.contains("trend")
}

fn mentions_optimization(text: &str) -> bool {
    text.contains("优化")
        || text.contains("改进")
        || text.contains("optimize")
        || text.contains("improve")
}

/// Recognition rules in fixed priority order; the first match wins.
const RULES: &[(Topic, fn(&str) -> bool)] = &[
    (Topic::CandidateQuality, mentions_candidate_quality),
    (Topic::PassRate, mentions_pass_rate),
    (Topic::Recommendation, mentions_recommendation),
    (Topic::Prediction, mentions_prediction),
    (Topic::Optimization, mentions_optimization),
];

const CANDIDATE_QUALITY_REPLY: &str = "根据AI分析，当前候选人整体质量评分为7.8/10。本月新增候选人中，高级岗位匹配度较上月提升12%，其中后端方向尤为突出。建议重点关注评分8分以上的候选人，优先安排面试。";

const PASS_RATE_REPLY: &str = "近30天面试通过率为42%，较上月上升5个百分点。其中技术面通过率58%，终面通过率71%；电话初筛环节淘汰率最高，建议复核筛选标准。";

const RECOMMENDATION_REPLY: &str = "根据岗位画像，为您推荐3位高匹配候选人：张伟（匹配度92%）、李娜（匹配度88%）、王强（匹配度85%）。建议优先安排张伟的下一轮技术面试。";

const PREDICTION_REPLY: &str = "趋势预测：按当前招聘节奏，本季度预计可完成入职目标的85%。后端岗位竞争加剧，建议提前启动人才储备，并适当放宽工作年限要求。";

const OPTIMIZATION_REPLY: &str = "优化建议：1）压缩简历筛选周期至2个工作日；2）技术面增加在线编程环节；3）对终面通过者24小时内发出Offer，降低候选人流失率。";

const FALLBACK_REPLY: &str = "我可以帮您分析候选人质量、面试通过率和招聘趋势，也可以推荐候选人或给出流程优化建议。请告诉我您想了解哪方面的信息。";

/// Classify free-form input against the rule table. Pure: the same input
/// always lands on the same topic. Matching is case-insensitive.
pub fn classify(input: &str) -> Option<Topic> {
    let text = input.to_lowercase();
    RULES
        .iter()
        .find(|(_, matches)| matches(&text))
        .map(|(topic, _)| *topic)
}

pub fn reply_for(topic: Option<Topic>) -> &'static str {
    match topic {
        Some(Topic::CandidateQuality) => CANDIDATE_QUALITY_REPLY,
        Some(Topic::PassRate) => PASS_RATE_REPLY,
        Some(Topic::Recommendation) => RECOMMENDATION_REPLY,
        Some(Topic::Prediction) => PREDICTION_REPLY,
        Some(Topic::Optimization) => OPTIMIZATION_REPLY,
        None => FALLBACK_REPLY,
    }
}

/// The canned reply for one user input.
pub fn select_reply(input: &str) -> &'static str {
    reply_for(classify(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_quality_pair_wins_regardless_of_surrounding_text() {
        assert_eq!(classify("本月候选人质量怎么样"), Some(Topic::CandidateQuality));
        assert_eq!(
            classify("帮我看看这批候选人的整体质量如何？"),
            Some(Topic::CandidateQuality)
        );
        assert_eq!(
            classify("How is the CANDIDATE Quality this month?"),
            Some(Topic::CandidateQuality)
        );
    }

    #[test]
    fn quality_reply_has_the_fixed_prefix() {
        let reply = select_reply("本月候选人质量怎么样");
        assert!(reply.starts_with("根据AI分析，当前候选人整体质量评分为7.8/10"));
    }

    #[test]
    fn pass_rate_needs_both_keywords() {
        assert_eq!(classify("面试通过率是多少"), Some(Topic::PassRate));
        // "面试" alone is not enough
        assert_eq!(classify("今天有几场面试"), None);
    }

    #[test]
    fn single_keyword_topics() {
        assert_eq!(classify("给我一些建议"), Some(Topic::Recommendation));
        assert_eq!(classify("推荐几个人选"), Some(Topic::Recommendation));
        assert_eq!(classify("下季度趋势如何"), Some(Topic::Prediction));
        assert_eq!(classify("流程怎么优化"), Some(Topic::Optimization));
        assert_eq!(classify("can you suggest someone"), Some(Topic::Recommendation));
        assert_eq!(classify("predict next month"), Some(Topic::Prediction));
        assert_eq!(classify("how to IMPROVE the funnel"), Some(Topic::Optimization));
    }

    #[test]
    fn unrecognized_input_falls_back_to_capability_listing() {
        assert_eq!(classify("你好"), None);
        assert_eq!(classify(""), None);
        assert_eq!(select_reply("随便聊聊"), FALLBACK_REPLY);
    }

    #[test]
    fn earlier_rules_take_priority() {
        // Matches both CandidateQuality and Recommendation; rule order decides
        let input = "候选人质量不行，建议换渠道";
        assert_eq!(classify(input), Some(Topic::CandidateQuality));
        // Matches both PassRate and Optimization
        assert_eq!(classify("面试通过率太低，需要优化"), Some(Topic::PassRate));
    }

    #[test]
    fn selector_is_deterministic() {
        let input = "预测一下招聘趋势";
        let first = select_reply(input);
        for _ in 0..10 {
            assert_eq!(select_reply(input), first);
        }
    }

    #[test]
    fn message_constructors_stamp_role_and_time() {
        let user = Message::user("你好");
        let reply = Message::assistant(select_reply("你好"));
        assert_eq!(user.role, Role::User);
        assert_eq!(reply.role, Role::Assistant);
        assert_ne!(user.id, reply.id);
        assert!(reply.timestamp >= user.timestamp);
    }
}
