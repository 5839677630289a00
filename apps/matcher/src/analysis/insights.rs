//! Narrative insights derived from the category scores: executive summary,
//! priority fixes, per-area recommendations, an action plan and examples.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::industry::{detect_industry, keywords_for};
use crate::analysis::{EMAIL, PHONE};
use crate::matching::composite::Priority;
use crate::matching::tables::StopWords;
use crate::text::round1;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub overall_score: f64,
    pub status: String,
    pub message: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityImprovement {
    pub priority: Priority,
    pub category: String,
    pub issue: String,
    pub impact: String,
    pub quick_fix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub suggestion: String,
    pub example: String,
    pub priority: Priority,
}

impl InsightRecommendation {
    fn new(kind: impl Into<String>, suggestion: impl Into<String>, example: impl Into<String>, priority: Priority) -> Self {
        Self {
            kind: kind.into(),
            suggestion: suggestion.into(),
            example: example.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecommendations {
    #[serde(rename = "Professional Impact")]
    pub professional_impact: Vec<InsightRecommendation>,
    #[serde(rename = "Keyword Optimization")]
    pub keyword_optimization: Vec<InsightRecommendation>,
    #[serde(rename = "Content Enhancement")]
    pub content_enhancement: Vec<InsightRecommendation>,
    #[serde(rename = "ATS Optimization")]
    pub ats_optimization: Vec<InsightRecommendation>,
    #[serde(rename = "Industry Alignment")]
    pub industry_alignment: Vec<InsightRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStep {
    pub timeline: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeforeAfter {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementExamples {
    pub bullet_points: Vec<BeforeAfter>,
    pub professional_summary: Vec<BeforeAfter>,
    pub skills_organization: Vec<BeforeAfter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedInsights {
    pub executive_summary: ExecutiveSummary,
    pub priority_improvements: Vec<PriorityImprovement>,
    pub detailed_recommendations: DetailedRecommendations,
    pub action_plan: Vec<ActionStep>,
    pub examples: ImprovementExamples,
}

/// Headline scores the insights are driven by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightScores {
    pub ats: u32,
    pub keywords: u32,
    pub content: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number regex is valid"));
static ALPHA_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").expect("alpha word regex is valid"));

const STRONG_VERBS: &[&str] = &[
    "achieved", "developed", "implemented", "optimized", "increased", "reduced", "managed", "led",
];
const LEADERSHIP_TERMS: &[&str] = &["led", "managed", "supervised", "coordinated", "mentored"];
const HEADLINE_TECH_TERMS: &[&str] = &[
    "python", "java", "react", "sql", "aws", "docker", "kubernetes", "agile", "scrum",
];

pub fn generate_detailed_insights(
    text: &str,
    job_description: &str,
    scores: InsightScores,
    stop_words: &StopWords,
) -> DetailedInsights {
    DetailedInsights {
        executive_summary: executive_summary(scores),
        priority_improvements: priority_improvements(scores),
        detailed_recommendations: DetailedRecommendations {
            professional_impact: professional_impact_recommendations(text),
            keyword_optimization: keyword_recommendations(text, job_description, stop_words),
            content_enhancement: content_enhancement_recommendations(),
            ats_optimization: ats_optimization_recommendations(text),
            industry_alignment: industry_alignment_recommendations(text),
        },
        action_plan: action_plan(),
        examples: improvement_examples(),
    }
}

pub fn executive_summary(scores: InsightScores) -> ExecutiveSummary {
    let overall = (scores.ats + scores.keywords + scores.content) as f64 / 3.0;
    let (status, message) = if overall >= 85.0 {
        (
            "Excellent",
            "Your resume demonstrates strong ATS compatibility and professional presentation.",
        )
    } else if overall >= 70.0 {
        (
            "Good",
            "Your resume shows solid fundamentals with room for targeted improvements.",
        )
    } else if overall >= 55.0 {
        (
            "Needs Improvement",
            "Your resume requires significant enhancements to improve ATS compatibility.",
        )
    } else {
        (
            "Poor",
            "Your resume needs major restructuring to pass ATS systems effectively.",
        )
    };

    let mut strengths = Vec::new();
    if scores.ats >= 80 {
        strengths.push("Good ATS compatibility and formatting".to_string());
    }
    if scores.keywords >= 75 {
        strengths.push("Strong keyword optimization".to_string());
    }
    if scores.content >= 75 {
        strengths.push("High-quality content with clear achievements".to_string());
    }

    let mut weaknesses = Vec::new();
    if scores.ats < 70 {
        weaknesses.push("ATS formatting and compatibility issues".to_string());
    }
    if scores.keywords < 65 {
        weaknesses.push("Insufficient job-relevant keywords".to_string());
    }
    if scores.content < 70 {
        weaknesses.push("Lacks quantifiable achievements and impact metrics".to_string());
    }

    ExecutiveSummary {
        overall_score: round1(overall),
        status: status.to_string(),
        message: message.to_string(),
        strengths,
        areas_for_improvement: weaknesses,
    }
}

/// At most three, in fixed category order.
pub fn priority_improvements(scores: InsightScores) -> Vec<PriorityImprovement> {
    let mut improvements = Vec::new();

    if scores.ats < 70 {
        improvements.push(PriorityImprovement {
            priority: Priority::High,
            category: "ATS Compatibility".to_string(),
            issue: "Resume format may not parse correctly in ATS systems".to_string(),
            impact: "Your resume might not be seen by hiring managers".to_string(),
            quick_fix: "Use standard section headers and simple formatting".to_string(),
        });
    }
    if scores.keywords < 60 {
        improvements.push(PriorityImprovement {
            priority: Priority::High,
            category: "Keyword Optimization".to_string(),
            issue: "Insufficient job-relevant keywords".to_string(),
            impact: "Lower ranking in ATS keyword searches".to_string(),
            quick_fix: "Add 5-7 relevant keywords from the job description".to_string(),
        });
    }
    if scores.content < 65 {
        improvements.push(PriorityImprovement {
            priority: Priority::Medium,
            category: "Content Quality".to_string(),
            issue: "Lacks quantifiable achievements and impact metrics".to_string(),
            impact: "Fails to demonstrate concrete value to employers".to_string(),
            quick_fix: "Add numbers and percentages to your accomplishments".to_string(),
        });
    }

    improvements.truncate(3);
    improvements
}

pub fn professional_impact_recommendations(text: &str) -> Vec<InsightRecommendation> {
    let text_lower = text.to_lowercase();
    let mut recommendations = Vec::new();

    if NUMBER.find_iter(text).count() < 5 {
        recommendations.push(InsightRecommendation::new(
            "Quantifiable Impact",
            "Add specific metrics to demonstrate your achievements",
            "Instead of 'Improved system performance' write 'Improved system performance by 35%, reducing load times from 3.2s to 2.1s'",
            Priority::High,
        ));
    }

    let strong_verbs = STRONG_VERBS.iter().filter(|v| text_lower.contains(**v)).count();
    if strong_verbs < 5 {
        recommendations.push(InsightRecommendation::new(
            "Action-Oriented Language",
            "Start bullet points with strong action verbs",
            "Replace 'Responsible for database management' with 'Optimized database queries, reducing execution time by 40%'",
            Priority::Medium,
        ));
    }

    if !LEADERSHIP_TERMS.iter().any(|t| text_lower.contains(*t)) {
        recommendations.push(InsightRecommendation::new(
            "Leadership Experience",
            "Highlight any leadership or mentoring experiences",
            "Add: 'Led a team of 4 developers to deliver project 2 weeks ahead of schedule'",
            Priority::Medium,
        ));
    }

    recommendations
}

fn alpha_words(text_lower: &str) -> BTreeSet<&str> {
    ALPHA_WORD.find_iter(text_lower).map(|m| m.as_str()).collect()
}

pub fn keyword_recommendations(
    text: &str,
    job_description: &str,
    stop_words: &StopWords,
) -> Vec<InsightRecommendation> {
    let text_lower = text.to_lowercase();
    let mut recommendations = Vec::new();

    if !job_description.is_empty() {
        let job_lower = job_description.to_lowercase();
        let resume_words = alpha_words(&text_lower);
        let missing_tech: Vec<&str> = alpha_words(&job_lower)
            .into_iter()
            .filter(|w| !resume_words.contains(w) && !stop_words.contains(w))
            .filter(|w| HEADLINE_TECH_TERMS.contains(w))
            .collect();

        if let Some(first) = missing_tech.first() {
            let shown: Vec<&str> = missing_tech.iter().take(5).copied().collect();
            recommendations.push(InsightRecommendation::new(
                "Missing Technical Keywords",
                format!("Add these relevant technical terms: {}", shown.join(", ")),
                format!("Include '{first}' in your skills or project descriptions"),
                Priority::High,
            ));
        }
    }

    let industry = detect_industry(text);
    if let Some(keywords) = keywords_for(industry) {
        let missing: Vec<&str> = keywords
            .iter()
            .filter(|k| !text_lower.contains(**k))
            .take(3)
            .copied()
            .collect();
        if !missing.is_empty() {
            recommendations.push(InsightRecommendation::new(
                format!("{} Industry Keywords", title_case(industry)),
                format!("Add {industry} industry keywords to strengthen your profile"),
                format!("Consider adding: {}", missing.join(", ")),
                Priority::Medium,
            ));
        }
    }

    recommendations
}

pub fn content_enhancement_recommendations() -> Vec<InsightRecommendation> {
    vec![
        InsightRecommendation::new(
            "STAR Method Implementation",
            "Structure your achievements using the STAR method",
            "Situation: 'During high-traffic period' → Task: 'Needed to optimize server performance' → Action: 'Implemented caching strategy' → Result: 'Reduced response time by 50%'",
            Priority::High,
        ),
        InsightRecommendation::new(
            "Professional Summary",
            "Add a compelling professional summary at the top",
            "'Results-driven Software Engineer with 3+ years experience in full-stack development, specializing in React and Node.js, with proven track record of delivering scalable solutions that improve user experience by 40%+'",
            Priority::Medium,
        ),
        InsightRecommendation::new(
            "Skills Organization",
            "Organize skills by category for better readability",
            "Technical Skills: Python, Java, React | Tools: Docker, Git, AWS | Soft Skills: Leadership, Problem-solving",
            Priority::Low,
        ),
    ]
}

pub fn ats_optimization_recommendations(text: &str) -> Vec<InsightRecommendation> {
    let text_lower = text.to_lowercase();
    let mut recommendations = Vec::new();

    let missing_sections: Vec<&str> = ["experience", "education", "skills"]
        .into_iter()
        .filter(|s| !text_lower.contains(s))
        .collect();
    if !missing_sections.is_empty() {
        recommendations.push(InsightRecommendation::new(
            "Section Headers",
            format!("Add standard section headers: {}", missing_sections.join(", ")),
            "Use clear headers like 'WORK EXPERIENCE' or 'EDUCATION'",
            Priority::High,
        ));
    }

    if !(EMAIL.is_match(text) && PHONE.is_match(text)) {
        recommendations.push(InsightRecommendation::new(
            "Contact Information",
            "Ensure email and phone number are clearly visible",
            "Add at top: 'john.doe@email.com | (555) 123-4567'",
            Priority::High,
        ));
    }

    recommendations
}

pub fn industry_alignment_recommendations(text: &str) -> Vec<InsightRecommendation> {
    let industry = detect_industry(text);
    vec![InsightRecommendation::new(
        format!("{} Industry Focus", title_case(industry)),
        format!("Strengthen your {industry} industry profile"),
        format!("Highlight {industry}-specific technologies and methodologies"),
        Priority::Medium,
    )]
}

pub fn action_plan() -> Vec<ActionStep> {
    let step = |timeline: &str, actions: [&str; 3]| ActionStep {
        timeline: timeline.to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
    };
    vec![
        step(
            "Immediate (1 hour)",
            [
                "Add missing contact information (email, phone, LinkedIn)",
                "Use standard section headers (Experience, Education, Skills)",
                "Add 3-5 relevant keywords from the job description",
            ],
        ),
        step(
            "Short-term (1 day)",
            [
                "Rewrite 3 bullet points using action verbs and quantifiable results",
                "Add a professional summary highlighting your key value proposition",
                "Organize skills into clear categories",
            ],
        ),
        step(
            "Medium-term (1 week)",
            [
                "Restructure all experience descriptions using the STAR method",
                "Research and add industry-specific certifications or courses",
                "Optimize keyword density while maintaining natural flow",
            ],
        ),
    ]
}

pub fn improvement_examples() -> ImprovementExamples {
    let pair = |before: &str, after: &str| BeforeAfter {
        before: before.to_string(),
        after: after.to_string(),
    };
    ImprovementExamples {
        bullet_points: vec![
            pair(
                "Worked on database optimization",
                "Optimized database queries using indexing and query restructuring, reducing average response time by 45% and improving user experience for 10,000+ daily users",
            ),
            pair(
                "Responsible for team management",
                "Led cross-functional team of 6 developers and designers to deliver 3 major features ahead of schedule, resulting in 25% increase in user engagement",
            ),
        ],
        professional_summary: vec![pair(
            "Computer Science student looking for opportunities",
            "Results-driven Computer Science student with hands-on experience in full-stack development, machine learning, and cloud technologies. Proven track record of delivering innovative solutions that improve system performance by 40%+ and reduce operational costs.",
        )],
        skills_organization: vec![pair(
            "Python, JavaScript, React, Node.js, AWS, Docker, Git, SQL",
            "Programming: Python, JavaScript, C++ | Frontend: React.js, HTML5, CSS3 | Backend: Node.js, Express.js | Cloud: AWS, Docker | Database: SQL, MongoDB",
        )],
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(ats: u32, keywords: u32, content: u32) -> InsightScores {
        InsightScores {
            ats,
            keywords,
            content,
        }
    }

    #[test]
    fn test_executive_summary_status_bands() {
        assert_eq!(executive_summary(scores(90, 85, 80)).status, "Excellent");
        assert_eq!(executive_summary(scores(70, 70, 70)).status, "Good");
        assert_eq!(executive_summary(scores(60, 55, 50)).status, "Needs Improvement");
        assert_eq!(executive_summary(scores(10, 20, 30)).status, "Poor");
    }

    #[test]
    fn test_executive_summary_strengths_and_weaknesses() {
        let summary = executive_summary(scores(85, 50, 80));
        assert_eq!(summary.overall_score, 71.7);
        assert_eq!(
            summary.strengths,
            vec![
                "Good ATS compatibility and formatting",
                "High-quality content with clear achievements"
            ]
        );
        assert_eq!(summary.areas_for_improvement, vec!["Insufficient job-relevant keywords"]);
    }

    #[test]
    fn test_priority_improvements_order() {
        let improvements = priority_improvements(scores(40, 40, 40));
        let categories: Vec<&str> = improvements.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["ATS Compatibility", "Keyword Optimization", "Content Quality"]
        );
        assert!(priority_improvements(scores(90, 90, 90)).is_empty());
    }

    #[test]
    fn test_missing_technical_keywords_from_job() {
        let recs = keyword_recommendations(
            "Python developer",
            "We need Python, Docker and Kubernetes skills.",
            &StopWords::default(),
        );
        assert_eq!(recs[0].kind, "Missing Technical Keywords");
        assert_eq!(
            recs[0].suggestion,
            "Add these relevant technical terms: docker, kubernetes"
        );
        assert_eq!(recs[0].example, "Include 'docker' in your skills or project descriptions");
    }

    #[test]
    fn test_industry_keyword_recommendation() {
        let recs = keyword_recommendations("Python and AWS engineer", "", &StopWords::default());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, "Technology Industry Keywords");
        assert_eq!(recs[0].example, "Consider adding: java, javascript, react");
    }

    #[test]
    fn test_ats_recommendations_flag_missing_sections_and_contact() {
        let recs = ats_optimization_recommendations("Experience at Acme");
        assert_eq!(recs[0].suggestion, "Add standard section headers: education, skills");
        assert_eq!(recs[1].kind, "Contact Information");
        assert!(ats_optimization_recommendations(
            "experience education skills a@b.com 555-123-4567"
        )
        .is_empty());
    }

    #[test]
    fn test_recommendation_serializes_type_field() {
        let value = serde_json::to_value(&industry_alignment_recommendations("patient care")[0]).unwrap();
        assert_eq!(value["type"], "Healthcare Industry Focus");
        assert_eq!(value["priority"], "Medium");
    }

    #[test]
    fn test_detailed_recommendations_use_display_keys() {
        let insights = generate_detailed_insights("Python", "", scores(50, 50, 50), &StopWords::default());
        let value = serde_json::to_value(&insights).unwrap();
        for key in [
            "Professional Impact",
            "Keyword Optimization",
            "Content Enhancement",
            "ATS Optimization",
            "Industry Alignment",
        ] {
            assert!(value["detailed_recommendations"].get(key).is_some(), "missing {key}");
        }
        assert_eq!(insights.action_plan.len(), 3);
    }
}
