//! Process-wide analysis tables: skill vocabulary, role keyword profiles,
//! standard section names, and the stopword list loaded at startup.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::skills::SkillMatching;

/// Label returned when no role profile matches strongly enough.
pub const GENERAL_ROLE: &str = "General IT Jobs";

/// Canonical skill names, matched case-insensitively.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "C",
    "SQL",
    "NoSQL",
    "HTML",
    "CSS",
    "JavaScript",
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "Flask",
    "Django",
    "Streamlit",
    "Pandas",
    "Numpy",
    "Matplotlib",
    "Seaborn",
    "Keras",
    "Tensorflow",
    "Scikit-learn",
    "Linux",
    "Windows",
    "Git",
    "Github",
    "Data Analytics",
    "Computer Vision",
    "Natural Language Processing",
    "OpenCV",
    "AWS",
    "Azure",
    "Big Data",
    "Tableau",
    "Power BI",
    "R",
    "Hadoop",
    "Spark",
    "Data Mining",
    "Data Visualization",
    "Communication",
    "Teamwork",
    "Leadership",
    "Presentation",
];

/// A job category and the lowercase keywords that define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Role profiles in tie-break priority order: on equal keyword counts the
/// earlier profile wins.
pub const ROLE_PROFILES: &[RoleProfile] = &[
    RoleProfile {
        name: "Data Science Jobs",
        keywords: &[
            "data science",
            "machine learning",
            "pandas",
            "numpy",
            "scikit-learn",
            "statistics",
            "matplotlib",
            "tensorflow",
            "data analysis",
        ],
    },
    RoleProfile {
        name: "Web Development Jobs",
        keywords: &[
            "html",
            "css",
            "javascript",
            "react",
            "frontend",
            "backend",
            "web development",
            "flask",
            "django",
        ],
    },
    RoleProfile {
        name: "Software Developer Jobs",
        keywords: &[
            "c++",
            "java",
            "object-oriented",
            "algorithms",
            "data structures",
            "software engineering",
        ],
    },
    RoleProfile {
        name: "Machine Learning Jobs",
        keywords: &[
            "deep learning",
            "neural network",
            "keras",
            "pytorch",
            "ml model",
            "training data",
        ],
    },
    RoleProfile {
        name: "Cloud / DevOps Jobs",
        keywords: &[
            "aws",
            "azure",
            "docker",
            "kubernetes",
            "ci/cd",
            "cloud computing",
            "devops",
        ],
    },
    RoleProfile {
        name: "UI/UX Designer Jobs",
        keywords: &[
            "figma",
            "adobe xd",
            "wireframe",
            "ui design",
            "ux research",
            "prototype",
            "user experience",
        ],
    },
];

/// Section headings an ATS expects to find.
pub const ATS_SECTIONS: &[&str] = &[
    "education",
    "experience",
    "skills",
    "projects",
    "certifications",
    "summary",
    "contact",
    "profile",
    "objective",
    "professional summary",
];

/// Read-only analysis configuration, built once at startup and shared by
/// every analysis through an `Arc`.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub skills: &'static [&'static str],
    pub roles: &'static [RoleProfile],
    pub sections: &'static [&'static str],
    pub stopwords: HashSet<String>,
    pub skill_matching: SkillMatching,
}

impl AnalyzerConfig {
    /// Builds the configuration from the compiled-in tables and a stopword file.
    pub fn load(stopwords_path: impl AsRef<Path>, skill_matching: SkillMatching) -> Result<Self> {
        let path = stopwords_path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword list at '{}'", path.display()))?;
        let stopwords = parse_stopwords(&raw);
        info!(
            "Loaded {} stopwords from {}",
            stopwords.len(),
            path.display()
        );
        Ok(Self::with_stopwords(stopwords, skill_matching))
    }

    pub fn with_stopwords(stopwords: HashSet<String>, skill_matching: SkillMatching) -> Self {
        Self {
            skills: SKILL_VOCABULARY,
            roles: ROLE_PROFILES,
            sections: ATS_SECTIONS,
            stopwords,
            skill_matching,
        }
    }

    /// Keyword list of the named role; empty for the general fallback.
    pub fn role_keywords(&self, role: &str) -> &'static [&'static str] {
        self.roles
            .iter()
            .find(|p| p.name == role)
            .map(|p| p.keywords)
            .unwrap_or(&[])
    }
}

/// Stopwords are whitespace-separated; matching is on lowercase tokens.
fn parse_stopwords(raw: &str) -> HashSet<String> {
    raw.split_whitespace().map(|w| w.to_lowercase()).collect()
}
