// Resume analysis pipeline.
// Implements: document loading, identity/skill/experience/role extraction, skill gap, ATS scoring.
// Stages are plain functions over the resume text; `pipeline::Analyzer` sequences them.

pub mod ats;
pub mod document;
pub mod experience;
pub mod gap;
pub mod handlers;
pub mod identity;
pub mod keywords;
pub mod pipeline;
pub mod role;
pub mod skills;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod test_pdf;

pub use pipeline::Analyzer;
pub use vocabulary::AnalyzerConfig;
