//! Resume skill extraction and job requirement mapping

pub mod experience;
pub mod extractor;
pub mod mapper;
pub mod sections;

pub use experience::{infer_experience, ExperienceProfile, SeniorityLevel};
pub use extractor::{extract_skills, ExtractedSkill, SkillMatcher};
pub use mapper::{
    identify_focus_skills, map_to_requirements, skill_confidence, skill_match_score, ExtraSkill,
    FocusSkill, Importance, JobRequirements, MatchedRequirement, Priority, RequirementEntry,
    SkillMapping,
};
pub use sections::{ResumeSection, SectionType, SectionedResume};
