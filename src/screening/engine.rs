//! Interview planning: resume and job in, ordered question plan out

use crate::config::Config;
use crate::interview::questions::{closing_question, generate_questions, opening_question, Question};
use crate::screening::session::ScreeningSession;
use crate::skills::experience::{infer_experience, ExperienceProfile};
use crate::skills::extractor::{extract_skills, ExtractedSkill};
use crate::skills::mapper::{identify_focus_skills, map_to_requirements, FocusSkill, JobRequirements, SkillMapping};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Everything decided before the first question is asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPlan {
    pub job: JobRequirements,
    pub extracted_skills: Vec<ExtractedSkill>,
    pub mapping: SkillMapping,
    pub focus_skills: Vec<FocusSkill>,
    pub experience: ExperienceProfile,
    pub opening: Option<Question>,
    pub questions: Vec<Question>,
    pub closing: Option<Question>,
}

impl InterviewPlan {
    /// Opening, main questions, closing; in asking order.
    pub fn all_questions(&self) -> impl Iterator<Item = &Question> {
        self.opening
            .iter()
            .chain(self.questions.iter())
            .chain(self.closing.iter())
    }

    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.all_questions().find(|q| q.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.all_questions().count()
    }
}

pub struct ScreeningEngine {
    config: Config,
}

impl ScreeningEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn rng(&self) -> StdRng {
        match self.config.interview.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Map the resume onto the job and pick the questions.
    pub fn plan<R: Rng + ?Sized>(&self, resume_text: &str, job: &JobRequirements, rng: &mut R) -> InterviewPlan {
        let extracted_skills = extract_skills(resume_text);
        debug!("Extracted {} skills from resume", extracted_skills.len());

        let mapping = map_to_requirements(&extracted_skills, &job.requirement_entries());
        let focus_skills = identify_focus_skills(&mapping);
        let questions = generate_questions(&mapping, &focus_skills, self.config.interview.question_count, rng);

        let (opening, closing) = if self.config.interview.include_opening_closing {
            (Some(opening_question(rng)), Some(closing_question(rng)))
        } else {
            (None, None)
        };

        info!(
            "Planned {} questions: skill match {}%, {} focus skills",
            questions.len(),
            mapping.skill_match_score,
            focus_skills.len()
        );

        InterviewPlan {
            job: job.clone(),
            experience: infer_experience(resume_text),
            extracted_skills,
            mapping,
            focus_skills,
            opening,
            questions,
            closing,
        }
    }

    /// Plan an interview and open a session that owns its state and RNG.
    pub fn start(&self, resume_text: &str, job: &JobRequirements) -> ScreeningSession {
        let mut rng = self.rng();
        let plan = self.plan(resume_text, job, &mut rng);
        ScreeningSession::new(plan, self.config.scoring.weights, rng)
    }
}
