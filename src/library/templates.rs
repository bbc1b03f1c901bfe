//! Question and follow-up templates. `{skill}`, `{topic}` and `{detail}` are
//! substituted at generation time.

pub const EXPERIENCE_TEMPLATES: &[&str] = &[
    "Tell me about a project where you used {skill} to solve a real problem. What was your role?",
    "Describe a time you had to ship something with {skill} under a tight deadline.",
    "Walk me through the most complex feature you built with {skill}.",
    "Tell me about the last time {skill} was central to something you delivered. What did you own?",
    "Describe a situation where you introduced {skill} to a codebase or team.",
    "Walk me through how you used {skill} on your most recent project, from first commit to release.",
];

pub const DEPTH_TEMPLATES: &[&str] = &[
    "Walk me through a hard {skill} bug you tracked down. How did you find the root cause?",
    "Tell me about a design decision you made with {skill} that you would defend today. Why that choice?",
    "Describe a time {skill} did not behave the way you expected. What did you dig into?",
    "Walk me through how you improved the performance of something built with {skill}.",
    "Tell me about a trade-off you had to make when working with {skill}.",
    "Describe how you tested and verified a {skill} change you were unsure about.",
];

pub const FAILURE_TEMPLATES: &[&str] = &[
    "Tell me about a time something you built with {skill} failed in production. What happened next?",
    "Describe a mistake you made while working with {skill} and what you learned from it.",
    "Walk me through a {skill} project that did not go as planned.",
    "Tell me about a time you had to roll back or rewrite {skill} work. What went wrong?",
];

pub const COLLABORATION_TEMPLATES: &[&str] = &[
    "Tell me about a time you disagreed with a teammate about how to use {skill}. How was it resolved?",
    "Describe how you helped someone else get productive with {skill}.",
    "Walk me through a code review on {skill} work where you received tough feedback.",
    "Tell me about coordinating with another team on a {skill} change.",
];

pub const OPENING_TEMPLATES: &[&str] = &[
    "To start, tell me about a recent project you are proud of and what you personally built.",
    "Walk me through your current role and the kind of problems you solve day to day.",
    "Tell me about the piece of work from the last year that taught you the most.",
];

pub const CLOSING_TEMPLATES: &[&str] = &[
    "Looking back at everything we discussed, what would you do differently next time?",
    "Tell me about something you are working to get better at right now.",
    "Is there an experience we did not cover that shows how you work? Walk me through it.",
];

/// Generic fallback pool. The first element is the question type name.
pub const GENERIC_QUESTIONS: &[(&str, &str)] = &[
    ("experience", "Tell me about a technical problem you solved that you are still proud of."),
    ("experience", "Describe the system you know best. What did you build in it yourself?"),
    ("depth", "Walk me through how you debug an issue you cannot reproduce locally."),
    ("depth", "Tell me about a time you had to learn a new technology quickly. How did you approach it?"),
    ("failure", "Describe a deadline you missed. What caused it and what changed afterwards?"),
    ("failure", "Tell me about a time your estimate was badly wrong."),
    ("collaboration", "Tell me about a conflict on your team and the part you played in resolving it."),
    ("collaboration", "Describe a time you had to explain a technical decision to a non-technical stakeholder."),
];

/// Follow-up templates anchored on a topic extracted from the answer.
pub const CONTEXTUAL_FOLLOW_UPS: &[&str] = &[
    "You mentioned {topic}. Can you walk me through exactly what you did there?",
    "What was the hardest part of working on {topic}?",
    "How did you measure whether {topic} actually worked?",
    "If you had to do {topic} again, what would you change?",
    "What decisions did you personally make around {topic}?",
];

pub const SPECIFICITY_FOLLOW_UPS: &[&str] = &[
    "Can you give a concrete example, with the specific numbers or tools involved?",
    "What exact tools, libraries or commands did you use to solve that?",
    "Can you describe the specific {detail} you were working with?",
    "What metric told you that your approach worked?",
];

pub const DEPTH_FOLLOW_UPS: &[&str] = &[
    "What was your personal role in that, as opposed to the team's?",
    "Walk me through your thought process when you ran into {detail}.",
    "What alternatives did you consider, and why did you reject them?",
    "What would have happened if you had not made that call?",
];

pub const CONSISTENCY_FOLLOW_UPS: &[&str] = &[
    "Was there anything that did not go as planned? What did you learn from it?",
    "What would you do differently if you faced the same situation again?",
    "Who disagreed with your approach, and how did you handle it?",
    "What was the biggest mistake you made on that project?",
];

/// Last-resort follow-ups once a template bucket is exhausted.
pub const SKILL_FALLBACK_FOLLOW_UPS: &[&str] = &[
    "Tell me about another situation where you relied on {skill} under pressure.",
    "Tell me about the hardest {skill} problem you have debugged on your own.",
    "Describe a {skill} decision you made that you later had to revisit.",
];

/// Candidate-facing verdict sentences.
pub const VERDICT_PASS: &str = "Strong candidate, recommended for the next interview round.";
pub const VERDICT_HOLD: &str = "Promising candidate who needs a further review before a decision.";
pub const VERDICT_REJECT: &str = "Not a match for this role at this time.";
