//! Lexical cue tables: STAR cues, evidence patterns, red-flag phrases and
//! vocabularies used by the scoring heuristics.
//!
//! Regex entries are source strings; phrase entries are lowercase and matched
//! as substrings of the lowercased answer.

/// Whole-word first-person pronouns.
pub const FIRST_PERSON_PATTERN: &str = r"(?i)\b(?:i|my|me|we|our|us|myself|ourselves)\b";

pub const STAR_SITUATION: &[&str] = &[
    r"(?i)\b(?:when i was|while i was|at my (?:previous|last|current|old) (?:job|company|role|team|employer))",
    r"(?i)\b(?:the situation was|the context was|at the time|back in (?:\d{4}|my))",
    r"(?i)\b(?:we were (?:facing|dealing with|seeing)|there was an? (?:problem|issue|outage|incident|bug))",
    r"(?i)\b(?:our (?:team|company|product|system) (?:was|had)|in my (?:previous|last|current) role)",
];

pub const STAR_TASK: &[&str] = &[
    r"(?i)\b(?:i was (?:responsible|tasked|asked|assigned|in charge))",
    r"(?i)\b(?:my (?:role|task|job|goal|responsibility|assignment) was)",
    r"(?i)\b(?:i needed to|we needed to|i had to|we had to)",
    r"(?i)\b(?:the goal was|the challenge was|our objective was|the requirement was)",
];

pub const STAR_ACTION: &[&str] = &[
    r"(?i)\bi (?:decided|implemented|built|created|designed|developed|wrote|led|refactored|migrated|introduced|configured|analy[sz]ed|debugged|investigated|proposed|added|rewrote|profiled|automated)\b",
    r"(?i)\b(?:so i|first,? i|then i|next,? i|i started by|i set up|i took)",
    r"(?i)\b(?:i worked (?:on|with)|we implemented|my approach was|i reached out)",
];

pub const STAR_RESULT: &[&str] = &[
    r"(?i)\b(?:as a result|the result was|the outcome was|resulting in|in the end|ultimately)",
    r"(?i)\b(?:which|this|that) (?:reduced|improved|increased|decreased|saved|cut|led to|helped)",
    r"(?i)\bwe (?:achieved|delivered|shipped|launched|reduced|improved|cut)\b",
    r"(?i)\b(?:by \d+(?:\.\d+)?\s*%|\d+(?:\.\d+)?\s*% (?:faster|reduction|improvement|increase|decrease|fewer|less|more))",
];

pub const METRIC_PERCENTAGE: &str = r"(?i)\b\d+(?:\.\d+)?\s*(?:%|percent\b)";
pub const METRIC_TIME: &str =
    r"(?i)\b\d+(?:\.\d+)?\s*(?:ms|milliseconds?|seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?)\b";
pub const METRIC_COUNT: &str = r"(?i)\b\d[\d,]*\+?\s*(?:users?|customers?|requests?|people|engineers?|developers?|members?|clients?|services?|servers?|transactions?|records?|queries|endpoints?|tickets?|bugs?|tests?|teams?|projects?|applications?|apps?|repos(?:itories)?|nodes?)\b";
pub const METRIC_MONEY: &str =
    r"(?i)(?:\$\s?\d[\d,]*(?:\.\d+)?(?:\s*(?:k|m|b|million|billion|thousand)\b)?|\b\d[\d,]*(?:\.\d+)?\s*(?:dollars|usd)\b)";

/// Technical-evidence patterns; every occurrence adds a fixed bonus.
pub const TECHNICAL_TERM_PATTERNS: &[&str] = &[
    // error strings
    r"\b[A-Z][A-Za-z]*(?:Error|Exception)\b",
    r"\bE[A-Z]{4,}\b",
    // version numbers
    r"\bv?\d+\.\d+(?:\.\d+)?\b",
    // time units
    r"(?i)\b\d+\s*(?:ms|milliseconds|seconds|minutes|hours)\b",
    // percentages
    r"\d+(?:\.\d+)?%",
    // issue references
    r"(?:#\d+\b|\b[A-Z]{2,10}-\d+\b)",
    // localhost ports
    r"(?i)\b(?:localhost|127\.0\.0\.1):\d+",
    // urls
    r"https?://\S+",
    // source files
    r"(?i)\b[\w-]+\.(?:js|jsx|ts|tsx|py|rs|go|java|rb|php|cs|cpp|json|ya?ml|toml|sql|sh|css|html)\b",
];

/// Named developer tools; each one found as a substring adds a fixed bonus.
pub const DEVELOPER_TOOLS: &[&str] = &[
    "git", "docker", "kubernetes", "jenkins", "jira", "postman", "vscode", "webpack", "npm",
    "yarn", "devtools", "datadog", "grafana", "prometheus", "sentry", "new relic", "splunk",
    "kibana", "terraform", "ansible", "nginx", "redis", "postgres", "mysql", "mongodb", "jest",
    "pytest", "cypress", "selenium", "wireshark", "gdb", "valgrind", "lighthouse", "figma",
    "circleci", "github actions", "pagerduty", "flamegraph",
];

/// Textbook-style generic phrasing.
pub const GENERIC_PHRASES: &[&str] = &[
    "it depends",
    "typically",
    "best practice",
    "in general",
    "generally speaking",
    "usually you",
    "one should",
    "you should always",
    "it is important to",
    "it's important to",
    "a good developer",
    "there are many ways",
    "various factors",
    "at the end of the day",
    "in today's world",
    "plays a crucial role",
    "team player",
    "communication is key",
];

/// Rehearsed, résumé-speak phrasing.
pub const POLISHED_PHRASES: &[&str] = &[
    "i am passionate about",
    "i'm passionate about",
    "leverage",
    "synergy",
    "seamlessly",
    "robust and scalable",
    "cutting-edge",
    "state-of-the-art",
    "world-class",
    "i always strive",
    "exceeded expectations",
    "delivered exceptional",
    "results-driven",
    "detail-oriented",
    "go above and beyond",
    "fast-paced environment",
    "spearheaded",
    "holistic",
];

/// Phrases that admit a mistake or a learning moment.
pub const IMPERFECTION_PHRASES: &[&str] = &[
    "i made a mistake",
    "my mistake",
    "i was wrong",
    "i realized",
    "i learned",
    "lesson learned",
    "in hindsight",
    "looking back",
    "i should have",
    "i didn't know",
    "i wasn't sure",
    "i struggled",
    "it took me",
    "at first i",
    "i underestimated",
    "i overlooked",
    "i messed up",
    "it failed",
    "didn't work",
    "roll back",
    "i got stuck",
    "i had to ask",
];

/// Phrases that sound like an encyclopedia entry rather than experience.
pub const TEXTBOOK_PHRASES: &[&str] = &[
    "is defined as",
    "refers to",
    "is a process",
    "there are several types",
    "the main advantage",
    "the main disadvantage",
    "in computer science",
    "according to",
    "by definition",
    "is a design pattern",
    "the key principles",
    "generally consists of",
    "it is a technique",
];

/// Phrases describing an implausibly flawless outcome.
pub const SUSPICIOUSLY_PERFECT_PHRASES: &[&str] = &[
    "everything went perfectly",
    "went perfectly",
    "no problems at all",
    "never made a mistake",
    "never failed",
    "always succeeded",
    "flawless",
    "without any issues",
    "100% success",
    "zero bugs",
    "perfect solution",
    "everyone loved it",
];

/// Vocabulary a failure-type answer is expected to touch.
pub const FAILURE_VOCABULARY: &[&str] = &[
    "fail", "mistake", "wrong", "problem", "issue", "challenge", "difficult", "struggle", "bug",
    "broke", "error", "setback", "learned", "lesson", "missed",
];

/// Nouns that count as technical evidence for the vague-answer check.
pub const TECHNICAL_NOUNS: &[&str] = &[
    "api", "database", "server", "function", "query", "endpoint", "cache", "deploy", "bug",
    "test", "code", "service", "component", "library", "framework", "script", "pipeline",
    "schema", "commit", "branch", "module", "index", "config", "log",
];

pub const DEPTH_ERROR_PATTERN: &str = r"(?i)\b(?:error|bug|issue|crash|exception|failure)s?\b";
pub const DEPTH_REASONING_PATTERN: &str = r"(?i)\b(?:because|reason|since)\b";
pub const DEPTH_DECISION_PATTERN: &str = r"(?i)\b(?:decided|chose|picked)\b";
pub const DEPTH_GROWTH_PATTERN: &str = r"(?i)\b(?:learned|realized|understood)\b";

pub const TRANSITION_WORDS: &[&str] = &[
    "however", "therefore", "first", "then", "finally", "additionally", "as a result",
    "after that", "next", "meanwhile", "consequently", "for example", "because",
];

/// Seniority keyword classes, evaluated in order; the first class found wins.
pub const SENIORITY_SENIOR: &str =
    r"(?i)\b(?:senior|sr\.?|lead|principal|staff|architect|head of)\b";
pub const SENIORITY_MID: &str = r"(?i)\b(?:mid[- ]level|mid[- ]senior|intermediate)\b";
pub const SENIORITY_JUNIOR: &str =
    r"(?i)\b(?:junior|jr\.?|entry[- ]level|intern(?:ship)?|graduate|trainee)\b";

pub const YEARS_PATTERN: &str = r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\b";

/// Definitional question stems; a question containing one is not anti-cheat.
pub const DEFINITIONAL_STEMS: &[&str] = &[
    r"(?i)\bwhat is\b",
    r"(?i)\bwhat's\b",
    r"(?i)\bdefine\b",
    r"(?i)\bexplain the concept\b",
    r"(?i)\bwhat are the (?:advantages|disadvantages)\b",
    r"(?i)\bwhat is the difference between\b",
    r"(?i)\blist the\b",
    r"(?i)\bname the\b",
    r"(?i)\bhow does .+ work\b",
];

/// Experience-cue question stems.
pub const EXPERIENCE_STEMS: &[&str] = &[
    r"(?i)\bdescribe a time\b",
    r"(?i)\btell me about\b",
    r"(?i)\bwalk me through\b",
    r"(?i)\bgive me an example\b",
    r"(?i)\bshare an experience\b",
    r"(?i)\bhave you ever\b",
    r"(?i)\bwhen did you\b",
    r"(?i)\bhow did you\b",
];

/// Generic topic keywords for follow-up context.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "performance", "database", "api", "testing", "deployment", "security", "scaling",
    "migration", "architecture", "debugging", "refactoring", "caching", "monitoring",
    "authentication", "integration", "onboarding", "incident", "release",
];

/// Words ignored when picking a detail phrase out of an answer.
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "because", "before", "being", "below",
    "between", "could", "doing", "during", "every", "first", "having", "itself", "other",
    "should", "something", "their", "there", "these", "thing", "things", "those", "through",
    "under", "until", "where", "which", "while", "would", "actually", "really", "basically",
    "usually", "pretty", "always", "another", "different", "important", "probably",
];

/// Resume section header alternatives, per section name.
pub const SECTION_HEADERS: &[(&str, &str)] = &[
    (
        "experience",
        r"(?:(?:work|professional|relevant|industry)\s+)?(?:experience|employment(?:\s+history)?|work\s+history|career\s+history)",
    ),
    (
        "education",
        r"(?:education(?:al\s+background)?|academic\s+background|academics|qualifications)",
    ),
    (
        "skills",
        r"(?:(?:technical|core|key|relevant)\s+)?(?:skills|competencies|technologies|tech\s+stack|expertise)(?:\s+(?:&|and)\s+tools)?",
    ),
    (
        "projects",
        r"(?:(?:personal|notable|key|side|selected)\s+)?(?:projects|portfolio)",
    ),
    (
        "summary",
        r"(?:(?:professional|career)\s+)?(?:summary|profile|objective|about\s+me|about)",
    ),
    (
        "certifications",
        r"(?:certifications?|certificates|licen[cs]es(?:\s+(?:&|and)\s+certifications)?)",
    ),
];
