//! Skill categories, canonical skill names and their aliases

/// Category name -> canonical skill names. Canonical names are lowercase.
pub const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "javascript", "typescript", "react", "vue", "angular", "svelte", "html", "css",
            "nextjs", "redux", "tailwind", "webpack",
        ],
    ),
    (
        "backend",
        &[
            "node.js", "express", "django", "flask", "fastapi", "spring", "rails", "graphql",
            "rest api", "microservices", "grpc",
        ],
    ),
    (
        "languages",
        &[
            "python", "java", "go", "rust", "c++", "c#", "ruby", "php", "kotlin", "swift",
            "scala",
        ],
    ),
    (
        "database",
        &[
            "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "dynamodb",
            "sqlite", "cassandra",
        ],
    ),
    (
        "cloud",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ci/cd", "jenkins",
            "linux", "ansible",
        ],
    ),
    (
        "data",
        &[
            "machine learning", "pandas", "numpy", "tensorflow", "pytorch", "spark", "kafka",
            "airflow", "data analysis",
        ],
    ),
    (
        "testing",
        &["jest", "pytest", "cypress", "selenium", "unit testing", "junit"],
    ),
    (
        "practices",
        &[
            "git", "agile", "scrum", "leadership", "mentoring", "communication",
            "project management", "system design",
        ],
    ),
];

/// Canonical skill -> aliases. Alias sets are kept disjoint; on a collision the
/// first canonical in table order wins.
pub const SKILL_ALIASES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "es6", "ecmascript"]),
    ("typescript", &["ts"]),
    ("react", &["reactjs", "react.js"]),
    ("vue", &["vuejs", "vue.js"]),
    ("angular", &["angularjs", "angular.js"]),
    ("nextjs", &["next.js"]),
    ("tailwind", &["tailwindcss"]),
    ("node.js", &["nodejs", "node"]),
    ("express", &["expressjs", "express.js"]),
    ("spring", &["spring boot", "springboot"]),
    ("rails", &["ruby on rails", "ror"]),
    ("rest api", &["restful", "rest apis", "restful api"]),
    ("microservices", &["microservice", "micro-services"]),
    ("go", &["golang"]),
    ("c++", &["cpp"]),
    ("c#", &["csharp", ".net", "dotnet"]),
    ("python", &["python3"]),
    ("postgresql", &["postgres", "psql"]),
    ("mongodb", &["mongo"]),
    ("elasticsearch", &["elastic search", "opensearch"]),
    ("aws", &["amazon web services"]),
    ("azure", &["microsoft azure"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("kubernetes", &["k8s"]),
    ("ci/cd", &["cicd", "continuous integration", "continuous delivery"]),
    ("machine learning", &["ml", "deep learning"]),
    ("tensorflow", &["keras"]),
    ("data analysis", &["data analytics"]),
    ("unit testing", &["unit tests", "tdd", "test-driven development"]),
    ("git", &["github", "gitlab"]),
    ("project management", &["program management"]),
    ("system design", &["systems design", "software architecture"]),
];

/// Category of a canonical skill, if it is in the library.
pub fn category_of(canonical: &str) -> Option<&'static str> {
    SKILL_CATEGORIES
        .iter()
        .find(|(_, skills)| skills.iter().any(|s| *s == canonical))
        .map(|(category, _)| *category)
}

/// Aliases registered for a canonical skill.
pub fn aliases_of(canonical: &str) -> &'static [&'static str] {
    SKILL_ALIASES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Resolve any skill spelling to its canonical name (first match in table order).
pub fn canonicalize(term: &str) -> Option<&'static str> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }

    for (_, skills) in SKILL_CATEGORIES {
        if let Some(found) = skills.iter().find(|s| **s == term) {
            return Some(*found);
        }
    }

    SKILL_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| *a == term))
        .map(|(canonical, _)| *canonical)
}

/// All canonical skills in table order.
pub fn all_canonical() -> impl Iterator<Item = (&'static str, &'static str)> {
    SKILL_CATEGORIES
        .iter()
        .flat_map(|(category, skills)| skills.iter().map(move |s| (*s, *category)))
}
