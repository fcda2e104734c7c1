//! Curated skill taxonomy: canonical terms grouped by category

/// One taxonomy category with its canonical skill terms.
///
/// Terms are lowercase and may contain spaces ("machine learning") or
/// punctuation ("c++", "node.js"); they are matched verbatim against
/// lowercased input text.
#[derive(Debug, Clone, Copy)]
pub struct SkillCategory {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

/// Immutable catalog of skill terms, built once and shared read-only.
///
/// Category order is fixed and meaningful: suggestion generation walks
/// non-priority categories in this order.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    categories: &'static [SkillCategory],
}

/// Categories that get up to two skill suggestions each, ahead of the rest.
pub const PRIORITY_CATEGORIES: [&str; 4] = [
    "programming_languages",
    "web_technologies",
    "cloud_devops",
    "data_science_ml",
];

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go",
    "rust", "swift", "kotlin", "scala", "r", "matlab", "sql", "perl", "haskell",
];

const WEB_TECHNOLOGIES: &[&str] = &[
    "html", "css", "sass", "less", "react", "angular", "vue", "node.js", "express",
    "django", "flask", "spring", "laravel", "jquery", "bootstrap", "webpack", "gatsby",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "oracle", "sqlite",
    "cassandra", "dynamodb", "neo4j", "mariadb", "couchdb", "firebase",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "azure", "gcp", "docker", "kubernetes", "devops", "jenkins", "gitlab",
    "github actions", "terraform", "ansible", "chef", "puppet", "circleci", "nginx",
    "apache",
];

const DATA_SCIENCE_ML: &[&str] = &[
    "machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn",
    "pandas", "numpy", "matplotlib", "keras", "opencv", "nlp", "computer vision",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving", "project management",
    "analytical", "time management", "creativity", "collaboration", "adaptability",
];

const CATEGORIES: &[SkillCategory] = &[
    SkillCategory { name: "programming_languages", terms: PROGRAMMING_LANGUAGES },
    SkillCategory { name: "web_technologies", terms: WEB_TECHNOLOGIES },
    SkillCategory { name: "databases", terms: DATABASES },
    SkillCategory { name: "cloud_devops", terms: CLOUD_DEVOPS },
    SkillCategory { name: "data_science_ml", terms: DATA_SCIENCE_ML },
    SkillCategory { name: "soft_skills", terms: SOFT_SKILLS },
];

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self { categories: CATEGORIES }
    }
}

impl SkillTaxonomy {
    pub fn categories(&self) -> &'static [SkillCategory] {
        self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.name)
    }

    /// All (category index, term) pairs in declaration order.
    pub fn terms(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(idx, category)| category.terms.iter().map(move |term| (idx, *term)))
    }

    pub fn category_name(&self, index: usize) -> &'static str {
        self.categories[index].name
    }

    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|c| c.terms.len()).sum()
    }

    pub fn is_priority_category(name: &str) -> bool {
        PRIORITY_CATEGORIES.contains(&name)
    }
}
