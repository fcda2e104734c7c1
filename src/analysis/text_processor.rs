//! Text processing and normalization

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let stop_words = Self::create_stop_words();

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\b(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
            .expect("Invalid phone regex");

        Self {
            stop_words,
            email_regex,
            phone_regex,
        }
    }

    /// Tokenize text into normalized words using Unicode segmentation.
    ///
    /// Lowercases, drops stop words and single characters, and keeps only
    /// tokens containing at least one letter.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            let normalized = word.to_lowercase();

            if !self.stop_words.contains(&normalized) && normalized.len() > 1 {
                if normalized.chars().any(|c| c.is_alphabetic()) {
                    tokens.push(normalized);
                }
            }
        }

        tokens
    }

    /// Tokens as a set, for membership and overlap queries.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.tokenize(text).into_iter().collect()
    }

    /// Extract significant keywords in first-seen order.
    ///
    /// Duplicates are removed while preserving the position of the first
    /// occurrence; only tokens longer than 2 characters qualify.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for token in self.tokenize(text) {
            if token.len() > 2 && seen.insert(token.clone()) {
                keywords.push(token);
            }
        }

        keywords
    }

    /// Token-set Jaccard similarity in [0, 1]. Symmetric by construction.
    pub fn text_similarity(&self, text1: &str, text2: &str) -> f32 {
        let set1 = self.token_set(text1);
        let set2 = self.token_set(text2);

        let intersection = set1.intersection(&set2).count();
        let union = set1.union(&set2).count();

        if union == 0 {
            0.0
        } else {
            intersection as f32 / union as f32
        }
    }

    pub fn has_email(&self, text: &str) -> bool {
        self.email_regex.is_match(text)
    }

    pub fn has_phone(&self, text: &str) -> bool {
        self.phone_regex.is_match(text)
    }

    /// Create set of common English and job-posting stop words
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            // Common English
            "a", "about", "above", "across", "after", "again", "against", "all", "also",
            "am", "among", "an", "and", "any", "are", "as", "at", "be", "because", "been",
            "before", "being", "below", "between", "both", "but", "by", "can", "could",
            "did", "do", "does", "down", "during", "each", "etc", "every", "few", "for",
            "from", "further", "had", "has", "have", "he", "her", "here", "him", "his",
            "how", "if", "in", "into", "is", "it", "its", "just", "like", "made", "make",
            "many", "may", "me", "might", "more", "most", "much", "must", "my", "no",
            "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out",
            "over", "own", "per", "shall", "she", "should", "so", "some", "such", "than",
            "that", "the", "their", "them", "then", "there", "these", "they", "this",
            "those", "through", "to", "too", "under", "until", "up", "upon", "us", "use",
            "using", "very", "via", "was", "we", "well", "were", "what", "when", "where",
            "which", "while", "who", "whom", "why", "will", "with", "within", "would",
            "you", "your",
            // Job-posting filler
            "ability", "able", "candidate", "candidates", "company", "experience",
            "experienced", "following", "ideal", "including", "join", "looking",
            "opportunity", "plus", "position", "preferred", "qualifications", "required",
            "requirements", "requiring", "responsibilities", "role", "seeking", "skills",
            "strong", "team", "working", "years",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let text = "Rust programming language is awesome!";

        let tokens = processor.tokenize(text);

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(tokens.contains(&"language".to_string()));
        assert!(tokens.contains(&"awesome".to_string()));

        // Stop words should be filtered out
        assert!(!tokens.contains(&"is".to_string()));
    }

    #[test]
    fn test_keyword_extraction_preserves_first_seen_order() {
        let processor = TextProcessor::new();
        let text = "Python developer building Python services with Docker and Python scripts";

        let keywords = processor.extract_keywords(text);

        assert_eq!(keywords.iter().filter(|k| *k == "python").count(), 1);
        let python_pos = keywords.iter().position(|k| k == "python").unwrap();
        let docker_pos = keywords.iter().position(|k| k == "docker").unwrap();
        assert!(python_pos < docker_pos);
    }

    #[test]
    fn test_keyword_extraction_drops_stop_words() {
        let processor = TextProcessor::new();
        let text = "We are looking for a strong candidate with Kubernetes experience";

        let keywords = processor.extract_keywords(text);

        assert!(keywords.contains(&"kubernetes".to_string()));
        assert!(!keywords.contains(&"looking".to_string()));
        assert!(!keywords.contains(&"strong".to_string()));
        assert!(!keywords.contains(&"experience".to_string()));
    }

    #[test]
    fn test_text_similarity_bounds_and_symmetry() {
        let processor = TextProcessor::new();
        let text1 = "Rust programming language";
        let text2 = "Programming in Rust language";

        let forward = processor.text_similarity(text1, text2);
        let backward = processor.text_similarity(text2, text1);

        assert!(forward > 0.0);
        assert!(forward <= 1.0);
        assert!((forward - backward).abs() < f32::EPSILON);
    }

    #[test]
    fn test_text_similarity_identical_texts() {
        let processor = TextProcessor::new();
        let text = "Senior Rust engineer with distributed systems background";

        let similarity = processor.text_similarity(text, text);

        assert!((similarity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_text_similarity_empty_inputs() {
        let processor = TextProcessor::new();

        assert_eq!(processor.text_similarity("", ""), 0.0);
    }

    #[test]
    fn test_contact_detection() {
        let processor = TextProcessor::new();
        let text = "Contact me at john.doe@email.com or call (555) 123-4567";

        assert!(processor.has_email(text));
        assert!(processor.has_phone(text));
        assert!(!processor.has_email("no contact info here"));
        assert!(!processor.has_phone("no contact info here"));
    }
}
