use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters allowed in the local part of a harvested address
const LOCAL_PART: &str = r"[A-Za-z0-9._%+-]+";

/// Finds addresses belonging to one literal domain in raw page text
///
/// The domain is matched byte-for-byte as given (escaped, case-sensitive),
/// not against the authority the crawl follows links on.
#[derive(Debug, Clone)]
pub struct EmailScanner {
    pattern: Regex,
}

impl EmailScanner {
    /// Compiles the scanner for `domain`
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("{}@{}", LOCAL_PART, regex::escape(domain)))?;
        Ok(Self { pattern })
    }

    /// Returns every distinct match in `text`
    pub fn scan(&self, text: &str) -> HashSet<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn syntax_pattern() -> &'static Regex {
    static SYNTAX: OnceLock<Regex> = OnceLock::new();
    SYNTAX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email syntax pattern is valid")
    })
}

/// Simple syntactic check for a complete email address
///
/// # Examples
///
/// ```
/// use mail_ripple::email::is_valid_email_syntax;
///
/// assert!(is_valid_email_syntax("jane.doe@example.com"));
/// assert!(!is_valid_email_syntax("jane@localhost"));
/// ```
pub fn is_valid_email_syntax(email: &str) -> bool {
    syntax_pattern().is_match(email)
}
