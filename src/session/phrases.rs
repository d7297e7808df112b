//! Feedback text and spoken phrases, addressed to the learner by name

/// Everything the session says or shows to the learner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrases {
    name: String,
}

impl Phrases {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    /// "Good Job Shelly!" or "Good Job!" when there is no name
    fn addressed(&self, phrase: &str) -> String {
        if self.name.is_empty() {
            format!("{}!", phrase)
        } else {
            format!("{} {}!", phrase, self.name)
        }
    }

    pub fn greeting(&self) -> String {
        self.addressed("Hi")
    }

    pub fn typed_success_feedback(&self) -> String {
        format!("{} 🎉", self.addressed("Good Job"))
    }

    pub fn typed_success_spoken(&self) -> String {
        self.addressed("Good Job")
    }

    pub fn retry_feedback(&self) -> String {
        "Try again! 💪".to_string()
    }

    pub fn retry_spoken(&self) -> String {
        "Try again!".to_string()
    }

    pub fn spoken_success_feedback(&self) -> String {
        format!("{} 🌟", self.addressed("Wonderful"))
    }

    pub fn spoken_retry_feedback(&self) -> String {
        "Let's try that again!".to_string()
    }

    pub fn closing_spoken(&self) -> String {
        self.addressed("Great work")
    }

    pub fn completion_title(&self) -> String {
        format!("{} 🎉", self.addressed("Great work"))
    }
}

impl Default for Phrases {
    fn default() -> Self {
        Self::new("Shelly")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        let phrases = Phrases::new("Shelly");
        assert_eq!(phrases.greeting(), "Hi Shelly!");
        assert_eq!(phrases.typed_success_feedback(), "Good Job Shelly! 🎉");
        assert_eq!(phrases.typed_success_spoken(), "Good Job Shelly!");
        assert_eq!(phrases.spoken_success_feedback(), "Wonderful Shelly! 🌟");
        assert_eq!(phrases.closing_spoken(), "Great work Shelly!");
    }

    #[test]
    fn test_unnamed() {
        let phrases = Phrases::new("  ");
        assert_eq!(phrases.greeting(), "Hi!");
        assert_eq!(phrases.typed_success_spoken(), "Good Job!");
        assert_eq!(phrases.completion_title(), "Great work! 🎉");
    }
}
