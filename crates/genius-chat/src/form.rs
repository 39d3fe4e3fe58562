use genius_types::{PromptError, MAX_PROMPT_CHARS};

/// State of the single-field prompt form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub prompt: String,
}

impl PromptForm {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Checks the prompt against the form schema and returns it unchanged
    /// when it passes.
    pub fn validate(&self) -> Result<&str, PromptError> {
        if self.prompt.trim().is_empty() {
            return Err(PromptError::Required);
        }

        let actual = self.prompt.chars().count();
        if actual > MAX_PROMPT_CHARS {
            return Err(PromptError::TooLong {
                max: MAX_PROMPT_CHARS,
                actual,
            });
        }

        Ok(&self.prompt)
    }

    pub fn clear(&mut self) {
        self.prompt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompts_are_required() {
        assert_eq!(PromptForm::default().validate(), Err(PromptError::Required));
        assert_eq!(
            PromptForm::new(" \n\t").validate(),
            Err(PromptError::Required)
        );
    }

    #[test]
    fn valid_prompt_is_returned_verbatim() {
        let form = PromptForm::new("  write a fizzbuzz  ");
        assert_eq!(form.validate(), Ok("  write a fizzbuzz  "));
    }

    #[test]
    fn overlong_prompt_is_rejected() {
        let form = PromptForm::new("x".repeat(MAX_PROMPT_CHARS + 1));
        assert_eq!(
            form.validate(),
            Err(PromptError::TooLong {
                max: MAX_PROMPT_CHARS,
                actual: MAX_PROMPT_CHARS + 1,
            })
        );
        assert!(PromptForm::new("x".repeat(MAX_PROMPT_CHARS)).validate().is_ok());
    }
}
