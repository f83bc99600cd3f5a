use crate::error::{PipelineError, Result};
use regex::Regex;

/// Strips configured phrases from generated text. Hosted models tend to
/// prefix their output with boilerplate ("以下が記事です" and the like);
/// which phrases to drop is model-specific, so the patterns come from
/// configuration. With no patterns, or none matching, the text passes
/// through unchanged.
pub struct TextCleaner {
    patterns: Vec<Regex>,
}

impl TextCleaner {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .map_err(|e| PipelineError::Config(format!("bad strip pattern {:?}: {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn clean(&self, text: &str) -> String {
        let mut out = text.to_string();
        for pattern in &self.patterns {
            out = pattern.replace_all(&out, "").into_owned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_patterns_is_a_pass_through() {
        let cleaner = TextCleaner::new(&[]).unwrap();
        assert_eq!(cleaner.clean("そのままの本文です。"), "そのままの本文です。");
    }

    #[test]
    fn unmatched_patterns_leave_text_unchanged() {
        let cleaner = TextCleaner::new(&["^以下が記事です[:：]?".to_string()]).unwrap();
        assert_eq!(cleaner.clean("本文のみ。"), "本文のみ。");
    }

    #[test]
    fn matched_patterns_are_stripped_in_order() {
        let cleaner = TextCleaner::new(&[
            "^以下が記事です[:：]?\\s*".to_string(),
            "\\[INST\\].*?\\[/INST\\]".to_string(),
        ])
        .unwrap();
        let cleaned = cleaner.clean("以下が記事です：本文[INST]prompt echo[/INST]続き");
        assert_eq!(cleaned, "本文続き");
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let result = TextCleaner::new(&["([unclosed".to_string()]);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
