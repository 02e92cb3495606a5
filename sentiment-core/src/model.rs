//! Sentiment model seam
//!
//! The service treats inference as an opaque function `text -> (label,
//! confidence)`. [`SentimentModel`] is the substitution point: the built-in
//! [`LexiconModel`] keeps the service self-contained and deterministic, and a
//! transformer runtime can be dropped in behind the same trait without
//! touching the orchestrator.

use crate::error::ModelError;
use crate::{SentimentLabel, TEXT_MAX_CHARS};

/// Raw model output before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: SentimentLabel,
    /// Unrounded confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Opaque text classifier.
///
/// Invocation is synchronous and blocking from the caller's point of view;
/// once started it runs to completion or failure with no mid-flight abort.
pub trait SentimentModel: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction, ModelError>;
}

// ============================================================================
// LEXICON MODEL
// ============================================================================

/// Positive terms and their weights.
const POSITIVE_TERMS: &[(&str, f64)] = &[
    ("love", 2.0),
    ("loved", 2.0),
    ("amazing", 2.0),
    ("wonderful", 2.0),
    ("excellent", 2.0),
    ("fantastic", 2.0),
    ("awesome", 2.0),
    ("perfect", 2.0),
    ("delightful", 2.0),
    ("best", 1.5),
    ("great", 1.5),
    ("happy", 1.5),
    ("impressive", 1.5),
    ("pleased", 1.5),
    ("enjoy", 1.5),
    ("enjoyed", 1.5),
    ("good", 1.0),
    ("nice", 1.0),
    ("recommend", 1.2),
    ("like", 0.8),
    ("wow", 0.8),
];

/// Negative terms and their weights.
const NEGATIVE_TERMS: &[(&str, f64)] = &[
    ("terrible", 2.0),
    ("horrible", 2.0),
    ("awful", 2.0),
    ("hate", 2.0),
    ("hated", 2.0),
    ("worst", 2.0),
    ("dreadful", 2.0),
    ("useless", 1.5),
    ("disappointing", 1.5),
    ("disappointed", 1.5),
    ("waste", 1.5),
    ("bad", 1.5),
    ("angry", 1.5),
    ("broken", 1.2),
    ("poor", 1.2),
    ("annoying", 1.2),
    ("sad", 1.2),
    ("failed", 1.2),
    ("slow", 0.8),
    ("wrong", 0.8),
];

/// Tokens that amplify the next sentiment-bearing token.
const INTENSIFIERS: &[&str] = &[
    "absolutely",
    "really",
    "very",
    "extremely",
    "incredibly",
    "totally",
    "so",
];

/// Tokens that flip the polarity of the next sentiment-bearing token.
const NEGATORS: &[&str] = &[
    "not", "never", "no", "nothing", "hardly", "isn't", "wasn't", "aren't", "don't", "doesn't",
    "didn't", "won't", "can't", "cannot",
];

/// Weight multiplier applied by an intensifier.
const INTENSIFIER_FACTOR: f64 = 1.5;

/// How many following tokens a negator or intensifier reaches.
const MODIFIER_WINDOW: usize = 2;

/// Deterministic weighted-lexicon classifier.
///
/// Scoring: tokens are matched against the term lists, with negation and
/// intensifier handling over a short window. Confidence is squashed from the
/// absolute score via `1 - 0.5 * e^(-|score|)`, which lands in `[0.5, 1)`;
/// a zero score classifies positive at exactly 0.5.
#[derive(Debug, Default, Clone)]
pub struct LexiconModel;

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> f64 {
        let mut score = 0.0;
        let mut negation_window = 0usize;
        let mut intensity_window = 0usize;
        let mut intensity = 1.0;

        for token in tokenize(text) {
            if NEGATORS.contains(&token.as_str()) {
                negation_window = MODIFIER_WINDOW + 1;
            } else if INTENSIFIERS.contains(&token.as_str()) {
                intensity_window = MODIFIER_WINDOW + 1;
                intensity = INTENSIFIER_FACTOR;
            } else if let Some(weight) = term_weight(&token) {
                let mut contribution = weight;
                if intensity_window > 0 {
                    contribution *= intensity;
                }
                if negation_window > 0 {
                    contribution = -contribution;
                }
                score += contribution;
                negation_window = 0;
                intensity_window = 0;
                intensity = 1.0;
            }

            negation_window = negation_window.saturating_sub(1);
            intensity_window = intensity_window.saturating_sub(1);
            if intensity_window == 0 {
                intensity = 1.0;
            }
        }

        score
    }
}

impl SentimentModel for LexiconModel {
    fn classify(&self, text: &str) -> Result<Prediction, ModelError> {
        if text.is_empty() {
            return Err(ModelError::EmptyInput);
        }
        let chars = text.chars().count();
        if chars > TEXT_MAX_CHARS {
            return Err(ModelError::InputTooLong {
                max: TEXT_MAX_CHARS,
                got: chars,
            });
        }

        let score = Self::score(text);

        // Ties classify positive at the confidence floor.
        let label = if score >= 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        let confidence = 1.0 - 0.5 * (-score.abs()).exp();

        Ok(Prediction { label, confidence })
    }
}

/// Lowercased word tokens, keeping apostrophes so contractions survive.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn term_weight(token: &str) -> Option<f64> {
    POSITIVE_TERMS
        .iter()
        .find(|(term, _)| *term == token)
        .map(|(_, w)| *w)
        .or_else(|| {
            NEGATIVE_TERMS
                .iter()
                .find(|(term, _)| *term == token)
                .map(|(_, w)| -*w)
        })
}
