//! Lexicon-based sentiment scoring.
//!
//! Text is tokenized, each token is looked up in the lexicon, and the
//! weights are summed. The sign of the sum decides the polarity. A lexicon
//! word directly preceded by a negator ("not good") has its weight flipped
//! unless negation is switched off.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

use crate::lexicon::Lexicon;
use crate::tokenizer::tokenize;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nobody", "nothing", "nowhere", "cannot",
    "cant", "can't", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt",
    "aren't", "arent", "wasn't", "wasnt", "weren't", "werent", "won't", "wont", "wouldn't",
    "wouldnt", "shouldn't", "shouldnt", "couldn't", "couldnt", "haven't", "havent", "hasn't",
    "hasnt", "hadn't", "hadnt", "ain't", "aint",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SentimentError {
    #[error("No text provided")]
    MissingInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn from_score(score: i64) -> Self {
        match score.signum() {
            1 => Polarity::Positive,
            -1 => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }
}

/// Wire result of a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SentimentResult {
    /// Echo of the input text.
    pub text: String,
    /// Sum of the polarity weights of all recognized tokens.
    pub score: i64,
    pub overall: Polarity,
}

/// Full breakdown of one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<String>,
    /// Tokens found in the lexicon, in input order.
    pub words: Vec<String>,
    /// Matched tokens whose effective weight was positive.
    pub positive: Vec<String>,
    /// Matched tokens whose effective weight was negative.
    pub negative: Vec<String>,
    pub score: i64,
    /// `score` divided by the number of tokens.
    pub comparative: f64,
    pub overall: Polarity,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    lexicon: Arc<Lexicon>,
    negation: bool,
}

impl Analyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            negation: true,
        }
    }

    pub fn with_negation(mut self, enabled: bool) -> Self {
        self.negation = enabled;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn classify(&self, text: &str) -> Result<SentimentResult, SentimentError> {
        let analysis = self.analyze(text)?;

        debug!(
            tokens = analysis.tokens.len(),
            matched = analysis.words.len(),
            positive = ?analysis.positive,
            negative = ?analysis.negative,
            comparative = analysis.comparative,
            "scored text"
        );

        Ok(SentimentResult {
            text: text.to_string(),
            score: analysis.score,
            overall: analysis.overall,
        })
    }

    pub fn analyze(&self, text: &str) -> Result<Analysis, SentimentError> {
        if text.trim().is_empty() {
            return Err(SentimentError::MissingInput);
        }

        let tokens = tokenize(text);
        let mut words = Vec::new();
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        let mut score: i64 = 0;

        for (idx, token) in tokens.iter().enumerate() {
            let Some(weight) = self.lexicon.weight(token) else {
                continue;
            };
            // Widened first so negating i32::MIN cannot overflow.
            let mut weight = i64::from(weight);

            if self.negation && idx > 0 && is_negator(&tokens[idx - 1]) {
                weight = -weight;
            }

            words.push(token.clone());
            if weight > 0 {
                positive.push(token.clone());
            } else if weight < 0 {
                negative.push(token.clone());
            }
            score += weight;
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            score as f64 / tokens.len() as f64
        };
        let overall = Polarity::from_score(score);

        Ok(Analysis {
            tokens,
            words,
            positive,
            negative,
            score,
            comparative,
            overall,
        })
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Analyzer {
        Analyzer::new(Lexicon::builtin())
    }

    fn synthetic() -> Analyzer {
        Analyzer::new(Arc::new(Lexicon::from_pairs([
            ("up", 2),
            ("down", -2),
            ("meh", -1),
            ("yay", 5),
        ])))
    }

    #[test]
    fn test_positive_sentiment() {
        let result = builtin().classify("I love this, it's great and wonderful").unwrap();
        assert!(result.score > 0);
        assert_eq!(result.overall, Polarity::Positive);
        assert_eq!(result.text, "I love this, it's great and wonderful");
    }

    #[test]
    fn test_negative_sentiment() {
        let result = builtin().classify("This is terrible and awful, I hate it").unwrap();
        assert!(result.score < 0);
        assert_eq!(result.overall, Polarity::Negative);
    }

    #[test]
    fn test_neutral_sentiment() {
        let result = builtin().classify("The meeting is at 3pm in room 204").unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.overall, Polarity::Neutral);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(builtin().classify(""), Err(SentimentError::MissingInput));
        assert_eq!(builtin().classify("   \n\t"), Err(SentimentError::MissingInput));
    }

    #[test]
    fn test_mixed_sentiment_uses_net_sum() {
        let analyzer = builtin();
        let balanced = analyzer.classify("good but also bad").unwrap();
        assert_eq!(balanced.score, 0);
        assert_eq!(balanced.overall, Polarity::Neutral);

        // Two negative tokens lose to one strongly positive token.
        let analyzer = synthetic();
        let result = analyzer.classify("meh meh yay").unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.overall, Polarity::Positive);
    }

    #[test]
    fn test_unrecognized_input_is_neutral() {
        let result = synthetic().classify("completely unknown words ?!").unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.overall, Polarity::Neutral);
    }

    #[test]
    fn test_punctuation_only_input_is_neutral_not_missing() {
        let analysis = synthetic().analyze("?!").unwrap();
        assert!(analysis.tokens.is_empty());
        assert_eq!(analysis.comparative, 0.0);
        assert_eq!(analysis.overall, Polarity::Neutral);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(synthetic().classify("UP Up up").unwrap().score, 6);
    }

    #[test]
    fn test_negation_flips_following_word() {
        let result = builtin().classify("this is not good").unwrap();
        assert_eq!(result.score, -3);
        assert_eq!(result.overall, Polarity::Negative);

        let result = builtin().classify("I don\u{2019}t hate it").unwrap();
        assert_eq!(result.overall, Polarity::Positive);
    }

    #[test]
    fn test_negation_only_reaches_next_token() {
        // "not" precedes "really", so "good" keeps its sign.
        let result = builtin().classify("not really good").unwrap();
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_negation_of_extreme_weight() {
        let analyzer = Analyzer::new(Arc::new(Lexicon::from_pairs([("doom", i32::MIN)])));
        let result = analyzer.classify("not doom").unwrap();
        assert_eq!(result.score, -i64::from(i32::MIN));
        assert_eq!(result.overall, Polarity::Positive);
    }

    #[test]
    fn test_negation_can_be_disabled() {
        let analyzer = builtin().with_negation(false);
        let result = analyzer.classify("this is not good").unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.overall, Polarity::Positive);
    }

    #[test]
    fn test_analysis_breakdown() {
        let analysis = synthetic().analyze("up, down, no up, meh").unwrap();
        assert_eq!(analysis.tokens, vec!["up", "down", "no", "up", "meh"]);
        assert_eq!(analysis.words, vec!["up", "down", "up", "meh"]);
        assert_eq!(analysis.positive, vec!["up"]);
        assert_eq!(analysis.negative, vec!["down", "up", "meh"]);
        assert_eq!(analysis.score, -3);
        assert!((analysis.comparative - (-0.6)).abs() < 1e-9);
        assert_eq!(analysis.overall, Polarity::Negative);
    }

    #[test]
    fn test_polarity_from_score_is_exhaustive() {
        for score in [-1000_i64, -1, 0, 1, 1000, i64::MIN, i64::MAX] {
            let expected = if score > 0 {
                Polarity::Positive
            } else if score < 0 {
                Polarity::Negative
            } else {
                Polarity::Neutral
            };
            assert_eq!(Polarity::from_score(score), expected);
        }
    }

    #[test]
    fn test_polarity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Polarity::Neutral).unwrap(), "\"neutral\"");
        assert_eq!(Polarity::Negative.as_str(), "negative");
    }

    #[test]
    fn test_deterministic_and_stateless() {
        let analyzer = builtin();
        let size_before = analyzer.lexicon().len();
        let text = "Thanks so much, the study session was awesome but I'm tired";

        let first = analyzer.classify(text).unwrap();
        for _ in 0..10 {
            assert_eq!(analyzer.classify(text).unwrap(), first);
        }
        assert_eq!(analyzer.lexicon().len(), size_before);
    }

    #[test]
    fn test_concurrent_classification_agrees() {
        let analyzer = builtin();
        let text = "great group, nice people, boring room";
        let expected = analyzer.classify(text).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| analyzer.classify(text).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
