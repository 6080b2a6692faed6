//! Rule-based polarity scoring over a small valence lexicon.
//!
//! Valences use the -4..=4 scale common to rule-based sentiment tools. The sum
//! of adjusted valences is squashed into [-1, 1] with `s / sqrt(s^2 + ALPHA)`.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use super::SentimentClassifier;
use crate::error::Result;

const ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// How many preceding tokens a negation or booster can reach.
const LOOKBACK: usize = 3;

/// Lexicon-backed classifier used when no external model is configured.
pub struct LexiconClassifier {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: Vec<&'static str>,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    pub fn new() -> Self {
        let positive = [
            ("good", 1.9),
            ("great", 3.1),
            ("happy", 2.7),
            ("happiness", 2.6),
            ("love", 3.2),
            ("loved", 2.9),
            ("lovely", 2.8),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("excellent", 2.7),
            ("fun", 2.3),
            ("beautiful", 2.9),
            ("best", 3.2),
            ("nice", 1.8),
            ("joy", 2.8),
            ("excited", 2.2),
            ("exciting", 2.2),
            ("glad", 2.0),
            ("grateful", 2.0),
            ("thanks", 1.9),
            ("thank", 1.5),
            ("wonderful", 2.7),
            ("fantastic", 2.6),
            ("perfect", 2.7),
            ("positive", 2.6),
            ("care", 2.2),
            ("adventure", 1.3),
            ("win", 2.8),
            ("proud", 2.1),
            ("smile", 1.5),
            ("laugh", 2.6),
            ("hope", 1.9),
            ("calm", 1.3),
            ("peace", 2.5),
            ("relax", 1.9),
            ("enjoy", 2.2),
            ("blessed", 2.9),
            ("cool", 1.3),
            ("yay", 2.4),
        ];

        let negative = [
            ("bad", -2.5),
            ("sad", -2.1),
            ("hate", -2.7),
            ("angry", -2.3),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("worst", -3.1),
            ("worse", -2.1),
            ("lonely", -2.0),
            ("alone", -1.0),
            ("cry", -2.1),
            ("crying", -2.1),
            ("tired", -1.9),
            ("depressed", -2.3),
            ("hurt", -2.4),
            ("pain", -2.3),
            ("miss", -0.6),
            ("broken", -2.1),
            ("heartbroken", -3.3),
            ("anxious", -1.0),
            ("anxiety", -0.7),
            ("stress", -1.8),
            ("stressed", -1.4),
            ("fear", -2.2),
            ("afraid", -2.0),
            ("worried", -1.2),
            ("upset", -1.6),
            ("horrible", -2.5),
            ("sick", -2.3),
            ("fail", -2.5),
            ("failed", -2.3),
            ("lost", -1.3),
            ("hopeless", -2.0),
            ("exhausted", -1.5),
            ("boring", -1.3),
            ("annoyed", -1.6),
            ("miserable", -2.5),
            ("sorry", -0.3),
        ];

        let boosters = [
            ("very", BOOSTER_INCREMENT),
            ("really", BOOSTER_INCREMENT),
            ("so", BOOSTER_INCREMENT),
            ("extremely", BOOSTER_INCREMENT),
            ("super", BOOSTER_INCREMENT),
            ("incredibly", BOOSTER_INCREMENT),
            ("totally", BOOSTER_INCREMENT),
            ("absolutely", BOOSTER_INCREMENT),
            ("slightly", -BOOSTER_INCREMENT),
            ("somewhat", -BOOSTER_INCREMENT),
            ("barely", -BOOSTER_INCREMENT),
            ("kinda", -BOOSTER_INCREMENT),
        ];

        let negations = vec![
            "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "cannot",
            "cant", "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "werent", "wont",
            "wouldnt", "shouldnt", "couldnt", "without",
        ];

        Self {
            valences: positive.into_iter().chain(negative).collect(),
            boosters: boosters.into_iter().collect(),
            negations,
        }
    }

    fn is_negation(&self, token: &str) -> bool {
        token.ends_with("n't") || token.ends_with("n’t") || self.negations.contains(&token)
    }

    /// Sum of context-adjusted valences, before normalization.
    fn valence_sum(&self, tokens: &[String]) -> f64 {
        let mut sum = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.valences.get(token.as_str()) else {
                continue;
            };

            let mut valence = base;
            let window_start = i.saturating_sub(LOOKBACK);

            for (distance, previous) in tokens[window_start..i].iter().rev().enumerate() {
                if let Some(&boost) = self.boosters.get(previous.as_str()) {
                    let decay = 1.0 - 0.05 * distance as f64;
                    valence += base.signum() * boost * decay;
                }
            }

            if tokens[window_start..i].iter().any(|t| self.is_negation(t)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        sum
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn polarity(&self, text: &str) -> Result<f64> {
        let tokens: Vec<String> = text.unicode_words().map(str::to_lowercase).collect();
        let mut sum = self.valence_sum(&tokens);

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
            sum += sum.signum() * exclamations as f64 * EXCLAMATION_INCREMENT;
        }

        if sum == 0.0 {
            return Ok(0.0);
        }

        let score = sum / (sum * sum + ALPHA).sqrt();
        Ok(score.clamp(-1.0, 1.0))
    }
}
