//! Keyword sentiment scoring

use super::mood::Sentiment;
use super::rules::KeywordRules;

/// Keyword hits on each side.
///
/// Each keyword counts at most once, however often it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentimentScore {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentScore {
    /// Strictly higher side wins; ties are neutral
    pub fn sentiment(self) -> Sentiment {
        match self.positive.cmp(&self.negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

pub fn score(text: &str, rules: &KeywordRules) -> SentimentScore {
    let lowered = text.to_lowercase();
    let hits = |words: &[String]| words.iter().filter(|w| lowered.contains(w.as_str())).count();
    SentimentScore {
        positive: hits(&rules.positive),
        negative: hits(&rules.negative),
    }
}

pub fn analyze_sentiment(text: &str, rules: &KeywordRules) -> Sentiment {
    score(text, rules).sentiment()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        let rules = KeywordRules::default();
        let s = score("terima kasih, hari ini baik", &rules);
        assert_eq!(s, SentimentScore { positive: 2, negative: 0 });
        assert_eq!(s.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_negative_case_insensitive() {
        let rules = KeywordRules::default();
        assert_eq!(
            analyze_sentiment("Aku SEDIH dan lagi stress", &rules),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_tie_is_neutral() {
        let rules = KeywordRules::default();
        assert_eq!(
            analyze_sentiment("senang tapi juga sedih", &rules),
            Sentiment::Neutral
        );
        assert_eq!(analyze_sentiment("", &rules), Sentiment::Neutral);
        assert_eq!(analyze_sentiment("biasa saja", &rules), Sentiment::Neutral);
    }

    #[test]
    fn test_repeats_count_once() {
        let rules = KeywordRules::default();
        let s = score("sedih sedih sedih, tapi senang dan bahagia", &rules);
        assert_eq!(s, SentimentScore { positive: 2, negative: 1 });
        assert_eq!(s.sentiment(), Sentiment::Positive);
    }
}
