//! Word and sentence segmentation

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

/// English stop-words excluded from vocabulary and keyword measures
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
        "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn",
        "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
        "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
        "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Lower-cased words with punctuation stripped
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Word count of every sentence that contains at least one word
pub fn sentence_lengths(text: &str) -> Vec<usize> {
    text.unicode_sentences()
        .map(|sentence| sentence.unicode_words().count())
        .filter(|&count| count > 0)
        .collect()
}

/// Whether a lower-cased word is a stop-word
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_strip_punctuation() {
        assert_eq!(words("Well, I don't know!"), vec!["well", "i", "don't", "know"]);
        assert!(words("  ...  ").is_empty());
    }

    #[test]
    fn test_sentence_lengths() {
        assert_eq!(sentence_lengths("I led the team. We shipped it on time!"), vec![4, 5]);
        assert!(sentence_lengths("").is_empty());
    }

    #[test]
    fn test_stopwords() {
        assert!(is_stopword("the"));
        assert!(is_stopword("don't"));
        assert!(!is_stopword("architecture"));
    }
}
