//! Per-request TF-IDF encoding.
//!
//! Tokens are lower-cased runs of two or more word characters with English
//! stop words removed. Term weights are raw counts multiplied by the smoothed
//! inverse document frequency `ln((1 + n) / (1 + df)) + 1`, and every row is
//! scaled to unit L2 norm.

use std::collections::{BTreeMap, HashMap};

use crate::VectorizerConfig;
use crate::error::VectorizeError;

const ENGLISH_STOP_WORDS: [&str; 318] = [
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see",
    "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `text` into lower-cased, stop-word-free tokens.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().nth(1).is_some())
        .filter(|token| !is_stop_word(token))
        .map(str::to_owned)
        .collect()
}

/// A sparse row of `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    #[expect(
        clippy::float_arithmetic,
        reason = "L2 normalisation divides by the Euclidean norm"
    )]
    fn normalised(mut entries: Vec<(usize, f32)>) -> Self {
        entries.sort_by_key(|&(column, _)| column);
        let row = Self { entries };
        let norm = row.norm();
        if norm > 0.0_f32 {
            let entries = row
                .entries
                .into_iter()
                .map(|(column, value)| (column, value / norm))
                .collect();
            return Self { entries };
        }
        row
    }

    pub(crate) fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    #[expect(clippy::float_arithmetic, reason = "Euclidean norm")]
    pub(crate) fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, value)| value * value)
            .sum::<f32>()
            .sqrt()
    }
}

/// Encoded corpus: one row per input document, in input order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TfIdfMatrix {
    rows: Vec<SparseVector>,
    vocabulary: Vec<String>,
}

impl TfIdfMatrix {
    pub(crate) fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Number of columns, i.e. retained terms.
    pub(crate) fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TermStats {
    document_frequency: usize,
    total_count: usize,
}

/// TF-IDF encoder fit afresh for every call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TfIdfVectorizer {
    config: VectorizerConfig,
}

impl TfIdfVectorizer {
    pub(crate) const fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Learn the vocabulary of `documents` and encode each of them.
    pub(crate) fn fit_transform<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<TfIdfMatrix, VectorizeError> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|document| term_counts(document.as_ref()))
            .collect();
        let stats = corpus_stats(&counts);
        if stats.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }
        let vocabulary = self.prune(stats, counts.len())?;
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(column, (term, _))| (term.as_str(), column))
            .collect();
        let idf: Vec<f32> = vocabulary
            .iter()
            .map(|&(_, df)| smoothed_idf(counts.len(), df))
            .collect();
        let rows = counts
            .iter()
            .map(|document| encode_row(document, &index, &idf))
            .collect();
        Ok(TfIdfMatrix {
            rows,
            vocabulary: vocabulary.into_iter().map(|(term, _)| term).collect(),
        })
    }

    /// Apply the document-frequency bounds and the vocabulary cap.
    ///
    /// Returns `(term, document_frequency)` pairs in alphabetical order.
    fn prune(
        &self,
        stats: BTreeMap<String, TermStats>,
        document_count: usize,
    ) -> Result<Vec<(String, usize)>, VectorizeError> {
        let max_docs = max_document_count(self.config.max_df, document_count);
        let min_docs = self.config.min_df;
        if max_docs < min_docs {
            return Err(VectorizeError::ContradictoryBounds { max_docs, min_docs });
        }
        let mut kept: Vec<(String, TermStats)> = stats
            .into_iter()
            .filter(|(_, term)| {
                term.document_frequency >= min_docs && term.document_frequency <= max_docs
            })
            .collect();
        if kept.len() > self.config.max_features {
            kept.sort_by(|(left_term, left), (right_term, right)| {
                right
                    .total_count
                    .cmp(&left.total_count)
                    .then_with(|| left_term.cmp(right_term))
            });
            kept.truncate(self.config.max_features);
            kept.sort_by(|(left, _), (right, _)| left.cmp(right));
        }
        if kept.is_empty() {
            return Err(VectorizeError::NoTermsRemain);
        }
        Ok(kept
            .into_iter()
            .map(|(term, stats)| (term, stats.document_frequency))
            .collect())
    }
}

fn term_counts(document: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(document) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn corpus_stats(documents: &[HashMap<String, usize>]) -> BTreeMap<String, TermStats> {
    let mut stats: BTreeMap<String, TermStats> = BTreeMap::new();
    for document in documents {
        for (term, &count) in document {
            let entry = stats.entry(term.clone()).or_default();
            entry.document_frequency += 1;
            entry.total_count += count;
        }
    }
    stats
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "max_df is a share of the corpus; document frequencies are integers"
)]
fn max_document_count(max_df: f32, document_count: usize) -> usize {
    (f64::from(max_df) * document_count as f64).floor() as usize
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "idf is computed in f64 from document counts and stored as f32"
)]
fn smoothed_idf(document_count: usize, document_frequency: usize) -> f32 {
    let n = document_count as f64;
    let df = document_frequency as f64;
    (((1.0 + n) / (1.0 + df)).ln() + 1.0) as f32
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "tf-idf weight is the term count scaled by idf"
)]
fn encode_row(
    counts: &HashMap<String, usize>,
    index: &HashMap<&str, usize>,
    idf: &[f32],
) -> SparseVector {
    let entries = counts
        .iter()
        .filter_map(|(term, &count)| {
            let column = *index.get(term.as_str())?;
            let weight = idf.get(column)?;
            Some((column, count as f32 * weight))
        })
        .collect();
    SparseVector::normalised(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn vectorizer() -> TfIdfVectorizer {
        TfIdfVectorizer::new(VectorizerConfig::default())
    }

    #[rstest]
    fn stop_word_table_is_sorted() {
        assert!(ENGLISH_STOP_WORDS.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[rstest]
    #[case("amoungst", true)]
    #[case("bill", true)]
    #[case("cry", true)]
    #[case("couldnt", true)]
    #[case("rocket", false)]
    #[case("today", false)]
    fn stop_list_matches_scikit_english(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
        assert_eq!(is_stop_word(token), expected);
    }

    #[rstest]
    #[case("SpaceX launch rocket today", vec!["spacex", "launch", "rocket", "today"])]
    #[case("The rocket is a go", vec!["rocket"])]
    #[case("A b c 4x4 e_mail", vec!["4x4", "e_mail"])]
    #[case("Café opens; café closes", vec!["café", "opens", "café", "closes"])]
    fn tokenizes_like_word_runs(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokenize(text), expected);
    }

    #[rstest]
    fn prunes_rare_and_ubiquitous_terms(vectorizer: TfIdfVectorizer) {
        let docs = [
            "rocket launch news",
            "rocket engine news",
            "bakery opens news",
            "garden show news",
        ];
        let matrix = vectorizer.fit_transform(&docs).expect("corpus has shared terms");
        // "news" is in every document (> 85%), singletons fall below min_df.
        assert_eq!(matrix.vocabulary(), ["rocket"]);
        assert_eq!(matrix.rows().len(), 4);
        assert!(matrix.rows()[2].entries().is_empty());
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "compare unit norms")]
    fn rows_are_unit_length(vectorizer: TfIdfVectorizer) {
        let docs = [
            "rocket launch window",
            "rocket launch delayed",
            "bakery opens downtown",
            "bakery closes downtown",
            "garden show",
        ];
        let matrix = vectorizer.fit_transform(&docs).expect("valid corpus");
        for row in matrix.rows().iter().filter(|row| !row.entries().is_empty()) {
            assert!((row.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[rstest]
    fn caps_vocabulary_by_corpus_frequency() {
        let config = VectorizerConfig {
            max_features: 1,
            min_df: 1,
            max_df: 1.0,
        };
        let docs = ["alpha beta beta", "alpha beta", "gamma"];
        let matrix = TfIdfVectorizer::new(config)
            .fit_transform(&docs)
            .expect("valid corpus");
        assert_eq!(matrix.vocabulary(), ["beta"]);
        assert_eq!(matrix.dimension(), 1);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "compare idf values")]
    fn idf_is_smoothed() {
        let idf = smoothed_idf(3, 1);
        assert!((idf - (2.0_f32.ln() + 1.0)).abs() < 1e-6);
        assert!((smoothed_idf(4, 4) - 1.0).abs() < 1e-6);
    }

    #[rstest]
    fn stop_words_only_is_an_empty_vocabulary(vectorizer: TfIdfVectorizer) {
        let docs = ["the and of", "is it"];
        assert_eq!(
            vectorizer.fit_transform(&docs),
            Err(VectorizeError::EmptyVocabulary)
        );
    }

    #[rstest]
    fn single_document_cannot_satisfy_min_df(vectorizer: TfIdfVectorizer) {
        // max_df 0.85 of one document allows zero documents, below min_df 2.
        assert_eq!(
            vectorizer.fit_transform(&["rocket launch"]),
            Err(VectorizeError::ContradictoryBounds {
                max_docs: 0,
                min_docs: 2
            })
        );
    }

    #[rstest]
    fn disjoint_documents_leave_no_terms(vectorizer: TfIdfVectorizer) {
        let docs = ["rocket launch", "bakery opens", "garden show"];
        assert_eq!(
            vectorizer.fit_transform(&docs),
            Err(VectorizeError::NoTermsRemain)
        );
    }
}
