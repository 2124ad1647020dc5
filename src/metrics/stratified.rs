//! @ai:module:intent Accuracy and edit-distance scores split by case mode and label length
//! @ai:module:layer domain
//! @ai:module:public_api StratifiedAccuracyMetric, Stratum, CaseMode, Scope
//! @ai:module:stateless false

use crate::distance::{char_len, levenshtein, strip_spaces};
use crate::error::{Error, Result};
use crate::metrics::types::{
    MetricReport, RecognitionMetric, ACCURACY, EDIT_DISTANCE_SCORE, NORMALIZED_EDIT_SIMILARITY,
};
use crate::sample::{pair_up, Recognition};

pub const DEFAULT_MAIN_INDICATOR: &str = "acc_luc_full";
pub const DEFAULT_LONG_WORD_MIN_LEN: usize = 10;

/// @ai:intent Whether strings are compared as-is or lowercased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMode {
    Literal,
    Folded,
}

impl CaseMode {
    pub const ALL: [CaseMode; 2] = [CaseMode::Literal, CaseMode::Folded];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMode::Literal => "luc",
            CaseMode::Folded => "mc",
        }
    }

    /// @ai:intent Apply this case mode to a string
    /// @ai:effects pure
    fn apply(&self, text: &str) -> String {
        match self {
            CaseMode::Literal => text.to_string(),
            CaseMode::Folded => text.to_lowercase(),
        }
    }
}

/// @ai:intent Which samples a stratum covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Full,
    Long,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Full => "full",
            Scope::Long => "long",
        }
    }
}

/// @ai:intent One of the four case-mode by scope combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stratum {
    LucFull,
    LucLong,
    McFull,
    McLong,
}

impl Stratum {
    pub const ALL: [Stratum; 4] = [
        Stratum::LucFull,
        Stratum::LucLong,
        Stratum::McFull,
        Stratum::McLong,
    ];

    /// @ai:intent Build a stratum from its two components
    /// @ai:effects pure
    pub fn new(case: CaseMode, scope: Scope) -> Self {
        match (case, scope) {
            (CaseMode::Literal, Scope::Full) => Stratum::LucFull,
            (CaseMode::Literal, Scope::Long) => Stratum::LucLong,
            (CaseMode::Folded, Scope::Full) => Stratum::McFull,
            (CaseMode::Folded, Scope::Long) => Stratum::McLong,
        }
    }

    pub fn case_mode(&self) -> CaseMode {
        match self {
            Stratum::LucFull | Stratum::LucLong => CaseMode::Literal,
            Stratum::McFull | Stratum::McLong => CaseMode::Folded,
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Stratum::LucFull | Stratum::McFull => Scope::Full,
            Stratum::LucLong | Stratum::McLong => Scope::Long,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Stratum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.case_mode().as_str(), self.scope().as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StratumTotals {
    matches: u64,
    edit_sum: u64,
    norm_edit_sum: f64,
}

impl StratumTotals {
    fn add(&mut self, is_match: bool, edits: usize, norm_edit: f64) {
        self.matches += u64::from(is_match);
        self.edit_sum += edits as u64;
        self.norm_edit_sum += norm_edit;
    }

    fn merge(&mut self, other: &StratumTotals) {
        self.matches += other.matches;
        self.edit_sum += other.edit_sum;
        self.norm_edit_sum += other.norm_edit_sum;
    }
}

/// Per-stratum sums plus sample and character counts, full and long.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    strata: [StratumTotals; 4],
    samples: u64,
    chars: u64,
    long_samples: u64,
    long_chars: u64,
}

impl Tally {
    fn stratum(&self, stratum: Stratum) -> &StratumTotals {
        &self.strata[stratum.index()]
    }

    fn stratum_mut(&mut self, stratum: Stratum) -> &mut StratumTotals {
        &mut self.strata[stratum.index()]
    }

    fn sample_denom(&self, scope: Scope) -> f64 {
        let count = match scope {
            Scope::Full => self.samples,
            Scope::Long => self.long_samples,
        };
        count.max(1) as f64
    }

    fn char_denom(&self, scope: Scope) -> f64 {
        let count = match scope {
            Scope::Full => self.chars,
            Scope::Long => self.long_chars,
        };
        count.max(1) as f64
    }

    fn merge(&mut self, other: &Tally) {
        for (mine, theirs) in self.strata.iter_mut().zip(other.strata.iter()) {
            mine.merge(theirs);
        }
        self.samples += other.samples;
        self.chars += other.chars;
        self.long_samples += other.long_samples;
        self.long_chars += other.long_chars;
    }

    /// @ai:intent Derive the twelve stratum scores
    /// @ai:effects pure
    fn to_report(&self) -> MetricReport {
        let mut report = MetricReport::new();

        for stratum in Stratum::ALL {
            let totals = self.stratum(stratum);
            let denom = self.sample_denom(stratum.scope());
            let char_denom = self.char_denom(stratum.scope());

            report.insert(
                format!("{ACCURACY}_{stratum}"),
                totals.matches as f64 / denom,
            );
            report.insert(
                format!("{NORMALIZED_EDIT_SIMILARITY}_{stratum}"),
                1.0 - totals.norm_edit_sum / denom,
            );
            report.insert(
                format!("{EDIT_DISTANCE_SCORE}_{stratum}"),
                1.0 - totals.edit_sum as f64 / char_denom,
            );
        }

        report
    }
}

/// @ai:intent Running scores stratified by case mode and label length
#[derive(Debug, Clone)]
pub struct StratifiedAccuracyMetric {
    main_indicator: String,
    long_word_min_len: usize,
    totals: Tally,
}

impl StratifiedAccuracyMetric {
    /// @ai:intent Create a metric with default indicator and long-sample threshold
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_options(DEFAULT_MAIN_INDICATOR, DEFAULT_LONG_WORD_MIN_LEN)
    }

    /// @ai:intent Create a metric with explicit indicator and long-sample threshold
    /// @ai:effects pure
    pub fn with_options(main_indicator: impl Into<String>, long_word_min_len: usize) -> Self {
        Self {
            main_indicator: main_indicator.into(),
            long_word_min_len,
            totals: Tally::default(),
        }
    }

    pub fn long_word_min_len(&self) -> usize {
        self.long_word_min_len
    }

    /// @ai:intent Samples accumulated since the last reset, as (all, long)
    /// @ai:effects pure
    pub fn sample_counts(&self) -> (u64, u64) {
        (self.totals.samples, self.totals.long_samples)
    }

    /// @ai:intent Score a batch into a fresh tally
    /// @ai:pre every stripped label is non-empty
    /// @ai:effects pure
    fn score_batch(&self, predictions: &[Recognition], labels: &[Recognition]) -> Result<Tally> {
        let mut batch = Tally::default();

        for (index, (pred, label)) in pair_up(predictions, labels).enumerate() {
            let pred = strip_spaces(pred);
            let label = strip_spaces(label);
            let label_len = char_len(&label);

            if label_len == 0 {
                return Err(Error::EmptyLabel { index });
            }

            let is_long = label_len >= self.long_word_min_len;
            // Character totals count the folded label, which may be longer.
            let folded_len = char_len(&CaseMode::Folded.apply(&label)) as u64;

            for case in CaseMode::ALL {
                let pred = case.apply(&pred);
                let label = case.apply(&label);
                let edits = levenshtein(&pred, &label);
                let norm_edit = edits as f64 / char_len(&label) as f64;
                let is_match = pred == label;

                batch
                    .stratum_mut(Stratum::new(case, Scope::Full))
                    .add(is_match, edits, norm_edit);
                if is_long {
                    batch
                        .stratum_mut(Stratum::new(case, Scope::Long))
                        .add(is_match, edits, norm_edit);
                }
            }

            batch.samples += 1;
            batch.chars += folded_len;
            if is_long {
                batch.long_samples += 1;
                batch.long_chars += folded_len;
            }
        }

        Ok(batch)
    }
}

impl Default for StratifiedAccuracyMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionMetric for StratifiedAccuracyMetric {
    fn name(&self) -> &'static str {
        "RecFullMetric"
    }

    fn main_indicator(&self) -> &str {
        &self.main_indicator
    }

    /// @ai:intent Score one batch per stratum, fold it into the totals, return the batch scores
    /// @ai:effects mutates self
    fn update(&mut self, predictions: &[Recognition], labels: &[Recognition]) -> Result<MetricReport> {
        let batch = self.score_batch(predictions, labels)?;
        self.totals.merge(&batch);

        tracing::debug!(
            samples = batch.samples,
            long_samples = batch.long_samples,
            total_samples = self.totals.samples,
            "Scored stratified batch"
        );

        Ok(batch.to_report())
    }

    /// @ai:intent Report per-stratum scores since the last reset, then reset
    /// @ai:effects mutates self
    fn report(&mut self) -> Result<MetricReport> {
        let report = self.totals.to_report();
        self.reset();
        Ok(report)
    }

    fn reset(&mut self) {
        self.totals = Tally::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recs(items: &[&str]) -> Vec<Recognition> {
        items.iter().map(|t| Recognition::new(*t, 1.0)).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_stratum_table_layout() {
        for (i, stratum) in Stratum::ALL.iter().enumerate() {
            assert_eq!(stratum.index(), i);
            assert_eq!(Stratum::new(stratum.case_mode(), stratum.scope()), *stratum);
        }
        assert_eq!(Stratum::McLong.to_string(), "mc_long");
        assert_eq!(Stratum::LucFull.to_string(), "luc_full");
        assert_eq!(Stratum::new(CaseMode::Folded, Scope::Full).to_string(), "mc_full");
    }

    #[test]
    fn test_report_has_twelve_keys() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric.update(&recs(&["abc"]), &recs(&["abc"])).unwrap();
        assert_eq!(batch.len(), 12);

        let keys: Vec<&str> = batch.iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"accuracy_luc_full"));
        assert!(keys.contains(&"normalized_edit_similarity_mc_long"));
        assert!(keys.contains(&"edit_distance_score_luc_long"));
    }

    #[test]
    fn test_case_folding_scenario() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric.update(&recs(&["cat"]), &recs(&["Cat"])).unwrap();

        assert!(approx(batch.get("accuracy_luc_full").unwrap(), 0.0));
        assert!(approx(batch.get("accuracy_mc_full").unwrap(), 1.0));
        assert!(approx(batch.get("accuracy_luc_long").unwrap(), 0.0));
        assert!(approx(batch.get("accuracy_mc_long").unwrap(), 0.0));
        assert!(approx(batch.get("edit_distance_score_luc_full").unwrap(), 1.0 - 1.0 / 3.0));
        assert!(approx(batch.get("edit_distance_score_luc_long").unwrap(), 1.0));
        assert_eq!(metric.sample_counts(), (1, 0));
    }

    #[test]
    fn test_long_samples_also_count_as_full() {
        let mut metric = StratifiedAccuracyMetric::with_options("acc_luc_long", 5);
        metric
            .update(
                &recs(&["Recognition", "ab", "hello world"]),
                &recs(&["recognition", "ab", "helloworld"]),
            )
            .unwrap();
        assert_eq!(metric.sample_counts(), (3, 2));

        let report = metric.report().unwrap();
        assert!(approx(report.get("accuracy_luc_full").unwrap(), 2.0 / 3.0));
        assert!(approx(report.get("accuracy_luc_long").unwrap(), 0.5));
        assert!(approx(report.get("accuracy_mc_full").unwrap(), 1.0));
        assert!(approx(report.get("accuracy_mc_long").unwrap(), 1.0));
        // 1 edit over 11 + 10 long label characters.
        assert!(approx(
            report.get("edit_distance_score_luc_long").unwrap(),
            1.0 - 1.0 / 21.0
        ));
        assert!(approx(
            report.get("edit_distance_score_luc_full").unwrap(),
            1.0 - 1.0 / 23.0
        ));
        assert!(approx(report.main_value("acc_luc_long").unwrap(), 0.5));
    }

    #[test]
    fn test_label_at_threshold_is_long() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric.update(&recs(&["abcdefghiX"]), &recs(&["abcdefghij"])).unwrap();

        assert_eq!(metric.sample_counts(), (1, 1));
        assert!(approx(batch.get("accuracy_luc_long").unwrap(), 0.0));
        assert!(approx(batch.get("normalized_edit_similarity_luc_long").unwrap(), 0.9));
        assert!(approx(batch.get("edit_distance_score_mc_long").unwrap(), 0.9));

        let mut metric = StratifiedAccuracyMetric::new();
        metric.update(&recs(&["abcdefghi"]), &recs(&["abcdefghi"])).unwrap();
        assert_eq!(metric.sample_counts(), (1, 0));
    }

    #[test]
    fn test_char_totals_use_folded_label_length() {
        // "İ" lowercases to two characters.
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric.update(&recs(&["xab"]), &recs(&["İab"])).unwrap();

        assert!(approx(batch.get("edit_distance_score_luc_full").unwrap(), 0.75));
        assert!(approx(batch.get("edit_distance_score_mc_full").unwrap(), 0.5));
        assert_eq!(metric.sample_counts(), (1, 0));
    }

    #[test]
    fn test_split_batches_match_single_batch() {
        let preds = recs(&["Recognition", "ab", "internationa1", "DOG", "x"]);
        let labels = recs(&["recognition", "ab", "international", "cog", "y"]);

        let mut whole = StratifiedAccuracyMetric::with_options("acc_luc_full", 5);
        whole.update(&preds, &labels).unwrap();
        let whole = whole.report().unwrap();

        let mut split = StratifiedAccuracyMetric::with_options("acc_luc_full", 5);
        split.update(&preds[..2], &labels[..2]).unwrap();
        split.update(&preds[2..], &labels[2..]).unwrap();
        let split = split.report().unwrap();

        assert_eq!(whole.len(), split.len());
        for (key, value) in whole.iter() {
            assert!(approx(value, split.get(key).unwrap()), "{key} differs");
        }
        // 1 + 0 + 1 + 3 + 1 literal edits over 11 + 2 + 13 + 3 + 1 characters.
        assert!(approx(
            whole.get("edit_distance_score_luc_full").unwrap(),
            1.0 - 6.0 / 30.0
        ));
    }

    #[test]
    fn test_folded_accuracy_never_below_literal() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric
            .update(&recs(&["ABC", "xyz", "Foo"]), &recs(&["abc", "xyz", "bar"]))
            .unwrap();
        assert!(batch.get("accuracy_mc_full").unwrap() >= batch.get("accuracy_luc_full").unwrap());
    }

    #[test]
    fn test_empty_label_is_rejected_before_merge() {
        let mut metric = StratifiedAccuracyMetric::new();
        metric.update(&recs(&["a"]), &recs(&["a"])).unwrap();

        let err = metric.update(&recs(&["a", "b"]), &recs(&["a", "  "])).unwrap_err();
        assert!(matches!(err, Error::EmptyLabel { index: 1 }));
        assert_eq!(metric.sample_counts(), (1, 0));
    }

    #[test]
    fn test_empty_batch_uses_floored_denominators() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric.update(&[], &[]).unwrap();
        assert!(approx(batch.get("accuracy_luc_full").unwrap(), 0.0));
        assert!(approx(batch.get("edit_distance_score_mc_long").unwrap(), 1.0));
    }

    #[test]
    fn test_report_resets_and_matches_batch_for_single_batch() {
        let mut metric = StratifiedAccuracyMetric::new();
        let batch = metric
            .update(&recs(&["international", "dog"]), &recs(&["internationa1", "cog"]))
            .unwrap();
        let report = metric.report().unwrap();
        assert_eq!(batch, report);
        assert_eq!(metric.sample_counts(), (0, 0));
    }
}
