//! # Metric extraction
//!
//! Turns a Prometheus text exposition document into metric families and reads
//! single values out of them. Every lookup is total: a missing family yields a
//! zero value or an empty string, never an error, because optional client
//! telemetry is routinely absent.

mod rules;

pub use rules::*;

use eyre::{
    eyre,
    Context as _,
    Result,
};
use prometheus_parse::{
    Scrape,
    Value,
};
use std::collections::HashMap;

/// Value of a single sample. Histograms and summaries carry no single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Gauge(f64),
    Counter(f64),
    Untyped(f64),
    Unsupported,
}

impl SampleValue {
    /// The populated value, or NaN if the sample has none.
    pub fn value(&self) -> f64 {
        match self {
            SampleValue::Gauge(v) | SampleValue::Counter(v) | SampleValue::Untyped(v) => *v,
            SampleValue::Unsupported => f64::NAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub value: SampleValue,
    /// Label pairs sorted by name.
    pub labels: Vec<(String, String)>,
}

impl MetricSample {
    pub fn new(value: SampleValue, labels: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut labels: Vec<_> = labels.into_iter().collect();
        labels.sort();
        Self { value, labels }
    }

    pub fn value(&self) -> f64 {
        self.value.value()
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Samples grouped by metric family name, in document order within a family.
#[derive(Debug, Clone, Default)]
pub struct MetricFamilies {
    families: HashMap<String, Vec<MetricSample>>,
}

impl MetricFamilies {
    /// Parses a text exposition document.
    ///
    /// Every line that is neither blank nor a comment must be a well formed
    /// sample, otherwise the whole document is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            check_sample_line(line).map_err(|reason| eyre!("Invalid metrics line {}: {reason}", idx + 1))?;
        }

        let scrape = Scrape::parse(text.lines().map(|line| Ok(line.to_owned())))
            .wrap_err("Failed to parse metrics exposition")?;

        Ok(scrape
            .samples
            .into_iter()
            .map(|sample| {
                let value = match sample.value {
                    Value::Gauge(v) => SampleValue::Gauge(v),
                    Value::Counter(v) => SampleValue::Counter(v),
                    Value::Untyped(v) => SampleValue::Untyped(v),
                    Value::Histogram(_) | Value::Summary(_) => SampleValue::Unsupported,
                };
                let labels = sample.labels.iter().map(|(k, v)| (k.clone(), v.clone()));
                (sample.metric, MetricSample::new(value, labels))
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// All samples of a family; empty if the family is absent.
    pub fn family(&self, name: &str) -> &[MetricSample] {
        self.families.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Value of the first sample of a family, or 0 if there is none.
    pub fn scalar_of(&self, family: &str) -> f64 {
        self.family(family).first().map(MetricSample::value).unwrap_or(0.0)
    }

    /// Value of `label` on the first sample of a family, or an empty string.
    pub fn first_label_value(&self, family: &str, label: &str) -> String {
        self.family(family)
            .first()
            .and_then(|sample| sample.label(label))
            .unwrap_or_default()
            .to_string()
    }

    /// Sum over all samples of a family, e.g. per-topic counters.
    pub fn sum_across_samples(&self, family: &str) -> f64 {
        self.family(family).iter().map(MetricSample::value).sum()
    }

    /// Value of the first sample whose `label` equals `value`, or 0.
    pub fn value_where_label(&self, family: &str, label: &str, value: &str) -> f64 {
        self.family(family)
            .iter()
            .find(|sample| sample.label(label) == Some(value))
            .map(MetricSample::value)
            .unwrap_or(0.0)
    }

    pub fn count_all(&self, family: &str) -> u64 {
        self.family(family).len() as u64
    }

    pub fn count_matching_label(&self, family: &str, label: &str, value: &str) -> u64 {
        self.family(family)
            .iter()
            .filter(|sample| sample.label(label) == Some(value))
            .count() as u64
    }

    pub fn count_matching_value(&self, family: &str, value: f64) -> u64 {
        self.family(family)
            .iter()
            .filter(|sample| sample.value() == value)
            .count() as u64
    }
}

impl FromIterator<(String, MetricSample)> for MetricFamilies {
    fn from_iter<T: IntoIterator<Item = (String, MetricSample)>>(iter: T) -> Self {
        let mut families: HashMap<String, Vec<MetricSample>> = HashMap::new();
        for (name, sample) in iter {
            families.entry(name).or_default().push(sample);
        }
        Self { families }
    }
}

/// Checks `name{label="value",...} value [timestamp]`.
fn check_sample_line(line: &str) -> std::result::Result<(), String> {
    let name_len = line
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_alphabetic() || c == '_' || c == ':' || (i > 0 && c.is_ascii_digit())))
        .map_or(line.len(), |(i, _)| i);
    if name_len == 0 {
        return Err("expected a metric name".to_string());
    }

    let mut rest = &line[name_len..];
    if let Some(labels) = rest.strip_prefix('{') {
        rest = skip_labels(labels)?;
    }

    let mut fields = rest.split_whitespace();
    let value = fields.next().ok_or("missing sample value")?;
    value
        .parse::<f64>()
        .map_err(|_| format!("invalid sample value '{value}'"))?;
    if let Some(timestamp) = fields.next() {
        timestamp
            .parse::<i64>()
            .map_err(|_| format!("invalid timestamp '{timestamp}'"))?;
    }
    if fields.next().is_some() {
        return Err("unexpected trailing data".to_string());
    }
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Err("expected whitespace before the sample value".to_string());
    }
    Ok(())
}

/// Consumes `name="value",...}` and returns what follows the closing brace.
fn skip_labels(mut rest: &str) -> std::result::Result<&str, String> {
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('}') {
            return Ok(after);
        }

        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .ok_or("unterminated label set")?;
        if name_len == 0 {
            return Err("expected a label name".to_string());
        }
        rest = rest[name_len..]
            .trim_start()
            .strip_prefix('=')
            .ok_or("expected '=' after label name")?
            .trim_start()
            .strip_prefix('"')
            .ok_or("expected a quoted label value")?;

        let mut escaped = false;
        let close = rest
            .char_indices()
            .find(|&(_, c)| {
                let is_close = c == '"' && !escaped;
                escaped = c == '\\' && !escaped;
                is_close
            })
            .map(|(i, _)| i)
            .ok_or("unterminated label value")?;
        rest = rest[close + 1..].trim_start();

        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else if !rest.starts_with('}') {
            return Err("expected ',' or '}' after label value".to_string());
        }
    }
}

/// Converts an extracted float to an unsigned counter. NaN and negative values
/// become 0, values beyond the range saturate.
pub fn as_u64(value: f64) -> u64 {
    value as u64
}
