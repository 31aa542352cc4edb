use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One poll's worth of raw quotes, keyed by symbol. Values stay as raw JSON
/// until an aggregation policy decodes them, so one bad entry cannot spoil
/// the rest of the batch.
pub type QuoteBatch = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// OHLC records bucketed per minute, merged by timestamp.
    #[default]
    Candle,
    /// Bare prices stamped with the time they were received.
    Scalar,
}

/// Candle-mode quote as served by the quote endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CandleQuote {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Candle series element. `y` is `[open, high, low, close]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub x: i64,
    pub y: [f64; 4],
}

impl Candle {
    pub fn open(&self) -> f64 {
        self.y[0]
    }

    pub fn high(&self) -> f64 {
        self.y[1]
    }

    pub fn low(&self) -> f64 {
        self.y[2]
    }

    pub fn close(&self) -> f64 {
        self.y[3]
    }
}

impl From<CandleQuote> for Candle {
    fn from(quote: CandleQuote) -> Self {
        Candle {
            x: quote.timestamp,
            y: [quote.open, quote.high, quote.low, quote.close],
        }
    }
}

/// Scalar series element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalarPoint {
    pub time: i64,
    pub value: f64,
}

/// Per-symbol series for a fixed set of instruments.
///
/// The symbol set is decided when the set is created; `with_series` only
/// replaces series of symbols that already exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet<P> {
    series: BTreeMap<String, Vec<P>>,
}

impl<P> SeriesSet<P> {
    pub fn empty<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SeriesSet {
            series: symbols.into_iter().map(|s| (s.into(), Vec::new())).collect(),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&[P]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[P])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Replaces the series of a tracked symbol. Untracked symbols are ignored
    /// and `false` is returned.
    pub fn with_series(&mut self, symbol: &str, data: Vec<P>) -> bool {
        match self.series.get_mut(symbol) {
            Some(slot) => {
                *slot = data;
                true
            }
            None => false,
        }
    }
}
