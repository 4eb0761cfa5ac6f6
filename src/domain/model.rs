use crate::utils::error::{Result, SpiralError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A validated calendar date. Construct through [`CalendarDate::parse`] or
/// [`CalendarDate::from_ymd`]; struct-literal construction bypasses calendar
/// validation, which downstream derivations guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Parses a `YYYY-MM-DD` string, including leap-year handling.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            SpiralError::InvalidDateFormat {
                input: input.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(_) => Ok(Self { year, month, day }),
            None => Err(SpiralError::InvalidDateFormat {
                input: format!("{:04}-{:02}-{:02}", year, month, day),
                reason: "no such calendar date".to_string(),
            }),
        }
    }
}

/// The derived signal triple: `n = year × month`, `modulus = day`,
/// `arm = n mod modulus` (always in `[0, modulus)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalParameters {
    pub n: i64,
    pub modulus: i64,
    pub arm: i64,
}

/// Big Five scores, each clamped to [0, 100] and rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl TraitScores {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Openness", self.openness),
            ("Conscientiousness", self.conscientiousness),
            ("Extraversion", self.extraversion),
            ("Agreeableness", self.agreeableness),
            ("Neuroticism", self.neuroticism),
        ]
    }
}

/// One point of the phyllotactic spiral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub highlighted: bool,
    pub is_self: bool,
}

/// Comparison of two readings by their harmonic (arm) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResonanceResult {
    pub self_harmonic: i64,
    pub partner_harmonic: i64,
    pub difference: i64,
    pub score: i64,
}

/// Output of a pipeline's compute stage: the derived data plus its CSV and
/// JSON renderings, ready for the export stage.
#[derive(Debug, Clone)]
pub struct ReadingResult {
    pub params: Vec<SignalParameters>,
    pub traits: Option<TraitScores>,
    pub resonance: Option<ResonanceResult>,
    pub spiral: Vec<SpiralPoint>,
    pub spiral_csv: String,
    pub summary_json: String,
}
