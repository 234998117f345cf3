use std::fmt;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod error;
pub mod finder;

pub use error::{FinderError, FinderResult};
use finder::Total;

/// Range bound used when none is configured.
pub const DEFAULT_BOUND: u64 = 100;

/// Output writer for the report (writes to memory buffer)
pub struct Writer(Vec<u8>);

impl Writer {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn println<T: fmt::Display>(&mut self, value: T) {
        writeln!(self.0, "{}", value).expect("Failed write");
    }

    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.0)
    }

    /// Flushes everything buffered so far to `out`.
    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        out.write_all(&self.0)?;
        out.flush()
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bound: u64,
    /// Fixed RNG seed. A clock derived seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bound: DEFAULT_BOUND,
            seed: None,
        }
    }
}

impl Config {
    pub fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(clock_seed);
        debug!("seeding rng with {}", seed);
        StdRng::seed_from_u64(seed)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// What the subtraction produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Computed {
    Missing(Total),
    /// The sequence summed past the expected total by this much.
    Overshoot(Total),
}

impl fmt::Display for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Computed::Missing(value) => f.pad(&value.to_string()),
            Computed::Overshoot(excess) => f.pad(&format!("-{}", excess)),
        }
    }
}

/// One pass of choose, generate, sum and compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub bound: u64,
    pub actual_missing: u64,
    pub expected_total: Total,
    pub actual_total: Total,
    pub computed_missing: Computed,
}

impl Trial {
    pub fn run<R: Rng + ?Sized>(bound: u64, rng: &mut R) -> FinderResult<Trial> {
        let missing = finder::choose_missing(bound, rng)?;
        Trial::with_missing(bound, missing)
    }

    pub fn with_missing(bound: u64, missing: u64) -> FinderResult<Trial> {
        let sequence = finder::generate_sequence(bound, missing)?;
        let actual_total = finder::sum_sequence(&sequence);
        Ok(Trial::from_parts(bound, missing, actual_total))
    }

    /// Builds a trial around a sum computed elsewhere.
    pub fn from_parts(bound: u64, actual_missing: u64, actual_total: Total) -> Trial {
        let expected_total = finder::expected_sum(bound);
        let computed_missing = match finder::recover_missing(expected_total, actual_total) {
            Ok(missing) => Computed::Missing(missing),
            Err(err) => {
                warn!("{}", err);
                Computed::Overshoot(actual_total - expected_total)
            }
        };
        debug!(
            "bound={} expected={} actual={} computed={}",
            bound, expected_total, actual_total, computed_missing
        );

        Trial {
            bound,
            actual_missing,
            expected_total,
            actual_total,
            computed_missing,
        }
    }

    pub fn passed(&self) -> bool {
        match self.computed_missing {
            Computed::Missing(computed) => finder::verify(self.actual_missing, computed),
            Computed::Overshoot(_) => false,
        }
    }

    pub fn report(&self, out: &mut Writer) {
        out.println(format_args!("  actual missing = {:>3}", self.actual_missing));
        out.println(format_args!("computed missing = {:>3}", self.computed_missing));
        out.println(if self.passed() { "yay!" } else { "bummer!" });
    }
}

/// Runs a single trial for `config` and writes its report.
pub fn run(config: &Config, out: &mut Writer) -> FinderResult<Trial> {
    let mut rng = config.rng();
    let trial = Trial::run(config.bound, &mut rng)?;
    info!(
        "missing {} of [1, {}]: {}",
        trial.actual_missing,
        trial.bound,
        if trial.passed() { "recovered" } else { "mismatch" }
    );
    trial.report(out);
    Ok(trial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn report_of(trial: &Trial) -> String {
        let mut out = Writer::new();
        trial.report(&mut out);
        out.into_string().unwrap()
    }

    // drops the last element, as a loop running to size - 1 would
    fn off_by_one_sum(sequence: &[u64]) -> Total {
        finder::sum_sequence(&sequence[..sequence.len().saturating_sub(1)])
    }

    #[test]
    fn test_report_pass() {
        let trial = Trial::with_missing(5, 3).unwrap();
        assert!(trial.passed());
        assert_eq!(
            "  actual missing =   3\ncomputed missing =   3\nyay!\n",
            report_of(&trial)
        );
    }

    #[test]
    fn test_report_corrupted_sum() {
        let sequence = finder::generate_sequence(100, 42).unwrap();
        let trial = Trial::from_parts(100, 42, off_by_one_sum(&sequence));
        assert!(!trial.passed());
        assert_eq!(Computed::Missing(142), trial.computed_missing);
        assert_eq!(
            "  actual missing =  42\ncomputed missing = 142\nbummer!\n",
            report_of(&trial)
        );
    }

    #[test]
    fn test_report_overshoot() {
        let trial = Trial::from_parts(5, 3, 16);
        assert!(!trial.passed());
        assert_eq!(Computed::Overshoot(1), trial.computed_missing);
        assert!(report_of(&trial).ends_with("computed missing =  -1\nbummer!\n"));
    }

    #[test]
    fn test_report_wide_values() {
        let trial = Trial::with_missing(2000, 1500).unwrap();
        assert_eq!(
            "  actual missing = 1500\ncomputed missing = 1500\nyay!\n",
            report_of(&trial)
        );
    }

    #[test]
    fn test_run_seeded() {
        let config = Config {
            bound: DEFAULT_BOUND,
            seed: Some(7),
        };
        let mut first = Writer::new();
        let mut second = Writer::new();
        let a = run(&config, &mut first).unwrap();
        let b = run(&config, &mut second).unwrap();

        assert_eq!(a, b);
        assert!(a.passed());
        assert!((1..=DEFAULT_BOUND).contains(&a.actual_missing));

        let output = first.into_string().unwrap();
        assert_eq!(output, second.into_string().unwrap());
        assert_eq!(3, output.lines().count());
        assert_eq!(Some("yay!"), output.lines().last());
    }

    #[test]
    fn test_run_rejects_empty_range() {
        let config = Config {
            bound: 0,
            seed: Some(1),
        };
        let mut out = Writer::new();
        assert_eq!(Err(FinderError::EmptyRange), run(&config, &mut out));
        assert_eq!("", out.into_string().unwrap());
    }

    #[test]
    fn test_write_to() {
        let mut out = Writer::new();
        out.println("yay!");
        let mut sink = Vec::new();
        out.write_to(&mut sink).unwrap();
        assert_eq!(b"yay!\n".to_vec(), sink);
    }

    proptest! {
        #[test]
        fn prop_seeded_trials_pass(bound in 1u64..500, seed in any::<u64>()) {
            let trial = Trial::run(bound, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert!(trial.passed());
            prop_assert_eq!(trial.actual_total + Total::from(trial.actual_missing), trial.expected_total);
        }
    }
}
