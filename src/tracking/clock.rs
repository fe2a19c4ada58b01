//! Time and identifier sources, injectable so tests get exact output.

use chrono::{Local, NaiveDate};
use rand::RngExt;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub trait IdSource: Send {
    /// A new application reference such as `APP482913`.
    fn application_id(&mut self) -> String;
}

/// Random six-digit application ids.
pub struct RandomIds;

impl IdSource for RandomIds {
    fn application_id(&mut self) -> String {
        let mut rng = rand::rng();
        let num: u32 = rng.random_range(100_000..1_000_000);
        format!("APP{}", num)
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
pub struct FixedIds(pub &'static str);

#[cfg(test)]
impl IdSource for FixedIds {
    fn application_id(&mut self) -> String {
        self.0.to_string()
    }
}
