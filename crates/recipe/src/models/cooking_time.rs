use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;

/// A positive cooking time in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookingTime(u32);
impl CookingTime {
    pub fn new(minutes: i64) -> Result<Self> {
        if minutes < 1 {
            exn::bail!(ErrorKind::NonPositiveCookingTime(minutes));
        }
        let minutes = u32::try_from(minutes).or_raise(|| ErrorKind::CookingTimeOutOfRange(minutes))?;
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}
impl TryFrom<i64> for CookingTime {
    type Error = Error;
    fn try_from(minutes: i64) -> std::result::Result<Self, Self::Error> {
        Self::new(minutes)
    }
}
impl From<CookingTime> for i64 {
    fn from(time: CookingTime) -> Self {
        i64::from(time.0)
    }
}
impl FromStr for CookingTime {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let minutes = s.trim().parse::<i64>().or_raise(|| ErrorKind::ParseError {
            field: "cooking time",
            value: s.to_string(),
        })?;
        Self::new(minutes)
    }
}
impl Display for CookingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} min", self.0)
    }
}
