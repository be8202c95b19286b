use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            other => Err(CoreError::UnknownLabel("direction", other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Forex,
    Commodity,
    Index,
}

impl FromStr for AssetClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forex" => Ok(AssetClass::Forex),
            "commodity" => Ok(AssetClass::Commodity),
            "index" => Ok(AssetClass::Index),
            other => Err(CoreError::UnknownLabel("asset class", other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

impl FromStr for TradeStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "closed" => Ok(TradeStatus::Closed),
            other => Err(CoreError::UnknownLabel("trade status", other.to_string())),
        }
    }
}

/// A named trading-hours window used to bucket performance by time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    London,
    NewYork,
    Tokyo,
    Sydney,
}

impl Session {
    /// The fixed universe of sessions, in presentation order. Session
    /// breakdowns must always cover all four, even with zero trades.
    pub const ALL: [Session; 4] = [
        Session::London,
        Session::NewYork,
        Session::Tokyo,
        Session::Sydney,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Session::London => "London",
            Session::NewYork => "New York",
            Session::Tokyo => "Tokyo",
            Session::Sydney => "Sydney",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Session {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "london" => Ok(Session::London),
            "new york" | "newyork" | "new_york" => Ok(Session::NewYork),
            "tokyo" => Ok(Session::Tokyo),
            "sydney" => Ok(Session::Sydney),
            other => Err(CoreError::UnknownLabel("session", other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_labels_round_trip() {
        for session in Session::ALL {
            assert_eq!(session.label().parse::<Session>().unwrap(), session);
        }
    }

    #[test]
    fn session_parsing_is_case_insensitive() {
        assert_eq!("NEW YORK".parse::<Session>().unwrap(), Session::NewYork);
        assert_eq!("new_york".parse::<Session>().unwrap(), Session::NewYork);
        assert!("frankfurt".parse::<Session>().is_err());
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Buy.opposite(), Direction::Sell);
        assert_eq!(Direction::Sell.opposite(), Direction::Buy);
    }
}
