use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// One of the two fixed daily work windows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Shift {
    #[strum(serialize = "1")]
    One = 1,
    #[strum(serialize = "2")]
    Two = 2,
}

impl Shift {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Shift::One),
            2 => Some(Shift::Two),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Nominal time window, display only. The backend decides what a
    /// valid clock-in time actually is.
    pub fn window(self) -> &'static str {
        match self {
            Shift::One => "08:00–12:00",
            Shift::Two => "13:00–16:45",
        }
    }
}

impl TryFrom<u8> for Shift {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Shift::from_id(id).ok_or_else(|| format!("invalid shift: {}", id))
    }
}

impl From<Shift> for u8 {
    fn from(shift: Shift) -> u8 {
        shift.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_accepts_only_known_shifts() {
        assert_eq!(Shift::from_id(1), Some(Shift::One));
        assert_eq!(Shift::from_id(2), Some(Shift::Two));
        assert_eq!(Shift::from_id(0), None);
        assert_eq!(Shift::from_id(3), None);
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Shift::Two).unwrap(), "2");
        let parsed: Shift = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Shift::One);
        assert!(serde_json::from_str::<Shift>("7").is_err());
    }

    #[test]
    fn displays_its_number() {
        assert_eq!(Shift::One.to_string(), "1");
        assert_eq!(Shift::Two.to_string(), "2");
    }
}
