use serde::{Deserialize, Serialize};

/// Which of the two overlapping bracket schedules applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Federal,
    Provincial,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::Provincial => "provincial",
        }
    }

    /// Parses a case-insensitive jurisdiction name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "federal" => Some(Self::Federal),
            "provincial" => Some(Self::Provincial),
            _ => None,
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_as_str() {
        for jurisdiction in [Jurisdiction::Federal, Jurisdiction::Provincial] {
            assert_eq!(Jurisdiction::parse(jurisdiction.as_str()), Some(jurisdiction));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(Jurisdiction::parse(" Provincial "), Some(Jurisdiction::Provincial));
    }

    #[test]
    fn parse_rejects_unknown_name() {
        assert_eq!(Jurisdiction::parse("municipal"), None);
    }
}
