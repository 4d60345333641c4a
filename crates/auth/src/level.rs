use serde::Deserialize;
use serde::Serialize;

/// Self-declared playing strength shown on member profiles.
/// Purely cosmetic: pairing never consults it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Novice,
    Amateur,
    Professional,
    Expert,
    Master,
}

impl std::str::FromStr for SkillLevel {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novice" => Ok(Self::Novice),
            "amateur" => Ok(Self::Amateur),
            "professional" => Ok(Self::Professional),
            "expert" => Ok(Self::Expert),
            "master" => Ok(Self::Master),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Novice => write!(f, "novice"),
            Self::Amateur => write!(f, "amateur"),
            Self::Professional => write!(f, "professional"),
            Self::Expert => write!(f, "expert"),
            Self::Master => write!(f, "master"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_level() {
        for name in ["novice", "amateur", "professional", "expert", "master"] {
            let level: SkillLevel = name.parse().unwrap();
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn rejects_unknown_level() {
        assert!("grandmaster".parse::<SkillLevel>().is_err());
    }
}
