//! The three flows built on the shared controller.
//!
//! Each flow module supplies a typed record, its patch type and a step
//! table. The controller algorithm is identical for all of them; only the
//! tables differ.
//!
//! | Flow         | Steps | Irregularities                              |
//! |--------------|-------|---------------------------------------------|
//! | `hotel`      | 1..13 | room sub-chain 5..9 loops on `addAnother`   |
//! | `package`    | 1..8  | optional exclusions with a defaults shortcut|
//! | `onboarding` | 0..8  | chrome hidden on overview and success       |

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

pub mod hotel;
pub mod onboarding;
pub mod package;

pub use hotel::{HotelListing, HotelPatch};
pub use onboarding::{HostPatch, HostProfile};
pub use package::{PackageListing, PackagePatch};

/// Names the flows this crate ships.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Hotel,
    Package,
    Onboarding,
}

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [FlowKind::Hotel, FlowKind::Package, FlowKind::Onboarding];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Hotel => hotel::FLOW_NAME,
            FlowKind::Package => package::FLOW_NAME,
            FlowKind::Onboarding => onboarding::FLOW_NAME,
        }
    }

    /// One-line description for listings.
    pub fn summary(&self) -> &'static str {
        match self {
            FlowKind::Hotel => "List a property with one or more room types",
            FlowKind::Package => "Create a promotional package for a listed hotel",
            FlowKind::Onboarding => "Set up a host account",
        }
    }
}

impl FromStr for FlowKind {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hotel" => Ok(FlowKind::Hotel),
            "package" => Ok(FlowKind::Package),
            "onboarding" | "host" => Ok(FlowKind::Onboarding),
            _ => Err(WizardError::UnknownFlow {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for kind in FlowKind::ALL {
            assert_eq!(kind.to_string().parse::<FlowKind>().unwrap(), kind);
        }
        assert_eq!("Host".parse::<FlowKind>().unwrap(), FlowKind::Onboarding);
        assert!(matches!(
            "checkout".parse::<FlowKind>(),
            Err(WizardError::UnknownFlow { .. })
        ));
    }

    #[test]
    fn test_all_tables_build() {
        assert!(hotel::table().is_ok());
        assert!(package::table().is_ok());
        assert!(onboarding::table().is_ok());
    }
}
