use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The literal doubles as the serde wire token.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Unit {
    Mg => "mg",
    Mcg => "mcg",
    G => "g",
    Ml => "mL",
    Tabs => "tabs",
    Caps => "caps",
});

str_enum!(Form {
    Tablet => "tablet",
    Capsule => "capsule",
    Liquid => "liquid",
    Injection => "injection",
    Other => "other",
});

str_enum!(Frequency {
    Qd => "qd",
    Bid => "bid",
    Tid => "tid",
    Qid => "qid",
    Qod => "qod",
    Prn => "prn",
});

str_enum!(Sex {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(Severity {
    Avoid => "Avoid",
    Caution => "Caution",
    None => "None",
});

impl Frequency {
    /// Human label shown in the frequency picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Qd => "QD — Once daily",
            Self::Bid => "BID — Twice daily",
            Self::Tid => "TID — Three times daily",
            Self::Qid => "QID — Four times daily",
            Self::Qod => "QOD — Every other day",
            Self::Prn => "PRN — As needed",
        }
    }
}

impl Severity {
    /// True for any severity that warrants a warning badge.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::Mg
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::Tablet
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Qd
    }
}
