//! Keyword enumerations for engine configuration fields
//!
//! Every enum is matched case-insensitively against a fixed keyword set. Values
//! outside the set are kept as `Unrecognized(keyword)` so the caller decides
//! whether to reject them (see [`EnumPolicy`](super::EnumPolicy)).

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $canonical:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Keyword outside the known set, lower-cased
            Unrecognized(String),
        }

        impl $name {
            /// Canonical keywords of every known variant, in declaration order
            pub fn keywords() -> &'static [&'static str] {
                &[$($canonical),+]
            }

            /// Parse a keyword, trimming and lower-casing it first
            pub fn parse_keyword(raw: &str) -> Self {
                let key = raw.trim().to_lowercase();
                match key.as_str() {
                    $( $canonical $(| $alias)* => $name::$variant, )+
                    _ => $name::Unrecognized(key),
                }
            }

            /// Canonical lower-case keyword
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $canonical, )+
                    $name::Unrecognized(raw) => raw.as_str(),
                }
            }

            /// False for `Unrecognized` values
            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::parse_keyword(&raw)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::parse_keyword(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Aspiration of the engine
    pub enum EngineType {
        /// Naturally aspirated
        Na => "na",
        /// Turbocharged
        Turbo => "turbo",
        /// Mechanically driven supercharger
        Supercharger => "supercharger",
        /// Two turbochargers
        TwinTurbo => "twin-turbo",
        /// Turbocharger and supercharger combined
        Twincharged => "twincharged",
    }
}

keyword_enum! {
    /// Forced induction hardware
    ///
    /// `TwinTurbo` and `Twincharged` are not hardware choices; they are the
    /// lookup keys assigned when a twin engine type is given no explicit type.
    pub enum ForcedInductionType {
        /// No forced induction
        None => "none" | "na",
        /// Single turbocharger
        Single => "single",
        /// Twin-scroll turbocharger
        TwinScroll => "twin-scroll",
        /// Variable geometry turbocharger
        VariableGeometry => "variable-geometry",
        /// Roots blower
        Roots => "roots",
        /// Centrifugal supercharger
        Centrifugal => "centrifugal",
        /// Twin-screw supercharger
        TwinScrew => "twin-screw",
        /// Implied by a twin-turbo engine
        TwinTurbo => "twin-turbo",
        /// Implied by a twincharged engine
        Twincharged => "twincharged",
    }
}

keyword_enum! {
    /// Cylinder arrangement
    pub enum Layout {
        /// Straight
        Inline => "inline",
        /// Two banks in a V
        V => "v",
        /// Horizontally opposed
        Boxer => "boxer",
    }
}

keyword_enum! {
    /// Fuel the engine is tuned for
    pub enum FuelType {
        /// Pump gasoline
        Gasoline => "gasoline",
        /// Premium or race gasoline
        HighOctane => "high-octane",
        /// Diesel
        Diesel => "diesel",
        /// 85% ethanol blend
        E85 => "e85",
        /// Methanol
        Methanol => "methanol",
        /// Liquefied petroleum gas
        Lpg => "lpg",
    }
}

keyword_enum! {
    /// Variable valve lift cam profile
    pub enum VvlProfile {
        /// Street cam
        Mild => "mild",
        /// High-lift cam
        Aggressive => "aggressive",
    }
}

keyword_enum! {
    /// Intake air condition
    pub enum AmbientCondition {
        /// Standard day
        Normal => "normal",
        /// Cold, dense air
        Cold => "cold",
        /// Hot, thin air
        Hot => "hot",
    }
}

impl EngineType {
    /// True for every engine type that carries boost
    pub fn is_forced(&self) -> bool {
        matches!(
            self,
            EngineType::Turbo
                | EngineType::Supercharger
                | EngineType::TwinTurbo
                | EngineType::Twincharged
        )
    }

    /// Induction hardware a user may pick for this engine type
    ///
    /// Empty for `Na` and unrecognized types. `Twincharged` accepts any hardware.
    pub fn compatible_inductions(&self) -> &'static [ForcedInductionType] {
        const TURBOS: &[ForcedInductionType] = &[
            ForcedInductionType::Single,
            ForcedInductionType::TwinScroll,
            ForcedInductionType::VariableGeometry,
        ];
        const SUPERCHARGERS: &[ForcedInductionType] = &[
            ForcedInductionType::Roots,
            ForcedInductionType::Centrifugal,
            ForcedInductionType::TwinScrew,
        ];
        const NONE: &[ForcedInductionType] = &[];
        const ANY: &[ForcedInductionType] = &[
            ForcedInductionType::Single,
            ForcedInductionType::TwinScroll,
            ForcedInductionType::VariableGeometry,
            ForcedInductionType::Roots,
            ForcedInductionType::Centrifugal,
            ForcedInductionType::TwinScrew,
        ];

        match self {
            EngineType::Turbo | EngineType::TwinTurbo => TURBOS,
            EngineType::Supercharger => SUPERCHARGERS,
            EngineType::Twincharged => ANY,
            EngineType::Na | EngineType::Unrecognized(_) => NONE,
        }
    }

    /// Lookup key used when a twin engine type has no explicit induction type
    pub fn implied_induction(&self) -> Option<ForcedInductionType> {
        match self {
            EngineType::TwinTurbo => Some(ForcedInductionType::TwinTurbo),
            EngineType::Twincharged => Some(ForcedInductionType::Twincharged),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(EngineType::parse_keyword("TURBO"), EngineType::Turbo);
        assert_eq!(FuelType::parse_keyword(" High-Octane "), FuelType::HighOctane);
        assert_eq!(Layout::parse_keyword("V"), Layout::V);
    }

    #[test]
    fn test_unrecognized_keyword_is_kept_lowercase() {
        let fuel = FuelType::parse_keyword("Kerosene");
        assert_eq!(fuel, FuelType::Unrecognized("kerosene".to_string()));
        assert!(!fuel.is_recognized());
        assert_eq!(fuel.to_string(), "kerosene");
    }

    #[test]
    fn test_na_alias_for_no_induction() {
        assert_eq!(
            ForcedInductionType::parse_keyword("na"),
            ForcedInductionType::None
        );
        assert_eq!(ForcedInductionType::None.as_str(), "none");
    }

    #[test]
    fn test_serde_uses_lowercase_keywords() {
        let json = serde_json::to_string(&EngineType::TwinTurbo).unwrap();
        assert_eq!(json, "\"twin-turbo\"");
        let back: EngineType = serde_json::from_str("\"Twincharged\"").unwrap();
        assert_eq!(back, EngineType::Twincharged);
    }

    #[test]
    fn test_compatible_inductions() {
        assert!(EngineType::Turbo
            .compatible_inductions()
            .contains(&ForcedInductionType::TwinScroll));
        assert!(!EngineType::Supercharger
            .compatible_inductions()
            .contains(&ForcedInductionType::Single));
        assert!(EngineType::Na.compatible_inductions().is_empty());
        assert_eq!(EngineType::Twincharged.compatible_inductions().len(), 6);
    }

    #[test]
    fn test_keyword_listing() {
        assert_eq!(VvlProfile::keywords(), &["mild", "aggressive"]);
        assert_eq!(AmbientCondition::keywords().len(), 3);
    }
}
