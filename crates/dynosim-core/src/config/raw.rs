//! Loosely typed configuration record and its normalizer

use super::fields;
use super::{
    AmbientCondition, EngineConfiguration, EngineType, EnumPolicy, ForcedInductionType, FuelType,
    Layout, NormalizeOptions, VvlProfile,
};
use crate::error::{SimResult, SimulationError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Map a field key to its canonical name
///
/// Keys are trimmed and lower-cased. The short names written by older preset
/// files (`bore`, `redline`, `forced_type`, `use_vvl`, ...) map to their
/// canonical counterparts; any other key is returned unchanged.
pub fn canonical_field(key: &str) -> String {
    let key = key.trim().to_lowercase();
    let canonical = match key.as_str() {
        "bore" => fields::BORE_MM,
        "stroke" => fields::STROKE_MM,
        "redline" => fields::REDLINE_RPM,
        "forced_type" => fields::FORCED_INDUCTION_TYPE,
        "boost" => fields::BOOST_BAR,
        "ambient" => fields::AMBIENT_CONDITION,
        "use_vvl" => fields::VVL_ENABLED,
        "vvl_rpm" => fields::VVL_ACTIVATION_RPM,
        _ => return key,
    };
    canonical.to_string()
}

/// Raw field values keyed by canonical field name
///
/// Values are kept as strings exactly as supplied; nothing is interpreted
/// until [`normalize`](Self::normalize) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEngineConfig {
    values: BTreeMap<String, String>,
}

impl RawEngineConfig {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs; later pairs win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::new();
        for (key, value) in pairs {
            raw.set(key.as_ref(), value);
        }
        raw
    }

    /// Build from a flat JSON object of scalars
    ///
    /// Numbers and booleans are stored in their JSON text form, `null`
    /// entries are skipped. Anything but an object, and nested arrays or
    /// objects, are rejected.
    pub fn from_json_value(value: &Value) -> SimResult<Self> {
        let object: serde_json::Map<String, Value> = serde_json::from_value(value.clone())?;

        let mut raw = Self::new();
        for (key, value) in &object {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(SimulationError::validation(
                        canonical_field(key),
                        "expected a scalar value",
                    ));
                }
            };
            raw.set(key, text);
        }
        Ok(raw)
    }

    /// Parse a flat JSON object of scalars
    pub fn from_json_str(content: &str) -> SimResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// Set a field, mapping the key to its canonical name
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(canonical_field(key), value.into());
        self
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Apply a `key=value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> SimResult<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            SimulationError::validation(
                assignment.trim(),
                "expected an assignment of the form key=value",
            )
        })?;
        if key.trim().is_empty() {
            return Err(SimulationError::validation(
                assignment.trim(),
                "assignment has an empty key",
            ));
        }
        self.set(key, value.trim());
        Ok(())
    }

    /// Overlay every field of `other` onto this record
    pub fn merge(&mut self, other: &RawEngineConfig) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Raw value of a field by any accepted key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&canonical_field(key)).map(String::as_str)
    }

    /// Iterate over canonical key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalize with the default (lenient) options
    pub fn normalize(&self) -> SimResult<EngineConfiguration> {
        self.normalize_with(&NormalizeOptions::default())
    }

    /// Validate and type every field
    pub fn normalize_with(&self, options: &NormalizeOptions) -> SimResult<EngineConfiguration> {
        for key in self.values.keys() {
            if !fields::ALL.contains(&key.as_str()) {
                tracing::debug!("Ignoring unknown configuration field '{key}'");
            }
        }

        let policy = options.enum_policy;

        let bore_mm = self.required_real(fields::BORE_MM)?;
        let stroke_mm = self.required_real(fields::STROKE_MM)?;
        let cylinders = self.required_whole(fields::CYLINDERS)?;
        let compression_ratio = self.required_real(fields::COMPRESSION_RATIO)?;
        let redline_rpm = self.required_whole(fields::REDLINE_RPM)?;

        let engine_type: EngineType = self.required_keyword(fields::ENGINE_TYPE, policy)?;
        let layout: Layout = self
            .keyword(fields::LAYOUT, policy)?
            .unwrap_or(Layout::Inline);
        let fuel_type: FuelType = self
            .keyword(fields::FUEL_TYPE, policy)?
            .unwrap_or(FuelType::Gasoline);
        let ambient_condition: AmbientCondition = self
            .keyword(fields::AMBIENT_CONDITION, policy)?
            .unwrap_or(AmbientCondition::Normal);

        let (forced_induction_type, boost_bar) = self.induction(&engine_type, policy)?;

        let vvl_enabled = match self.value(fields::VVL_ENABLED) {
            Some(text) => parse_flag(fields::VVL_ENABLED, text)?,
            None => false,
        };
        let (vvl_activation_rpm, vvl_profile) = if vvl_enabled {
            let rpm = self.required_whole(fields::VVL_ACTIVATION_RPM)?;
            let profile: VvlProfile = self.required_keyword(fields::VVL_PROFILE, policy)?;
            if rpm >= redline_rpm {
                tracing::warn!(
                    "VVL activation at {rpm} RPM is at or above the {redline_rpm} RPM redline; it will never engage"
                );
            }
            (rpm, profile)
        } else {
            (0, VvlProfile::Mild)
        };

        let config = EngineConfiguration {
            bore_mm,
            stroke_mm,
            cylinders,
            compression_ratio,
            redline_rpm,
            engine_type,
            forced_induction_type,
            boost_bar,
            layout,
            fuel_type,
            vvl_enabled,
            vvl_activation_rpm,
            vvl_profile,
            ambient_condition,
        };
        config.validate()?;

        if config.compression_ratio <= 1.0 {
            tracing::warn!(
                "Compression ratio {} is not above 1.0",
                config.compression_ratio
            );
        }

        Ok(config)
    }

    /// Resolve induction type and boost for the given engine type
    fn induction(
        &self,
        engine_type: &EngineType,
        policy: EnumPolicy,
    ) -> SimResult<(ForcedInductionType, f64)> {
        if !engine_type.is_forced() {
            // NA and unrecognized engine types carry no boost
            if self.value(fields::BOOST_BAR).is_some()
                || self.value(fields::FORCED_INDUCTION_TYPE).is_some()
            {
                tracing::debug!("Ignoring induction fields for engine type '{engine_type}'");
            }
            return Ok((ForcedInductionType::None, 0.0));
        }

        let supplied: Option<ForcedInductionType> =
            self.keyword(fields::FORCED_INDUCTION_TYPE, policy)?;
        let forced = match supplied {
            Some(ForcedInductionType::None) | None => match engine_type.implied_induction() {
                Some(implied) => implied,
                None => {
                    return Err(SimulationError::validation(
                        fields::FORCED_INDUCTION_TYPE,
                        format!("required for engine type '{engine_type}'"),
                    ));
                }
            },
            Some(forced) => forced,
        };

        let implied = engine_type.implied_induction();
        if forced.is_recognized()
            && implied.as_ref() != Some(&forced)
            && !engine_type.compatible_inductions().contains(&forced)
        {
            let reason = format!("'{forced}' does not fit engine type '{engine_type}'");
            match policy {
                EnumPolicy::Strict => {
                    return Err(SimulationError::validation(
                        fields::FORCED_INDUCTION_TYPE,
                        reason,
                    ));
                }
                EnumPolicy::Lenient => tracing::warn!("{reason}"),
            }
        }

        let boost_bar = self.required_real(fields::BOOST_BAR)?;
        Ok((forced, boost_bar))
    }

    /// Non-blank value of a field
    fn value(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, field: &str) -> SimResult<&str> {
        self.value(field)
            .ok_or_else(|| SimulationError::missing(field))
    }

    fn required_real(&self, field: &str) -> SimResult<f64> {
        parse_real(field, self.required(field)?)
    }

    fn required_whole(&self, field: &str) -> SimResult<u32> {
        parse_whole(field, self.required(field)?)
    }

    fn keyword<K>(&self, field: &str, policy: EnumPolicy) -> SimResult<Option<K>>
    where
        K: KeywordField,
    {
        self.value(field)
            .map(|text| check_keyword(field, K::parse(text), policy))
            .transpose()
    }

    fn required_keyword<K>(&self, field: &str, policy: EnumPolicy) -> SimResult<K>
    where
        K: KeywordField,
    {
        check_keyword(field, K::parse(self.required(field)?), policy)
    }
}

/// Common surface of the keyword enums used by the normalizer
trait KeywordField: Sized + std::fmt::Display {
    fn parse(text: &str) -> Self;
    fn recognized(&self) -> bool;
    fn known() -> &'static [&'static str];
}

macro_rules! impl_keyword_field {
    ($($ty:ty),+) => {
        $(
            impl KeywordField for $ty {
                fn parse(text: &str) -> Self {
                    <$ty>::parse_keyword(text)
                }

                fn recognized(&self) -> bool {
                    self.is_recognized()
                }

                fn known() -> &'static [&'static str] {
                    <$ty>::keywords()
                }
            }
        )+
    };
}

impl_keyword_field!(
    EngineType,
    ForcedInductionType,
    Layout,
    FuelType,
    VvlProfile,
    AmbientCondition
);

fn check_keyword<K: KeywordField>(field: &str, value: K, policy: EnumPolicy) -> SimResult<K> {
    if value.recognized() {
        return Ok(value);
    }
    match policy {
        EnumPolicy::Strict => Err(SimulationError::validation(
            field,
            format!(
                "unrecognized value '{value}', expected one of: {}",
                K::known().join(", ")
            ),
        )),
        EnumPolicy::Lenient => {
            tracing::warn!(
                "Unrecognized {field} '{value}'; applying a neutral multiplier of 1.0"
            );
            Ok(value)
        }
    }
}

fn parse_real(field: &str, text: &str) -> SimResult<f64> {
    let value: f64 = text
        .parse()
        .map_err(|_| SimulationError::validation(field, format!("'{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(SimulationError::validation(
            field,
            format!("'{text}' is not a finite number"),
        ));
    }
    Ok(value)
}

/// Parse a non-negative integer, accepting integral decimals such as `7500.0`
fn parse_whole(field: &str, text: &str) -> SimResult<u32> {
    if let Ok(value) = text.parse::<u32>() {
        return Ok(value);
    }
    let value = parse_real(field, text)?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(SimulationError::validation(
            field,
            format!("'{text}' is not a non-negative whole number"),
        ));
    }
    Ok(value as u32)
}

fn parse_flag(field: &str, text: &str) -> SimResult<bool> {
    match text.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(SimulationError::validation(
            field,
            format!("'{text}' is not a yes/no value"),
        )),
    }
}
