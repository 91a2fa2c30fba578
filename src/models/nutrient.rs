//! Nutrient vector
//!
//! Nutrient values per 100 canonical units, keyed by a fixed, ordered code
//! list. Used across library entries, stock entries, recipe lines, and
//! recipes.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

/// Nutrient codes in storage order: macronutrients, fat- and water-soluble
/// vitamins, major and trace minerals, phytochemicals.
pub const NUTRIENT_CODES: [&str; 38] = [
    "kcal",
    "protein",
    "fat",
    "carbs",
    "fiber",
    "vit_a",
    "vit_d",
    "vit_e",
    "vit_k",
    "vit_c",
    "b1",
    "b2",
    "b3",
    "b5",
    "b6",
    "b7",
    "b9",
    "b12",
    "calcium",
    "magnesium",
    "potassium",
    "sodium",
    "chloride",
    "phosphorus",
    "sulfur",
    "iron",
    "zinc",
    "iodine",
    "selenium",
    "copper",
    "manganese",
    "fluoride",
    "chromium",
    "molybdenum",
    "polyphenols",
    "carotenoids",
    "sulfides",
    "glucosinolates",
];

/// Nutrient values per 100 canonical units
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientVector {
    values: [f64; NUTRIENT_CODES.len()],
}

impl NutrientVector {
    /// Create a new vector with all values zero
    pub fn zero() -> Self {
        Self {
            values: [0.0; NUTRIENT_CODES.len()],
        }
    }

    /// Build from code/value pairs.
    ///
    /// Unknown codes are rejected; codes not mentioned stay zero.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut vector = Self::zero();
        for (code, value) in pairs {
            vector.set(code.as_ref(), value)?;
        }
        Ok(vector)
    }

    fn index_of(code: &str) -> Option<usize> {
        NUTRIENT_CODES.iter().position(|c| *c == code)
    }

    /// Value for a code, or None if the code is unknown
    pub fn get(&self, code: &str) -> Option<f64> {
        Self::index_of(code).map(|i| self.values[i])
    }

    /// Set the value for a code
    pub fn set(&mut self, code: &str, value: f64) -> Result<(), ValidationError> {
        match Self::index_of(code) {
            Some(i) => {
                self.values[i] = value;
                Ok(())
            }
            None => Err(ValidationError::UnknownNutrient(code.to_string())),
        }
    }

    /// Iterate (code, value) pairs in storage order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        NUTRIENT_CODES
            .iter()
            .zip(self.values.iter())
            .map(|(code, value)| (*code, *value))
    }

    /// Scale all values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut out = self.clone();
        for value in &mut out.values {
            *value *= multiplier;
        }
        out
    }

    /// Add another vector to this one
    pub fn add(&self, other: &NutrientVector) -> Self {
        let mut out = self.clone();
        for (value, addend) in out.values.iter_mut().zip(other.values.iter()) {
            *value += *addend;
        }
        out
    }

    /// Fill zero fields from another vector.
    ///
    /// Folding lookup results left to right with this gives first-non-zero
    /// priority per field.
    pub fn or_fill(&self, other: &NutrientVector) -> Self {
        let mut out = self.clone();
        for (value, fallback) in out.values.iter_mut().zip(other.values.iter()) {
            if *value == 0.0 {
                *value = *fallback;
            }
        }
        out
    }

    /// Whether every value is zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0)
    }
}

impl Default for NutrientVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for NutrientVector {
    type Output = NutrientVector;

    fn add(self, other: NutrientVector) -> NutrientVector {
        NutrientVector::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutrientVector {
    type Output = NutrientVector;

    fn mul(self, multiplier: f64) -> NutrientVector {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutrientVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientVector::zero(), |acc, v| acc + v)
    }
}

impl Serialize for NutrientVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(NUTRIENT_CODES.len()))?;
        for (code, value) in self.iter() {
            map.serialize_entry(code, &value)?;
        }
        map.end()
    }
}

struct NutrientVectorVisitor;

impl<'de> Visitor<'de> for NutrientVectorVisitor {
    type Value = NutrientVector;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of nutrient codes to values")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut vector = NutrientVector::zero();
        while let Some((code, value)) = access.next_entry::<String, f64>()? {
            vector.set(&code, value).map_err(serde::de::Error::custom)?;
        }
        Ok(vector)
    }
}

impl<'de> Deserialize<'de> for NutrientVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NutrientVectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_rejects_unknown_code() {
        let result = NutrientVector::from_pairs([("kcal", 130.0), ("caffeine", 1.0)]);
        assert_eq!(
            result,
            Err(ValidationError::UnknownNutrient("caffeine".to_string()))
        );
    }

    #[test]
    fn test_from_pairs_zero_fills_missing_codes() {
        let vector = NutrientVector::from_pairs([("kcal", 130.0)]).unwrap();
        assert_eq!(vector.get("kcal"), Some(130.0));
        assert_eq!(vector.get("protein"), Some(0.0));
        assert_eq!(vector.get("bogus"), None);
    }

    #[test]
    fn test_scale_and_add() {
        let a = NutrientVector::from_pairs([("kcal", 100.0), ("protein", 10.0)]).unwrap();
        let b = NutrientVector::from_pairs([("kcal", 50.0), ("fat", 5.0)]).unwrap();
        let sum = a.scale(2.0).add(&b);
        assert_eq!(sum.get("kcal"), Some(250.0));
        assert_eq!(sum.get("protein"), Some(20.0));
        assert_eq!(sum.get("fat"), Some(5.0));
    }

    #[test]
    fn test_or_fill_keeps_first_non_zero() {
        let primary = NutrientVector::from_pairs([("kcal", 130.0)]).unwrap();
        let secondary =
            NutrientVector::from_pairs([("kcal", 999.0), ("iron", 2.5)]).unwrap();
        let merged = primary.or_fill(&secondary);
        assert_eq!(merged.get("kcal"), Some(130.0));
        assert_eq!(merged.get("iron"), Some(2.5));
    }

    #[test]
    fn test_serde_round_trip() {
        let vector = NutrientVector::from_pairs([("kcal", 130.0), ("b12", 0.4)]).unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        let back: NutrientVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
    }

    #[test]
    fn test_deserialize_rejects_unknown_code() {
        let result: Result<NutrientVector, _> = serde_json::from_str(r#"{"caffeine": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_zero_fills_missing_codes() {
        let vector: NutrientVector = serde_json::from_str(r#"{"kcal": 42.0}"#).unwrap();
        assert_eq!(vector.get("kcal"), Some(42.0));
        assert_eq!(vector.get("zinc"), Some(0.0));
    }
}
