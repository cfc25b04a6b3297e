//! Admin-managed settings: booking limits, fields, notes and image slots

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_MAX_BOOKINGS_PER_USER, IMAGE_SLOT_COUNT},
    models::{Field, default_fields},
};

/// Global booking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingLimits {
    pub max_bookings_per_user: u32,
}

impl Default for BookingLimits {
    fn default() -> Self {
        Self {
            max_bookings_per_user: DEFAULT_MAX_BOOKINGS_PER_USER,
        }
    }
}

/// Promotional image slots: `image{N}URL`, `image{N}Link`, `image{N}Caption`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSlots(BTreeMap<String, String>);

const IMAGE_KEY_SUFFIXES: [&str; 3] = ["URL", "Link", "Caption"];

impl ImageSlots {
    /// Whether `key` names one of the managed image attributes
    pub fn is_known_key(key: &str) -> bool {
        let Some(rest) = key.strip_prefix("image") else {
            return false;
        };
        let digits_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        let (number, suffix) = rest.split_at(digits_len);

        matches!(number.parse::<usize>(), Ok(n) if (1..=IMAGE_SLOT_COUNT).contains(&n))
            && !number.starts_with('0')
            && IMAGE_KEY_SUFFIXES.contains(&suffix)
    }

    /// Fill every missing attribute with an empty string
    pub fn ensure_complete(&mut self) {
        for n in 1..=IMAGE_SLOT_COUNT {
            for suffix in IMAGE_KEY_SUFFIXES {
                self.0.entry(format!("image{n}{suffix}")).or_default();
            }
        }
    }

    /// Overwrite the given attributes, leaving the rest untouched
    pub fn merge(&mut self, updates: BTreeMap<String, String>) {
        self.0.extend(updates);
        self.ensure_complete();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl Default for ImageSlots {
    fn default() -> Self {
        let mut slots = Self(BTreeMap::new());
        slots.ensure_complete();
        slots
    }
}

/// The `admin` section of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub images: ImageSlots,
    #[serde(default)]
    pub config: BookingLimits,
    #[serde(default = "default_fields")]
    pub fields: Vec<Field>,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            notes: String::new(),
            images: ImageSlots::default(),
            config: BookingLimits::default(),
            fields: default_fields(),
        }
    }
}
