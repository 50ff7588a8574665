/// Feature registry for the rainfall prediction client.
///
/// Defines the canonical list of weather features the prediction model
/// expects, along with their descriptions and units. This is the single
/// source of truth for feature names. All other modules should take the
/// active set from here (or from a validated config override) rather than
/// hardcoding names.

// ---------------------------------------------------------------------------
// Feature metadata
// ---------------------------------------------------------------------------

/// Metadata for a single model input.
pub struct Feature {
    /// Key used in the form and in the JSON payload.
    pub name: &'static str,
    /// Human-readable description shown next to the prompt.
    pub description: &'static str,
    /// Unit the model was trained on, for display only.
    pub unit: &'static str,
}

/// Model inputs, in the order they are presented to the user.
pub static FEATURE_REGISTRY: &[Feature] = &[
    Feature {
        name: "pressure",
        description: "Mean sea-level pressure",
        unit: "hPa",
    },
    Feature {
        name: "dewpoint",
        description: "Dew point temperature",
        unit: "°C",
    },
    Feature {
        name: "humidity",
        description: "Relative humidity",
        unit: "%",
    },
    Feature {
        name: "cloud",
        description: "Cloud cover",
        unit: "%",
    },
    Feature {
        name: "sunshine",
        description: "Hours of sunshine",
        unit: "h",
    },
    Feature {
        name: "winddirection",
        description: "Wind direction",
        unit: "°",
    },
    Feature {
        name: "windspeed",
        description: "Wind speed",
        unit: "km/h",
    },
];

// ---------------------------------------------------------------------------
// Feature set
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free list of feature names sent on every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    names: Vec<String>,
}

impl FeatureSet {
    /// Builds a set from an explicit list.
    ///
    /// Returns an error for an empty list, a blank name, or a duplicate.
    pub fn new<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err("feature names must not be blank".to_string());
            }
            if collected.contains(&name) {
                return Err(format!("duplicate feature name: {}", name));
            }
            collected.push(name);
        }
        if collected.is_empty() {
            return Err("feature set must contain at least one name".to_string());
        }
        Ok(Self { names: collected })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            names: FEATURE_REGISTRY.iter().map(|f| f.name.to_string()).collect(),
        }
    }
}

/// Looks up registry metadata for a feature, if it is a known one.
pub fn find_feature(name: &str) -> Option<&'static Feature> {
    FEATURE_REGISTRY.iter().find(|f| f.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
