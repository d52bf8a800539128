use std::fmt;

/// Unit system the backend reports temperatures in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Celsius.
    #[default]
    Metric,
    /// Fahrenheit.
    Imperial,
}

/// Every recognized spelling, lower-case. Anything not listed here normalizes to [`Unit::Metric`].
pub const UNIT_ALIASES: &[(&str, Unit)] = &[
    ("celsius", Unit::Metric),
    ("c", Unit::Metric),
    ("metric", Unit::Metric),
    ("fahrenheit", Unit::Imperial),
    ("f", Unit::Imperial),
    ("imperial", Unit::Imperial),
];

impl Unit {
    /// Maps a free-form unit string to a unit. Never fails: missing, empty and unknown
    /// values all fall back to metric.
    pub fn normalize(raw: Option<&str>) -> Unit {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Unit::default();
        };

        let raw = raw.to_lowercase();

        UNIT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, unit)| *unit)
            .unwrap_or_default()
    }

    /// The token sent to the backend as the `units` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
