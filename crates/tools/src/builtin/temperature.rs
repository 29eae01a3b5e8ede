//! Simulated weather lookup.

use crate::params::lookup_text;
use crate::{BoxError, LOCAL_TIMEOUT, Tool, ToolResult};
use async_trait::async_trait;
use protocol::{ParameterSpec, Parameters, ToolDescriptor};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::time::Duration;

const PLACE: &[&str] = &["place_name", "place", "location", "city"];

/// Base temperatures in °C, keyed by lowercase city name.
const BASE_TEMPERATURES: &[(&str, i32)] = &[
    ("pune", 28),
    ("mumbai", 32),
    ("delhi", 25),
    ("bangalore", 22),
    ("chennai", 34),
    ("kolkata", 29),
    ("hyderabad", 30),
    ("ahmedabad", 31),
    ("jaipur", 27),
    ("lucknow", 26),
    ("kochi", 30),
    ("bhopal", 24),
    ("london", 15),
    ("new york", 12),
    ("tokyo", 18),
    ("paris", 16),
    ("sydney", 24),
    ("dubai", 35),
    ("singapore", 30),
    ("bangkok", 33),
    ("moscow", 5),
    ("beijing", 20),
    ("toronto", 8),
    ("berlin", 14),
];

const CONDITIONS: &[&str] = &[
    "Sunny",
    "Partly cloudy",
    "Clear sky",
    "Pleasant",
    "Warm",
    "Hot",
    "Cool",
    "Mild",
    "Humid",
    "Dry",
];

/// `get_temperature`: current temperature for a city.
pub struct Temperature {
    descriptor: ToolDescriptor,
    timeout: Duration,
}

impl Temperature {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(
            "get_temperature",
            "Gets current temperature for a given place",
        )
        .with_parameter(ParameterSpec::required(
            "place_name",
            "string",
            "City name (e.g., Pune, Mumbai, Delhi)",
        ));

        Self {
            descriptor,
            timeout: LOCAL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn report(place: &str) -> String {
        let mut rng = rand::rng();
        let condition = CONDITIONS.choose(&mut rng).copied().unwrap_or("Mild");
        let key = place.to_lowercase();
        let display = title_case(place);

        match BASE_TEMPERATURES.iter().find(|(city, _)| *city == key) {
            Some((_, celsius)) => {
                format!("Current temperature in {display}: {celsius}°C ({condition})")
            }
            None => {
                let celsius = rng.random_range(20..=30);
                format!(
                    "Current temperature in {display}: {celsius}°C ({condition}) - Estimated data"
                )
            }
        }
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[async_trait]
impl Tool for Temperature {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn execute(&self, params: &Parameters) -> Result<ToolResult, BoxError> {
        let Some(place) = lookup_text(params, PLACE) else {
            return Ok(ToolResult::error(
                "No place name provided. Please specify a city name.",
            ));
        };
        Ok(ToolResult::ok(Self::report(&place)))
    }
}
