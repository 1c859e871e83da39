//! Display types announced to the host at startup.

use log::info;
use serde::Serialize;

use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayType {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Default)]
pub struct Registry {
    types: Vec<DisplayType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, display_type: DisplayType) -> Result<(), RegistryError> {
        if self.get(display_type.kind).is_some() {
            return Err(RegistryError::Duplicate(display_type.kind.to_string()));
        }
        info!(
            "Registered display type: type={} name={}",
            display_type.kind, display_type.name
        );
        self.types.push(display_type);
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<&DisplayType> {
        self.types.iter().find(|t| t.kind == kind)
    }

    pub fn types(&self) -> &[DisplayType] {
        &self.types
    }
}

#[test]
fn test_register_display_type() {
    let mut registry = Registry::new();
    registry.register(crate::strip::DISPLAY_TYPE).unwrap();
    assert_eq!(registry.types().len(), 1);
    assert_eq!(
        registry.get("hourly-weather").map(|t| t.name),
        Some("Hourly Weather")
    );
    assert_eq!(
        registry.register(crate::strip::DISPLAY_TYPE),
        Err(RegistryError::Duplicate("hourly-weather".to_string()))
    );
    assert!(registry.get("daily-weather").is_none());
}
