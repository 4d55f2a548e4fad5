use super::entity::{require_non_empty, Entity, EntityDraft, EntityKind};
use super::platform::normalize_label;
use crate::shared::{InventoryError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    #[serde(rename = "Tactical Computer")]
    TacticalComputer,
    #[serde(rename = "Smart TMR")]
    SmartTmr,
    #[serde(rename = "E-Lynks Radio")]
    ELynksRadio,
    #[serde(rename = "HQ Server")]
    HqServer,
    #[serde(rename = "Client")]
    Client,
    #[serde(rename = "GRX")]
    Grx,
}

impl ComponentType {
    pub const ALL: [ComponentType; 6] = [
        ComponentType::TacticalComputer,
        ComponentType::SmartTmr,
        ComponentType::ELynksRadio,
        ComponentType::HqServer,
        ComponentType::Client,
        ComponentType::Grx,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::TacticalComputer => "Tactical Computer",
            ComponentType::SmartTmr => "Smart TMR",
            ComponentType::ELynksRadio => "E-Lynks Radio",
            ComponentType::HqServer => "HQ Server",
            ComponentType::Client => "Client",
            ComponentType::Grx => "GRX",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        ComponentType::ALL
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
            .ok_or_else(|| {
                let labels: Vec<&str> = ComponentType::ALL.iter().map(|t| t.label()).collect();
                format!(
                    "Invalid component type: {}. Expected one of: {}",
                    s,
                    labels.join(", ")
                )
            })
    }
}

/// Catalogued hardware/software unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub description: String,
    /// IPv4 address, empty when unassigned
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub version: String,
    /// Free-text hardware spec
    #[serde(default)]
    pub hardware: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub hardware: String,
}

impl ComponentDraft {
    pub fn new(name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            name: name.into(),
            component_type,
            description: String::new(),
            ip: String::new(),
            version: String::new(),
            hardware: String::new(),
        }
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = hardware.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl EntityDraft for ComponentDraft {
    type Record = Component;
}

impl Entity for Component {
    type Draft = ComponentDraft;

    const KIND: EntityKind = EntityKind::Component;

    fn id(&self) -> &str {
        &self.id
    }

    fn stamp(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: String, draft: ComponentDraft, stamp: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            component_type: draft.component_type,
            description: draft.description,
            ip: draft.ip,
            version: draft.version,
            hardware: draft.hardware,
            created_at: stamp,
        }
    }

    fn to_draft(&self) -> ComponentDraft {
        ComponentDraft {
            name: self.name.clone(),
            component_type: self.component_type,
            description: self.description.clone(),
            ip: self.ip.clone(),
            version: self.version.clone(),
            hardware: self.hardware.clone(),
        }
    }

    fn validate_draft(draft: &ComponentDraft) -> StoreResult<()> {
        require_non_empty(EntityKind::Component, "name", &draft.name)?;

        let ip = draft.ip.trim();
        if !ip.is_empty() && ip.parse::<Ipv4Addr>().is_err() {
            return Err(InventoryError::validation(
                EntityKind::Component,
                format!("ip '{}' is not a valid IPv4 address", draft.ip),
            ));
        }

        Ok(())
    }
}
