use crate::inventory::domain::{
    Component, ComponentType, ComponentVersion, DeploymentStatus, Platform, PlatformType,
};
use std::fmt;
use std::str::FromStr;

/// Sentinel string meaning "do not filter on this field"
pub const ALL_SENTINEL: &str = "all";

/// A categorical filter value: either everything, or one value.
///
/// `All` bypasses the predicate entirely; it is never compared against
/// record values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Selector::All);
        }
        trimmed
            .parse::<T>()
            .map(Selector::Only)
            .map_err(|e| e.to_string())
    }
}

/// A pure predicate over records of one type
pub trait RecordFilter<T: Clone> {
    fn matches(&self, record: &T) -> bool;

    /// Matching records, in input order
    fn apply(&self, records: &[T]) -> Vec<T> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Lowercased free-text needle; blank queries match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextQuery(Option<String>);

impl TextQuery {
    fn new(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(trimmed.to_lowercase()))
        }
    }

    fn matches_any(&self, fields: &[&str]) -> bool {
        match &self.0 {
            None => true,
            Some(needle) => fields.iter().any(|f| f.to_lowercase().contains(needle)),
        }
    }
}

/// Filter state for the platform list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformFilter {
    text: TextQuery,
    project: Selector<String>,
    platform_type: Selector<PlatformType>,
}

impl PlatformFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive match on name, URN or id
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = TextQuery::new(text);
        self
    }

    pub fn with_project(mut self, project: Selector<String>) -> Self {
        self.project = project;
        self
    }

    pub fn with_type(mut self, platform_type: Selector<PlatformType>) -> Self {
        self.platform_type = platform_type;
        self
    }
}

impl RecordFilter<Platform> for PlatformFilter {
    fn matches(&self, platform: &Platform) -> bool {
        self.project.accepts(&platform.project_id)
            && self.platform_type.accepts(&platform.platform_type)
            && self
                .text
                .matches_any(&[platform.name.as_str(), platform.urn.as_str(), platform.id.as_str()])
    }
}

/// Filter state for the component catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentFilter {
    text: TextQuery,
    component_type: Selector<ComponentType>,
}

impl ComponentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive match on name, IP, hardware or id
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = TextQuery::new(text);
        self
    }

    pub fn with_type(mut self, component_type: Selector<ComponentType>) -> Self {
        self.component_type = component_type;
        self
    }
}

impl RecordFilter<Component> for ComponentFilter {
    fn matches(&self, component: &Component) -> bool {
        self.component_type.accepts(&component.component_type)
            && self.text.matches_any(&[
                component.name.as_str(),
                component.ip.as_str(),
                component.hardware.as_str(),
                component.id.as_str(),
            ])
    }
}

/// Filter state for deployment records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionFilter {
    text: TextQuery,
    platform: Selector<String>,
    status: Selector<DeploymentStatus>,
}

impl VersionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive match on version number, platform id or id
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = TextQuery::new(text);
        self
    }

    pub fn with_platform(mut self, platform: Selector<String>) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_status(mut self, status: Selector<DeploymentStatus>) -> Self {
        self.status = status;
        self
    }
}

impl RecordFilter<ComponentVersion> for VersionFilter {
    fn matches(&self, version: &ComponentVersion) -> bool {
        self.platform.accepts(&version.platform_id)
            && self.status.accepts(&version.status)
            && self.text.matches_any(&[
                version.version_number.as_str(),
                version.platform_id.as_str(),
                version.id.as_str(),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{
        ComponentDraft, ComponentVersionDraft, Entity, PlatformDraft, VersionedComponentKind,
    };
    use chrono::Utc;

    fn platforms() -> Vec<Platform> {
        vec![
            Platform::from_draft(
                "1".to_string(),
                PlatformDraft::new("Web Portal", "1000001", PlatformType::HqServer, "1"),
                Utc::now(),
            ),
            Platform::from_draft(
                "2".to_string(),
                PlatformDraft::new("Field Terminal", "3000001", PlatformType::MountedStation, "3"),
                Utc::now(),
            ),
            Platform::from_draft(
                "3".to_string(),
                PlatformDraft::new("Backend", "2000001", PlatformType::HqServer, "3"),
                Utc::now(),
            ),
        ]
    }

    fn ids(platforms: &[Platform]) -> Vec<&str> {
        platforms.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_selector_parses_all_sentinel() {
        assert_eq!("all".parse::<Selector<String>>().unwrap(), Selector::All);
        assert_eq!("ALL".parse::<Selector<String>>().unwrap(), Selector::All);
        assert_eq!("".parse::<Selector<String>>().unwrap(), Selector::All);
        assert_eq!(
            "3".parse::<Selector<String>>().unwrap(),
            Selector::Only("3".to_string())
        );
    }

    #[test]
    fn test_selector_parse_error_is_propagated() {
        let error = "satellite".parse::<Selector<PlatformType>>().unwrap_err();
        assert!(error.contains("Invalid platform type"));
    }

    #[test]
    fn test_all_is_not_a_literal_value() {
        let mut platform = platforms().remove(0);
        platform.project_id = "all".to_string();
        let only_all = PlatformFilter::new().with_project(Selector::Only("all".to_string()));
        assert!(only_all.matches(&platform));

        platform.project_id = "1".to_string();
        let all = PlatformFilter::new().with_project("all".parse().unwrap());
        assert!(all.matches(&platform));
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let all = platforms();
        assert_eq!(PlatformFilter::new().apply(&all).len(), 3);
        assert_eq!(PlatformFilter::new().with_text("   ").apply(&all).len(), 3);
    }

    #[test]
    fn test_text_is_case_insensitive_over_name_and_urn() {
        let all = platforms();
        assert_eq!(ids(&PlatformFilter::new().with_text("PORTAL").apply(&all)), vec!["1"]);
        assert_eq!(ids(&PlatformFilter::new().with_text("2000").apply(&all)), vec!["3"]);
    }

    #[test]
    fn test_predicates_combine() {
        let all = platforms();
        let filter = PlatformFilter::new()
            .with_project(Selector::Only("3".to_string()))
            .with_type(Selector::Only(PlatformType::HqServer));
        assert_eq!(ids(&filter.apply(&all)), vec!["3"]);
    }

    #[test]
    fn test_component_filter() {
        let components = vec![
            Component::from_draft(
                "1".to_string(),
                ComponentDraft::new("TC-Rugged", ComponentType::TacticalComputer)
                    .with_ip("10.10.1.21")
                    .with_hardware("Intel i7"),
                Utc::now(),
            ),
            Component::from_draft(
                "2".to_string(),
                ComponentDraft::new("Gateway", ComponentType::Grx).with_ip("10.10.4.2"),
                Utc::now(),
            ),
        ];
        let by_ip = ComponentFilter::new().with_text("10.10.4");
        assert_eq!(by_ip.apply(&components)[0].id, "2");

        let by_hardware = ComponentFilter::new().with_text("intel");
        assert_eq!(by_hardware.apply(&components)[0].id, "1");

        let by_type = ComponentFilter::new().with_type(Selector::Only(ComponentType::Grx));
        assert_eq!(by_type.apply(&components).len(), 1);
    }

    #[test]
    fn test_version_filter() {
        let versions = vec![
            ComponentVersion::from_draft(
                "1".to_string(),
                ComponentVersionDraft::new(
                    "1",
                    VersionedComponentKind::App,
                    "2.5.0",
                    DeploymentStatus::Deployed,
                ),
                Utc::now(),
            ),
            ComponentVersion::from_draft(
                "2".to_string(),
                ComponentVersionDraft::new(
                    "2",
                    VersionedComponentKind::Radio,
                    "2.0.0",
                    DeploymentStatus::RollbackNeeded,
                ),
                Utc::now(),
            ),
        ];
        let rollbacks =
            VersionFilter::new().with_status(Selector::Only(DeploymentStatus::RollbackNeeded));
        assert_eq!(rollbacks.apply(&versions)[0].id, "2");

        let on_platform = VersionFilter::new().with_platform(Selector::Only("1".to_string()));
        assert_eq!(on_platform.apply(&versions).len(), 1);

        let by_number = VersionFilter::new().with_text("2.5");
        assert_eq!(by_number.apply(&versions)[0].id, "1");
    }
}
