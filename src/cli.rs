use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fleet_inventory::adapters::outbound::memory::IdStrategy;
use fleet_inventory::application::dto::OutputFormat;
use fleet_inventory::inventory::domain::{
    ComponentType, DeploymentStatus, PlatformType, ReleaseFamily,
};
use fleet_inventory::inventory::services::{PlatformGrouping, Selector};
use std::path::PathBuf;

/// Track projects, platforms, components and deployed versions, and
/// report on the fleet's health
#[derive(Parser, Debug)]
#[command(name = "fleet-inventory")]
#[command(version)]
#[command(
    about = "Fleet inventory dashboard: platforms, components and deployed versions",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./fleet-inventory.config.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON seed file to load instead of the built-in demo fleet
    #[arg(short, long, global = true, conflicts_with = "remote")]
    pub data: Option<PathBuf>,

    /// Read from and write to the REST backend instead of a local inventory
    #[arg(long, global = true)]
    pub remote: bool,

    /// Base URL of the REST backend (used with --remote)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Output format: markdown or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Width of the recent-deployments window in days (1-365)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=365))]
    pub recent_days: Option<u32>,

    /// Reference date for recency windows, YYYY-MM-DD (defaults to today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Id assignment for new local records: sequential or uuid
    #[arg(long, global = true)]
    pub id_strategy: Option<IdStrategy>,

    /// Log store operations at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress messages on stderr
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Dashboard statistics and critical issues
    Summary {
        /// Exit with code 1 when critical issues are present
        #[arg(long)]
        fail_on_critical: bool,
    },
    /// List platforms, optionally filtered and grouped
    Platforms {
        /// Case-insensitive match on name, URN or id
        #[arg(short, long, default_value = "")]
        query: String,
        /// Project id, or "all"
        #[arg(long, default_value = "all")]
        project: Selector<String>,
        /// Platform type ("HQ Server", "Mounted Station"), or "all"
        #[arg(long = "type", default_value = "all")]
        platform_type: Selector<PlatformType>,
        /// Group by project, type or version
        #[arg(long)]
        group_by: Option<PlatformGrouping>,
    },
    /// List catalogued components
    Components {
        /// Case-insensitive match on name, IP, hardware or id
        #[arg(short, long, default_value = "")]
        query: String,
        /// Component type, or "all"
        #[arg(long = "type", default_value = "all")]
        component_type: Selector<ComponentType>,
    },
    /// List deployment records
    Versions {
        /// Case-insensitive match on version number, platform id or id
        #[arg(short, long, default_value = "")]
        query: String,
        /// Platform id, or "all"
        #[arg(long, default_value = "all")]
        platform: Selector<String>,
        /// Deployment status, or "all"
        #[arg(long, default_value = "all")]
        status: Selector<DeploymentStatus>,
    },
    /// Report URNs shared by more than one platform
    Duplicates,
    /// List release bundles with their sub-component versions
    Releases {
        /// Release family (application, elynx, grx, smart_tmr), or "all"
        #[arg(long, default_value = "all")]
        family: Selector<ReleaseFamily>,
    },
    /// Register a new platform; a duplicate URN is reported, not rejected
    RegisterPlatform {
        #[arg(long)]
        name: String,
        #[arg(long)]
        urn: String,
        #[arg(long = "type")]
        platform_type: PlatformType,
        /// Owning project id
        #[arg(long)]
        project: String,
        /// Application release id
        #[arg(long)]
        release: Option<String>,
        /// Associated component id
        #[arg(long)]
        component: Option<String>,
        /// Rewrite the --data seed file with the new platform
        #[arg(long)]
        save: bool,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("fleet-inventory").chain(args.iter().copied()))
    }

    #[test]
    fn test_summary_with_global_flags_after_command() {
        let args = parse(&["summary", "--format", "json", "--as-of", "2024-01-10"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(
            args.command,
            Command::Summary {
                fail_on_critical: false
            }
        );
    }

    #[test]
    fn test_platform_filters() {
        let args = parse(&[
            "platforms",
            "--project",
            "2",
            "--type",
            "hq server",
            "--group-by",
            "version",
        ])
        .unwrap();
        match args.command {
            Command::Platforms {
                query,
                project,
                platform_type,
                group_by,
            } => {
                assert_eq!(query, "");
                assert_eq!(project, Selector::Only("2".to_string()));
                assert_eq!(platform_type, Selector::Only(PlatformType::HqServer));
                assert_eq!(group_by, Some(PlatformGrouping::ReleaseVersion));
            }
            other => panic!("expected platforms, got {:?}", other),
        }
    }

    #[test]
    fn test_all_sentinel_is_default() {
        let args = parse(&["versions", "--status", "ALL"]).unwrap();
        match args.command {
            Command::Versions {
                platform, status, ..
            } => {
                assert_eq!(platform, Selector::All);
                assert_eq!(status, Selector::All);
            }
            other => panic!("expected versions, got {:?}", other),
        }
    }

    #[test]
    fn test_recent_days_range() {
        assert!(parse(&["summary", "--recent-days", "0"]).is_err());
        assert!(parse(&["summary", "--recent-days", "366"]).is_err());
        assert_eq!(
            parse(&["summary", "--recent-days", "30"]).unwrap().recent_days,
            Some(30)
        );
    }

    #[test]
    fn test_data_conflicts_with_remote() {
        assert!(parse(&["--data", "fleet.json", "--remote", "summary"]).is_err());
    }

    #[test]
    fn test_register_platform() {
        let args = parse(&[
            "--data",
            "fleet.json",
            "register-platform",
            "--name",
            "Web Portal",
            "--urn",
            "1111111",
            "--type",
            "HQ Server",
            "--project",
            "1",
            "--save",
        ])
        .unwrap();
        assert_eq!(args.data, Some(PathBuf::from("fleet.json")));
        match args.command {
            Command::RegisterPlatform {
                platform_type,
                release,
                save,
                ..
            } => {
                assert_eq!(platform_type, PlatformType::HqServer);
                assert_eq!(release, None);
                assert!(save);
            }
            other => panic!("expected register-platform, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        assert!(parse(&["versions", "--status", "shipped"]).is_err());
    }
}
