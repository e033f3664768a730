// CLI module for argument parsing and configuration

use crate::config::UserConfig;
use crate::domain::gesture::{is_valid_threshold, DEFAULT_SWIPE_THRESHOLD};
use crate::domain::{parse_skills, ApplicationStatus, JobFilter, JobType};
use crate::session::UserRole;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// jswp - swipe through job postings in your terminal
///
/// Swipe right to apply, left to pass.
#[derive(Parser, Debug, Clone)]
#[command(name = "jswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Job catalog (a JSON array of job postings)
    #[arg(default_value = "jobs.json")]
    pub catalog: PathBuf,

    /// Filter by job type(s)
    ///
    /// Can be specified multiple times.
    /// Example: --type remote --type hybrid
    #[arg(short = 't', long = "type", value_enum)]
    pub job_types: Vec<JobTypeFilter>,

    /// Only show jobs requiring at most this many years of experience
    #[arg(short = 'e', long = "max-experience")]
    pub max_experience: Option<u32>,

    /// Only show jobs whose location contains this text
    #[arg(short = 'l', long = "location")]
    pub location: Option<String>,

    /// Comma separated skills; jobs requiring any of them are shown
    #[arg(short = 'k', long = "skills")]
    pub skills: Option<String>,

    /// Identity to record swipes under
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Role of the signed-in user
    #[arg(long = "role", value_enum, default_value = "talent")]
    pub role: UserRole,

    /// Drag distance needed to commit a swipe
    #[arg(long = "threshold")]
    pub threshold: Option<f64>,

    /// Ledger file where swipes are stored
    #[arg(long = "ledger")]
    pub ledger: Option<PathBuf>,

    /// Show jobs you have already swiped on
    #[arg(long = "include-swiped", action = ArgAction::SetTrue)]
    pub include_swiped: bool,

    /// Dry run mode - swipes are kept in memory and never written
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Print the jobs you applied to and exit
    #[arg(long = "applied", action = ArgAction::SetTrue)]
    pub list_applied: bool,

    /// Set an applicant's status (company accounts)
    #[arg(long = "set-status", value_enum, requires_all = ["applicant", "job"])]
    pub set_status: Option<ApplicationStatus>,

    /// Talent whose application is updated by --set-status
    #[arg(long = "applicant")]
    pub applicant: Option<String>,

    /// Job whose application is updated by --set-status
    #[arg(long = "job")]
    pub job: Option<String>,

    /// Show the welcome screen even if it was seen before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Job type filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JobTypeFilter {
    /// Fully remote positions
    Remote,
    /// On-site positions
    Onsite,
    /// Hybrid positions
    Hybrid,
}

impl From<JobTypeFilter> for JobType {
    fn from(filter: JobTypeFilter) -> Self {
        match filter {
            JobTypeFilter::Remote => JobType::Remote,
            JobTypeFilter::Onsite => JobType::Onsite,
            JobTypeFilter::Hybrid => JobType::Hybrid,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Get the job type filters as domain JobType values
    pub fn get_job_type_filters(&self) -> Option<Vec<JobType>> {
        if self.job_types.is_empty() {
            None
        } else {
            Some(self.job_types.iter().map(|&t| t.into()).collect())
        }
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.catalog.exists() {
            return Err(format!(
                "Catalog does not exist: {}",
                self.catalog.display()
            ));
        }

        if !self.catalog.is_file() {
            return Err(format!(
                "Catalog is not a file: {}",
                self.catalog.display()
            ));
        }

        if let Some(threshold) = self.threshold {
            if !is_valid_threshold(threshold) {
                return Err(format!(
                    "Invalid threshold: {}. Use a positive number such as 100",
                    threshold
                ));
            }
        }

        if self.list_applied && self.role != UserRole::Talent {
            return Err("--applied is only available to talent accounts".to_string());
        }

        if self.set_status.is_some() {
            if self.role != UserRole::Company {
                return Err("--set-status is only available to company accounts".to_string());
            }
            if self.applicant.is_none() || self.job.is_none() {
                return Err("--set-status needs both --applicant and --job".to_string());
            }
        }

        if let Some(ref user) = self.user {
            if user.trim().is_empty() {
                return Err("User id cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments and the user config
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: PathBuf,
    pub filter: JobFilter,
    pub user_id: String,
    pub role: UserRole,
    pub threshold: f64,
    pub ledger_path: Option<PathBuf>,
    pub include_swiped: bool,
    pub dry_run: bool,
    pub list_applied: bool,
    pub status_update: Option<StatusUpdate>,
    pub show_welcome: bool,
    pub verbose: bool,
}

/// A company's change to one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub talent_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
}

pub const DEFAULT_USER_ID: &str = "local";

impl AppConfig {
    /// Merges CLI arguments over the persisted user config.
    pub fn from_args(args: Args, user_config: &UserConfig) -> Self {
        let filter = JobFilter {
            job_types: args.get_job_type_filters(),
            max_experience: args.max_experience,
            location: args.location.clone().filter(|l| !l.trim().is_empty()),
            skills: args.skills.as_deref().map(parse_skills).unwrap_or_default(),
            ..Default::default()
        };

        let configured_threshold = user_config.swipe_threshold.filter(|&threshold| {
            let valid = is_valid_threshold(threshold);
            if !valid {
                tracing::warn!(threshold, "ignoring invalid swipe_threshold in config");
            }
            valid
        });

        let status_update = match (args.set_status, args.applicant, args.job) {
            (Some(status), Some(talent_id), Some(job_id)) => Some(StatusUpdate {
                talent_id,
                job_id,
                status,
            }),
            _ => None,
        };

        AppConfig {
            catalog: args.catalog,
            filter,
            user_id: args
                .user
                .or_else(|| user_config.user_id.clone())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            role: args.role,
            threshold: args
                .threshold
                .or(configured_threshold)
                .unwrap_or(DEFAULT_SWIPE_THRESHOLD),
            ledger_path: args
                .ledger
                .or_else(|| user_config.ledger_path.clone())
                .or_else(UserConfig::default_ledger_path),
            include_swiped: args.include_swiped,
            dry_run: args.dry_run,
            list_applied: args.list_applied,
            status_update,
            show_welcome: args.show_welcome,
            verbose: args.verbose,
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig::from_args(args, &UserConfig::default())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            catalog: PathBuf::from("jobs.json"),
            filter: JobFilter::default(),
            user_id: DEFAULT_USER_ID.to_string(),
            role: UserRole::Talent,
            threshold: DEFAULT_SWIPE_THRESHOLD,
            ledger_path: None,
            include_swiped: false,
            dry_run: false,
            list_applied: false,
            status_update: None,
            show_welcome: false,
            verbose: false,
        }
    }
}
