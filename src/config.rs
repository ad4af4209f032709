// src/config.rs
//! Command-line input and resolved export configuration.

use crate::constants::{
    DEFAULT_API_BASE, DEFAULT_APP_BASE, DEFAULT_DATA_BASE, DEFAULT_DETAIL_CONCURRENCY,
    DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_SIZE, DOCUMENTS_PATH, INVOICE_DOCTYPE, INVOICE_QUERY_PATH,
    LISTING_SORT_DIRECTION, LISTING_SORT_FIELD, LOGIN_PATH, MAX_DETAIL_CONCURRENCY,
    PASSWORD_ENV_VAR, USERNAME_ENV_VAR,
};
use crate::error::AppError;
use crate::types::{Credentials, ValidatedUrl, ValidationError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// CSV file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Documents requested per listing page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Stop with an error if the listing needs more than this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Invoice detail requests allowed in flight at once (1-64)
    #[arg(long, default_value_t = DEFAULT_DETAIL_CONCURRENCY)]
    pub concurrency: usize,

    /// What to do when a single invoice cannot be fetched
    #[arg(long, value_enum, default_value_t = DetailFailurePolicy::Abort)]
    pub on_detail_error: DetailFailurePolicy,

    /// .env file holding INVOICE_SIMPLE_USERNAME / INVOICE_SIMPLE_PASSWORD
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Root URL of the account API
    #[arg(long, default_value = DEFAULT_API_BASE, hide = true)]
    pub api_base: String,

    /// Root URL of the web app API
    #[arg(long, default_value = DEFAULT_APP_BASE, hide = true)]
    pub app_base: String,

    /// Root URL of the data API
    #[arg(long, default_value = DEFAULT_DATA_BASE, hide = true)]
    pub data_base: String,
}

/// How the detail stage treats a single failed invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DetailFailurePolicy {
    /// Any failure aborts the run and nothing is written.
    #[default]
    Abort,
    /// Failed invoices are left out and reported; the rest are exported.
    Skip,
}

/// The three endpoints the export talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub login: ValidatedUrl,
    pub documents: ValidatedUrl,
    pub invoice_query: ValidatedUrl,
}

impl ServiceEndpoints {
    /// Builds endpoints from the three API roots.
    pub fn from_bases(api_base: &str, app_base: &str, data_base: &str) -> Result<Self, AppError> {
        Ok(Self {
            login: ValidatedUrl::parse(api_base)?.join(LOGIN_PATH)?,
            documents: ValidatedUrl::parse(app_base)?.join(DOCUMENTS_PATH)?,
            invoice_query: ValidatedUrl::parse(data_base)?.join(INVOICE_QUERY_PATH)?,
        })
    }

    /// All three endpoints under a single root, e.g. a local mock server.
    pub fn rooted_at(base: &str) -> Result<Self, AppError> {
        Self::from_bases(base, base, base)
    }

    /// First page of the invoice listing, newest first.
    pub fn documents_start(&self, page_size: u32) -> ValidatedUrl {
        let limit = page_size.to_string();
        self.documents.with_query([
            ("doctype", INVOICE_DOCTYPE),
            ("dir", LISTING_SORT_DIRECTION),
            ("sortby", LISTING_SORT_FIELD),
            ("limit", limit.as_str()),
        ])
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::from_bases(DEFAULT_API_BASE, DEFAULT_APP_BASE, DEFAULT_DATA_BASE)
            .expect("Built-in endpoint URLs should be valid")
    }
}

/// Resolved export configuration, validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub credentials: Credentials,
    pub endpoints: ServiceEndpoints,
    pub page_size: u32,
    pub max_pages: Option<u32>,
    pub concurrency: usize,
    pub on_detail_error: DetailFailurePolicy,
    pub output_file: PathBuf,
    pub verbose: bool,
}

impl ExportConfig {
    /// A configuration with default settings for the given account.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: ServiceEndpoints::default(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            concurrency: DEFAULT_DETAIL_CONCURRENCY,
            on_detail_error: DetailFailurePolicy::default(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            verbose: false,
        }
    }

    /// Resolves a complete configuration from CLI input and the environment.
    ///
    /// Any `.env` file must already have been loaded into the process
    /// environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let credentials = credentials_from_lookup(|name| std::env::var(name).ok())?;
        Self::from_cli(cli, credentials)
    }

    fn from_cli(cli: CommandLineInput, credentials: Credentials) -> Result<Self, AppError> {
        if cli.page_size == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u64::from(u32::MAX),
            }
            .into());
        }

        if cli.concurrency == 0 || cli.concurrency > MAX_DETAIL_CONCURRENCY {
            return Err(ValidationError::OutOfBounds {
                value: cli.concurrency as u64,
                min: 1,
                max: MAX_DETAIL_CONCURRENCY as u64,
            }
            .into());
        }

        Ok(Self {
            credentials,
            endpoints: ServiceEndpoints::from_bases(&cli.api_base, &cli.app_base, &cli.data_base)?,
            page_size: cli.page_size,
            max_pages: cli.max_pages,
            concurrency: cli.concurrency,
            on_detail_error: cli.on_detail_error,
            output_file: cli.output,
            verbose: cli.verbose,
        })
    }

    pub fn documents_start(&self) -> ValidatedUrl {
        self.endpoints.documents_start(self.page_size)
    }
}

/// Reads the account credentials through `lookup` (normally the process
/// environment). A missing or empty variable is a configuration error.
pub fn credentials_from_lookup<F>(lookup: F) -> Result<Credentials, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| {
        lookup(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::MissingConfiguration(format!("{} is not defined", name)))
    };

    let username = read(USERNAME_ENV_VAR)?;
    let password = read(PASSWORD_ENV_VAR)?;
    Ok(Credentials::new(username, password)?)
}
