use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tfproviderdocs",
    about = "tfproviderdocs: Terraform Provider documentation checks",
    version
)]
pub struct Cli {
    /// Log level for stderr diagnostics (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check Terraform Provider documentation against naming, front matter,
    /// and schema rules
    Check {
        /// Provider root directory
        #[arg(default_value = ".")]
        path: String,

        /// TOML configuration file (flags take precedence)
        #[arg(long)]
        config: Option<String>,

        /// Comma separated list of allowed guide front matter subcategories
        #[arg(long)]
        allowed_guide_subcategories: Option<String>,

        /// Path to newline separated file of allowed guide subcategories
        #[arg(long)]
        allowed_guide_subcategories_file: Option<String>,

        /// Comma separated list of allowed data source and resource front
        /// matter subcategories
        #[arg(long)]
        allowed_resource_subcategories: Option<String>,

        /// Path to newline separated file of allowed data source and
        /// resource subcategories
        #[arg(long)]
        allowed_resource_subcategories_file: Option<String>,

        /// Enable contents checking
        #[arg(long)]
        enable_contents_check: bool,

        /// Ignore missing CDKTF documentation files
        #[arg(long)]
        ignore_cdktf_missing_files: bool,

        /// Comma separated list of data sources to ignore mismatched
        /// documentation files
        #[arg(long)]
        ignore_file_mismatch_data_sources: Option<String>,

        /// Comma separated list of resources to ignore mismatched
        /// documentation files
        #[arg(long)]
        ignore_file_mismatch_resources: Option<String>,

        /// Comma separated list of data sources to ignore missing
        /// documentation files
        #[arg(long)]
        ignore_file_missing_data_sources: Option<String>,

        /// Comma separated list of resources to ignore missing
        /// documentation files
        #[arg(long)]
        ignore_file_missing_resources: Option<String>,

        /// Terraform Provider name (derived from the path when unset)
        #[arg(long)]
        provider_name: Option<String>,

        /// Terraform Provider source address, e.g. registry.terraform.io/hashicorp/aws
        #[arg(long)]
        provider_source: Option<String>,

        /// Path to terraform providers schema -json output
        #[arg(long)]
        providers_schema_json: Option<String>,

        /// Require guide front matter subcategory
        #[arg(long)]
        require_guide_subcategory: bool,

        /// Require schema attribute ordering in documentation (needs
        /// --enable-contents-check)
        #[arg(long)]
        require_schema_ordering: bool,

        /// Require data source and resource front matter subcategory
        #[arg(long)]
        require_resource_subcategory: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
