//! tfproviderdocs CLI: the `tfproviderdocs` command.

mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use config::Flags;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    match cli.command {
        Commands::Check {
            path,
            config,
            allowed_guide_subcategories,
            allowed_guide_subcategories_file,
            allowed_resource_subcategories,
            allowed_resource_subcategories_file,
            enable_contents_check,
            ignore_cdktf_missing_files,
            ignore_file_mismatch_data_sources,
            ignore_file_mismatch_resources,
            ignore_file_missing_data_sources,
            ignore_file_missing_resources,
            provider_name,
            provider_source,
            providers_schema_json,
            require_guide_subcategory,
            require_schema_ordering,
            require_resource_subcategory,
            json,
        } => commands::check::run(commands::check::Args {
            config,
            flags: Flags {
                path,
                allowed_guide_subcategories,
                allowed_guide_subcategories_file,
                allowed_resource_subcategories,
                allowed_resource_subcategories_file,
                enable_contents_check,
                ignore_cdktf_missing_files,
                ignore_file_mismatch_data_sources,
                ignore_file_mismatch_resources,
                ignore_file_missing_data_sources,
                ignore_file_missing_resources,
                provider_name,
                provider_source,
                providers_schema_json,
                require_guide_subcategory,
                require_resource_subcategory,
                require_schema_ordering,
            },
            json,
        }),
    }
}
