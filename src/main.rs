use clap::Parser;

use issue_creator::{
    cli::{self, CreateOptions},
    command,
    result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("issue_creator")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    match cli_args.command.clone() {
        cli::Command::Create {
            template_url,
            close_last_issue,
            check_before_create_issue,
            dry_run,
        } => {
            let options = CreateOptions::merge(
                cli_args.load_config()?,
                close_last_issue,
                check_before_create_issue,
                dry_run,
            );
            command::create::execute(&cli_args, &template_url, options).await
        }
        cli::Command::Render { template_url } => {
            command::render::execute(&cli_args, &template_url).await
        }
    }
}
