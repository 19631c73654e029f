use clap::Parser;
use legal_site::config::cli::Command;
use legal_site::core::ConfigProvider;
use legal_site::utils::{logger, validation::Validate};
use legal_site::{Cli, SessionContext, SiteContent, SiteError, StrapiClient};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail(err: SiteError) -> ! {
    tracing::error!("❌ {}", err);
    eprintln!("❌ {}", err.user_friendly_message());
    std::process::exit(err.exit_code());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = cli.cms_config().unwrap_or_else(|e| fail(e));
    if let Err(e) = config.validate() {
        fail(e);
    }

    tracing::debug!("CMS config: {} (token set: {})", config.base_url(), config.api_token().is_some());

    let page_size = config.page_size();
    let site = SiteContent::new(StrapiClient::new(&config)?);
    let mut session = SessionContext::new(config.default_locale());
    session.set_locale(cli.session_locale(&config));
    let locale = session.locale().clone();

    match cli.command {
        Command::Services { page } => {
            print_json(&site.list_services(&locale, page, page_size).await)?;
        }
        Command::Service { slug } => match site.find_service(&slug, &locale).await {
            Some(service) => print_json(&service)?,
            None => fail(SiteError::NotFound {
                what: format!("Service '{}'", slug),
            }),
        },
        Command::Search { query, team, page } => {
            session.set_search_query(query);
            let query = session.search_query();
            if team {
                print_json(&site.search_team_members(query, &locale, page, page_size).await)?;
            } else {
                print_json(&site.search_services(query, &locale, page, page_size).await)?;
            }
        }
        Command::Team => print_json(&site.list_team_members(&locale).await)?,
        Command::Clients => print_json(&site.list_clients(&locale).await)?,
        Command::Hero => print_json(&site.hero_content(&locale).await)?,
        Command::Subscribe { email } => {
            let subscribed = session.subscribe(&site, &email).await;
            print_json(session.subscription())?;
            if !subscribed {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
