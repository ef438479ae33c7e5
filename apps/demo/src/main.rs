use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use user_crud::{UserCrudAction, UserCrudInput};
use user_search::UserSearchForm;
use users_view::{UsersViewInput, UsersViewMode};

mod config;
mod kits;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use kits::{Kits, Outcome};

#[derive(Parser, Debug)]
#[command(about = "Dispatch user CRUD, search and view requests against stub backends")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a create/update/delete action.
    Crud {
        #[arg(long)]
        action: String,
        /// JSON payload, e.g. '{"id":"42"}'.
        #[arg(long, default_value = "{}")]
        payload: String,
    },
    /// Search users; the first filled-in of id, email, keyword decides how.
    Search {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Fetch users in one of the summary, detail or csv views.
    View {
        #[arg(long)]
        view: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        include_roles: bool,
    },
    /// Run one request per strategy and print every result.
    Showcase,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let kits = Kits::build(&settings).context("failed to wire kits")?;
    let outcomes = run(&kits, cli.command).await?;

    let mut all_ok = true;
    for (label, outcome) in &outcomes {
        all_ok &= outcome.is_ok();
        let body = outcome.to_json();
        let rendered = if settings.pretty {
            serde_json::to_string_pretty(&body)?
        } else {
            serde_json::to_string(&body)?
        };
        if outcomes.len() > 1 {
            println!("{label}: {rendered}");
        } else {
            println!("{rendered}");
        }
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(kits: &Kits, command: Command) -> Result<Vec<(String, Outcome)>> {
    let outcome: (String, Outcome) = match command {
        Command::Crud { action, payload } => {
            let action = match action.parse::<UserCrudAction>() {
                Ok(action) => action,
                Err(err) => return Ok(vec![("crud".into(), Outcome::from(err))]),
            };
            let payload: Value =
                serde_json::from_str(&payload).context("--payload is not valid JSON")?;
            ("crud".into(), kits.crud(UserCrudInput::new(action, payload)).await?)
        }
        Command::Search {
            id,
            email,
            keyword,
            page,
        } => {
            let form = UserSearchForm {
                id,
                email,
                keyword,
                page,
            };
            ("search".into(), kits.search(form).await?)
        }
        Command::View {
            view,
            page,
            include_roles,
        } => {
            let view = match view.parse::<UsersViewMode>() {
                Ok(view) => view,
                Err(err) => return Ok(vec![("view".into(), Outcome::from(err))]),
            };
            let mut params = serde_json::Map::new();
            if let Some(page) = page {
                params.insert("page".into(), json!(page));
            }
            if include_roles {
                params.insert("includeRoles".into(), json!(true));
            }
            let input = UsersViewInput::new(view).with_params(Value::Object(params));
            ("view".into(), kits.view(input).await?)
        }
        Command::Showcase => return showcase(kits).await,
    };
    Ok(vec![outcome])
}

async fn showcase(kits: &Kits) -> Result<Vec<(String, Outcome)>> {
    info!("showcase: running one request per strategy");
    Ok(vec![
        (
            "CreateUser".into(),
            kits.crud(UserCrudInput::new(
                UserCrudAction::CreateUser,
                json!({ "name": "Taro", "email": "taro@example.com" }),
            ))
            .await?,
        ),
        (
            "UpdateUser".into(),
            kits.crud(UserCrudInput::new(
                UserCrudAction::UpdateUser,
                json!({ "id": "42" }),
            ))
            .await?,
        ),
        (
            "DeleteUser".into(),
            kits.crud(UserCrudInput::new(
                UserCrudAction::DeleteUser,
                json!({ "id": "42" }),
            ))
            .await?,
        ),
        (
            "ById".into(),
            kits.search(UserSearchForm::by_id("u100")).await?,
        ),
        (
            "ByEmail".into(),
            kits.search(UserSearchForm::by_email("a@b.com")).await?,
        ),
        (
            "ByKeyword".into(),
            kits.search(UserSearchForm::by_keyword("tokyo")).await?,
        ),
        ("All".into(), kits.search(UserSearchForm::default()).await?),
        (
            "summary".into(),
            kits.view(UsersViewInput::new(UsersViewMode::Summary).with_params(json!({ "page": 1 })))
                .await?,
        ),
        (
            "detail".into(),
            kits.view(
                UsersViewInput::new(UsersViewMode::Detail)
                    .with_params(json!({ "includeRoles": true, "page": 1 })),
            )
            .await?,
        ),
        (
            "csv".into(),
            kits.view(UsersViewInput::new(UsersViewMode::Csv).with_params(json!({ "page": 1 })))
                .await?,
        ),
    ])
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
