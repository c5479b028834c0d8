//! rbacctl - inspect and exercise the RBAC core from the command line
//!
//! Every command runs against a freshly seeded in-memory system and prints JSON.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use rbac_core::utils::init_logging;
use rbac_core::{Actor, AuthorizationDecision, Config, InMemoryActorDirectory, RbacSystem};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "rbacctl", version, about = "Role-based access control toolkit")]
struct Cli {
    /// YAML configuration file; the environment is used when omitted
    #[arg(short, long, env = "RBAC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog permissions
    Permissions {
        #[arg(long, conflicts_with = "resource")]
        category: Option<String>,
        #[arg(long)]
        resource: Option<String>,
    },
    /// List roles by ascending priority
    Roles {
        #[arg(long)]
        include_inactive: bool,
    },
    /// Resolve the permissions granted by a role
    RolePermissions { role: String },
    /// Check whether a role holds every listed permission
    Check {
        #[arg(long)]
        role: String,
        #[arg(required = true)]
        permissions: Vec<String>,
    },
    /// Run the hierarchy guard for one actor modifying another
    Guard {
        #[arg(long)]
        actor_role: String,
        #[arg(long)]
        target_role: String,
        #[arg(long)]
        proposed: Option<String>,
        /// Target the acting actor itself
        #[arg(long)]
        same_actor: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a command; `Ok(false)` means the request was denied
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    init_logging(&config.logging)?;

    match cli.command {
        Command::Permissions { category, resource } => {
            let rbac = seeded(&config, InMemoryActorDirectory::new()).await?;
            let catalog = rbac.catalog();
            let permissions = match (category, resource) {
                (Some(category), _) => catalog.find_by_category(&category).await?,
                (None, Some(resource)) => catalog.find_by_resource(&resource).await?,
                (None, None) => catalog.find_all().await?,
            };
            print_json(&permissions)?;
            Ok(true)
        }
        Command::Roles { include_inactive } => {
            let rbac = seeded(&config, InMemoryActorDirectory::new()).await?;
            print_json(&rbac.roles().list_all(include_inactive).await?)?;
            Ok(true)
        }
        Command::RolePermissions { role } => {
            let rbac = seeded(&config, InMemoryActorDirectory::new()).await?;
            if rbac.roles().find_by_name(&role).await?.is_none() {
                anyhow::bail!("Role '{}' not found", role);
            }
            print_json(&rbac.roles().resolve_permissions(&role).await?)?;
            Ok(true)
        }
        Command::Check { role, permissions } => {
            let rbac = seeded(&config, InMemoryActorDirectory::new()).await?;
            let actor = Actor::new(Uuid::new_v4().to_string(), role);
            let decision = rbac.authorize(Some(&actor), permissions.as_slice()).await?;
            print_decision(&decision)?;
            Ok(decision.allowed)
        }
        Command::Guard {
            actor_role,
            target_role,
            proposed,
            same_actor,
        } => {
            let actor = Actor::new(Uuid::new_v4().to_string(), actor_role);
            let target = if same_actor {
                actor.clone()
            } else {
                Actor::new(Uuid::new_v4().to_string(), target_role)
            };
            let directory = InMemoryActorDirectory::with_actors([actor.clone(), target.clone()]);
            let rbac = seeded(&config, directory).await?;

            let decision = match rbac
                .guard_hierarchy_change(&actor, &target.id, proposed.as_deref())
                .await
            {
                Ok(()) => AuthorizationDecision::allow(),
                Err(e) if e.is_client_error() => AuthorizationDecision::deny(e.to_string()),
                Err(e) => return Err(e.into()),
            };
            print_decision(&decision)?;
            Ok(decision.allowed)
        }
    }
}

async fn seeded(config: &Config, actors: InMemoryActorDirectory) -> anyhow::Result<RbacSystem> {
    Ok(RbacSystem::in_memory(&config.rbac, Arc::new(actors)).await?)
}

fn print_decision(decision: &AuthorizationDecision) -> anyhow::Result<()> {
    print_json(&json!({
        "allowed": decision.allowed,
        "reason": decision.reason,
    }))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
