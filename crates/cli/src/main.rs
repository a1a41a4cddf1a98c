//! `yuletree` -- command-line driver for the tree engine.
//!
//! Exercises the configuration, gallery and decorate flows against a live
//! backend.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                     | Description                    |
//! |-------------------------|----------|-----------------------------|--------------------------------|
//! | `YULETREE_API_URL`      | no       | `http://localhost:8070/api` | REST base URL                  |
//! | `YULETREE_IMAGE_HOST`   | no       | `http://localhost:8070`     | Host serving `/images/...`     |
//! | `YULETREE_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout            |
//! | `YULETREE_TOKEN`        | yes*     | --                          | Access token (or `--token`)    |

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yuletree_client::config_manager::TreeConfigManager;
use yuletree_client::decorate::{DecorateSession, SubmitOutcome};
use yuletree_client::gallery::{GalleryLoad, GalleryLoader};
use yuletree_client::resolver::AssetResolver;
use yuletree_client::{Backend, ClientConfig, HttpBackend};
use yuletree_core::assets::AssetCategory;
use yuletree_core::error::{CoreError, Notice};
use yuletree_core::ownership::{PostReveal, PrimaryAction};
use yuletree_core::routing::{entry_route, Route, TreeTarget};
use yuletree_core::session::Session;
use yuletree_core::tree_config::TreeConfiguration;
use yuletree_core::types::{PostId, UserId};

#[derive(Parser)]
#[command(name = "yuletree", about = "Compose trees and hang decorations")]
struct Cli {
    /// Access token; overrides `YULETREE_TOKEN`.
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in user and where they would land.
    Whoami,
    /// List asset names of one category (backs, trees, points, posts).
    Catalog {
        #[arg(value_parser = parse_category)]
        category: AssetCategory,
    },
    /// Save the caller's three-layer tree.
    Configure {
        #[arg(long)]
        background: String,
        #[arg(long)]
        tree: String,
        #[arg(long)]
        point: String,
    },
    /// Render one page of a tree. Defaults to the caller's own.
    Show {
        #[arg(long)]
        tree: Option<UserId>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Open a letter on a tree.
    Open {
        #[arg(long)]
        tree: Option<UserId>,
        #[arg(long)]
        post: PostId,
    },
    /// Hang a decoration with a letter on someone's tree.
    Decorate {
        #[arg(long)]
        tree: UserId,
        #[arg(long)]
        decoration: String,
        #[arg(long)]
        message: String,
    },
}

fn parse_category(s: &str) -> Result<AssetCategory, String> {
    AssetCategory::from_path(s).map_err(|e| e.to_string())
}

fn target(tree: Option<UserId>) -> TreeTarget {
    tree.map_or(TreeTarget::Mine, TreeTarget::Owner)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yuletree_cli=info,yuletree_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Invalid client configuration")?;

    let token = cli
        .token
        .or_else(|| config.token.clone())
        .context("No access token: set YULETREE_TOKEN or pass --token")?;
    let session = Session::acquire(token)?;

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_config(&config)?);
    let resolver = AssetResolver::new(Arc::clone(&backend), config.image_host());

    tracing::debug!(api_url = %config.api_url, "Starting yuletree");

    if let Err(e) = run(cli.command, &session, backend, resolver).await {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(
    command: Command,
    session: &Session,
    backend: Arc<dyn Backend>,
    resolver: AssetResolver,
) -> Result<(), CoreError> {
    match command {
        Command::Whoami => {
            let profile = backend.current_user(session).await?;
            let own = backend.tree(session, TreeTarget::Mine).await?;
            println!("{} (id {})", profile.nickname, profile.id);
            println!("landing: {:?}", entry_route(&own.configuration));
        }

        Command::Catalog { category } => {
            for name in resolver.list_catalog(session, category).await? {
                println!("{name}\t{}", resolver.resolve_url(&name, category));
            }
        }

        Command::Configure {
            background,
            tree,
            point,
        } => {
            let manager = TreeConfigManager::new(backend, resolver);
            let config = TreeConfiguration::new(background, tree, point);
            let resolved = manager.save(session, &config).await?;
            println!(
                "saved: background={} tree={} point={}",
                resolved.background, resolved.tree, resolved.tree_point
            );
        }

        Command::Show { tree, page } => {
            let loader = GalleryLoader::new(backend, resolver.images().clone());
            let mut gallery = match loader.load(session, target(tree)).await? {
                GalleryLoad::Ready(gallery) => gallery,
                GalleryLoad::Redirect(route) => {
                    println!("redirect: {route:?}");
                    return Ok(());
                }
            };
            while gallery.pager().current() < page && gallery.pager().has_next() {
                gallery.next_page();
            }

            println!("{}", gallery.title());
            let layers = gallery.layer_urls();
            for (label, url) in [
                ("background", layers.background),
                ("tree", layers.tree),
                ("point", layers.point),
            ] {
                println!("  {label:<10} {}", url.as_deref().unwrap_or("-"));
            }
            println!("page {}", gallery.pager().indicator());
            for placement in gallery.current_placements() {
                println!(
                    "  #{:<4} ({:>3},{:>3}) {:<8} {}",
                    placement.post.id,
                    placement.position.x,
                    placement.position.y,
                    placement.post.sender_display(),
                    gallery.decoration_url(placement.post),
                );
            }
            match gallery.primary_action() {
                PrimaryAction::Share => println!("share this tree with your friends"),
                PrimaryAction::Decorate { tree_id } => {
                    println!("decorate: yuletree decorate --tree {tree_id} ...")
                }
            }
        }

        Command::Open { tree, post } => {
            let loader = GalleryLoader::new(backend, resolver.images().clone());
            let GalleryLoad::Ready(gallery) = loader.load(session, target(tree)).await? else {
                return Err(CoreError::Validation(
                    "Configure your tree before reading letters".to_string(),
                ));
            };
            match gallery.open_post(post) {
                Some(PostReveal::Revealed {
                    sender, content, ..
                }) => println!("From {sender}:\n\n{content}"),
                Some(other) => println!("{}", other.notice().unwrap_or_default()),
                None => println!("No decoration with id {post} on this tree."),
            }
        }

        Command::Decorate {
            tree,
            decoration,
            message,
        } => {
            let mut decorate = DecorateSession::start(backend, resolver, session, tree).await?;
            let wizard = decorate.wizard_mut();
            wizard.select_decoration(decoration)?;
            wizard.advance()?;
            wizard.input_content(message)?;
            let receiver = wizard.receiver_nickname().to_string();

            let outcome = decorate.submit(session).await;
            match &outcome {
                SubmitOutcome::Sent(route) => {
                    println!("Sent to {receiver}. Next: {route:?}");
                }
                SubmitOutcome::Rejected(notice) => {
                    tracing::error!(tree, "Decoration was not sent");
                    print_notice(notice);
                }
            }
            let code = exit_code(&outcome);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
    Ok(())
}

/// Process exit status for a submit attempt.
fn exit_code(outcome: &SubmitOutcome) -> i32 {
    match outcome {
        SubmitOutcome::Sent(_) => 0,
        SubmitOutcome::Rejected(_) => 1,
    }
}

fn report(error: &CoreError) {
    tracing::error!(error = %error, "Command failed");
    print_notice(&error.notice());
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Redirect(Route::Login) => eprintln!("Please sign in again."),
        Notice::Redirect(route) => eprintln!("Continue at {route:?}"),
        Notice::Inline(msg) | Notice::Alert(msg) => eprintln!("{msg}"),
    }
}
