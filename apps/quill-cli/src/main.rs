//! Quill CLI
//!
//! Terminal front end for the blog API.
//!
//! ```bash
//! quill list
//! quill add-category Tech
//! quill create --title "Hello World" --content 1234567890 --author Ann --category <id>
//! quill edit <id> --published true
//! quill delete <id>
//! ```

mod terminal;

use std::process;

use clap::{Parser, Subcommand};
use quill_client::ApiClient;
use quill_client::pages::{FormMode, PostFormPage, PostListPage, SinglePostPage};
use quill_shared::dto::CreateCategoryRequest;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalNavigator;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Read and manage Quill blog posts", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the API server
    #[arg(long, env = "QUILL_API_URL", default_value = "http://127.0.0.1:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Post fields accepted by `create` and `edit`.
#[derive(clap::Args)]
struct PostFields {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    content: Option<String>,

    #[arg(long)]
    author: Option<String>,

    /// Category id
    #[arg(long)]
    category: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    published: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts
    List,

    /// Show one post
    Show {
        #[arg(value_name = "POST_ID")]
        id: String,
    },

    /// Create a post
    Create {
        #[command(flatten)]
        fields: PostFields,
    },

    /// Edit a post; omitted fields keep their current value
    Edit {
        #[arg(value_name = "POST_ID")]
        id: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Delete a post
    Delete {
        #[arg(value_name = "POST_ID")]
        id: String,
    },

    /// List categories
    Categories,

    /// Create a category
    AddCategory {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(cli.api_url);
    tracing::debug!(api = %api.base_url(), "Using API");

    let ok = match cli.command {
        Commands::List => {
            let page = PostListPage::load(&api).await;
            println!("{}", page.render());
            page.state.ready().is_some()
        }
        Commands::Show { id } => {
            let page = SinglePostPage::load(&api, &id, None).await;
            println!("{}", page.render());
            page.state.ready().is_some()
        }
        Commands::Create { fields } => submit_form(&api, FormMode::Create, fields).await,
        Commands::Edit { id, fields } => submit_form(&api, FormMode::Edit(id), fields).await,
        Commands::Delete { id } => {
            let page = SinglePostPage::load(&api, &id, None).await;
            if page.state.ready().is_none() {
                println!("{}", page.render());
                false
            } else {
                let mut nav = TerminalNavigator::default();
                let deleted = page.delete(&api, &mut nav).await.is_ok();
                println!("{}", nav.render_current(&api).await);
                deleted
            }
        }
        Commands::Categories => match api.list_categories().await {
            Ok(categories) if categories.is_empty() => {
                println!("No categories found.");
                true
            }
            Ok(categories) => {
                for category in categories {
                    println!("{} ({})", category.name, category.id);
                }
                true
            }
            Err(e) => {
                println!("Error: {}", e);
                false
            }
        },
        Commands::AddCategory { name } => {
            match api.create_category(&CreateCategoryRequest { name }).await {
                Ok(category) => {
                    println!("Created category {} ({})", category.name, category.id);
                    true
                }
                Err(e) => {
                    println!("Failed to create category: {}", e);
                    false
                }
            }
        }
    };

    if !ok {
        process::exit(1);
    }
}

/// Fill the post form from flags, submit it, and show where it lands.
async fn submit_form(api: &ApiClient, mode: FormMode, fields: PostFields) -> bool {
    let mut page = PostFormPage::load(api, mode).await;
    if page.state.ready().is_none() {
        println!("{}", page.render());
        return false;
    }

    let texts = [
        ("title", fields.title),
        ("content", fields.content),
        ("author", fields.author),
        ("category", fields.category),
        ("tags", fields.tags),
    ];
    for (field, value) in texts {
        if let Some(value) = value {
            page.set_text(field, value);
        }
    }
    if let Some(published) = fields.published {
        page.set_published(published);
    }

    let mut nav = TerminalNavigator::default();
    if !page.submit(api, &mut nav).await {
        println!("{}", page.render());
        return false;
    }

    println!("{}", nav.render_current(api).await);
    true
}
