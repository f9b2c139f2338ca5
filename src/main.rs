//! natview CLI — terminal presentation layer over the catalog engine.
//!
//! The binary only wires commands to the engine's entry points and paints
//! the returned text; filtering, grouping, batching, and signature
//! synthesis all live in the library.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use natview::client::ApiClient;
use natview::model::load_catalog_file;
use natview::{
    ApiSet, App, DetailView, Dialect, DisplaySettings, FilterState, Native, NamingConvention, Row,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "natview",
    about = "Browse a native function database and render call signatures"
)]
struct Cli {
    /// Backend API base URL (e.g. http://127.0.0.1:58080)
    #[arg(long)]
    api: Option<String>,

    /// Local catalog JSON file (same shape as the bulk listing endpoint)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Settings file. Defaults to $NATVIEW_SETTINGS, then the user config
    /// directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog entries, grouped by namespace
    List {
        /// Search query (matches name, hash, and name without underscores)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Filter by API set: client, server, shared, or all
        #[arg(long, default_value = "all")]
        apiset: String,

        /// Filter by namespace ("all" disables the check)
        #[arg(long, default_value = "all")]
        namespace: String,

        /// Number of 100-entry batches to materialize (0 = everything)
        #[arg(long, default_value_t = 1)]
        batches: usize,
    },

    /// Show one native's detail and synthesized signature
    Show {
        /// Hash or name
        id: String,

        /// Presentation dialect override: raw, lua, js, csharp
        #[arg(long)]
        dialect: Option<String>,

        /// Naming convention override: raw, alternate
        #[arg(long)]
        naming: Option<String>,

        /// Also fetch attached source code (requires --api)
        #[arg(long)]
        source: bool,

        /// Also fetch attached example snippets (requires --api)
        #[arg(long)]
        examples: bool,
    },

    /// List every namespace in the catalog
    Namespaces,

    /// Show or update the persisted display settings
    Config {
        /// Presentation dialect: raw, lua, js, csharp
        #[arg(long)]
        dialect: Option<String>,

        /// Naming convention: raw, alternate
        #[arg(long)]
        naming: Option<String>,

        /// Color scheme key (persisted for the presentation layer)
        #[arg(long)]
        color_scheme: Option<String>,

        /// Code highlight theme key
        #[arg(long)]
        code_theme: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(DisplaySettings::default_path);
    let settings = DisplaySettings::load(&settings_path);

    match &cli.command {
        Command::Config {
            dialect,
            naming,
            color_scheme,
            code_theme,
        } => config_mode(
            settings,
            &settings_path,
            dialect.as_deref(),
            naming.as_deref(),
            color_scheme.clone(),
            code_theme.clone(),
        ),
        Command::List {
            query,
            apiset,
            namespace,
            batches,
        } => {
            let app = App::new(load_catalog(&cli)?, settings);
            list_mode(app, query, apiset, namespace, *batches)
        }
        Command::Show {
            id,
            dialect,
            naming,
            source,
            examples,
        } => {
            let app = App::new(load_catalog(&cli)?, settings);
            show_mode(
                app,
                &cli,
                id,
                dialect.as_deref(),
                naming.as_deref(),
                *source,
                *examples,
            )
        }
        Command::Namespaces => {
            let app = App::new(load_catalog(&cli)?, settings);
            for namespace in app.catalog().namespaces() {
                println!("{}", namespace);
            }
            Ok(())
        }
    }
}

/// Load the descriptor set from a local file or the backend listing
/// endpoint; a file takes precedence.
fn load_catalog(cli: &Cli) -> Result<Vec<Native>> {
    if let Some(path) = &cli.file {
        return load_catalog_file(path);
    }
    if let Some(base) = &cli.api {
        let natives = ApiClient::new(base)
            .natives()
            .context("failed to load the native catalog")?;
        eprintln!("loaded {} natives", natives.len());
        return Ok(natives);
    }
    bail!("no catalog source: pass --file or --api");
}

fn parse_apiset(s: &str) -> Result<Option<ApiSet>> {
    if s == "all" {
        return Ok(None);
    }
    s.parse::<ApiSet>().map(Some).map_err(|e| anyhow!(e))
}

fn list_mode(
    mut app: App,
    query: &str,
    apiset: &str,
    namespace: &str,
    batches: usize,
) -> Result<()> {
    app.set_filter(FilterState {
        query: query.to_string(),
        apiset: parse_apiset(apiset)?,
        namespace: if namespace == "all" {
            None
        } else {
            Some(namespace.to_string())
        },
    });

    // The first batch came with the filter; materialize the rest on the
    // caller's behalf (the interactive host would do this per scroll).
    if batches == 0 {
        while app.render_next_batch() > 0 {}
    } else {
        for _ in 1..batches {
            if app.render_next_batch() == 0 {
                break;
            }
        }
    }

    if app.view().rows().is_empty() {
        println!("No matching natives.");
        return Ok(());
    }

    for row in app.view().rows() {
        match row {
            Row::Header(namespace) => println!("{}", namespace),
            Row::Native(row) => {
                let mut markers = String::new();
                if row.source_available {
                    markers.push_str(" [source]");
                }
                if row.example_available {
                    markers.push_str(" [example]");
                }
                println!(
                    "  {} {}({}){}",
                    row.return_type,
                    row.name,
                    row.params.join(", "),
                    markers
                );
            }
        }
    }

    if !app.view().exhausted() {
        eprintln!(
            "{} of {} entries shown; raise --batches to load more",
            app.view().rows().len(),
            app.view().total()
        );
    }
    Ok(())
}

fn show_mode(
    mut app: App,
    cli: &Cli,
    id: &str,
    dialect: Option<&str>,
    naming: Option<&str>,
    source: bool,
    examples: bool,
) -> Result<()> {
    // Per-invocation overrides go through the same commit path a settings
    // dialog would use.
    if dialect.is_some() || naming.is_some() {
        let mut settings = app.settings().clone();
        if let Some(d) = dialect {
            settings.dialect = d.parse::<Dialect>().map_err(|e| anyhow!(e))?;
        }
        if let Some(n) = naming {
            settings.naming = n.parse::<NamingConvention>().map_err(|e| anyhow!(e))?;
        }
        let _ = app.on_settings_committed(settings);
    }

    let hash = match app.catalog().resolve(id) {
        Some(native) => native.hash.clone(),
        None => bail!("native not found: {}", id),
    };

    let (local, ticket) = app
        .select(&hash)
        .ok_or_else(|| anyhow!("native not found: {}", id))?;

    // Enrich from the detail endpoint when a backend is available; on
    // failure keep the locally-rendered view.
    let view = match cli.api.as_deref().map(ApiClient::new) {
        Some(client) => match client.detail(&hash) {
            Ok(resp) => app.apply_detail(ticket, &resp).unwrap_or(local),
            Err(err) => {
                app.detail_failed(ticket, err.to_string());
                eprintln!("warning: detail fetch failed: {}", err);
                local
            }
        },
        None => local,
    };

    print_detail(&view);

    if source || examples {
        let Some(base) = cli.api.as_deref() else {
            eprintln!("warning: --source/--examples require --api");
            return Ok(());
        };
        let client = ApiClient::new(base);
        if source {
            print_source(&client, &hash);
        }
        if examples {
            print_examples(&client, &hash);
        }
    }
    Ok(())
}

fn print_detail(view: &DetailView) {
    println!("{} ({})", view.name, view.hash);
    if let Some(jhash) = &view.jhash {
        println!("jhash: {}", jhash);
    }
    println!(
        "namespace: {}  apiset: {}",
        view.namespace,
        view.apiset.as_str()
    );
    println!();
    println!("{}", view.signature.text);
    if !view.params.is_empty() {
        println!();
        println!("Parameters:");
        for param in &view.params {
            let description = if param.description_cn.is_empty() {
                &param.description
            } else {
                &param.description_cn
            };
            if description.is_empty() {
                println!("  {} {}", param.ty, param.name);
            } else {
                println!("  {} {}: {}", param.ty, param.name, description);
            }
        }
    }
    println!();
    println!("{}", view.description);
}

fn print_source(client: &ApiClient, hash: &str) {
    println!();
    match client.source(hash) {
        Ok(Some(source)) => {
            println!("Source ({}, {}):", source.language, source.source_type);
            println!("{}", source.content);
        }
        Ok(None) => println!("No source recorded for this native."),
        Err(err) => eprintln!("warning: source fetch failed: {}", err),
    }
}

fn print_examples(client: &ApiClient, hash: &str) {
    println!();
    match client.examples(hash) {
        Ok(examples) if examples.is_empty() => {
            println!("No examples recorded for this native.");
        }
        Ok(examples) => {
            for example in examples {
                println!("Example ({}):", example.language);
                println!("{}", example.code);
            }
        }
        Err(err) => eprintln!("warning: example fetch failed: {}", err),
    }
}

fn config_mode(
    mut settings: DisplaySettings,
    path: &std::path::Path,
    dialect: Option<&str>,
    naming: Option<&str>,
    color_scheme: Option<String>,
    code_theme: Option<String>,
) -> Result<()> {
    let updating =
        dialect.is_some() || naming.is_some() || color_scheme.is_some() || code_theme.is_some();

    if let Some(d) = dialect {
        settings.dialect = d.parse::<Dialect>().map_err(|e| anyhow!(e))?;
    }
    if let Some(n) = naming {
        settings.naming = n.parse::<NamingConvention>().map_err(|e| anyhow!(e))?;
    }
    if let Some(scheme) = color_scheme {
        settings.color_scheme = scheme;
    }
    if let Some(theme) = code_theme {
        settings.code_theme = theme;
    }

    if updating {
        settings.save(path)?;
    }
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
