//! Command-line front end
//!
//! One invocation handles one request: the store is opened and initialized
//! once, the command runs, the process exits.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use prodtrack_report::ReportingView;
use prodtrack_store::async_wrapper::with_store;
use prodtrack_store::{NewProductionEvent, RecordStore, ReportOrder, SystemClock};

use crate::config::AppConfig;
use crate::render;
use crate::stages::{Screen, resolve_stage};

/// Production tracking: material intake, stage records, report and export.
#[derive(Debug, Parser)]
#[command(name = "prodtrack", version)]
pub struct Cli {
    /// Config file (defaults to $PRODTRACK_CONFIG or ~/.config/prodtrack/prodtrack.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding `store.db_path`
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database tables if they do not exist
    Init,

    /// Raw material intake
    #[command(subcommand)]
    Material(MaterialCommand),

    /// Production records per stage
    #[command(subcommand)]
    Producao(ProducaoCommand),

    /// Every production record in chronological order
    Relatorio {
        /// Override `store.report_order`
        #[arg(long, value_parser = parse_order)]
        order: Option<ReportOrder>,
    },

    /// Write the production report as a spreadsheet
    Exportar {
        /// Target directory (defaults to the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum MaterialCommand {
    /// Record a material intake, then list all intakes
    Add {
        #[arg(long)]
        material: String,
        #[arg(long)]
        cor: String,
    },
    /// List material intakes, newest first
    List,
}

#[derive(Debug, Subcommand)]
enum ProducaoCommand {
    /// Record a production event under any stage, then list that stage
    Add(ProducaoArgs),
    /// List one stage, newest first
    List {
        /// Stage, matched exactly as typed
        etapa: String,
    },
    /// Cutting screen (stage CORTE)
    #[command(subcommand)]
    Corte(ScreenCommand),
    /// Sewing intake screen (stage COSTURA_ENTRADA)
    #[command(subcommand)]
    CosturaEntrada(ScreenCommand),
    /// Sewing output screen (stage COSTURA_SAIDA)
    #[command(subcommand)]
    CosturaSaida(ScreenCommand),
}

#[derive(Debug, Subcommand)]
enum ScreenCommand {
    /// Record a production event on this screen, then list it
    Add(RecordArgs),
    /// List this screen, newest first
    List,
}

#[derive(Debug, Args)]
struct ProducaoArgs {
    /// Stage, stored exactly as typed
    etapa: String,
    #[command(flatten)]
    record: RecordArgs,
}

#[derive(Debug, Args)]
struct RecordArgs {
    #[arg(long)]
    pedido: String,
    #[arg(long)]
    modelo: String,
    #[arg(long)]
    cor: String,
    #[arg(long, allow_negative_numbers = true)]
    quantidade: i64,
}

impl ScreenCommand {
    fn split(self, screen: Screen) -> (String, Option<RecordArgs>) {
        let stage = screen.stage().to_string();
        match self {
            Self::Add(record) => (stage, Some(record)),
            Self::List => (stage, None),
        }
    }
}

impl RecordArgs {
    fn into_event(self, stage: String) -> NewProductionEvent {
        NewProductionEvent::new(self.pedido, self.modelo, self.cor, self.quantidade, stage)
    }
}

fn parse_order(s: &str) -> std::result::Result<ReportOrder, String> {
    ReportOrder::parse(s).ok_or_else(|| format!("expected asc or desc, got {s:?}"))
}

impl Cli {
    pub async fn run(self, out: &mut dyn Write) -> Result<()> {
        let mut cfg = AppConfig::load(self.config.as_deref())?;
        if let Some(path) = &self.database {
            cfg.store.db_path = path.to_string_lossy().into_owned();
        }

        let store = Arc::new(
            RecordStore::connect(&cfg.store, Arc::new(SystemClock))
                .context("failed to open record store")?,
        );
        with_store(&store, RecordStore::initialize)
            .await
            .context("failed to initialize record store")?;

        match self.cmd {
            Command::Init => {
                writeln!(out, "database ready at {}", store.db_path().display())?;
            }
            Command::Material(MaterialCommand::Add { material, cor }) => {
                with_store(&store, move |s| s.insert_material_intake(&material, &cor)).await?;
                list_materials(&store, out).await?;
            }
            Command::Material(MaterialCommand::List) => {
                list_materials(&store, out).await?;
            }
            Command::Producao(cmd) => {
                let (stage, record) = match cmd {
                    ProducaoCommand::Add(args) => {
                        (resolve_stage(&args.etapa, cfg.stages.policy)?, Some(args.record))
                    }
                    ProducaoCommand::List { etapa } => {
                        (resolve_stage(&etapa, cfg.stages.policy)?, None)
                    }
                    ProducaoCommand::Corte(screen) => screen.split(Screen::Corte),
                    ProducaoCommand::CosturaEntrada(screen) => {
                        screen.split(Screen::CosturaEntrada)
                    }
                    ProducaoCommand::CosturaSaida(screen) => screen.split(Screen::CosturaSaida),
                };
                if let Some(record) = record {
                    let event = record.into_event(stage.clone());
                    with_store(&store, move |s| s.insert_production_event(&event)).await?;
                }
                list_stage(&store, stage, out).await?;
            }
            Command::Relatorio { order } => {
                let view = ReportingView::new(store, cfg.store.report_order, cfg.export)
                    .with_order(order.unwrap_or(cfg.store.report_order));
                let rows = tokio::task::spawn_blocking(move || view.build_report())
                    .await
                    .context("report task failed")??;
                render::production(out, &rows)?;
            }
            Command::Exportar { output } => {
                let dir = match output {
                    Some(dir) => dir,
                    None => std::env::current_dir().context("no current directory")?,
                };
                let view = ReportingView::new(store, cfg.store.report_order, cfg.export);
                let path = tokio::task::spawn_blocking(move || view.export_to_dir(&dir))
                    .await
                    .context("export task failed")??;
                writeln!(out, "{}", path.display())?;
            }
        }
        Ok(())
    }
}

async fn list_materials(store: &Arc<RecordStore>, out: &mut dyn Write) -> Result<()> {
    let rows = with_store(store, RecordStore::list_material_intakes).await?;
    render::materials(out, &rows)?;
    Ok(())
}

async fn list_stage(store: &Arc<RecordStore>, stage: String, out: &mut dyn Write) -> Result<()> {
    let rows = with_store(store, move |s| s.list_production_events_by_stage(&stage)).await?;
    render::production(out, &rows)?;
    Ok(())
}
