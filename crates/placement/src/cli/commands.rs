//! # CLI Layer
//!
//! This module is **one possible UI client** for placement. It is the only
//! place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the `tracing` subscriber
//! - Decides where records come from (demo data or a JSON file)
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: `setup.rs` turns shell arguments into [`Commands`]
//! 2. **Context Setup**: configuration, the acting [`Session`] and a data source
//! 3. **Dispatch**: each family command runs against a `ListController` for
//!    the chosen family
//! 4. **Output**: tables and records go to stdout, notices to stderr

use super::render::{render_fields, render_page, render_record, render_summary, ConsoleNotifier};
use super::setup::{Cli, Commands, Family, ReviewAction};
use anyhow::{bail, Context as _, Result};
use clap::Parser;
use placementapp::config::{global_config_path, PlacementConfig, CONFIG_FILE_NAME};
use placementapp::export::CsvExporter;
use placementapp::fields::FormValues;
use placementapp::notify::{Notice, Notifier};
use placementapp::records::{
    demo, Application, Company, Cycle, Intern, InternshipPost, Report, Student, Workshop,
};
use placementapp::session::Session;
use placementapp::store::{DataSource, JsonFileSource, MockDataSource};
use placementapp::view::{PageRequest, SortState};
use placementapp::{ListController, Record, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A record family the CLI can open, together with its demo records.
pub trait FamilyRecord: Record + Serialize + DeserializeOwned + 'static {
    fn demo() -> Vec<Self>;
}

macro_rules! family_record {
    ($($record:ty => $demo:path),+ $(,)?) => {
        $(
            impl FamilyRecord for $record {
                fn demo() -> Vec<Self> {
                    $demo()
                }
            }
        )+
    };
}

family_record! {
    Application => demo::applications,
    InternshipPost => demo::posts,
    Intern => demo::interns,
    Report => demo::reports,
    Company => demo::companies,
    Student => demo::students,
    Workshop => demo::workshops,
    Cycle => demo::cycles,
}

type Controller<R> = ListController<R, Box<dyn DataSource<R>>>;

struct Context {
    config: PlacementConfig,
    session: Session,
}

impl Context {
    fn is_demo(&self) -> bool {
        self.config.data_file.is_none()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = PlacementConfig::load()?;
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    let ctx = Context {
        config,
        session: Session::new(cli.user, cli.role),
    };
    debug!(
        user = %ctx.session.user_name,
        role = %ctx.session.role,
        data_file = ?ctx.config.data_file,
        "starting"
    );

    match cli.command.family() {
        Some(Family::Applications) => run_family::<Application>(&ctx, cli.command),
        Some(Family::Posts) => run_family::<InternshipPost>(&ctx, cli.command),
        Some(Family::Interns) => run_family::<Intern>(&ctx, cli.command),
        Some(Family::Reports) => run_family::<Report>(&ctx, cli.command),
        Some(Family::Companies) => run_family::<Company>(&ctx, cli.command),
        Some(Family::Students) => run_family::<Student>(&ctx, cli.command),
        Some(Family::Workshops) => run_family::<Workshop>(&ctx, cli.command),
        Some(Family::Cycles) => run_family::<Cycle>(&ctx, cli.command),
        None => run_global(&ctx, cli.command),
    }
}

/// `RUST_LOG` decides the level, `warn` without it; `-v` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl Commands {
    /// The family a command works on; `None` for commands that are not
    /// about one family's list.
    fn family(&self) -> Option<Family> {
        match self {
            Commands::List { family, .. }
            | Commands::Show { family, .. }
            | Commands::Create { family, .. }
            | Commands::Edit { family, .. }
            | Commands::Delete { family, .. }
            | Commands::Summary { family, .. }
            | Commands::Fields { family } => Some(*family),
            Commands::Review { .. } | Commands::Config { .. } => None,
        }
    }
}

fn open_source<R: FamilyRecord>(ctx: &Context) -> Box<dyn DataSource<R>> {
    match &ctx.config.data_file {
        Some(path) => {
            debug!(path = %path.display(), family = R::config().family, "using JSON data file");
            Box::new(JsonFileSource::new(path.clone()))
        }
        None => {
            debug!(family = R::config().family, "using demo records");
            Box::new(MockDataSource::new(R::demo()).with_latency(ctx.config.latency()))
        }
    }
}

fn open_controller<R: FamilyRecord>(ctx: &Context) -> Result<Controller<R>> {
    let mut controller =
        ListController::new(ctx.session.clone(), ConsoleNotifier, open_source::<R>(ctx))
            .with_notice_duration(ctx.config.notice_duration());
    controller
        .load()
        .with_context(|| format!("could not load {}", R::config().family))?;
    Ok(controller)
}

fn run_family<R: FamilyRecord>(ctx: &Context, command: Commands) -> Result<()> {
    let family = R::config().family;
    match command {
        Commands::List {
            search,
            filter,
            sort,
            desc,
            page,
            per_page,
            ..
        } => {
            let mut controller = open_controller::<R>(ctx)?;
            if let Some(search) = search {
                controller.set_search(search);
            }
            for (field, value) in filter {
                check_field::<R>(&field, "filterable", |spec| spec.filterable)?;
                controller.set_filter(field, &value);
            }
            if let Some(key) = sort {
                check_field::<R>(&key, "sortable", |spec| spec.sortable)?;
                controller.set_sort(Some(if desc {
                    SortState::descending(key)
                } else {
                    SortState::ascending(key)
                }));
            }
            let per_page = per_page.unwrap_or(ctx.config.page_size);
            print!("{}", render_page(&controller.page(PageRequest::new(page, per_page))));
        }
        Commands::Show { id, .. } => {
            let controller = open_controller::<R>(ctx)?;
            let record = find(&controller, id)?;
            print!("{}", render_record(record));
        }
        Commands::Create { set, .. } => {
            let mut controller = open_controller::<R>(ctx)?;
            controller.open_create();
            let id = submit_form(&mut controller, set)?;
            println!("Created {family} #{id}");
            print!("{}", render_record(find(&controller, id)?));
            demo_hint(ctx);
        }
        Commands::Edit { id, set, .. } => {
            let mut controller = open_controller::<R>(ctx)?;
            controller.open_edit(id)?;
            let id = submit_form(&mut controller, set)?;
            println!("Updated {family} #{id}");
            print!("{}", render_record(find(&controller, id)?));
            demo_hint(ctx);
        }
        Commands::Delete { id, .. } => {
            let mut controller = open_controller::<R>(ctx)?;
            if controller.delete(id)? {
                println!("Deleted {family} #{id}");
                demo_hint(ctx);
            } else {
                println!("Nothing to delete: {family} #{id} does not exist");
            }
        }
        Commands::Summary { csv, .. } => {
            let controller = open_controller::<R>(ctx)?;
            print!("{}", render_summary(&controller.summary()));
            if let Some(target) = csv {
                let blob = controller.export(&CsvExporter)?;
                let written = blob
                    .write_to(&target)
                    .with_context(|| format!("could not write {}", target.display()))?;
                println!("Exported to {}", written.display());
            }
        }
        Commands::Fields { .. } => print!("{}", render_fields(R::config())),
        command @ (Commands::Review { .. } | Commands::Config { .. }) => {
            return run_global(ctx, command)
        }
    }
    Ok(())
}

fn run_global(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Review { id, action, reason } => review(ctx, id, action, reason.as_deref()),
        Commands::Config { template } => show_config(&ctx.config, template),
        other => bail!("{other:?} needs a record family"),
    }
}

fn review(ctx: &Context, id: RecordId, action: ReviewAction, reason: Option<&str>) -> Result<()> {
    let mut controller = open_controller::<Report>(ctx)?;
    let status = controller.review(id, action.target(), reason)?;
    println!("Report #{id} is now {status}");
    if let Some(reason) = controller.store().get(id).and_then(|r| r.reason.as_deref()) {
        println!("Reason: {reason}");
    }
    demo_hint(ctx);
    Ok(())
}

fn show_config(config: &PlacementConfig, template: bool) -> Result<()> {
    if template {
        print!("{}", PlacementConfig::template());
        return Ok(());
    }

    let value = serde_json::to_value(config)?;
    if let Some(settings) = value.as_object() {
        for (key, value) in settings {
            let shown = match value {
                serde_json::Value::Null => "(none)".to_string(),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!("{key} = {shown}");
        }
    }
    println!();
    println!("Local config:  {}", Path::new(CONFIG_FILE_NAME).display());
    match global_config_path() {
        Some(path) => println!("Global config: {}", path.display()),
        None => println!("Global config: (unavailable)"),
    }
    Ok(())
}

fn check_field<R: Record>(
    name: &str,
    role: &str,
    allowed: impl Fn(&placementapp::fields::FieldSpec) -> bool,
) -> Result<()> {
    let config = R::config();
    match config.field(name) {
        Some(spec) if allowed(spec) => Ok(()),
        Some(_) => bail!("{}.{name} is not {role}", config.family),
        None => bail!(
            "{} has no field '{name}' (see `placement fields {}`)",
            config.family,
            config.family
        ),
    }
}

fn find<R: FamilyRecord>(controller: &Controller<R>, id: RecordId) -> Result<&R> {
    match controller.store().get(id) {
        Some(record) => Ok(record),
        None => bail!("{} #{id} does not exist", R::config().family),
    }
}

fn submit_form<R: FamilyRecord>(
    controller: &mut Controller<R>,
    values: Vec<(String, String)>,
) -> Result<RecordId> {
    let form: FormValues = values.into_iter().collect();
    Ok(controller.submit(form)?)
}

fn demo_hint(ctx: &Context) {
    if ctx.is_demo() {
        ConsoleNotifier.notify(Notice::info(
            "Demo records: changes are not saved (use --data FILE to keep them)",
        ));
    }
}
