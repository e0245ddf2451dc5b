use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tech4all::announcer::Announcer;
use tech4all::auth::{AuthState, Session};
use tech4all::backend::rest::RestBackend;
use tech4all::backend::{Backend, BackendError};
use tech4all::catalog::{self, ALL_CATEGORIES};
use tech4all::config::Config;
use tech4all::course_view::{CourseView, ViewContext};
use tech4all::notice::NoticeBoard;
use tech4all::progress::{CompleteOutcome, SelectOutcome};
use tech4all::settings::effects::MemoryDocument;
use tech4all::settings::store::SettingsStore;
use tech4all::settings::{SettingChange, SettingKey, SettingParseError};
use tech4all::signs::{self, SignDictionary};
use tech4all::storage::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("backend not configured; set TECH4ALL_BACKEND_URL and TECH4ALL_BACKEND_ANON_KEY")]
    Offline,
    #[error("course not found: {0}")]
    CourseNotFound(String),
    #[error("{0} has no toggle; use `settings set`")]
    NotToggleable(&'static str),
    #[error(transparent)]
    Setting(#[from] SettingParseError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Parser, Debug)]
#[command(name = "tech4all", about = "Tech4All accessibility settings and course progress")]
struct Cli {
    #[command(flatten)]
    credentials: Credentials,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, env = "TECH4ALL_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "TECH4ALL_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Settings(SettingsCommand),
    Courses {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
        /// Narrate one course as if its card had focus.
        #[arg(long)]
        focus: Option<String>,
    },
    Course {
        course_id: String,
        /// Level number to select before anything else.
        #[arg(long)]
        select: Option<u32>,
        /// Mark the current level complete.
        #[arg(long)]
        complete: bool,
    },
    Signs {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    SignUp,
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    Set { key: String, value: String },
    Toggle { key: String },
    /// Replace local settings with the ones saved on the signed-in profile.
    Pull,
}

struct App {
    config: Config,
    backend: Option<Arc<dyn Backend>>,
    announcer: Announcer,
    notices: NoticeBoard,
}

impl App {
    fn auth(&self) -> Result<AuthState, CliError> {
        let backend = self.backend.clone().ok_or(CliError::Offline)?;
        Ok(AuthState::new(backend, self.announcer.clone(), self.notices.clone()))
    }

    /// Sign in when credentials were given and a backend is configured.
    async fn session(&self, credentials: &Credentials) -> Result<Option<Session>, CliError> {
        let (Some(email), Some(password)) = (&credentials.email, &credentials.password) else {
            return Ok(None);
        };
        if self.backend.is_none() {
            tracing::warn!("credentials given but backend not configured; continuing anonymously");
            return Ok(None);
        }
        let mut auth = self.auth()?;
        Ok(Some(auth.sign_in(email, password).await?))
    }

    fn settings_store(&self, session: Option<Session>) -> SettingsStore<MemoryDocument> {
        let storage = FileStore::new(self.config.storage_dir.clone());
        let mut store = SettingsStore::new(MemoryDocument::new(), Box::new(storage), self.notices.clone());
        store.set_session(session);
        store.load();
        store
    }

    fn report(&self) {
        for notice in self.notices.drain() {
            println!("[notice] {}: {}", notice.title, notice.description);
        }
        for announcement in self.announcer.recent() {
            println!("[announce] {announcement}");
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::from_env();
    let backend: Option<Arc<dyn Backend>> = match &config.backend {
        Some(backend_config) => Some(Arc::new(RestBackend::new(backend_config)?)),
        None => {
            tracing::info!("backend not configured; running offline");
            None
        }
    };
    let app = App {
        announcer: Announcer::new(config.announcer_capacity),
        notices: NoticeBoard::new(),
        config,
        backend,
    };

    let result = dispatch(&app, cli).await;
    app.report();
    result
}

async fn dispatch(app: &App, cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Settings(cmd) => {
            let session = app.session(&cli.credentials).await?;
            run_settings(app, session, cmd.command).await
        }
        Command::Courses { search, category, focus } => {
            let courses = catalog::static_courses();
            let found = catalog::filter_courses(&courses, &search, &category);
            if search.is_empty() {
                app.announcer.announce(catalog::category_announcement(&category, found.len()));
            } else {
                app.announcer.announce(catalog::search_announcement(&search, found.len()));
            }
            for course in &found {
                println!("{:<10} {:<24} {}", course.id, course.title, course.description);
            }
            if let Some(course) = focus.and_then(|id| found.into_iter().find(|course| course.id == id)) {
                app.announcer.announce(catalog::focus_announcement(course));
            }
            Ok(())
        }
        Command::Course { course_id, select, complete } => {
            let session = app.session(&cli.credentials).await?;
            run_course(app, session, &course_id, select, complete).await
        }
        Command::Signs { search, category } => {
            let dictionary = SignDictionary::load(app.backend.as_ref(), &app.announcer, &app.notices).await;
            if category != ALL_CATEGORIES {
                app.announcer.announce(signs::category_announcement(&category));
            }
            for entry in dictionary.search(&search, &category, &app.announcer) {
                println!("{:<12} {}", entry.sign, entry.meaning);
            }
            Ok(())
        }
        Command::SignUp => {
            let (Some(email), Some(password)) = (&cli.credentials.email, &cli.credentials.password) else {
                return Err(CliError::Backend(BackendError::Auth("email and password are required".to_owned())));
            };
            let mut auth = app.auth()?;
            auth.sign_up(email, password).await?;
            Ok(())
        }
    }
}

async fn run_settings(app: &App, session: Option<Session>, cmd: SettingsSubcommand) -> Result<(), CliError> {
    let mut store = app.settings_store(session);
    match cmd {
        SettingsSubcommand::Show => {}
        SettingsSubcommand::Set { key, value } => {
            store.change(SettingChange::parse(&key, &value)?);
        }
        SettingsSubcommand::Toggle { key } => {
            let parsed = SettingKey::parse(&key).ok_or(SettingParseError::UnknownKey(key))?;
            if store.toggle(parsed).is_none() {
                return Err(CliError::NotToggleable(parsed.as_str()));
            }
        }
        SettingsSubcommand::Pull => {
            if !store.adopt_remote().await {
                println!("no usable settings on profile; keeping local settings");
            }
        }
    }

    let settings = store.settings();
    let effects = store.effects();
    println!("fontSize      {}", settings.font_size.as_str());
    for key in SettingKey::ALL.into_iter().skip(1) {
        println!("{:<13} {}", key.as_str(), settings.flag(key).unwrap_or(false));
    }
    println!("root font     {}px", effects.root_font_px);
    for marker in effects.markers.iter().filter(|m| m.present) {
        println!("marker        {:?}.{}", marker.surface, marker.marker);
    }

    store.flush().await;
    Ok(())
}

async fn run_course(
    app: &App,
    session: Option<Session>,
    course_id: &str,
    select: Option<u32>,
    complete: bool,
) -> Result<(), CliError> {
    let ctx = ViewContext {
        backend: app.backend.clone(),
        session,
        announcer: app.announcer.clone(),
        notices: app.notices.clone(),
    };
    let mut view = CourseView::open(course_id, &ctx).await.ok_or_else(|| CliError::CourseNotFound(course_id.to_owned()))?;

    if let Some(number) = select {
        if view.gate.select_number(number) == SelectOutcome::Unknown {
            println!("course has no level {number}");
        }
    }
    if complete {
        if let CompleteOutcome::Skipped(reason) = view.gate.complete() {
            println!("not completed: {reason:?}");
        }
    }

    println!("{} ({:?})", view.course.title, view.source);
    let current = view.gate.current().map(|level| level.id.clone());
    for level in view.gate.levels() {
        let state = if view.gate.is_completed(&level.id) {
            "done"
        } else if view.gate.is_locked(level) {
            "locked"
        } else {
            "open"
        };
        let marker = if current.as_deref() == Some(level.id.as_str()) { ">" } else { " " };
        println!("{marker} {}. {:<28} {state}", level.level_number, level.title);
    }

    view.gate.flush().await;
    Ok(())
}
