//! Interactive session shell
//!
//! Gates the session behind the operator login, then reads one command per
//! line, applies it to the session's store and re-renders the result.

use std::io::{self, BufRead, Write};

use biboard_core::Error;
use biboard_core::application::{AppResult, ApplicationError, ProjectValidator};
use biboard_core::config::Config;
use biboard_core::domain::projects::{ProjectStatus, metrics};
use biboard_core::domain::session::{OperatorCredentials, Session};
use biboard_core::reports::{self, Overview, Report};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::render::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "biboard", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
    /// Record a new project
    Add {
        /// Project name
        name: String,
        /// Project description
        description: String,
        /// Initial status
        #[arg(short, long, default_value = "Stopped")]
        status: String,
        /// Start date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(long)]
        end: Option<String>,
    },
    /// List projects with their progress
    List,
    /// Show one project by name or id
    Show { project: String },
    /// Change a project's status
    Status {
        /// Project name (or id with --id)
        project: String,
        /// New status
        status: String,
        /// Treat PROJECT as an id instead of a name
        #[arg(long)]
        id: bool,
    },
    /// Show status counts and progress by date
    Report,
    /// Show the project timeline
    Timeline,
    /// List the available statuses
    Statuses,
    /// Log out, keeping the projects recorded so far
    Logout,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// What the read loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Source of input lines; `None` means end of input
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;

    /// Read a line that must not be remembered
    fn read_password(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.read_line(prompt)
    }
}

/// Terminal input with line editing and history
pub struct Interactive {
    editor: DefaultEditor,
}

impl Interactive {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

}

impl LineSource for Interactive {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read without echo and without touching the editor history
    fn read_password(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password)),
            Err(e) if matches!(e.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Non-terminal input (pipes, files); prompts are not echoed
pub struct Piped<R> {
    reader: R,
}

impl<R: BufRead> Piped<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Piped<R> {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
    }
}

struct NewProject {
    name: String,
    description: String,
    status: ProjectStatus,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// One operator session driven line by line
pub struct Shell {
    session: Session,
    credentials: OperatorCredentials,
    format: OutputFormat,
    date_format: String,
    quiet: bool,
    today: Option<NaiveDate>,
}

impl Shell {
    pub fn new(credentials: OperatorCredentials, config: &Config, format: OutputFormat, quiet: bool) -> Self {
        Self {
            session: Session::new(),
            credentials,
            format,
            date_format: config.display.date_format.clone(),
            quiet,
            today: None,
        }
    }

    /// Pin the reference day used for progress and days remaining
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(metrics::today)
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> anyhow::Result<()> {
        info!(session = %self.session.id, "Session started");
        if !self.quiet && self.format == OutputFormat::Text {
            writeln!(out, "Biboard - BI project tracking")?;
        }

        loop {
            if !self.session.is_authenticated() {
                let Some(username) = input.read_line("Username: ")? else {
                    break;
                };
                let Some(password) = input.read_password("Password: ")? else {
                    break;
                };
                self.login(username.trim(), &password, out)?;
                out.flush()?;
                continue;
            }

            let Some(line) = input.read_line("biboard> ")? else {
                break;
            };
            let flow = self.execute(&line, out)?;
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Attempt a login; a rejected pair is reported, not returned as an error
    pub fn login(&mut self, username: &str, password: &str, out: &mut dyn Write) -> anyhow::Result<bool> {
        match self.session.login(&self.credentials, username, password) {
            Ok(()) => {
                match self.format {
                    OutputFormat::Text => writeln!(out, "Welcome, {}!", username)?,
                    OutputFormat::Json => render::json(out, &serde_json::json!({ "login": username }))?,
                }
                Ok(true)
            }
            Err(err) => {
                render::error(out, self.format, &err)?;
                Ok(false)
            }
        }
    }

    /// Parse and apply one command line
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(args) = shlex::split(line) else {
            render::warning(out, self.format, None, "Unbalanced quotes in command")?;
            return Ok(Flow::Continue);
        };

        let command = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(session = %self.session.id, ?command, "Shell command");

        match command {
            ShellCommand::Add {
                name,
                description,
                status,
                start,
                end,
            } => self.cmd_add(&name, &description, &status, start.as_deref(), end.as_deref(), out)?,
            ShellCommand::List => self.cmd_list(out)?,
            ShellCommand::Show { project } => self.cmd_show(&project, out)?,
            ShellCommand::Status { project, status, id } => self.cmd_status(&project, &status, id, out)?,
            ShellCommand::Report => self.cmd_report(out)?,
            ShellCommand::Timeline => self.cmd_timeline(out)?,
            ShellCommand::Statuses => render::statuses(out, self.format)?,
            ShellCommand::Logout => {
                self.session.logout();
                if self.format == OutputFormat::Text {
                    writeln!(out, "Logged out.")?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn cmd_add(
        &mut self,
        name: &str,
        description: &str,
        status: &str,
        start: Option<&str>,
        end: Option<&str>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let new = match self.parse_new_project(name, description, status, start, end) {
            Ok(new) => new,
            Err(err) => return self.report_app_error(err, out),
        };

        let store = match self.session.projects_mut() {
            Ok(store) => store,
            Err(err) => return render::error(out, self.format, &err),
        };
        let project = store.add(new.name, new.description, new.status, new.start_date, new.end_date);
        render::project_added(out, self.format, &project)
    }

    fn parse_new_project(
        &self,
        name: &str,
        description: &str,
        status: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> AppResult<NewProject> {
        ProjectValidator::validate_create(name, description)?;
        let status = ProjectValidator::parse_status(status)?;
        let start_date = match start {
            Some(raw) => ProjectValidator::parse_date("start", raw)?,
            None => self.today(),
        };
        let end_date = match end {
            Some(raw) => ProjectValidator::parse_date("end", raw)?,
            None => self.today(),
        };

        Ok(NewProject {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            status,
            start_date,
            end_date,
        })
    }

    fn cmd_list(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.session.projects() {
            Ok(store) => {
                let overview = Overview::build(store, self.today(), &self.date_format);
                render::overview(out, self.format, &overview)
            }
            Err(err) => render::error(out, self.format, &err),
        }
    }

    fn cmd_show(&self, key: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let store = match self.session.projects() {
            Ok(store) => store,
            Err(err) => return render::error(out, self.format, &err),
        };

        let found = store
            .find_by_name(key)
            .or_else(|| key.parse::<u64>().ok().and_then(|id| store.get(id)));

        match found {
            Some(project) => render::project_details(
                out,
                self.format,
                project,
                project.progress_at(self.today()),
                &self.date_format,
            ),
            None => render::error(out, self.format, &Error::ProjectNotFound(key.to_string())),
        }
    }

    fn cmd_status(&mut self, key: &str, status: &str, by_id: bool, out: &mut dyn Write) -> anyhow::Result<()> {
        let status = match ProjectValidator::parse_status(status) {
            Ok(status) => status,
            Err(err) => return self.report_app_error(err, out),
        };
        let id = if by_id {
            match key.parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    let err = ApplicationError::validation("id", format!("'{}' is not a project id", key));
                    return self.report_app_error(err, out);
                }
            }
        } else {
            None
        };

        let store = match self.session.projects_mut() {
            Ok(store) => store,
            Err(err) => return render::error(out, self.format, &err),
        };
        let updated = match id {
            Some(id) => store.update_status_by_id(id, status),
            None => store.update_status(key, status),
        };

        if !updated {
            return render::error(out, self.format, &Error::ProjectNotFound(key.to_string()));
        }

        let project = match id {
            Some(id) => store.get(id),
            None => store.find_by_name(key),
        };
        match self.format {
            OutputFormat::Text => {
                let name = project.map(|p| p.name.as_str()).unwrap_or(key);
                writeln!(out, "Status updated: {} -> {}", name, status.label())?;
            }
            OutputFormat::Json => {
                render::json(out, &serde_json::json!({ "updated": true, "project": project }))?
            }
        }
        Ok(())
    }

    fn cmd_report(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.session.projects() {
            Ok(store) => {
                let report = Report::build(store, self.today(), &self.date_format);
                render::report(out, self.format, &report)
            }
            Err(err) => render::error(out, self.format, &err),
        }
    }

    fn cmd_timeline(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.session.projects() {
            Ok(store) => render::timeline(out, self.format, &reports::timeline(store), &self.date_format),
            Err(err) => render::error(out, self.format, &err),
        }
    }

    fn report_app_error(&self, err: ApplicationError, out: &mut dyn Write) -> anyhow::Result<()> {
        match err {
            ApplicationError::Validation { field, message } => {
                render::warning(out, self.format, Some(&field), &message)
            }
            ApplicationError::Domain(e) => render::error(out, self.format, &e),
        }
    }
}
