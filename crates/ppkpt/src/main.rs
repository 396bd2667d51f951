//! `lapor` - CLI for ppkpt
//!
//! This binary provides the command-line interface for filing reports,
//! managing the administrator lifecycle, and reading the dashboard.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use chrono::{NaiveDate, Utc};
use clap::Parser;

use ppkpt::aggregate;
use ppkpt::analysis::{analyze_best_effort, GeminiAnalyzer};
use ppkpt::cli::{
    AnalyzeCommand, Cli, Command, ConfigCommand, DashboardCommand, ListCommand, LoginCommand,
    OutputFormat, SeedCommand, ShowCommand, SubmitCommand, UpdateCommand,
};
use ppkpt::storage::FileSlotStore;
use ppkpt::{
    init_logging, AdminUpdate, Attachment, Config, Error, Faculty, Report, ReportDraft,
    ReportStatus, ReportStore,
};

type Store = ReportStore<FileSlotStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Submit(cmd) => handle_submit(&config, cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Update(cmd) => handle_update(&config, cmd),
        Command::Dashboard(cmd) => handle_dashboard(&config, &cmd),
        Command::Analyze(cmd) => handle_analyze(&config, &cmd).await,
        Command::Login(cmd) => handle_login(&config, &cmd),
        Command::Logout => handle_logout(&config),
        Command::Seed(cmd) => handle_seed(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the report store over the configured slots directory.
fn open_store(config: &Config) -> anyhow::Result<Store> {
    let slots = FileSlotStore::open(config.slots_dir())?;
    Ok(ReportStore::open(slots)?)
}

/// Fail unless the admin session flag is set.
fn require_admin(store: &Store) -> anyhow::Result<()> {
    if store.is_authenticated() {
        Ok(())
    } else {
        Err(Error::LoginRequired.into())
    }
}

fn handle_submit(config: &Config, cmd: SubmitCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    let evidence = cmd
        .evidence
        .as_deref()
        .map(Attachment::from_file)
        .transpose()?;
    let draft = ReportDraft {
        title: cmd.title,
        description: cmd.description,
        faculty: cmd.faculty.into(),
        incident_date: cmd.incident_date,
        reporter_name: cmd.reporter_name,
        reporter_id: cmd.reporter_id,
        anonymous: cmd.anonymous,
        evidence,
    };

    let report = store.submit(draft)?;
    println!("Report {} submitted.", report.id);
    if let Some(attachment) = &report.evidence {
        println!(
            "Evidence attached: {} ({})",
            attachment.name, attachment.media_type
        );
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    require_admin(&store)?;

    let status = cmd.status.map(ReportStatus::from);
    let faculty = cmd.faculty.map(Faculty::from);
    let selected: Vec<&Report> = store
        .reports()
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .filter(|r| faculty.map_or(true, |f| r.faculty == f))
        .take(cmd.limit)
        .collect();

    let today = Utc::now().date_naive();
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
        OutputFormat::Table => print_table(&selected, today),
        OutputFormat::Plain => {
            for report in &selected {
                println!(
                    "{}  {}  {}  {}",
                    report.id, report.status, report.faculty, report.title
                );
            }
        }
    }
    Ok(())
}

/// Print reports as an aligned table with elapsed days; overdue reports
/// are marked with `!`.
fn print_table(reports: &[&Report], today: NaiveDate) {
    println!(
        "{:<12} {:<12} {:<42} {:>5}  {}",
        "ID", "STATUS", "FACULTY", "DAYS", "TITLE"
    );
    for report in reports {
        let days = aggregate::days_elapsed(report.reported_at, today);
        let marker = if aggregate::is_overdue(report, today) {
            "!"
        } else {
            " "
        };
        println!(
            "{:<12} {:<12} {:<42} {:>4}{marker}  {}",
            report.id,
            report.status.to_string(),
            report.faculty.to_string(),
            days,
            report.title
        );
    }
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    require_admin(&store)?;

    let report = store.get(&cmd.id).ok_or_else(|| Error::ReportNotFound {
        id: cmd.id.clone(),
    })?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let overdue = if aggregate::is_overdue(report, today) {
        ", overdue"
    } else {
        ""
    };
    println!("{} [{}]", report.id, report.status);
    println!("Title:          {}", report.title);
    println!("Faculty:        {}", report.faculty);
    println!("Incident date:  {}", report.incident_date);
    println!(
        "Reported at:    {} ({} days elapsed{overdue})",
        report.reported_at,
        aggregate::days_elapsed(report.reported_at, today)
    );
    println!(
        "Reporter:       {} ({})",
        report.reporter_name.as_deref().unwrap_or("-"),
        report.reporter_id.as_deref().unwrap_or("-")
    );
    println!();
    println!("{}", report.description);

    if let Some(evidence) = &report.evidence {
        println!();
        println!(
            "Evidence:       {} ({}, {} bytes encoded)",
            evidence.name,
            evidence.media_type,
            evidence.encoded_len()
        );
    }
    if let Some(assessment) = &report.ai_assessment {
        println!("AI assessment:  {assessment}");
    }

    let has_admin_fields = report.victim_identities.is_some()
        || report.witness_identities.is_some()
        || report.investigation_process.is_some()
        || report.sanction_recommendation.is_some()
        || report.sanction_sk.is_some();
    if has_admin_fields {
        println!();
        println!("Investigation");
        println!("-------------");
        if let Some(value) = &report.victim_identities {
            println!("Victims:        {value}");
        }
        if let Some(value) = &report.witness_identities {
            println!("Witnesses:      {value}");
        }
        if let Some(value) = &report.investigation_process {
            println!("Process:        {value}");
        }
        if let Some(value) = &report.sanction_recommendation {
            println!("Sanction:       {value}");
        }
        if let Some(decree) = &report.sanction_sk {
            println!("Decree:         {} ({})", decree.name, decree.media_type);
        }
    }
    Ok(())
}

fn handle_update(config: &Config, cmd: UpdateCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    require_admin(&store)?;

    // Keep the current status when none was given.
    let status = match cmd.status {
        Some(arg) => arg.into(),
        None => {
            store
                .get(&cmd.id)
                .ok_or_else(|| Error::ReportNotFound {
                    id: cmd.id.clone(),
                })?
                .status
        }
    };

    let sanction_sk = cmd
        .sanction_file
        .as_deref()
        .map(Attachment::from_file)
        .transpose()?;
    let fields = AdminUpdate {
        victim_identities: cmd.victims,
        witness_identities: cmd.witnesses,
        investigation_process: cmd.investigation,
        sanction_recommendation: cmd.sanction,
        sanction_sk,
        ai_assessment: None,
    };

    let report = store.update(&cmd.id, status, &fields)?;
    println!("Report {} updated [{}].", report.id, report.status);
    Ok(())
}

fn handle_dashboard(config: &Config, cmd: &DashboardCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let counts = aggregate::status_counts(store.reports());
    let faculties = aggregate::faculty_counts(store.reports());

    if cmd.json {
        let dashboard = serde_json::json!({
            "status": counts,
            "faculties": faculties,
        });
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("Reports");
    println!("-------");
    println!("Total:        {}", counts.total);
    println!("Unresolved:   {}", counts.unresolved);
    println!("In progress:  {}", counts.in_progress);
    println!("Resolved:     {}", counts.resolved);
    println!();
    println!("Per faculty");
    println!("-----------");
    for entry in &faculties {
        println!("{:<45} {}", entry.faculty.to_string(), entry.count);
    }
    Ok(())
}

async fn handle_analyze(config: &Config, cmd: &AnalyzeCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    require_admin(&store)?;

    let report = store.get(&cmd.id).ok_or_else(|| Error::ReportNotFound {
        id: cmd.id.clone(),
    })?;
    let title = report.title.clone();
    let description = report.description.clone();
    let status = report.status;

    let assessment = match GeminiAnalyzer::new(&config.analysis) {
        Ok(analyzer) => analyze_best_effort(&analyzer, &title, &description).await,
        Err(err) => {
            tracing::warn!("analysis unavailable: {err}");
            None
        }
    };

    let Some(assessment) = assessment else {
        println!("AI analysis is not available right now.");
        return Ok(());
    };

    println!("Category: {}", assessment.category);
    println!("Urgency:  {}", assessment.urgency);
    println!();
    println!("{}", assessment.summary);

    if cmd.save {
        let fields = AdminUpdate {
            ai_assessment: Some(assessment.as_note()),
            ..AdminUpdate::default()
        };
        store.update(&cmd.id, status, &fields)?;
        println!();
        println!("Assessment saved to {}.", cmd.id);
    }
    Ok(())
}

fn handle_login(config: &Config, cmd: &LoginCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    if store.login(&cmd.username, &cmd.password)? {
        println!("Logged in as administrator.");
    } else {
        println!("Invalid username or password.");
    }
    Ok(())
}

fn handle_logout(config: &Config) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    store.logout()?;
    println!("Logged out.");
    Ok(())
}

fn handle_seed(config: &Config, cmd: &SeedCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    if !store.is_empty() && !cmd.force {
        println!(
            "Store already contains {} reports; use --force to replace them.",
            store.len()
        );
        return Ok(());
    }

    let samples = ppkpt::seed::sample_reports();
    let count = samples.len();
    store.replace_all(samples)?;
    println!("Seeded {count} sample reports.");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Slots directory:  {}", config.slots_dir().display());
                println!();
                println!("[Analysis]");
                println!("  Model:            {}", config.analysis.model);
                println!("  Endpoint:         {}", config.analysis.endpoint);
                println!(
                    "  API key:          {}",
                    if config.analysis.api_key.is_some() {
                        "configured"
                    } else {
                        "not configured"
                    }
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
