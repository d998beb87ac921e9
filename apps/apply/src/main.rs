use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use lead_capture::{load_settings, ControllerEvent, LeadFormController, SubmissionStatus};
use shared::domain::{ApplicationForm, FieldValue, FormField, GradeLevel, Stream};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Apply for the B.Tech program from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the application and send it to the admissions backend.
    Submit {
        #[command(flatten)]
        form: FormArgs,
        /// Overrides backend_url from leadform.toml and the environment.
        #[arg(long)]
        backend_url: Option<String>,
    },
    /// Print the JSON body that would be sent, without sending it.
    Preview {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    parent_name: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    /// 11, 12, "Gap Year" or Other ("Class 11" style labels work too).
    #[arg(long)]
    grade_level: Option<String>,
    /// PCM, PCMB, Science, Commerce, Arts or Other, in any case.
    #[arg(long)]
    stream: Option<String>,
    #[arg(long)]
    program_interest: Option<String>,
    #[arg(long)]
    preferred_intake: Option<String>,
    #[arg(long)]
    how_heard: Option<String>,
    /// I agree to be contacted and accept the privacy policy.
    #[arg(long)]
    consent: bool,
}

impl FormArgs {
    fn into_updates(self) -> Vec<(FormField, FieldValue)> {
        let mut updates = vec![
            (FormField::FullName, FieldValue::Text(self.full_name)),
            (FormField::Email, FieldValue::Text(self.email)),
            (FormField::Phone, FieldValue::Text(self.phone)),
            (FormField::Consent, FieldValue::Flag(self.consent)),
        ];
        let optional = [
            (FormField::ParentName, self.parent_name),
            (FormField::City, self.city),
            (FormField::State, self.state),
            (FormField::GradeLevel, self.grade_level.map(|raw| grade_level_option(&raw))),
            (FormField::Stream, self.stream.map(|raw| stream_option(&raw))),
            (FormField::ProgramInterest, self.program_interest),
            (FormField::PreferredIntake, self.preferred_intake),
            (FormField::HowHeard, self.how_heard),
        ];
        updates.extend(
            optional
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, FieldValue::Text(v)))),
        );
        updates
    }
}

/// Maps what people type on a command line to the wire value the form takes.
/// Unrecognized input is passed through and rejected by the form.
fn grade_level_option(raw: &str) -> String {
    let typed = raw.trim();
    GradeLevel::ALL
        .into_iter()
        .find(|level| {
            level.as_str().eq_ignore_ascii_case(typed) || level.label().eq_ignore_ascii_case(typed)
        })
        .map_or_else(|| raw.to_string(), |level| level.as_str().to_string())
}

fn stream_option(raw: &str) -> String {
    let typed = raw.trim();
    Stream::ALL
        .into_iter()
        .find(|stream| stream.as_str().eq_ignore_ascii_case(typed))
        .map_or_else(|| raw.to_string(), |stream| stream.as_str().to_string())
}

fn rejected_value(field: FormField, value: &FieldValue) -> anyhow::Error {
    anyhow::anyhow!("unsupported value for --{}: {value:?}", field.name().replace('_', "-"))
}

fn build_form(updates: Vec<(FormField, FieldValue)>) -> Result<ApplicationForm> {
    let mut form = ApplicationForm::default();
    for (field, value) in updates {
        if !form.apply(field, value.clone()) {
            return Err(rejected_value(field, &value));
        }
    }
    Ok(form)
}

fn ensure_submittable(form: &ApplicationForm) -> Result<()> {
    let issues = form.validate();
    if issues.is_empty() {
        return Ok(());
    }
    for issue in &issues {
        eprintln!("  - {issue}");
    }
    bail!("application is incomplete ({} issue(s))", issues.len());
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Preview { form } => {
            let form = build_form(form.into_updates())?;
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        Command::Submit { form, backend_url } => {
            let mut settings = load_settings();
            if let Some(url) = backend_url {
                settings = settings.with_backend_url(url);
            }
            tracing::debug!(?settings, "apply: resolved settings");
            let controller = LeadFormController::from_settings(&settings)
                .context("invalid backend configuration")?;
            for (field, value) in form.into_updates() {
                if !controller.set_field(field, value.clone()) {
                    return Err(rejected_value(field, &value));
                }
            }
            ensure_submittable(&controller.form())?;

            let mut events = controller.subscribe();
            let render = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    if let ControllerEvent::SubmissionStarted { .. } = event {
                        println!("Submitting...");
                    }
                }
            });

            controller.submit().await;
            let status = controller.status();
            drop(controller);
            let _ = render.await;

            match status {
                SubmissionStatus::Succeeded { submitted_id } => {
                    println!("Thank you! Your application ID: {submitted_id}");
                }
                SubmissionStatus::Failed { error_message } => bail!(error_message),
                other => bail!("submission did not settle: {other:?}"),
            }
        }
    }

    Ok(())
}
