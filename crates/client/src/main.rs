//! crmagenda-client CLI entry point.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use crmagenda_client::cli::contacts::ContactsAction;
use crmagenda_client::cli::events::{DraftEdits, EventsAction};
use crmagenda_client::cli::owners::OwnersAction;
use crmagenda_client::cli::{Cli, Commands, OutputFormat};
use crmagenda_client::client::events::ListEventsQuery;
use crmagenda_client::output::{json, pretty, render};
use crmagenda_client::{AppointmentEditor, CrmClient, SaveOutcome};
use crmagenda_core::config::CrmConfig;
use crmagenda_core::contact::ContactDraft;
use crmagenda_core::time::{format_for_display, format_time_for_display};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crmagenda_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CrmConfig::new(&cli.base_url, &cli.api_key)
        .with_assignee_marker(&cli.assignee_marker)
        .with_timezone(cli.timezone);
    let client = Arc::new(CrmClient::new(config)?);
    let labels = client.config().labels.clone();
    let zone = cli.timezone;

    match cli.command {
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::List { date, view } => {
                let events = client
                    .list_events(ListEventsQuery {
                        date,
                        view: view.map(Into::into),
                    })
                    .await?;
                let out = render(cli.format, &json::event_views(&events, zone), || {
                    pretty::format_events(&events, zone, &labels)
                })?;
                println!("{out}");
            }
            EventsAction::Get { id } => {
                let event = client.get_event(&id).await?;
                let out = render(cli.format, &json::EventJson::new(&event, zone), || {
                    pretty::format_event(&event, zone, &labels)
                })?;
                println!("{out}");
            }
            EventsAction::Create { date, edit } => {
                let now = Utc::now().with_timezone(&zone);
                let date = date.map(|d| d.format("%Y-%m-%d").to_string());
                let editor = AppointmentEditor::open_new(
                    Arc::clone(&client),
                    &cli.assignee_marker,
                    date.as_deref(),
                    now,
                );
                let outcome = run_editor(&client, &editor, &edit, None).await?;
                report_save(&editor, outcome, cli.format, cli.quiet, &labels.event_singular)
                    .await?;
            }
            EventsAction::Update { id, date, edit } => {
                let now = Utc::now().with_timezone(&zone);
                let editor =
                    AppointmentEditor::open_existing(Arc::clone(&client), &cli.assignee_marker, &id, now)
                        .await?;
                let outcome = run_editor(&client, &editor, &edit, date).await?;
                report_save(&editor, outcome, cli.format, cli.quiet, &labels.event_singular)
                    .await?;
            }
            EventsAction::Delete { id } => {
                client.delete_event(&id).await?;
                if !cli.quiet {
                    println!("Deleted {} {}", labels.event_singular.to_lowercase(), id);
                }
            }
        },
        Commands::Contacts(contacts_cmd) => match contacts_cmd.action {
            ContactsAction::List { search } => {
                let contacts = client.list_contacts(search.as_deref()).await?;
                let out = render(cli.format, &contacts, || {
                    pretty::format_contacts(&contacts, &labels)
                })?;
                println!("{out}");
            }
            ContactsAction::Get { id } => {
                let contact = client.get_contact(&id).await?;
                let out = render(cli.format, &contact, || pretty::format_contact(&contact))?;
                println!("{out}");
            }
            ContactsAction::Create { lastname, fields } => {
                let draft = fields.apply(ContactDraft::new(lastname));
                draft.validate()?;
                let created = client.create_contact(&draft.to_payload()).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(&created)?),
                    OutputFormat::Pretty => {
                        if !cli.quiet {
                            println!("Created {}", labels.contact_singular.to_lowercase())
                        }
                    }
                }
            }
            ContactsAction::Update {
                id,
                lastname,
                fields,
            } => {
                let existing = client.get_contact(&id).await?;
                let mut draft = ContactDraft::from_contact(&existing);
                if let Some(lastname) = lastname {
                    draft.lastname = lastname;
                }
                let draft = fields.apply(draft);
                draft.validate()?;
                let updated = client.update_contact(&id, &draft.to_payload()).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", json::format_json(&updated)?),
                    OutputFormat::Pretty => {
                        if !cli.quiet {
                            println!("Updated {} {}", labels.contact_singular.to_lowercase(), id)
                        }
                    }
                }
            }
            ContactsAction::Delete { id } => {
                client.delete_contact(&id).await?;
                if !cli.quiet {
                    println!("Deleted {} {}", labels.contact_singular.to_lowercase(), id);
                }
            }
        },
        Commands::Owners(owners_cmd) => match owners_cmd.action {
            OwnersAction::List => {
                let owners = client.list_owners().await?;
                let out = render(cli.format, &owners, || pretty::format_owners(&owners))?;
                println!("{out}");
            }
        },
    }

    Ok(())
}

/// Drives one editor session the way the form does: owners load in the
/// background while the edits are applied, then the draft is saved.
async fn run_editor(
    client: &CrmClient,
    editor: &AppointmentEditor<CrmClient>,
    edit: &DraftEdits,
    date: Option<chrono::NaiveDate>,
) -> anyhow::Result<SaveOutcome> {
    let owners = editor.spawn_owner_load();

    editor.edit(|draft| edit.apply(draft, date)).await?;
    if let Some(contact_id) = &edit.contact_id {
        let contact = client
            .get_contact(contact_id)
            .await
            .with_context(|| format!("loading contact {contact_id}"))?;
        editor.edit(|draft| draft.attach_contact(contact.to_ref())).await?;
    }

    owners.await?;
    let outcome = editor.save().await.map_err(|err| {
        tracing::error!(error = %err, "Save failed");
        anyhow::anyhow!(err.user_message())
    })?;
    Ok(outcome)
}

/// Prints the saved draft, then closes the editor.
async fn report_save(
    editor: &AppointmentEditor<CrmClient>,
    outcome: SaveOutcome,
    format: OutputFormat,
    quiet: bool,
    label: &str,
) -> anyhow::Result<()> {
    let draft = editor.draft().await;
    editor.close().await;
    let Some(draft) = draft else {
        return Ok(());
    };
    match format {
        OutputFormat::Json => println!("{}", json::format_json(&draft.to_submission_payload())?),
        OutputFormat::Pretty => {
            if quiet {
                return Ok(());
            }
            let heading = match &outcome {
                SaveOutcome::Created => format!("Created {}", label.to_lowercase()),
                SaveOutcome::Updated { id } => format!("Updated {} {}", label.to_lowercase(), id),
            };
            println!(
                "{}: {} on {} {} - {}",
                heading,
                draft.subject(),
                format_for_display(draft.start()),
                format_time_for_display(draft.start()),
                format_time_for_display(draft.end()),
            );
        }
    }
    Ok(())
}
