//! `lemur certificate` - find, issue and export certificates.

use anyhow::{Context as _, Result};
use colored::Colorize;
use lemur::{
    ArtifactFetcher, CertificateArtifacts, CertificateId, CertificateRecord, CertificateResource,
    DesiredCertificate, ExportBundle, ExportFormat, ExportRequestor, LookupMode, PkcsDataSource,
    Reconciler,
};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use super::{load_desired, Context};
use crate::cli::args::{CertificateArgs, CertificateCommands};
use crate::state::StateFile;

#[derive(Tabled)]
struct ExportRow {
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Bytes (base64)")]
    size: usize,
    #[tabled(rename = "Passphrase")]
    passphrase: String,
}

impl From<&ExportBundle> for ExportRow {
    fn from(bundle: &ExportBundle) -> Self {
        Self {
            format: bundle.format.to_string(),
            size: bundle.data.len(),
            passphrase: bundle.passphrase.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Serialize)]
struct ApplyOutput<'a> {
    certificate_id: CertificateId,
    created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a CertificateRecord>,
}

pub async fn execute(ctx: Context, args: CertificateArgs) -> Result<()> {
    match args.command {
        CertificateCommands::Apply {
            desired,
            state,
            by_common_name,
        } => apply(&ctx, &desired, state.as_deref(), by_common_name).await,
        CertificateCommands::Exists { desired } => exists(&ctx, &desired).await,
        CertificateCommands::Show { id } => show(&ctx, CertificateId(id)).await,
        CertificateCommands::Export { id, format } => export(&ctx, CertificateId(id), format).await,
        CertificateCommands::Pkcs { desired } => pkcs(&ctx, &desired).await,
    }
}

async fn apply(
    ctx: &Context,
    desired_path: &Path,
    state_path: Option<&Path>,
    by_common_name: bool,
) -> Result<()> {
    let desired = load_desired(desired_path)?;
    let mode = if by_common_name {
        LookupMode::ByCommonName
    } else {
        LookupMode::ByName
    };
    let key = mode.key(&desired)?;

    let previous = match state_path {
        Some(path) => StateFile::load_for(path, key)?,
        None => None,
    };

    let client = ctx.client().await?;

    if by_common_name {
        let reconciled = Reconciler::new(&client)
            .find_or_create(&desired, mode)
            .await?;
        if let Some(path) = state_path {
            StateFile::new(reconciled.id, key).save(path)?;
        }
        return print_apply(ctx, reconciled.id, reconciled.created, None);
    }

    let settings = ctx.export_settings();
    let record = CertificateResource::new(&client, &settings)
        .create(&desired, previous.as_ref())
        .await?;
    debug!(
        id = %record.certificate.id,
        created = record.created,
        refreshed = record.refreshed,
        "apply complete"
    );

    if let Some(path) = state_path {
        StateFile::new(record.certificate.id, key).save(path)?;
    }

    print_apply(ctx, record.certificate.id, record.created, Some(&record))
}

fn print_apply(
    ctx: &Context,
    id: CertificateId,
    created: bool,
    record: Option<&CertificateRecord>,
) -> Result<()> {
    let output = ApplyOutput {
        certificate_id: id,
        created,
        record,
    };
    if let Some(rendered) = ctx.output_format.render(&output)? {
        println!("{rendered}");
        return Ok(());
    }

    let verb = if created { "Issued" } else { "Found" };
    println!("{} certificate {}", verb.green().bold(), id.to_string().cyan().bold());

    let Some(record) = record else {
        return Ok(());
    };

    println!();
    println!("  {} {}", "Common name:".bold(), record.certificate.common_name);
    println!("  {} {}", "Authority:".bold(), record.certificate.authority_name);
    println!("  {} {}", "Owner:".bold(), record.certificate.owner);

    if !record.refreshed {
        println!();
        println!("{}", "Unchanged since last run; artifacts not refetched.".dimmed());
        return Ok(());
    }

    if let Some(artifacts) = &record.artifacts {
        println!();
        print_public(artifacts);
    }

    if !record.exports.is_empty() {
        println!();
        println!("{}", "Exports:".bold().underline());
        let rows: Vec<ExportRow> = record.exports.iter().map(ExportRow::from).collect();
        println!("{}", Table::new(&rows).with(Style::rounded()));
    }

    Ok(())
}

async fn exists(ctx: &Context, desired_path: &Path) -> Result<()> {
    let desired = load_desired(desired_path)?;
    let client = ctx.client().await?;
    let exists = Reconciler::new(&client).exists(&desired).await?;

    if let Some(rendered) = ctx.output_format.render(&exists)? {
        println!("{rendered}");
    } else {
        println!("{exists}");
    }
    Ok(())
}

async fn show(ctx: &Context, id: CertificateId) -> Result<()> {
    let client = ctx.client().await?;
    let artifacts = ArtifactFetcher::new(&client).fetch_all(id).await?;

    if let Some(rendered) = ctx.output_format.render(&artifacts)? {
        println!("{rendered}");
        return Ok(());
    }

    print_public(&artifacts);
    println!();
    println!("{}", "Private key:".bold());
    println!("{}", artifacts.private_key.trim_end());
    Ok(())
}

fn print_public(artifacts: &CertificateArtifacts) {
    println!("{}", "Certificate:".bold());
    println!("{}", artifacts.public_certificate.trim_end());
    match &artifacts.chain {
        Some(chain) => {
            println!();
            println!("{}", "Chain:".bold());
            println!("{}", chain.trim_end());
        }
        None => println!("{}", "(no chain)".dimmed()),
    }
}

async fn export(ctx: &Context, id: CertificateId, format: ExportFormat) -> Result<()> {
    let settings = ctx.export_settings();
    if format.needs_jks_passphrase() && settings.jks_passphrase.is_none() {
        anyhow::bail!(
            "{format} exports need a JKS passphrase.\n\n\
             Set it with: lemur config set jks_passphrase <PASSPHRASE>"
        );
    }

    let client = ctx.client().await?;
    let bundle = ExportRequestor::new(&client, &settings)
        .export(id, format)
        .await
        .with_context(|| format!("exporting certificate {id} as {format}"))?;

    if let Some(rendered) = ctx.output_format.render(&bundle)? {
        println!("{rendered}");
        return Ok(());
    }

    let rows = [ExportRow::from(&bundle)];
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();
    println!("{}", bundle.data);
    Ok(())
}

async fn pkcs(ctx: &Context, desired_path: &Path) -> Result<()> {
    let desired: DesiredCertificate = load_desired(desired_path)?;
    let client = ctx.client().await?;
    let record = PkcsDataSource::new(&client).read(&desired).await?;

    if let Some(rendered) = ctx.output_format.render(&record)? {
        println!("{rendered}");
        return Ok(());
    }

    let verb = if record.created { "Issued" } else { "Found" };
    println!(
        "{} certificate {}",
        verb.green().bold(),
        record.certificate_id.to_string().cyan().bold()
    );
    println!("  {} {}", "Passphrase:".bold(), record.passphrase);
    println!();
    println!("{}", record.data);
    Ok(())
}
