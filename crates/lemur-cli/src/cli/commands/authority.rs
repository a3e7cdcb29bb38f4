//! `lemur authority` - look up a certificate authority.

use anyhow::Result;
use colored::Colorize;
use lemur::AuthorityDataSource;

use super::Context;
use crate::cli::args::AuthorityArgs;

pub async fn execute(ctx: Context, args: AuthorityArgs) -> Result<()> {
    let client = ctx.client().await?;
    let record = AuthorityDataSource::new(&client).read(&args.name).await?;

    if let Some(rendered) = ctx.output_format.render(&record)? {
        println!("{rendered}");
        return Ok(());
    }

    println!("{} {}", "Authority:".bold(), args.name.cyan().bold());
    println!();
    println!("  {} {}", "Authority id:".bold(), record.authority_id);
    println!(
        "  {} {}",
        "Signing certificate:".bold(),
        record.signing_certificate_id
    );
    println!();
    println!("{}", "Certificate (PEM):".bold());
    println!("{}", record.pem.trim_end());
    println!();
    println!("{}", "Certificate (CRT, base64):".bold());
    println!("{}", record.crt_base64);

    Ok(())
}
