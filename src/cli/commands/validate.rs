use super::ProfileArgs;

use anyhow::Context;
use clap::Parser;
use profile::{baginfo, validate, Fields, Violation};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub(in super::super) struct Args {
    #[command(flatten)]
    profile: ProfileArgs,

    /// A bag-info.txt style file of `Label: Value` lines
    #[arg(long, short = 'i', value_name = "FILE")]
    bag_info: Option<PathBuf>,

    /// A single metadata field, may be repeated
    #[arg(long = "field", short = 'F', value_name = "KEY=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Skip fields the export pipeline generates itself
    #[arg(long)]
    pre_export: bool,

    /// Label used for the checked section in error messages [default: profile name]
    #[arg(long, value_name = "LABEL")]
    section: Option<String>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))
}

fn collect_fields(args: &Args) -> anyhow::Result<Fields> {
    let mut fields = match &args.bag_info {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            baginfo::parse(&text).with_context(|| format!("Invalid bag-info {}", path.display()))?
        }
        None => Fields::new(),
    };
    fields.extend(args.fields.iter().cloned());
    Ok(fields)
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let profile = args.profile.load()?;
    let fields = collect_fields(&args)?;

    let rules = if args.pre_export {
        profile.completeness_rules()
    } else {
        profile.required_fields().clone()
    };
    let section = args.section.as_deref().unwrap_or(profile.name());

    if let Err(e) = validate(section, &rules, &fields) {
        for violation in e.violations() {
            match violation {
                Violation::Missing { field } => {
                    tracing::warn!(%field, "missing required field")
                }
                Violation::InvalidValue { field, value, .. } => {
                    tracing::warn!(%field, %value, "value not allowed")
                }
            }
        }
        return Err(e.into());
    }

    tracing::info!(
        profile = profile.name(),
        section,
        fields = fields.len(),
        "metadata is valid"
    );
    Ok(())
}
