//! Output formatting shared by the extract and batch commands.

use passcan_core::{DocumentResult, PageOutcome};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per page
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &DocumentResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &DocumentResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "page",
        "status",
        "last_name",
        "first_name",
        "passport_number",
        "nationality",
        "birth_date",
        "delivery_date",
        "expiration_date",
        "confidence_score",
        "reason",
    ])?;

    for outcome in result {
        let page = outcome.page_number().to_string();

        match outcome {
            PageOutcome::Success { record, .. } => wtr.write_record([
                page.as_str(),
                "success",
                record.last_name(),
                record.first_name(),
                record.passport_number(),
                record.nationality(),
                &record.birth_date().to_string(),
                &record.delivery_date().map(|d| d.to_string()).unwrap_or_default(),
                &record.expiration_date().to_string(),
                &format!("{:.4}", record.confidence_score()),
                "",
            ])?,
            PageOutcome::Failure { reason, .. } => wtr.write_record([
                page.as_str(),
                "failure",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                reason,
            ])?,
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &DocumentResult) -> String {
    let mut output = String::new();

    for outcome in result {
        match outcome {
            PageOutcome::Success { page_number, record } => {
                output.push_str(&format!("Page {}: accepted\n", page_number));
                output.push_str(&format!("  Surname:     {}\n", record.last_name()));
                output.push_str(&format!("  Given names: {}\n", record.first_name()));
                output.push_str(&format!("  Passport:    {}\n", record.passport_number()));
                output.push_str(&format!("  Nationality: {}\n", record.nationality()));
                output.push_str(&format!("  Born:        {}\n", record.birth_date()));
                if let Some(delivered) = record.delivery_date() {
                    output.push_str(&format!("  Issued:      {}\n", delivered));
                }
                output.push_str(&format!("  Expires:     {}\n", record.expiration_date()));
            }
            PageOutcome::Failure { page_number, reason } => {
                output.push_str(&format!("Page {}: rejected\n", page_number));
                output.push_str(&format!("  {}\n", reason));
            }
        }
        output.push('\n');
    }

    output
}
