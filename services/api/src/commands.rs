use chrono::{Local, NaiveDate};
use clap::Args;
use std::fmt::Write as _;
use std::sync::Arc;
use work_quote::config::AppConfig;
use work_quote::error::AppError;
use work_quote::pricing::{Catalog, QuoteEngine, QuoteRequest, QuoteResult};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Work type identifier (see `catalog`)
    #[arg(long)]
    pub(crate) work_type: String,
    /// Subject identifier
    #[arg(long)]
    pub(crate) subject: String,
    /// Urgency identifier
    #[arg(long, default_value = "normal")]
    pub(crate) urgency: String,
    /// Number of pages
    #[arg(long, default_value_t = 30)]
    pub(crate) pages: u32,
    /// Target originality percentage
    #[arg(long, default_value_t = 70)]
    pub(crate) originality: u8,
    /// Add a presentation deck
    #[arg(long)]
    pub(crate) presentation: bool,
    /// Add a revision pass
    #[arg(long)]
    pub(crate) edits: bool,
    /// Date the delivery estimate counts from (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Validate the tables and fail when issues are found
    #[arg(long)]
    pub(crate) check: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = QuoteEngine::new(Arc::new(Catalog::standard()), config.pricing);

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let json = args.json;
    let request = QuoteRequest::from(args);
    let result = engine.quote(&request, today)?;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Quote payload unavailable: {err}"),
        }
    } else {
        print!("{}", render_quote(engine.catalog(), &request, &result));
    }

    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = Catalog::standard();
    print!("{}", render_catalog(&catalog));

    if args.check {
        let issues = catalog.validate();
        if issues.is_empty() {
            println!("\nCatalog check: no issues");
        } else {
            println!("\nCatalog check");
            for issue in &issues {
                println!("- {issue}");
            }
            return Err(AppError::CatalogCheck {
                issues: issues.len(),
            });
        }
    }

    Ok(())
}

impl From<QuoteArgs> for QuoteRequest {
    fn from(args: QuoteArgs) -> Self {
        QuoteRequest {
            work_type: args.work_type,
            subject: args.subject,
            urgency: args.urgency,
            pages: args.pages,
            originality: args.originality,
            with_presentation: args.presentation,
            with_edits: args.edits,
        }
    }
}

fn describe(label: Option<&str>, id: &str) -> String {
    match label {
        Some(label) => format!("{label} ({id})"),
        None => id.to_string(),
    }
}

pub(crate) fn render_quote(
    catalog: &Catalog,
    request: &QuoteRequest,
    result: &QuoteResult,
) -> String {
    let breakdown = &result.breakdown;
    let work_type = catalog.work_type(&request.work_type).map(|entry| entry.label);
    let subject = catalog.subject(&request.subject).map(|entry| entry.label);
    let urgency = catalog.urgency(&request.urgency).map(|entry| entry.label);

    let mut out = String::new();
    let _ = writeln!(out, "Quote");
    let _ = writeln!(
        out,
        "- Work type: {} base {}",
        describe(work_type, &request.work_type),
        breakdown.base_price
    );
    let _ = writeln!(
        out,
        "- Pages: {} (x{:.2})",
        request.pages, breakdown.page_multiplier
    );
    let _ = writeln!(
        out,
        "- Subject: {} x{:.2}",
        describe(subject, &request.subject),
        breakdown.subject_coefficient
    );
    let _ = writeln!(
        out,
        "- Urgency: {} x{:.2}",
        describe(urgency, &request.urgency),
        breakdown.urgency_coefficient
    );
    let _ = writeln!(
        out,
        "- Originality: {}% band {} x{:.2}",
        request.originality,
        breakdown.originality_band.label(),
        breakdown.originality_multiplier
    );
    let _ = writeln!(out, "- Subtotal: {}", breakdown.multiplied_price);
    if breakdown.presentation_fee > 0 {
        let _ = writeln!(out, "- Presentation: +{}", breakdown.presentation_fee);
    }
    if breakdown.edits_fee > 0 {
        let _ = writeln!(out, "- Revision pass: +{}", breakdown.edits_fee);
    }
    let _ = writeln!(out, "Total: {}", result.total_price);
    let _ = writeln!(out, "Delivery by {}", result.delivery_label);
    let _ = writeln!(out, "{} authors available now", result.available_authors);
    out
}

pub(crate) fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Work types (base price per 30 pages)");
    for entry in catalog.work_types.entries() {
        let _ = writeln!(out, "- {}: {} [{}]", entry.id, entry.label, entry.base_price);
    }

    let _ = writeln!(out, "\nSubjects");
    for entry in catalog.subjects.entries() {
        let _ = writeln!(
            out,
            "- {}: {} x{:.2}",
            entry.id, entry.label, entry.coefficient
        );
    }

    let _ = writeln!(out, "\nUrgency");
    for entry in catalog.urgencies.entries() {
        let _ = writeln!(
            out,
            "- {}: {} x{:.2}, {} day(s)",
            entry.id, entry.label, entry.coefficient, entry.lead_time_days
        );
    }

    out
}
