use std::path::PathBuf;

use colored::Colorize;
use futures_util::future::try_join_all;

use crate::config::ClientConfig;
use crate::error::SheetResult;
use crate::facade::{SpreadsheetDocument, Worksheet};
use crate::scenario::{parse_parameters, ParameterPlan};
use crate::service::MemoryService;

/// Where the workbook lives and how to open it.
#[derive(Debug, Clone)]
pub struct WorkbookArgs {
    pub file: PathBuf,
    /// Defaults to the key stored in the workbook file
    pub document_key: Option<String>,
    pub credentials: Option<PathBuf>,
}

/// Which worksheet a command addresses. A name takes precedence.
#[derive(Debug, Clone, Default)]
pub struct SheetSelector {
    pub name: Option<String>,
    pub index: usize,
}

impl SheetSelector {
    async fn resolve(
        &self,
        doc: &SpreadsheetDocument<MemoryService>,
    ) -> SheetResult<Worksheet<MemoryService>> {
        match &self.name {
            Some(name) => doc.get_worksheet_by_name(name).await,
            None => doc.get_worksheet(self.index).await,
        }
    }
}

async fn open(args: &WorkbookArgs) -> SheetResult<SpreadsheetDocument<MemoryService>> {
    let service = MemoryService::from_yaml_file(&args.file)?;
    let key = args
        .document_key
        .clone()
        .unwrap_or_else(|| service.snapshot().key);

    let mut config = ClientConfig::new(key);
    if let Some(path) = &args.credentials {
        config = config.with_credentials_path(path);
    }
    let credentials = config.load_credentials()?;

    let mut doc = SpreadsheetDocument::new(service);
    doc.load(&config.document_key, &credentials).await?;
    Ok(doc)
}

fn save(doc: &SpreadsheetDocument<MemoryService>, args: &WorkbookArgs) -> SheetResult<()> {
    doc.service().save_yaml_file(&args.file)
}

/// Execute the worksheets command - list worksheet titles
pub async fn worksheets(args: WorkbookArgs) -> SheetResult<()> {
    let doc = open(&args).await?;

    println!("{}", "📑 Worksheets".bold().green());
    println!("   File: {}", args.file.display());
    if !doc.title().is_empty() {
        println!("   Document: {}", doc.title().bright_blue().bold());
    }
    println!();

    for (index, title) in doc.worksheet_titles().iter().enumerate() {
        println!("   {} {}", format!("[{}]", index).cyan(), title);
    }

    Ok(())
}

/// Execute the get command - print a cell or a range
pub async fn get(args: WorkbookArgs, sheet: SheetSelector, target: String) -> SheetResult<()> {
    let doc = open(&args).await?;
    let worksheet = sheet.resolve(&doc).await?;

    println!(
        "{} {}!{}",
        "🔍".bold(),
        worksheet.title().bright_blue().bold(),
        target.bold()
    );

    if !target.contains(':') {
        let cell = worksheet.get_cell(&target).await?;
        println!("{}", cell.get_value());
        return Ok(());
    }

    let cells = worksheet.get_cells(&target).await?;
    let first_row = cells.range().min_row() as usize;
    for (offset, row) in cells.rows().into_iter().enumerate() {
        println!(
            "{:>5}  {}",
            (first_row + offset).to_string().cyan(),
            row.join("\t")
        );
    }

    Ok(())
}

/// Execute the set command - write `CELL=VALUE` assignments concurrently
pub async fn set(
    args: WorkbookArgs,
    sheet: SheetSelector,
    assignments: Vec<String>,
) -> SheetResult<()> {
    let assignments = parse_parameters(&assignments)?;
    let doc = open(&args).await?;
    let worksheet = sheet.resolve(&doc).await?;

    let cells = try_join_all(assignments.keys().map(|cell| worksheet.get_cell(cell))).await?;
    try_join_all(
        cells
            .iter()
            .zip(assignments.values())
            .map(|(cell, value)| cell.set_value(value)),
    )
    .await?;

    save(&doc, &args)?;

    println!("{}", "✅ Cells updated".bold().green());
    for (cell, value) in &assignments {
        println!(
            "   {}!{} = {}",
            worksheet.title().bright_blue(),
            cell,
            value.bold()
        );
    }

    Ok(())
}

/// Execute the run command - parameter run from a plan file
pub async fn run(
    args: WorkbookArgs,
    sheet: SheetSelector,
    plan: PathBuf,
    params: Vec<String>,
    dry_run: bool,
) -> SheetResult<()> {
    let plan = ParameterPlan::from_yaml_file(&plan)?;
    let parameters = parse_parameters(&params)?;
    let doc = open(&args).await?;
    let worksheet = sheet.resolve(&doc).await?;

    let result = plan.run(&worksheet, &parameters).await?;

    if dry_run {
        eprintln!(
            "{}",
            "📋 DRY RUN MODE - workbook file left unchanged".yellow()
        );
    } else {
        save(&doc, &args)?;
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
