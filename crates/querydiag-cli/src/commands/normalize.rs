use anyhow::Result;
use querydiag::DiagnosticFormatter;
use std::path::Path;

pub fn run(formatter: &DiagnosticFormatter, input: &Path) -> Result<()> {
    let text = super::read_input(input)?;
    println!("{}", formatter.normalize(&text));
    Ok(())
}
