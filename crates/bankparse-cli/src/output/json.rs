use bankparse_core::attempt::outcome::RunReport;
use bankparse_core::error::BankparseError;

pub fn print(report: &RunReport) -> Result<(), BankparseError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
