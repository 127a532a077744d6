use crate::cli::CliResult;
use awsipcheck::CheckResult;
use std::io;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save Matching AWS IP Ranges to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(check_result: &CheckResult, path: &Path) -> CliResult<()> {
    let file = std::fs::File::create(path)?;
    write(check_result, file)
}

pub fn write<W: io::Write>(check_result: &CheckResult, writer: W) -> CliResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    // Write header
    writer.serialize([
        "IP Address",
        "AWS IP Prefix",
        "Region",
        "Network Border Group",
        "Service",
    ])?;

    // Write matching range records
    for range in &check_result.matches {
        let record = (
            check_result.address,
            &range.cidr,
            &range.region,
            range.network_border_group.as_deref().unwrap_or(""),
            &range.service,
        );
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
