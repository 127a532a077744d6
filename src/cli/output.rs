use crate::cli::CliResult;
use awsipcheck::{AddressRange, CheckResult};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use std::fmt::Write;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Text
--------------------------------------------------------------------------------------*/

/// One-line summary; with `extra`, the matching ranges are appended as JSON objects.
pub fn text(check_result: &CheckResult, extra: bool) -> CliResult<String> {
    if !check_result.found {
        return Ok(format!(
            "IP {} not found in AWS ip ranges",
            check_result.address
        ));
    }

    let mut line = format!("IP {} found in AWS ip range", check_result.address);
    if extra {
        for range in &check_result.matches {
            write!(line, ",{}", serde_json::to_string(range)?)?;
        }
    }
    Ok(line)
}

/*--------------------------------------------------------------------------------------
  JSON
--------------------------------------------------------------------------------------*/

pub fn json(check_result: &CheckResult) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(check_result)?)
}

/*--------------------------------------------------------------------------------------
  Range Table
--------------------------------------------------------------------------------------*/

pub fn range_table(check_result: &CheckResult) -> String {
    let mut output = String::new();

    if check_result.found {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("IP Prefix")
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
            Cell::new("Region")
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
            Cell::new("Network Border Group")
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
            Cell::new("Service")
                .add_attribute(Attribute::Bold)
                .fg(Color::Green),
        ]);

        for range in &check_result.matches {
            table.add_row(range_row(range));
        }

        // Right-align the IP Prefix column
        if let Some(column) = table.column_mut(0) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        output.push_str(&format!("{table}\n"));
    }

    // Summary
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![
        Cell::new("IP Address"),
        Cell::new(check_result.address),
    ]);
    summary_table.add_row(vec![
        Cell::new("Found"),
        Cell::new(if check_result.found { "yes" } else { "no" }),
    ]);
    summary_table.add_row(vec![
        Cell::new("Sync Token"),
        Cell::new(&check_result.sync_token),
    ]);
    summary_table.add_row(vec![
        Cell::new("Create Date"),
        Cell::new(awsipcheck::datetime::format(&check_result.create_date)),
    ]);

    output.push_str(&summary_table.to_string());
    output
}

fn range_row(range: &AddressRange) -> Vec<Cell> {
    vec![
        Cell::new(&range.cidr).add_attribute(Attribute::Bold),
        Cell::new(&range.region),
        Cell::new(range.network_border_group.as_deref().unwrap_or("")),
        Cell::new(&range.service),
    ]
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn test_check_result(found: bool) -> CheckResult {
        let matches = if found {
            vec![AddressRange {
                cidr: "13.32.0.0/15".to_string(),
                region: "GLOBAL".to_string(),
                service: "AMAZON".to_string(),
                network_border_group: Some("GLOBAL".to_string()),
            }]
        } else {
            vec![]
        };

        CheckResult {
            address: "13.32.91.219".parse().unwrap(),
            found,
            matches,
            skipped: vec![],
            sync_token: "1709845985".to_string(),
            create_date: awsipcheck::datetime::parse("2024-03-07-21-13-05").unwrap(),
        }
    }

    #[test]
    fn test_text_found() {
        let check_result = test_check_result(true);

        assert_eq!(
            text(&check_result, false).unwrap(),
            "IP 13.32.91.219 found in AWS ip range"
        );
        assert_eq!(
            text(&check_result, true).unwrap(),
            r#"IP 13.32.91.219 found in AWS ip range,{"ip_prefix":"13.32.0.0/15","region":"GLOBAL","service":"AMAZON","network_border_group":"GLOBAL"}"#
        );
    }

    #[test]
    fn test_text_not_found() {
        let check_result = test_check_result(false);
        assert_eq!(
            text(&check_result, true).unwrap(),
            "IP 13.32.91.219 not found in AWS ip ranges"
        );
    }

    #[test]
    fn test_json() {
        let output = json(&test_check_result(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["found"], true);
        assert_eq!(value["matches"][0]["region"], "GLOBAL");
    }

    #[test]
    fn test_range_table() {
        let output = range_table(&test_check_result(true));

        assert!(output.contains("13.32.0.0/15"));
        assert!(output.contains("1709845985"));
        assert!(output.contains("2024-03-07-21-13-05"));
    }
}
