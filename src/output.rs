use crate::inventory::DiskRecord;

const TABLE_HEADERS: [&str; 9] = [
    "Server",
    "Drive",
    "VolumeName",
    "FileSystem",
    "TotalGB",
    "UsedGB",
    "FreeGB",
    "PercentFree",
    "Status",
];

// TotalGB onward are right-aligned
const FIRST_NUMERIC_COLUMN: usize = 4;
const STATUS_COLUMN: usize = 8;

/// Render records as a fixed-column table sized to the widest cell.
///
/// The error column is left out here; it only appears in the CSV export.
pub fn render_table(records: &[DiskRecord]) -> String {
    let rows: Vec<[String; 9]> = records.iter().map(table_row).collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn table_row(record: &DiskRecord) -> [String; 9] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let num = |v: Option<f64>| v.map(|n| format!("{:.2}", n)).unwrap_or_default();
    let status = if record.is_failed() { "FAILED" } else { "OK" };

    [
        record.server.clone(),
        text(&record.drive),
        text(&record.volume_name),
        text(&record.file_system),
        num(record.total_gb),
        num(record.used_gb),
        num(record.free_gb),
        num(record.percent_free),
        status.to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if (FIRST_NUMERIC_COLUMN..STATUS_COLUMN).contains(&i) {
            line.push_str(&format!("{:>width$}", cell, width = *width));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `N hosts, M disks, K failed`
pub fn summary_line(host_count: usize, records: &[DiskRecord]) -> String {
    let failed = records.iter().filter(|r| r.is_failed()).count();
    let disks = records.len() - failed;
    format!(
        "{}, {}, {} failed",
        count_noun(host_count, "host"),
        count_noun(disks, "disk"),
        failed
    )
}

fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::FixedDisk;

    fn sample() -> Vec<DiskRecord> {
        vec![
            DiskRecord::from_disk(
                "web01",
                &FixedDisk {
                    device_id: "/".to_string(),
                    volume_name: Some("/dev/sda1".to_string()),
                    file_system: Some("ext4".to_string()),
                    total_bytes: 100 << 30,
                    free_bytes: 40 << 30,
                },
            ),
            DiskRecord::failed("db01.example.net", "Ping failed"),
        ]
    }

    #[test]
    fn table_has_every_column_but_error() {
        let table = render_table(&sample());
        let header = table.lines().next().unwrap();

        for column in TABLE_HEADERS {
            assert!(header.contains(column), "missing {column}");
        }
        assert!(!table.contains("Error"));
        assert!(!table.contains("Ping failed"));
    }

    #[test]
    fn columns_line_up_and_numbers_use_two_decimals() {
        let table = render_table(&sample());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));
        assert!(lines[2].contains("100.00"));
        assert!(lines[2].contains("60.00"));
        assert!(lines[2].contains("40.00"));
        assert!(lines[2].ends_with("OK"));
        assert!(lines[3].starts_with("db01.example.net"));
        assert!(lines[3].ends_with("FAILED"));

        // server column is as wide as its longest entry
        let status_at = lines[0].find("Status").unwrap();
        assert_eq!(lines[2].find("OK"), Some(status_at));
        assert_eq!(lines[3].find("FAILED"), Some(status_at));
    }

    #[test]
    fn empty_table_is_just_headers() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn summary_counts_disks_and_failures() {
        assert_eq!(summary_line(2, &sample()), "2 hosts, 1 disk, 1 failed");
    }

    #[test]
    fn summary_pluralizes_counts() {
        assert_eq!(summary_line(1, &[]), "1 host, 0 disks, 0 failed");
        let failed_only = [DiskRecord::failed("A", "Ping failed")];
        assert_eq!(summary_line(1, &failed_only), "1 host, 0 disks, 1 failed");
    }
}
