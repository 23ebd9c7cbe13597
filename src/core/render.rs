use crate::domain::model::ServiceListEntry;
use crate::domain::ports::ApiResponse;
use crate::utils::error::{CraneError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// 2xx 回傳本文，其餘狀態碼一律以本文作為錯誤訊息
pub fn expect_success(response: ApiResponse) -> Result<Vec<u8>> {
    if response.is_success() {
        Ok(response.body)
    } else {
        tracing::debug!("API responded with status {}", response.status);
        Err(CraneError::api(&response.body))
    }
}

pub fn decode_service_list(body: &[u8]) -> Result<Vec<ServiceListEntry>> {
    Ok(serde_json::from_slice(body)?)
}

/// Renders the service list; an empty list renders as nothing at all.
pub fn service_table(entries: &[ServiceListEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut table = Table::new(["Services", "Instances"]);
    for entry in entries {
        table.add_row([entry.service.clone(), entry.instances.join(", ")]);
    }
    tracing::debug!("Rendering table with {} rows", entries.len());
    table.to_string()
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.width();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        let separator: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+";

        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                // Terminal columns, so wide (CJK) names stay aligned.
                let padding = width - cell.width();
                write!(f, "| {}{} ", cell, " ".repeat(padding))?;
            }
            writeln!(f, "|")
        };

        writeln!(f, "{}", separator)?;
        write_row(f, &self.headers)?;
        writeln!(f, "{}", separator)?;
        for row in &self.rows {
            write_row(f, row)?;
        }
        writeln!(f, "{}", separator)
    }
}

/// 伺服器宣告的最低版本高於目前版本時，輸出警告到 stderr
pub fn warn_if_unsupported(
    response: &ApiResponse,
    current: &str,
    stderr: &mut dyn Write,
) -> Result<()> {
    let Some(supported) = response.supported_version.as_deref() else {
        return Ok(());
    };

    if compare_versions(supported, current) == Some(Ordering::Greater) {
        tracing::warn!(
            "Server requires crane {} or later, running {}",
            supported,
            current
        );
        write!(
            stderr,
            "#####\nWARNING: You're using an unsupported version of crane.\n\
             You must have at least version {}, your current version is {}.\n#####\n\n",
            supported, current
        )?;
    }
    Ok(())
}

fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let parse = |v: &str| -> Option<Vec<u64>> {
        v.trim()
            .trim_start_matches('v')
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect()
    };
    let (mut a, mut b) = (parse(a)?, parse(b)?);
    let len = a.len().max(b.len());
    a.resize(len, 0);
    b.resize(len, 0);
    Some(a.cmp(&b))
}
