//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use claimset_domain::{AnomalyKind, Claim, ClaimNumber, ClaimSet, ClaimStatus, ReferentialAnomaly, ReissueMarkup};
use claimset_parser::BatchReport;
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format every claim of a claim set.
    pub fn format_claim_set(&self, set: &ClaimSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_claim_set_json(set),
            OutputFormat::Table => Ok(self.format_claim_set_table(set)),
            OutputFormat::Quiet => Ok(numbers(set.iter())),
        }
    }

    /// Format the dependency forest of a claim set.
    pub fn format_tree(&self, set: &ClaimSet) -> Result<String> {
        let roots = tree_roots(set);
        match self.format {
            OutputFormat::Json => {
                let forest: Vec<Value> = roots.iter().map(|claim| tree_json(set, claim)).collect();
                Ok(serde_json::to_string_pretty(&forest)?)
            }
            OutputFormat::Table => {
                let mut lines = Vec::new();
                for claim in roots {
                    lines.push(self.tree_label(claim));
                    self.tree_children(set, claim, "", &mut lines);
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(numbers(roots.into_iter())),
        }
    }

    /// Format the outcome of a check run.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report
                .failed()
                .map(|d| d.document_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format claims as JSON.
    fn format_claim_set_json(&self, set: &ClaimSet) -> Result<String> {
        let claims: Vec<Value> = set.iter().map(claim_json).collect();
        let anomalies: Vec<Value> = set.anomalies().iter().map(anomaly_json).collect();

        Ok(serde_json::to_string_pretty(&json!({
            "claims": claims,
            "anomalies": anomalies,
        }))?)
    }

    /// Format claims as a table.
    fn format_claim_set_table(&self, set: &ClaimSet) -> String {
        if set.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Claim", "Kind", "Depends On", "Dependents", "Limitations"]);

        for claim in set {
            builder.push_record([
                claim.number.to_string(),
                kind_label(claim),
                join_numbers(claim.depends_on.iter()),
                join_numbers(claim.dependent_claims.iter()),
                claim.body(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = table.to_string();
        for anomaly in set.anomalies() {
            output.push('\n');
            output.push_str(&self.warning(&anomaly.to_string()));
        }
        output
    }

    fn format_report_json(&self, report: &BatchReport) -> Result<String> {
        let documents: Vec<Value> = report
            .documents
            .iter()
            .map(|d| {
                json!({
                    "document_id": d.document_id,
                    "ok": d.is_ok(),
                    "claims": d.claim_count(),
                    "anomalies": d.anomaly_count(),
                    "error": d.result.as_ref().err().map(|e| e.to_string()),
                })
            })
            .collect();
        let metadata = &report.metadata;

        Ok(serde_json::to_string_pretty(&json!({
            "documents": documents,
            "metadata": {
                "total_documents": metadata.total_documents,
                "failed_documents": metadata.failed_documents,
                "total_claims": metadata.total_claims,
                "total_anomalies": metadata.total_anomalies,
                "processing_time_ms": metadata.processing_time_ms,
            },
        }))?)
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Document", "Status", "Claims", "Anomalies"]);

        for document in &report.documents {
            let status = if document.is_ok() { "ok" } else { "failed" };
            builder.push_record([
                document.document_id.clone(),
                status.to_string(),
                document.claim_count().to_string(),
                document.anomaly_count().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![table.to_string()];
        for document in &report.documents {
            match &document.result {
                Err(e) => lines.push(self.error(&format!("{}: {}", document.document_id, e))),
                Ok(set) => {
                    for anomaly in set.anomalies() {
                        lines.push(self.warning(&format!("{}: {}", document.document_id, anomaly)));
                    }
                }
            }
        }

        let metadata = &report.metadata;
        let summary = format!(
            "Checked {} document(s): {} claim(s), {} failed ({} ms)",
            metadata.total_documents, metadata.total_claims, metadata.failed_documents, metadata.processing_time_ms
        );
        lines.push(if metadata.failed_documents == 0 {
            self.success(&summary)
        } else {
            self.error(&summary)
        });

        lines.join("\n")
    }

    fn tree_children(&self, set: &ClaimSet, parent: &Claim, indent: &str, lines: &mut Vec<String>) {
        let children = tree_children_of(set, parent);
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let branch = if last { "└── " } else { "├── " };
            let mut line = format!("{}{}{}", indent, branch, self.tree_label(child));
            let also = other_parents(set, child);
            if !also.is_empty() {
                line.push_str(&format!(" (also {})", join_numbers(also.iter())));
            }
            lines.push(line);

            let next_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
            self.tree_children(set, child, &next_indent, lines);
        }
    }

    fn tree_label(&self, claim: &Claim) -> String {
        let label = format!("{}. {}", claim.number, preview(claim));
        if claim.is_cancelled() {
            self.colorize(&label, "yellow")
        } else if claim.is_independent() {
            self.colorize(&label, "cyan")
        } else {
            label
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Claims shown at the top level of the tree: those with no resolved parent
fn tree_roots(set: &ClaimSet) -> Vec<&Claim> {
    set.iter().filter(|claim| tree_parent(set, claim).is_none()).collect()
}

/// The one parent a claim is drawn under: its lowest resolved earlier claim
///
/// Multiple-dependent claims would otherwise repeat once per path through
/// the dependency graph.
fn tree_parent(set: &ClaimSet, claim: &Claim) -> Option<ClaimNumber> {
    claim
        .depends_on
        .iter()
        .copied()
        .filter(|d| *d < claim.number && set.contains(*d))
        .min()
}

fn tree_children_of<'a>(set: &'a ClaimSet, parent: &Claim) -> Vec<&'a Claim> {
    set.dependent_claims_of(parent.number)
        .into_iter()
        .filter(|child| tree_parent(set, child) == Some(parent.number))
        .collect()
}

/// Resolved parents other than the one the claim is drawn under
fn other_parents(set: &ClaimSet, claim: &Claim) -> Vec<ClaimNumber> {
    let shown = tree_parent(set, claim);
    let mut parents: Vec<ClaimNumber> = claim
        .depends_on
        .iter()
        .copied()
        .filter(|d| *d < claim.number && set.contains(*d) && Some(*d) != shown)
        .collect();
    parents.sort_unstable();
    parents
}

fn tree_json(set: &ClaimSet, claim: &Claim) -> Value {
    let children: Vec<Value> = tree_children_of(set, claim)
        .into_iter()
        .map(|child| tree_json(set, child))
        .collect();
    json!({
        "number": claim.number,
        "text": preview(claim),
        "also": other_parents(set, claim),
        "dependents": children,
    })
}

fn claim_json(claim: &Claim) -> Value {
    json!({
        "number": claim.number,
        "status": match claim.status {
            ClaimStatus::Active => "active",
            ClaimStatus::Cancelled => "cancelled",
        },
        "markup": claim.markup.map(markup_label),
        "limitations": claim.limitations,
        "depends_on": claim.depends_on,
        "dependent_claims": claim.dependent_claims,
    })
}

fn anomaly_json(anomaly: &ReferentialAnomaly) -> Value {
    json!({
        "claim": anomaly.claim,
        "reference": anomaly.reference,
        "kind": match anomaly.kind {
            AnomalyKind::SelfReference => "self_reference",
            AnomalyKind::ForwardReference => "forward_reference",
            AnomalyKind::MissingClaim => "missing_claim",
        },
        "message": anomaly.to_string(),
    })
}

fn kind_label(claim: &Claim) -> String {
    let kind = if claim.is_cancelled() {
        "cancelled"
    } else if claim.is_multiple_dependent() {
        "multiple dependent"
    } else if claim.is_dependent() {
        "dependent"
    } else {
        "independent"
    };

    match claim.markup {
        Some(markup) => format!("{} ({})", kind, markup_label(markup)),
        None => kind.to_string(),
    }
}

fn markup_label(markup: ReissueMarkup) -> &'static str {
    match markup {
        ReissueMarkup::Added => "added",
        ReissueMarkup::Bracketed => "bracketed",
    }
}

fn preview(claim: &Claim) -> String {
    let first = claim.limitations.first().map(String::as_str).unwrap_or_default();
    if first.chars().count() <= PREVIEW_CHARS {
        return first.to_string();
    }
    let truncated: String = first.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", truncated.trim_end())
}

fn join_numbers<'a>(numbers: impl Iterator<Item = &'a u32>) -> String {
    numbers.map(u32::to_string).collect::<Vec<_>>().join(", ")
}

fn numbers<'a>(claims: impl Iterator<Item = &'a Claim>) -> String {
    claims.map(|c| c.number.to_string()).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimset_parser::ClaimParser;

    fn parse(text: &str) -> ClaimSet {
        ClaimParser::default().parse(text).unwrap()
    }

    fn widget_set() -> ClaimSet {
        parse(
            "1. A widget comprising: a frame; and a handle.\n\
             2. The widget of claim 1, wherein the handle is metal.\n\
             3. The widget of claim 1 or claim 2, with a coating.\n\
             4. The widget of claim 9.",
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_claim_set(&widget_set()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["claims"][0]["limitations"][0], "a widget comprising:");
        assert_eq!(value["claims"][2]["depends_on"], json!([1, 2]));
        assert_eq!(value["claims"][0]["dependent_claims"], json!([2, 3]));
        assert_eq!(value["anomalies"][0]["kind"], "forward_reference");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_claim_set(&widget_set()).unwrap();
        assert_eq!(output, "1\n2\n3\n4");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_claim_set(&widget_set()).unwrap();
        assert!(output.contains("Depends On"));
        assert!(output.contains("multiple dependent"));
        assert!(output.contains("⚠ claim 4"));
    }

    #[test]
    fn test_empty_claims() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_claim_set(&ClaimSet::default()).unwrap();
        assert!(output.contains("No claims found"));
    }

    #[test]
    fn test_tree() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_tree(&widget_set()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1. a widget comprising:");
        assert_eq!(lines[1], "├── 2. the widget of claim 1, wherein the handle is metal.");
        assert_eq!(lines[2], "└── 3. the widget of claim 1 or claim 2, with a coating. (also 2)");
        assert_eq!(lines[3], "4. the widget of claim 9.");
    }

    #[test]
    fn test_tree_quiet_and_json() {
        let set = widget_set();
        let quiet = Formatter::new(OutputFormat::Quiet, false).format_tree(&set).unwrap();
        assert_eq!(quiet, "1\n4");

        let json = Formatter::new(OutputFormat::Json, false).format_tree(&set).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["dependents"][0]["number"], 2);
        assert_eq!(value[0]["dependents"][0]["dependents"], json!([]));
        assert_eq!(value[0]["dependents"][1]["number"], 3);
        assert_eq!(value[0]["dependents"][1]["also"], json!([2]));
    }

    #[test]
    fn test_tree_shows_each_claim_once() {
        let mut text = String::from("1. A widget comprising a frame.");
        for number in 2..=22 {
            text.push_str(&format!("\n{}. The widget of any one of the preceding claims.", number));
        }
        let set = parse(&text);
        assert_eq!(set.get(22).unwrap().depends_on.len(), 21);

        let table = Formatter::new(OutputFormat::Table, false).format_tree(&set).unwrap();
        assert_eq!(table.lines().count(), 22);
        assert!(table.contains("└── 22. the widget of any one of the preceding claims. (also 2, 3,"));

        let json = Formatter::new(OutputFormat::Json, false).format_tree(&set).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["dependents"].as_array().unwrap().len(), 21);
        assert_eq!(value[0]["dependents"][0]["dependents"], json!([]));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "a ".repeat(50);
        let claim = Claim::new(1, vec![long], vec![]);
        let shown = preview(&claim);
        assert!(shown.ends_with('…'));
        assert!(shown.chars().count() <= PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.info("test"), "ℹ test");
    }
}
