use crate::app::models::DirReport;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn generate_report(reports: &[DirReport], scan: bool) -> String {
        let mut blocks = Vec::new();

        for report in reports {
            let mut out = String::new();
            let name = if report.relative_path.is_empty() {
                "."
            } else {
                report.relative_path.as_str()
            };
            let mode = if report.rule_per_file {
                "rule per file"
            } else {
                "rule per directory"
            };
            out.push_str(&format!("{} [{}]\n", name, mode));

            if let Some(build_file) = &report.build_file {
                out.push_str(&format!("    build file: {}\n", build_file.display()));
            }
            for (token, label) in &report.grep_externs {
                out.push_str(&format!("    extern: {} -> {}\n", token, label));
            }
            for diag in &report.diagnostics {
                out.push_str(&format!("    warning: {}\n", diag));
            }
            if scan {
                for file in &report.files {
                    if let Some(err) = &file.error {
                        out.push_str(&format!("    {}: error: {}\n", file.relative_path, err));
                    } else if file.labels.is_empty() {
                        out.push_str(&format!("    {}: (no externs)\n", file.relative_path));
                    } else {
                        out.push_str(&format!(
                            "    {}: {}\n",
                            file.relative_path,
                            file.labels.join(", ")
                        ));
                    }
                }
            }

            blocks.push(out.trim_end().to_string());
        }

        blocks.join("\n")
    }

    pub fn count_diagnostics(reports: &[DirReport]) -> usize {
        reports.iter().map(|r| r.diagnostics.len()).sum()
    }
}
