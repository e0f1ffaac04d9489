use colored::*;
use serde_json::json;
use shipments_validator::AuditRun;

pub fn print_audit_report(run: &AuditRun, format: &str) {
    match format {
        "json" => print_json_report(run),
        _ => print_text_report(run),
    }
}

fn print_text_report(run: &AuditRun) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  AUDIT REPORT".bold());
    println!("{}", "═".repeat(60));

    if run.report.is_empty() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "No defects detected".green().bold()
        );
    } else {
        for (domain, defects) in run.report.iter() {
            println!("\n{}", format!("[{domain}]").bold());
            for (kind, defect) in defects {
                println!(
                    "  {} - rows affected: {}, positions: {:?}",
                    kind.to_string().yellow(),
                    defect.count,
                    defect.rows
                );
            }
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Records audited: {}", run.stats.records_audited);
    println!("  Defect kinds:    {}", run.report.total_defects());
    println!("  Duration:        {}ms", run.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(run: &AuditRun) {
    let output = json!({
        "report": run.report,
        "summary": {
            "records_audited": run.stats.records_audited,
            "defect_kinds": run.report.total_defects(),
            "duration_ms": run.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
