//! Terminal rendering of analysis reports.

use chatpression_application::AnalysisReport;
use chatpression_core::analysis::{TipKind, score_color, share_text};
use chatpression_core::unlock::ReportSection;
use colored::{ColoredString, Colorize};
use serde_json::Value;
use std::fmt::Write;
use strum::IntoEnumIterator;

const BAR_WIDTH: usize = 20;

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn bar(score: u8) -> String {
    let filled = usize::from(score) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bold());
}

fn locked(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{} {}", "🔒".dimmed(), title.dimmed());
}

/// Renders the report, hiding the sections the gate keeps locked.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let result = &report.result;
    let data = &result.type_data;

    for section in ReportSection::iter() {
        if !report.gate.can_view(section) {
            locked(&mut out, section_title(section));
            continue;
        }
        match section {
            ReportSection::PersonalityType => {
                let _ = writeln!(
                    out,
                    "{} {}",
                    data.emoji,
                    paint(&format!("{} ({})", data.name, data.code), &data.color).bold()
                );
                let _ = writeln!(out, "{}", data.description);
            }
            ReportSection::IndicatorChart => {
                heading(&mut out, section_title(section));
                for entry in &result.details {
                    let _ = writeln!(
                        out,
                        "{} {:<12} {} {:>3}",
                        entry.icon,
                        entry.name,
                        paint(&bar(entry.score), score_color(entry.score)),
                        entry.score
                    );
                }
            }
            ReportSection::Strengths => {
                heading(&mut out, section_title(section));
                for strength in &result.strengths {
                    let _ = writeln!(out, "  {} {}", "+".green(), strength);
                }
            }
            ReportSection::Weaknesses => {
                heading(&mut out, section_title(section));
                for weakness in &result.weaknesses {
                    let _ = writeln!(out, "  {} {}", "-".red(), weakness);
                }
            }
            ReportSection::Improvements => {
                heading(&mut out, section_title(section));
                for item in &result.improvements {
                    let _ = writeln!(out, "  {}: {}", item.title.bold(), item.description);
                }
            }
            ReportSection::PersonalAnalysis => {
                heading(&mut out, section_title(section));
                let personal = &report.personal;
                let _ = writeln!(
                    out,
                    "  메시지 {}개 · 평균 {}자 · 질문 {}개 · 감정 표현 {}개",
                    personal.message_count,
                    personal.average_length,
                    personal.question_count,
                    personal.expressive_count
                );
                for phrase in &personal.traits {
                    let _ = writeln!(out, "  • {}", phrase);
                }
            }
            ReportSection::IndicatorDetails => {
                heading(&mut out, section_title(section));
                for entry in &result.details {
                    let _ = writeln!(out, "  {} {} ({})", entry.icon, entry.name.bold(), entry.score);
                    let _ = writeln!(out, "     {}", entry.text);
                }
            }
            ReportSection::Tips => {
                heading(&mut out, section_title(section));
                for tip in &result.tips {
                    let marker = match tip.kind {
                        TipKind::Strength => "★".yellow(),
                        TipKind::Improvement => "▲".cyan(),
                        TipKind::Generic => "•".normal(),
                    };
                    let _ = writeln!(out, "  {} {}: {}", marker, tip.title.bold(), tip.description);
                }
            }
        }
    }

    if report.gate.is_unlocked() {
        let _ = writeln!(out, "\n{}", share_text(result).dimmed());
    } else {
        let _ = writeln!(
            out,
            "\n{}",
            "`chatpression unlock`으로 상세 분석을 열 수 있어요.".bright_black()
        );
    }
    out
}

fn section_title(section: ReportSection) -> &'static str {
    match section {
        ReportSection::PersonalityType => "대화 유형",
        ReportSection::IndicatorChart => "대화 지표",
        ReportSection::Strengths => "강점",
        ReportSection::Weaknesses => "약점",
        ReportSection::Improvements => "개선 포인트",
        ReportSection::PersonalAnalysis => "나의 대화 분석",
        ReportSection::IndicatorDetails => "지표별 피드백",
        ReportSection::Tips => "맞춤 팁",
    }
}

/// JSON view of the report. Locked sections are left out.
pub fn report_json(report: &AnalysisReport) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(report)?;
    let unlocked = report.gate.is_unlocked();
    if let Value::Object(map) = &mut value {
        map.insert("unlocked".to_string(), Value::Bool(unlocked));
        if !unlocked {
            map.remove("personal");
            if let Some(Value::Object(result)) = map.get_mut("result") {
                for key in ["strengths", "weaknesses", "improvements", "details", "tips"] {
                    result.remove(key);
                }
                if let Some(Value::Object(type_data)) = result.get_mut("typeData") {
                    for key in ["strengths", "weaknesses", "improvements"] {
                        type_data.remove(key);
                    }
                }
            }
        }
    }
    Ok(value)
}
