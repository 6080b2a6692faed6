use crate::models::{AnomalyEvidence, MoodReport};

const RULE: &str = "------------------------------";

/// Human-readable anomaly report, grouped by rule.
pub fn render_anomalies(report: &MoodReport) -> String {
    let mut drops = String::new();
    let mut volatile = String::new();
    let mut quiet = String::new();

    for anomaly in &report.anomalies {
        let date = anomaly.date.format("%Y-%m-%d");
        match anomaly.evidence {
            AnomalyEvidence::SuddenDrop {
                mood_change,
                previous_mean,
                mean_mood,
            } => drops.push_str(&format!(
                "Date: {date}\nMood dropped from {previous_mean:.2} to {mean_mood:.2}\nChange: {mood_change:.2}\n{RULE}\n"
            )),
            AnomalyEvidence::HighVolatility {
                volatility,
                mean_mood,
            } => volatile.push_str(&format!(
                "Date: {date}\nVolatility: {volatility:.2}\nAverage Mood: {mean_mood:.2}\n{RULE}\n"
            )),
            AnomalyEvidence::LowActivityNegative {
                activity_level,
                mean_mood,
            } => quiet.push_str(&format!(
                "Date: {date}\nActivity Level: {activity_level}\nMood Score: {mean_mood:.2}\n{RULE}\n"
            )),
        }
    }

    let mut out = String::from("Mood Anomalies Detected:\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    if report.anomalies.is_empty() {
        out.push_str("No significant anomalies detected in the analyzed period.\n");
        return out;
    }

    for (title, body) in [
        ("Sudden Mood Drops:", drops),
        ("High Mood Volatility Days:", volatile),
        ("Low Activity with Negative Mood:", quiet),
    ] {
        if !body.is_empty() {
            out.push('\n');
            out.push_str(title);
            out.push('\n');
            out.push_str(&body);
        }
    }

    out
}

/// One-paragraph summary of the headline numbers.
pub fn render_summary(report: &MoodReport) -> String {
    let summary = &report.summary;
    let mean = summary
        .mean_mood
        .map(|m| format!("{m:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    let common = summary
        .most_common_mood
        .map(|label| label.to_string())
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "Total events analyzed: {}\nDays analyzed: {}\nAverage mood score: {}\nMost common mood: {}\n",
        summary.total_events, summary.days_analyzed, mean, common
    )
}
