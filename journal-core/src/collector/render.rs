use super::stats::MessageStats;
use crate::importance::Importance;

pub fn render_report(stats: &MessageStats) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n=== Statistics ===\n\
         Total messages: {}\n\
         By importance:\n",
        stats.total()
    ));

    for importance in Importance::ALL {
        let label = format!("{}:", importance.as_str());
        out.push_str(&format!(
            "  {:<8}{}\n",
            label,
            stats.by_importance(importance)
        ));
    }

    out.push_str(&format!(
        "Last hour: {} messages\n\
         Message lengths:\n\
         \x20 Min: {}\n\
         \x20 Max: {}\n\
         \x20 Avg: {:.2}\n\
         =================\n",
        stats.last_hour_count(),
        stats.min_len(),
        stats.max_len(),
        stats.avg_len()
    ));

    out
}
