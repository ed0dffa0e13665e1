//! Plain-text and JSON rendering of a ranking.

use std::fmt::Write;

use tonica_types::{NoteWeights, PitchSet, Ranking};

pub fn render_text(used: PitchSet, weights: &NoteWeights, ranking: &Ranking, top: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Notes: {}", used);

    let Some(best) = ranking.best() else {
        let _ = writeln!(out, "No notes selected.");
        return out;
    };

    if !weights.is_empty() && weights.max_weight() > 0.0 {
        let total = weights.total();
        let shares: Vec<String> = weights
            .iter()
            .filter(|(pc, _)| used.contains(*pc))
            .map(|(pc, w)| format!("{} {:.0}%", pc, 100.0 * w / total))
            .collect();
        let _ = writeln!(out, "Weights: {}", shares.join(", "));
    }

    let _ = writeln!(out, "Best guess: {}", best);
    for reason in &ranking.explanation.reasons {
        let _ = writeln!(out, "  - {}", reason);
    }
    for caveat in &ranking.explanation.caveats {
        let _ = writeln!(out, "  ! {}", caveat);
    }

    let heading = if ranking.full_match {
        "Keys containing every note:"
    } else {
        "Closest keys:"
    };
    let _ = writeln!(out, "{}", heading);
    let shown = top.unwrap_or(usize::MAX);
    for (i, c) in ranking.candidates.iter().take(shown).enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<9} net {:>8.2}  in {:>3}%  out {:>3}%",
            i + 1,
            c.name(),
            c.net_score,
            c.coverage_in_pct,
            c.coverage_out_pct
        );
    }
    let hidden = ranking.candidates.len().saturating_sub(shown);
    if hidden > 0 {
        let _ = writeln!(out, "     ({} more)", hidden);
    }
    out
}

/// Ranking as JSON, truncated to `top` candidates when given.
pub fn render_json(ranking: &Ranking, top: Option<usize>) -> serde_json::Result<String> {
    match top {
        Some(n) if n < ranking.candidates.len() => {
            let mut trimmed = ranking.clone();
            trimmed.candidates.truncate(n);
            serde_json::to_string_pretty(&trimmed)
        }
        _ => serde_json::to_string_pretty(ranking),
    }
}
