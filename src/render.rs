//! Terminal rendering of the note list as pinned/unpinned card sections.

use chrono::{Local, TimeZone};
use console::style;

use crate::Note;

/// Splits the collection into (pinned, unpinned), preserving the source
/// order within each subset.
pub fn partition(notes: &[Note]) -> (Vec<&Note>, Vec<&Note>) {
    notes.iter().partition(|note| note.is_pinned)
}

/// Prints the partitioned note list as cards.
///
/// An empty collection prints the empty-state line instead. The unpinned
/// section only carries a heading when a pinned section precedes it.
pub fn render_notes(notes: &[Note], detailed: bool) {
    if notes.is_empty() {
        println!("No notes yet. Create your first note!");
        return;
    }

    let (pinned, unpinned) = partition(notes);

    if !pinned.is_empty() {
        println!("{}", style("📌 Pinned").bold());
        render_section(&pinned, detailed);
    }

    if !unpinned.is_empty() {
        if !pinned.is_empty() {
            println!();
            println!("{}", style("Other notes").bold());
        }
        render_section(&unpinned, detailed);
    }

    println!(
        "\n{} note{}",
        notes.len(),
        if notes.len() == 1 { "" } else { "s" }
    );
}

fn render_section(notes: &[&Note], detailed: bool) {
    let term_width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80);

    for note in notes {
        println!("{}", "-".repeat(term_width.min(50)));
        render_card(note, detailed);
    }
}

fn render_card(note: &Note, detailed: bool) {
    let pin_marker = if note.is_pinned { " 📌" } else { "" };
    println!("{}{}", style(&note.title).bold(), pin_marker);
    println!("ID: {}", style(&note.id).dim());

    if detailed {
        // Full content, whitespace preserved.
        println!("{}", note.content);
    } else {
        let preview = content_preview(&note.content, 100);
        if !preview.is_empty() {
            println!("{}", preview);
        }
    }

    if let Some(updated) = Local.timestamp_millis_opt(note.updated_at).single() {
        println!("{}", style(updated.format("%Y-%m-%d %H:%M")).dim());
    }
}

/// First non-empty line of the content, truncated to `max_chars`.
fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoteDraft;

    fn note(title: &str, pinned: bool) -> Note {
        let mut n = Note::new(NoteDraft::new(title, "body"));
        n.is_pinned = pinned;
        n
    }

    #[test]
    fn partition_preserves_source_order_within_each_subset() {
        let notes = vec![
            note("a", false),
            note("b", true),
            note("c", false),
            note("d", true),
        ];
        let (pinned, unpinned) = partition(&notes);

        let pinned_titles: Vec<_> = pinned.iter().map(|n| n.title.as_str()).collect();
        let unpinned_titles: Vec<_> = unpinned.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(pinned_titles, ["b", "d"]);
        assert_eq!(unpinned_titles, ["a", "c"]);
    }

    #[test]
    fn every_note_lands_in_exactly_one_subset() {
        let notes = vec![note("a", true), note("b", false), note("c", true)];
        let (pinned, unpinned) = partition(&notes);
        assert_eq!(pinned.len() + unpinned.len(), notes.len());
        for n in &notes {
            let in_pinned = pinned.iter().any(|p| p.id == n.id);
            let in_unpinned = unpinned.iter().any(|u| u.id == n.id);
            assert!(in_pinned ^ in_unpinned);
        }
    }

    #[test]
    fn preview_takes_first_non_empty_line_and_truncates_on_chars() {
        assert_eq!(content_preview("\n\nhello\nworld", 100), "hello");
        assert_eq!(content_preview("abcdef", 3), "abc...");
        assert_eq!(content_preview("   ", 10), "");
        // Char-based truncation must not split multi-byte text.
        assert_eq!(content_preview("ééééé", 3), "ééé...");
    }
}
