//! Export pipelines: entry detail to a markdown document, actionable
//! steps to an iCalendar file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::entry::{ActionableStep, Entry};
use crate::error::ExportError;

/// Render the fixed entry-detail template and write it next to the
/// journal data as `IdeaSpark_<title>.md`.
pub fn export_entry(entry: &Entry, dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join(format!("IdeaSpark_{}.md", file_stem(&entry.title)));
    let doc = render_entry(entry);
    std::fs::write(&path, doc).map_err(|source| ExportError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write one VTODO per actionable step to `IdeaSpark_tasks.ics`.
pub fn export_steps(steps: &[ActionableStep], dir: &Path) -> Result<PathBuf, ExportError> {
    ensure_dir(dir)?;
    let path = dir.join("IdeaSpark_tasks.ics");

    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//IdeaSpark//EN\r\n");
    for (index, step) in steps.iter().enumerate() {
        let status = if step.completed { "COMPLETED" } else { "NEEDS-ACTION" };
        ics.push_str("BEGIN:VTODO\r\n");
        ics.push_str(&format!("UID:ideaspark-task-{index}-{stamp}\r\n"));
        ics.push_str(&format!("DTSTAMP:{stamp}\r\n"));
        ics.push_str(&format!("SUMMARY:{}\r\n", escape_ics(&step.task)));
        ics.push_str(&format!("STATUS:{status}\r\n"));
        ics.push_str("END:VTODO\r\n");
    }
    ics.push_str("END:VCALENDAR\r\n");

    std::fs::write(&path, ics).map_err(|source| ExportError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::DirFailed {
        path: dir.to_path_buf(),
        source,
    })
}

fn render_entry(entry: &Entry) -> String {
    let mut doc = format!("# {}\n\n", entry.title);
    doc.push_str(&format!(
        "Created: {}  \nUpdated: {}\n",
        entry.created_at.format("%a, %b %-d, %Y"),
        entry.updated_at.format("%a, %b %-d, %Y"),
    ));
    if let Some(mood) = entry.mood {
        doc.push_str(&format!("Mood: {mood}\n"));
    }
    if !entry.tags.is_empty() {
        doc.push_str(&format!("Tags: {}\n", entry.tags.join(", ")));
    }
    doc.push_str(&format!("\n{}\n", entry.content));

    if !entry.ai_questions.is_empty() {
        doc.push_str("\n## Reflection\n\n");
        for q in &entry.ai_questions {
            doc.push_str(&format!("- **{}**\n", q.question));
            if !q.answer.is_empty() {
                doc.push_str(&format!("  {}\n", q.answer));
            }
        }
    }

    if !entry.actionable_steps.is_empty() {
        doc.push_str("\n## Actionable steps\n\n");
        for step in &entry.actionable_steps {
            let mark = if step.completed { "x" } else { " " };
            doc.push_str(&format!("- [{mark}] {}\n", step.task));
        }
    }

    doc
}

/// Whitespace to underscores, path-hostile characters dropped.
fn file_stem(title: &str) -> String {
    let collapsed: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn escape_ics(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{AiQuestion, EntryDraft};

    #[test]
    fn document_export_uses_title_in_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut entry = Entry::new(EntryDraft {
            title: "My Big Idea".into(),
            content: "something worth keeping".into(),
            ..Default::default()
        });
        entry.ai_questions = vec![AiQuestion {
            question: "Why?".into(),
            answer: "Because.".into(),
        }];

        let path = export_entry(&entry, dir.path()).unwrap();
        assert!(path.ends_with("IdeaSpark_My_Big_Idea.md"));
        let doc = std::fs::read_to_string(path).unwrap();
        assert!(doc.contains("# My Big Idea"));
        assert!(doc.contains("Because."));
    }

    #[test]
    fn calendar_export_writes_a_vtodo_per_step() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            ActionableStep { task: "Research, then decide".into(), completed: false },
            ActionableStep { task: "Ship it".into(), completed: true },
        ];

        let path = export_steps(&steps, dir.path()).unwrap();
        let ics = std::fs::read_to_string(path).unwrap();
        assert_eq!(ics.matches("BEGIN:VTODO").count(), 2);
        assert!(ics.contains("SUMMARY:Research\\, then decide"));
        assert!(ics.contains("STATUS:COMPLETED"));
        assert!(ics.contains("STATUS:NEEDS-ACTION"));
    }

    #[test]
    fn hostile_titles_become_safe_stems() {
        assert_eq!(file_stem("a/b c"), "ab_c");
        assert_eq!(file_stem("  spaced   out  "), "spaced_out");
    }
}
