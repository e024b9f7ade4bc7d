//! Journal entry commands.

use clap::Subcommand;
use ideaspark_core::{
    filter_entries, Config, Entry, EntryDraft, EntryPatch, Journal, Mood, Pipeline,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum EntryAction {
    /// Create a new entry
    New {
        /// Entry title
        title: String,
        /// Entry body
        #[arg(long, default_value = "")]
        content: String,
        /// Mood (inspired, excited, focused, curious, neutral, confused, frustrated, tired)
        #[arg(long)]
        mood: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List entries, optionally filtered
    List {
        /// Case-insensitive search over title and content
        #[arg(long, default_value = "")]
        search: String,
        /// Keep only entries carrying one of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Get {
        /// Entry ID
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Save edits and run the reflection pipeline
    Save {
        /// Entry ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
        /// New mood, or "none" to clear
        #[arg(long)]
        mood: Option<String>,
        /// Comma-separated tags (replaces the tag set)
        #[arg(long)]
        tags: Option<String>,
    },
    /// Answer a generated reflection question
    Answer {
        /// Entry ID
        id: String,
        /// Question index, zero-based
        index: usize,
        /// The answer text
        answer: String,
    },
    /// Toggle completion of an actionable step
    Step {
        /// Entry ID
        id: String,
        /// Step index, zero-based
        index: usize,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: EntryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut journal = Journal::open()?;

    match action {
        EntryAction::New {
            title,
            content,
            mood,
            tags,
        } => {
            let draft = EntryDraft {
                title,
                content,
                mood: mood.map(|m| m.parse::<Mood>()).transpose()?,
                tags: parse_tags(tags),
            };
            let id = journal.create_entry(draft)?;
            println!("Entry created: {id}");
            if let Some(entry) = journal.entry(id) {
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
        }
        EntryAction::List { search, tags, json } => {
            let hits = filter_entries(journal.entries(), &search, &tags);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for entry in hits {
                    print_line(entry);
                }
            }
        }
        EntryAction::Get { id, json } => {
            let id = Uuid::parse_str(&id)?;
            let Some(entry) = journal.entry(id) else {
                return Err(format!("no entry with id {id}").into());
            };
            if json {
                println!("{}", serde_json::to_string_pretty(entry)?);
            } else {
                print_detail(entry);
            }
        }
        EntryAction::Save {
            id,
            title,
            content,
            mood,
            tags,
        } => {
            let id = Uuid::parse_str(&id)?;
            let patch = EntryPatch {
                title,
                content,
                mood: mood.map(parse_mood_patch).transpose()?,
                tags: tags.map(|t| parse_tags(Some(t))),
            };

            let config = Config::load()?;
            let mut pipeline = Pipeline::from_config(&config);
            let rt = tokio::runtime::Runtime::new()?;
            let outcome = rt.block_on(pipeline.process_save(&mut journal, id, patch))?;

            println!("Entry saved: {id}");
            if outcome.questions_generated {
                if let Some(entry) = journal.entry(id) {
                    println!("Generated {} reflection questions:", entry.ai_questions.len());
                    for (i, q) in entry.ai_questions.iter().enumerate() {
                        println!("  [{i}] {}", q.question);
                    }
                }
            }
            if outcome.steps_generated {
                if let Some(entry) = journal.entry(id) {
                    println!("Generated {} actionable steps:", entry.actionable_steps.len());
                    for (i, s) in entry.actionable_steps.iter().enumerate() {
                        println!("  [{i}] {}", s.task);
                    }
                }
            }
        }
        EntryAction::Answer { id, index, answer } => {
            let id = Uuid::parse_str(&id)?;
            journal.answer_question(id, index, answer)?;
            println!("Answer recorded for question {index}");
        }
        EntryAction::Step { id, index } => {
            let id = Uuid::parse_str(&id)?;
            let completed = journal.toggle_step(id, index)?;
            println!(
                "Step {index} marked {}",
                if completed { "completed" } else { "open" }
            );
        }
        EntryAction::Delete { id } => {
            let id = Uuid::parse_str(&id)?;
            journal.delete_entry(id)?;
            println!("Entry deleted: {id}");
        }
    }

    Ok(())
}

fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn parse_mood_patch(value: String) -> Result<Option<Mood>, String> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        value.parse::<Mood>().map(Some)
    }
}

fn print_line(entry: &Entry) {
    let tags = if entry.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entry.tags.join(", "))
    };
    println!(
        "{}  {}  {}{tags}",
        entry.id,
        entry.created_at.format("%Y-%m-%d"),
        entry.title,
    );
}

fn print_detail(entry: &Entry) {
    println!("{}", entry.title);
    println!(
        "created {}  updated {}  stage {:?}",
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.updated_at.format("%Y-%m-%d %H:%M"),
        entry.stage,
    );
    if let Some(mood) = entry.mood {
        println!("mood: {mood}");
    }
    if !entry.tags.is_empty() {
        println!("tags: {}", entry.tags.join(", "));
    }
    if !entry.content.is_empty() {
        println!("\n{}", entry.content);
    }
    if !entry.ai_questions.is_empty() {
        println!("\nReflection questions:");
        for (i, q) in entry.ai_questions.iter().enumerate() {
            let answer = if q.answer.is_empty() { "(unanswered)" } else { q.answer.as_str() };
            println!("  [{i}] {}\n      {answer}", q.question);
        }
    }
    if !entry.actionable_steps.is_empty() {
        println!("\nActionable steps:");
        for (i, s) in entry.actionable_steps.iter().enumerate() {
            let mark = if s.completed { "x" } else { " " };
            println!("  [{mark}] [{i}] {}", s.task);
        }
    }
}
