use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use empathyscope::config::Config;
use empathyscope::{AffectSensor, EmotionalState};

#[derive(Parser)]
#[command(name = "empathyscope")]
#[command(about = "Sense the emotions in short informal text", version)]
pub struct Args {
    /// Directory holding config.json (defaults to the user config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a piece of text
    Feel {
        /// Text to analyse (joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
        /// Print the emotional state as JSON
        #[arg(long)]
        json: bool,
        /// Only show the N strongest emotions
        #[arg(long)]
        top: Option<usize>,
        /// Also list the matched lexicon words
        #[arg(long)]
        words: bool,
    },
    /// Score stdin line by line as one conversation
    Chat {
        /// Print each emotional state as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Show the lexicon record for a word or emoticon
    Lookup { word: String },
    /// Show the configuration file in use
    Config,
}

pub fn handle_feel(
    sensor: &AffectSensor,
    text: &str,
    json: bool,
    top: Option<usize>,
    words: bool,
) -> Result<()> {
    let state = sensor.feel(text);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).context("Failed to serialize emotional state")?
        );
        return Ok(());
    }

    print!("{}", render_state(&state, top));

    if words {
        let matched = sensor.sense(&state.text);
        if matched.is_empty() {
            println!("📖 No lexicon words matched");
        } else {
            println!("📖 Matched words ({}):", matched.len());
            for word in matched {
                println!("  {}", word);
            }
        }
    }

    Ok(())
}

pub fn handle_chat(sensor: &AffectSensor, json: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let mut conversation: Vec<Arc<EmotionalState>> = Vec::new();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let state = match conversation.last() {
            Some(previous) => sensor.feel_after(&line, previous),
            None => sensor.feel(&line),
        };

        if json {
            println!(
                "{}",
                serde_json::to_string(&state).context("Failed to serialize emotional state")?
            );
        } else {
            let shift = state
                .previous()
                .map(|previous| i16::from(state.valence) - i16::from(previous.valence))
                .unwrap_or(0);
            println!(
                "{} [{}] valence {:+} (shift {:+})",
                state.strongest_emotion(),
                state.text,
                state.valence,
                shift
            );
        }

        conversation.push(Arc::new(state));
    }

    tracing::debug!(lines = conversation.len(), "Conversation finished");
    Ok(())
}

pub fn handle_lookup(sensor: &AffectSensor, word: &str) -> Result<()> {
    let lexicon = sensor.lexicon();
    match lexicon
        .lookup_emoticon(word)
        .or_else(|| lexicon.lookup_word(word))
    {
        Some(record) => {
            println!("{}", record);
            println!("Valence: {}", record.general_valence());
        }
        None => println!("'{}' is not in the lexicon", word),
    }

    if lexicon.is_negation(word) {
        println!("'{}' is a negation word", word);
    }
    if lexicon.is_intensity_modifier(word) {
        println!("'{}' is an intensity modifier", word);
    }
    Ok(())
}

pub fn handle_config(config: &Config) -> Result<()> {
    println!("Config file: {}", config.config_file().display());
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    );
    Ok(())
}

/// Human-readable summary of a state, strongest emotions first.
pub fn render_state(state: &EmotionalState, top: Option<usize>) -> String {
    let emotions = match top {
        Some(n) => state.first_strongest(n),
        None => state.emotions(),
    };

    let mut out = String::new();
    out.push_str(&format!("🎭 Strongest: {}\n", state.strongest_emotion()));
    out.push_str(&format!(
        "📊 General weight: {:.3}  Valence: {:+}\n",
        state.general_weight, state.valence
    ));
    for emotion in emotions {
        out.push_str(&format!("  {:<10} {}\n", emotion.kind.name(), bar(emotion.weight)));
    }
    out
}

fn bar(weight: f64) -> String {
    let filled = (weight.clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("{}{} {:.0}%", "█".repeat(filled), "░".repeat(20 - filled), weight * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use empathyscope::{Emotion, EmotionKind};

    #[test]
    fn test_render_state_top() {
        let state = EmotionalState::new(
            "test",
            vec![
                Emotion::new(EmotionKind::Anger, 0.8),
                Emotion::new(EmotionKind::Sadness, 0.3),
            ],
            0.8,
            -1,
        );

        let full = render_state(&state, None);
        assert!(full.contains("Strongest: anger: 0.800"));
        assert!(full.contains("sadness"));

        let top = render_state(&state, Some(1));
        assert!(!top.contains("sadness"));
    }

    #[test]
    fn test_bar() {
        assert!(bar(0.5).ends_with("50%"));
        assert_eq!(bar(1.0).chars().filter(|&c| c == '█').count(), 20);
    }
}
