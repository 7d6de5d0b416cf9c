//! Command Line Parsing
//!
//! Turns one line of shell input into a [`CarouselIntent`]. Slide numbers are
//! 1-based here and converted to the manager's 0-based indices. Field edits
//! must name an existing slide in the latest snapshot.

use thiserror::Error;

use carousel_core::{
    BackgroundStyle, CarouselIntent, Format, SlideField, Tone, UnknownField, UnknownFormat,
    UnknownTone,
};

/// Help text printed by `help`
pub const HELP: &str = "\
Commands:
  topic <text>              set the topic
  tone <expert|funny|motivational>
  format <feed|story>
  generate                  generate slides from topic and tone
  set <n> <field> <value>   edit a slide (field: title, content, emoji, bg)
  add                       append a slide
  rm <n>                    remove slide n
  bg <style>                use one background on every slide
  select <n> | next | prev  change the selected slide
  copy                      export the carousel as text
  dismiss                   hide the notification
  help | quit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the manager
    Intent(CarouselIntent),
    /// Print the help text
    Help,
    /// Leave the shell
    Quit,
}

/// Errors from parsing a shell line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a known command
    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    /// A required argument is missing
    #[error("{command}: missing {argument}")]
    MissingArgument {
        /// Command name
        command: &'static str,
        /// What was expected
        argument: &'static str,
    },

    /// Slide number is not a positive integer
    #[error("Invalid slide number: {0}")]
    InvalidSlideNumber(String),

    /// Slide number past the end of the carousel
    #[error("No slide {number}: the carousel has {count} slide(s)")]
    NoSuchSlide {
        /// Requested slide number (1-based)
        number: usize,
        /// Slides currently in the carousel
        count: usize,
    },

    /// Unknown slide field
    #[error(transparent)]
    Field(#[from] UnknownField),

    /// Unknown tone
    #[error(transparent)]
    Tone(#[from] UnknownTone),

    /// Unknown format
    #[error(transparent)]
    Format(#[from] UnknownFormat),
}

/// Parse one input line
///
/// `slide_count` is the number of slides in the latest snapshot.
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str, slide_count: usize) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let intent = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "topic" => CarouselIntent::SetTopic {
            topic: rest.to_string(),
        },
        "tone" => CarouselIntent::SetTone {
            tone: required(rest, "tone", "tone name")?.parse::<Tone>()?,
        },
        "format" => CarouselIntent::SetFormat {
            format: required(rest, "format", "format name")?.parse::<Format>()?,
        },
        "generate" | "gen" => CarouselIntent::Generate,
        "set" => {
            let (number, rest) = split_word(rest);
            let index = slide_index(required(number, "set", "slide number")?)?;
            if index >= slide_count {
                return Err(CommandError::NoSuchSlide {
                    number: index + 1,
                    count: slide_count,
                });
            }
            let (field, value) = split_word(rest);
            let field = required(field, "set", "field name")?.parse::<SlideField>()?;
            CarouselIntent::UpdateField {
                index,
                field,
                value: value.to_string(),
            }
        }
        "add" => CarouselIntent::AddSlide,
        "rm" | "remove" => CarouselIntent::RemoveSlide {
            index: slide_index(required(rest, "rm", "slide number")?)?,
        },
        "bg" | "style" => CarouselIntent::ApplyStyleToAll {
            style: BackgroundStyle::new(required(rest, "bg", "style")?),
        },
        "select" => CarouselIntent::SelectSlide {
            index: slide_index(required(rest, "select", "slide number")?)?,
        },
        "next" => CarouselIntent::StepForward,
        "prev" => CarouselIntent::StepBackward,
        "copy" | "export" => CarouselIntent::ExportText,
        "dismiss" => CarouselIntent::DismissNotification,
        _ => return Err(CommandError::UnknownCommand(word.to_string())),
    };

    Ok(Some(Command::Intent(intent)))
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], s[pos..].trim_start()),
        None => (s, ""),
    }
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(value)
    }
}

/// 1-based slide number to 0-based index
fn slide_index(s: &str) -> Result<usize, CommandError> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidSlideNumber(s.to_string())),
    }
}
