//! Session scripts.
//!
//! A script is plain text with one action per line; `#` starts a comment.
//!
//! ```text
//! goto ii            # any display token
//! roman 3            # roman jump field (ordinal)
//! arabic 12          # arabic jump field
//! jump xiv           # combined jump field
//! next
//! prev
//! resize 600
//! toggle-view
//! press
//! move 500 1000      # client x, viewport width
//! release
//! scroll 900 0004:-120 0005:40
//! fullscreen
//! bookmark
//! info
//! menu
//! tick 2500
//! ```

use std::time::Duration;

use folio_pages::PageJump;
use folio_session::{DeepZoomHost, Message, ViewerSession, ViewportController};
use folio_transcript::MarkerPosition;
use thiserror::Error;
use tracing::{info_span, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One parsed action and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub line: usize,
    pub source: String,
    pub message: Message,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = Vec::new();
        for (offset, raw) in text.lines().enumerate() {
            let line = offset + 1;
            let source = raw.split('#').next().unwrap_or_default().trim();
            if source.is_empty() {
                continue;
            }
            let message = parse_action(line, source)?;
            steps.push(ScriptStep {
                line,
                source: source.to_string(),
                message,
            });
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn parse_action(line: usize, source: &str) -> Result<Message, ScriptError> {
    let mut words = source.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ScriptError::new(line, "empty action"));
    };
    let args: Vec<&str> = words.collect();
    let message = match verb {
        "goto" => Message::GoTo(single(line, verb, &args)?.to_string()),
        "roman" => Message::Jump(PageJump::Roman(single(line, verb, &args)?.to_string())),
        "arabic" => Message::Jump(PageJump::Arabic(single(line, verb, &args)?.to_string())),
        "jump" => Message::Jump(PageJump::Combined(single(line, verb, &args)?.to_string())),
        "next" => no_args(line, verb, &args, Message::Next)?,
        "prev" | "previous" => no_args(line, verb, &args, Message::Previous)?,
        "resize" => Message::Resized {
            width: number(line, "width", single(line, verb, &args)?)?,
        },
        "toggle-view" => no_args(line, verb, &args, Message::ToggleViewMode)?,
        "press" => no_args(line, verb, &args, Message::DividerPressed)?,
        "move" => {
            let [client_x, viewport_width] = args.as_slice() else {
                return Err(ScriptError::new(
                    line,
                    "move expects a client x and a viewport width",
                ));
            };
            Message::DividerMoved {
                client_x: number(line, "client x", client_x)?,
                viewport_width: number(line, "viewport width", viewport_width)?,
            }
        }
        "release" => no_args(line, verb, &args, Message::DividerReleased)?,
        "scroll" => parse_scroll(line, &args)?,
        "fullscreen" => no_args(line, verb, &args, Message::ToggleFullscreen)?,
        "bookmark" => no_args(line, verb, &args, Message::Bookmark)?,
        "info" => no_args(line, verb, &args, Message::ToggleInfo)?,
        "menu" => no_args(line, verb, &args, Message::ToggleMobileMenu)?,
        "tick" => {
            let millis = single(line, verb, &args)?;
            let millis = millis.parse::<u64>().map_err(|_| {
                ScriptError::new(line, format!("invalid duration in milliseconds: {millis}"))
            })?;
            Message::Tick {
                elapsed: Duration::from_millis(millis),
            }
        }
        other => return Err(ScriptError::new(line, format!("unknown action: {other}"))),
    };
    Ok(message)
}

fn parse_scroll(line: usize, args: &[&str]) -> Result<Message, ScriptError> {
    let Some((height, pairs)) = args.split_first() else {
        return Err(ScriptError::new(
            line,
            "scroll expects a viewport height and id:top pairs",
        ));
    };
    let viewport_height = number(line, "viewport height", height)?;
    let markers = pairs
        .iter()
        .map(|pair| {
            let (id, top) = pair
                .split_once(':')
                .ok_or_else(|| ScriptError::new(line, format!("expected id:top, got {pair}")))?;
            Ok(MarkerPosition::new(id, number(line, "marker top", top)?))
        })
        .collect::<Result<Vec<_>, ScriptError>>()?;
    Ok(Message::TranscriptScrolled {
        markers,
        viewport_height,
    })
}

fn single<'a>(line: usize, verb: &str, args: &[&'a str]) -> Result<&'a str, ScriptError> {
    match args {
        [value] => Ok(*value),
        _ => Err(ScriptError::new(
            line,
            format!("{verb} expects exactly one argument"),
        )),
    }
}

fn no_args(line: usize, verb: &str, args: &[&str], message: Message) -> Result<Message, ScriptError> {
    if args.is_empty() {
        Ok(message)
    } else {
        Err(ScriptError::new(line, format!("{verb} takes no arguments")))
    }
}

fn number(line: usize, what: &str, value: &str) -> Result<f64, ScriptError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ScriptError::new(line, format!("invalid {what}: {value}")))
}

/// State after one replayed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub line: usize,
    pub action: String,
    pub page: String,
    pub label: String,
    pub layout: &'static str,
    pub view_mode: &'static str,
    pub error: Option<String>,
}

/// Apply every step in order.
///
/// A failing step is recorded and logged; the replay carries on with the
/// next one.
pub fn replay<V, H>(session: &mut ViewerSession<'_, V, H>, script: &Script) -> Vec<StepOutcome>
where
    V: ViewportController,
    H: DeepZoomHost,
{
    let span = info_span!("replay", steps = script.len());
    let _guard = span.enter();
    script
        .steps()
        .iter()
        .map(|step| {
            let error = session.update(step.message.clone()).err().map(|err| {
                warn!(line = step.line, action = %step.source, error = %err, "step failed");
                err.to_string()
            });
            let state = session.state();
            StepOutcome {
                line: step.line,
                action: step.source.clone(),
                page: state.current.to_string(),
                label: session.current_label().to_string(),
                layout: state.layout.name(),
                view_mode: state.view_mode.name(),
                error,
            }
        })
        .collect()
}
