//! Line-oriented driver for a [`WizardSession`].
//!
//! Each step prompts for its fields. On location steps typed text searches
//! the airport directory and a number picks one of the listed suggestions.
//! An empty line continues; `back`, `new` and `quit` work everywhere.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::Result;
use crate::models::TripType;
use crate::wizard::{Field, Step, StepId, WizardSession};

enum Input {
    Text(String),
    Back,
    New,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "back" | "b" => Input::Back,
            "new" | "restart" => Input::New,
            "quit" | "exit" | "q" => Input::Quit,
            _ => Input::Text(line.trim().to_string()),
        }
    }
}

pub struct Console<R, W> {
    input: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Prompt and read one line; end of input reads as `quit`
    async fn ask(&mut self, prompt: &str) -> Result<Input> {
        self.output.write_all(format!("{prompt}> ").as_bytes()).await?;
        self.output.flush().await?;
        Ok(match self.input.next_line().await? {
            Some(line) => Input::parse(&line),
            None => Input::Quit,
        })
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self, session: &mut WizardSession) -> Result<()> {
        self.say("Private jet charter request. Type `back`, `new` or `quit` at any prompt.")
            .await?;
        let mut shown: Option<StepId> = None;

        loop {
            let id = session.wizard().current_id();
            if shown != Some(id) {
                self.show_step(session).await?;
                shown = Some(id);
            }

            let input = match session.current_step() {
                Step::Origin | Step::Destination => self.location_step(session).await?,
                Step::TripType => self.trip_type_step(session).await?,
                Step::Review => self.ask("Press Enter to request quotes").await?,
                Step::Results => self.ask("Press Enter to finish").await?,
                Step::Confirmation => self.ask("Type `new` for another trip").await?,
                _ => self.field_step(session).await?,
            };

            match input {
                Input::Quit => return Ok(()),
                Input::Back => {
                    session.retreat();
                }
                Input::New => {
                    session.reset();
                    shown = None;
                }
                Input::Text(_) => self.continue_step(session).await?,
            }
        }
    }

    async fn show_step(&mut self, session: &WizardSession) -> Result<()> {
        let step = session.current_step();
        self.say(&format!("\n== {} ==", step.title())).await?;
        match step {
            Step::Review => {
                let lines: Vec<String> = session
                    .state()
                    .fields()
                    .map(|(field, value)| format!("  {}: {}", field.label(), value))
                    .collect();
                for line in lines {
                    self.say(&line).await?;
                }
                self.say(&format!("  Trip type: {}", session.state().trip_type()))
                    .await?;
            }
            Step::Results => self.show_quotes(session).await?,
            Step::Confirmation => {
                self.say("Thank you. A charter specialist will be in touch shortly.")
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn show_quotes(&mut self, session: &WizardSession) -> Result<()> {
        let Some(outcome) = session.quotes() else {
            return Ok(());
        };
        if let Some(error) = &outcome.error {
            self.say(error).await?;
        }
        let lines: Vec<String> = outcome
            .quotes
            .iter()
            .map(|quote| {
                format!(
                    "  {:<17} {:<20} {:>8}  {}  ({})",
                    quote.aircraft_class.label(),
                    quote.aircraft_model,
                    quote.flight_duration,
                    quote.price_display(),
                    quote.operator_name
                )
            })
            .collect();
        for line in lines {
            self.say(&line).await?;
        }
        Ok(())
    }

    /// Text searches, a number picks, an empty line continues with the text as typed
    async fn location_step(&mut self, session: &mut WizardSession) -> Result<Input> {
        let Some(&field) = session.current_step().fields().first() else {
            return Ok(Input::Text(String::new()));
        };

        loop {
            let current = session.state().field(field).unwrap_or_default().to_string();
            let text = match self.ask(&format!("{} [{}]", field.label(), current)).await? {
                Input::Text(text) => text,
                other => return Ok(other),
            };
            if text.is_empty() {
                return Ok(Input::Text(text));
            }

            let suggestions = session
                .search_for(field)
                .map(|search| search.suggestions())
                .unwrap_or_default();
            if let Ok(pick) = text.parse::<usize>()
                && (1..=suggestions.len()).contains(&pick)
            {
                if let Some(airport) = session.select_suggestion(field, pick - 1) {
                    self.say(&format!("Selected {}", airport.selection_label()))
                        .await?;
                }
                return Ok(Input::Text(String::new()));
            }

            match session.type_location(field, &text).await {
                Some(found) if !found.is_empty() => {
                    let lines: Vec<String> = found
                        .iter()
                        .enumerate()
                        .map(|(i, airport)| format!("  {}. {}", i + 1, airport.summary()))
                        .collect();
                    for line in lines {
                        self.say(&line).await?;
                    }
                }
                _ => {
                    self.say("No matching airports. Press Enter to keep what you typed.")
                        .await?;
                }
            }
        }
    }

    async fn trip_type_step(&mut self, session: &mut WizardSession) -> Result<Input> {
        loop {
            let text = match self.ask("one-way or round-trip").await? {
                Input::Text(text) => text,
                other => return Ok(other),
            };
            if text.is_empty() && session.state().trip_type().is_decided() {
                return Ok(Input::Text(text));
            }
            match TripType::parse(&text) {
                Some(trip_type) if session.set_trip_type(trip_type) => {
                    return Ok(Input::Text(text));
                }
                _ => self.say("Please answer one-way or round-trip.").await?,
            }
        }
    }

    /// Prompt for every field on the step; an empty answer keeps the current value
    async fn field_step(&mut self, session: &mut WizardSession) -> Result<Input> {
        let fields: &[Field] = session.current_step().fields();
        for &field in fields {
            let current = session.state().field(field).unwrap_or_default().to_string();
            match self.ask(&format!("{} [{}]", field.label(), current)).await? {
                Input::Text(text) if text.is_empty() => {}
                Input::Text(text) => session.set_field(field, text),
                other => return Ok(other),
            }
        }
        Ok(Input::Text(String::new()))
    }

    async fn continue_step(&mut self, session: &mut WizardSession) -> Result<()> {
        if session.current_step() == Step::Confirmation {
            return Ok(());
        }
        if let Err(reason) = session.gate() {
            self.say(&reason.to_string()).await?;
            return Ok(());
        }
        if session.current_step() == Step::Review {
            self.say("Requesting quotes...").await?;
        }
        session.advance().await;
        Ok(())
    }
}
