//! Terminal host for the meridiem field.
//!
//! Lines typed at the prompt become field events; after each event the
//! rendered view is printed.

use crate::component::Component;
use crate::config::{FieldConfig, ShellConfig};
use crate::field::{FieldEvent, FieldView, MeridiemTimeField};
use crate::time_value::{Clock, FieldValue, Meridiem};
use anyhow::Result;
use rustyline::DefaultEditor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(FieldEvent),
    Toggle,
    Show,
    Submit,
    Help,
    Quit,
    Nothing,
}

/// Map one line of shell input to a command. Anything unrecognised is
/// treated as keyboard text for the field.
pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellCommand::Nothing;
    }
    if let Some(rest) = trimmed.strip_prefix("set ") {
        return ShellCommand::Event(FieldEvent::SetValue(FieldValue::Text(rest.trim().to_string())));
    }

    match trimmed.to_lowercase().as_str() {
        "am" => ShellCommand::Event(FieldEvent::SelectMeridiem(Meridiem::Am)),
        "pm" => ShellCommand::Event(FieldEvent::SelectMeridiem(Meridiem::Pm)),
        "toggle" => ShellCommand::Toggle,
        "clear" => ShellCommand::Event(FieldEvent::Clear),
        "show" => ShellCommand::Show,
        "submit" => ShellCommand::Submit,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Event(FieldEvent::Input(trimmed.to_string())),
    }
}

/// One-line summary of a rendered view.
pub fn describe(view: &FieldView) -> String {
    let mut out = format!("[{}] {}", view.text, view.meridiem);
    if view.valid {
        if let Some(submit) = &view.submit_value {
            out.push_str(&format!("  -> {}", submit));
        }
    } else {
        for error in &view.errors {
            out.push_str(&format!("\n  ! {}", error));
        }
    }
    out
}

/// Outcome of running a single value through the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub input: String,
    pub meridiem: Meridiem,
    pub value: Option<String>,
    pub display: String,
    pub submit_value: Option<String>,
    pub errors: Vec<String>,
    pub valid: bool,
}

pub fn check(
    config: FieldConfig,
    text: &str,
    meridiem: Meridiem,
    clock: impl Clock + 'static,
) -> CheckReport {
    let mut field = MeridiemTimeField::with_clock(config, clock);
    field.select_meridiem(meridiem);
    field.input(text);
    let view = field.render();

    CheckReport {
        input: text.to_string(),
        meridiem: view.meridiem,
        value: field.value().as_time().map(ToString::to_string),
        display: view.text,
        submit_value: view.submit_value,
        errors: view.errors,
        valid: view.valid,
    }
}

pub struct Application {
    field: MeridiemTimeField,
    shell: ShellConfig,
}

impl Application {
    pub fn new(field: MeridiemTimeField, shell: ShellConfig) -> Self {
        Self { field, shell }
    }

    pub fn field(&self) -> &MeridiemTimeField {
        &self.field
    }

    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting meridiem field shell");
        let mut rl = DefaultEditor::new()?;

        println!("Type a time (e.g. 3:45), 'am'/'pm' to pick the meridiem, 'help' for more.");
        println!("{}", describe(&self.field.render()));

        loop {
            match rl.readline(&self.shell.prompt) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    match self.handle(parse_line(&line)) {
                        Some(output) => println!("{}", output),
                        None => break,
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.field.destroy();
        Ok(())
    }

    /// Apply a shell command. Returns the text to print, or `None` to quit.
    pub fn handle(&mut self, command: ShellCommand) -> Option<String> {
        match command {
            ShellCommand::Event(event) => {
                log::debug!("Shell event: {:?}", event);
                self.field.update(event);
                Some(describe(&self.field.render()))
            }
            ShellCommand::Toggle => {
                let next = self.field.meridiem().toggled();
                self.field.update(FieldEvent::SelectMeridiem(next));
                Some(describe(&self.field.render()))
            }
            ShellCommand::Show => Some(describe(&self.field.render())),
            ShellCommand::Submit => Some(match self.field.submit_value() {
                Some(value) if self.shell.show_submit_value => format!("submitted: {}", value),
                Some(_) => "submitted".to_string(),
                None => "nothing to submit".to_string(),
            }),
            ShellCommand::Help => Some(help_text()),
            ShellCommand::Quit => None,
            ShellCommand::Nothing => Some(String::new()),
        }
    }
}

fn help_text() -> String {
    [
        "Available commands:",
        "  <time>       - Type raw text such as 3:45 or 345",
        "  am | pm      - Select the meridiem",
        "  toggle       - Flip between AM and PM",
        "  set <value>  - Set a complete value such as 7:30PM",
        "  show         - Show the field",
        "  submit       - Print the submit value",
        "  clear        - Clear the field",
        "  help         - Show this help",
        "  quit         - Exit",
    ]
    .join("\n")
}
