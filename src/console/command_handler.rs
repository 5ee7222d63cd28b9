// console/command_handler.rs

use crate::calculator::InterestMethod;
use crate::dashboard::Dashboard;
use tracing::{info, warn};

pub const HELP_TEXT: &str = "📋 Available commands:\n\
    /amount <won> — set deposit amount\n\
    /rate <rate-id> — pick calculator rate\n\
    /use <rate-id> — calculate with a rate card\n\
    /period <years> — set deposit period\n\
    /method simple|compound — set calculation method\n\
    /calc — calculate expected interest\n\
    /alarm <offer-id> on|off — set offer alarm\n\
    /toggle <offer-id> — flip offer alarm\n\
    /reload — reload all data\n\
    /show — redraw the dashboard\n\
    /help — command list\n\
    /quit — exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Amount(String),
    PickRate(String),
    UseRate(String),
    Period(String),
    Method(InterestMethod),
    Calculate,
    Alarm { offer_id: String, on: bool },
    Toggle(String),
    Reload,
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Render,
    Reload,
    Quit,
    Message(String),
}

pub fn parse_command(text: &str) -> Command {
    let mut parts = text.split_whitespace();
    let Some(name) = parts.next() else {
        return Command::Invalid("empty command".to_string());
    };
    let arg = parts.next();

    match (name, arg) {
        ("/amount", Some(value)) => Command::Amount(value.to_string()),
        ("/amount", None) => Command::Amount(String::new()),
        ("/rate", Some(id)) => Command::PickRate(id.to_string()),
        ("/use", Some(id)) => Command::UseRate(id.to_string()),
        ("/period", Some(value)) => Command::Period(value.to_string()),
        ("/method", Some(value)) => match value.parse::<InterestMethod>() {
            Ok(method) => Command::Method(method),
            Err(e) => Command::Invalid(e.to_string()),
        },
        ("/calc", _) => Command::Calculate,
        ("/alarm", Some(id)) => match parts.next() {
            Some("on") => Command::Alarm { offer_id: id.to_string(), on: true },
            Some("off") => Command::Alarm { offer_id: id.to_string(), on: false },
            _ => Command::Invalid("usage: /alarm <offer-id> on|off".to_string()),
        },
        ("/toggle", Some(id)) => Command::Toggle(id.to_string()),
        ("/reload", _) => Command::Reload,
        ("/show", _) => Command::Show,
        ("/help", _) => Command::Help,
        ("/quit", _) | ("/exit", _) => Command::Quit,
        (other, _) => Command::Invalid(format!("unknown or incomplete command: {}", other)),
    }
}

/// Applies one command to the dashboard.
pub fn apply_command(dashboard: &mut Dashboard, command: Command) -> CommandOutcome {
    info!("Handling command: {:?}", command);
    match command {
        Command::Amount(value) => {
            dashboard.calculator_mut().set_principal_input(&value);
            CommandOutcome::Render
        }
        Command::PickRate(id) => {
            if dashboard.pick_calculator_rate(&id) {
                CommandOutcome::Render
            } else {
                CommandOutcome::Message(format!("No rate with id {}", id))
            }
        }
        Command::UseRate(id) => {
            if dashboard.use_rate_for_calculator(&id) {
                CommandOutcome::Render
            } else {
                CommandOutcome::Message(format!("No rate with id {}", id))
            }
        }
        Command::Period(value) => {
            dashboard.calculator_mut().set_period_input(&value);
            CommandOutcome::Render
        }
        Command::Method(method) => {
            dashboard.calculator_mut().set_method(method);
            CommandOutcome::Render
        }
        Command::Calculate => {
            if !dashboard.calculator().can_calculate() {
                return CommandOutcome::Message(
                    "Enter an amount above zero and pick a rate first.".to_string(),
                );
            }
            dashboard.calculator_mut().calculate();
            CommandOutcome::Render
        }
        Command::Alarm { offer_id, on } => {
            dashboard.toggle_alarm(&offer_id, on);
            CommandOutcome::Render
        }
        Command::Toggle(offer_id) => {
            let next = !dashboard.alarms().is_active(&offer_id);
            dashboard.toggle_alarm(&offer_id, next);
            CommandOutcome::Render
        }
        Command::Reload => CommandOutcome::Reload,
        Command::Show => CommandOutcome::Render,
        Command::Help => CommandOutcome::Message(HELP_TEXT.to_string()),
        Command::Quit => CommandOutcome::Quit,
        Command::Invalid(reason) => {
            warn!("Rejected command: {}", reason);
            CommandOutcome::Message(format!("{} (try /help)", reason))
        }
    }
}
