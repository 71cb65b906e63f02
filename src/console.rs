//! Line-oriented terminal front end. Each command is handled to completion,
//! including any reload it triggers, before the next one is read.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::api::ProductApi;
use crate::app::AdminApp;
use crate::error::{self, FetchError, Operation};
use crate::operator::Operator;
use crate::views::{ClickTarget, Field};

const HELP: &str = "\
commands:
  add                  open the form for a new product
  edit <id>            open the form for an existing product
  delete <id>          delete a product (asks first)
  refresh              reload the product list
  set <field> <value>  change a form field (name, description, price, stock, category)
  submit               send the form
  cancel               close the form
  outside              click outside the form
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Edit(i64),
    Delete(i64),
    Refresh,
    Set(Field, String),
    Submit,
    Cancel,
    Outside,
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>) -> Result<i64, String> {
    let arg = arg.ok_or_else(|| "missing product id".to_string())?;
    arg.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a product id", arg.trim()))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim())),
            None => (line, None),
        };

        match word.to_ascii_lowercase().as_str() {
            "add" | "new" => Ok(Command::Add),
            "edit" => parse_id(rest).map(Command::Edit),
            "delete" | "rm" => parse_id(rest).map(Command::Delete),
            "refresh" | "reload" => Ok(Command::Refresh),
            "set" => {
                let rest = rest.ok_or_else(|| "usage: set <field> <value>".to_string())?;
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::Set(field.parse()?, value.trim().to_string()))
            }
            "submit" | "save" => Ok(Command::Submit),
            "cancel" => Ok(Command::Cancel),
            "outside" => Ok(Command::Outside),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn show(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    pub async fn run<A: ProductApi>(&mut self, app: &mut AdminApp<A>) -> io::Result<()> {
        app.mount().await;
        self.show(&app.render())?;

        while let Some(line) = self.read_line("> ")? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    self.show(&message)?;
                    continue;
                }
            };
            debug!(?command, "operator command");

            match command {
                Command::Quit => break,
                Command::Help => {
                    self.show(HELP)?;
                    continue;
                }
                command => {
                    if let Some(message) = self.dispatch(app, command).await {
                        self.show(&message)?;
                    }
                }
            }
            self.show(&app.render())?;
        }
        Ok(())
    }

    /// Applies one command. Returns a line for the operator when the command
    /// could not be applied.
    async fn dispatch<A: ProductApi>(
        &mut self,
        app: &mut AdminApp<A>,
        command: Command,
    ) -> Option<String> {
        let form_open = app.form().is_visible();
        match command {
            Command::Add | Command::Edit(_) | Command::Delete(_) | Command::Refresh if form_open => {
                return Some("the form is open, submit or cancel it first".to_string())
            }
            Command::Add => app.open_create(),
            Command::Refresh => app.reload().await,
            Command::Edit(id) => {
                let action = app.table().request_edit(id);
                match action {
                    Some(action) => app.handle_table(action, self).await,
                    None => return Some(format!("no product with id {}", id)),
                }
            }
            Command::Delete(id) => {
                if app.table().request_edit(id).is_none() {
                    return Some(format!("no product with id {}", id));
                }
                let action = app.table().request_delete(id, self);
                if let Some(action) = action {
                    app.handle_table(action, self).await;
                }
            }
            Command::Set(field, value) if form_open => app.form_mut().set_field(field, &value),
            Command::Submit if form_open => {
                let submitted = app.form().submit();
                match submitted {
                    Ok(event) => app.handle_form(event, self).await,
                    Err(invalid) => return Some(invalid.to_string()),
                }
            }
            Command::Cancel if form_open => app.cancel(),
            Command::Outside if form_open => {
                let clicked = app.form().click(ClickTarget::Overlay);
                if let Some(event) = clicked {
                    app.handle_form(event, self).await;
                }
            }
            Command::Set(..) | Command::Submit | Command::Cancel | Command::Outside => {
                return Some("the form is not open".to_string())
            }
            Command::Help | Command::Quit => {}
        }
        None
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        match self.read_line(&format!("{} [y/N] ", message)) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = self.read_line(&format!("! {} (press Enter) ", message)) {
            warn!(error = %e, alert = message, "could not show alert");
        }
    }
}

/// Mounts `app` and writes the screen once. Fails when the product list
/// could not be loaded, after the screen has been written.
pub async fn print_snapshot<A: ProductApi, W: Write>(
    app: &mut AdminApp<A>,
    output: &mut W,
) -> error::Result<()> {
    app.mount().await;
    write!(output, "{}", app.render())?;
    output.flush()?;
    if app.state().last_error.is_some() {
        return Err(FetchError::new(Operation::List).into());
    }
    Ok(())
}
