//! Line-oriented expense session over one in-memory store.
//!
//! Each input line is one command. Mutating commands go through the
//! [`TransactionStore`], which notifies the registered [`SessionView`];
//! read commands (`list`, `total`, `help`) produce output directly.

use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use expense_core::{
    apply_filter, AmountFilter, Category, CategoryFilter, Transaction, TransactionStore,
};
use rust_decimal::Decimal;

use crate::constants::SESSION_PROMPT;
use crate::output::{
    total_amount, total_json, transaction_rows, transactions_json, TRANSACTION_COLUMNS,
};
use crate::ui::{format_amount, header, kv, print_error, table, OutputMode, UiContext};
use crate::view::SessionView;

const HELP: &str = "\
Commands:
  add <amount> <category>      record an expense (amount between 0 and 1000)
  remove <row>                 remove the transaction shown at <row>
  filter amount <amount>       mark transactions with exactly this amount
  filter category <category>   mark transactions in this category
  clear-filter                 remove all marks
  list                         show all transactions
  total                        show the sum of all amounts
  help                         show this help
  quit                         end the session
Categories: food, travel, bills, entertainment, other";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add { amount: Decimal, category: Category },
    Remove { row: usize },
    FilterAmount(Decimal),
    FilterCategory(Category),
    ClearFilter,
    List,
    Total,
    Help,
    Quit,
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading; print the text if there is any
    Continue(Option<String>),
    Quit,
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub commands: usize,
    pub failures: usize,
}

fn parse_amount(value: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(value.trim_start_matches('$'))
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", value))
}

fn expect_args<'a>(args: &'a [&'a str], count: usize, usage: &str) -> anyhow::Result<&'a [&'a str]> {
    if args.len() != count {
        return Err(anyhow::anyhow!("Usage: {}", usage));
    }
    Ok(args)
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let (name, args) = words
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("Empty command"))?;

    let command = match name.to_lowercase().as_str() {
        "add" => {
            let args = expect_args(args, 2, "add <amount> <category>")?;
            SessionCommand::Add {
                amount: parse_amount(args[0])?,
                category: args[1].parse()?,
            }
        }
        "remove" | "rm" => {
            let args = expect_args(args, 1, "remove <row>")?;
            let row = args[0]
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("Invalid row: {}", args[0]))?;
            SessionCommand::Remove { row }
        }
        "filter" => {
            let args = expect_args(args, 2, "filter <amount|category> <value>")?;
            match args[0].to_lowercase().as_str() {
                "amount" => SessionCommand::FilterAmount(parse_amount(args[1])?),
                "category" => SessionCommand::FilterCategory(args[1].parse()?),
                other => {
                    return Err(anyhow::anyhow!(
                        "Unknown filter: {} (use amount or category)",
                        other
                    ))
                }
            }
        }
        "clear-filter" => {
            expect_args(args, 0, "clear-filter")?;
            SessionCommand::ClearFilter
        }
        "list" | "ls" => SessionCommand::List,
        "total" => SessionCommand::Total,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(anyhow::anyhow!("Unknown command: {}", other)),
    };
    Ok(Some(command))
}

/// One expense session: a store, its view, and the output context.
pub struct Session {
    store: TransactionStore,
    view: Rc<SessionView>,
    ctx: UiContext,
}

impl Session {
    pub fn new(ctx: UiContext, quiet: bool) -> Self {
        let mut store = TransactionStore::new();
        let view = Rc::new(SessionView::new(ctx.clone(), quiet));
        store.register(view.clone());
        Self { store, view, ctx }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Apply one command to the store.
    pub fn execute(&mut self, command: SessionCommand) -> anyhow::Result<Outcome> {
        tracing::debug!(?command, "executing session command");
        let output = match command {
            SessionCommand::Add { amount, category } => {
                let transaction = Transaction::new(amount, category)?;
                self.store.add_transaction(transaction)?;
                None
            }
            SessionCommand::Remove { row } => {
                let count = self.store.transaction_count();
                if row == 0 || row > count {
                    return Err(anyhow::anyhow!(
                        "Row {} does not exist (session has {} transactions)",
                        row,
                        count
                    ));
                }
                let target = self.store.transactions()[row - 1].clone();
                self.store.remove_transaction(&target);
                None
            }
            SessionCommand::FilterAmount(amount) => {
                apply_filter(&mut self.store, &AmountFilter::new(amount)?)?;
                None
            }
            SessionCommand::FilterCategory(category) => {
                apply_filter(&mut self.store, &CategoryFilter::new(category))?;
                None
            }
            SessionCommand::ClearFilter => {
                self.store.set_matched_filter_indices(&[])?;
                None
            }
            SessionCommand::List => Some(self.render_list()),
            SessionCommand::Total => Some(self.render_total()),
            SessionCommand::Help => {
                if self.ctx.mode.is_json() {
                    None
                } else {
                    Some(HELP.to_string())
                }
            }
            SessionCommand::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(output))
    }

    fn render_list(&self) -> String {
        if self.ctx.mode.is_json() {
            return serde_json::Value::Array(transactions_json(&self.store)).to_string();
        }
        if self.store.transactions().is_empty() {
            return match self.ctx.mode {
                OutputMode::Pretty => "No transactions.".to_string(),
                _ => String::new(),
            };
        }

        let matched = self.store.matched_filter_indices();
        let rows = transaction_rows(&self.ctx, self.store.transactions(), matched);
        let body = table(&self.ctx, &TRANSACTION_COLUMNS, &rows, matched);
        if self.ctx.mode.is_pretty() {
            let context = (!matched.is_empty()).then(|| format!("{} matched", matched.len()));
            format!("{}\n{}", header(&self.ctx, "list", context.as_deref()), body)
        } else {
            body
        }
    }

    fn render_total(&self) -> String {
        let total = total_amount(&self.store);
        if self.ctx.mode.is_json() {
            total_json(total, self.store.transaction_count()).to_string()
        } else {
            kv(&self.ctx, "Total", &format_amount(total))
        }
    }

    /// Read commands until end of input or `quit`.
    ///
    /// A failing line is reported and the session continues; the returned
    /// summary counts the failures.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> anyhow::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut lines = input.lines();
        let mut line_number = 0usize;

        loop {
            if interactive {
                print!("{}", SESSION_PROMPT);
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            line_number += 1;

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    summary.failures += 1;
                    self.report(line_number, &err, Some("Type `help` to list commands."));
                    continue;
                }
            };

            summary.commands += 1;
            match self.execute(command) {
                Ok(Outcome::Continue(Some(text))) => {
                    if !text.is_empty() {
                        println!("{}", text);
                    }
                }
                Ok(Outcome::Continue(None)) => {}
                Ok(Outcome::Quit) => break,
                Err(err) => {
                    summary.failures += 1;
                    self.report(line_number, &err, None);
                }
            }
        }

        tracing::debug!(
            commands = summary.commands,
            failures = summary.failures,
            "session finished"
        );
        Ok(summary)
    }

    fn report(&self, line_number: usize, err: &anyhow::Error, error_hint: Option<&str>) {
        tracing::debug!(line = line_number, error = %err, "session command failed");
        print_error(&self.ctx, &format!("line {}: {}", line_number, err), error_hint);
    }
}
