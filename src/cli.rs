//! The `money_pro` command line interface.
//!
//! [Args] is parsed by the binary, which then opens the ledger and hands the
//! [Command] to [run]. All output is written to the given writer so that
//! commands can be tested without a terminal.

use std::{fs::File, io::Write, ops::RangeInclusive};

use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{
    AccountsOverview, AppConfig, Budget, BudgetItem, BudgetItemBuilder, BudgetPeriod, BudgetType,
    DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE, Error, ItemFrequency, ItemType, Ledger,
    MonthlyReport, NewBudget, Summary, Transaction, TransactionQuery, TransactionType,
    TransferFilter,
    balance::Balance,
    budget::debt_budgets,
    csv_export::export_transactions,
    currency::CurrencyFormatter,
    database_id::{BalanceId, BudgetId, BudgetItemId, TransactionId},
    stores::KeyValueStore,
    timezone::now_local,
    transaction::SortOrder,
};

/// The database file used when `--db-path` is not given.
pub const DEFAULT_DB_PATH: &str = "money_pro.db";

/// Track balances, transactions, transfers and budgets from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the application SQLite database.
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    pub db_path: String,

    /// Your local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    #[arg(long, global = true, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// The symbol printed in front of amounts.
    #[arg(long, global = true, default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency: String,

    /// Append debug logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// The top level commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show or change your name and opening balance.
    Profile {
        /// The profile action.
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Show your total balance, income, expenses and recent transactions.
    Summary,

    /// Show every account along with transfers and other transactions.
    Overview,

    /// Manage balance accounts.
    Balance {
        /// The balance action.
        #[command(subcommand)]
        command: BalanceCommand,
    },

    /// Record, list and delete transactions.
    Transaction {
        /// The transaction action.
        #[command(subcommand)]
        command: TransactionCommand,
    },

    /// Move money from one account to another.
    Transfer {
        /// The ID of the account to take the money from.
        #[arg(long)]
        from: BalanceId,

        /// The ID of the account to put the money in.
        #[arg(long)]
        to: BalanceId,

        /// How much to move.
        #[arg(long)]
        amount: f64,
    },

    /// Plan spending and debt repayments.
    Budget {
        /// The budget action.
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Show the net amount and closing balance for each month.
    Report,

    /// Write all transactions as CSV.
    Export {
        /// The file to write to. Prints to stdout if omitted.
        #[arg(long, short)]
        output: Option<String>,
    },
}

/// Actions on the user's profile.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProfileCommand {
    /// Print your name and opening balance.
    Show,

    /// Set your name, and optionally your opening balance.
    Set {
        /// The name to greet you with.
        #[arg(long)]
        name: String,

        /// Your bank balance plus cash on hand when you started tracking.
        #[arg(long, allow_negative_numbers = true)]
        initial_balance: Option<f64>,
    },
}

/// Actions on balance accounts.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BalanceCommand {
    /// Add an account.
    Add {
        /// The account name, e.g. "Cheque".
        name: String,

        /// The amount currently in the account.
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// List all accounts.
    List,

    /// Delete an account. Its transactions are kept.
    Delete {
        /// The ID of the account.
        id: BalanceId,
    },
}

/// Actions on transactions.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TransactionCommand {
    /// Record income or an expense against an account.
    Add {
        /// A short description, e.g. "Groceries".
        #[arg(long)]
        title: String,

        /// The amount, always positive.
        #[arg(long)]
        amount: f64,

        /// Whether this is income or an expense.
        #[arg(long = "type", value_enum)]
        kind: TransactionType,

        /// The ID of the account.
        #[arg(long)]
        account: BalanceId,

        /// The day of the transaction as YYYY-MM-DD. Defaults to now.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },

    /// List transactions, newest first.
    List {
        /// Only show transactions for this account ID.
        #[arg(long)]
        account: Option<BalanceId>,

        /// Only show income or only expenses.
        #[arg(long = "type", value_enum)]
        kind: Option<TransactionType>,

        /// Whether to include, exclude, or only show transfers.
        #[arg(long, value_enum, default_value_t = TransferFilter::Include)]
        transfers: TransferFilter,

        /// Only show transactions whose title contains this text.
        #[arg(long)]
        search: Option<String>,

        /// The earliest day to show as YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        from: Option<Date>,

        /// The latest day to show as YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        to: Option<Date>,

        /// Show at most this many transactions.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a transaction and reverse its effect on its account.
    Delete {
        /// The ID of the transaction.
        id: TransactionId,
    },
}

/// Actions on budgets.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BudgetCommand {
    /// Create an empty budget.
    Create {
        /// The budget name.
        name: String,

        /// Whether this budget is for spending or paying off debt.
        #[arg(long = "type", value_enum)]
        kind: BudgetType,

        /// How long the budget runs for.
        #[arg(long, value_enum)]
        period: BudgetPeriod,

        /// The first day as YYYY-MM-DD. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        start: Option<Date>,

        /// The last day as YYYY-MM-DD. Only for custom budgets.
        #[arg(long, value_parser = parse_date)]
        end: Option<Date>,
    },

    /// List budgets.
    List {
        /// Only list debt budgets.
        #[arg(long)]
        debt: bool,
    },

    /// Show a budget and its items.
    Show {
        /// The ID of the budget.
        id: BudgetId,
    },

    /// Delete a budget and its items.
    Delete {
        /// The ID of the budget.
        id: BudgetId,
    },

    /// Add a planned income or expense to a budget.
    AddItem {
        /// The ID of the budget.
        budget: BudgetId,

        /// The item name, e.g. "Rent".
        #[arg(long)]
        name: String,

        /// The planned amount, always positive.
        #[arg(long)]
        amount: f64,

        /// Whether the item is income or an expense.
        #[arg(long = "type", value_enum)]
        kind: ItemType,

        /// Whether the amount is fixed or an estimate.
        #[arg(long, value_enum)]
        frequency: ItemFrequency,

        /// A category, e.g. "Housing".
        #[arg(long)]
        category: String,

        /// When the item is due as YYYY-MM-DD. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },

    /// Remove an item from a budget.
    RemoveItem {
        /// The ID of the budget.
        budget: BudgetId,

        /// The ID of the item.
        item: BudgetItemId,
    },
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|error| format!("expected a date like 2025-03-18: {error}"))
}

/// Run `command` against `ledger`, writing the output to `out`.
///
/// # Errors
/// Returns an error if the configured timezone is invalid, the command fails
/// validation, or the store or `out` cannot be written to.
pub fn run<S: KeyValueStore>(
    command: Command,
    ledger: &mut Ledger<S>,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<(), Error> {
    let now = now_local(&config.local_timezone)?;
    execute(command, ledger, config, now, out)
}

/// Run `command` as if the local time were `now`.
fn execute<S: KeyValueStore>(
    command: Command,
    ledger: &mut Ledger<S>,
    config: &AppConfig,
    now: OffsetDateTime,
    out: &mut impl Write,
) -> Result<(), Error> {
    let printer = Printer::new(config, ledger.balances())?;

    match command {
        Command::Profile { command } => run_profile(command, ledger, &printer, out),
        Command::Summary => {
            let profile = ledger.profile()?;
            let summary = Summary::new(
                &profile,
                ledger.transactions(),
                ledger.balances(),
                config.recent_limit,
            );
            printer.summary(&summary, out)
        }
        Command::Overview => {
            let overview = AccountsOverview::new(ledger.transactions(), ledger.balances());
            printer.overview(&overview, out)
        }
        Command::Balance { command } => run_balance(command, ledger, config, out),
        Command::Transaction { command } => run_transaction(command, ledger, config, now, out),
        Command::Transfer { from, to, amount } => {
            let transfer = ledger.transfer(from, to, amount, now)?;
            let printer = Printer::new(config, ledger.balances())?;
            writeln!(out, "Recorded transfer:")?;
            printer.transaction(&transfer.withdrawal, out)?;
            printer.transaction(&transfer.deposit, out)?;
            Ok(())
        }
        Command::Budget { command } => run_budget(command, ledger, &printer, now, out),
        Command::Report => {
            let report = MonthlyReport::new(ledger.transactions(), ledger.total_balance());
            printer.report(&report, out)
        }
        Command::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path)?;
                let count = export_transactions(ledger.transactions(), ledger.balances(), file)?;
                writeln!(out, "Exported {count} transactions to {path}")?;
                Ok(())
            }
            None => {
                export_transactions(ledger.transactions(), ledger.balances(), out)?;
                Ok(())
            }
        },
    }
}

fn run_profile<S: KeyValueStore>(
    command: ProfileCommand,
    ledger: &mut Ledger<S>,
    printer: &Printer,
    out: &mut impl Write,
) -> Result<(), Error> {
    match command {
        ProfileCommand::Show => {
            let profile = ledger.profile()?;
            writeln!(
                out,
                "Name: {}",
                profile.user_name.as_deref().unwrap_or("(not set)")
            )?;
            match profile.initial_balance {
                Some(amount) => writeln!(out, "Initial balance: {}", printer.money(amount))?,
                None => writeln!(out, "Initial balance: (not set)")?,
            }
        }
        ProfileCommand::Set {
            name,
            initial_balance,
        } => {
            let mut profile = ledger.profile()?;
            let name = name.trim();
            profile.user_name = (!name.is_empty()).then(|| name.to_owned());
            if initial_balance.is_some() {
                profile.initial_balance = initial_balance;
            }

            ledger.set_profile(&profile)?;
            writeln!(out, "{}", profile.greeting())?;
        }
    }

    Ok(())
}

fn run_balance<S: KeyValueStore>(
    command: BalanceCommand,
    ledger: &mut Ledger<S>,
    config: &AppConfig,
    out: &mut impl Write,
) -> Result<(), Error> {
    match command {
        BalanceCommand::Add { name, amount } => {
            let balance = ledger.add_balance(&name, amount)?;
            writeln!(out, "Added balance:")?;
            Printer::new(config, ledger.balances())?.balance(&balance, out)?;
        }
        BalanceCommand::List => {
            let printer = Printer::new(config, ledger.balances())?;
            printer.balances(ledger.balances(), ledger.total_balance(), out)?;
        }
        BalanceCommand::Delete { id } => {
            let balance = ledger.delete_balance(id)?;
            writeln!(out, "Deleted balance {} \"{}\"", balance.id, balance.name)?;
        }
    }

    Ok(())
}

fn run_transaction<S: KeyValueStore>(
    command: TransactionCommand,
    ledger: &mut Ledger<S>,
    config: &AppConfig,
    now: OffsetDateTime,
    out: &mut impl Write,
) -> Result<(), Error> {
    match command {
        TransactionCommand::Add {
            title,
            amount,
            kind,
            account,
            date,
        } => {
            let mut builder = Transaction::build(&title, amount, kind, account, now);

            if let Some(date) = date {
                builder = builder.date(start_of_day(date, now));
            }

            let transaction = ledger.record_transaction(builder, now)?;

            let printer = Printer::new(config, ledger.balances())?;
            writeln!(out, "Recorded transaction:")?;
            printer.transaction(&transaction, out)?;
        }
        TransactionCommand::List {
            account,
            kind,
            transfers,
            search,
            from,
            to,
            limit,
        } => {
            let query = TransactionQuery {
                kind,
                account,
                transfers,
                search,
                date_range: date_range(from, to),
                sort_date: Some(SortOrder::Descending),
                limit,
            };

            let printer = Printer::new(config, ledger.balances())?;
            let transactions = ledger.query(&query);

            if transactions.is_empty() {
                writeln!(out, "No transactions found.")?;
            }

            for transaction in transactions {
                printer.transaction(transaction, out)?;
            }
        }
        TransactionCommand::Delete { id } => {
            let transaction = ledger.delete_transaction(id)?;
            writeln!(
                out,
                "Deleted transaction {} \"{}\"",
                transaction.id, transaction.title
            )?;
        }
    }

    Ok(())
}

fn run_budget<S: KeyValueStore>(
    command: BudgetCommand,
    ledger: &mut Ledger<S>,
    printer: &Printer,
    now: OffsetDateTime,
    out: &mut impl Write,
) -> Result<(), Error> {
    match command {
        BudgetCommand::Create {
            name,
            kind,
            period,
            start,
            end,
        } => {
            let budget = ledger.create_budget(NewBudget {
                name,
                kind,
                period,
                start_date: start.unwrap_or(now.date()),
                end_date: end,
            })?;
            writeln!(out, "Created budget {} \"{}\"", budget.id, budget.name)?;
        }
        BudgetCommand::List { debt } => {
            let budgets: Vec<&Budget> = if debt {
                debt_budgets(ledger.budgets())
            } else {
                ledger.budgets().iter().collect()
            };

            if budgets.is_empty() {
                writeln!(out, "No budgets found.")?;
            }

            for budget in budgets {
                printer.budget_line(budget, out)?;
            }
        }
        BudgetCommand::Show { id } => {
            let budget = ledger.budget(id).ok_or(Error::NotFound)?;
            printer.budget(budget, out)?;
        }
        BudgetCommand::Delete { id } => {
            let budget = ledger.delete_budget(id)?;
            writeln!(out, "Deleted budget {} \"{}\"", budget.id, budget.name)?;
        }
        BudgetCommand::AddItem {
            budget,
            name,
            amount,
            kind,
            frequency,
            category,
            date,
        } => {
            let builder: BudgetItemBuilder = BudgetItem::build(
                &name,
                amount,
                kind,
                frequency,
                &category,
                date.unwrap_or(now.date()),
            );
            let item = ledger.add_budget_item(budget, builder)?;
            writeln!(out, "Added item to budget {budget}:")?;
            printer.budget_item(&item, out)?;
        }
        BudgetCommand::RemoveItem { budget, item } => {
            let item = ledger.remove_budget_item(budget, item)?;
            writeln!(
                out,
                "Removed item {} \"{}\" from budget {budget}",
                item.id, item.name
            )?;
        }
    }

    Ok(())
}

/// Midnight at the start of `date` in the same offset as `now`.
fn start_of_day(date: Date, now: OffsetDateTime) -> OffsetDateTime {
    date.midnight().assume_offset(now.offset())
}

fn date_range(from: Option<Date>, to: Option<Date>) -> Option<RangeInclusive<Date>> {
    match (from, to) {
        (None, None) => None,
        (from, to) => Some(from.unwrap_or(Date::MIN)..=to.unwrap_or(Date::MAX)),
    }
}

/// Formats ledger records as lines of text.
struct Printer {
    currency: CurrencyFormatter,
    balances: Vec<Balance>,
}

impl Printer {
    fn new(config: &AppConfig, balances: &[Balance]) -> Result<Self, Error> {
        Ok(Self {
            currency: CurrencyFormatter::new(&config.currency_symbol)?,
            balances: balances.to_vec(),
        })
    }

    fn money(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    fn account_name(&self, id: BalanceId) -> &str {
        self.balances
            .iter()
            .find(|balance| balance.id == id)
            .map(|balance| balance.name.as_str())
            .unwrap_or("(deleted account)")
    }

    fn transaction(&self, transaction: &Transaction, out: &mut impl Write) -> Result<(), Error> {
        writeln!(
            out,
            "{:>4}  {}  {:<28}  {:>14}  {}",
            transaction.id,
            transaction.date.date(),
            transaction.title,
            self.money(transaction.signed_amount()),
            self.account_name(transaction.balance_account_id),
        )?;

        Ok(())
    }

    fn balance(&self, balance: &Balance, out: &mut impl Write) -> Result<(), Error> {
        writeln!(
            out,
            "{:>4}  {:<20}  {:>14}",
            balance.id,
            balance.name,
            self.money(balance.amount)
        )?;

        Ok(())
    }

    fn balances(
        &self,
        balances: &[Balance],
        total: f64,
        out: &mut impl Write,
    ) -> Result<(), Error> {
        if balances.is_empty() {
            writeln!(out, "No balances found.")?;
        }

        for balance in balances {
            self.balance(balance, out)?;
        }

        writeln!(out, "      {:<20}  {:>14}", "Total", self.money(total))?;

        Ok(())
    }

    fn summary(&self, summary: &Summary, out: &mut impl Write) -> Result<(), Error> {
        writeln!(out, "{}", summary.greeting)?;
        writeln!(out)?;
        writeln!(out, "Total balance: {}", self.money(summary.total_balance))?;
        writeln!(out, "Income:        {}", self.money(summary.total_income))?;
        writeln!(out, "Expenses:      {}", self.money(summary.total_expenses))?;
        writeln!(out)?;
        writeln!(out, "Recent transactions:")?;

        if summary.recent.is_empty() {
            writeln!(out, "No transactions yet.")?;
        }

        for transaction in &summary.recent {
            self.transaction(transaction, out)?;
        }

        Ok(())
    }

    fn overview(&self, overview: &AccountsOverview, out: &mut impl Write) -> Result<(), Error> {
        writeln!(out, "Accounts:")?;
        self.balances(&overview.balances, overview.total_balance, out)?;
        writeln!(out)?;
        writeln!(out, "Income:   {}", self.money(overview.total_income))?;
        writeln!(out, "Expenses: {}", self.money(overview.total_expenses))?;
        writeln!(out)?;

        writeln!(out, "Transfers:")?;
        if overview.transfers.is_empty() {
            writeln!(out, "No transfers yet.")?;
        }
        for transaction in &overview.transfers {
            self.transaction(transaction, out)?;
        }
        writeln!(out)?;

        writeln!(out, "Other transactions:")?;
        if overview.other.is_empty() {
            writeln!(out, "No transactions yet.")?;
        }
        for transaction in &overview.other {
            self.transaction(transaction, out)?;
        }

        Ok(())
    }

    fn report(&self, report: &MonthlyReport, out: &mut impl Write) -> Result<(), Error> {
        if report.rows.is_empty() {
            writeln!(out, "No transactions yet.")?;
            return Ok(());
        }

        writeln!(out, "{:<8}  {:>14}  {:>14}", "Month", "Net", "Balance")?;
        for row in &report.rows {
            writeln!(
                out,
                "{:<8}  {:>14}  {:>14}",
                row.label,
                self.money(row.net),
                self.money(row.closing_balance)
            )?;
        }

        Ok(())
    }

    fn budget_line(&self, budget: &Budget, out: &mut impl Write) -> Result<(), Error> {
        writeln!(
            out,
            "{:>4}  {:<20}  {:<8}  {:<8}  {} items  {:>14}",
            budget.id,
            budget.name,
            budget.kind,
            budget.period,
            budget.item_count(),
            self.money(budget.total_amount()),
        )?;

        Ok(())
    }

    fn budget(&self, budget: &Budget, out: &mut impl Write) -> Result<(), Error> {
        writeln!(out, "{} ({} budget {})", budget.name, budget.kind, budget.id)?;
        match budget.period_end() {
            Some(end) => writeln!(
                out,
                "{} from {} to {}",
                budget.period, budget.start_date, end
            )?,
            None => writeln!(out, "{} from {}", budget.period, budget.start_date)?,
        }
        writeln!(out)?;

        if budget.items.is_empty() {
            writeln!(out, "No items yet.")?;
        }

        for item in &budget.items {
            self.budget_item(item, out)?;
        }

        writeln!(out)?;
        writeln!(out, "Total: {}", self.money(budget.total_amount()))?;
        writeln!(out, "Net:   {}", self.money(budget.net_amount()))?;

        Ok(())
    }

    fn budget_item(&self, item: &BudgetItem, out: &mut impl Write) -> Result<(), Error> {
        writeln!(
            out,
            "{:>4}  {}  {:<20}  {:<12}  {:<8}  {:<8}  {:>14}",
            item.id,
            item.date,
            item.name,
            item.category,
            item.kind,
            item.frequency,
            self.money(item.amount),
        )?;

        Ok(())
    }
}


#[cfg(test)]
mod run_tests {
    use time::macros::date;

    use crate::{
        AppConfig, BudgetPeriod, BudgetType, Error, ItemFrequency, ItemType, Ledger,
        TransactionType, TransferFilter,
        cli::{
            BalanceCommand, BudgetCommand, Command, ProfileCommand, TransactionCommand, execute,
        },
        stores::MemoryStore,
        transaction::test_utils::NOW,
    };

    fn get_test_config() -> AppConfig {
        AppConfig::new("test.db", "Etc/UTC").unwrap()
    }

    fn run_command(ledger: &mut Ledger<MemoryStore>, command: Command) -> Result<String, Error> {
        let mut output = Vec::new();
        execute(command, ledger, &get_test_config(), NOW, &mut output)?;

        Ok(String::from_utf8(output).unwrap())
    }

    fn get_test_ledger() -> Ledger<MemoryStore> {
        let mut ledger = Ledger::open(MemoryStore::default()).unwrap();
        ledger.add_balance("Cheque", 1000.0).unwrap();
        ledger.add_balance("Savings", 5000.0).unwrap();
        ledger
    }

    fn add_transaction(title: &str, amount: f64, kind: TransactionType) -> Command {
        Command::Transaction {
            command: TransactionCommand::Add {
                title: title.to_owned(),
                amount,
                kind,
                account: 1,
                date: None,
            },
        }
    }

    #[test]
    fn unusable_currency_symbol_is_error() {
        let mut ledger = get_test_ledger();
        let config = get_test_config().currency_symbol(&"S".repeat(64));

        let result = execute(Command::Summary, &mut ledger, &config, NOW, &mut Vec::new());

        assert!(matches!(result, Err(Error::InvalidCurrencySymbol(_))));
    }

    #[test]
    fn balance_add_and_list() {
        let mut ledger = Ledger::open(MemoryStore::default()).unwrap();

        let added = run_command(
            &mut ledger,
            Command::Balance {
                command: BalanceCommand::Add {
                    name: "Cheque".to_owned(),
                    amount: 1234.5,
                },
            },
        )
        .unwrap();
        let listed = run_command(
            &mut ledger,
            Command::Balance {
                command: BalanceCommand::List,
            },
        )
        .unwrap();

        assert!(added.contains("Cheque"));
        assert!(listed.contains("R1,234.50"));
        assert!(listed.contains("Total"));
    }

    #[test]
    fn transaction_add_updates_balance() {
        let mut ledger = get_test_ledger();

        let output = run_command(
            &mut ledger,
            add_transaction("Groceries", 250.0, TransactionType::Expense),
        )
        .unwrap();

        assert!(output.contains("Groceries"));
        assert!(output.contains("-R250.00"));
        assert_eq!(ledger.balance(1).unwrap().amount, 750.0);
    }

    #[test]
    fn transaction_add_with_date_uses_start_of_day() {
        let mut ledger = get_test_ledger();

        run_command(
            &mut ledger,
            Command::Transaction {
                command: TransactionCommand::Add {
                    title: "Rent".to_owned(),
                    amount: 800.0,
                    kind: TransactionType::Expense,
                    account: 1,
                    date: Some(date!(2025 - 03 - 01)),
                },
            },
        )
        .unwrap();

        let transaction = &ledger.transactions()[0];
        assert_eq!(transaction.date.date(), date!(2025 - 03 - 01));
        assert_eq!(transaction.date.hour(), 0);
    }

    #[test]
    fn transaction_add_in_future_is_error() {
        let mut ledger = get_test_ledger();

        let result = run_command(
            &mut ledger,
            Command::Transaction {
                command: TransactionCommand::Add {
                    title: "Bonus".to_owned(),
                    amount: 800.0,
                    kind: TransactionType::Income,
                    account: 1,
                    date: Some(date!(2025 - 04 - 01)),
                },
            },
        );

        assert!(matches!(result, Err(Error::FutureDate(_))));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn transfer_then_list_only_transfers() {
        let mut ledger = get_test_ledger();
        run_command(
            &mut ledger,
            add_transaction("Salary", 2000.0, TransactionType::Income),
        )
        .unwrap();

        run_command(
            &mut ledger,
            Command::Transfer {
                from: 2,
                to: 1,
                amount: 300.0,
            },
        )
        .unwrap();
        let output = run_command(
            &mut ledger,
            Command::Transaction {
                command: TransactionCommand::List {
                    account: None,
                    kind: None,
                    transfers: TransferFilter::Only,
                    search: None,
                    from: None,
                    to: None,
                    limit: None,
                },
            },
        )
        .unwrap();

        assert!(output.contains("Transfer to Cheque"));
        assert!(output.contains("Transfer from Savings"));
        assert!(!output.contains("Salary"));
        assert_eq!(ledger.total_balance(), 8000.0);
    }

    #[test]
    fn summary_excludes_transfers() {
        let mut ledger = get_test_ledger();
        run_command(
            &mut ledger,
            add_transaction("Salary", 2000.0, TransactionType::Income),
        )
        .unwrap();
        ledger.transfer(1, 2, 500.0, NOW).unwrap();

        let output = run_command(&mut ledger, Command::Summary).unwrap();

        assert!(output.starts_with("Hello\n"));
        assert!(output.contains("Total balance: R8,000.00"));
        assert!(output.contains("Income:        R2,000.00"));
        assert!(output.contains("Expenses:      R0.00"));
    }

    #[test]
    fn overview_includes_transfers() {
        let mut ledger = get_test_ledger();
        ledger.transfer(1, 2, 500.0, NOW).unwrap();

        let output = run_command(&mut ledger, Command::Overview).unwrap();

        assert!(output.contains("Income:   R500.00"));
        assert!(output.contains("Expenses: R500.00"));
        assert!(output.contains("Transfer to Savings"));
        assert!(!output.contains("Transfer from Cheque"));
    }

    #[test]
    fn profile_set_then_show() {
        let mut ledger = get_test_ledger();

        let greeting = run_command(
            &mut ledger,
            Command::Profile {
                command: ProfileCommand::Set {
                    name: "Xolani".to_owned(),
                    initial_balance: Some(6000.0),
                },
            },
        )
        .unwrap();
        run_command(
            &mut ledger,
            Command::Profile {
                command: ProfileCommand::Set {
                    name: "Xoli".to_owned(),
                    initial_balance: None,
                },
            },
        )
        .unwrap();
        let shown = run_command(
            &mut ledger,
            Command::Profile {
                command: ProfileCommand::Show,
            },
        )
        .unwrap();

        assert_eq!(greeting, "Hello, Xolani\n");
        assert_eq!(shown, "Name: Xoli\nInitial balance: R6,000.00\n");
    }

    #[test]
    fn budget_workflow() {
        let mut ledger = get_test_ledger();

        run_command(
            &mut ledger,
            Command::Budget {
                command: BudgetCommand::Create {
                    name: "Car loan".to_owned(),
                    kind: BudgetType::Debt,
                    period: BudgetPeriod::Monthly,
                    start: Some(date!(2025 - 03 - 01)),
                    end: None,
                },
            },
        )
        .unwrap();
        run_command(
            &mut ledger,
            Command::Budget {
                command: BudgetCommand::AddItem {
                    budget: 1,
                    name: "Instalment".to_owned(),
                    amount: 3200.0,
                    kind: ItemType::Expense,
                    frequency: ItemFrequency::Fixed,
                    category: "Vehicle".to_owned(),
                    date: None,
                },
            },
        )
        .unwrap();

        let shown = run_command(
            &mut ledger,
            Command::Budget {
                command: BudgetCommand::Show { id: 1 },
            },
        )
        .unwrap();
        let debts = run_command(
            &mut ledger,
            Command::Budget {
                command: BudgetCommand::List { debt: true },
            },
        )
        .unwrap();

        assert!(shown.contains("Monthly from 2025-03-01 to 2025-04-01"));
        assert!(shown.contains("Instalment"));
        assert!(shown.contains("Net:   -R3,200.00"));
        assert!(debts.contains("Car loan"));
        assert_eq!(ledger.budget(1).unwrap().items[0].date, NOW.date());
    }

    #[test]
    fn show_missing_budget_is_not_found() {
        let mut ledger = get_test_ledger();

        let result = run_command(
            &mut ledger,
            Command::Budget {
                command: BudgetCommand::Show { id: 7 },
            },
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn report_lists_months() {
        let mut ledger = get_test_ledger();
        run_command(
            &mut ledger,
            add_transaction("Salary", 2000.0, TransactionType::Income),
        )
        .unwrap();

        let output = run_command(&mut ledger, Command::Report).unwrap();

        assert!(output.contains("Mar 2025"));
        assert!(output.contains("R2,000.00"));
        assert!(output.contains("R8,000.00"));
    }

    #[test]
    fn export_to_stdout() {
        let mut ledger = get_test_ledger();
        run_command(
            &mut ledger,
            add_transaction("Salary", 2000.0, TransactionType::Income),
        )
        .unwrap();

        let output = run_command(&mut ledger, Command::Export { output: None }).unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,date,title,type,amount,account,transfer"));
        assert_eq!(
            lines.next(),
            Some("1,2025-03-18T12:00:00Z,Salary,income,2000.0,Cheque,false")
        );
    }

    #[test]
    fn delete_missing_transaction_is_error() {
        let mut ledger = get_test_ledger();

        let result = run_command(
            &mut ledger,
            Command::Transaction {
                command: TransactionCommand::Delete { id: 99 },
            },
        );

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }
}
