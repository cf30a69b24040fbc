use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use money_pro::{
    BudgetItem, BudgetPeriod, BudgetType, ItemFrequency, ItemType, Ledger, NewBudget, Profile,
    Transaction, TransactionType, stores::SQLiteStore,
};

/// A utility for creating a demo database for money_pro.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut ledger = Ledger::open(SQLiteStore::open(&args.output_path)?)?;

    println!("Creating profile...");
    ledger.set_profile(&Profile {
        user_name: Some("Test User".to_owned()),
        initial_balance: Some(6500.0),
    })?;

    println!("Creating balances...");
    let cheque = ledger.add_balance("Cheque", 4500.0)?;
    let savings = ledger.add_balance("Savings", 2000.0)?;

    println!("Creating transactions...");
    let now = OffsetDateTime::now_utc();
    let transactions = [
        ("Salary", 18000.0, TransactionType::Income, 40),
        ("Rent", 7500.0, TransactionType::Expense, 38),
        ("Groceries", 1240.35, TransactionType::Expense, 30),
        ("Salary", 18000.0, TransactionType::Income, 10),
        ("Rent", 7500.0, TransactionType::Expense, 8),
        ("Fuel", 850.0, TransactionType::Expense, 3),
        ("Coffee", 42.5, TransactionType::Expense, 1),
    ];

    for (title, amount, kind, days_ago) in transactions {
        let date = now - Duration::days(days_ago);
        ledger.record_transaction(Transaction::build(title, amount, kind, cheque.id, date), now)?;
    }

    ledger.transfer(cheque.id, savings.id, 3000.0, now)?;

    println!("Creating budgets...");
    let budget = ledger.create_budget(NewBudget {
        name: "Monthly spending".to_owned(),
        kind: BudgetType::Spending,
        period: BudgetPeriod::Monthly,
        start_date: now.date(),
        end_date: None,
    })?;
    ledger.add_budget_item(
        budget.id,
        BudgetItem::build(
            "Salary",
            18000.0,
            ItemType::Income,
            ItemFrequency::Fixed,
            "Work",
            now.date(),
        ),
    )?;
    ledger.add_budget_item(
        budget.id,
        BudgetItem::build(
            "Rent",
            7500.0,
            ItemType::Expense,
            ItemFrequency::Fixed,
            "Housing",
            now.date(),
        ),
    )?;
    ledger.add_budget_item(
        budget.id,
        BudgetItem::build(
            "Groceries",
            2500.0,
            ItemType::Expense,
            ItemFrequency::Variable,
            "Food",
            now.date(),
        ),
    )?;

    let debt = ledger.create_budget(NewBudget {
        name: "Car loan".to_owned(),
        kind: BudgetType::Debt,
        period: BudgetPeriod::Monthly,
        start_date: now.date(),
        end_date: None,
    })?;
    ledger.add_budget_item(
        debt.id,
        BudgetItem::build(
            "Instalment",
            3200.0,
            ItemType::Expense,
            ItemFrequency::Fixed,
            "Vehicle",
            now.date(),
        ),
    )?;

    println!("Success!");

    Ok(())
}
