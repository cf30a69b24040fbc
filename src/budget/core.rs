//! Defines budgets, their planned items, and the operations that edit them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{
    Error,
    database_id::{BudgetId, BudgetItemId, next_id},
};

// ============================================================================
// MODELS
// ============================================================================

/// What a budget is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BudgetType {
    /// Planned spending for a period.
    Spending,
    /// Tracking repayments of a debt.
    Debt,
}

/// How long a budget runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BudgetPeriod {
    /// One day.
    Daily,
    /// Seven days.
    Weekly,
    /// One calendar month.
    Monthly,
    /// Between a start date and an explicit end date.
    Custom,
}

/// Whether a budget item is planned income or a planned expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ItemType {
    /// Planned income.
    Income,
    /// A planned expense.
    Expense,
}

/// Whether a budget item's amount is known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ItemFrequency {
    /// The same amount every period, e.g. rent.
    Fixed,
    /// An estimate that changes from period to period, e.g. groceries.
    Variable,
}

impl Display for BudgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetType::Spending => write!(f, "Spending"),
            BudgetType::Debt => write!(f, "Debt"),
        }
    }
}

impl Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Daily => write!(f, "Daily"),
            BudgetPeriod::Weekly => write!(f, "Weekly"),
            BudgetPeriod::Monthly => write!(f, "Monthly"),
            BudgetPeriod::Custom => write!(f, "Custom"),
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Income => write!(f, "Income"),
            ItemType::Expense => write!(f, "Expense"),
        }
    }
}

impl Display for ItemFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemFrequency::Fixed => write!(f, "Fixed"),
            ItemFrequency::Variable => write!(f, "Variable"),
        }
    }
}

/// A named plan made up of income and expense items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The display name of the budget.
    pub name: String,
    /// Whether this is a spending or debt budget.
    #[serde(rename = "type")]
    pub kind: BudgetType,
    /// How long the budget runs for.
    pub period: BudgetPeriod,
    /// The planned items in the order they were added.
    pub items: Vec<BudgetItem>,
    /// The first day of the budget.
    pub start_date: Date,
    /// The last day of a [BudgetPeriod::Custom] budget. `None` for other periods.
    pub end_date: Option<Date>,
}

/// A planned income or expense within a [Budget].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// The ID of the item, unique within its budget.
    pub id: BudgetItemId,
    /// The display name of the item.
    pub name: String,
    /// The planned amount, always greater than zero.
    pub amount: f64,
    /// Whether this is planned income or a planned expense.
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Whether the amount is fixed or an estimate.
    pub frequency: ItemFrequency,
    /// A free-form category, e.g. "Housing".
    pub category: String,
    /// When the item is due.
    pub date: Date,
}

impl Budget {
    /// The number of items in the budget.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The sum of all item amounts, regardless of whether they are income or
    /// expenses.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Planned income minus planned expenses.
    pub fn net_amount(&self) -> f64 {
        self.items
            .iter()
            .map(|item| match item.kind {
                ItemType::Income => item.amount,
                ItemType::Expense => -item.amount,
            })
            .sum()
    }

    /// The last day covered by the budget.
    ///
    /// Daily, weekly and monthly budgets end one day, seven days and one
    /// calendar month after they start. Custom budgets end on their end date.
    pub fn period_end(&self) -> Option<Date> {
        match self.period {
            BudgetPeriod::Daily => self.start_date.checked_add(Duration::days(1)),
            BudgetPeriod::Weekly => self.start_date.checked_add(Duration::weeks(1)),
            BudgetPeriod::Monthly => add_month(self.start_date),
            BudgetPeriod::Custom => self.end_date,
        }
    }
}

/// The same day one calendar month later, clamped to the end of shorter months.
fn add_month(date: Date) -> Option<Date> {
    let month = date.month().next();
    let year = if month == time::Month::January {
        date.year() + 1
    } else {
        date.year()
    };
    let day = date.day().min(month.length(year));

    Date::from_calendar_date(year, month, day).ok()
}

/// The details needed to create a [Budget].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    /// The display name. Must not be empty.
    pub name: String,
    /// Whether this is a spending or debt budget.
    pub kind: BudgetType,
    /// How long the budget runs for.
    pub period: BudgetPeriod,
    /// The first day of the budget.
    pub start_date: Date,
    /// The last day. Required for, and only allowed on, custom budgets.
    pub end_date: Option<Date>,
}

/// A builder for creating [BudgetItem] instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItemBuilder {
    /// The display name. Must not be empty.
    pub name: String,
    /// The planned amount. Must be greater than zero.
    pub amount: f64,
    /// Whether this is planned income or a planned expense.
    pub kind: ItemType,
    /// Whether the amount is fixed or an estimate.
    pub frequency: ItemFrequency,
    /// A free-form category. Must not be empty.
    pub category: String,
    /// When the item is due.
    pub date: Date,
}

impl BudgetItem {
    /// Create a new budget item.
    ///
    /// Shortcut for [BudgetItemBuilder] for discoverability.
    pub fn build(
        name: &str,
        amount: f64,
        kind: ItemType,
        frequency: ItemFrequency,
        category: &str,
        date: Date,
    ) -> BudgetItemBuilder {
        BudgetItemBuilder {
            name: name.to_owned(),
            amount,
            kind,
            frequency,
            category: category.to_owned(),
            date,
        }
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Validate `new_budget` and append it to `budgets` with no items.
///
/// # Errors
/// Returns:
/// - [Error::EmptyBudgetName] if the name is empty or only whitespace,
/// - or [Error::InvalidBudgetDates] if a custom budget has no end date or
///   ends on or before its start date, or a non-custom budget has an end date.
pub(crate) fn create_budget(new_budget: NewBudget, budgets: &mut Vec<Budget>) -> Result<Budget, Error> {
    let name = new_budget.name.trim();

    if name.is_empty() {
        return Err(Error::EmptyBudgetName);
    }

    match (new_budget.period, new_budget.end_date) {
        (BudgetPeriod::Custom, None) => {
            return Err(Error::InvalidBudgetDates(
                "a custom budget needs an end date".to_owned(),
            ));
        }
        (BudgetPeriod::Custom, Some(end_date)) if end_date <= new_budget.start_date => {
            return Err(Error::InvalidBudgetDates(format!(
                "the end date {end_date} is not after the start date {}",
                new_budget.start_date
            )));
        }
        (BudgetPeriod::Custom, Some(_)) => {}
        (period, Some(_)) => {
            return Err(Error::InvalidBudgetDates(format!(
                "only custom budgets take an end date, this budget is {period}"
            )));
        }
        (_, None) => {}
    }

    let budget = Budget {
        id: next_id(budgets.iter().map(|budget| budget.id))?,
        name: name.to_owned(),
        kind: new_budget.kind,
        period: new_budget.period,
        items: Vec::new(),
        start_date: new_budget.start_date,
        end_date: new_budget.end_date,
    };
    budgets.push(budget.clone());

    Ok(budget)
}

/// Remove the budget with `id` and all of its items.
///
/// # Errors
/// Returns [Error::DeleteMissingBudget] if no budget has the ID `id`.
pub(crate) fn delete_budget(id: BudgetId, budgets: &mut Vec<Budget>) -> Result<Budget, Error> {
    let index = budgets
        .iter()
        .position(|budget| budget.id == id)
        .ok_or(Error::DeleteMissingBudget)?;

    Ok(budgets.remove(index))
}

/// Validate `builder` and append it to the items of the budget with `budget_id`.
///
/// # Errors
/// Returns:
/// - [Error::UpdateMissingBudget] if no budget has the ID `budget_id`,
/// - [Error::EmptyBudgetItemName] if the name is empty or only whitespace,
/// - [Error::EmptyBudgetItemCategory] if the category is empty or only whitespace,
/// - or [Error::InvalidAmount] if the amount is not a finite number greater than zero.
pub(crate) fn add_item(
    budget_id: BudgetId,
    builder: BudgetItemBuilder,
    budgets: &mut [Budget],
) -> Result<BudgetItem, Error> {
    let budget = budgets
        .iter_mut()
        .find(|budget| budget.id == budget_id)
        .ok_or(Error::UpdateMissingBudget)?;

    let name = builder.name.trim();
    let category = builder.category.trim();

    if name.is_empty() {
        return Err(Error::EmptyBudgetItemName);
    }

    if category.is_empty() {
        return Err(Error::EmptyBudgetItemCategory);
    }

    if !builder.amount.is_finite() || builder.amount <= 0.0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    let item = BudgetItem {
        id: next_id(budget.items.iter().map(|item| item.id))?,
        name: name.to_owned(),
        amount: builder.amount,
        kind: builder.kind,
        frequency: builder.frequency,
        category: category.to_owned(),
        date: builder.date,
    };
    budget.items.push(item.clone());

    Ok(item)
}

/// Remove the item with `item_id` from the budget with `budget_id`.
///
/// # Errors
/// Returns [Error::UpdateMissingBudget] if no budget has the ID `budget_id`,
/// or [Error::DeleteMissingBudgetItem] if the budget has no item `item_id`.
pub(crate) fn remove_item(
    budget_id: BudgetId,
    item_id: BudgetItemId,
    budgets: &mut [Budget],
) -> Result<BudgetItem, Error> {
    let budget = budgets
        .iter_mut()
        .find(|budget| budget.id == budget_id)
        .ok_or(Error::UpdateMissingBudget)?;

    let index = budget
        .items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(Error::DeleteMissingBudgetItem)?;

    Ok(budget.items.remove(index))
}

/// The budgets that track debts.
pub fn debt_budgets(budgets: &[Budget]) -> Vec<&Budget> {
    budgets
        .iter()
        .filter(|budget| budget.kind == BudgetType::Debt)
        .collect()
}



#[cfg(test)]
mod item_tests {
    use time::macros::date;

    use crate::{
        Error,
        budget::{
            BudgetItem, BudgetPeriod, BudgetType, ItemFrequency, ItemType,
            core::test_utils::new_budget,
        },
    };

    use super::{add_item, create_budget, remove_item};

    fn rent() -> crate::budget::BudgetItemBuilder {
        BudgetItem::build(
            "Rent",
            4500.0,
            ItemType::Expense,
            ItemFrequency::Fixed,
            "Housing",
            date!(2025 - 03 - 01),
        )
    }

    fn salary() -> crate::budget::BudgetItemBuilder {
        BudgetItem::build(
            "Salary",
            12000.0,
            ItemType::Income,
            ItemFrequency::Fixed,
            "Work",
            date!(2025 - 03 - 25),
        )
    }

    #[test]
    fn add_item_appends_to_budget() {
        let mut budgets = Vec::new();
        let budget = create_budget(
            new_budget("March", BudgetType::Spending, BudgetPeriod::Monthly),
            &mut budgets,
        )
        .unwrap();

        let first = add_item(budget.id, rent(), &mut budgets).unwrap();
        let second = add_item(budget.id, salary(), &mut budgets).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(budgets[0].items, vec![first, second]);
        assert_eq!(budgets[0].item_count(), 2);
    }

    #[test]
    fn totals() {
        let mut budgets = Vec::new();
        let budget = create_budget(
            new_budget("March", BudgetType::Spending, BudgetPeriod::Monthly),
            &mut budgets,
        )
        .unwrap();
        add_item(budget.id, rent(), &mut budgets).unwrap();
        add_item(budget.id, salary(), &mut budgets).unwrap();

        assert_eq!(budgets[0].total_amount(), 16500.0);
        assert_eq!(budgets[0].net_amount(), 7500.0);
    }

    #[test]
    fn add_item_to_missing_budget() {
        assert_eq!(
            add_item(1, rent(), &mut []),
            Err(Error::UpdateMissingBudget)
        );
    }

    #[test]
    fn add_item_validates_fields() {
        let mut budgets = Vec::new();
        create_budget(
            new_budget("March", BudgetType::Spending, BudgetPeriod::Monthly),
            &mut budgets,
        )
        .unwrap();

        let mut no_name = rent();
        no_name.name = String::new();
        let mut no_category = rent();
        no_category.category = "  ".to_owned();
        let mut negative = rent();
        negative.amount = -1.0;

        assert_eq!(
            add_item(1, no_name, &mut budgets),
            Err(Error::EmptyBudgetItemName)
        );
        assert_eq!(
            add_item(1, no_category, &mut budgets),
            Err(Error::EmptyBudgetItemCategory)
        );
        assert_eq!(
            add_item(1, negative, &mut budgets),
            Err(Error::InvalidAmount(-1.0))
        );
        assert!(budgets[0].items.is_empty());
    }

    #[test]
    fn remove_item_from_budget() {
        let mut budgets = Vec::new();
        create_budget(
            new_budget("March", BudgetType::Spending, BudgetPeriod::Monthly),
            &mut budgets,
        )
        .unwrap();
        let rent = add_item(1, rent(), &mut budgets).unwrap();
        let salary = add_item(1, salary(), &mut budgets).unwrap();

        let removed = remove_item(1, rent.id, &mut budgets).unwrap();

        assert_eq!(removed, rent);
        assert_eq!(budgets[0].items, vec![salary]);
    }

    #[test]
    fn remove_missing_item() {
        let mut budgets = Vec::new();
        create_budget(
            new_budget("March", BudgetType::Spending, BudgetPeriod::Monthly),
            &mut budgets,
        )
        .unwrap();

        assert_eq!(
            remove_item(1, 3, &mut budgets),
            Err(Error::DeleteMissingBudgetItem)
        );
        assert_eq!(
            remove_item(2, 1, &mut budgets),
            Err(Error::UpdateMissingBudget)
        );
    }
}
