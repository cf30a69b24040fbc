//! Budgets made of planned income and expense items.

mod core;

pub use core::{
    Budget, BudgetItem, BudgetItemBuilder, BudgetPeriod, BudgetType, ItemFrequency, ItemType,
    NewBudget, debt_budgets,
};

pub(crate) use core::{add_item, create_budget, delete_budget, remove_item};

#[cfg(test)]
pub(crate) use core::test_utils;
