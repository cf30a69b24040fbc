//! The ledger owns the three collections and keeps them in sync with the store.

use time::OffsetDateTime;

use crate::{
    Error,
    balance::{self, Balance},
    budget::{self, Budget, BudgetItem, BudgetItemBuilder, NewBudget},
    database_id::{BalanceId, BudgetId, BudgetItemId, TransactionId},
    profile::Profile,
    stores::{
        BALANCES_KEY, BUDGETS_KEY, KeyValueStore, TRANSACTIONS_KEY, encode_collection,
        load_collection,
    },
    transaction::{self, Transaction, TransactionBuilder, TransactionQuery},
    transfer::{self, Transfer},
};

/// The transactions, balances and budgets of one user, backed by a
/// [KeyValueStore].
///
/// Each collection is loaded once when the ledger is opened. Every change
/// rewrites the whole of each collection it touches in a single
/// [KeyValueStore::set_many] call, and the in-memory collections are only
/// updated once that write succeeds.
#[derive(Debug)]
pub struct Ledger<S: KeyValueStore> {
    store: S,
    transactions: Vec<Transaction>,
    balances: Vec<Balance>,
    budgets: Vec<Budget>,
}

/// The collections to write back to the store after a change.
#[derive(Default)]
struct Changes<'a> {
    transactions: Option<&'a [Transaction]>,
    balances: Option<&'a [Balance]>,
    budgets: Option<&'a [Budget]>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the ledger from `store`.
    ///
    /// Collections that are missing or cannot be decoded start out empty.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn open(store: S) -> Result<Self, Error> {
        let transactions = load_collection(&store, TRANSACTIONS_KEY)?;
        let balances = load_collection(&store, BALANCES_KEY)?;
        let budgets = load_collection(&store, BUDGETS_KEY)?;

        Ok(Self {
            store,
            transactions,
            balances,
            budgets,
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All transactions in the order they were recorded.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All balances in the order they were added.
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    /// All budgets in the order they were created.
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Find the balance with `id`.
    pub fn balance(&self, id: BalanceId) -> Option<&Balance> {
        balance::find_balance(id, &self.balances)
    }

    /// Find the budget with `id`.
    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    /// The total across all balances.
    pub fn total_balance(&self) -> f64 {
        balance::total_balance(&self.balances)
    }

    /// Select transactions as described by `query`.
    pub fn query(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        transaction::query_transactions(&self.transactions, query)
    }

    /// Load the user's profile from the store.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn profile(&self) -> Result<Profile, Error> {
        Profile::load(&self.store)
    }

    /// Replace the user's profile in the store.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn set_profile(&mut self, profile: &Profile) -> Result<(), Error> {
        profile.save(&mut self.store)?;
        tracing::info!("Saved profile");

        Ok(())
    }

    /// Add a new balance account.
    ///
    /// # Errors
    /// See [balance::add_balance] for validation errors. Store errors are also
    /// returned.
    pub fn add_balance(&mut self, name: &str, amount: f64) -> Result<Balance, Error> {
        let mut balances = self.balances.clone();
        let balance = balance::add_balance(name, amount, &mut balances)?;

        self.save(Changes {
            balances: Some(&balances),
            ..Default::default()
        })?;
        self.balances = balances;

        tracing::info!("Added balance {} \"{}\"", balance.id, balance.name);
        Ok(balance)
    }

    /// Delete a balance account.
    ///
    /// Transactions recorded against the account are kept.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingBalance] if the balance does not exist, or a
    /// store error.
    pub fn delete_balance(&mut self, id: BalanceId) -> Result<Balance, Error> {
        let mut balances = self.balances.clone();
        let balance = balance::delete_balance(id, &mut balances)?;

        self.save(Changes {
            balances: Some(&balances),
            ..Default::default()
        })?;
        self.balances = balances;

        tracing::info!("Deleted balance {id} \"{}\"", balance.name);
        Ok(balance)
    }

    /// Record a transaction and apply it to its account.
    ///
    /// `now` is the current local time, used to reject future dates.
    ///
    /// # Errors
    /// Returns a validation error from the builder, [Error::InvalidBalance] if
    /// the account does not exist, or a store error.
    pub fn record_transaction(
        &mut self,
        builder: TransactionBuilder,
        now: OffsetDateTime,
    ) -> Result<Transaction, Error> {
        let mut transactions = self.transactions.clone();
        let mut balances = self.balances.clone();
        let transaction =
            transaction::record_transaction(builder, now, &mut transactions, &mut balances)?;

        self.save(Changes {
            transactions: Some(&transactions),
            balances: Some(&balances),
            ..Default::default()
        })?;
        self.transactions = transactions;
        self.balances = balances;

        tracing::info!(
            "Recorded {} {} \"{}\" against balance {}",
            transaction.kind.as_str(),
            transaction.id,
            transaction.title,
            transaction.balance_account_id
        );
        Ok(transaction)
    }

    /// Delete a transaction and reverse its effect on its account.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if the transaction does not
    /// exist, or a store error.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let mut transactions = self.transactions.clone();
        let mut balances = self.balances.clone();
        let transaction = transaction::delete_transaction(id, &mut transactions, &mut balances)?;

        self.save(Changes {
            transactions: Some(&transactions),
            balances: Some(&balances),
            ..Default::default()
        })?;
        self.transactions = transactions;
        self.balances = balances;

        tracing::info!("Deleted transaction {id} \"{}\"", transaction.title);
        Ok(transaction)
    }

    /// Move `amount` between two accounts, recording a transaction on each.
    ///
    /// # Errors
    /// Returns [Error::SameAccountTransfer], [Error::InvalidAmount],
    /// [Error::InvalidBalance], or a store error.
    pub fn transfer(
        &mut self,
        from: BalanceId,
        to: BalanceId,
        amount: f64,
        date: OffsetDateTime,
    ) -> Result<Transfer, Error> {
        let mut transactions = self.transactions.clone();
        let mut balances = self.balances.clone();
        let transfer =
            transfer::transfer(from, to, amount, date, &mut transactions, &mut balances)?;

        self.save(Changes {
            transactions: Some(&transactions),
            balances: Some(&balances),
            ..Default::default()
        })?;
        self.transactions = transactions;
        self.balances = balances;

        tracing::info!("Transferred {amount} from balance {from} to balance {to}");
        Ok(transfer)
    }

    /// Create a new budget with no items.
    ///
    /// # Errors
    /// Returns [Error::EmptyBudgetName], [Error::InvalidBudgetDates], or a store
    /// error.
    pub fn create_budget(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
        let mut budgets = self.budgets.clone();
        let budget = budget::create_budget(new_budget, &mut budgets)?;

        self.save(Changes {
            budgets: Some(&budgets),
            ..Default::default()
        })?;
        self.budgets = budgets;

        tracing::info!("Created budget {} \"{}\"", budget.id, budget.name);
        Ok(budget)
    }

    /// Delete a budget and its items.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingBudget] or a store error.
    pub fn delete_budget(&mut self, id: BudgetId) -> Result<Budget, Error> {
        let mut budgets = self.budgets.clone();
        let budget = budget::delete_budget(id, &mut budgets)?;

        self.save(Changes {
            budgets: Some(&budgets),
            ..Default::default()
        })?;
        self.budgets = budgets;

        tracing::info!("Deleted budget {id} \"{}\"", budget.name);
        Ok(budget)
    }

    /// Add a planned item to a budget.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingBudget], a validation error for the item, or
    /// a store error.
    pub fn add_budget_item(
        &mut self,
        budget_id: BudgetId,
        builder: BudgetItemBuilder,
    ) -> Result<BudgetItem, Error> {
        let mut budgets = self.budgets.clone();
        let item = budget::add_item(budget_id, builder, &mut budgets)?;

        self.save(Changes {
            budgets: Some(&budgets),
            ..Default::default()
        })?;
        self.budgets = budgets;

        tracing::info!("Added item {} \"{}\" to budget {budget_id}", item.id, item.name);
        Ok(item)
    }

    /// Remove a planned item from a budget.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingBudget], [Error::DeleteMissingBudgetItem], or
    /// a store error.
    pub fn remove_budget_item(
        &mut self,
        budget_id: BudgetId,
        item_id: BudgetItemId,
    ) -> Result<BudgetItem, Error> {
        let mut budgets = self.budgets.clone();
        let item = budget::remove_item(budget_id, item_id, &mut budgets)?;

        self.save(Changes {
            budgets: Some(&budgets),
            ..Default::default()
        })?;
        self.budgets = budgets;

        tracing::info!("Removed item {item_id} from budget {budget_id}");
        Ok(item)
    }

    fn save(&mut self, changes: Changes) -> Result<(), Error> {
        let mut entries = Vec::with_capacity(3);

        if let Some(transactions) = changes.transactions {
            entries.push((TRANSACTIONS_KEY, encode_collection(transactions)?));
        }

        if let Some(balances) = changes.balances {
            entries.push((BALANCES_KEY, encode_collection(balances)?));
        }

        if let Some(budgets) = changes.budgets {
            entries.push((BUDGETS_KEY, encode_collection(budgets)?));
        }

        tracing::debug!(
            "Saving {}",
            entries
                .iter()
                .map(|(key, _)| *key)
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.store.set_many(&entries)
    }
}
