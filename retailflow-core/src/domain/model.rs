// retailflow-core/src/domain/model.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// --- CLEANED ENTITIES ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registration_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    /// `None` when the source cell was empty. Missing categories are not defaulted.
    pub category: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub transaction_date: NaiveDate,
    pub quantity: i64,
    pub amount: f64,
}

/// The three cleaned tables of one run, handed to the store as a unit.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub transactions: Vec<Transaction>,
}

// --- INPUT TABLES ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Customers,
    Products,
    Transactions,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Customers, Entity::Products, Entity::Transactions];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Transactions => "transactions",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Customers => "customers.csv",
            Self::Products => "products.csv",
            Self::Transactions => "transactions.csv",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Customers => &[
                "customer_id",
                "first_name",
                "last_name",
                "email",
                "registration_date",
            ],
            Self::Products => &["product_id", "product_name", "category", "price"],
            Self::Transactions => &[
                "transaction_id",
                "customer_id",
                "product_id",
                "transaction_date",
                "quantity",
                "amount",
            ],
        }
    }
}

// --- STORED RELATIONS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Customers,
    Products,
    Transactions,
    CustomerRevenue,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Customers,
        Relation::Products,
        Relation::Transactions,
        Relation::CustomerRevenue,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Transactions => "transactions",
            Self::CustomerRevenue => "customer_revenue",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Relation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relation::ALL
            .into_iter()
            .find(|r| r.table_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownRelation(s.to_string()))
    }
}

// --- RAW TABULAR INPUT ---

/// A table exactly as extracted: a header row and text cells.
/// Typing and validation happen in the cleaners, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a required column. An absent column is a structural error.
    pub fn column(&self, column: &str) -> Result<usize, DomainError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DomainError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|cells| RawRow { cells })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    cells: &'a [String],
}

impl<'a> RawRow<'a> {
    /// Cell value, or `None` when the cell is missing, empty or whitespace only.
    /// A blank category therefore loads as NULL and a blank name takes its
    /// placeholder.
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.cells
            .get(idx)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Collapses rows sharing a key, keeping the last occurrence of each.
pub fn last_write_wins<T, F>(rows: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> i64,
{
    let mut last_index: HashMap<i64, usize> = HashMap::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        last_index.insert(key(row), idx);
    }

    rows.iter()
        .enumerate()
        .filter(|(idx, row)| last_index.get(&key(row)) == Some(idx))
        .map(|(_, row)| row)
        .collect()
}
